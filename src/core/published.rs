//! # Published State
//!
//! A value with one writer (the controller that owns it) and any number of
//! readers. Built on `tokio::sync::watch`, so readers always see the latest
//! value and intermediate writes may be skipped.

use log::debug;
use tokio::sync::watch;

pub struct Published<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone + PartialEq> Published<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Latest value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// A receiver that starts at the current value and wakes on every change.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Stores `value`. Subscribers are only woken when it differs from the
    /// current value. Returns whether anything changed.
    pub(crate) fn set(&self, value: T) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }
}

impl Published<bool> {
    /// Raises the flag if it is down. Returns false if it was already up.
    pub(crate) fn raise(&self) -> bool {
        self.tx.send_if_modified(|up| {
            if *up {
                false
            } else {
                *up = true;
                true
            }
        })
    }

    /// Raises the flag and returns a guard that lowers it when dropped,
    /// or `None` if the flag was already up.
    pub(crate) fn hold(&self, label: &'static str) -> Option<BusyGuard<'_>> {
        if self.raise() {
            debug!("{label}: busy");
            Some(BusyGuard { flag: self, label })
        } else {
            None
        }
    }
}

/// Lowers a busy flag on drop, on every exit path.
pub(crate) struct BusyGuard<'a> {
    flag: &'a Published<bool>,
    label: &'static str,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
        debug!("{}: idle", self.label);
    }
}
