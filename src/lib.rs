//! Aura library exports for the binary and for testing

pub mod core;
pub mod remote;
pub mod shell;

#[cfg(test)]
pub mod test_support;
