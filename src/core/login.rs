//! # Session Authenticator
//!
//! Drives the login screen: tracks whether the form can be submitted,
//! performs one login attempt at a time and publishes the identity the
//! shell navigates with.
//!
//! ```text
//! SessionAuthenticator
//! ├── is_input_valid: bool                 // both fields filled in
//! ├── is_busy: bool                        // login call in flight
//! ├── authenticated_identity: Option<Identity>
//! └── failure: Option<FailureReason>       // why the last attempt failed
//! ```

use std::sync::Arc;

use log::{debug, info, warn};

use crate::core::failure::{FailureReason, Rejection};
use crate::core::model::{Credentials, Identity};
use crate::core::published::Published;
use crate::remote::RemoteBankingClient;

pub struct SessionAuthenticator {
    client: Arc<dyn RemoteBankingClient>,
    is_input_valid: Published<bool>,
    is_busy: Published<bool>,
    authenticated_identity: Published<Option<Identity>>,
    failure: Published<Option<FailureReason>>,
}

impl SessionAuthenticator {
    pub fn new(client: Arc<dyn RemoteBankingClient>) -> Self {
        Self {
            client,
            is_input_valid: Published::new(false),
            is_busy: Published::new(false),
            authenticated_identity: Published::new(None),
            failure: Published::new(None),
        }
    }

    pub fn is_input_valid(&self) -> &Published<bool> {
        &self.is_input_valid
    }

    pub fn is_busy(&self) -> &Published<bool> {
        &self.is_busy
    }

    /// Goes from absent to present exactly when a login is granted.
    pub fn authenticated_identity(&self) -> &Published<Option<Identity>> {
        &self.authenticated_identity
    }

    pub fn failure(&self) -> &Published<Option<FailureReason>> {
        &self.failure
    }

    /// Called on every keystroke in either field.
    pub fn validate_input(&self, identifier: &str, secret: &str) {
        self.is_input_valid
            .set(!identifier.is_empty() && !secret.is_empty());
    }

    /// Makes a single login attempt. Does not check `is_input_valid`; empty
    /// input simply goes to the service and fails there. Ignored while a
    /// previous attempt is still in flight. A failed attempt withdraws any
    /// identity published earlier.
    pub async fn login(&self, identifier: &str, secret: &str) {
        let Some(_busy) = self.is_busy.hold("login") else {
            debug!("Login for {identifier} ignored: attempt already in flight");
            return;
        };

        let credentials = Credentials::new(identifier, secret);
        info!("Login attempt for {} via {}", identifier, self.client.name());

        match self.client.login(&credentials).await {
            Ok(true) => {
                info!("Login granted for {identifier}");
                self.failure.set(None);
                self.authenticated_identity
                    .set(Some(Identity::new(identifier)));
            }
            Ok(false) => {
                warn!("Login denied for {identifier}");
                self.authenticated_identity.set(None);
                self.failure.set(Some(Rejection::Credentials.into()));
            }
            Err(e) => {
                warn!("Login for {identifier} failed: {e}");
                self.authenticated_identity.set(None);
                self.failure.set(Some(e.into()));
            }
        }
    }
}
