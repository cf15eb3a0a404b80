use async_trait::async_trait;
use thiserror::Error;

use crate::core::model::{Account, Credentials, TransferRequest};

/// Errors that can occur while talking to the banking service.
/// A completed call that denies the request is not an error here; it is
/// reported through the `Ok` value (`granted = false`, `result = false`, no accounts).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Network-level failure (timeout, DNS, connection refused).
    #[error("network error: {0}")]
    Network(String),
    /// Service answered with a non-success status.
    #[error("service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
    /// Response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Parse(String),
}

/// The remote side of the banking app. Controllers receive one of these at
/// construction and never reach for a process-wide instance.
#[async_trait]
pub trait RemoteBankingClient: Send + Sync {
    /// Returns the name of the backend, for logs.
    fn name(&self) -> &str;

    /// Checks the credentials. `Ok(true)` means access was granted.
    async fn login(&self, credentials: &Credentials) -> Result<bool, RemoteError>;

    /// Moves money between two users. `Ok(true)` means the transfer committed.
    async fn transfer(&self, request: &TransferRequest) -> Result<bool, RemoteError>;

    /// Lists the accounts owned by `owner_id`, in service order.
    async fn get_account(&self, owner_id: &str) -> Result<Vec<Account>, RemoteError>;
}
