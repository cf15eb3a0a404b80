//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::Notify;

use crate::core::model::{Account, Credentials, TransferRequest};
use crate::remote::{RemoteBankingClient, RemoteError};

/// One recorded call against the scripted client.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    Transfer {
        sender: String,
        recipient: String,
        amount: Decimal,
    },
    GetAccount(String),
}

/// A remote client whose answers are fixed up front.
///
/// With `gated()`, login and transfer calls wait for `release()` before
/// answering, which lets a test look at state while a call is in flight.
/// `accounts_gated()` and `release_accounts()` do the same for account lookups.
pub struct ScriptedClient {
    login: Result<bool, RemoteError>,
    transfer: Result<bool, RemoteError>,
    accounts: Result<Vec<Account>, RemoteError>,
    gate: Option<Arc<Notify>>,
    accounts_gate: Option<Arc<Notify>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            login: Ok(true),
            transfer: Ok(true),
            accounts: Ok(Vec::new()),
            gate: None,
            accounts_gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn login_returns(mut self, answer: Result<bool, RemoteError>) -> Self {
        self.login = answer;
        self
    }

    pub fn transfer_returns(mut self, answer: Result<bool, RemoteError>) -> Self {
        self.transfer = answer;
        self
    }

    pub fn accounts_return(mut self, answer: Result<Vec<Account>, RemoteError>) -> Self {
        self.accounts = answer;
        self
    }

    pub fn with_balance(self, balance: Decimal) -> Self {
        self.accounts_return(Ok(vec![account("acc-1", balance)]))
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn accounts_gated(mut self) -> Self {
        self.accounts_gate = Some(Arc::new(Notify::new()));
        self
    }

    pub fn release_accounts(&self) {
        if let Some(gate) = &self.accounts_gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl RemoteBankingClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn login(&self, credentials: &Credentials) -> Result<bool, RemoteError> {
        self.record(Call::Login(credentials.identifier.clone()));
        self.wait_for_gate().await;
        self.login.clone()
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<bool, RemoteError> {
        self.record(Call::Transfer {
            sender: request.sender_id().to_string(),
            recipient: request.recipient_id().to_string(),
            amount: request.amount(),
        });
        self.wait_for_gate().await;
        self.transfer.clone()
    }

    async fn get_account(&self, owner_id: &str) -> Result<Vec<Account>, RemoteError> {
        self.record(Call::GetAccount(owner_id.to_string()));
        if let Some(gate) = &self.accounts_gate {
            gate.notified().await;
        }
        self.accounts.clone()
    }
}

/// Shorthand for a primary account.
pub fn account(id: &str, balance: Decimal) -> Account {
    Account {
        id: id.to_string(),
        is_primary: true,
        balance,
    }
}

pub fn network_error() -> RemoteError {
    RemoteError::Network("connection refused".to_string())
}

pub fn unauthorized() -> RemoteError {
    RemoteError::Api {
        status: 401,
        message: "Unauthorized".to_string(),
    }
}
