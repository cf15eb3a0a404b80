//! # Account Balance Fetcher
//!
//! Loads the user's account for the home screen. The same lookup is reused
//! by the transfer coordinator after a committed transfer.

use std::sync::Arc;

use log::{info, warn};

use crate::core::failure::{FailureReason, Rejection};
use crate::core::model::Account;
use crate::core::published::Published;
use crate::remote::RemoteBankingClient;

/// Fetches the accounts of `owner_id` and picks the one to show.
///
/// Always takes the first account returned. The service is expected to list
/// at most one primary account per owner, and `is_primary` is not consulted.
pub(crate) async fn lookup_account(
    client: &dyn RemoteBankingClient,
    owner_id: &str,
) -> Result<Account, FailureReason> {
    info!("Fetching accounts for {} via {}", owner_id, client.name());
    let accounts = client.get_account(owner_id).await?;
    accounts
        .into_iter()
        .next()
        .ok_or(FailureReason::Rejected(Rejection::NoAccount))
}

pub struct AccountBalanceFetcher {
    client: Arc<dyn RemoteBankingClient>,
    is_busy: Published<bool>,
    account: Published<Option<Account>>,
    failure: Published<Option<FailureReason>>,
}

impl AccountBalanceFetcher {
    pub fn new(client: Arc<dyn RemoteBankingClient>) -> Self {
        Self {
            client,
            is_busy: Published::new(false),
            account: Published::new(None),
            failure: Published::new(None),
        }
    }

    pub fn is_busy(&self) -> &Published<bool> {
        &self.is_busy
    }

    /// Last account fetched. Absent means the balance is unknown, which is
    /// not the same as a zero balance.
    pub fn account(&self) -> &Published<Option<Account>> {
        &self.account
    }

    pub fn failure(&self) -> &Published<Option<FailureReason>> {
        &self.failure
    }

    /// Current balance with the currency suffix, if known.
    pub fn balance_text(&self) -> Option<String> {
        self.account.get().map(|account| account.balance_text())
    }

    /// Refreshes the account for `owner_id`. On failure the previously
    /// known account stays as it was and `failure` says why.
    pub async fn fetch(&self, owner_id: &str) {
        let Some(_busy) = self.is_busy.hold("balance") else {
            info!("Balance fetch for {owner_id} ignored: already fetching");
            return;
        };

        match lookup_account(self.client.as_ref(), owner_id).await {
            Ok(account) => {
                info!("Amount fetched for {}: {}", owner_id, account.balance_text());
                self.failure.set(None);
                self.account.set(Some(account));
            }
            Err(reason) => {
                warn!("Balance fetch for {owner_id} failed: {reason}");
                self.failure.set(Some(reason));
            }
        }
    }
}
