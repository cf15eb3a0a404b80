//! # Transfer Coordinator
//!
//! Drives the transfer screen. A submission runs as one sequential task:
//!
//! ```text
//! Idle → Validating → Submitting ─┬─ success → RefreshingBalance → Idle
//!                                 └─ failure ─────────────────────→ Idle
//! ```
//!
//! Published fields:
//!
//! ```text
//! TransferCoordinator
//! ├── phase: TransferPhase
//! ├── is_button_enabled: bool               // both fields filled in
//! ├── is_loading: bool                      // transfer call in flight
//! ├── transfer_result: Option<TransferOutcome>
//! ├── updated_balance: Option<String>       // formatted, or the error sentinel
//! └── failure: Option<FailureReason>
//! ```

use std::sync::Arc;

use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::core::balance::lookup_account;
use crate::core::failure::{FailureReason, Rejection, ValidationError};
use crate::core::model::{TransferOutcome, TransferRequest, format_amount, parse_amount};
use crate::core::published::Published;
use crate::remote::RemoteBankingClient;

/// Shown in place of the balance when the post-transfer refresh fails.
/// The transfer itself has already committed at that point.
pub const BALANCE_ERROR_SENTINEL: &str = "Error fetching updated balance.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPhase {
    Idle,
    Validating,
    Submitting,
    RefreshingBalance,
}

pub struct TransferCoordinator {
    client: Arc<dyn RemoteBankingClient>,
    // Up for the whole of a submission, transfer and refresh included.
    submitting: Published<bool>,
    phase: Published<TransferPhase>,
    is_button_enabled: Published<bool>,
    is_loading: Published<bool>,
    transfer_result: Published<Option<TransferOutcome>>,
    updated_balance: Published<Option<String>>,
    failure: Published<Option<FailureReason>>,
}

impl TransferCoordinator {
    pub fn new(client: Arc<dyn RemoteBankingClient>) -> Self {
        Self {
            client,
            submitting: Published::new(false),
            phase: Published::new(TransferPhase::Idle),
            is_button_enabled: Published::new(false),
            is_loading: Published::new(false),
            transfer_result: Published::new(None),
            updated_balance: Published::new(None),
            failure: Published::new(None),
        }
    }

    pub fn phase(&self) -> &Published<TransferPhase> {
        &self.phase
    }

    pub fn is_button_enabled(&self) -> &Published<bool> {
        &self.is_button_enabled
    }

    pub fn is_loading(&self) -> &Published<bool> {
        &self.is_loading
    }

    pub fn transfer_result(&self) -> &Published<Option<TransferOutcome>> {
        &self.transfer_result
    }

    pub fn updated_balance(&self) -> &Published<Option<String>> {
        &self.updated_balance
    }

    pub fn failure(&self) -> &Published<Option<FailureReason>> {
        &self.failure
    }

    /// Enables the button when both fields are non-empty. The amount is not
    /// parsed here, so `"abc"` enables the button too; `submit` rejects it.
    pub fn validate_fields(&self, recipient: &str, amount_text: &str) {
        self.is_button_enabled
            .set(!recipient.is_empty() && !amount_text.is_empty());
    }

    /// The button handler: validates raw input, transfers, and on success
    /// refreshes the sender's balance. Returns the text to hand back to the
    /// home screen, or `None` if the transfer did not go through.
    ///
    /// Validation failures are published and never reach the remote client.
    /// Ignored until the previous submission, refresh included, is done.
    pub async fn submit(
        &self,
        sender_id: &str,
        recipient_text: &str,
        amount_text: &str,
    ) -> Option<String> {
        if self.is_loading.get() {
            debug!("Transfer from {sender_id} ignored: already submitting");
            return None;
        }
        let Some(_submitting) = self.submitting.hold("submission") else {
            debug!("Transfer from {sender_id} ignored: previous submission still running");
            return None;
        };

        self.phase.set(TransferPhase::Validating);
        let request = match check_submission(sender_id, recipient_text, amount_text) {
            Ok(request) => request,
            Err(e) => {
                warn!("Transfer from {sender_id} refused before sending: {e}");
                self.transfer_result.set(None);
                self.updated_balance.set(None);
                self.failure.set(Some(e.into()));
                self.phase.set(TransferPhase::Idle);
                return None;
            }
        };

        self.transfer(request.sender_id(), request.recipient_id(), request.amount())
            .await;

        if self.transfer_result.get() != Some(TransferOutcome::Success) {
            return None;
        }
        self.fetch_updated_balance(sender_id).await;
        self.updated_balance.get()
    }

    /// Sends the transfer. Expects input already checked by the caller
    /// (`submit` does this). Ignored while a transfer is in flight.
    pub async fn transfer(&self, sender_id: &str, recipient_id: &str, amount: Decimal) {
        let Some(_loading) = self.is_loading.hold("transfer") else {
            debug!("Transfer from {sender_id} ignored: already submitting");
            return;
        };

        self.phase.set(TransferPhase::Submitting);
        self.transfer_result.set(None);
        self.updated_balance.set(None);

        let request = match TransferRequest::new(sender_id, recipient_id, amount) {
            Ok(request) => request,
            Err(e) => {
                warn!("Transfer from {sender_id} refused before sending: {e}");
                self.failure.set(Some(e.into()));
                self.transfer_result.set(Some(TransferOutcome::Failure));
                self.phase.set(TransferPhase::Idle);
                return;
            }
        };

        info!(
            "Transfer of {} from {} to {} via {}",
            format_amount(amount),
            sender_id,
            recipient_id,
            self.client.name()
        );

        let outcome = match self.client.transfer(&request).await {
            Ok(true) => {
                info!("Transfer from {sender_id} committed");
                self.failure.set(None);
                TransferOutcome::Success
            }
            Ok(false) => {
                warn!("Transfer from {sender_id} refused by service");
                self.failure.set(Some(Rejection::Transfer.into()));
                TransferOutcome::Failure
            }
            Err(e) => {
                warn!("Transfer from {sender_id} failed: {e}");
                self.failure.set(Some(e.into()));
                TransferOutcome::Failure
            }
        };

        self.transfer_result.set(Some(outcome));
        if outcome == TransferOutcome::Failure {
            self.phase.set(TransferPhase::Idle);
        }
    }

    /// Looks up the sender's balance after a committed transfer and
    /// publishes it as plain decimal text. Any failure publishes
    /// [`BALANCE_ERROR_SENTINEL`] so the screen always has something to show.
    pub async fn fetch_updated_balance(&self, owner_id: &str) {
        self.phase.set(TransferPhase::RefreshingBalance);

        let text = match lookup_account(self.client.as_ref(), owner_id).await {
            Ok(account) => format_amount(account.balance),
            Err(reason) => {
                warn!("Balance refresh for {owner_id} failed: {reason}");
                BALANCE_ERROR_SENTINEL.to_string()
            }
        };
        info!("Updated balance for {owner_id}: {text}");
        self.updated_balance.set(Some(text));
        self.phase.set(TransferPhase::Idle);
    }
}

/// Checks the raw form input the way the submit button does: trimmed
/// fields must be present, the amount must parse above zero and the sender
/// must be known.
fn check_submission(
    sender_id: &str,
    recipient_text: &str,
    amount_text: &str,
) -> Result<TransferRequest, ValidationError> {
    let recipient = recipient_text.trim();
    let amount_text = amount_text.trim();
    if recipient.is_empty() || amount_text.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    let amount = parse_amount(amount_text)?;
    TransferRequest::new(sender_id, recipient, amount)
}
