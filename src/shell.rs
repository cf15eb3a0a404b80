//! # Hosting Shell
//!
//! Plays the part of the screens: feeds input into a controller, watches its
//! published state and decides what comes next. One CLI command is one
//! screen visit, so each controller lives only as long as the command.
//!
//! ```text
//! login    → SessionAuthenticator ─identity─→ AccountBalanceFetcher
//! balance  → AccountBalanceFetcher
//! transfer → TransferCoordinator (transfer → refresh)
//! ```

use std::io::{self, Write};
use std::sync::Arc;

use clap::Subcommand;
use log::{debug, info};

use crate::core::{
    AccountBalanceFetcher, FailureReason, Identity, SessionAuthenticator, TransferCoordinator,
    ValidationError,
};
use crate::remote::RemoteBankingClient;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in, then show the account balance
    Login { identifier: String, password: String },
    /// Show the balance of a user's account
    Balance { identifier: String },
    /// Send money from one user to another
    Transfer {
        sender: String,
        recipient: String,
        amount: String,
    },
}

impl Command {
    /// Name for logs. Never includes arguments, so passwords stay out.
    fn label(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Balance { .. } => "balance",
            Command::Transfer { .. } => "transfer",
        }
    }
}

/// Runs one command against `client`, writing user-facing lines to `out`.
/// Returns whether the command succeeded.
pub async fn run<W: Write>(
    command: Command,
    client: Arc<dyn RemoteBankingClient>,
    out: &mut W,
) -> io::Result<bool> {
    info!("Running {} against {}", command.label(), client.name());
    match command {
        Command::Login {
            identifier,
            password,
        } => match login_screen(client.clone(), &identifier, &password, out).await? {
            Some(identity) => home_screen(client, &identity, out).await,
            None => Ok(false),
        },
        Command::Balance { identifier } => {
            home_screen(client, &Identity::new(identifier), out).await
        }
        Command::Transfer {
            sender,
            recipient,
            amount,
        } => transfer_screen(client, &sender, &recipient, &amount, out).await,
    }
}

async fn login_screen<W: Write>(
    client: Arc<dyn RemoteBankingClient>,
    identifier: &str,
    password: &str,
    out: &mut W,
) -> io::Result<Option<Identity>> {
    let auth = SessionAuthenticator::new(client);

    auth.validate_input(identifier, password);
    if !auth.is_input_valid().get() {
        notify(out, &ValidationError::MissingCredentials.into())?;
        return Ok(None);
    }

    let mut identity_rx = auth.authenticated_identity().subscribe();
    auth.login(identifier, password).await;

    // Navigation happens on the absent → present edge.
    if identity_rx.has_changed().unwrap_or(false) {
        if let Some(identity) = identity_rx.borrow_and_update().clone() {
            debug!("Navigating to home screen as {identity}");
            writeln!(out, "Logged in as {identity}")?;
            return Ok(Some(identity));
        }
    }

    if let Some(reason) = auth.failure().get() {
        notify(out, &reason)?;
    }
    Ok(None)
}

async fn home_screen<W: Write>(
    client: Arc<dyn RemoteBankingClient>,
    identity: &Identity,
    out: &mut W,
) -> io::Result<bool> {
    let fetcher = AccountBalanceFetcher::new(client);
    fetcher.fetch(&identity.identifier).await;

    if let Some(reason) = fetcher.failure().get() {
        notify(out, &reason)?;
        return Ok(false);
    }
    match fetcher.balance_text() {
        Some(balance) => {
            writeln!(out, "Amount fetched: {balance}")?;
            Ok(true)
        }
        None => Ok(false),
    }
}

async fn transfer_screen<W: Write>(
    client: Arc<dyn RemoteBankingClient>,
    sender: &str,
    recipient: &str,
    amount: &str,
    out: &mut W,
) -> io::Result<bool> {
    let coordinator = TransferCoordinator::new(client);

    coordinator.validate_fields(recipient, amount);
    if !coordinator.is_button_enabled().get() {
        notify(out, &ValidationError::MissingFields.into())?;
        return Ok(false);
    }

    match coordinator.submit(sender, recipient, amount).await {
        Some(balance) => {
            writeln!(out, "Transfer successful")?;
            writeln!(out, "Updated balance: {balance}")?;
            Ok(true)
        }
        None => {
            if let Some(reason) = coordinator.failure().get() {
                notify(out, &reason)?;
            }
            Ok(false)
        }
    }
}

fn notify<W: Write>(out: &mut W, reason: &FailureReason) -> io::Result<()> {
    writeln!(out, "{}", reason.notice())
}
