//! # Core Application Logic
//!
//! The controllers behind Aura's three screens.
//! They know nothing about any specific UI technology or transport.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • SessionAuthenticator │
//!                    │  • AccountBalanceFetcher│
//!                    │  • TransferCoordinator  │
//!                    │                         │
//!                    │  State out via          │
//!                    │  Published<T> cells     │
//!                    └─────┬─────────────┬─────┘
//!                          │             │
//!                observes  │             │ calls
//!                          ▼             ▼
//!                   ┌────────────┐  ┌─────────────────────┐
//!                   │   Shell    │  │ RemoteBankingClient │
//!                   │  (CLI)     │  │ (HTTP, test double) │
//!                   └────────────┘  └─────────────────────┘
//! ```
//!
//! Controllers never call each other. The shell sequences them.
//!
//! ## Modules
//!
//! - [`login`]: `SessionAuthenticator`, the login screen
//! - [`balance`]: `AccountBalanceFetcher`, the home screen's balance
//! - [`transfer`]: `TransferCoordinator`, the transfer screen
//! - [`published`]: `Published<T>`, the observable state cell
//! - [`failure`]: validation / rejection / unavailability taxonomy
//! - [`model`]: domain values and amount formatting
//! - [`config`]: layered settings

pub mod balance;
pub mod config;
pub mod failure;
pub mod login;
pub mod model;
pub mod published;
pub mod transfer;

// Re-export commonly used types for convenience
pub use balance::AccountBalanceFetcher;
pub use failure::{FailureReason, Rejection, ValidationError};
pub use login::SessionAuthenticator;
pub use model::{Account, Credentials, Identity, TransferOutcome, TransferRequest};
pub use published::Published;
pub use transfer::{BALANCE_ERROR_SENTINEL, TransferCoordinator, TransferPhase};
