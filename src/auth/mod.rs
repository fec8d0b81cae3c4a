//! Authentication module for managing sessions and credentials.
//!
//! This module provides:
//! - `AuthSession`: the single owner of in-memory credential state,
//!   with login/logout/refresh operations
//! - `TokenStore`: durable mirroring of the token pair and profile
//! - `CredentialStore`: optional remembered password via the OS keychain
//! - `SessionWatchdog`: the timed re-confirmation state machine
//!
//! Credentials are restored at startup only when the complete set is
//! present in storage; partial state is discarded.

pub mod credentials;
pub mod session;
pub mod token_store;
pub mod watchdog;

pub use credentials::CredentialStore;
pub use session::{AuthSession, Credentials};
pub use token_store::TokenStore;
pub use watchdog::{SessionWatchdog, WatchdogEvent, WatchdogPhase};
