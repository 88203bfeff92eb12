//! # rf-core
//!
//! Core domain types for redflag.
//!
//! This crate provides the types shared across all redflag crates:
//! - `SessionStatus` with its state machine transitions
//! - `WalletSession`, the authenticated-wallet snapshot consumed by the CLI
//! - Flagged-entity records served by the directory

pub mod directory;
pub mod enums;
pub mod session;

pub use enums::SessionStatus;
pub use session::WalletSession;
