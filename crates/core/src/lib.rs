//! # ChainVerdict Core
//!
//! Client-side business rules with no I/O of their own.
//!
//! This crate contains:
//! - Port interfaces (traits) for session storage and navigation
//! - The session service that owns the token lifecycle
//!
//! ## Architecture Principles
//! - Only depends on `chainverdict-domain`
//! - No HTTP, filesystem or keychain code
//! - All external dependencies via traits

pub mod session;

pub use session::ports::{Navigator, SessionStore};
pub use session::SessionManager;
