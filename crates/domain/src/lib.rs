//! # ChainVerdict Domain
//!
//! Business domain types and models for the ChainVerdict client.
//!
//! This crate contains:
//! - The client-side result envelope and the backend wire envelope
//! - Domain data types (users, lawyers, cases, queries, disputes, chats)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants (storage keys, default endpoints)
//!
//! ## Architecture
//! - No dependencies on other ChainVerdict crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
