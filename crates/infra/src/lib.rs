//! # ChainVerdict Infrastructure
//!
//! Infrastructure implementations of the core ports and the HTTP-facing
//! half of the client.
//!
//! This crate contains:
//! - The request client and the domain API wrappers
//! - Session stores (memory, JSON file, platform keychain) and navigators
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements traits defined in `chainverdict-core`
//! - Depends on `chainverdict-domain` and `chainverdict-core`
//! - Contains all "impure" code (network, disk, keychain)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod session;

// Re-export commonly used items
pub use api::{
    AdminApi, ApiError, ApiErrorCategory, ApiServices, AuthApi, ChatApi, CitizenApi, FileUpload,
    LawyerApi, RequestClient, RequestClientBuilder, RequestOptions,
};
pub use errors::InfraError;
pub use session::{
    open_store, ChannelNavigator, FileSessionStore, KeychainSessionStore, MemorySessionStore,
    NavigationEvent, TracingNavigator,
};
