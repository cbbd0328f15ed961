//! Session lifecycle: token persistence and expiry handling

pub mod ports;
pub mod service;

pub use service::SessionManager;
