//! ChainVerdict backend API
//!
//! [`RequestClient`] performs the HTTP calls; the domain wrappers
//! ([`AuthApi`], [`AdminApi`], [`CitizenApi`], [`LawyerApi`], [`ChatApi`])
//! map one operation each onto one call and fold the outcome into an
//! [`chainverdict_domain::ApiResult`].

pub mod admin;
pub mod auth;
pub mod chat;
pub mod citizen;
pub mod client;
pub mod errors;
pub mod lawyer;
pub mod outcome;
pub mod services;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use chat::ChatApi;
pub use citizen::CitizenApi;
pub use client::{RequestClient, RequestClientBuilder, RequestOptions};
pub use errors::{ApiError, ApiErrorCategory};
pub use lawyer::LawyerApi;
pub use outcome::FileUpload;
pub use services::ApiServices;
