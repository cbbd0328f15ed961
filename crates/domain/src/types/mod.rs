//! Domain types and models
//!
//! Request and response payloads exchanged with the ChainVerdict backend.
//! Everything serializes in camelCase to match the JSON API, and response
//! types tolerate missing optional fields.

pub mod admin;
pub mod case;
pub mod chat;
pub mod envelope;
pub mod lawyer;
pub mod user;

pub use admin::{PlatformStats, UserListQuery, VerificationDecision};
pub use case::{
    CaseStatus, CaseSubmission, Dispute, DisputeResolution, DisputeStatus, DisputeSubmission,
    LegalCase, LegalQuery, QueryAnswer, QueryStatus, QuerySubmission,
};
pub use chat::{CallKind, CallSession, CallStatus, Chat, ChatMessage, ChatParticipant};
pub use envelope::{ApiResponse, ApiResult, Page};
pub use lawyer::{
    ConnectionRequest, ConnectionStatus, LawyerProfile, LawyerSearchQuery, Review,
    VerificationStatus,
};
pub use user::{
    AuthPayload, LoginRequest, PasswordChange, PasswordReset, ProfileUpdate, RegisterRequest,
    UserProfile, UserRole,
};

/// Types that can be rendered as URL query parameters.
///
/// Pairs are returned unencoded; the HTTP layer is responsible for
/// percent-encoding them. Unset filters are simply left out.
pub trait QueryParams {
    /// Key/value pairs in a stable order
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}
