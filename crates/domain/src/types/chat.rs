//! Chat threads, messages and call bookkeeping
//!
//! Media and signalling happen elsewhere; the API only records that a call
//! was started or ended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserRole;
use crate::impl_status_conversions;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatParticipant {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatMessage {
    #[serde(alias = "_id")]
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub content: String,
    pub attachment_url: Option<String>,
    pub read: bool,
    pub sent_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Chat {
    #[serde(alias = "_id")]
    pub id: String,
    pub participants: Vec<ChatParticipant>,
    pub last_message: Option<ChatMessage>,
    pub unread_count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    #[default]
    Audio,
    Video,
    #[serde(other)]
    Unknown,
}

impl_status_conversions!(CallKind {
    Audio => "audio",
    Video => "video",
    Unknown => "unknown",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    #[default]
    Ringing,
    Active,
    Ended,
    Missed,
    #[serde(other)]
    Unknown,
}

impl_status_conversions!(CallStatus {
    Ringing => "ringing",
    Active => "active",
    Ended => "ended",
    Missed => "missed",
    Unknown => "unknown",
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallSession {
    #[serde(alias = "_id")]
    pub id: String,
    pub chat_id: String,
    pub kind: CallKind,
    pub status: CallStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}
