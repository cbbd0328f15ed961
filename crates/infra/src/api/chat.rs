//! Chat threads, messages and call records
//!
//! Calls are bookkeeping only: the backend records start and end, the media
//! stream is negotiated elsewhere.

use std::sync::Arc;

use chainverdict_domain::{ApiResult, CallKind, CallSession, Chat, ChatMessage};
use reqwest::multipart::Form;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::instrument;

use super::client::{RequestClient, RequestOptions};
use super::outcome::{fold, segment, FileUpload};

pub struct ChatApi {
    client: Arc<RequestClient>,
}

impl ChatApi {
    pub fn new(client: Arc<RequestClient>) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn chats(&self) -> ApiResult<Vec<Chat>> {
        fold(self.client.get("/chat").await)
    }

    /// Open (or reuse) the thread with another user
    #[instrument(skip(self))]
    pub async fn open_chat(&self, participant_id: &str) -> ApiResult<Chat> {
        fold(self.client.post("/chat", &json!({ "participantId": participant_id })).await)
    }

    #[instrument(skip(self))]
    pub async fn messages(&self, chat_id: &str) -> ApiResult<Vec<ChatMessage>> {
        let path = format!("/chat/{}/messages", segment(chat_id));
        fold(self.client.get(&path).await)
    }

    #[instrument(skip(self, content))]
    pub async fn send_message(&self, chat_id: &str, content: &str) -> ApiResult<ChatMessage> {
        let path = format!("/chat/{}/messages", segment(chat_id));
        fold(self.client.post(&path, &json!({ "content": content })).await)
    }

    #[instrument(skip(self))]
    pub async fn mark_read(&self, chat_id: &str) -> ApiResult<Value> {
        let path = format!("/chat/{}/read", segment(chat_id));
        fold(self.client.patch(&path, &()).await)
    }

    #[instrument(skip(self, upload), fields(file = %upload.file_name))]
    pub async fn send_attachment(&self, chat_id: &str, upload: FileUpload) -> ApiResult<ChatMessage> {
        let part = match upload.into_part() {
            Ok(part) => part,
            Err(err) => return ApiResult::failure(err.to_string()),
        };

        let path = format!("/chat/{}/attachments", segment(chat_id));
        let form = Form::new().part("file", part);
        fold(self.client.upload_file(&path, form, RequestOptions::new(Method::POST)).await)
    }

    #[instrument(skip(self))]
    pub async fn start_call(&self, chat_id: &str, kind: CallKind) -> ApiResult<CallSession> {
        let path = format!("/chat/{}/calls", segment(chat_id));
        fold(self.client.post(&path, &json!({ "kind": kind })).await)
    }

    #[instrument(skip(self))]
    pub async fn end_call(&self, call_id: &str) -> ApiResult<CallSession> {
        let path = format!("/chat/calls/{}/end", segment(call_id));
        fold(self.client.patch(&path, &()).await)
    }

    #[instrument(skip(self))]
    pub async fn call_history(&self, chat_id: &str) -> ApiResult<Vec<CallSession>> {
        let path = format!("/chat/{}/calls", segment(chat_id));
        fold(self.client.get(&path).await)
    }
}
