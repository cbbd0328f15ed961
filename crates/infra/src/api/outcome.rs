//! Helpers shared by the domain wrappers
//!
//! Path building, query strings, multipart attachments and the fold from a
//! request outcome into an [`ApiResult`].

use std::borrow::Cow;

use chainverdict_domain::{ApiResponse, ApiResult, QueryParams};
use reqwest::multipart::Part;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use urlencoding::encode;

use super::errors::ApiError;

/// Fold one request outcome into the uniform result envelope
///
/// Any 2xx reply is a success. A payload that does not fit `T` is kept raw
/// and logged, never turned into a failure.
pub(crate) fn fold<T: DeserializeOwned>(outcome: Result<Value, ApiError>) -> ApiResult<T> {
    match outcome {
        Ok(body) => {
            let result: ApiResult<T> = ApiResponse::from_body(body).into();
            if let Some(reason) = result.decode_error() {
                warn!(
                    expected = std::any::type_name::<T>(),
                    error = reason,
                    "Response data did not match the expected shape, keeping it raw"
                );
            }
            result
        }
        Err(err) => {
            debug!(category = ?err.category(), error = %err, "Request folded into failure");
            ApiResult::failure(err.to_string())
        }
    }
}

/// Percent-encode a caller supplied identifier for use as one path segment
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    encode(id)
}

/// Append `params` to `path` as a query string, skipping it when empty
pub(crate) fn with_query(path: &str, params: &impl QueryParams) -> String {
    let pairs = params.query_pairs();
    if pairs.is_empty() {
        return path.to_string();
    }

    let query = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}

/// A file to send as one part of a multipart upload
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// MIME type such as `application/pdf`; reqwest guesses nothing when unset
    pub mime: Option<String>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { file_name: file_name.into(), bytes: bytes.into(), mime: None }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub(crate) fn into_part(self) -> Result<Part, ApiError> {
        let part = Part::bytes(self.bytes).file_name(self.file_name);
        match self.mime {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| ApiError::InvalidRequest(format!("Invalid MIME type '{mime}': {e}"))),
            None => Ok(part),
        }
    }
}
