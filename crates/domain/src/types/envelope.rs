//! Response envelopes
//!
//! [`ApiResponse`] is what the backend sends on a 2xx reply. [`ApiResult`]
//! is what every domain wrapper hands back to its caller: the outcome of one
//! call folded into a single value that never needs a `match` on an error
//! type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::EMPTY_SUCCESS_MESSAGE;

/// Success body produced by the backend: `{ message?, data? }`
///
/// Unknown fields are ignored; both fields are optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Default for ApiResponse<T> {
    fn default() -> Self {
        Self { message: None, data: None }
    }
}

impl ApiResponse {
    /// Read the envelope out of any parsed 2xx body without rejecting it
    ///
    /// `null` (an empty body) has neither field. An object contributes its
    /// `data` and a string `message`. Any other JSON value is the data itself.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Null => Self::default(),
            Value::Object(mut fields) => Self {
                message: fields.remove("message").and_then(|m| match m {
                    Value::String(text) => Some(text),
                    _ => None,
                }),
                data: fields.remove("data").filter(|d| !d.is_null()),
            },
            other => Self { message: None, data: Some(other) },
        }
    }
}

/// Uniform result of a domain wrapper call
///
/// Invariants:
/// - a successful result never carries an error, and always carries data or
///   a message (an empty reply gets [`EMPTY_SUCCESS_MESSAGE`])
/// - a failed result always carries an error and never carries data
///
/// The server's `data` is kept verbatim next to the typed view. When it does
/// not fit `T` the call still succeeded: [`ApiResult::data`] is `None`,
/// [`ApiResult::raw_data`] holds the payload and
/// [`ApiResult::decode_error`] says why. Serializing a result emits the raw
/// payload as `data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResult<T> {
    success: bool,
    #[serde(skip)]
    data: Option<T>,
    #[serde(rename = "data", skip_serializing_if = "Option::is_none")]
    raw: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip)]
    decode_error: Option<String>,
}

impl<T> ApiResult<T> {
    /// Successful outcome built from a typed payload
    pub fn success(data: Option<T>, message: Option<String>) -> Self
    where
        T: Serialize,
    {
        let raw = data
            .as_ref()
            .and_then(|d| serde_json::to_value(d).ok())
            .filter(|v| !v.is_null());
        Self::succeeded(data, raw, message, None)
    }

    /// Successful outcome built from the payload the server sent
    pub fn decoded(raw: Option<Value>, message: Option<String>) -> Self
    where
        T: DeserializeOwned,
    {
        let (data, decode_error) = match raw.clone().map(serde_json::from_value::<T>) {
            Some(Ok(data)) => (Some(data), None),
            Some(Err(err)) => (None, Some(err.to_string())),
            None => (None, None),
        };
        Self::succeeded(data, raw, message, decode_error)
    }

    /// Failed outcome carrying a human readable error
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            raw: None,
            message: None,
            error: Some(error.into()),
            decode_error: None,
        }
    }

    fn succeeded(
        data: Option<T>,
        raw: Option<Value>,
        message: Option<String>,
        decode_error: Option<String>,
    ) -> Self {
        let message = match message {
            None if raw.is_none() => Some(EMPTY_SUCCESS_MESSAGE.to_string()),
            message => message,
        };
        Self { success: true, data, raw, message, error: None, decode_error }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Typed payload; `None` when absent or when it did not fit `T`
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Payload exactly as the server sent it
    pub fn raw_data(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Why the payload could not be read as `T`, if it could not
    pub fn decode_error(&self) -> Option<&str> {
        self.decode_error.as_deref()
    }

    /// Consume the envelope, keeping only the payload
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Convert into a `Result`, surfacing the error text on failure
    ///
    /// # Errors
    ///
    /// Returns the error message when the call failed.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.error.unwrap_or_default())
        }
    }

    /// Transform the typed payload while keeping the outcome and raw payload
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        ApiResult {
            success: self.success,
            data: self.data.map(f),
            raw: self.raw,
            message: self.message,
            error: self.error,
            decode_error: self.decode_error,
        }
    }
}

impl<T: DeserializeOwned> From<ApiResponse> for ApiResult<T> {
    fn from(response: ApiResponse) -> Self {
        Self::decoded(response.data, response.message)
    }
}

/// Paginated list payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}
