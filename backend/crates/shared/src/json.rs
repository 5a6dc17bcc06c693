//! JSON request bodies
//!
//! Handlers take the raw body and decode it here so each endpoint can choose
//! its own rejection text (`"bad json"`, `"invalid JSON payload"`).

use serde::de::DeserializeOwned;

use crate::error::app_error::{AppError, AppResult, BodyKey};

/// Decodes `body`, answering 400 `{"error": rejection}` on failure.
///
/// ```rust
/// use kernel::json::decode;
///
/// #[derive(serde::Deserialize)]
/// struct Comment { comment: String }
///
/// let ok: Comment = decode(br#"{"comment":"hi"}"#, "invalid JSON payload").unwrap();
/// assert_eq!(ok.comment, "hi");
/// assert!(decode::<Comment>(b"{", "invalid JSON payload").is_err());
/// ```
pub fn decode<T: DeserializeOwned>(body: &[u8], rejection: &'static str) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        AppError::bad_request(rejection)
            .with_body_key(BodyKey::Error)
            .with_source(e)
    })
}

/// Requires `Content-Type: application/json` (parameters such as `charset`
/// are allowed).
#[cfg(feature = "axum")]
pub fn require_json_content_type(headers: &http::HeaderMap) -> AppResult<()> {
    let is_json = headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"));

    if is_json {
        Ok(())
    } else {
        Err(AppError::bad_request("invalid Content-Type").with_body_key(BodyKey::Error))
    }
}
