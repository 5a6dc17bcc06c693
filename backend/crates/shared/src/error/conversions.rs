//! Error conversions - renders [`AppError`] as an HTTP response.

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match self.body_key().field() {
            Some(field) => {
                let mut body = serde_json::Map::with_capacity(1);
                body.insert(
                    field.to_owned(),
                    serde_json::Value::String(self.message().to_owned()),
                );
                (status, Json(serde_json::Value::Object(body))).into_response()
            }
            None => (status, self.message().to_owned()).into_response(),
        }
    }
}
