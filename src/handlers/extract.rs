use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::models::ApiResponse;

/// JSON body that falls back to `T::default()` only when the body is empty.
///
/// A non-empty body that does not deserialize into `T` is rejected with 400
/// before the handler runs.
pub struct JsonOrDefault<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrDefault<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes).map(Self).map_err(|e| {
            tracing::warn!(error = %e, "rejected malformed request body");
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::err(format!("Invalid JSON body: {}", e))),
            )
                .into_response()
        })
    }
}
