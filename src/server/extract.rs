//! Extractors that reject with [`ApiError`] instead of axum's plain-text
//! rejections.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use super::error::ApiError;

/// Route parameters; a value of the wrong type is a 422.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct IdPath<T>(pub T);

/// JSON request body, decoded whatever the `Content-Type` says.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|err| match err.classify() {
                Category::Data => ApiError::BadRequest(format!("Wrong data format: {err}")),
                _ => ApiError::BadRequest("Can not deserialize json.".to_owned()),
            })
    }
}
