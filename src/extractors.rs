use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// A JSON request body with an operation-specific "no data" message.
pub trait RequestBody: DeserializeOwned + Send {
    const MISSING: &'static str;
}

/// Typed JSON body. An empty body, `null` or `{}` is rejected with
/// `T::MISSING`; a missing required field or bad JSON is a 400.
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: RequestBody,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Rejected {
                status: e.status(),
                message: e.body_text(),
            })?;
        parse(&bytes).map(Payload)
    }
}

/// `axum::extract::Path` whose rejection is rendered as the error envelope.
pub struct Path<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Path<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Path(value) = axum::extract::Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Rejected {
                status: e.status(),
                message: e.body_text(),
            })?;
        Ok(Path(value))
    }
}

fn parse<T: RequestBody>(bytes: &[u8]) -> Result<T, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::MissingPayload(T::MISSING));
    }
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    match &value {
        Value::Null => return Err(ApiError::MissingPayload(T::MISSING)),
        Value::Object(map) if map.is_empty() => return Err(ApiError::MissingPayload(T::MISSING)),
        _ => {}
    }
    serde_json::from_value(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}
