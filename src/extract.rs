//! Extractors whose rejections render as the error envelope.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Form;

use crate::forms::FormData;
use crate::utils::error::AppError;

/// A numeric record id from the path. Anything else is an unknown page.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound(format!("No page at '{path}'")))?;
        Ok(Self(id))
    }
}

/// An urlencoded form body.
#[derive(Debug, Clone)]
pub struct Submitted(pub FormData);

#[async_trait]
impl<S> FromRequest<S> for Submitted
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::ValidationError(rejection.body_text()))?;
        Ok(Self(FormData::from(pairs)))
    }
}
