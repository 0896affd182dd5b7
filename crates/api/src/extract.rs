//! Request extractors that report rejections as JSON errors.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use drafttrack_core::types::DbId;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// Drop-in for [`axum::Json`] whose rejection is an [`AppError`], so malformed
/// bodies get the same `{ "error", "code" }` shape as every other failure.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

fn rejection_to_error(rejection: &JsonRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

/// Parse a row ID path segment.
pub fn parse_id(raw: &str) -> AppResult<DbId> {
    raw.parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid id '{raw}'")))
}
