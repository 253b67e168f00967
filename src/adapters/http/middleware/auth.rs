//! Caller identification for axum.
//!
//! Authentication is handled upstream; requests reach us with the user's id
//! in the `x-user-id` header. This module provides:
//! - `RequireUser` - Extractor that rejects requests without a usable id
//!
//! # Example
//!
//! ```ignore
//! async fn my_handler(RequireUser(user_id): RequireUser) -> impl IntoResponse {
//!     format!("Hello, {}!", user_id)
//! }
//! ```

use axum::{
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::UserId;

use super::super::error::ErrorResponse;

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

fn user_from_parts(parts: &Parts) -> Option<UserId> {
    parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|raw| UserId::new(raw).ok())
}

/// Extractor that requires a caller id.
///
/// Missing, blank or non-ASCII header values all reject with 401.
#[derive(Debug, Clone)]
pub struct RequireUser(pub UserId);

impl<S> axum::extract::FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            user_from_parts(parts)
                .map(RequireUser)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for identification failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No usable user id was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthRejection::Unauthenticated => (StatusCode::UNAUTHORIZED, "Unauthorized"),
        };

        (status, Json(ErrorResponse::new("UNAUTHENTICATED", message))).into_response()
    }
}
