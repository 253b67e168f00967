//! HTTP middleware and extractors for axum.
//!
//! - `auth` - Caller identification from the `x-user-id` header

pub mod auth;

pub use auth::{AuthRejection, RequireUser, USER_ID_HEADER};
