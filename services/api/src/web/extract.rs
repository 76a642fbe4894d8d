//! services/api/src/web/extract.rs
//!
//! `Json` and `Query` extractors whose rejections answer with the API's error
//! envelope instead of axum's plain-text bodies.

use axum::extract::{FromRequest, FromRequestParts};
use serde::{de, Deserialize, Deserializer};
use std::{fmt::Display, str::FromStr};

use crate::error::ApiError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Deserializes a query value that may be present but empty, as in
/// `?user_id=`, treating the empty string as an absent value.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}
