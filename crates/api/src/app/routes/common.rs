//! Small helpers shared by route handlers.

use core::str::FromStr;

use axum::http::StatusCode;

use crate::app::errors;

/// Parse a path/body id into its newtype, mapping failure to a 400 response.
pub fn parse_id<T>(raw: &str, message: &'static str) -> Result<T, axum::response::Response>
where
    T: FromStr,
{
    raw.parse::<T>()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", message))
}
