//! Shared query parameter types for API handlers.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use discuss_core::discussion::LEVEL_PARAM;

use crate::error::AppError;
use crate::state::AppState;

/// Query parameters for comment tree endpoints (`?level=`).
///
/// `level` is kept as raw text so that non-integer input can be reported
/// as a field error, and is parsed by
/// [`discuss_core::discussion::parse_level_filter`]. A repeated parameter
/// takes its last value; unknown parameters are ignored.
#[derive(Debug, Default)]
pub struct TreeParams {
    pub level: Option<String>,
}

impl TreeParams {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let level = pairs
            .into_iter()
            .filter(|(key, _)| key == LEVEL_PARAM)
            .map(|(_, value)| value)
            .last();
        TreeParams { level }
    }
}

impl FromRequestParts<AppState> for TreeParams {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(pairs) =
            Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        Ok(TreeParams::from_pairs(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn absent_level() {
        assert_eq!(TreeParams::from_pairs(pairs(&[("page", "2")])).level, None);
    }

    #[test]
    fn repeated_level_takes_last_value() {
        let params = TreeParams::from_pairs(pairs(&[("level", "1"), ("x", "y"), ("level", "2")]));
        assert_eq!(params.level.as_deref(), Some("2"));
    }
}
