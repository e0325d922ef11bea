//! Request-level validation of the `?level=` depth filter used by the
//! comment tree endpoints.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Name of the query parameter carrying the depth filter.
pub const LEVEL_PARAM: &str = "level";

pub const LEVEL_NOT_INTEGER: &str = "must be a valid integer";

pub const LEVEL_NEGATIVE: &str = "must be a non-negative integer";

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Parse the optional `level` depth filter.
///
/// Absent means unlimited depth. Present values must parse as an integer
/// (surrounding whitespace is ignored) and must not be negative. Values
/// beyond `u32::MAX` saturate, which is equivalent to no limit.
pub fn parse_level_filter(raw: Option<&str>) -> Result<Option<u32>, CoreError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let value: i64 = match raw.trim().parse() {
        Ok(v) => v,
        // Integers too large for i64 are still integers.
        Err(_) if is_integer_literal(raw.trim()) => {
            if raw.trim().starts_with('-') {
                return Err(CoreError::field(LEVEL_PARAM, LEVEL_NEGATIVE));
            }
            return Ok(Some(u32::MAX));
        }
        Err(_) => return Err(CoreError::field(LEVEL_PARAM, LEVEL_NOT_INTEGER)),
    };

    if value < 0 {
        return Err(CoreError::field(LEVEL_PARAM, LEVEL_NEGATIVE));
    }

    Ok(Some(u32::try_from(value).unwrap_or(u32::MAX)))
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
