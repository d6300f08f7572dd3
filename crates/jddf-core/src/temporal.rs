//! # Temporal Types — RFC 3339 Timestamps
//!
//! The `timestamp` primitive type accepts strings that are syntactically
//! valid RFC 3339 date-times. Grammar checking is delegated to `chrono`,
//! except for the date/time separator: `chrono` also takes a space there,
//! which the RFC 3339 §5.6 grammar does not, so anything but `T`/`t` is
//! rejected up front.
//!
//! Unlike canonicalizing timestamp types, nothing here normalizes: any
//! offset is accepted (`Z`, `+00:00`, `-08:00`) and fractional seconds of
//! any precision are allowed. The instance value itself is never rewritten.

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// Byte offset of the date/time separator in `full-date "T" full-time`.
const SEPARATOR_INDEX: usize = 10;

/// Why a string is not an RFC 3339 date-time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The character after the date is not `T` or `t`.
    #[error("date and time must be separated by 'T'")]
    Separator,

    /// Rejected by the `chrono` RFC 3339 parser.
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

/// Parse an RFC 3339 date-time, keeping its original offset.
///
/// # Errors
///
/// Returns [`TimestampError::Separator`] unless the date and time are
/// joined by `T`/`t`, and [`TimestampError::Parse`] for any other defect
/// (a bare date, a missing offset, an out-of-range field).
pub fn parse_rfc3339(s: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    if !matches!(s.as_bytes().get(SEPARATOR_INDEX), Some(b'T' | b't')) {
        return Err(TimestampError::Separator);
    }
    Ok(DateTime::parse_from_rfc3339(s)?)
}

/// Returns true if `s` is a valid RFC 3339 date-time.
pub fn is_rfc3339(s: &str) -> bool {
    parse_rfc3339(s).is_ok()
}
