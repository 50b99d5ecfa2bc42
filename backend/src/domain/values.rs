//! Validated value types shared by the directory, shift and activity models.
//!
//! Each type checks its invariant once at construction, so ports and
//! adapters can trust the values they receive. Serde goes through the same
//! validation via `try_from = "String"`.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Error;

/// Maximum length of logins, card uids, MAC addresses and names.
pub const KEY_MAX: usize = 64;
/// Maximum length of a wallet address (`0x` plus 40 hex digits).
pub const WALLET_MAX: usize = 42;

/// Rejection raised by a value type constructor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must not have leading or trailing whitespace")]
    SurroundingWhitespace { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} must be a calendar date formatted as YYYY-MM-DD")]
    InvalidDate { field: &'static str },
    #[error("window start must be before window end")]
    EmptyWindow,
}

impl ValueError {
    /// Name of the offending input field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::SurroundingWhitespace { field }
            | Self::TooLong { field, .. }
            | Self::InvalidDate { field } => field,
            Self::EmptyWindow => "start",
        }
    }

    /// Stable machine-readable reason.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "empty",
            Self::SurroundingWhitespace { .. } => "surrounding_whitespace",
            Self::TooLong { .. } => "too_long",
            Self::InvalidDate { .. } => "invalid_date",
            Self::EmptyWindow => "empty_window",
        }
    }
}

impl From<ValueError> for Error {
    fn from(value: ValueError) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}

fn check_key(field: &'static str, raw: &str, max: usize) -> Result<(), ValueError> {
    if raw.trim().is_empty() {
        return Err(ValueError::Empty { field });
    }
    if raw.trim() != raw {
        return Err(ValueError::SurroundingWhitespace { field });
    }
    if raw.chars().count() > max {
        return Err(ValueError::TooLong { field, max });
    }
    Ok(())
}

macro_rules! define_key {
    ($(#[$meta:meta])* $name:ident, $field:literal, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the value.
            ///
            /// # Errors
            /// Returns [`ValueError`] when the input is blank, padded with
            /// whitespace or too long.
            pub fn new(raw: impl Into<String>) -> Result<Self, ValueError> {
                let raw = raw.into();
                check_key($field, &raw, $max)?;
                Ok(Self(raw))
            }

            /// Borrow the validated string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_key!(
    /// Member login supplied by the identity provider; unique per user.
    Login, "login", KEY_MAX
);
define_key!(
    /// NFC card identifier linked to at most one user.
    CardUid, "uid", KEY_MAX
);
define_key!(
    /// Hardware address of an NFC reader.
    MacAddress, "mac", KEY_MAX
);
define_key!(
    /// Payout wallet address.
    WalletAddress, "wallet", WALLET_MAX
);
define_key!(RoleName, "role", KEY_MAX);
define_key!(LocationName, "location", KEY_MAX);

static DATE_RE: OnceLock<Regex> = OnceLock::new();

fn date_regex() -> &'static Regex {
    DATE_RE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}$")
            .unwrap_or_else(|error| panic!("shift date regex failed to compile: {error}"))
    })
}

/// Calendar day a shift is scheduled on, rendered as `YYYY-MM-DD`.
///
/// # Examples
/// ```
/// use rollcall::domain::ShiftDate;
///
/// let date = ShiftDate::parse("2024-06-01").expect("valid date");
/// assert_eq!(date.to_string(), "2024-06-01");
/// assert!(ShiftDate::parse("2024-6-1").is_err());
/// assert!(ShiftDate::parse("2024-02-30").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShiftDate(NaiveDate);

impl ShiftDate {
    /// Parse the strict `YYYY-MM-DD` form.
    ///
    /// # Errors
    /// Returns [`ValueError::InvalidDate`] when the pattern does not match or
    /// the day does not exist.
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let invalid = ValueError::InvalidDate { field: "date" };
        if !date_regex().is_match(raw) {
            return Err(invalid);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| invalid)
    }

    /// Underlying calendar date.
    #[must_use]
    pub const fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for ShiftDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl fmt::Display for ShiftDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<ShiftDate> for String {
    fn from(value: ShiftDate) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ShiftDate {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Closed time window `[start, end]` in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow {
    start: i64,
    end: i64,
}

impl ActivityWindow {
    /// Length of the default window.
    pub const DAY_SECONDS: i64 = 86_400;

    /// Validate and construct a window.
    ///
    /// # Errors
    /// Returns [`ValueError::EmptyWindow`] unless `start < end`.
    pub fn new(start: i64, end: i64) -> Result<Self, ValueError> {
        if start >= end {
            return Err(ValueError::EmptyWindow);
        }
        Ok(Self { start, end })
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> i64 {
        self.start
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> i64 {
        self.end
    }
}

#[cfg(test)]
mod tests;
