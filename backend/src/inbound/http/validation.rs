//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs keep their fields optional and raw; these helpers turn them
//! into domain values, reporting failures as `invalid_request` with the
//! offending field in `details`.

use serde_json::json;

use crate::domain::{Error, ShiftDate, ValueError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

/// Render a value-type failure, echoing the rejected input.
pub(crate) fn invalid_value_error(field: FieldName, error: &ValueError, value: &str) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": error.code(),
    }))
}

/// Unwrap a required field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a required wire string into a validated domain value.
pub(crate) fn parse_required<T>(
    value: Option<String>,
    field: FieldName,
    parse: impl FnOnce(String) -> Result<T, ValueError>,
) -> Result<T, Error> {
    let raw = require(value, field)?;
    parse(raw.clone()).map_err(|error| invalid_value_error(field, &error, &raw))
}

/// Parse an optional wire string; `""` and absence both mean `None`.
pub(crate) fn parse_optional<T>(
    value: Option<String>,
    field: FieldName,
    parse: impl FnOnce(String) -> Result<T, ValueError>,
) -> Result<Option<T>, Error> {
    match value {
        Some(raw) if !raw.is_empty() => parse(raw.clone())
            .map(Some)
            .map_err(|error| invalid_value_error(field, &error, &raw)),
        _ => Ok(None),
    }
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a unix timestamp in seconds")).with_details(
        json!({
            "field": field,
            "value": value,
            "code": ErrorCode::InvalidTimestamp.as_str(),
        }),
    )
}

/// Parse optional unix seconds; `""` and absence both mean `None`.
pub(crate) fn parse_optional_seconds(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<i64>, Error> {
    match value {
        Some(raw) if !raw.is_empty() => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| invalid_timestamp_error(field, &raw)),
        _ => Ok(None),
    }
}

/// Parse a required `YYYY-MM-DD` date.
pub(crate) fn parse_date(value: Option<String>, field: FieldName) -> Result<ShiftDate, Error> {
    parse_required(value, field, |raw| ShiftDate::parse(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as DomainCode, Login};
    use rstest::rstest;

    const LOGIN: FieldName = FieldName::new("login");

    #[rstest]
    fn missing_fields_name_the_field() {
        let err = parse_required(None, LOGIN, Login::new).expect_err("missing");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "login", "code": "missing_field"}))
        );
    }

    #[rstest]
    fn invalid_values_echo_the_input() {
        let err = parse_required(Some(" alice".to_owned()), LOGIN, Login::new)
            .expect_err("whitespace");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "login");
        assert_eq!(details["value"], " alice");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    fn blank_optionals_are_absent(#[case] raw: Option<String>) {
        let parsed = parse_optional(raw, LOGIN, Login::new).expect("absent");
        assert!(parsed.is_none());
    }

    #[rstest]
    #[case("2024-6-1")]
    #[case("2024-02-30")]
    #[case("tomorrow")]
    fn malformed_dates_are_rejected(#[case] raw: &str) {
        let err = parse_date(Some(raw.to_owned()), FieldName::new("date")).expect_err("bad date");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
    }

    #[rstest]
    #[case(Some("1717200000".to_owned()), Some(1_717_200_000))]
    #[case(Some(String::new()), None)]
    #[case(None, None)]
    fn seconds_parse_or_default(#[case] raw: Option<String>, #[case] expected: Option<i64>) {
        let parsed = parse_optional_seconds(raw, FieldName::new("start")).expect("valid");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn non_numeric_seconds_are_rejected() {
        let err = parse_optional_seconds(Some("noon".to_owned()), FieldName::new("start"))
            .expect_err("not a number");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "start", "value": "noon", "code": "invalid_timestamp"}))
        );
    }

    #[rstest]
    fn well_formed_dates_parse() {
        let date = parse_date(Some("2024-06-01".to_owned()), FieldName::new("date"))
            .expect("valid date");
        assert_eq!(date.to_string(), "2024-06-01");
    }
}
