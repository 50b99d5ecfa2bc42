//! Validation rules for the shared value types.

use super::*;
use rstest::rstest;

#[rstest]
#[case("alice")]
#[case("dev.ops-42")]
fn login_accepts_plain_names(#[case] raw: &str) {
    let login = Login::new(raw).expect("valid login");
    assert_eq!(login.as_str(), raw);
}

#[rstest]
#[case("", "empty")]
#[case("   ", "empty")]
#[case(" alice", "surrounding_whitespace")]
#[case("alice\n", "surrounding_whitespace")]
fn login_rejects_blank_or_padded_input(#[case] raw: &str, #[case] code: &str) {
    let err = Login::new(raw).expect_err("invalid login");
    assert_eq!(err.code(), code);
    assert_eq!(err.field(), "login");
}

#[rstest]
fn wallet_rejects_overlong_addresses() {
    let too_long = format!("0x{}", "a".repeat(41));
    let err = WalletAddress::new(too_long).expect_err("overlong wallet");
    assert_eq!(err, ValueError::TooLong { field: "wallet", max: WALLET_MAX });
    assert!(WalletAddress::new(format!("0x{}", "a".repeat(40))).is_ok());
}

#[rstest]
#[case("2024-06-01")]
#[case("2024-02-29")]
fn shift_date_accepts_real_days(#[case] raw: &str) {
    let date = ShiftDate::parse(raw).expect("valid date");
    assert_eq!(date.to_string(), raw);
}

#[rstest]
#[case("2024-6-1")]
#[case("2023-02-29")]
#[case("2024-13-01")]
#[case("01-06-2024")]
#[case("2024-06-01T00:00:00")]
#[case(" 2024-06-01")]
#[case("")]
fn shift_date_rejects_malformed_input(#[case] raw: &str) {
    let err = ShiftDate::parse(raw).expect_err("invalid date");
    assert_eq!(err.code(), "invalid_date");
}

#[rstest]
fn shift_date_deserialises_through_validation() {
    let parsed: Result<ShiftDate, _> = serde_json::from_str("\"2024-06-31\"");
    assert!(parsed.is_err());
}

#[rstest]
fn window_requires_start_before_end() {
    assert_eq!(ActivityWindow::new(10, 10), Err(ValueError::EmptyWindow));
    assert_eq!(ActivityWindow::new(11, 10), Err(ValueError::EmptyWindow));
}

#[rstest]
fn value_errors_become_invalid_requests() {
    let err: Error = ShiftDate::parse("tomorrow").expect_err("invalid").into();
    assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
    assert_eq!(
        err.details(),
        Some(&json!({ "field": "date", "code": "invalid_date" }))
    );
}
