//! The payroll validator.
//!
//! Pure, side-effect-free enforcement of the field-level and cross-field
//! invariants on a proposed payroll entry. The rules run in a fixed order
//! and every violation is collected, so a caller can report all problems
//! at once instead of one per submission.
//!
//! The validator is the only place `net_salary` is derived; caller-supplied
//! values for it are never trusted on the interactive paths.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::error::FieldViolation;

/// Number of decimal places every money and hour field is normalized to.
pub const MONEY_SCALE: u32 = 2;

/// Which gross field the deduction cap is checked against.
///
/// The current entry form carries a `subtotal`; the legacy single-field
/// form carried `gross_salary`. The violation message names whichever
/// bound was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrossBound {
    /// Gross pay supplied as `subtotal` (current form).
    Subtotal,
    /// Gross pay supplied as `gross_salary` (legacy form).
    GrossSalary,
}

impl GrossBound {
    /// The field name used in violation messages.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Subtotal => "subtotal",
            Self::GrossSalary => "gross_salary",
        }
    }
}

/// The accepted, normalized value set produced by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedAmounts {
    /// Gross pay before deductions, normalized to two decimal places.
    pub subtotal: Decimal,
    /// Deductions, normalized to two decimal places.
    pub deductions: Decimal,
    /// Derived net pay: `subtotal - deductions`.
    pub net_salary: Decimal,
}

/// Normalizes a money or hour quantity to the fixed two-place scale.
pub fn normalize_money(value: Decimal) -> Decimal {
    value.round_dp(MONEY_SCALE)
}

/// Validates the monetary fields of a candidate entry.
///
/// Rules, applied in order with all violations collected:
/// 1. the gross amount must be greater than zero;
/// 2. deductions must not be negative;
/// 3. deductions must not exceed the gross amount.
///
/// On success the returned [`ValidatedAmounts`] carries the derived
/// `net_salary`; the derivation only happens when every rule passed.
///
/// # Examples
///
/// ```
/// use payroll_engine::validation::{validate_amounts, GrossBound};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let ok = validate_amounts(
///     Decimal::from_str("1000.00").unwrap(),
///     Decimal::from_str("50.00").unwrap(),
///     GrossBound::Subtotal,
/// )
/// .unwrap();
/// assert_eq!(ok.net_salary, Decimal::from_str("950.00").unwrap());
/// ```
pub fn validate_amounts(
    gross: Decimal,
    deductions: Decimal,
    bound: GrossBound,
) -> Result<ValidatedAmounts, Vec<FieldViolation>> {
    let gross = normalize_money(gross);
    let deductions = normalize_money(deductions);
    let gross_field = bound.field_name();

    let mut violations = Vec::new();

    if gross <= Decimal::ZERO {
        violations.push(FieldViolation::new(
            gross_field,
            format!("{gross_field} must be greater than zero, got {gross}"),
        ));
    }

    if deductions < Decimal::ZERO {
        violations.push(FieldViolation::new(
            "deductions",
            format!("deductions must not be negative, got {deductions}"),
        ));
    }

    if deductions > gross {
        violations.push(FieldViolation::new(
            "deductions",
            format!("deductions ({deductions}) exceed {gross_field} ({gross})"),
        ));
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    Ok(ValidatedAmounts {
        subtotal: gross,
        deductions,
        net_salary: gross - deductions,
    })
}

/// Validates a full candidate entry: the monetary rules plus the
/// requirement that `time_out` is not before `time_in`.
///
/// All violations are collected across both checks.
pub fn validate_entry(
    subtotal: Decimal,
    deductions: Decimal,
    time_in: NaiveDateTime,
    time_out: NaiveDateTime,
) -> Result<ValidatedAmounts, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let amounts = match validate_amounts(subtotal, deductions, GrossBound::Subtotal) {
        Ok(amounts) => Some(amounts),
        Err(mut amount_violations) => {
            violations.append(&mut amount_violations);
            None
        }
    };

    if time_out < time_in {
        violations.push(FieldViolation::new(
            "time_out",
            format!("time_out ({time_out}) is before time_in ({time_in})"),
        ));
    }

    match (amounts, violations.is_empty()) {
        (Some(amounts), true) => Ok(amounts),
        _ => Err(violations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_valid_amounts_derive_net_salary() {
        let amounts =
            validate_amounts(dec("1000.00"), dec("50.00"), GrossBound::Subtotal).unwrap();

        assert_eq!(amounts.subtotal, dec("1000.00"));
        assert_eq!(amounts.deductions, dec("50.00"));
        assert_eq!(amounts.net_salary, dec("950.00"));
    }

    #[test]
    fn test_zero_deductions_are_valid() {
        let amounts = validate_amounts(dec("800.00"), Decimal::ZERO, GrossBound::Subtotal).unwrap();
        assert_eq!(amounts.net_salary, dec("800.00"));
    }

    #[test]
    fn test_deductions_equal_to_subtotal_are_valid() {
        let amounts =
            validate_amounts(dec("500.00"), dec("500.00"), GrossBound::Subtotal).unwrap();
        assert_eq!(amounts.net_salary, dec("0.00"));
    }

    #[test]
    fn test_zero_subtotal_is_rejected() {
        let violations =
            validate_amounts(Decimal::ZERO, Decimal::ZERO, GrossBound::Subtotal).unwrap_err();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "subtotal");
        assert!(violations[0].message.contains("greater than zero"));
    }

    #[test]
    fn test_negative_deductions_are_rejected() {
        let violations =
            validate_amounts(dec("1000.00"), dec("-1.00"), GrossBound::Subtotal).unwrap_err();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "deductions");
        assert!(violations[0].message.contains("negative"));
    }

    #[test]
    fn test_deductions_above_subtotal_name_the_bound() {
        let violations =
            validate_amounts(dec("100.00"), dec("150.00"), GrossBound::Subtotal).unwrap_err();

        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("exceed subtotal"));
    }

    #[test]
    fn test_legacy_mode_names_gross_salary() {
        let violations =
            validate_amounts(dec("100.00"), dec("150.00"), GrossBound::GrossSalary).unwrap_err();

        assert!(violations[0].message.contains("exceed gross_salary"));

        let violations =
            validate_amounts(Decimal::ZERO, dec("0.00"), GrossBound::GrossSalary).unwrap_err();
        assert_eq!(violations[0].field, "gross_salary");
    }

    #[test]
    fn test_all_violations_are_collected() {
        // Zero gross and negative deductions violate two rules at once.
        let violations =
            validate_amounts(Decimal::ZERO, dec("-10.00"), GrossBound::Subtotal).unwrap_err();

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "subtotal");
        assert_eq!(violations[1].field, "deductions");
    }

    #[test]
    fn test_amounts_are_normalized_to_two_places() {
        let amounts =
            validate_amounts(dec("1000.005"), dec("50.004"), GrossBound::Subtotal).unwrap();

        assert_eq!(amounts.subtotal, dec("1000.00"));
        assert_eq!(amounts.deductions, dec("50.00"));
        assert_eq!(amounts.net_salary, dec("950.00"));
    }

    #[test]
    fn test_entry_with_time_out_before_time_in_is_rejected() {
        let violations = validate_entry(
            dec("1000.00"),
            dec("50.00"),
            make_datetime("2025-01-10 17:00:00"),
            make_datetime("2025-01-10 08:00:00"),
        )
        .unwrap_err();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "time_out");
    }

    #[test]
    fn test_entry_collects_amount_and_time_violations_together() {
        let violations = validate_entry(
            dec("100.00"),
            dec("200.00"),
            make_datetime("2025-01-10 17:00:00"),
            make_datetime("2025-01-10 08:00:00"),
        )
        .unwrap_err();

        assert_eq!(violations.len(), 2);
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["deductions", "time_out"]);
    }

    #[test]
    fn test_entry_accepts_equal_timestamps() {
        let at = make_datetime("2025-01-10 08:00:00");
        let amounts = validate_entry(dec("1000.00"), dec("0"), at, at).unwrap();
        assert_eq!(amounts.net_salary, dec("1000.00"));
    }

    proptest! {
        /// For all valid (subtotal, deductions) pairs with two-place scale,
        /// the derived net salary is exactly their difference.
        #[test]
        fn prop_net_salary_is_exact_difference(
            subtotal_cents in 1i64..=10_000_000,
            deduction_ratio in 0u32..=100,
        ) {
            let subtotal = Decimal::new(subtotal_cents, 2);
            let deduction_cents = subtotal_cents * i64::from(deduction_ratio) / 100;
            let deductions = Decimal::new(deduction_cents, 2);

            let amounts =
                validate_amounts(subtotal, deductions, GrossBound::Subtotal).unwrap();

            prop_assert_eq!(amounts.net_salary, subtotal - deductions);
            prop_assert_eq!(amounts.net_salary + amounts.deductions, subtotal);
        }

        /// Deductions strictly above the subtotal always fail with a
        /// violation naming the bound.
        #[test]
        fn prop_excess_deductions_always_rejected(
            subtotal_cents in 1i64..=1_000_000,
            excess_cents in 1i64..=1_000_000,
        ) {
            let subtotal = Decimal::new(subtotal_cents, 2);
            let deductions = Decimal::new(subtotal_cents + excess_cents, 2);

            let violations =
                validate_amounts(subtotal, deductions, GrossBound::Subtotal).unwrap_err();

            prop_assert!(violations.iter().any(|v| v.message.contains("exceed subtotal")));
        }
    }
}
