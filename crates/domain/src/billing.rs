// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Billing period normalization.
//!
//! Billing frequencies arrive as free text from spreadsheet imports. They
//! are resolved once into a `BillingFrequency`, after which the amount due
//! per billing period is a plain division of the yearly value.

use serde::{Deserialize, Serialize};

/// How often the yearly contract value is invoiced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BillingFrequency {
    /// 52 invoices per year.
    Weekly,
    /// 12 invoices per year.
    Monthly,
    /// 6 invoices per year (every second month).
    BiMonthly,
    /// 4 invoices per year.
    Quarterly,
    /// One invoice per year. Also the fallback for unrecognized labels.
    #[default]
    Yearly,
}

impl BillingFrequency {
    /// Resolves a free-text billing label.
    ///
    /// Matching is case-insensitive and by substring, checked in this
    /// order: quarterly, monthly (but not bi-monthly), bi-monthly, weekly.
    /// Runs of spaces, underscores and hyphens are treated as a single
    /// hyphen. Anything else, including a missing label, is yearly.
    #[must_use]
    pub fn normalize(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Self::Yearly;
        };

        let lower: String = label.to_lowercase();
        let folded: String = lower
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|piece| !piece.is_empty())
            .collect::<Vec<&str>>()
            .join("-");

        if folded.contains("quarterly") {
            Self::Quarterly
        } else if folded.contains("monthly") {
            // "bi-monthly" contains "monthly"
            if folded.contains("bi-monthly") || folded.contains("bimonthly") {
                Self::BiMonthly
            } else {
                Self::Monthly
            }
        } else if folded.contains("weekly") {
            Self::Weekly
        } else {
            Self::Yearly
        }
    }

    /// Number of billing periods in one year.
    #[must_use]
    pub const fn periods_per_year(&self) -> u32 {
        match self {
            Self::Weekly => 52,
            Self::Monthly => 12,
            Self::BiMonthly => 6,
            Self::Quarterly => 4,
            Self::Yearly => 1,
        }
    }

    /// Short suffix used after a per-period amount.
    #[must_use]
    pub const fn period_label(&self) -> &'static str {
        match self {
            Self::Weekly => "/week",
            Self::Monthly => "/month",
            Self::BiMonthly => "/bi-month",
            Self::Quarterly => "/quarter",
            Self::Yearly => "/yr",
        }
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::BiMonthly => "bi-monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::fmt::Display for BillingFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Amount due for a single billing period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaymentDue {
    /// Yearly value divided by the number of periods.
    pub amount: f64,
    /// Period suffix, e.g. `/month`.
    pub label: &'static str,
}

impl std::fmt::Display for PaymentDue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}{}", self.amount, self.label)
    }
}

/// Computes the amount due per billing period.
///
/// # Arguments
///
/// * `yearly_value` - Full-year contract value including VAT
/// * `frequency` - The billing frequency
#[must_use]
pub fn payment_due(yearly_value: f64, frequency: BillingFrequency) -> PaymentDue {
    PaymentDue {
        amount: yearly_value / f64::from(frequency.periods_per_year()),
        label: frequency.period_label(),
    }
}

/// Computes the amount due per billing period from a free-text label.
///
/// Equivalent to normalizing the label and calling `payment_due`.
#[must_use]
pub fn payment_due_for_label(yearly_value: f64, billing_type: Option<&str>) -> PaymentDue {
    payment_due(yearly_value, BillingFrequency::normalize(billing_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_amount(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 0.005,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_payment_due_monthly() {
        let due: PaymentDue = payment_due_for_label(1200.0, Some("monthly"));
        assert_amount(due.amount, 100.0);
        assert_eq!(due.label, "/month");
    }

    #[test]
    fn test_payment_due_bi_monthly_mixed_case() {
        let due: PaymentDue = payment_due_for_label(1200.0, Some("Bi-Monthly"));
        assert_amount(due.amount, 200.0);
        assert_eq!(due.label, "/bi-month");
    }

    #[test]
    fn test_payment_due_quarterly() {
        let due: PaymentDue = payment_due_for_label(1200.0, Some("quarterly"));
        assert_amount(due.amount, 300.0);
        assert_eq!(due.label, "/quarter");
    }

    #[test]
    fn test_payment_due_weekly() {
        let due: PaymentDue = payment_due_for_label(1200.0, Some("weekly"));
        assert_amount(due.amount, 23.08);
        assert_eq!(due.label, "/week");
    }

    #[test]
    fn test_payment_due_missing_label_is_yearly() {
        let due: PaymentDue = payment_due_for_label(1200.0, None);
        assert_amount(due.amount, 1200.0);
        assert_eq!(due.label, "/yr");
    }

    #[test]
    fn test_payment_due_unrecognized_label_is_yearly() {
        let due: PaymentDue = payment_due_for_label(1200.0, Some("garbage"));
        assert_amount(due.amount, 1200.0);
        assert_eq!(due.label, "/yr");

        let empty: PaymentDue = payment_due_for_label(1200.0, Some(""));
        assert_eq!(empty.label, "/yr");
    }

    #[test]
    fn test_normalize_tolerates_spacing_and_underscores() {
        assert_eq!(
            BillingFrequency::normalize(Some("  Bi Monthly ")),
            BillingFrequency::BiMonthly
        );
        assert_eq!(
            BillingFrequency::normalize(Some("bi_monthly")),
            BillingFrequency::BiMonthly
        );
        assert_eq!(
            BillingFrequency::normalize(Some("Bi - Monthly")),
            BillingFrequency::BiMonthly
        );
        assert_eq!(
            BillingFrequency::normalize(Some("bi  monthly")),
            BillingFrequency::BiMonthly
        );
        assert_eq!(
            BillingFrequency::normalize(Some("BIMONTHLY")),
            BillingFrequency::BiMonthly
        );
        assert_eq!(
            BillingFrequency::normalize(Some("Monthly debit order")),
            BillingFrequency::Monthly
        );
    }

    #[test]
    fn test_normalize_quarterly_takes_priority() {
        // First match wins
        assert_eq!(
            BillingFrequency::normalize(Some("quarterly (was monthly)")),
            BillingFrequency::Quarterly
        );
    }

    #[test]
    fn test_normalize_yearly_labels() {
        assert_eq!(
            BillingFrequency::normalize(Some("Yearly")),
            BillingFrequency::Yearly
        );
        assert_eq!(
            BillingFrequency::normalize(Some("annually")),
            BillingFrequency::Yearly
        );
    }

    #[test]
    fn test_payment_due_display() {
        let due: PaymentDue = payment_due(1200.0, BillingFrequency::Weekly);
        assert_eq!(due.to_string(), "23.08/week");
    }

    #[test]
    fn test_frequency_serializes_kebab_case() {
        let json: String = serde_json::to_string(&BillingFrequency::BiMonthly).unwrap();
        assert_eq!(json, "\"bi-monthly\"");
    }
}
