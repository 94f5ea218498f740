// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contract renewal lifecycle classification.
//!
//! This module provides pure, deterministic classification of a contract's
//! end date relative to an explicitly supplied current date. The current
//! date is never read from the system clock here; callers read it once per
//! request and pass it in.

use crate::billing::{PaymentDue, payment_due};
use crate::error::DomainError;
use crate::types::Contract;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Contracts ending within this many days (inclusive) are expiring soon.
pub const EXPIRING_SOON_DAYS: i64 = 60;

/// Contracts that ended at most this many days ago are recently expired.
pub const RECENTLY_EXPIRED_WINDOW_DAYS: i64 = 30;

/// Contracts ending within this many days (inclusive) are critical.
pub const CRITICAL_DAYS: i64 = 14;

/// Renewal status of a contract.
///
/// The string forms are consumed verbatim by styling code and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractStatus {
    /// Ends more than `EXPIRING_SOON_DAYS` from today, or has no end date.
    Active,
    /// Ends today or within `EXPIRING_SOON_DAYS`.
    ExpiringSoon,
    /// Ended within the last `RECENTLY_EXPIRED_WINDOW_DAYS`.
    RecentlyExpired,
    /// Ended before the recently-expired window.
    Expired,
}

impl ContractStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::ExpiringSoon => "expiring-soon",
            Self::RecentlyExpired => "recently-expired",
            Self::Expired => "expired",
        }
    }

    /// Returns true if the contract needs a follow-up from the renewals desk.
    #[must_use]
    pub const fn needs_attention(&self) -> bool {
        matches!(self, Self::ExpiringSoon | Self::RecentlyExpired)
    }
}

impl FromStr for ContractStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "expiring-soon" => Ok(Self::ExpiringSoon),
            "recently-expired" => Ok(Self::RecentlyExpired),
            "expired" => Ok(Self::Expired),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display urgency band for the days remaining on a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    /// End date has passed.
    Overdue,
    /// Ends within `CRITICAL_DAYS`.
    Critical,
    /// Ends within `EXPIRING_SOON_DAYS`.
    Soon,
    /// Ends later than `EXPIRING_SOON_DAYS`.
    Normal,
    /// No end date recorded.
    Undated,
}

impl Urgency {
    /// Bands a day count.
    #[must_use]
    pub const fn from_days(days_until_expiry: Option<i64>) -> Self {
        match days_until_expiry {
            None => Self::Undated,
            Some(days) if days < 0 => Self::Overdue,
            Some(days) if days <= CRITICAL_DAYS => Self::Critical,
            Some(days) if days <= EXPIRING_SOON_DAYS => Self::Soon,
            Some(_) => Self::Normal,
        }
    }
}

/// Result of classifying a single end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryClassification {
    /// The renewal status.
    pub status: ContractStatus,
    /// Signed days from today to the end date. Negative once expired,
    /// `None` when there is no end date.
    pub days_until_expiry: Option<i64>,
    /// Days since the end date. Zero unless the contract has expired.
    pub days_since_expiry: i64,
}

/// Classifies a contract end date relative to `today`.
///
/// Day counts are whole calendar days; a contract ending today has
/// `days_until_expiry == Some(0)` and is expiring soon. A missing end date
/// is treated as open-ended and classified as active.
///
/// # Arguments
///
/// * `end_date` - The last day of the contract, if known
/// * `today` - The current date
#[must_use]
pub fn classify(end_date: Option<Date>, today: Date) -> ExpiryClassification {
    let Some(end_date) = end_date else {
        return ExpiryClassification {
            status: ContractStatus::Active,
            days_until_expiry: None,
            days_since_expiry: 0,
        };
    };

    let diff_days: i64 = (end_date - today).whole_days();

    if diff_days < 0 {
        let days_since_expiry: i64 = -diff_days;
        let status: ContractStatus = if days_since_expiry <= RECENTLY_EXPIRED_WINDOW_DAYS {
            ContractStatus::RecentlyExpired
        } else {
            ContractStatus::Expired
        };

        return ExpiryClassification {
            status,
            days_until_expiry: Some(diff_days),
            days_since_expiry,
        };
    }

    let status: ContractStatus = if diff_days <= EXPIRING_SOON_DAYS {
        ContractStatus::ExpiringSoon
    } else {
        ContractStatus::Active
    };

    ExpiryClassification {
        status,
        days_until_expiry: Some(diff_days),
        days_since_expiry: 0,
    }
}

/// A contract enriched with its renewal classification.
///
/// Recomputed on every read; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedContract {
    /// The source contract.
    #[serde(flatten)]
    pub contract: Contract,
    /// The renewal status.
    pub status: ContractStatus,
    /// Signed days until the end date, if there is one.
    pub days_until_expiry: Option<i64>,
    /// Days since the end date.
    pub days_since_expiry: i64,
    /// Display urgency band.
    pub urgency: Urgency,
}

impl ClassifiedContract {
    /// Amount due per billing period for this contract.
    #[must_use]
    pub fn payment_due(&self) -> PaymentDue {
        payment_due(self.contract.yearly_value, self.contract.billing_type)
    }
}

/// Classifies a single contract.
#[must_use]
pub fn classify_contract(contract: Contract, today: Date) -> ClassifiedContract {
    let classification: ExpiryClassification = classify(contract.contract_end_date, today);

    ClassifiedContract {
        contract,
        status: classification.status,
        days_until_expiry: classification.days_until_expiry,
        days_since_expiry: classification.days_since_expiry,
        urgency: Urgency::from_days(classification.days_until_expiry),
    }
}

/// Classifies every contract in order. Output has the same length as input.
#[must_use]
pub fn classify_all(contracts: &[Contract], today: Date) -> Vec<ClassifiedContract> {
    contracts
        .iter()
        .cloned()
        .map(|contract| classify_contract(contract, today))
        .collect()
}
