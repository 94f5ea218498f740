// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::billing::BillingFrequency;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use time::Date;

/// Display name of the sentinel zone for contracts without a zone.
pub const UNASSIGNED_ZONE: &str = "Unassigned";

/// Opaque identifier of a contract row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId {
    value: String,
}

impl ContractId {
    /// Creates a new `ContractId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The identifier as stored by the backend
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ContractId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Reporting zone of a contract.
///
/// Contracts without a zone belong to `Zone::Unassigned`, which sorts
/// after every named zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Zone {
    /// A zone label taken from the contract row.
    Named(String),
    /// No zone recorded.
    Unassigned,
}

impl Zone {
    /// Builds a zone from an optional free-text label.
    ///
    /// Labels are trimmed. Missing or blank labels, and the literal sentinel
    /// name, map to `Zone::Unassigned`.
    #[must_use]
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some(name) if !name.is_empty() && name != UNASSIGNED_ZONE => {
                Self::Named(name.to_string())
            }
            _ => Self::Unassigned,
        }
    }

    /// Returns the display name of the zone.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Unassigned => UNASSIGNED_ZONE,
        }
    }

    /// Returns true for the sentinel zone.
    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        matches!(self, Self::Unassigned)
    }
}

impl Ord for Zone {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Named(a), Self::Named(b)) => a.cmp(b),
            (Self::Named(_), Self::Unassigned) => Ordering::Less,
            (Self::Unassigned, Self::Named(_)) => Ordering::Greater,
            (Self::Unassigned, Self::Unassigned) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Zone {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Option<String>> for Zone {
    fn from(label: Option<String>) -> Self {
        Self::from_label(label.as_deref())
    }
}

impl From<Zone> for String {
    fn from(zone: Zone) -> Self {
        zone.name().to_string()
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A renewal contract as stored by the backend.
///
/// Values are assumed to be sanitized at the import or edit boundary;
/// see `validate_contract`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// The contract identifier.
    pub id: ContractId,
    /// The client display name.
    pub client: String,
    /// First day of the contract, if known.
    pub contract_start_date: Option<Date>,
    /// Last day of the contract, if known.
    pub contract_end_date: Option<Date>,
    /// Full-year value including VAT.
    pub yearly_value: f64,
    /// Normalized billing frequency.
    pub billing_type: BillingFrequency,
    /// The billing label as originally entered, kept for display.
    pub billing_label: Option<String>,
    /// Reporting zone.
    pub zone: Zone,
    /// Contact telephone number.
    pub contact_number: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
}

impl Contract {
    /// Creates a contract with no dates, no value, yearly billing and no zone.
    ///
    /// # Arguments
    ///
    /// * `id` - The contract identifier
    /// * `client` - The client display name
    #[must_use]
    pub fn new(id: ContractId, client: &str) -> Self {
        Self {
            id,
            client: client.trim().to_string(),
            contract_start_date: None,
            contract_end_date: None,
            yearly_value: 0.0,
            billing_type: BillingFrequency::Yearly,
            billing_label: None,
            zone: Zone::Unassigned,
            contact_number: None,
            email: None,
        }
    }

    /// Sets the contract period.
    #[must_use]
    pub const fn with_dates(mut self, start: Option<Date>, end: Option<Date>) -> Self {
        self.contract_start_date = start;
        self.contract_end_date = end;
        self
    }

    /// Sets the yearly value.
    #[must_use]
    pub const fn with_yearly_value(mut self, yearly_value: f64) -> Self {
        self.yearly_value = yearly_value;
        self
    }

    /// Sets the billing frequency from a free-text label, keeping the label.
    #[must_use]
    pub fn with_billing_label(mut self, label: Option<&str>) -> Self {
        self.billing_type = BillingFrequency::normalize(label);
        self.billing_label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        self
    }

    /// Sets the zone.
    #[must_use]
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Sets the contact fields.
    #[must_use]
    pub fn with_contact(mut self, contact_number: Option<String>, email: Option<String>) -> Self {
        self.contact_number = contact_number;
        self.email = email;
        self
    }
}
