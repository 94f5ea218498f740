// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contract list filtering for the renewals table.

use crate::error::DomainError;
use crate::lifecycle::{ClassifiedContract, ContractStatus};
use crate::types::Zone;
use std::str::FromStr;

/// Which statuses a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every status.
    #[default]
    All,
    /// Expiring soon or recently expired.
    NeedsAttention,
    /// A single status.
    Only(ContractStatus),
}

impl StatusFilter {
    /// Returns true if `status` passes this filter.
    #[must_use]
    pub fn matches(&self, status: ContractStatus) -> bool {
        match self {
            Self::All => true,
            Self::NeedsAttention => status.needs_attention(),
            Self::Only(only) => *only == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "attention" | "needs-attention" => Ok(Self::NeedsAttention),
            other => other
                .parse::<ContractStatus>()
                .map(Self::Only)
                .map_err(|_| DomainError::InvalidStatusFilter(other.to_string())),
        }
    }
}

/// Criteria for narrowing a classified contract list.
///
/// All criteria must match. An empty filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractFilter {
    /// Status criterion.
    pub status: StatusFilter,
    /// Keep only this zone.
    pub zone: Option<Zone>,
    /// Case-insensitive text matched against client, zone, email and contact number.
    pub search: Option<String>,
}

impl ContractFilter {
    /// Returns true if the contract passes every criterion.
    #[must_use]
    pub fn matches(&self, contract: &ClassifiedContract) -> bool {
        if !self.status.matches(contract.status) {
            return false;
        }

        if let Some(zone) = &self.zone
            && zone != &contract.contract.zone
        {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => matches_search(contract, &needle.to_lowercase()),
            _ => true,
        }
    }

    /// Keeps matching contracts, in input order.
    #[must_use]
    pub fn apply(&self, contracts: &[ClassifiedContract]) -> Vec<ClassifiedContract> {
        contracts
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect()
    }
}

fn matches_search(contract: &ClassifiedContract, needle: &str) -> bool {
    let c = &contract.contract;
    [
        Some(c.client.as_str()),
        Some(c.zone.name()),
        c.email.as_deref(),
        c.contact_number.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::classify_all;
    use crate::types::{Contract, ContractId};
    use time::Date;
    use time::macros::date;

    const TODAY: Date = date!(2026 - 10 - 19);

    fn sample() -> Vec<ClassifiedContract> {
        let contracts: Vec<Contract> = vec![
            Contract::new(ContractId::new("1"), "Acme Security")
                .with_zone(Zone::from_label(Some("North")))
                .with_dates(None, Some(date!(2026 - 11 - 01))),
            Contract::new(ContractId::new("2"), "Blue Sky Farms")
                .with_zone(Zone::from_label(Some("South")))
                .with_dates(None, Some(date!(2026 - 10 - 01)))
                .with_contact(None, Some(String::from("accounts@bluesky.example"))),
            Contract::new(ContractId::new("3"), "Cobalt Mining")
                .with_zone(Zone::from_label(Some("North")))
                .with_dates(None, Some(date!(2028 - 01 - 01))),
            Contract::new(ContractId::new("4"), "Delta Freight")
                .with_dates(None, Some(date!(2024 - 01 - 01)))
                .with_contact(Some(String::from("082 555 0199")), None),
        ];
        classify_all(&contracts, TODAY)
    }

    fn ids(contracts: &[ClassifiedContract]) -> Vec<&str> {
        contracts.iter().map(|c| c.contract.id.value()).collect()
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let contracts: Vec<ClassifiedContract> = sample();
        assert_eq!(ContractFilter::default().apply(&contracts), contracts);
    }

    #[test]
    fn test_needs_attention_filter() {
        let filter: ContractFilter = ContractFilter {
            status: StatusFilter::NeedsAttention,
            ..ContractFilter::default()
        };
        assert_eq!(ids(&filter.apply(&sample())), vec!["1", "2"]);
    }

    #[test]
    fn test_single_status_filter() {
        let filter: ContractFilter = ContractFilter {
            status: StatusFilter::Only(ContractStatus::Expired),
            ..ContractFilter::default()
        };
        assert_eq!(ids(&filter.apply(&sample())), vec!["4"]);
    }

    #[test]
    fn test_zone_filter_includes_unassigned() {
        let north: ContractFilter = ContractFilter {
            zone: Some(Zone::from_label(Some("North"))),
            ..ContractFilter::default()
        };
        assert_eq!(ids(&north.apply(&sample())), vec!["1", "3"]);

        let unassigned: ContractFilter = ContractFilter {
            zone: Some(Zone::Unassigned),
            ..ContractFilter::default()
        };
        assert_eq!(ids(&unassigned.apply(&sample())), vec!["4"]);
    }

    #[test]
    fn test_search_matches_client_email_and_phone() {
        let by_client: ContractFilter = ContractFilter {
            search: Some(String::from("cobalt")),
            ..ContractFilter::default()
        };
        assert_eq!(ids(&by_client.apply(&sample())), vec!["3"]);

        let by_email: ContractFilter = ContractFilter {
            search: Some(String::from("ACCOUNTS@")),
            ..ContractFilter::default()
        };
        assert_eq!(ids(&by_email.apply(&sample())), vec!["2"]);

        let by_phone: ContractFilter = ContractFilter {
            search: Some(String::from("555")),
            ..ContractFilter::default()
        };
        assert_eq!(ids(&by_phone.apply(&sample())), vec!["4"]);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter: ContractFilter = ContractFilter {
            search: Some(String::from("   ")),
            ..ContractFilter::default()
        };
        assert_eq!(filter.apply(&sample()).len(), 4);
    }

    #[test]
    fn test_criteria_combine() {
        let filter: ContractFilter = ContractFilter {
            status: StatusFilter::NeedsAttention,
            zone: Some(Zone::from_label(Some("North"))),
            search: Some(String::from("acme")),
        };
        assert_eq!(ids(&filter.apply(&sample())), vec!["1"]);
    }

    #[test]
    fn test_status_filter_from_str() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "attention".parse::<StatusFilter>().unwrap(),
            StatusFilter::NeedsAttention
        );
        assert_eq!(
            "recently-expired".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(ContractStatus::RecentlyExpired)
        );
        assert!(matches!(
            "overdue".parse::<StatusFilter>(),
            Err(DomainError::InvalidStatusFilter(_))
        ));
    }
}
