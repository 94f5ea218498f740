// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Zone grouping and portfolio statistics.

use crate::lifecycle::{ClassifiedContract, ContractStatus};
use crate::types::Zone;
use serde::Serialize;
use std::collections::BTreeMap;

/// Contracts sharing one zone, with per-zone totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneGroup {
    /// The grouping key.
    pub zone: Zone,
    /// Contracts in this zone, in input order.
    pub contracts: Vec<ClassifiedContract>,
    /// Number of contracts.
    pub total: usize,
    /// Number of contracts expiring soon.
    pub expiring_soon_count: usize,
    /// Number of contracts that recently expired.
    pub recently_expired_count: usize,
    /// Sum of yearly values.
    pub total_yearly_value: f64,
}

impl ZoneGroup {
    fn from_contracts(zone: Zone, contracts: Vec<ClassifiedContract>) -> Self {
        let summary: PortfolioSummary = summarize(&contracts);

        Self {
            zone,
            total: summary.total,
            expiring_soon_count: summary.expiring_soon,
            recently_expired_count: summary.recently_expired,
            total_yearly_value: summary.total_value,
            contracts,
        }
    }
}

/// Groups classified contracts by zone.
///
/// Groups are ordered by zone name with `Zone::Unassigned` last. Empty
/// input yields no groups.
#[must_use]
pub fn group_by_zone(contracts: &[ClassifiedContract]) -> Vec<ZoneGroup> {
    let mut by_zone: BTreeMap<Zone, Vec<ClassifiedContract>> = BTreeMap::new();

    for contract in contracts {
        by_zone
            .entry(contract.contract.zone.clone())
            .or_default()
            .push(contract.clone());
    }

    by_zone
        .into_iter()
        .map(|(zone, members)| ZoneGroup::from_contracts(zone, members))
        .collect()
}

/// Status counts and value totals over a list of contracts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PortfolioSummary {
    /// Number of contracts.
    pub total: usize,
    /// Number of active contracts.
    pub active: usize,
    /// Number of contracts expiring soon.
    pub expiring_soon: usize,
    /// Number of recently expired contracts.
    pub recently_expired: usize,
    /// Number of expired contracts.
    pub expired: usize,
    /// Number of contracts without an end date.
    pub no_end_date: usize,
    /// Sum of yearly values.
    pub total_value: f64,
}

impl PortfolioSummary {
    /// Contracts expiring soon or recently expired.
    #[must_use]
    pub const fn needs_attention(&self) -> usize {
        self.expiring_soon + self.recently_expired
    }
}

/// Computes statistics over the full, unpartitioned contract list.
#[must_use]
pub fn summarize(contracts: &[ClassifiedContract]) -> PortfolioSummary {
    contracts
        .iter()
        .fold(PortfolioSummary::default(), |mut summary, contract| {
            summary.total += 1;
            summary.total_value += contract.contract.yearly_value;

            match contract.status {
                ContractStatus::Active => summary.active += 1,
                ContractStatus::ExpiringSoon => summary.expiring_soon += 1,
                ContractStatus::RecentlyExpired => summary.recently_expired += 1,
                ContractStatus::Expired => summary.expired += 1,
            }

            if contract.days_until_expiry.is_none() {
                summary.no_end_date += 1;
            }

            summary
        })
}
