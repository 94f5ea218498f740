// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Text and JSON rendering of renewal reports.

use renewals_domain::{ClassifiedContract, PaymentDue, PortfolioSummary, ZoneGroup};
use serde::Serialize;
use std::fmt::Write;
use time::Date;

/// Zone report payload.
#[derive(Debug, Serialize)]
pub struct ZoneReport<'a> {
    /// Date the report was classified against.
    pub today: Date,
    /// Statistics over every contract.
    pub summary: PortfolioSummary,
    /// Contracts grouped by zone.
    pub zones: &'a [ZoneGroup],
}

/// Contract listing payload.
#[derive(Debug, Serialize)]
pub struct ContractListing<'a> {
    /// Date the listing was classified against.
    pub today: Date,
    /// Contracts that passed the filter.
    pub contracts: Vec<ListedContract<'a>>,
}

/// A listed contract with its per-period payment.
#[derive(Debug, Serialize)]
pub struct ListedContract<'a> {
    #[serde(flatten)]
    pub contract: &'a ClassifiedContract,
    pub payment_due: PaymentDue,
}

impl<'a> ContractListing<'a> {
    /// Builds a listing, computing each contract's payment.
    #[must_use]
    pub fn new(today: Date, contracts: &'a [ClassifiedContract]) -> Self {
        Self {
            today,
            contracts: contracts
                .iter()
                .map(|contract| ListedContract {
                    contract,
                    payment_due: contract.payment_due(),
                })
                .collect(),
        }
    }
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

fn days_column(contract: &ClassifiedContract) -> String {
    contract
        .days_until_expiry
        .map_or_else(|| String::from("-"), |days| days.to_string())
}

fn date_column(date: Option<Date>) -> String {
    date.map_or_else(|| String::from("-"), |d| d.to_string())
}

/// Renders the zone report as a plain-text table.
#[must_use]
pub fn render_zone_report(report: &ZoneReport<'_>) -> String {
    let summary: &PortfolioSummary = &report.summary;
    let mut out: String = String::new();

    let _ = writeln!(out, "Renewals report as of {}", report.today);
    let _ = writeln!(
        out,
        "Contracts: {}  Active: {}  Expiring soon: {}  Recently expired: {}  Expired: {}  No end date: {}",
        summary.total,
        summary.active,
        summary.expiring_soon,
        summary.recently_expired,
        summary.expired,
        summary.no_end_date
    );
    let _ = writeln!(out, "Total yearly value: {}", money(summary.total_value));

    if report.zones.is_empty() {
        let _ = writeln!(out, "\nNo contracts.");
        return out;
    }

    let width: usize = report
        .zones
        .iter()
        .map(|group| group.zone.name().chars().count())
        .max()
        .unwrap_or_default()
        .max("Zone".len());

    let _ = writeln!(
        out,
        "\n{:<width$}  {:>9}  {:>13}  {:>16}  {:>14}",
        "Zone", "Contracts", "Expiring soon", "Recently expired", "Yearly value"
    );

    for group in report.zones {
        let _ = writeln!(
            out,
            "{:<width$}  {:>9}  {:>13}  {:>16}  {:>14}",
            group.zone.name(),
            group.total,
            group.expiring_soon_count,
            group.recently_expired_count,
            money(group.total_yearly_value)
        );
    }

    out
}

/// Renders a contract listing as a plain-text table.
#[must_use]
pub fn render_contract_list(listing: &ContractListing<'_>) -> String {
    let mut out: String = String::new();

    if listing.contracts.is_empty() {
        let _ = writeln!(out, "No matching contracts as of {}.", listing.today);
        return out;
    }

    let width: usize = listing
        .contracts
        .iter()
        .map(|listed| listed.contract.contract.client.chars().count())
        .max()
        .unwrap_or_default()
        .max("Client".len());

    let _ = writeln!(
        out,
        "{:<width$}  {:<12}  {:<10}  {:<16}  {:>6}  {:>16}",
        "Client", "Zone", "End date", "Status", "Days", "Payment"
    );

    for listed in &listing.contracts {
        let contract: &ClassifiedContract = listed.contract;
        let _ = writeln!(
            out,
            "{:<width$}  {:<12}  {:<10}  {:<16}  {:>6}  {:>16}",
            contract.contract.client,
            contract.contract.zone.name(),
            date_column(contract.contract.contract_end_date),
            contract.status.as_str(),
            days_column(contract),
            listed.payment_due.to_string()
        );
    }

    let _ = writeln!(out, "\n{} contract(s)", listing.contracts.len());
    out
}
