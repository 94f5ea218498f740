// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod billing;
mod error;
mod filter;
mod lifecycle;
mod types;
mod validation;
mod zones;

#[cfg(test)]
mod tests;

pub use billing::{BillingFrequency, PaymentDue, payment_due, payment_due_for_label};
pub use error::DomainError;
pub use filter::{ContractFilter, StatusFilter};
pub use lifecycle::{
    CRITICAL_DAYS, ClassifiedContract, ContractStatus, EXPIRING_SOON_DAYS, ExpiryClassification,
    RECENTLY_EXPIRED_WINDOW_DAYS, Urgency, classify, classify_all, classify_contract,
};
pub use types::{Contract, ContractId, UNASSIGNED_ZONE, Zone};
pub use validation::validate_contract;
pub use zones::{PortfolioSummary, ZoneGroup, group_by_zone, summarize};
