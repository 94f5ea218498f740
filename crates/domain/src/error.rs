// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::ContractId;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Client name is empty.
    InvalidClient {
        /// The contract the client belongs to.
        contract_id: ContractId,
    },
    /// Yearly value is negative or not a finite number.
    InvalidYearlyValue {
        /// The contract carrying the value.
        contract_id: ContractId,
        /// The rejected value.
        value: f64,
    },
    /// Contract ends before it starts.
    InvalidDateRange {
        /// The contract carrying the dates.
        contract_id: ContractId,
        /// The start date.
        start_date: time::Date,
        /// The end date.
        end_date: time::Date,
    },
    /// Contract status string is not one of the known values.
    InvalidStatus(String),
    /// Status filter string is not one of the known values.
    InvalidStatusFilter(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidClient { contract_id } => {
                write!(f, "Contract '{contract_id}' has an empty client name")
            }
            Self::InvalidYearlyValue { contract_id, value } => {
                write!(
                    f,
                    "Contract '{contract_id}' has an invalid yearly value: {value}. Must be a non-negative number"
                )
            }
            Self::InvalidDateRange {
                contract_id,
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Contract '{contract_id}' ends on {end_date}, before its start date {start_date}"
                )
            }
            Self::InvalidStatus(status) => write!(
                f,
                "Invalid contract status: '{status}'. Must be one of active, expiring-soon, recently-expired, expired"
            ),
            Self::InvalidStatusFilter(filter) => write!(
                f,
                "Invalid status filter: '{filter}'. Must be all, attention, or a contract status"
            ),
        }
    }
}

impl std::error::Error for DomainError {}
