// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Contract;

/// Validates that a contract's field constraints are met.
///
/// This is the boundary check applied before contracts reach the
/// classifier and aggregator, which assume well-formed input.
///
/// # Arguments
///
/// * `contract` - The contract to validate
///
/// # Errors
///
/// Returns an error if:
/// - The client name is empty
/// - The yearly value is negative, NaN, or infinite
/// - Both dates are present and the end date precedes the start date
pub fn validate_contract(contract: &Contract) -> Result<(), DomainError> {
    // Rule: client must not be empty
    if contract.client.trim().is_empty() {
        return Err(DomainError::InvalidClient {
            contract_id: contract.id.clone(),
        });
    }

    // Rule: yearly value must be a finite, non-negative amount
    if !contract.yearly_value.is_finite() || contract.yearly_value < 0.0 {
        return Err(DomainError::InvalidYearlyValue {
            contract_id: contract.id.clone(),
            value: contract.yearly_value,
        });
    }

    // Rule: a contract cannot end before it starts
    if let (Some(start_date), Some(end_date)) =
        (contract.contract_start_date, contract.contract_end_date)
        && end_date < start_date
    {
        return Err(DomainError::InvalidDateRange {
            contract_id: contract.id.clone(),
            start_date,
            end_date,
        });
    }

    Ok(())
}
