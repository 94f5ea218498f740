// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV preview and validation for bulk contract import.
//!
//! This module parses spreadsheet exports into contracts and reports
//! per-row problems without touching any stored data.

use csv::StringRecord;
use renewals_domain::{Contract, ContractId, Zone, validate_contract};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::cells::{optional_text, parse_date_cell, parse_money_cell};
use crate::columns::{ColumnMap, ContractField};
use crate::error::ImportError;

/// Status of a single imported row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportRowStatus {
    /// Row produced a valid contract.
    Valid,
    /// Row has errors and was not converted.
    Invalid,
}

/// Result for one data row.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRowResult {
    /// The row number (1-based, excluding header).
    pub row_number: usize,
    /// The client name, if the cell was readable.
    pub client: Option<String>,
    /// The parsed contract, when the row is valid.
    pub contract: Option<Contract>,
    /// The row status.
    pub status: ImportRowStatus,
    /// Zero or more error messages, prefixed with the field name.
    pub errors: Vec<String>,
}

/// Result of previewing a contract import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPreview {
    /// Column mapping detected from the header row.
    pub columns: ColumnMap,
    /// Per-row results, in file order.
    pub rows: Vec<ImportRowResult>,
    /// Number of data rows considered (blank rows excluded).
    pub total_rows: usize,
    /// Number of valid rows.
    pub valid_count: usize,
    /// Number of invalid rows.
    pub invalid_count: usize,
}

impl ImportPreview {
    /// Rows that failed to import.
    pub fn invalid_rows(&self) -> impl Iterator<Item = &ImportRowResult> {
        self.rows
            .iter()
            .filter(|row| row.status == ImportRowStatus::Invalid)
    }

    /// Consumes the preview, yielding the valid contracts in file order.
    #[must_use]
    pub fn into_contracts(self) -> Vec<Contract> {
        self.rows
            .into_iter()
            .filter_map(|row| row.contract)
            .collect()
    }
}

/// Reads a single row into a contract, collecting every problem found.
fn parse_row(
    record: &StringRecord,
    columns: &ColumnMap,
    row_number: usize,
) -> Result<Contract, Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    let cell = |field: ContractField| columns.get(field).and_then(|idx| record.get(idx));

    let mut date_field = |field: ContractField| match parse_date_cell(cell(field).unwrap_or("")) {
        Ok(date) => date,
        Err(e) => {
            errors.push(format!("{}: {e}", field.as_str()));
            None
        }
    };

    let start_date = date_field(ContractField::StartDate);
    let end_date = date_field(ContractField::EndDate);

    let client: Option<String> = optional_text(cell(ContractField::Client));
    if client.is_none() {
        errors.push(String::from("client: required field is missing or empty"));
    }

    let yearly_value: f64 = match parse_money_cell(cell(ContractField::YearlyValue).unwrap_or(""))
    {
        Ok(value) => value,
        Err(e) => {
            errors.push(format!("{}: {e}", ContractField::YearlyValue.as_str()));
            0.0
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    let id: ContractId = optional_text(cell(ContractField::Id)).map_or_else(
        || ContractId::new(&format!("row-{row_number}")),
        |id| ContractId::new(&id),
    );

    let contract: Contract = Contract::new(id, client.as_deref().unwrap_or_default())
        .with_dates(start_date, end_date)
        .with_yearly_value(yearly_value)
        .with_billing_label(cell(ContractField::BillingType))
        .with_zone(Zone::from_label(cell(ContractField::Zone)))
        .with_contact(
            optional_text(cell(ContractField::ContactNumber)),
            optional_text(cell(ContractField::Email)),
        );

    validate_contract(&contract).map_err(|e| vec![format!("validation: {e}")])?;

    Ok(contract)
}

/// Previews and validates CSV contract data.
///
/// # Arguments
///
/// * `reader` - Source of CSV bytes with a header row
///
/// # Returns
///
/// * `Ok(ImportPreview)` with per-row validation results
/// * `Err(ImportError)` if the header row is unreadable or lacks required columns
///
/// # Errors
///
/// Returns an error if the CSV headers cannot be read or the client or
/// end-date column cannot be found.
pub fn preview_contracts_from_reader<R: Read>(reader: R) -> Result<ImportPreview, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ImportError::InvalidCsvFormat {
            reason: format!("Failed to read CSV headers: {e}"),
        })?
        .clone();

    let columns: ColumnMap = ColumnMap::detect(headers.iter())?;

    let mut rows: Vec<ImportRowResult> = Vec::new();
    let mut seen_ids: HashSet<ContractId> = HashSet::new();

    for (idx, result) in reader.records().enumerate() {
        let row_number: usize = idx + 1;

        let record: StringRecord = match result {
            Ok(rec) => rec,
            Err(e) => {
                rows.push(ImportRowResult {
                    row_number,
                    client: None,
                    contract: None,
                    status: ImportRowStatus::Invalid,
                    errors: vec![format!("CSV parse error: {e}")],
                });
                continue;
            }
        };

        if record.iter().all(str::is_empty) {
            debug!(row_number, "skipping blank row");
            continue;
        }

        let client: Option<String> = optional_text(
            columns
                .get(ContractField::Client)
                .and_then(|i| record.get(i)),
        );

        let mut row: ImportRowResult = match parse_row(&record, &columns, row_number) {
            Ok(contract) => ImportRowResult {
                row_number,
                client,
                contract: Some(contract),
                status: ImportRowStatus::Valid,
                errors: Vec::new(),
            },
            Err(errors) => ImportRowResult {
                row_number,
                client,
                contract: None,
                status: ImportRowStatus::Invalid,
                errors,
            },
        };

        // Explicit ids must be unique within the file
        if let Some(contract) = &row.contract
            && !seen_ids.insert(contract.id.clone())
        {
            row.errors.push(format!(
                "id: duplicate within CSV - '{}' appears multiple times",
                contract.id
            ));
            row.contract = None;
            row.status = ImportRowStatus::Invalid;
        }

        rows.push(row);
    }

    let valid_count: usize = rows
        .iter()
        .filter(|row| row.status == ImportRowStatus::Valid)
        .count();
    let total_rows: usize = rows.len();
    let invalid_count: usize = total_rows - valid_count;

    info!(
        total_rows,
        valid_count, invalid_count, "contract import preview complete"
    );

    Ok(ImportPreview {
        columns,
        rows,
        total_rows,
        valid_count,
        invalid_count,
    })
}

/// Previews CSV contract data held in memory.
///
/// # Errors
///
/// See `preview_contracts_from_reader`.
pub fn preview_contracts(csv_content: &str) -> Result<ImportPreview, ImportError> {
    preview_contracts_from_reader(csv_content.as_bytes())
}

/// Previews a CSV file on disk.
///
/// # Errors
///
/// Returns `ImportError::Io` if the file cannot be opened, otherwise see
/// `preview_contracts_from_reader`.
pub fn preview_contracts_file(path: &Path) -> Result<ImportPreview, ImportError> {
    let file: std::fs::File = std::fs::File::open(path)?;
    debug!(path = %path.display(), "reading contract file");
    preview_contracts_from_reader(file)
}
