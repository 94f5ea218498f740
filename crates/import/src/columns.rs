// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fuzzy mapping of spreadsheet headers to contract fields.
//!
//! Exported spreadsheets use whatever column names the person who built them
//! chose ("Contract End Date", "Renewal date", `expiry_date`, ...). Headers
//! are normalized and matched by keyword rather than by exact name.

use crate::error::ImportError;
use tracing::debug;

/// A contract field that can be read from a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractField {
    /// Explicit row identifier.
    Id,
    /// Contract start date.
    StartDate,
    /// Contract end date.
    EndDate,
    /// Contact email address.
    Email,
    /// Contact telephone number.
    ContactNumber,
    /// Billing frequency label.
    BillingType,
    /// Reporting zone.
    Zone,
    /// Yearly contract value.
    YearlyValue,
    /// Client display name.
    Client,
}

impl ContractField {
    /// Fields in matching priority order.
    ///
    /// A header is assigned to the first field whose rule it satisfies, so
    /// "Client Email" is an email column and "Contract End Date" is never
    /// mistaken for a value column.
    const PRIORITY: [Self; 9] = [
        Self::Id,
        Self::StartDate,
        Self::EndDate,
        Self::Email,
        Self::ContactNumber,
        Self::BillingType,
        Self::Zone,
        Self::YearlyValue,
        Self::Client,
    ];

    /// Human-readable field name used in messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::StartDate => "start date",
            Self::EndDate => "end date",
            Self::Email => "email",
            Self::ContactNumber => "contact number",
            Self::BillingType => "billing type",
            Self::Zone => "zone",
            Self::YearlyValue => "yearly value",
            Self::Client => "client",
        }
    }

    fn matches(self, header: &str) -> bool {
        let has = |needle: &str| header.contains(needle);
        let has_word = |word: &str| header.split(' ').any(|w| w == word);
        let is_date: bool = has("date");
        let is_periodic: bool = has("monthly") || has("quarterly") || has("weekly");

        match self {
            Self::Id => header == "id",
            Self::StartDate => has("start") && is_date,
            Self::EndDate => is_date && (has("end") || has("expiry") || has("renewal")),
            Self::Email => has("email") || has("e mail"),
            Self::ContactNumber => {
                has("contact") || has("phone") || has_word("tel") || has_word("cell")
            }
            Self::BillingType => {
                has("frequency") || (has("billing") && !has("value") && !has("amount"))
            }
            Self::Zone => has("zone") || has("region") || has("area"),
            Self::YearlyValue => {
                !is_date
                    && !is_periodic
                    && (has("value") || has("amount") || has("yearly") || has("annual"))
            }
            Self::Client => {
                has("client") || has("customer") || has("company") || header == "name"
            }
        }
    }
}

/// Normalizes a header for keyword matching.
///
/// Lowercases, treats `_` and `-` as spaces, and collapses whitespace.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Column positions of each contract field in a header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub id: Option<usize>,
    pub client: Option<usize>,
    pub start_date: Option<usize>,
    pub end_date: Option<usize>,
    pub yearly_value: Option<usize>,
    pub billing_type: Option<usize>,
    pub zone: Option<usize>,
    pub contact_number: Option<usize>,
    pub email: Option<usize>,
}

impl ColumnMap {
    /// Detects contract columns from a header row.
    ///
    /// The first column matching a field wins; later matches are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::MissingColumns` if no client or end-date column
    /// is found.
    pub fn detect<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self, ImportError> {
        let mut map: Self = Self::default();

        for (idx, raw) in headers.into_iter().enumerate() {
            let header: String = normalize_header(raw);
            if header.is_empty() {
                continue;
            }

            let Some(field) = ContractField::PRIORITY
                .into_iter()
                .find(|field| field.matches(&header))
            else {
                debug!(column = idx, header = raw, "ignoring unrecognized column");
                continue;
            };

            let slot: &mut Option<usize> = map.slot_mut(field);
            if slot.is_none() {
                debug!(column = idx, header = raw, field = field.as_str(), "mapped column");
                *slot = Some(idx);
            } else {
                debug!(
                    column = idx,
                    header = raw,
                    field = field.as_str(),
                    "ignoring duplicate column"
                );
            }
        }

        let mut missing: Vec<&'static str> = Vec::new();
        if map.client.is_none() {
            missing.push(ContractField::Client.as_str());
        }
        if map.end_date.is_none() {
            missing.push(ContractField::EndDate.as_str());
        }

        if !missing.is_empty() {
            return Err(ImportError::MissingColumns { columns: missing });
        }

        Ok(map)
    }

    /// Returns the column index of a field, if mapped.
    #[must_use]
    pub const fn get(&self, field: ContractField) -> Option<usize> {
        match field {
            ContractField::Id => self.id,
            ContractField::StartDate => self.start_date,
            ContractField::EndDate => self.end_date,
            ContractField::Email => self.email,
            ContractField::ContactNumber => self.contact_number,
            ContractField::BillingType => self.billing_type,
            ContractField::Zone => self.zone,
            ContractField::YearlyValue => self.yearly_value,
            ContractField::Client => self.client,
        }
    }

    const fn slot_mut(&mut self, field: ContractField) -> &mut Option<usize> {
        match field {
            ContractField::Id => &mut self.id,
            ContractField::StartDate => &mut self.start_date,
            ContractField::EndDate => &mut self.end_date,
            ContractField::Email => &mut self.email,
            ContractField::ContactNumber => &mut self.contact_number,
            ContractField::BillingType => &mut self.billing_type,
            ContractField::Zone => &mut self.zone,
            ContractField::YearlyValue => &mut self.yearly_value,
            ContractField::Client => &mut self.client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Contract_End-Date "), "contract end date");
        assert_eq!(normalize_header("Yearly   Value"), "yearly value");
        assert_eq!(normalize_header("E-Mail"), "e mail");
    }

    #[test]
    fn test_detect_typical_export() {
        let map: ColumnMap = ColumnMap::detect([
            "Client",
            "Contract Start Date",
            "Contract End Date",
            "Yearly Value (incl VAT)",
            "Billing Type",
            "Zone",
            "Contact Number",
            "Email",
        ])
        .unwrap();

        assert_eq!(map.client, Some(0));
        assert_eq!(map.start_date, Some(1));
        assert_eq!(map.end_date, Some(2));
        assert_eq!(map.yearly_value, Some(3));
        assert_eq!(map.billing_type, Some(4));
        assert_eq!(map.zone, Some(5));
        assert_eq!(map.contact_number, Some(6));
        assert_eq!(map.email, Some(7));
        assert_eq!(map.id, None);
    }

    #[test]
    fn test_detect_alternative_names() {
        let map: ColumnMap = ColumnMap::detect([
            "id",
            "customer_name",
            "renewal_date",
            "annual amount",
            "payment frequency",
            "region",
            "client e-mail",
            "cell",
        ])
        .unwrap();

        assert_eq!(map.id, Some(0));
        assert_eq!(map.client, Some(1));
        assert_eq!(map.end_date, Some(2));
        assert_eq!(map.yearly_value, Some(3));
        assert_eq!(map.billing_type, Some(4));
        assert_eq!(map.zone, Some(5));
        assert_eq!(map.email, Some(6));
        assert_eq!(map.contact_number, Some(7));
    }

    #[test]
    fn test_first_matching_column_wins() {
        let map: ColumnMap =
            ColumnMap::detect(["Client", "End Date", "Expiry Date", "Company"]).unwrap();
        assert_eq!(map.end_date, Some(1));
        assert_eq!(map.client, Some(0));
    }

    #[test]
    fn test_missing_required_columns() {
        let err: ImportError = ColumnMap::detect(["Zone", "Value"]).unwrap_err();
        assert!(matches!(
            err,
            ImportError::MissingColumns { ref columns } if columns == &vec!["client", "end date"]
        ));
    }

    #[test]
    fn test_short_contact_keywords_match_whole_words() {
        let map: ColumnMap =
            ColumnMap::detect(["Client", "Cancelled Date", "End Date", "Tel No", "Hotel"]).unwrap();
        assert_eq!(map.contact_number, Some(3));
        assert_eq!(map.end_date, Some(2));
    }

    #[test]
    fn test_periodic_amounts_are_not_yearly_values() {
        let map: ColumnMap = ColumnMap::detect([
            "Client",
            "End Date",
            "Monthly Amount",
            "Quarterly value",
            "Annual Value",
        ])
        .unwrap();
        assert_eq!(map.yearly_value, Some(4));
    }

    #[test]
    fn test_unrecognized_columns_are_ignored() {
        let map: ColumnMap =
            ColumnMap::detect(["Notes", "Client", "", "End Date", "Sales Rep"]).unwrap();
        assert_eq!(map.client, Some(1));
        assert_eq!(map.end_date, Some(3));
        assert_eq!(map.get(ContractField::Zone), None);
    }
}
