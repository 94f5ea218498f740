// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the import boundary.

use thiserror::Error;

/// Import errors.
///
/// File-level problems abort the import. Cell-level problems are reported
/// per row and only mark that row invalid.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be read.
    #[error("Failed to read import file: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV structure is unusable.
    #[error("Invalid CSV format: {reason}")]
    InvalidCsvFormat { reason: String },

    /// Columns required to build a contract were not found in the header row.
    #[error("Missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<&'static str> },

    /// A date cell is neither a spreadsheet serial nor a recognized date format.
    #[error("unrecognized date '{value}'")]
    InvalidDate { value: String },

    /// A money cell is not a number.
    #[error("invalid amount '{value}'")]
    InvalidAmount { value: String },

    /// A money cell is negative.
    #[error("amount '{value}' must not be negative")]
    NegativeAmount { value: String },
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::InvalidCsvFormat {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_display() {
        let err: ImportError = ImportError::MissingColumns {
            columns: vec!["client", "end date"],
        };
        assert_eq!(err.to_string(), "Missing required columns: client, end date");
    }

    #[test]
    fn test_cell_error_display() {
        let err: ImportError = ImportError::InvalidDate {
            value: String::from("next tuesday"),
        };
        assert_eq!(err.to_string(), "unrecognized date 'next tuesday'");

        let err: ImportError = ImportError::NegativeAmount {
            value: String::from("-10"),
        };
        assert_eq!(err.to_string(), "amount '-10' must not be negative");
    }
}
