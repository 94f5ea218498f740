// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Spreadsheet import boundary for renewal contracts.
//!
//! Converts CSV exports into validated domain contracts. Header names are
//! matched fuzzily and date cells may be spreadsheet serials or text.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod cells;
mod columns;
mod error;
mod preview;

pub use cells::{parse_date_cell, parse_money_cell, serial_to_date};
pub use columns::{ColumnMap, ContractField, normalize_header};
pub use error::ImportError;
pub use preview::{
    ImportPreview, ImportRowResult, ImportRowStatus, preview_contracts,
    preview_contracts_file, preview_contracts_from_reader,
};
