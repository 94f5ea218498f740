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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod render;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use color_eyre::{
    Result,
    eyre::{Context, bail},
};
use renewals_domain::{
    BillingFrequency, ClassifiedContract, Contract, ContractFilter, PaymentDue, StatusFilter, Zone,
    ZoneGroup, classify_all, group_by_zone, payment_due, summarize,
};
use renewals_import::{ImportPreview, preview_contracts_file};
use serde::Serialize;
use time::{Date, OffsetDateTime, macros::format_description};
use tracing::{debug, info, level_filters::LevelFilter, warn};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

use crate::render::{ContractListing, ZoneReport, render_contract_list, render_zone_report};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(args.log_level().into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match args.run() {
        Ok(output) => {
            print!("{output}");
        }
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Renewals - contract expiry reports from spreadsheet exports
#[derive(Debug, Parser)]
#[command(name = "renewals", author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

impl Args {
    fn run(self) -> Result<String> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Summarize contracts per zone
    #[command(visible_alias = "r")]
    Report {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List contracts with their renewal status
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        source: SourceArgs,

        /// Status to keep: all, attention, active, expiring-soon, recently-expired or expired
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,

        /// Keep only contracts in this zone
        #[arg(short, long)]
        zone: Option<String>,

        /// Case-insensitive text to match against client, zone, email and contact number
        #[arg(long)]
        search: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Compute the amount due per billing period
    #[command(visible_alias = "p")]
    Payment {
        /// Full-year contract value including VAT
        yearly_value: f64,

        /// Billing label, e.g. "monthly" or "Quarterly"; defaults to yearly
        billing_type: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl Command {
    fn run(self) -> Result<String> {
        match self {
            Self::Report { source, format } => {
                let today: Date = source.today();
                let contracts: Vec<ClassifiedContract> =
                    classify_all(&source.load_contracts()?, today);
                report(&contracts, today, format)
            }
            Self::List {
                source,
                status,
                zone,
                search,
                format,
            } => {
                let today: Date = source.today();
                let contracts: Vec<ClassifiedContract> =
                    classify_all(&source.load_contracts()?, today);
                let filter: ContractFilter = ContractFilter {
                    status,
                    zone: zone.as_deref().map(|z| Zone::from_label(Some(z))),
                    search,
                };
                list(&filter.apply(&contracts), today, format)
            }
            Self::Payment {
                yearly_value,
                billing_type,
                format,
            } => payment(yearly_value, billing_type.as_deref(), format),
        }
    }
}

/// Input file and classification options shared by the reporting commands.
#[derive(Debug, Clone, clap::Args)]
struct SourceArgs {
    /// CSV export of the contract spreadsheet
    file: PathBuf,

    /// Classify against this date (YYYY-MM-DD) instead of the local date
    #[arg(long, value_parser = parse_today)]
    today: Option<Date>,

    /// Fail if any row is invalid instead of skipping it
    #[arg(long)]
    strict: bool,
}

impl SourceArgs {
    /// The reference date, read once per invocation.
    fn today(&self) -> Date {
        self.today.unwrap_or_else(|| {
            OffsetDateTime::now_local()
                .unwrap_or_else(|_| OffsetDateTime::now_utc())
                .date()
        })
    }

    fn load_contracts(&self) -> Result<Vec<Contract>> {
        load_contracts(&self.file, self.strict)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Plain-text tables
    Text,
    /// Pretty-printed JSON
    Json,
}

fn parse_today(value: &str) -> Result<Date, String> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("expected a date like 2026-10-19: {e}"))
}

/// Imports contracts from a CSV export.
///
/// Invalid rows are logged and skipped unless `strict` is set.
fn load_contracts(path: &Path, strict: bool) -> Result<Vec<Contract>> {
    let preview: ImportPreview = preview_contracts_file(path)
        .wrap_err_with(|| format!("Failed to import contracts from {}", path.display()))?;

    for row in preview.invalid_rows() {
        warn!(
            row = row.row_number,
            client = row.client.as_deref().unwrap_or("-"),
            errors = %row.errors.join("; "),
            "skipping invalid row"
        );
    }

    if strict && preview.invalid_count > 0 {
        bail!(
            "{} of {} rows in {} are invalid",
            preview.invalid_count,
            preview.total_rows,
            path.display()
        );
    }

    info!(
        file = %path.display(),
        contracts = preview.valid_count,
        skipped = preview.invalid_count,
        "loaded contracts"
    );

    Ok(preview.into_contracts())
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json: String =
        serde_json::to_string_pretty(value).wrap_err("Failed to serialize output")?;
    json.push('\n');
    Ok(json)
}

fn report(contracts: &[ClassifiedContract], today: Date, format: OutputFormat) -> Result<String> {
    let zones: Vec<ZoneGroup> = group_by_zone(contracts);
    let report: ZoneReport<'_> = ZoneReport {
        today,
        summary: summarize(contracts),
        zones: &zones,
    };
    debug!(zones = zones.len(), "grouped contracts by zone");

    match format {
        OutputFormat::Text => Ok(render_zone_report(&report)),
        OutputFormat::Json => to_json(&report),
    }
}

fn list(contracts: &[ClassifiedContract], today: Date, format: OutputFormat) -> Result<String> {
    let listing: ContractListing<'_> = ContractListing::new(today, contracts);

    match format {
        OutputFormat::Text => Ok(render_contract_list(&listing)),
        OutputFormat::Json => to_json(&listing),
    }
}

#[derive(Debug, Serialize)]
struct PaymentOutput {
    yearly_value: f64,
    billing_type: BillingFrequency,
    payment_due: PaymentDue,
}

fn payment(yearly_value: f64, billing_type: Option<&str>, format: OutputFormat) -> Result<String> {
    if !yearly_value.is_finite() || yearly_value < 0.0 {
        bail!("Invalid yearly value: {yearly_value}. Must be a non-negative number");
    }

    let frequency: BillingFrequency = BillingFrequency::normalize(billing_type);
    let due: PaymentDue = payment_due(yearly_value, frequency);

    match format {
        OutputFormat::Text => Ok(format!("{due}\n")),
        OutputFormat::Json => to_json(&PaymentOutput {
            yearly_value,
            billing_type: frequency,
            payment_due: due,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use renewals_domain::ContractStatus;
    use time::macros::date;

    const EXPORT: &str = "\
Client,Contract End Date,Yearly Value,Billing Type,Zone
Acme Security,2026-11-18,1200,Monthly,North
Blue Sky Farms,2026-10-09,500,,South
Old Mill,2025-01-01,100,Quarterly,North
,2027-01-01,100,Yearly,North
";

    fn write_export(name: &str) -> PathBuf {
        let path: PathBuf =
            std::env::temp_dir().join(format!("renewals-{}-{name}.csv", std::process::id()));
        std::fs::write(&path, EXPORT).unwrap();
        path
    }

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_list_arguments() {
        let args: Args = Args::try_parse_from([
            "renewals",
            "list",
            "contracts.csv",
            "--today",
            "2026-10-19",
            "--status",
            "attention",
            "--zone",
            "North",
            "--format",
            "json",
        ])
        .unwrap();

        let Command::List {
            source,
            status,
            zone,
            search,
            format,
        } = args.command
        else {
            panic!("expected list command");
        };

        assert_eq!(source.file, PathBuf::from("contracts.csv"));
        assert_eq!(source.today, Some(date!(2026 - 10 - 19)));
        assert_eq!(source.today(), date!(2026 - 10 - 19));
        assert!(!source.strict);
        assert_eq!(status, StatusFilter::NeedsAttention);
        assert_eq!(zone.as_deref(), Some("North"));
        assert_eq!(search, None);
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(
            Args::try_parse_from(["renewals", "report", "x.csv", "--today", "19/10/2026"]).is_err()
        );
        assert!(Args::try_parse_from(["renewals", "list", "x.csv", "--status", "late"]).is_err());
        assert!(Args::try_parse_from(["renewals", "payment", "lots"]).is_err());
    }

    #[test]
    fn test_load_contracts_skips_invalid_rows() {
        let path: PathBuf = write_export("lenient");
        let contracts: Vec<Contract> = load_contracts(&path, false).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(contracts.len(), 3);
        assert_eq!(contracts[0].client, "Acme Security");
        assert_eq!(contracts[0].billing_type, BillingFrequency::Monthly);
        assert_eq!(contracts[1].billing_type, BillingFrequency::Yearly);
    }

    #[test]
    fn test_load_contracts_strict_rejects_invalid_rows() {
        let path: PathBuf = write_export("strict");
        let err = load_contracts(&path, true).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(err.to_string().starts_with("1 of 4 rows"));
    }

    #[test]
    fn test_load_contracts_missing_file() {
        let path: PathBuf = std::env::temp_dir().join("renewals-does-not-exist.csv");
        assert!(load_contracts(&path, false).is_err());
    }

    #[test]
    fn test_list_command_filters() {
        let path: PathBuf = write_export("list");
        let output: String = Command::List {
            source: SourceArgs {
                file: path.clone(),
                today: Some(date!(2026 - 10 - 19)),
                strict: false,
            },
            status: StatusFilter::NeedsAttention,
            zone: None,
            search: None,
            format: OutputFormat::Json,
        }
        .run()
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        let statuses: Vec<&str> = json["contracts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["status"].as_str().unwrap())
            .collect();
        assert_eq!(
            statuses,
            vec![
                ContractStatus::ExpiringSoon.as_str(),
                ContractStatus::RecentlyExpired.as_str()
            ]
        );
    }

    #[test]
    fn test_report_command_json() {
        let path: PathBuf = write_export("report");
        let output: String = Command::Report {
            source: SourceArgs {
                file: path.clone(),
                today: Some(date!(2026 - 10 - 19)),
                strict: false,
            },
            format: OutputFormat::Json,
        }
        .run()
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["today"], "2026-10-19");
        assert_eq!(json["summary"]["total"], 3);
        assert_eq!(json["summary"]["expired"], 1);
        assert_eq!(json["zones"][0]["zone"], "North");
        assert_eq!(json["zones"][0]["total"], 2);
        assert_eq!(json["zones"][1]["zone"], "South");
        assert_eq!(json["zones"][1]["recently_expired_count"], 1);
    }

    #[test]
    fn test_payment_text() {
        assert_eq!(
            payment(1200.0, Some("Monthly"), OutputFormat::Text).unwrap(),
            "100.00/month\n"
        );
        assert_eq!(
            payment(600.0, None, OutputFormat::Text).unwrap(),
            "600.00/yr\n"
        );
        assert_eq!(
            payment(1000.0, Some("Quarterly"), OutputFormat::Text).unwrap(),
            "250.00/quarter\n"
        );
    }

    #[test]
    fn test_payment_json() {
        let output: String = payment(520.0, Some("weekly"), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["billing_type"], "weekly");
        assert_eq!(json["payment_due"]["label"], "/week");
        assert_eq!(json["payment_due"]["amount"], 10.0);
    }

    #[test]
    fn test_payment_rejects_negative_value() {
        assert!(payment(-1.0, None, OutputFormat::Text).is_err());
        assert!(payment(f64::NAN, None, OutputFormat::Text).is_err());
    }
}
