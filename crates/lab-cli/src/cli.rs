//! CLI argument definitions for the laboratory report consolidator.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "lab-report",
    version,
    about = "Consolidate laboratory result workbooks into a single per-visit report",
    long_about = "Consolidate laboratory result workbooks into a single per-visit report.\n\n\
                  Keeps outpatient (consulta externa) and general emergency (urgencia general)\n\
                  rows, pivots one row per person and visit date, and writes the REPORTE sheet."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient values (names, dates) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Consolidate every sheet of a workbook into one report.
    Consolidate(ConsolidateArgs),

    /// List the report columns and the study/test keys they accept.
    Schema,
}

#[derive(Parser)]
pub struct ConsolidateArgs {
    /// Workbook to read (xlsx, xlsm, xls, xlsb, ods).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (default: <INPUT stem>_REPORTE_UNICO.<format> next to the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output file format.
    #[arg(long = "format", value_enum, default_value = "xlsx")]
    pub format: ExportFormatArg,

    /// Date used to compute ages (default: today).
    #[arg(long = "reference-date", value_name = "YYYY-MM-DD", value_parser = parse_reference_date)]
    pub reference_date: Option<NaiveDate>,

    /// Consolidate and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the first N report rows (80 when N is omitted).
    #[arg(
        long = "preview-rows",
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "80"
    )]
    pub preview_rows: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Xlsx,
    Csv,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_reference_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|error| format!("expected YYYY-MM-DD: {error}"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn preview_flag_without_value_defaults_to_80() {
        let cli = Cli::try_parse_from(["lab-report", "consolidate", "in.xlsx", "--preview-rows"])
            .expect("parse");
        let Command::Consolidate(args) = cli.command else {
            panic!("expected consolidate");
        };
        assert_eq!(args.preview_rows, Some(80));
        assert!(!args.dry_run);
        assert!(args.reference_date.is_none());
    }

    #[test]
    fn reference_date_must_be_iso() {
        let parsed = Cli::try_parse_from([
            "lab-report",
            "consolidate",
            "in.xlsx",
            "--reference-date",
            "2024-06-30",
        ])
        .expect("parse");
        let Command::Consolidate(args) = parsed.command else {
            panic!("expected consolidate");
        };
        assert_eq!(args.reference_date, NaiveDate::from_ymd_opt(2024, 6, 30));

        let rejected = Cli::try_parse_from([
            "lab-report",
            "consolidate",
            "in.xlsx",
            "--reference-date",
            "30/06/2024",
        ]);
        assert!(rejected.is_err());
    }
}
