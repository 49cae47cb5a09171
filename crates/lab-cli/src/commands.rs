use std::time::Instant;

use anyhow::Result;
use comfy_table::Table;
use tracing::info;

use lab_cli::pipeline::{consolidate, export};
use lab_model::{KEY_SEPARATOR, PipelineOptions, REPORT_SCHEMA};
use lab_output::{ExportFormat, ExportOptions, default_output_path};

use crate::cli::{ConsolidateArgs, ExportFormatArg};
use crate::summary::apply_table_style;
use crate::types::ConsolidateResult;

pub fn run_schema() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Accepted keys"]);
    apply_table_style(&mut table);
    for column in REPORT_SCHEMA {
        let keys = column
            .aliases
            .iter()
            .map(|(study, test)| format!("{study}{KEY_SEPARATOR}{test}"))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![column.name.to_string(), keys]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_consolidate(args: &ConsolidateArgs) -> Result<ConsolidateResult> {
    let start = Instant::now();
    let options = match args.reference_date {
        Some(date) => PipelineOptions::new().with_reference_date(date),
        None => PipelineOptions::new(),
    };
    let export_options = ExportOptions::new(export_format(args.format));

    let report = consolidate(&args.input, &options)?;

    let output = if args.dry_run {
        info!("dry run, skipping export");
        None
    } else {
        let target = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.input, export_options.format));
        Some(export(&report, &target, &export_options)?)
    };

    Ok(ConsolidateResult {
        report,
        output,
        preview_rows: args.preview_rows,
        elapsed: start.elapsed(),
    })
}

fn export_format(format: ExportFormatArg) -> ExportFormat {
    match format {
        ExportFormatArg::Xlsx => ExportFormat::Xlsx,
        ExportFormatArg::Csv => ExportFormat::Csv,
    }
}
