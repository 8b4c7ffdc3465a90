use std::io::{self, Write};

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use tracing::info_span;

use resist_core::load_associations;
use resist_ingest::SourceFile;

use crate::cli::RunArgs;

/// Streams associations from the data folder, printing each record as one
/// JSON line unless `--count-only` is set. Returns the record count.
pub fn run_pipeline(args: &RunArgs) -> Result<u64> {
    let span = info_span!("run", data_folder = %args.data_folder.display());
    let _guard = span.enter();

    let stream = load_associations(&args.data_folder).context("load reference tables")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut count = 0u64;
    for record in stream {
        let record = record?;
        if !args.count_only {
            let line = serde_json::to_string(&record).context("serialize association")?;
            writeln!(out, "{line}").context("write record")?;
        }
        count += 1;
    }
    Ok(count)
}

/// Prints the fixed source-table catalogue.
pub fn run_files() -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table.set_header(vec!["File", "Role"]);
    for source in SourceFile::ALL {
        table.add_row(vec![source.file_name(), source.describe()]);
    }
    println!("{table}");
    Ok(())
}
