//! Writes one BEDGRAPH track per sample column of a peak value table.
//!
//! ```shell
//! peaks-to-bedgraph dynamic_peaks_x_stage.tsv dynamic_peaks.bed
//! ```
//!
//! Every column of the value table other than `peak_id` is joined against the
//! peak annotation and written as `<column>.bedgraph` next to the value table.

use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use peaks2bedgraph::emit;
use peaks2bedgraph::emit::Emission;
use peaks2bedgraph::input;
use tracing::debug;
use tracing::info;
use tracing::warn;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

/// Splits a per-peak value table into BEDGRAPH tracks.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// The tab-delimited value table (with a `peak_id` column). The tracks are
    /// written to the directory containing this file.
    value_table: PathBuf,

    /// The headerless, tab-delimited peak annotation (chromosome, start, end,
    /// peak id).
    annotation: PathBuf,

    #[command(flatten)]
    verbose: Verbosity,
}

/// Loads both tables and writes every track.
fn convert(value_table: &Path, annotation: &Path) -> Result<()> {
    let values = input::read_value_table(value_table).context("loading the value table")?;
    info!(
        "value table: {} peaks, {} columns",
        values.len(),
        values.columns().len()
    );

    let annotation =
        input::read_annotation_table(annotation).context("loading the peak annotation")?;
    info!("annotation: {} peaks", annotation.len());

    let output_dir = emit::output_directory(value_table);
    info!("output directory: {}", output_dir.display());

    for result in emit::emit_columns(&values, &annotation, &output_dir) {
        match result.context("writing BEDGRAPH track")? {
            Emission::Skipped => {}
            Emission::Written(report) => {
                info!(
                    "{}: wrote {} records to {}",
                    report.column(),
                    report.records(),
                    report.path().display()
                );

                if !report.unmatched().is_empty() {
                    warn!(
                        "{}: dropped {} peak(s) with no annotation",
                        report.column(),
                        report.unmatched().len()
                    );
                    debug!(
                        "{}: unannotated peaks: {}",
                        report.column(),
                        report.unmatched().join(", ")
                    );
                }
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    convert(&args.value_table, &args.annotation)
}
