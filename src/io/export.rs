//! CSV export for simulation step results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::StepResult;

/// Column header for CSV step export.
const HEADER: &str = "step,elapsed_hours,action,members,voltage,capacity,charge,\
                      percent,used_hours,recharged_hours,clamps";

/// Exports step results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per step. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `results` - Complete step results
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[StepResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes step results as CSV to any writer.
///
/// An undefined pack voltage is written as an empty field.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[StepResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in results {
        let s = &r.state;
        wtr.write_record(&[
            r.step.to_string(),
            format!("{:.4}", r.elapsed_hours),
            r.action.clone(),
            s.members.to_string(),
            s.voltage.map(|v| format!("{v:.4}")).unwrap_or_default(),
            format!("{:.4}", s.capacity),
            format!("{:.4}", s.charge),
            format!("{:.4}", s.percent),
            format!("{:.4}", r.used_hours),
            format!("{:.4}", r.recharged_hours),
            r.clamps.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
