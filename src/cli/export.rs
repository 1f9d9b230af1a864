//! CLI command for data export
//!
//! Writes the full, unfiltered record collection to a file or stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use crate::error::{FinboardError, FinboardResult};
use crate::export::{self, ExportFormat};
use crate::services::RecordService;
use crate::storage::Session;

/// Export options
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Export format: csv, json or yaml (defaults to the output extension, else csv)
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Output file path; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Pick the format from an explicit choice, then the file extension
pub fn resolve_format(format: Option<ExportFormat>, output: Option<&Path>) -> ExportFormat {
    format
        .or_else(|| output.and_then(ExportFormat::from_path))
        .unwrap_or_default()
}

/// Write the session in `format` to `writer`
pub fn write_export<W: Write>(
    session: &Session,
    format: ExportFormat,
    writer: &mut W,
) -> FinboardResult<()> {
    match format {
        ExportFormat::Csv => {
            let records = RecordService::new(session).list()?;
            export::export_records_csv(&records, &mut *writer)
        }
        ExportFormat::Json => export::export_full_json(session, writer, true),
        ExportFormat::Yaml => export::export_full_yaml(session, writer),
    }
}

/// Export to `output`, or stdout when no path is given
///
/// Returns a confirmation message when a file was written.
pub fn export_to(
    session: &Session,
    format: ExportFormat,
    output: Option<&Path>,
) -> FinboardResult<Option<String>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FinboardError::Export(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(session, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| FinboardError::Export(e.to_string()))?;

            info!(path = %path.display(), format = %format, "Wrote export file");
            Ok(Some(format!(
                "Exported {} records to: {}",
                session.records.count()?,
                path.display()
            )))
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_export(session, format, &mut handle)?;
            handle
                .flush()
                .map_err(|e| FinboardError::Export(e.to_string()))?;
            Ok(None)
        }
    }
}

/// Handle the export command
pub fn handle_export_command(session: &Session, args: ExportArgs) -> FinboardResult<()> {
    let format = resolve_format(args.format, args.output.as_deref());
    if let Some(message) = export_to(session, format, args.output.as_deref())? {
        println!("{}", message);
    }
    Ok(())
}
