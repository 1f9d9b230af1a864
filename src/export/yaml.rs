//! YAML Export functionality
//!
//! Same document as the JSON export, in a human-readable form.

use std::io::Write;

use tracing::info;

use crate::error::{FinboardError, FinboardResult};
use crate::export::json::FullExport;
use crate::storage::Session;

/// Export the session to YAML format
pub fn export_full_yaml<W: Write>(session: &Session, writer: &mut W) -> FinboardResult<()> {
    let export = FullExport::from_session(session)?;

    writeln!(writer, "# finboard record export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .and_then(|_| writeln!(writer, "# App Version: {}", export.app_version))
        .and_then(|_| writeln!(writer))
        .map_err(|e| FinboardError::Export(e.to_string()))?;

    serde_yaml::to_writer(&mut *writer, &export)?;

    info!(count = export.records.len(), "Exported records to YAML");
    Ok(())
}

/// Read a YAML export back
pub fn import_from_yaml(yaml_str: &str) -> FinboardResult<FullExport> {
    let export: FullExport = serde_yaml::from_str(yaml_str)?;

    export.validate().map_err(FinboardError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_export() {
        let session = Session::with_sample_data().unwrap();
        let mut buffer = Vec::new();
        export_full_yaml(&session, &mut buffer).unwrap();

        let yaml = String::from_utf8(buffer).unwrap();
        assert!(yaml.starts_with("# finboard record export"));
        assert!(yaml.contains("schema_version"));
        assert!(yaml.contains("Groceries"));

        let imported = import_from_yaml(&yaml).unwrap();
        assert_eq!(imported.records.len(), 2);
        assert_eq!(imported.records[0].description, "Salary");
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            import_from_yaml("schema_version: [1, 2"),
            Err(FinboardError::Yaml(_))
        ));
    }
}
