//! Schema registry document and the column-count check.
//!
//! The schema is an ordered list of expected column names with declared
//! types, loaded once per validation run from a YAML document of the form:
//!
//! ```yaml
//! columns:
//!   - age: int64
//!   - income: float64
//!   - segment: string
//! ```

use polars::prelude::DataFrame;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{Result, ValidationError};

/// One expected column: its name and declared type tag.
///
/// The type tag is carried through for reporting but is not enforced by
/// the column check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaColumn {
    /// Column name as it appears in the dataset header.
    pub name: String,
    /// Declared type tag from the schema document (e.g. `int64`).
    pub dtype: String,
}

/// Ordered set of expected columns, immutable once loaded.
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<SchemaColumn>,
}

/// On-disk shape of the schema document. Each list entry is a single-key
/// mapping `name: type`.
#[derive(Debug, Deserialize)]
struct SchemaDocument {
    columns: Vec<BTreeMap<String, String>>,
}

impl Schema {
    /// Load a schema from a YAML document.
    ///
    /// Fails fast with a configuration error on a missing file, malformed
    /// YAML, an empty `columns` list, or a list entry that is not exactly
    /// one `name: type` pair. A partially loaded schema is never returned.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ValidationError::SchemaLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let doc: SchemaDocument =
            serde_yaml::from_str(&raw).map_err(|e| ValidationError::SchemaLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let schema = Self::from_document(doc).map_err(|reason| ValidationError::SchemaLoad {
            path: path.to_path_buf(),
            reason,
        })?;

        info!(
            "Loaded schema from {}: {} columns",
            path.display(),
            schema.len()
        );
        Ok(schema)
    }

    fn from_document(doc: SchemaDocument) -> std::result::Result<Self, String> {
        if doc.columns.is_empty() {
            return Err("schema declares no columns".to_string());
        }

        let mut columns = Vec::with_capacity(doc.columns.len());
        for (idx, entry) in doc.columns.into_iter().enumerate() {
            let mut pairs = entry.into_iter();
            let (name, dtype) = match (pairs.next(), pairs.next()) {
                (Some(pair), None) => pair,
                _ => {
                    return Err(format!(
                        "column entry {idx} must be a single `name: type` pair"
                    ));
                }
            };
            columns.push(SchemaColumn { name, dtype });
        }

        Ok(Self { columns })
    }

    /// Number of expected columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema declares no columns. Cannot occur for a schema
    /// loaded through [`Schema::from_path`].
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Expected columns in declaration order.
    pub fn columns(&self) -> &[SchemaColumn] {
        &self.columns
    }

    /// Check a dataset's column count against the schema.
    ///
    /// Returns `true` iff the dataset has exactly as many columns as the
    /// schema declares. Column names and order are NOT compared; a frame
    /// with the right count but different names passes. This is a known
    /// weak check that downstream consumers rely on, so it stays
    /// cardinality-only.
    ///
    /// Pure: no side effects beyond logging.
    pub fn validate_columns(&self, df: &DataFrame) -> bool {
        let expected = self.len();
        let actual = df.width();
        info!("Schema expects {expected} columns, dataset has {actual}");

        if actual == expected {
            true
        } else {
            warn!("Column count mismatch: expected {expected}, got {actual}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use std::io::Write;

    fn write_schema(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_schema() {
        let file = write_schema("columns:\n  - age: int64\n  - income: float64\n");
        let schema = Schema::from_path(file.path()).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.columns()[0].name, "age");
        assert_eq!(schema.columns()[1].dtype, "float64");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Schema::from_path("does/not/exist.yaml").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Configuration);
    }

    #[test]
    fn test_empty_columns_rejected() {
        let file = write_schema("columns: []\n");
        assert!(Schema::from_path(file.path()).is_err());
    }

    #[test]
    fn test_multi_key_entry_rejected() {
        let file = write_schema("columns:\n  - age: int64\n    income: float64\n");
        assert!(Schema::from_path(file.path()).is_err());
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let file = write_schema("columns: {not a list\n");
        assert!(Schema::from_path(file.path()).is_err());
    }

    #[test]
    fn test_validate_columns_count_match() {
        let file = write_schema("columns:\n  - a: int64\n  - b: int64\n");
        let schema = Schema::from_path(file.path()).unwrap();

        let df = df!("a" => [1, 2], "b" => [3, 4]).unwrap();
        assert!(schema.validate_columns(&df));
    }

    #[test]
    fn test_validate_columns_count_mismatch() {
        let file = write_schema("columns:\n  - a: int64\n  - b: int64\n");
        let schema = Schema::from_path(file.path()).unwrap();

        let df = df!("a" => [1, 2]).unwrap();
        assert!(!schema.validate_columns(&df));
    }

    #[test]
    fn test_validate_columns_ignores_names() {
        // Right count, entirely different names: still passes. The
        // check compares cardinality only.
        let file = write_schema("columns:\n  - a: int64\n  - b: int64\n");
        let schema = Schema::from_path(file.path()).unwrap();

        let df = df!("x" => [1.0, 2.0], "y" => [3.0, 4.0]).unwrap();
        assert!(schema.validate_columns(&df));
    }
}
