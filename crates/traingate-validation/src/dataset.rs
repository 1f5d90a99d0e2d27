//! Dataset file I/O.
//!
//! Datasets are delimited files with a header row, read into a
//! [`DataFrame`] for the duration of one validation call and discarded
//! afterwards. File handles are scoped so they are released on every exit
//! path, including errors.

use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use tracing::debug;

use crate::error::{Result, ValidationError};

/// Read a CSV dataset with a header row.
///
/// Any failure (missing file, malformed CSV) is an I/O-category error
/// carrying the offending path.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| ValidationError::Dataset {
            path: path.to_path_buf(),
            source: e,
        })?;

    debug!(
        "Read dataset {}: {} rows x {} columns",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Write a dataset as CSV with a header row, creating parent directories
/// on demand.
pub fn write_dataset(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ValidationError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(path).map_err(|e| ValidationError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(df)
        .map_err(|e| ValidationError::Dataset {
            path: path.to_path_buf(),
            source: e,
        })?;

    debug!("Wrote dataset {}", path.display());
    Ok(())
}
