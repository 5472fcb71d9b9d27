//! Utility functions for error handling
//!
//! Opening input files with errors that name the offending path.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{DashboardError, Result};

/// Open a file, distinguishing a missing file from one that cannot be read
///
/// # Arguments
/// * `path` - The path to the file to open
pub fn safe_open_file(path: &Path) -> Result<fs::File> {
    if !path.exists() {
        return Err(DashboardError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    if !path.is_file() {
        return Err(DashboardError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path is not a file"),
        });
    }

    fs::File::open(path).map_err(|source| match source.kind() {
        // Deleted between the existence check and the open
        io::ErrorKind::NotFound => DashboardError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => DashboardError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
