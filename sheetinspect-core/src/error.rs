//! Error taxonomy for workbook inspection

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures that abort an inspection
#[derive(Debug, Error)]
pub enum InspectError {
    /// The path does not resolve to anything on disk
    #[error("workbook not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The path exists but cannot be opened for reading
    #[error("cannot read workbook {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file could not be parsed as a spreadsheet
    #[error("cannot parse {} as a spreadsheet: {message}", .path.display())]
    Format { path: PathBuf, message: String },
}

impl InspectError {
    /// Classify an I/O failure on `path` into `NotFound` or `Unreadable`
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            InspectError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            InspectError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub fn format(path: &Path, message: impl ToString) -> Self {
        InspectError::Format {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err = InspectError::from_io(
            Path::new("missing.xlsx"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, InspectError::NotFound { .. }));
        assert_eq!(err.to_string(), "workbook not found: missing.xlsx");
    }

    #[test]
    fn test_permission_denied_is_unreadable() {
        let err = InspectError::from_io(
            Path::new("locked.xlsx"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, InspectError::Unreadable { .. }));
        assert!(err.to_string().contains("locked.xlsx"));
    }
}
