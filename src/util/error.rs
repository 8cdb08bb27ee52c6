// IRLogView - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error keeps its causal chain for
// diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all IRLogView operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum IrLogViewError {
    /// Reading or decoding a log file failed.
    Decode(DecodeError),

    /// A query against the log service was rejected or failed.
    Query(QueryError),

    /// Filter construction failed.
    Filter(FilterError),

    /// Export operation failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for IrLogViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "Decode error: {e}"),
            Self::Query(e) => write!(f, "Query error: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for IrLogViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            Self::Query(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Decode errors
// ---------------------------------------------------------------------------

/// Errors raised while reading a log file and recovering its text.
#[derive(Debug)]
pub enum DecodeError {
    /// The file does not exist.
    FileNotFound { path: PathBuf },

    /// Every configured encoding rejected the file content.
    EncodingUnreadable {
        path: PathBuf,
        tried: Vec<&'static str>,
    },

    /// Any other I/O failure (permissions, is-a-directory, truncation).
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path } => {
                write!(f, "File not found: '{}'", path.display())
            }
            Self::EncodingUnreadable { path, tried } => write!(
                f,
                "Cannot decode '{}' with any of [{}]",
                path.display(),
                tried.join(", ")
            ),
            Self::Io { path, source } => {
                write!(f, "Error reading '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DecodeError> for IrLogViewError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

/// Errors surfaced to a transport by `app::service::LogService`.
#[derive(Debug)]
pub enum QueryError {
    /// Relative path is empty, absolute, or contains a parent-directory
    /// segment. Raised before any filesystem access.
    InvalidPath { path: String },

    /// The requested file does not exist under the root.
    FileNotFound { path: String },

    /// The requested file exists but cannot be read (permissions).
    FileNotReadable { path: String, source: io::Error },

    /// Any unexpected fault, wrapped with its message.
    Server { message: String },
}

impl QueryError {
    /// HTTP-style status code for transports that speak HTTP.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPath { .. } => 400,
            Self::FileNotReadable { .. } => 403,
            Self::FileNotFound { .. } => 404,
            Self::Server { .. } => 500,
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPath { path } => write!(f, "Invalid path: '{path}'"),
            Self::FileNotFound { path } => write!(f, "File not found: {path}"),
            Self::FileNotReadable { path, source } => {
                write!(f, "File not readable: {path}: {source}")
            }
            Self::Server { message } => write!(f, "Server error: {message}"),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileNotReadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<QueryError> for IrLogViewError {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to filter operations.
#[derive(Debug)]
pub enum FilterError {
    /// User-provided regex is invalid.
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex { pattern, source } => {
                write!(f, "Invalid filter regex '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
        }
    }
}

impl From<FilterError> for IrLogViewError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error flushing the export writer.
    Io { target: String, source: io::Error },

    /// CSV serialisation error.
    Csv { target: String, source: csv::Error },

    /// JSON serialisation error.
    Json {
        target: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { target, source } => {
                write!(f, "Export I/O error '{target}': {source}")
            }
            Self::Csv { target, source } => {
                write!(f, "CSV export error '{target}': {source}")
            }
            Self::Json { target, source } => {
                write!(f, "JSON export error '{target}': {source}")
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for IrLogViewError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for IRLogView results.
pub type Result<T> = std::result::Result<T, IrLogViewError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_query_error_status_codes() {
        assert_eq!(
            QueryError::InvalidPath {
                path: "../x".to_string()
            }
            .status_code(),
            400
        );
        assert_eq!(
            QueryError::FileNotFound {
                path: "a.log".to_string()
            }
            .status_code(),
            404
        );
        assert_eq!(
            QueryError::FileNotReadable {
                path: "a.log".to_string(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            }
            .status_code(),
            403
        );
        assert_eq!(
            QueryError::Server {
                message: "boom".to_string()
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn test_top_level_error_preserves_source_chain() {
        let inner = DecodeError::Io {
            path: PathBuf::from("x.log"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        let err: IrLogViewError = inner.into();
        let decode = err.source().expect("decode source");
        assert!(decode.source().is_some(), "io::Error should be reachable");
        assert!(err.to_string().starts_with("Decode error: Error reading 'x.log'"));
    }

    #[test]
    fn test_encoding_unreadable_lists_tried_encodings() {
        let err = DecodeError::EncodingUnreadable {
            path: PathBuf::from("x.log"),
            tried: vec!["UTF-8", "GBK"],
        };
        assert_eq!(err.to_string(), "Cannot decode 'x.log' with any of [UTF-8, GBK]");
    }
}
