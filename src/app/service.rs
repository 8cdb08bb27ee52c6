// IRLogView - app/service.rs
//
// Query interface consumed by transports (the CLI today). Wires the core
// components together from a validated `AppConfig` and maps failures onto the
// `QueryError` taxonomy.
//
// Stateless: every call re-runs its own discover/read/classify sequence, so a
// shared `LogService` can serve concurrent callers without coordination.

use crate::core::catalog::{CatalogConfig, FileCatalog, ModuleTable};
use crate::core::classifier;
use crate::core::decoder::{self, ContentDecoder};
use crate::core::model::{LogFileDescriptor, LogRecord, SuspiciousItem};
use crate::core::suspicious::SuspiciousItemScanner;
use crate::platform::config::AppConfig;
use crate::util::error::{DecodeError, QueryError};
use crate::util::paths::{resolve_under, sanitize_relative};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

/// Everything an index view needs in one payload.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub files: Vec<LogFileDescriptor>,
    pub suspicious_items: Vec<SuspiciousItem>,
}

#[derive(Debug, Clone)]
pub struct LogService {
    root_dir: PathBuf,
    temp_dir: PathBuf,
    catalog: FileCatalog,
    decoder: ContentDecoder,
    scanner: SuspiciousItemScanner,
}

impl LogService {
    /// Build a service rooted at `root_dir` using `config` for everything else.
    pub fn new(root_dir: PathBuf, config: &AppConfig) -> Self {
        let mut modules = ModuleTable::default();
        for (token, name) in &config.module_names {
            modules.insert(token.clone(), name.clone());
        }

        let catalog = FileCatalog::new(CatalogConfig {
            results_dir: resolve_under(&root_dir, &config.results_dir),
            root_dir: root_dir.clone(),
            main_log_prefix: config.main_log_prefix.clone(),
            log_extension: config.log_extension.clone(),
            modules,
        });

        tracing::debug!(
            root = %root_dir.display(),
            encodings = ?config.encodings.iter().map(|e| e.name()).collect::<Vec<_>>(),
            "Log service configured"
        );

        Self {
            temp_dir: resolve_under(&root_dir, &config.temp_dir),
            root_dir,
            catalog,
            decoder: ContentDecoder::new(config.encodings.clone()),
            scanner: SuspiciousItemScanner::new(
                config.suspicious_prefix.clone(),
                config.suspicious_extension.clone(),
            ),
        }
    }

    /// Service with default naming under `root_dir`.
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self::new(root_dir.into(), &AppConfig::default())
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// List files: the catalog listing, newest first.
    pub fn list_files(&self) -> Vec<LogFileDescriptor> {
        let files = self.catalog.discover();
        tracing::info!(files = files.len(), "Listed log files");
        files
    }

    /// Get file content: decode and classify the file at `relative_path`.
    ///
    /// # Errors
    /// - `InvalidPath` for empty, absolute or `..`-bearing paths, before any
    ///   filesystem access.
    /// - `FileNotFound` / `FileNotReadable` keyed to `relative_path`.
    /// - `Server` for any other failure to stat the file.
    ///
    /// Failures after the file has been found and opened (exhausted
    /// encodings, reading a directory) come back as a single
    /// `LogRecord::ErrorLine` rather than an error.
    pub fn file_content(&self, relative_path: &str) -> Result<Vec<LogRecord>, QueryError> {
        let rel = sanitize_relative(relative_path).ok_or_else(|| {
            tracing::warn!(path = relative_path, "Rejected log path");
            QueryError::InvalidPath {
                path: relative_path.to_string(),
            }
        })?;
        let full_path = self.root_dir.join(rel);

        if let Err(e) = std::fs::metadata(&full_path) {
            return Err(stat_error(relative_path, e));
        }

        let records = match self.decoder.read(&full_path) {
            Ok(decoded) => {
                tracing::debug!(
                    path = relative_path,
                    encoding = decoded.encoding,
                    lines = decoded.lines.len(),
                    "Log file decoded"
                );
                classifier::classify_lines(&decoded.lines)
            }
            Err(DecodeError::FileNotFound { .. }) => {
                return Err(QueryError::FileNotFound {
                    path: relative_path.to_string(),
                });
            }
            Err(DecodeError::Io { source, .. }) if source.kind() == io::ErrorKind::PermissionDenied => {
                return Err(QueryError::FileNotReadable {
                    path: relative_path.to_string(),
                    source,
                });
            }
            Err(e) => {
                tracing::warn!(path = relative_path, error = %e, "Log file could not be decoded");
                vec![decoder::failure_record(&e)]
            }
        };

        tracing::info!(path = relative_path, records = records.len(), "Classified log file");
        Ok(records)
    }

    /// List suspicious items from the temp directory, in listing order.
    pub fn suspicious_items(&self) -> Vec<SuspiciousItem> {
        let items = self.scanner.scan(&self.temp_dir);
        tracing::info!(items = items.len(), "Listed suspicious items");
        items
    }

    /// File listing and suspicious items together.
    pub fn overview(&self) -> Overview {
        Overview {
            files: self.list_files(),
            suspicious_items: self.suspicious_items(),
        }
    }
}

fn stat_error(relative_path: &str, e: io::Error) -> QueryError {
    match e.kind() {
        io::ErrorKind::NotFound => QueryError::FileNotFound {
            path: relative_path.to_string(),
        },
        io::ErrorKind::PermissionDenied => QueryError::FileNotReadable {
            path: relative_path.to_string(),
            source: e,
        },
        _ => QueryError::Server {
            message: format!("cannot stat '{relative_path}': {e}"),
        },
    }
}
