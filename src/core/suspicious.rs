// IRLogView - core/suspicious.rs
//
// Surfaces `suspicious_<category>.txt` side files written by the
// investigation modules. Each file is read as UTF-8 only; a file that cannot
// be read is still reported, with the failure text as its content.

use crate::core::model::SuspiciousItem;
use crate::util::constants;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct SuspiciousItemScanner {
    prefix: String,
    extension: String,
}

impl Default for SuspiciousItemScanner {
    fn default() -> Self {
        Self::new(
            constants::DEFAULT_SUSPICIOUS_PREFIX,
            constants::DEFAULT_SUSPICIOUS_EXTENSION,
        )
    }
}

impl SuspiciousItemScanner {
    pub fn new(prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    /// Category for an entry name: marker prefix and extension stripped.
    pub fn category_of<'a>(&self, file_name: &'a str) -> &'a str {
        let rest = file_name
            .strip_prefix(self.prefix.as_str())
            .unwrap_or(file_name);
        rest.strip_suffix(self.extension.as_str()).unwrap_or(rest)
    }

    /// Read every entry of `dir` whose name starts with the marker prefix.
    ///
    /// Items come back in directory listing order. A missing directory yields
    /// an empty list; an unreadable entry yields an item whose `content` is
    /// the error message.
    pub fn scan(&self, dir: &Path) -> Vec<SuspiciousItem> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "No suspicious items directory");
                return Vec::new();
            }
        };

        let mut items = Vec::new();
        for entry_result in entries {
            let entry = match entry_result {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!(dir = %dir.display(), error = %e, "Cannot list directory entry");
                    continue;
                }
            };
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !file_name.starts_with(self.prefix.as_str()) {
                continue;
            }

            let content = match std::fs::read_to_string(entry.path()) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(
                        file = %entry.path().display(),
                        error = %e,
                        "Suspicious item could not be read"
                    );
                    format!("Error reading file: {e}")
                }
            };

            items.push(SuspiciousItem {
                category: self.category_of(&file_name).to_string(),
                file_name,
                content,
            });
        }

        tracing::debug!(dir = %dir.display(), items = items.len(), "Suspicious item scan complete");
        items
    }
}
