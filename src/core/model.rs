// IRLogView - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers. Their serde shape
// is the wire format consumed by renderers: records carry a `type` tag and a
// `content` field, descriptors carry `type`/`name`/`path`/`timestamp`/`size`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Log record (output of classification)
// =============================================================================

/// Level of a structured `[LEVEL] timestamp: message` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryLevel {
    Info,
    Warning,
    Error,
    Critical,
}

impl EntryLevel {
    /// Parse the exact upper-case token used inside the brackets.
    /// Matching is case-sensitive: `[info]` is not a structured entry.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "INFO" => Some(Self::Info),
            "WARNING" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Lower-case label, as rendered to callers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

/// Level of a free-form line carrying a `WARNING:` or `CRITICAL:` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Critical,
}

impl AlertLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// One classified line of an investigation log.
///
/// Classification is total: every non-empty line maps to exactly one variant.
/// `Error` never comes from classification; it carries a read/decode failure
/// so callers always receive a record sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LogRecord {
    /// `[LEVEL] YYYY-MM-DD HH:MM:SS: message`
    #[serde(rename = "log")]
    LogEntry {
        level: EntryLevel,
        timestamp: String,
        #[serde(rename = "content")]
        message: String,
    },

    /// `=== name ===`
    #[serde(rename = "task")]
    TaskMarker {
        #[serde(rename = "content")]
        name: String,
    },

    /// Lines starting with `Command:`, `Current Task:` or `Current Command:`.
    #[serde(rename = "command")]
    CommandLine {
        #[serde(rename = "content")]
        text: String,
    },

    /// Lines starting with `Result:`.
    #[serde(rename = "result")]
    ResultLine {
        #[serde(rename = "content")]
        text: String,
    },

    /// Lines containing `WARNING:` or `CRITICAL:` anywhere.
    #[serde(rename = "warning")]
    WarningLine {
        level: AlertLevel,
        #[serde(rename = "content")]
        text: String,
    },

    /// Lines containing `SUCCESS:`, or both `No ` and `found`.
    #[serde(rename = "success")]
    SuccessLine {
        #[serde(rename = "content")]
        text: String,
    },

    /// Anything else.
    #[serde(rename = "info")]
    InfoLine {
        #[serde(rename = "content")]
        text: String,
    },

    /// A read or decode failure reported in place of the file's lines.
    #[serde(rename = "error")]
    ErrorLine {
        #[serde(rename = "content")]
        text: String,
    },
}

impl LogRecord {
    /// The record's variant as a plain kind, for filtering and counting.
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::LogEntry { .. } => RecordKind::Log,
            Self::TaskMarker { .. } => RecordKind::Task,
            Self::CommandLine { .. } => RecordKind::Command,
            Self::ResultLine { .. } => RecordKind::Result,
            Self::WarningLine { .. } => RecordKind::Warning,
            Self::SuccessLine { .. } => RecordKind::Success,
            Self::InfoLine { .. } => RecordKind::Info,
            Self::ErrorLine { .. } => RecordKind::Error,
        }
    }

    /// The displayable text of the record (message for log entries, task
    /// name for markers, the verbatim line otherwise).
    pub fn content(&self) -> &str {
        match self {
            Self::LogEntry { message, .. } => message,
            Self::TaskMarker { name } => name,
            Self::CommandLine { text }
            | Self::ResultLine { text }
            | Self::WarningLine { text, .. }
            | Self::SuccessLine { text }
            | Self::InfoLine { text }
            | Self::ErrorLine { text } => text,
        }
    }

    /// Level label, when the variant carries one.
    pub fn level_label(&self) -> Option<&'static str> {
        match self {
            Self::LogEntry { level, .. } => Some(level.label()),
            Self::WarningLine { level, .. } => Some(level.label()),
            _ => None,
        }
    }

    /// Timestamp text, for structured entries only.
    pub fn timestamp(&self) -> Option<&str> {
        match self {
            Self::LogEntry { timestamp, .. } => Some(timestamp),
            _ => None,
        }
    }

    /// True for records a reviewer should look at first: warning and
    /// critical lines, error/warning/critical entries and read failures.
    pub fn is_alert(&self) -> bool {
        match self {
            Self::LogEntry { level, .. } => *level != EntryLevel::Info,
            Self::WarningLine { .. } | Self::ErrorLine { .. } => true,
            _ => false,
        }
    }
}

/// Flat discriminant of `LogRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Log,
    Task,
    Command,
    Result,
    Warning,
    Success,
    Info,
    Error,
}

impl RecordKind {
    /// Returns all variants in display order.
    pub fn all() -> &'static [RecordKind] {
        &[
            RecordKind::Log,
            RecordKind::Task,
            RecordKind::Command,
            RecordKind::Result,
            RecordKind::Warning,
            RecordKind::Success,
            RecordKind::Info,
            RecordKind::Error,
        ]
    }

    /// Wire label (matches the serialized `type` tag).
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Log => "log",
            RecordKind::Task => "task",
            RecordKind::Command => "command",
            RecordKind::Result => "result",
            RecordKind::Warning => "warning",
            RecordKind::Success => "success",
            RecordKind::Info => "info",
            RecordKind::Error => "error",
        }
    }

    /// Parse a wire label (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.to_lowercase();
        Self::all().iter().copied().find(|k| k.label() == lower)
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

// =============================================================================
// Log file descriptor (output of catalog discovery)
// =============================================================================

/// Which location a log file was discovered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOrigin {
    /// Session-wide run log in the root directory.
    Main,
    /// Per-module log in the results directory.
    Module,
}

impl LogOrigin {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Module => "module",
        }
    }
}

/// Display metadata for one discovered log file.
///
/// `timestamp_token` is the opaque token cut out of the file name. Listings
/// order by it lexicographically, which is chronological only because the
/// investigation tooling writes every token in one fixed format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFileDescriptor {
    #[serde(rename = "type")]
    pub origin: LogOrigin,

    #[serde(rename = "name")]
    pub display_name: String,

    /// Path relative to the root directory, `/`-separated.
    #[serde(rename = "path")]
    pub relative_path: String,

    #[serde(rename = "timestamp")]
    pub timestamp_token: String,

    /// Size at scan time; 0 when the file vanished before it could be stat'ed.
    #[serde(rename = "size")]
    pub size_bytes: u64,

    /// Last modification time, when the platform reports one.
    pub modified: Option<DateTime<Utc>>,
}

// =============================================================================
// Suspicious item (output of the side-file scanner)
// =============================================================================

/// A side artifact flagged by the investigation tooling.
///
/// `content` holds an error message instead of file text when the file could
/// not be read; the item itself is never dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspiciousItem {
    #[serde(rename = "type")]
    pub category: String,

    #[serde(rename = "file")]
    pub file_name: String,

    pub content: String,
}

// =============================================================================
// Record summary
// =============================================================================

/// Counts over a classified record sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    /// Total number of records.
    pub total: usize,

    /// Records per kind. Kinds with no records are absent.
    pub by_kind: BTreeMap<RecordKind, usize>,

    /// Structured log entries per level.
    pub entries_by_level: BTreeMap<EntryLevel, usize>,

    /// Records for which `LogRecord::is_alert` holds.
    pub alerts: usize,
}

impl RecordSummary {
    pub fn from_records(records: &[LogRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Default::default()
        };
        for record in records {
            *summary.by_kind.entry(record.kind()).or_insert(0) += 1;
            if let LogRecord::LogEntry { level, .. } = record {
                *summary.entries_by_level.entry(*level).or_insert(0) += 1;
            }
            if record.is_alert() {
                summary.alerts += 1;
            }
        }
        summary
    }
}
