// IRLogView - util/constants.rs
//
// Single source of truth for all named constants, naming conventions and
// defaults. Every value here can be overridden through config.toml except the
// application metadata.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "IRLogView";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "IRLogView";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Investigation file-naming contract
// =============================================================================

/// Prefix of the main run log in the root directory.
/// Full shape: `<prefix><timestamp token><extension>`.
pub const DEFAULT_MAIN_LOG_PREFIX: &str = "incident_response_";

/// Extension shared by main and module logs.
pub const DEFAULT_LOG_EXTENSION: &str = ".log";

/// Sub-directory of the root holding per-module logs
/// (`<module token>_<timestamp token>.log`).
pub const DEFAULT_RESULTS_DIR_NAME: &str = "results";

/// Sub-directory of the root holding suspicious-item side files.
pub const DEFAULT_TEMP_DIR_NAME: &str = "temp";

/// Marker prefix of suspicious-item side files (`suspicious_<category>.txt`).
pub const DEFAULT_SUSPICIOUS_PREFIX: &str = "suspicious_";

/// Extension of suspicious-item side files.
pub const DEFAULT_SUSPICIOUS_EXTENSION: &str = ".txt";

/// Display name given to every main run log in a listing.
pub const MAIN_LOG_DISPLAY_NAME: &str = "Main Log";

/// Built-in module token -> display name table. `[modules]` in config.toml is
/// merged over these entries.
pub const BUILTIN_MODULE_NAMES: &[(&str, &str)] = &[
    ("user", "User Investigation"),
    ("command", "Command Investigation"),
    ("network", "Network Investigation"),
    ("process", "Process Investigation"),
    ("startup", "Startup Item Investigation"),
    ("cron", "Scheduled Task Investigation"),
    ("log", "Log Investigation"),
    ("system", "System Investigation"),
];

// =============================================================================
// Decoding
// =============================================================================

/// Encoding labels tried in order when decoding a log file. The last entry is
/// a single-byte encoding that accepts every byte sequence, so decoding only
/// fails when a configuration removes it.
pub const DEFAULT_ENCODING_LABELS: &[&str] = &["utf-8", "gbk", "gb18030", "windows-1252"];

/// Resolve `DEFAULT_ENCODING_LABELS`, in order.
pub fn default_encodings() -> Vec<&'static encoding_rs::Encoding> {
    DEFAULT_ENCODING_LABELS
        .iter()
        .filter_map(|label| encoding_rs::Encoding::for_label(label.as_bytes()))
        .collect()
}

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
