// IRLogView - platform/config.rs
//
// Platform-specific config directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use directories::ProjectDirs;
use encoding_rs::Encoding;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Resolved platform paths for IRLogView configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/irlogview/ or %APPDATA%\IRLogView\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[paths]` section.
    pub paths: PathsSection,
    /// `[naming]` section.
    pub naming: NamingSection,
    /// `[decoding]` section.
    pub decoding: DecodingSection,
    /// `[modules]` section: module token -> display name.
    pub modules: BTreeMap<String, String>,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[paths]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PathsSection {
    /// Investigation root (main logs live here).
    pub root: Option<String>,
    /// Module log directory; relative values are joined onto root.
    pub results_dir: Option<String>,
    /// Suspicious-item directory; relative values are joined onto root.
    pub temp_dir: Option<String>,
}

/// `[naming]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct NamingSection {
    pub main_log_prefix: Option<String>,
    pub log_extension: Option<String>,
    pub suspicious_prefix: Option<String>,
    pub suspicious_extension: Option<String>,
}

/// `[decoding]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DecodingSection {
    /// Encoding labels tried in order.
    pub encodings: Option<Vec<String>>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Paths --
    /// Investigation root, if configured. The CLI `--root` flag wins over it.
    pub root_dir: Option<PathBuf>,
    /// Module log directory (relative to root unless absolute).
    pub results_dir: PathBuf,
    /// Suspicious-item directory (relative to root unless absolute).
    pub temp_dir: PathBuf,

    // -- Naming --
    pub main_log_prefix: String,
    pub log_extension: String,
    pub suspicious_prefix: String,
    pub suspicious_extension: String,

    // -- Decoding --
    /// Candidate encodings, in the order they are tried.
    pub encodings: Vec<&'static Encoding>,

    // -- Modules --
    /// Extra or overriding module display names, merged over the built-ins.
    pub module_names: BTreeMap<String, String>,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root_dir: None,
            results_dir: PathBuf::from(constants::DEFAULT_RESULTS_DIR_NAME),
            temp_dir: PathBuf::from(constants::DEFAULT_TEMP_DIR_NAME),
            main_log_prefix: constants::DEFAULT_MAIN_LOG_PREFIX.to_string(),
            log_extension: constants::DEFAULT_LOG_EXTENSION.to_string(),
            suspicious_prefix: constants::DEFAULT_SUSPICIOUS_PREFIX.to_string(),
            suspicious_extension: constants::DEFAULT_SUSPICIOUS_EXTENSION.to_string(),
            encodings: constants::default_encodings(),
            module_names: BTreeMap::new(),
            log_level: None,
        }
    }
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with an error warning; startup
/// continues but the user is informed.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            return (AppConfig::default(), vec![msg]);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults. \
                 See config.example.toml for the expected format.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            return (AppConfig::default(), vec![msg]);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");
    validate(raw)
}

/// Validate each raw field, accumulating all warnings.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut config = AppConfig::default();

    // -- Paths --
    if let Some(root) = raw.paths.root {
        if root.trim().is_empty() {
            warnings.push("[paths] root is empty. Using the current directory.".to_string());
        } else {
            config.root_dir = Some(PathBuf::from(root));
        }
    }
    if let Some(dir) = non_empty(raw.paths.results_dir, "[paths] results_dir", &mut warnings) {
        config.results_dir = PathBuf::from(dir);
    }
    if let Some(dir) = non_empty(raw.paths.temp_dir, "[paths] temp_dir", &mut warnings) {
        config.temp_dir = PathBuf::from(dir);
    }

    // -- Naming --
    if let Some(v) = non_empty(
        raw.naming.main_log_prefix,
        "[naming] main_log_prefix",
        &mut warnings,
    ) {
        config.main_log_prefix = v;
    }
    if let Some(v) = non_empty(
        raw.naming.log_extension,
        "[naming] log_extension",
        &mut warnings,
    ) {
        config.log_extension = v;
    }
    if let Some(v) = non_empty(
        raw.naming.suspicious_prefix,
        "[naming] suspicious_prefix",
        &mut warnings,
    ) {
        config.suspicious_prefix = v;
    }
    if let Some(v) = non_empty(
        raw.naming.suspicious_extension,
        "[naming] suspicious_extension",
        &mut warnings,
    ) {
        config.suspicious_extension = v;
    }

    // -- Decoding: encodings --
    if let Some(labels) = raw.decoding.encodings {
        let mut resolved: Vec<&'static Encoding> = Vec::new();
        for label in &labels {
            match Encoding::for_label(label.trim().as_bytes()) {
                Some(encoding) => resolved.push(encoding),
                None => warnings.push(format!(
                    "[decoding] encoding \"{label}\" is not recognised and was skipped."
                )),
            }
        }
        if resolved.is_empty() {
            warnings.push(format!(
                "[decoding] encodings has no usable entries. Using default ({}).",
                constants::DEFAULT_ENCODING_LABELS.join(", ")
            ));
        } else {
            config.encodings = resolved;
        }
    }

    // -- Modules --
    for (token, name) in raw.modules {
        if token.is_empty() || name.trim().is_empty() {
            warnings.push(format!(
                "[modules] entry \"{token}\" = \"{name}\" is incomplete and was skipped."
            ));
        } else {
            config.module_names.insert(token, name);
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Accept a configured string only if it is non-empty.
fn non_empty(value: Option<String>, field: &str, warnings: &mut Vec<String>) -> Option<String> {
    match value {
        Some(v) if v.is_empty() => {
            warnings.push(format!("{field} is empty. Using default."));
            None
        }
        other => other,
    }
}
