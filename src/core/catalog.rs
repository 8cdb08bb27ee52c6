// IRLogView - core/catalog.rs
//
// Discovery of investigation logs in the two known locations:
//   - root directory:    `<main prefix><timestamp token><extension>`
//   - results directory: `<module token>_<timestamp token><extension>`
//
// Only file *metadata* is read here, never contents. Per-file metadata
// failures are non-fatal: the file is still listed, with size 0.

use crate::core::model::{LogFileDescriptor, LogOrigin};
use crate::util::constants;
use crate::util::paths::relative_path_string;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// =============================================================================
// Module name table
// =============================================================================

/// Module token -> human-readable name lookup.
///
/// Pure data: new investigation modules are added here (or in the
/// `[modules]` config section), never in discovery code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTable {
    names: BTreeMap<String, String>,
}

impl Default for ModuleTable {
    fn default() -> Self {
        Self::from_pairs(constants::BUILTIN_MODULE_NAMES.iter().copied())
    }
}

impl ModuleTable {
    /// An empty table: every token passes through unmapped.
    pub fn empty() -> Self {
        Self {
            names: BTreeMap::new(),
        }
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            names: pairs
                .into_iter()
                .map(|(token, name)| (token.to_string(), name.to_string()))
                .collect(),
        }
    }

    /// Add or replace one mapping.
    pub fn insert(&mut self, token: impl Into<String>, name: impl Into<String>) {
        self.names.insert(token.into(), name.into());
    }

    /// Display name for `token`, or the token itself when unknown.
    pub fn display_name<'a>(&'a self, token: &'a str) -> &'a str {
        self.names.get(token).map(String::as_str).unwrap_or(token)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Locations and naming conventions for a catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Directory holding main run logs; relative paths are reported against it.
    pub root_dir: PathBuf,

    /// Directory holding per-module logs.
    pub results_dir: PathBuf,

    /// Fixed prefix of main run log names.
    pub main_log_prefix: String,

    /// Extension shared by main and module logs (including the dot).
    pub log_extension: String,

    /// Module token -> display name.
    pub modules: ModuleTable,
}

impl CatalogConfig {
    /// Default naming under `root_dir`, with results in `<root>/results`.
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        Self {
            results_dir: root_dir.join(constants::DEFAULT_RESULTS_DIR_NAME),
            root_dir,
            main_log_prefix: constants::DEFAULT_MAIN_LOG_PREFIX.to_string(),
            log_extension: constants::DEFAULT_LOG_EXTENSION.to_string(),
            modules: ModuleTable::default(),
        }
    }
}

// =============================================================================
// Discovery
// =============================================================================

/// Enumerates main and module logs.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    config: CatalogConfig,
    main_pattern: Option<glob::Pattern>,
    module_pattern: Option<glob::Pattern>,
}

impl FileCatalog {
    pub fn new(config: CatalogConfig) -> Self {
        let ext = glob::Pattern::escape(&config.log_extension);
        let main_pattern = compile_pattern(&format!(
            "{}*{ext}",
            glob::Pattern::escape(&config.main_log_prefix)
        ));
        let module_pattern = compile_pattern(&format!("*_*{ext}"));
        Self {
            config,
            main_pattern,
            module_pattern,
        }
    }

    /// List every main and module log, newest timestamp token first.
    ///
    /// Ordering compares tokens as strings, descending. This is chronological
    /// only while every token shares one fixed-width format. Ties keep
    /// discovery order (main logs first, then modules, each by file name).
    pub fn discover(&self) -> Vec<LogFileDescriptor> {
        let mut files = self.discover_main_logs();
        files.extend(self.discover_module_logs());
        files.sort_by(|a, b| b.timestamp_token.cmp(&a.timestamp_token));

        tracing::debug!(
            root = %self.config.root_dir.display(),
            files = files.len(),
            "Catalog discovery complete"
        );
        files
    }

    fn discover_main_logs(&self) -> Vec<LogFileDescriptor> {
        let Some(pattern) = &self.main_pattern else {
            return Vec::new();
        };
        list_matching(&self.config.root_dir, pattern)
            .into_iter()
            .filter_map(|(path, name)| {
                let token = name
                    .strip_prefix(self.config.main_log_prefix.as_str())?
                    .strip_suffix(self.config.log_extension.as_str())?
                    .to_string();
                Some(self.describe(
                    &path,
                    LogOrigin::Main,
                    constants::MAIN_LOG_DISPLAY_NAME.to_string(),
                    token,
                ))
            })
            .collect()
    }

    fn discover_module_logs(&self) -> Vec<LogFileDescriptor> {
        let Some(pattern) = &self.module_pattern else {
            return Vec::new();
        };
        if !self.config.results_dir.is_dir() {
            tracing::debug!(
                dir = %self.config.results_dir.display(),
                "Results directory absent; no module logs"
            );
            return Vec::new();
        }
        list_matching(&self.config.results_dir, pattern)
            .into_iter()
            .filter_map(|(path, name)| {
                let Some((module, token)) =
                    split_module_name(&name, &self.config.log_extension)
                else {
                    tracing::trace!(file = %name, "Not a module log name, skipped");
                    return None;
                };
                let display = self.config.modules.display_name(module).to_string();
                let token = token.to_string();
                Some(self.describe(&path, LogOrigin::Module, display, token))
            })
            .collect()
    }

    fn describe(
        &self,
        path: &Path,
        origin: LogOrigin,
        display_name: String,
        timestamp_token: String,
    ) -> LogFileDescriptor {
        // The file may vanish between listing and stat; keep it with size 0.
        let (size_bytes, modified) = match std::fs::metadata(path) {
            Ok(meta) => (
                meta.len(),
                meta.modified().ok().map(DateTime::<Utc>::from),
            ),
            Err(e) => {
                tracing::debug!(file = %path.display(), error = %e, "Cannot stat log file");
                (0, None)
            }
        };

        let relative_path = relative_path_string(path, &self.config.root_dir).unwrap_or_else(|| {
            tracing::warn!(
                file = %path.display(),
                root = %self.config.root_dir.display(),
                "Log file is outside the root directory"
            );
            path.display().to_string()
        });

        LogFileDescriptor {
            origin,
            display_name,
            relative_path,
            timestamp_token,
            size_bytes,
            modified,
        }
    }
}

/// Split `<module>_<token><ext>` at the first underscore.
/// Returns `None` for names with no underscore-delimited token.
pub fn split_module_name<'a>(file_name: &'a str, extension: &str) -> Option<(&'a str, &'a str)> {
    let stem = file_name.strip_suffix(extension)?;
    stem.split_once('_')
}

/// Compile one glob pattern; failures are logged and yield `None`.
fn compile_pattern(pattern: &str) -> Option<glob::Pattern> {
    match glob::Pattern::new(pattern) {
        Ok(compiled) => Some(compiled),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "Invalid glob pattern, skipping");
            None
        }
    }
}

/// Files directly inside `dir` whose names match `pattern`, sorted by file
/// name. A missing or unreadable directory yields an empty list.
///
/// Symlinks are not resolved while listing: a link whose target is gone is
/// still returned, and `describe` records it with size 0. Links that resolve
/// to a directory are skipped.
fn list_matching(dir: &Path, pattern: &glob::Pattern) -> Vec<(PathBuf, String)> {
    let options = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let walker = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut matched = Vec::new();
    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "Cannot list directory entry");
                continue;
            }
        };
        let file_type = entry.file_type();
        if file_type.is_symlink() {
            if std::fs::metadata(entry.path()).is_ok_and(|meta| meta.is_dir()) {
                continue;
            }
        } else if !file_type.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            tracing::debug!(file = %entry.path().display(), "Skipping non-UTF-8 file name");
            continue;
        };
        if pattern.matches_with(name, options) {
            matched.push((entry.path().to_path_buf(), name.to_string()));
        }
    }
    matched
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_tree() -> TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        fs::write(root.join("incident_response_20250101_0000.log"), "a").unwrap();
        fs::write(root.join("incident_response_20250102_0000.log"), "bb").unwrap();
        fs::write(root.join("unrelated.log"), "x").unwrap();
        fs::write(root.join("incident_response_20250103_0000.txt"), "x").unwrap();

        let results = root.join("results");
        fs::create_dir(&results).unwrap();
        fs::write(results.join("user_20250101_0000.log"), "ccc").unwrap();
        fs::write(results.join("network_20250102_0000.log"), "dddd").unwrap();
        fs::write(results.join("rootkit_20250103_0000.log"), "e").unwrap();
        fs::write(results.join("nounderscore.log"), "f").unwrap();
        fs::write(results.join("user_20250104_0000.txt"), "g").unwrap();
        dir
    }

    fn tokens(files: &[LogFileDescriptor]) -> Vec<&str> {
        files.iter().map(|f| f.timestamp_token.as_str()).collect()
    }

    #[test]
    fn test_main_logs_sorted_descending() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("incident_response_20250101_0000.log"), "").unwrap();
        fs::write(dir.path().join("incident_response_20250102_0000.log"), "").unwrap();

        let files = FileCatalog::new(CatalogConfig::with_root(dir.path())).discover();
        assert_eq!(tokens(&files), vec!["20250102_0000", "20250101_0000"]);
        assert!(files.iter().all(|f| f.origin == LogOrigin::Main));
        assert!(files.iter().all(|f| f.display_name == "Main Log"));
    }

    #[test]
    fn test_discovers_main_and_module_logs() {
        let dir = make_tree();
        let files = FileCatalog::new(CatalogConfig::with_root(dir.path())).discover();

        assert_eq!(
            tokens(&files),
            vec![
                "20250103_0000",
                "20250102_0000",
                "20250102_0000",
                "20250101_0000",
                "20250101_0000",
            ]
        );

        let paths: Vec<_> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert!(paths.contains(&"incident_response_20250102_0000.log"));
        assert!(paths.contains(&"results/network_20250102_0000.log"));
        assert!(!paths.iter().any(|p| p.contains("unrelated")));
        assert!(!paths.iter().any(|p| p.contains("nounderscore")));
        assert!(!paths.iter().any(|p| p.ends_with(".txt")));

        // Equal tokens keep discovery order: main before module.
        assert_eq!(files[1].origin, LogOrigin::Main);
        assert_eq!(files[2].origin, LogOrigin::Module);
    }

    #[test]
    fn test_module_names_mapped_and_unknown_pass_through() {
        let dir = make_tree();
        let files = FileCatalog::new(CatalogConfig::with_root(dir.path())).discover();

        let by_path = |p: &str| {
            files
                .iter()
                .find(|f| f.relative_path == p)
                .unwrap_or_else(|| panic!("missing {p}"))
        };
        assert_eq!(
            by_path("results/user_20250101_0000.log").display_name,
            "User Investigation"
        );
        assert_eq!(
            by_path("results/rootkit_20250103_0000.log").display_name,
            "rootkit"
        );
    }

    #[test]
    fn test_injected_module_table() {
        let dir = make_tree();
        let mut config = CatalogConfig::with_root(dir.path());
        config.modules = ModuleTable::empty();
        config.modules.insert("rootkit", "Rootkit Sweep");
        let files = FileCatalog::new(config).discover();

        let names: Vec<_> = files
            .iter()
            .filter(|f| f.origin == LogOrigin::Module)
            .map(|f| f.display_name.as_str())
            .collect();
        assert!(names.contains(&"Rootkit Sweep"));
        assert!(names.contains(&"user"), "unmapped token should pass through");
    }

    #[test]
    fn test_sizes_recorded() {
        let dir = make_tree();
        let files = FileCatalog::new(CatalogConfig::with_root(dir.path())).discover();
        let network = files
            .iter()
            .find(|f| f.relative_path == "results/network_20250102_0000.log")
            .unwrap();
        assert_eq!(network.size_bytes, 4);
        assert!(network.modified.is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_listed_with_size_zero() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("incident_response_20250101_0000.log"), "a").unwrap();
        std::os::unix::fs::symlink(
            root.join("gone.log"),
            root.join("incident_response_20250102_0000.log"),
        )
        .unwrap();
        fs::create_dir(root.join("archive")).unwrap();
        std::os::unix::fs::symlink(
            root.join("archive"),
            root.join("incident_response_20250103_0000.log"),
        )
        .unwrap();

        let files = FileCatalog::new(CatalogConfig::with_root(root)).discover();
        let listing: Vec<_> = files
            .iter()
            .map(|f| (f.timestamp_token.as_str(), f.size_bytes, f.modified.is_some()))
            .collect();
        assert_eq!(
            listing,
            vec![("20250102_0000", 0, false), ("20250101_0000", 1, true)]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_log_uses_target_size() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("saved.txt"), "abcd").unwrap();
        std::os::unix::fs::symlink(
            root.join("saved.txt"),
            root.join("incident_response_20250101_0000.log"),
        )
        .unwrap();

        let files = FileCatalog::new(CatalogConfig::with_root(root)).discover();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size_bytes, 4);
    }

    #[test]
    fn test_missing_locations_yield_empty_listing() {
        let dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::with_root(dir.path().join("does-not-exist"));
        assert!(FileCatalog::new(config).discover().is_empty());
    }

    #[test]
    fn test_split_module_name() {
        assert_eq!(
            split_module_name("user_20250806_122528.log", ".log"),
            Some(("user", "20250806_122528"))
        );
        assert_eq!(split_module_name("nounderscore.log", ".log"), None);
        assert_eq!(split_module_name("user_x.txt", ".log"), None);
    }

    #[test]
    fn test_module_table_lookup() {
        let table = ModuleTable::default();
        assert_eq!(table.len(), 8);
        assert_eq!(table.display_name("cron"), "Scheduled Task Investigation");
        assert_eq!(table.display_name("custom"), "custom");
    }

    #[test]
    fn test_custom_prefix_with_glob_metacharacters() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("run[1]_20250101.log"), "").unwrap();
        fs::write(dir.path().join("run1_20250101.log"), "").unwrap();

        let mut config = CatalogConfig::with_root(dir.path());
        config.main_log_prefix = "run[1]_".to_string();
        let files = FileCatalog::new(config).discover();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].timestamp_token, "20250101");
    }
}
