// IRLogView - main.rs
//
// Command-line transport. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Dispatch to the log service and rendering of its results on stdout

use clap::{Parser, Subcommand, ValueEnum};
use irlogview::app::service::LogService;
use irlogview::core::export;
use irlogview::core::filter::{apply_filters, RecordFilter};
use irlogview::core::model::{LogFileDescriptor, LogRecord, RecordKind, RecordSummary, SuspiciousItem};
use irlogview::platform::config::{self, AppConfig, PlatformPaths};
use irlogview::util;
use irlogview::util::error::{IrLogViewError, Result};
use std::io::{self, Write};
use std::path::PathBuf;

/// IRLogView - viewer for incident-response script output.
///
/// Lists the main and per-module logs of an investigation run, shows any of
/// them as classified records, and surfaces the suspicious-item files the
/// script left behind.
#[derive(Parser, Debug)]
#[command(name = "IRLogView", version, about)]
struct Cli {
    /// Investigation root directory (defaults to config, then the current directory).
    #[arg(short = 'r', long = "root", global = true)]
    root: Option<PathBuf>,

    /// Path to config.toml (defaults to the per-user config directory).
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the main and module logs, newest first.
    Files {
        #[arg(short = 'f', long = "format", value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },

    /// Show one log file as classified records.
    Show {
        /// Path relative to the investigation root, e.g. results/user_20250806.log
        path: String,

        /// Only show records of these kinds (repeatable).
        #[arg(short = 'k', long = "kind", value_parser = parse_kind)]
        kind: Vec<RecordKind>,

        /// Case-insensitive substring match on record content.
        #[arg(short = 's', long = "search")]
        search: Option<String>,

        /// Regular expression matched against record content.
        #[arg(long = "regex")]
        regex: Option<String>,

        /// Only warnings, errors and critical entries.
        #[arg(short = 'a', long = "alerts")]
        alerts: bool,

        /// Print per-kind counts instead of the records.
        #[arg(long = "summary")]
        summary: bool,

        #[arg(short = 'f', long = "format", value_enum, default_value_t = RecordFormat::Text)]
        format: RecordFormat,
    },

    /// List suspicious items from the temp directory.
    Suspicious {
        #[arg(short = 'f', long = "format", value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },

    /// File listing and suspicious items together.
    Overview {
        #[arg(short = 'f', long = "format", value_enum, default_value_t = ListFormat::Json)]
        format: ListFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ListFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RecordFormat {
    Json,
    Csv,
    Text,
}

fn parse_kind(raw: &str) -> std::result::Result<RecordKind, String> {
    RecordKind::from_label(raw).ok_or_else(|| {
        let known: Vec<&str> = RecordKind::all().iter().map(RecordKind::label).collect();
        format!("unknown record kind '{raw}' (expected one of: {})", known.join(", "))
    })
}

fn main() {
    let cli = Cli::parse();

    // Config is loaded before the subscriber exists; its warnings are
    // re-emitted once logging is up.
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (app_config, warnings) = config::load_config(&config_path);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "IRLogView starting"
    );
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    if let Err(e) = run(&cli, &app_config) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, app_config: &AppConfig) -> Result<()> {
    let root = match cli.root.clone().or_else(|| app_config.root_dir.clone()) {
        Some(root) => root,
        None => std::env::current_dir().map_err(|e| IrLogViewError::Io {
            path: PathBuf::from("."),
            operation: "resolve current directory",
            source: e,
        })?,
    };
    tracing::debug!(root = %root.display(), "Investigation root resolved");

    let service = LogService::new(root, app_config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Files { format } => {
            let files = service.list_files();
            match format {
                ListFormat::Json => write_json(&mut out, &files)?,
                ListFormat::Text => write_files(&mut out, &files).map_err(stdout_error)?,
            }
        }
        Command::Show {
            path,
            kind,
            search,
            regex,
            alerts,
            summary,
            format,
        } => {
            let records = service.file_content(path)?;

            let mut filter = RecordFilter {
                kinds: kind.iter().copied().collect(),
                alerts_only: *alerts,
                text_search: search.clone().unwrap_or_default(),
                regex_search: None,
            };
            if let Some(pattern) = regex {
                filter.set_regex(pattern)?;
            }
            let selected: Vec<LogRecord> = if filter.is_empty() {
                records
            } else {
                apply_filters(&records, &filter)
                    .into_iter()
                    .map(|i| records[i].clone())
                    .collect()
            };

            if *summary {
                let counts = RecordSummary::from_records(&selected);
                match format {
                    RecordFormat::Text => write_summary(&mut out, &counts).map_err(stdout_error)?,
                    _ => write_json(&mut out, &counts)?,
                }
            } else {
                match format {
                    RecordFormat::Json => write_json(&mut out, &selected)?,
                    RecordFormat::Csv => {
                        export::export_csv(&selected, &mut out, "stdout")?;
                    }
                    RecordFormat::Text => write_records(&mut out, &selected).map_err(stdout_error)?,
                }
            }
        }
        Command::Suspicious { format } => {
            let items = service.suspicious_items();
            match format {
                ListFormat::Json => write_json(&mut out, &items)?,
                ListFormat::Text => write_suspicious(&mut out, &items).map_err(stdout_error)?,
            }
        }
        Command::Overview { format } => {
            let overview = service.overview();
            match format {
                ListFormat::Json => write_json(&mut out, &overview)?,
                ListFormat::Text => {
                    write_files(&mut out, &overview.files).map_err(stdout_error)?;
                    writeln!(out).map_err(stdout_error)?;
                    write_suspicious(&mut out, &overview.suspicious_items).map_err(stdout_error)?;
                }
            }
        }
    }

    Ok(())
}

/// Pretty JSON on stdout, newline-terminated.
fn write_json<T: serde::Serialize + ?Sized>(out: &mut impl Write, payload: &T) -> Result<()> {
    export::export_json(payload, &mut *out, "stdout")?;
    writeln!(out).map_err(stdout_error)
}

fn stdout_error(e: io::Error) -> IrLogViewError {
    IrLogViewError::Io {
        path: PathBuf::from("<stdout>"),
        operation: "write",
        source: e,
    }
}

fn write_files(out: &mut impl Write, files: &[LogFileDescriptor]) -> io::Result<()> {
    if files.is_empty() {
        return writeln!(out, "No log files found.");
    }
    for file in files {
        let modified = file
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:<6} {:<30} {:>10}  {:<19}  {}",
            file.origin.label(),
            file.display_name,
            file.size_bytes,
            modified,
            file.relative_path
        )?;
    }
    Ok(())
}

fn write_records(out: &mut impl Write, records: &[LogRecord]) -> io::Result<()> {
    for record in records {
        match (record.level_label(), record.timestamp()) {
            (Some(level), Some(ts)) => writeln!(
                out,
                "[{:<7}] {:<8} {ts}  {}",
                record.kind(),
                level.to_uppercase(),
                record.content()
            )?,
            (Some(level), None) => writeln!(
                out,
                "[{:<7}] {:<8} {}",
                record.kind(),
                level.to_uppercase(),
                record.content()
            )?,
            _ => writeln!(out, "[{:<7}] {}", record.kind(), record.content())?,
        }
    }
    Ok(())
}

fn write_summary(out: &mut impl Write, summary: &RecordSummary) -> io::Result<()> {
    writeln!(out, "Total records: {}", summary.total)?;
    writeln!(out, "Alerts:        {}", summary.alerts)?;
    for (kind, count) in &summary.by_kind {
        writeln!(out, "  {kind:<8} {count}")?;
    }
    for (level, count) in &summary.entries_by_level {
        writeln!(out, "  log/{:<8} {count}", level.label())?;
    }
    Ok(())
}

fn write_suspicious(out: &mut impl Write, items: &[SuspiciousItem]) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "No suspicious items found.");
    }
    for item in items {
        writeln!(out, "== {} ({}) ==", item.category, item.file_name)?;
        writeln!(out, "{}", item.content.trim_end())?;
    }
    Ok(())
}
