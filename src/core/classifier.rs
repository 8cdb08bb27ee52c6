// IRLogView - core/classifier.rs
//
// Line classification for investigation logs.
// Core layer: pure functions over a single trimmed line, no I/O.
//
// Rules live in one ordered table and the first match wins, so precedence is
// read top-to-bottom from `RULES` and each rule can be tested on its own.

use crate::core::model::{AlertLevel, EntryLevel, LogRecord};
use crate::util::logging;
use regex::Regex;
use std::sync::OnceLock;

/// Literal prefixes that mark a command or task-progress line.
const COMMAND_PREFIXES: &[&str] = &["Command:", "Current Task:", "Current Command:"];

/// Literal prefix of a result line.
const RESULT_PREFIX: &str = "Result:";

const WARNING_MARKER: &str = "WARNING:";
const CRITICAL_MARKER: &str = "CRITICAL:";
const SUCCESS_MARKER: &str = "SUCCESS:";

/// One entry of the classification table.
pub struct ClassifierRule {
    /// Short rule name, used in trace output.
    pub name: &'static str,
    /// Returns the record when the rule matches the line.
    pub apply: fn(&str) -> Option<LogRecord>,
}

/// Classification rules in priority order. `classify` falls back to
/// `LogRecord::InfoLine` when none of them match.
pub static RULES: &[ClassifierRule] = &[
    ClassifierRule {
        name: "structured-entry",
        apply: match_structured_entry,
    },
    ClassifierRule {
        name: "task-marker",
        apply: match_task_marker,
    },
    ClassifierRule {
        name: "command",
        apply: match_command,
    },
    ClassifierRule {
        name: "result",
        apply: match_result,
    },
    ClassifierRule {
        name: "warning",
        apply: match_warning,
    },
    ClassifierRule {
        name: "success",
        apply: match_success,
    },
];

/// Classify one trimmed, non-empty line.
///
/// Deterministic and total: the same line always yields the same variant and
/// every line yields one.
pub fn classify(line: &str) -> LogRecord {
    for rule in RULES {
        if let Some(record) = (rule.apply)(line) {
            tracing::trace!(rule = rule.name, line = logging::preview(line), "Line classified");
            return record;
        }
    }
    LogRecord::InfoLine {
        text: line.to_string(),
    }
}

/// Classify every line in order.
pub fn classify_lines<S: AsRef<str>>(lines: &[S]) -> Vec<LogRecord> {
    lines.iter().map(|l| classify(l.as_ref())).collect()
}

// =============================================================================
// Rules
// =============================================================================

fn structured_entry_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^\[(INFO|WARNING|ERROR|CRITICAL)\]\s+(\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}):\s+(.+)",
        )
        .expect("structured entry regex is valid")
    })
}

fn task_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^=== (.+) ===$").expect("task marker regex is valid"))
}

/// `[LEVEL] YYYY-MM-DD HH:MM:SS: message`, anchored at line start only.
pub fn match_structured_entry(line: &str) -> Option<LogRecord> {
    let caps = structured_entry_regex().captures(line)?;
    let level = EntryLevel::from_token(caps.get(1)?.as_str())?;
    Some(LogRecord::LogEntry {
        level,
        timestamp: caps.get(2)?.as_str().to_string(),
        message: caps.get(3)?.as_str().to_string(),
    })
}

/// `=== name ===`, anchored at both ends.
pub fn match_task_marker(line: &str) -> Option<LogRecord> {
    let caps = task_marker_regex().captures(line)?;
    Some(LogRecord::TaskMarker {
        name: caps.get(1)?.as_str().to_string(),
    })
}

pub fn match_command(line: &str) -> Option<LogRecord> {
    COMMAND_PREFIXES
        .iter()
        .any(|p| line.starts_with(p))
        .then(|| LogRecord::CommandLine {
            text: line.to_string(),
        })
}

pub fn match_result(line: &str) -> Option<LogRecord> {
    line.starts_with(RESULT_PREFIX).then(|| LogRecord::ResultLine {
        text: line.to_string(),
    })
}

/// `WARNING:` or `CRITICAL:` anywhere; critical wins when both occur.
pub fn match_warning(line: &str) -> Option<LogRecord> {
    let level = if line.contains(CRITICAL_MARKER) {
        AlertLevel::Critical
    } else if line.contains(WARNING_MARKER) {
        AlertLevel::Warning
    } else {
        return None;
    };
    Some(LogRecord::WarningLine {
        level,
        text: line.to_string(),
    })
}

/// `SUCCESS:` anywhere, or both `No ` and `found` anywhere in any order.
///
/// The second half is loose on purpose: the tooling reports clean checks as
/// "No <thing> found", and unrelated prose with that wording is also
/// classified as a success.
pub fn match_success(line: &str) -> Option<LogRecord> {
    let hit = line.contains(SUCCESS_MARKER) || (line.contains("No ") && line.contains("found"));
    hit.then(|| LogRecord::SuccessLine {
        text: line.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::RecordKind;

    fn kind(line: &str) -> RecordKind {
        classify(line).kind()
    }

    #[test]
    fn test_structured_entry_all_levels() {
        for (token, level) in [
            ("INFO", EntryLevel::Info),
            ("WARNING", EntryLevel::Warning),
            ("ERROR", EntryLevel::Error),
            ("CRITICAL", EntryLevel::Critical),
        ] {
            let line = format!("[{token}] 2025-08-06 12:25:28: Checking user accounts");
            assert_eq!(
                classify(&line),
                LogRecord::LogEntry {
                    level,
                    timestamp: "2025-08-06 12:25:28".to_string(),
                    message: "Checking user accounts".to_string(),
                }
            );
        }
    }

    #[test]
    fn test_structured_entry_message_kept_verbatim() {
        let record = classify("[ERROR] 2025-08-06 12:25:28: WARNING: nested: colon  spacing");
        match record {
            LogRecord::LogEntry { level, message, .. } => {
                assert_eq!(level, EntryLevel::Error);
                assert_eq!(message, "WARNING: nested: colon  spacing");
            }
            other => panic!("expected LogEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_or_lowercase_level_is_not_structured() {
        assert_ne!(kind("[DEBUG] 2025-08-06 12:25:28: detail"), RecordKind::Log);
        assert_ne!(kind("[info] 2025-08-06 12:25:28: detail"), RecordKind::Log);
        assert_eq!(kind("[DEBUG] 2025-08-06 12:25:28: detail"), RecordKind::Info);
    }

    #[test]
    fn test_structured_entry_must_start_the_line() {
        assert_eq!(
            kind("prefix [INFO] 2025-08-06 12:25:28: message"),
            RecordKind::Info
        );
    }

    #[test]
    fn test_structured_entry_requires_full_timestamp_shape() {
        assert_eq!(kind("[INFO] 2025-8-6 12:25:28: message"), RecordKind::Info);
        assert_eq!(kind("[INFO] 2025-08-06 12:25:28 message"), RecordKind::Info);
    }

    #[test]
    fn test_task_marker() {
        assert_eq!(
            classify("=== Network Investigation ==="),
            LogRecord::TaskMarker {
                name: "Network Investigation".to_string()
            }
        );
        // Not anchored at the end: falls through.
        assert_eq!(kind("=== Network Investigation === done"), RecordKind::Info);
    }

    #[test]
    fn test_task_marker_beats_warning_substring() {
        assert_eq!(
            classify("=== WARNING: stage ==="),
            LogRecord::TaskMarker {
                name: "WARNING: stage".to_string()
            }
        );
    }

    #[test]
    fn test_command_prefixes() {
        for line in [
            "Command: ps aux",
            "Current Task: enumerate users",
            "Current Command: netstat -antp",
        ] {
            assert_eq!(
                classify(line),
                LogRecord::CommandLine {
                    text: line.to_string()
                }
            );
        }
        assert_eq!(kind("Run Command: ls"), RecordKind::Info);
    }

    #[test]
    fn test_command_beats_later_rules() {
        assert_eq!(kind("Command: grep 'WARNING:' /var/log/syslog"), RecordKind::Command);
    }

    #[test]
    fn test_result_line() {
        assert_eq!(
            classify("Result: 3 users with uid 0"),
            LogRecord::ResultLine {
                text: "Result: 3 users with uid 0".to_string()
            }
        );
        assert_eq!(kind("Result: No suspicious processes found"), RecordKind::Result);
    }

    #[test]
    fn test_warning_and_critical_levels() {
        assert_eq!(
            classify("CRITICAL: disk full"),
            LogRecord::WarningLine {
                level: AlertLevel::Critical,
                text: "CRITICAL: disk full".to_string()
            }
        );
        assert_eq!(
            classify("WARNING: disk full"),
            LogRecord::WarningLine {
                level: AlertLevel::Warning,
                text: "WARNING: disk full".to_string()
            }
        );
        match classify("WARNING: first, then CRITICAL: second") {
            LogRecord::WarningLine { level, .. } => assert_eq!(level, AlertLevel::Critical),
            other => panic!("expected WarningLine, got {other:?}"),
        }
    }

    #[test]
    fn test_warning_marker_is_unanchored() {
        assert_eq!(kind("sshd config WARNING: root login"), RecordKind::Warning);
    }

    #[test]
    fn test_warning_beats_success() {
        assert_eq!(kind("WARNING: No backups found"), RecordKind::Warning);
    }

    #[test]
    fn test_success_marker_and_heuristic() {
        assert_eq!(kind("SUCCESS: baseline matches"), RecordKind::Success);
        assert_eq!(
            classify("No suspicious processes found"),
            LogRecord::SuccessLine {
                text: "No suspicious processes found".to_string()
            }
        );
        // Order-independent and loose.
        assert_eq!(kind("found nothing. No worries"), RecordKind::Success);
        // Case-sensitive: lower-case "no " does not trigger it.
        assert_eq!(kind("no suspicious processes found"), RecordKind::Info);
        assert_eq!(kind("No suspicious processes"), RecordKind::Info);
    }

    #[test]
    fn test_fallback_info() {
        assert_eq!(
            classify("uid=0(root) gid=0(root)"),
            LogRecord::InfoLine {
                text: "uid=0(root) gid=0(root)".to_string()
            }
        );
    }

    #[test]
    fn test_each_rule_rejects_plain_text() {
        for rule in RULES {
            assert!(
                (rule.apply)("plain text").is_none(),
                "rule {} should not match plain text",
                rule.name
            );
        }
    }

    #[test]
    fn test_classify_is_deterministic() {
        let line = "[WARNING] 2025-08-06 12:25:28: No cron jobs found";
        assert_eq!(classify(line), classify(line));
        assert_eq!(kind(line), RecordKind::Log);
    }

    #[test]
    fn test_classify_lines_preserves_order() {
        let records = classify_lines(&["=== Start ===", "Command: id", "Result: ok"]);
        let kinds: Vec<_> = records.iter().map(LogRecord::kind).collect();
        assert_eq!(
            kinds,
            vec![RecordKind::Task, RecordKind::Command, RecordKind::Result]
        );
    }
}
