// IRLogView - core/export.rs
//
// CSV and JSON export of classified records.
// Core layer: writes to any Write trait object.

use crate::core::model::LogRecord;
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;

/// Export records to CSV format.
///
/// Writes: type, level, timestamp, content
pub fn export_csv<W: Write>(
    records: &[LogRecord],
    writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["type", "level", "timestamp", "content"])
        .map_err(|e| ExportError::Csv {
            target: target.to_string(),
            source: e,
        })?;

    let mut count = 0;
    for record in records {
        csv_writer
            .write_record([
                record.kind().label(),
                record.level_label().unwrap_or(""),
                record.timestamp().unwrap_or(""),
                record.content(),
            ])
            .map_err(|e| ExportError::Csv {
                target: target.to_string(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        target: target.to_string(),
        source: e,
    })?;

    Ok(count)
}

/// Export any serialisable payload as pretty-printed JSON.
pub fn export_json<W: Write, T: Serialize + ?Sized>(
    payload: &T,
    writer: W,
    target: &str,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, payload).map_err(|e| ExportError::Json {
        target: target.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{AlertLevel, EntryLevel};

    fn sample() -> Vec<LogRecord> {
        vec![
            LogRecord::LogEntry {
                level: EntryLevel::Error,
                timestamp: "2025-08-06 12:25:28".to_string(),
                message: "Error one".to_string(),
            },
            LogRecord::WarningLine {
                level: AlertLevel::Critical,
                text: "CRITICAL: rootkit, found".to_string(),
            },
            LogRecord::InfoLine {
                text: "plain".to_string(),
            },
        ]
    }

    #[test]
    fn test_csv_export() {
        let mut buf = Vec::new();
        let count = export_csv(&sample(), &mut buf, "out.csv").unwrap();
        assert_eq!(count, 3);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "type,level,timestamp,content");
        assert_eq!(lines[1], "log,error,2025-08-06 12:25:28,Error one");
        assert_eq!(lines[2], "warning,critical,,\"CRITICAL: rootkit, found\"");
        assert_eq!(lines[3], "info,,,plain");
    }

    #[test]
    fn test_json_export() {
        let mut buf = Vec::new();
        export_json(&sample(), &mut buf, "out.json").unwrap();

        let parsed: Vec<LogRecord> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, sample());
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("\"type\": \"log\""));
    }
}
