// IRLogView - core/decoder.rs
//
// Whole-file text recovery for investigation logs.
//
// The tooling that writes these logs runs on hosts with mixed locales, so a
// file may be UTF-8, GBK/GB18030 or a single-byte Western code page. Each
// candidate encoding is tried strictly (no replacement characters) in order,
// and the first one that accepts every byte wins.
//
// Files are read into memory in full; there is no streaming path.

use crate::core::model::LogRecord;
use crate::util::constants;
use crate::util::error::DecodeError;
use encoding_rs::{Encoding, UTF_8};
use std::io;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text recovered from a file, with the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFile {
    /// Canonical name of the encoding that decoded the file.
    pub encoding: &'static str,

    /// Trimmed, non-empty lines in file order.
    pub lines: Vec<String>,
}

/// Reads files and decodes them with an ordered list of candidate encodings.
#[derive(Debug, Clone)]
pub struct ContentDecoder {
    encodings: Vec<&'static Encoding>,
}

impl Default for ContentDecoder {
    fn default() -> Self {
        Self::new(constants::default_encodings())
    }
}

impl ContentDecoder {
    /// Create a decoder that tries `encodings` in order.
    pub fn new(encodings: Vec<&'static Encoding>) -> Self {
        Self { encodings }
    }

    /// Read `path` and split it into trimmed, non-empty lines.
    ///
    /// # Errors
    /// - `FileNotFound` if nothing exists at `path`.
    /// - `EncodingUnreadable` if every candidate rejects the content (only
    ///   possible when the list has no single-byte fallback).
    /// - `Io` for any other read failure.
    pub fn read(&self, path: &Path) -> Result<DecodedFile, DecodeError> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DecodeError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => DecodeError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let (text, encoding) =
            self.decode(&bytes)
                .ok_or_else(|| DecodeError::EncodingUnreadable {
                    path: path.to_path_buf(),
                    tried: self.encodings.iter().map(|e| e.name()).collect(),
                })?;

        if encoding != UTF_8 {
            tracing::debug!(
                file = %path.display(),
                encoding = encoding.name(),
                "Decoded with fallback encoding"
            );
        }

        Ok(DecodedFile {
            encoding: encoding.name(),
            lines: split_lines(&text),
        })
    }

    /// Decode `bytes` with the first candidate that accepts all of them.
    pub fn decode(&self, bytes: &[u8]) -> Option<(String, &'static Encoding)> {
        self.encodings.iter().find_map(|&encoding| {
            let input = if encoding == UTF_8 {
                bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
            } else {
                bytes
            };
            encoding
                .decode_without_bom_handling_and_without_replacement(input)
                .map(|text| (text.into_owned(), encoding))
        })
    }
}

/// Split decoded text into lines, trimming each and dropping empty ones.
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split(&['\r', '\n'][..])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// The record a caller shows in place of content it could not decode.
pub fn failure_record(error: &DecodeError) -> LogRecord {
    LogRecord::ErrorLine {
        text: error.to_string(),
    }
}
