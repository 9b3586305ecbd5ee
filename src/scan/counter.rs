//! Line counting for a single file.

use std::fs;
use std::io;
use std::path::Path;

use crate::snapshot::LineCounts;

/// Count total and non-empty lines of the file at `path`.
///
/// Bytes that are not valid UTF-8 are ignored, so a binary-ish file still
/// yields counts instead of an error.
pub fn count_file(path: &Path) -> io::Result<LineCounts> {
    let bytes = fs::read(path)?;
    Ok(count_bytes(&bytes))
}

pub fn count_bytes(bytes: &[u8]) -> LineCounts {
    let text = decode_valid(bytes);
    let mut counts = LineCounts::default();

    for line in lines(&text) {
        counts.total += 1;
        if !line.trim().is_empty() {
            counts.non_empty += 1;
        }
    }

    counts
}

/// Keep only the valid UTF-8 runs; invalid bytes are dropped, not replaced
fn decode_valid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Lines ended by `\n`, `\r\n` or a lone `\r`. A last line without a
/// terminator still counts.
fn lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }

        let Some(end) = rest.find(|c: char| c == '\r' || c == '\n') else {
            let line = rest;
            rest = "";
            return Some(line);
        };

        let line = &rest[..end];
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
        Some(line)
    })
}
