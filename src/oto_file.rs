// oto-util -- timing metadata utilities for vocal synthesis voicebanks
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Reading whole `oto.ini` files.

use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use log::{debug, trace};
use snafu::{ResultExt, Snafu};

use crate::oto::OtoEntry;

/// An entry together with the line it was read from.
#[derive(Clone, Debug, PartialEq)]
pub struct OtoLine {
    /// Line number, starting at 1
    pub line: usize,
    pub entry: OtoEntry,
}

#[derive(Debug, Snafu)]
pub enum ReadError {
    #[snafu(display("Could not read {}: {}", path.display(), source))]
    Io { path: PathBuf, source: io::Error },
    #[snafu(display("{} is not valid UTF-8: {}", path.display(), source))]
    Encoding {
        path: PathBuf,
        source: FromUtf8Error,
    },
}

/// Parse every non-blank line of an `oto.ini` text.
/// Both `\n` and `\r\n` line endings are accepted, a leading byte order mark is skipped.
///
/// # Examples
///
/// ```
/// use oto_util::oto_file::parse_lines;
///
/// let lines = parse_lines("a.wav=a,1,2,3,4,5\r\n\r\nb.wav\r\n");
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].line, 1);
/// assert!(lines[0].entry.is_valid());
/// assert_eq!(lines[1].line, 3);
/// assert!(!lines[1].entry.is_valid());
/// ```
pub fn parse_lines(text: &str) -> Vec<OtoLine> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            trace!("line {}: {:?}", index + 1, line);
            OtoLine {
                line: index + 1,
                entry: OtoEntry::parse(line),
            }
        })
        .collect()
}

/// Read and parse an `oto.ini` file.
/// The file has to be UTF-8. Other encodings (e.g. Shift-JIS) are rejected
/// instead of being decoded with replacement characters.
pub fn read(path: &Path) -> Result<Vec<OtoLine>, ReadError> {
    let bytes = std::fs::read(path).context(Io { path })?;
    let text = String::from_utf8(bytes).context(Encoding { path })?;
    let lines = parse_lines(&text);
    debug!("read {} entries from {}", lines.len(), path.display());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oto::OtoEntryError;

    #[test]
    fn skips_blank_lines() {
        let lines = parse_lines("\n  \na.wav=a,1,2,3,4,5\n\nb.wav=b,5,4,3,2,1\n");
        assert_eq!(
            lines,
            vec![
                OtoLine {
                    line: 3,
                    entry: OtoEntry::new("a.wav", "a", 1.0, 2.0, 3.0, 4.0, 5.0),
                },
                OtoLine {
                    line: 5,
                    entry: OtoEntry::new("b.wav", "b", 5.0, 4.0, 3.0, 2.0, 1.0),
                },
            ]
        );
    }

    #[test]
    fn keeps_invalid_lines() {
        let lines = parse_lines("a.wav=a,1,2,3,4,5\nbroken\n=a,1,2,3,4,5");
        let errors: Vec<_> = lines.iter().map(|l| l.entry.error()).collect();
        assert_eq!(
            errors,
            vec![
                None,
                Some(OtoEntryError::FileNameSeparatorNotFound),
                Some(OtoEntryError::EmptyFileName),
            ]
        );
    }

    /// Write `contents` to a file in the temp directory that is unique to this test.
    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("oto-util-{}-{}.ini", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file() {
        let path = Path::new("/nonexistent/oto-util/oto.ini");
        match read(path) {
            Err(ReadError::Io { path: err_path, .. }) => assert_eq!(err_path, path),
            other => panic!("Expected an I/O error, got {:?}", other),
        }
    }

    #[test]
    fn byte_order_mark_is_skipped() {
        let lines = parse_lines("\u{feff}a.wav=a,1,2,3,4,5\nb.wav=b,1,2,3,4,5");
        assert_eq!(lines[0].entry.file_name(), "a.wav");
        assert_eq!(lines[1].entry.file_name(), "b.wav");

        let path = temp_file("bom", b"\xEF\xBB\xBFa.wav=a,1,2,3,4,5\r\n");
        let lines = read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(
            lines,
            vec![OtoLine {
                line: 1,
                entry: OtoEntry::new("a.wav", "a", 1.0, 2.0, 3.0, 4.0, 5.0),
            }]
        );
        assert!(lines[0].entry.is_valid());
    }

    #[test]
    fn non_utf8_file_is_rejected() {
        // "_あ.wav=あ,1,2,3,4,5" in Shift-JIS
        let path = temp_file("sjis", b"_\x82\xa0.wav=\x82\xa0,1,2,3,4,5\r\n");
        let result = read(&path);
        std::fs::remove_file(&path).unwrap();
        match result {
            Err(ReadError::Encoding { path: err_path, .. }) => assert_eq!(err_path, path),
            other => panic!("Expected an encoding error, got {:?}", other),
        }
    }
}
