// oto-util -- timing metadata utilities for vocal synthesis voicebanks
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! A single oto entry, i.e. one line of an `oto.ini` file:
//!
//! ```text
//! <fileName>=<alias>,<left>,<consonant>,<right>,<preUtterance>,<overlap>
//! ```
//!
//! The five numbers are offsets in milliseconds.

use std::{fmt, str::FromStr};

use log::debug;

/// Reasons why a line could not be read as an oto entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OtoEntryError {
    Unknown,
    EmptyOtoString,
    EmptyFileName,
    FileNameSeparatorNotFound,
    LeftConvertFailed,
    ConsonantConvertFailed,
    RightConvertFailed,
    PreUtteranceConvertFailed,
    OverlapConvertFailed,
}

impl OtoEntryError {
    /// Human readable description of the error.
    pub fn message(self) -> &'static str {
        match self {
            OtoEntryError::Unknown => "Unknown Error",
            OtoEntryError::EmptyOtoString => "The provided string is empty",
            OtoEntryError::EmptyFileName => "The fileName is empty",
            OtoEntryError::FileNameSeparatorNotFound => {
                "The separator between fileName and alias are not found."
            }
            OtoEntryError::LeftConvertFailed => "Convert left string to double failed.",
            OtoEntryError::ConsonantConvertFailed => "Convert consonant string to double failed.",
            OtoEntryError::RightConvertFailed => "Convert right string to double failed.",
            OtoEntryError::PreUtteranceConvertFailed => {
                "Convert preUtterance string to double failed."
            }
            OtoEntryError::OverlapConvertFailed => "Convert overlap string to double failed.",
        }
    }
}

impl fmt::Display for OtoEntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for OtoEntryError {}

/// Identifies one of the data fields of an [`OtoEntry`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OtoField {
    FileName,
    Alias,
    Left,
    Consonant,
    Right,
    PreUtterance,
    Overlap,
}

/// One line of voicebank timing metadata.
///
/// An entry is either built directly with [`OtoEntry::new`], in which case it is always valid,
/// or read from a line with [`OtoEntry::parse`]. A failed parse does not produce an `Err`;
/// the error is kept on the entry and [`OtoEntry::is_valid`] returns `false`.
///
/// A parsed entry that is valid always has a non-empty file name. This is not checked
/// for entries built with [`OtoEntry::new`] or changed with [`OtoEntry::set_file_name`]:
/// those stay valid even with an empty file name.
///
/// Equality only looks at the data fields, not at the validity or the error.
///
/// Entries are plain values and not internally thread-safe; sharing one for
/// mutation across threads needs external locking.
#[derive(Clone, Debug)]
pub struct OtoEntry {
    file_name: String,
    alias: String,
    left: f64,
    consonant: f64,
    right: f64,
    pre_utterance: f64,
    overlap: f64,
    valid: bool,
    error: Option<OtoEntryError>,
}

impl OtoEntry {
    pub fn new(
        file_name: impl Into<String>,
        alias: impl Into<String>,
        left: f64,
        consonant: f64,
        right: f64,
        pre_utterance: f64,
        overlap: f64,
    ) -> OtoEntry {
        OtoEntry {
            file_name: file_name.into(),
            alias: alias.into(),
            left,
            consonant,
            right,
            pre_utterance,
            overlap,
            valid: true,
            error: None,
        }
    }

    fn blank() -> OtoEntry {
        OtoEntry {
            file_name: String::new(),
            alias: String::new(),
            left: 0.0,
            consonant: 0.0,
            right: 0.0,
            pre_utterance: 0.0,
            overlap: 0.0,
            valid: false,
            error: None,
        }
    }

    /// Read an entry from a single line.
    ///
    /// The checks run in order and stop at the first failure. Numbers that were read
    /// before a failing one keep their values.
    ///
    /// # Examples
    ///
    /// ```
    /// use oto_util::oto::*;
    ///
    /// let entry = OtoEntry::parse("ka.wav=- ka,12,80,-200,40,15.5");
    /// assert!(entry.is_valid());
    /// assert_eq!(entry, OtoEntry::new("ka.wav", "- ka", 12.0, 80.0, -200.0, 40.0, 15.5));
    ///
    /// let entry = OtoEntry::parse("ka.wav=- ka,12,80");
    /// assert!(!entry.is_valid());
    /// assert_eq!(entry.error(), Some(OtoEntryError::RightConvertFailed));
    /// ```
    pub fn parse(line: &str) -> OtoEntry {
        let mut entry = OtoEntry::blank();
        match entry.read_fields(line) {
            Ok(()) => entry.valid = true,
            Err(error) => {
                debug!("could not parse oto entry {:?}: {}", line, error);
                entry.error = Some(error);
            }
        }
        entry
    }

    fn read_fields(&mut self, line: &str) -> Result<(), OtoEntryError> {
        if line.is_empty() {
            return Err(OtoEntryError::EmptyOtoString);
        }
        let separator = line
            .find('=')
            .ok_or(OtoEntryError::FileNameSeparatorNotFound)?;
        self.file_name = line[..separator].to_owned();
        if self.file_name.is_empty() {
            return Err(OtoEntryError::EmptyFileName);
        }

        let mut fields = line[separator + 1..].split(',');
        self.alias = fields.next().unwrap_or("").to_owned();
        self.left = parse_millis(fields.next(), OtoEntryError::LeftConvertFailed)?;
        self.consonant = parse_millis(fields.next(), OtoEntryError::ConsonantConvertFailed)?;
        self.right = parse_millis(fields.next(), OtoEntryError::RightConvertFailed)?;
        self.pre_utterance = parse_millis(fields.next(), OtoEntryError::PreUtteranceConvertFailed)?;
        self.overlap = parse_millis(fields.next(), OtoEntryError::OverlapConvertFailed)?;
        Ok(())
    }

    /// Turn a parsed entry into a `Result`, for use with `?`.
    pub fn into_result(self) -> Result<OtoEntry, OtoEntryError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn error(&self) -> Option<OtoEntryError> {
        self.error
    }

    /// The message belonging to [`OtoEntry::error`], if there is one.
    pub fn error_string(&self) -> Option<&'static str> {
        self.error.map(OtoEntryError::message)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn consonant(&self) -> f64 {
        self.consonant
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn pre_utterance(&self) -> f64 {
        self.pre_utterance
    }

    pub fn overlap(&self) -> f64 {
        self.overlap
    }

    pub fn set_file_name(&mut self, value: impl Into<String>) {
        self.file_name = value.into();
    }

    pub fn set_alias(&mut self, value: impl Into<String>) {
        self.alias = value.into();
    }

    pub fn set_left(&mut self, value: f64) {
        self.left = value;
    }

    pub fn set_consonant(&mut self, value: f64) {
        self.consonant = value;
    }

    pub fn set_right(&mut self, value: f64) {
        self.right = value;
    }

    pub fn set_pre_utterance(&mut self, value: f64) {
        self.pre_utterance = value;
    }

    pub fn set_overlap(&mut self, value: f64) {
        self.overlap = value;
    }

    /// Borrow the entry for modifications that report every changed field to `observer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use oto_util::oto::*;
    ///
    /// let mut entry = OtoEntry::new("a.wav", "a", 0.0, 0.0, 0.0, 0.0, 0.0);
    /// let mut changed = Vec::new();
    /// let mut observed = entry.observe(|field| changed.push(field));
    /// observed.set_alias("- a");
    /// observed.set_overlap(10.0);
    /// drop(observed);
    /// assert_eq!(changed, vec![OtoField::Alias, OtoField::Overlap]);
    /// assert_eq!(entry.alias(), "- a");
    /// ```
    pub fn observe<F: FnMut(OtoField)>(&mut self, observer: F) -> Observed<'_, F> {
        Observed {
            entry: self,
            observer,
        }
    }
}

fn parse_millis(field: Option<&str>, error: OtoEntryError) -> Result<f64, OtoEntryError> {
    field.unwrap_or("").trim().parse().map_err(|_| error)
}

impl PartialEq for OtoEntry {
    fn eq(&self, other: &Self) -> bool {
        self.file_name == other.file_name
            && self.alias == other.alias
            && self.left == other.left
            && self.consonant == other.consonant
            && self.right == other.right
            && self.pre_utterance == other.pre_utterance
            && self.overlap == other.overlap
    }
}

/// Formats the entry as an `oto.ini` line, with three decimals per number.
/// File names and aliases are written as they are, without escaping.
impl fmt::Display for OtoEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={},{:.3},{:.3},{:.3},{:.3},{:.3}",
            self.file_name,
            self.alias,
            self.left,
            self.consonant,
            self.right,
            self.pre_utterance,
            self.overlap
        )
    }
}

impl FromStr for OtoEntry {
    type Err = OtoEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OtoEntry::parse(s).into_result()
    }
}

/// An [`OtoEntry`] whose setters notify an observer after each assignment.
pub struct Observed<'a, F> {
    entry: &'a mut OtoEntry,
    observer: F,
}

impl<'a, F: FnMut(OtoField)> Observed<'a, F> {
    pub fn entry(&self) -> &OtoEntry {
        self.entry
    }

    pub fn set_file_name(&mut self, value: impl Into<String>) {
        self.entry.set_file_name(value);
        (self.observer)(OtoField::FileName);
    }

    pub fn set_alias(&mut self, value: impl Into<String>) {
        self.entry.set_alias(value);
        (self.observer)(OtoField::Alias);
    }

    pub fn set_left(&mut self, value: f64) {
        self.entry.set_left(value);
        (self.observer)(OtoField::Left);
    }

    pub fn set_consonant(&mut self, value: f64) {
        self.entry.set_consonant(value);
        (self.observer)(OtoField::Consonant);
    }

    pub fn set_right(&mut self, value: f64) {
        self.entry.set_right(value);
        (self.observer)(OtoField::Right);
    }

    pub fn set_pre_utterance(&mut self, value: f64) {
        self.entry.set_pre_utterance(value);
        (self.observer)(OtoField::PreUtterance);
    }

    pub fn set_overlap(&mut self, value: f64) {
        self.entry.set_overlap(value);
        (self.observer)(OtoField::Overlap);
    }
}
