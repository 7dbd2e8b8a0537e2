// oto-util -- timing metadata utilities for vocal synthesis voicebanks
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Pitch names of the form `<letter><octave>`, e.g. `C4`, and their removal from aliases.
//!
//! Only the seven natural letters are known. Accidentals (`#`, `b`, `♯`, `♭`)
//! are not part of the alphabet, so a pitch like `C#4` is never recognized.

use log::trace;

use crate::text::{self, CaseSensitivity};

/// Letter case of the generated pitch names.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CharacterCase {
    Upper,
    Lower,
}

impl CharacterCase {
    /// The pitch letters in ascending order within an octave.
    ///
    /// # Examples
    ///
    /// ```
    /// use oto_util::pitch::CharacterCase;
    ///
    /// assert_eq!(CharacterCase::Upper.pitch_name_order().iter().collect::<String>(), "CDEFGAB");
    /// assert_eq!(CharacterCase::Lower.pitch_name_order().iter().collect::<String>(), "cdefgab");
    /// ```
    pub fn pitch_name_order(self) -> &'static [char; 7] {
        match self {
            CharacterCase::Upper => &['C', 'D', 'E', 'F', 'G', 'A', 'B'],
            CharacterCase::Lower => &['c', 'd', 'e', 'f', 'g', 'a', 'b'],
        }
    }
}

/// Split a pitch name into its letter index and octave.
fn split_pitch(pitch: &str, order: &[char; 7]) -> Option<(usize, i32)> {
    let letter = pitch.chars().next()?;
    let index = order
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(&letter))?;
    let octave = pitch[letter.len_utf8()..].parse().ok()?;
    Some((index, octave))
}

/// Enumerate all pitch names from `bottom_pitch` up to and including `top_pitch`.
///
/// The result is empty if either pitch cannot be read, i.e. if it is empty,
/// does not start with a pitch letter (in any case), or the remainder is not an integer.
/// Within a single octave the range is empty when the bottom letter comes after the top letter.
///
/// The octave span is not limited: every pitch in it is allocated, so a range
/// like `C-2147483648` to `C2147483647` will exhaust memory.
///
/// # Examples
///
/// ```
/// use oto_util::pitch::*;
///
/// assert_eq!(pitch_string_range("C4", "C4", CharacterCase::Upper), vec!["C4"]);
/// assert_eq!(
///     pitch_string_range("F4", "D5", CharacterCase::Upper),
///     vec!["F4", "G4", "A4", "B4", "C5", "D5"]
/// );
/// assert_eq!(pitch_string_range("a4", "B4", CharacterCase::Lower), vec!["a4", "b4"]);
/// assert!(pitch_string_range("", "C4", CharacterCase::Upper).is_empty());
/// ```
pub fn pitch_string_range(bottom_pitch: &str, top_pitch: &str, case: CharacterCase) -> Vec<String> {
    let order = case.pitch_name_order();
    let (bottom_letter, bottom_octave) = match split_pitch(bottom_pitch, order) {
        Some(split) => split,
        None => return Vec::new(),
    };
    let (top_letter, top_octave) = match split_pitch(top_pitch, order) {
        Some(split) => split,
        None => return Vec::new(),
    };

    let mut range = Vec::new();
    for octave in bottom_octave..=top_octave {
        let start = if octave == bottom_octave { bottom_letter } else { 0 };
        let end = if octave == top_octave {
            top_letter
        } else {
            order.len() - 1
        };
        if start > end {
            continue;
        }
        range.extend(
            order[start..=end]
                .iter()
                .map(|letter| format!("{}{}", letter, octave)),
        );
    }
    range
}

/// Strip a trailing pitch name in the range `bottom_pitch..=top_pitch` from `alias`.
///
/// Candidates are tried in ascending order and the first one the alias ends with wins.
/// Returns the new alias together with the pitch that was removed, if any.
///
/// # Examples
///
/// ```
/// use oto_util::pitch::*;
/// use oto_util::text::CaseSensitivity;
///
/// assert_eq!(
///     remove_pitch_suffix("kaC4", "C3", "C5", CaseSensitivity::Insensitive, CharacterCase::Upper),
///     ("ka".to_owned(), Some("C4".to_owned()))
/// );
/// assert_eq!(
///     remove_pitch_suffix("ka", "C3", "C5", CaseSensitivity::Insensitive, CharacterCase::Upper),
///     ("ka".to_owned(), None)
/// );
/// ```
pub fn remove_pitch_suffix(
    alias: &str,
    bottom_pitch: &str,
    top_pitch: &str,
    cs: CaseSensitivity,
    case: CharacterCase,
) -> (String, Option<String>) {
    for pitch in pitch_string_range(bottom_pitch, top_pitch, case) {
        if text::ends_with(alias, &pitch, cs) {
            trace!("removing pitch {} from alias {:?}", pitch, alias);
            return (text::remove_suffix(alias, &pitch, cs), Some(pitch));
        }
    }
    (alias.to_owned(), None)
}
