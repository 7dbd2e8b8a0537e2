// oto-util -- timing metadata utilities for vocal synthesis voicebanks
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Small string helpers used when normalizing aliases.

/// Whether text comparisons distinguish between upper and lower case.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CaseSensitivity {
    Sensitive,
    Insensitive,
}

impl CaseSensitivity {
    fn chars_eq(self, a: char, b: char) -> bool {
        match self {
            CaseSensitivity::Sensitive => a == b,
            CaseSensitivity::Insensitive => a == b || a.to_lowercase().eq(b.to_lowercase()),
        }
    }

    /// Check whether `needle` matches `haystack` starting exactly at byte offset `start`.
    /// Returns the byte length of the matched span.
    fn match_at(self, haystack: &str, start: usize, needle: &str) -> Option<usize> {
        let mut rest = haystack[start..].char_indices();
        for expected in needle.chars() {
            let (_, actual) = rest.next()?;
            if !self.chars_eq(actual, expected) {
                return None;
            }
        }
        Some(rest.next().map_or(haystack.len() - start, |(end, _)| end))
    }
}

/// Find the byte range of the last occurrence of `needle` in `haystack`.
fn rfind_span(haystack: &str, needle: &str, cs: CaseSensitivity) -> Option<(usize, usize)> {
    let mut starts: Vec<usize> = haystack.char_indices().map(|(pos, _)| pos).collect();
    starts.push(haystack.len());
    starts
        .into_iter()
        .rev()
        .find_map(|start| cs.match_at(haystack, start, needle).map(|len| (start, start + len)))
}

/// Check whether `string` ends with `suffix` under the given case policy.
///
/// # Examples
///
/// ```
/// use oto_util::text::*;
///
/// assert!(ends_with("kaC4", "c4", CaseSensitivity::Insensitive));
/// assert!(!ends_with("kaC4", "c4", CaseSensitivity::Sensitive));
/// ```
pub fn ends_with(string: &str, suffix: &str, cs: CaseSensitivity) -> bool {
    let start = match suffix.chars().count() {
        0 => string.len(),
        count => match string.char_indices().rev().nth(count - 1) {
            Some((pos, _)) => pos,
            None => return false,
        },
    };
    cs.match_at(string, start, suffix) == Some(string.len() - start)
}

/// Remove the last occurrence of `suffix` from `string`.
/// Only the matched span is removed; the string is returned unchanged if `suffix` does not occur.
///
/// # Examples
///
/// ```
/// use oto_util::text::*;
///
/// assert_eq!(remove_suffix("hello_world", "world", CaseSensitivity::Sensitive), "hello_");
/// assert_eq!(remove_suffix("a_b_a", "A", CaseSensitivity::Insensitive), "a_b_");
/// assert_eq!(remove_suffix("abc", "x", CaseSensitivity::Sensitive), "abc");
/// ```
pub fn remove_suffix(string: &str, suffix: &str, cs: CaseSensitivity) -> String {
    match rfind_span(string, suffix, cs) {
        Some((start, end)) => {
            let mut result = String::with_capacity(string.len() - (end - start));
            result.push_str(&string[..start]);
            result.push_str(&string[end..]);
            result
        }
        None => string.to_owned(),
    }
}

/// Split off the maximal run of trailing ASCII digits.
///
/// Returns the digits together with the byte offset where they start.
/// The offset is `None` both when there are no trailing digits at all
/// and when the digits make up the whole string.
///
/// # Examples
///
/// ```
/// use oto_util::text::digit_suffix;
///
/// assert_eq!(digit_suffix("abc123"), ("123", Some(3)));
/// assert_eq!(digit_suffix("123"), ("123", None));
/// assert_eq!(digit_suffix("abc"), ("", None));
/// ```
pub fn digit_suffix(string: &str) -> (&str, Option<usize>) {
    let rest = string.trim_end_matches(|ch: char| ch.is_ascii_digit());
    let start = rest.len();
    let digits = &string[start..];
    let position = if digits.is_empty() || rest.is_empty() {
        None
    } else {
        Some(start)
    };
    (digits, position)
}
