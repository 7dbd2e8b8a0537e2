// oto-util -- timing metadata utilities for vocal synthesis voicebanks
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Writing parsed `oto.ini` lines back in canonical form.

use std::io::{self, Write};

use log::trace;

use crate::oto_file::OtoLine;
use crate::pitch::{self, CharacterCase};
use crate::text::CaseSensitivity;

/// Which pitch suffixes to remove from the aliases.
#[derive(Clone, Debug)]
pub struct PitchStrip {
    pub bottom: String,
    pub top: String,
    pub case_sensitivity: CaseSensitivity,
    pub character_case: CharacterCase,
}

/// Counts gathered while writing.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub written: usize,
    pub invalid: usize,
    pub stripped: usize,
}

/// The lines that could not be parsed.
pub fn invalid_lines(lines: &[OtoLine]) -> impl Iterator<Item = &OtoLine> {
    lines.iter().filter(|line| !line.entry.is_valid())
}

/// Write every valid entry as one line, optionally removing pitch suffixes first.
/// Invalid lines are skipped and counted.
pub fn write_entries<W: Write>(
    lines: &[OtoLine],
    strip: Option<&PitchStrip>,
    mut out: W,
) -> io::Result<Summary> {
    let mut summary = Summary::default();
    for line in lines {
        if !line.entry.is_valid() {
            summary.invalid += 1;
            continue;
        }
        let mut entry = line.entry.clone();
        if let Some(strip) = strip {
            let (alias, removed) = pitch::remove_pitch_suffix(
                entry.alias(),
                &strip.bottom,
                &strip.top,
                strip.case_sensitivity,
                strip.character_case,
            );
            if let Some(pitch) = removed {
                trace!("line {}: removed {}", line.line, pitch);
                summary.stripped += 1;
                entry.set_alias(alias);
            }
        }
        writeln!(out, "{}", entry)?;
        summary.written += 1;
    }
    out.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oto_file::parse_lines;
    use expect_test::expect;

    const OTO: &str = "a.wav=kaC4,1,2,3,4,5\nbroken\nb.wav=ki,1.5,0,-2,0,0\nc.wav=kuc5,0,0,0,0,0\n=x,1,2,3,4,5\n";

    fn strip(case_sensitivity: CaseSensitivity) -> PitchStrip {
        PitchStrip {
            bottom: "C3".to_owned(),
            top: "C5".to_owned(),
            case_sensitivity,
            character_case: CharacterCase::Upper,
        }
    }

    #[test]
    fn counts_invalid_lines() {
        let lines = parse_lines(OTO);
        let invalid: Vec<usize> = invalid_lines(&lines).map(|line| line.line).collect();
        assert_eq!(invalid, vec![2, 5]);
    }

    #[test]
    fn writes_valid_entries_only() {
        let lines = parse_lines(OTO);
        let mut out = Vec::new();
        let summary = write_entries(&lines, None, &mut out).unwrap();
        assert_eq!(
            summary,
            Summary {
                written: 3,
                invalid: 2,
                stripped: 0,
            }
        );
        expect![[r#"
            a.wav=kaC4,1.000,2.000,3.000,4.000,5.000
            b.wav=ki,1.500,0.000,-2.000,0.000,0.000
            c.wav=kuc5,0.000,0.000,0.000,0.000,0.000
        "#]]
        .assert_eq(&String::from_utf8(out).unwrap());
    }

    #[test]
    fn strips_pitch_suffixes() {
        let lines = parse_lines(OTO);
        let mut out = Vec::new();
        let summary =
            write_entries(&lines, Some(&strip(CaseSensitivity::Insensitive)), &mut out).unwrap();
        assert_eq!(summary.stripped, 2);
        expect![[r#"
            a.wav=ka,1.000,2.000,3.000,4.000,5.000
            b.wav=ki,1.500,0.000,-2.000,0.000,0.000
            c.wav=ku,0.000,0.000,0.000,0.000,0.000
        "#]]
        .assert_eq(&String::from_utf8(out).unwrap());
    }

    #[test]
    fn strips_case_sensitively() {
        let lines = parse_lines(OTO);
        let mut out = Vec::new();
        let summary =
            write_entries(&lines, Some(&strip(CaseSensitivity::Sensitive)), &mut out).unwrap();
        assert_eq!(summary.stripped, 1);
        expect![[r#"
            a.wav=ka,1.000,2.000,3.000,4.000,5.000
            b.wav=ki,1.500,0.000,-2.000,0.000,0.000
            c.wav=kuc5,0.000,0.000,0.000,0.000,0.000
        "#]]
        .assert_eq(&String::from_utf8(out).unwrap());
    }
}
