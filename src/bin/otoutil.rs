// oto-util -- timing metadata utilities for vocal synthesis voicebanks
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `otoutil` checks an `oto.ini` file and writes it back in canonical form.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use log::{info, warn};
use snafu::{ResultExt, Snafu};
use structopt::StructOpt;

use oto_util::normalize::{self, PitchStrip};
use oto_util::oto_file;
use oto_util::pitch::CharacterCase;
use oto_util::text::CaseSensitivity;

#[derive(Debug, StructOpt)]
#[structopt(name = "otoutil", about = "Checking and normalizing oto.ini files")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// The oto.ini file to read.
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Output file. The entries are written to stdout if not given.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Fail if any line could not be parsed.
    #[structopt(long)]
    strict: bool,

    /// Remove a trailing pitch between BOTTOM and TOP (inclusive) from every alias.
    #[structopt(long, number_of_values = 2, value_names = &["BOTTOM", "TOP"])]
    strip_pitch: Option<Vec<String>>,

    /// Match pitch suffixes case-sensitively.
    #[structopt(long)]
    case_sensitive: bool,

    /// Use lower case pitch names (c4 instead of C4).
    #[structopt(long)]
    lower: bool,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("Could not set up logging: {}", source))]
    InitLogger { source: log::SetLoggerError },
    #[snafu(display("{}", source))]
    ReadInput { source: oto_file::ReadError },
    #[snafu(display("Could not write {}: {}", target, source))]
    WriteOutput { target: String, source: io::Error },
    #[snafu(display("{} lines could not be parsed", count))]
    InvalidLines { count: usize },
}

fn main() -> Result<(), Error> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).context(InitLogger)?;

    let lines = oto_file::read(&opt.input).context(ReadInput)?;

    let mut invalid = 0;
    for line in normalize::invalid_lines(&lines) {
        invalid += 1;
        warn!(
            "{}:{}: {}",
            opt.input.display(),
            line.line,
            line.entry.error_string().unwrap_or_default()
        );
    }
    if opt.strict && invalid > 0 {
        return Err(Error::InvalidLines { count: invalid });
    }

    let strip = opt.strip_pitch.as_ref().map(|range| PitchStrip {
        bottom: range[0].clone(),
        top: range[1].clone(),
        case_sensitivity: if opt.case_sensitive {
            CaseSensitivity::Sensitive
        } else {
            CaseSensitivity::Insensitive
        },
        character_case: if opt.lower {
            CharacterCase::Lower
        } else {
            CharacterCase::Upper
        },
    });

    let target = opt
        .output
        .as_ref()
        .map_or_else(|| "<stdout>".to_owned(), |path| path.display().to_string());
    let out: Box<dyn Write> = match &opt.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).context(WriteOutput { target: target.clone() })?,
        )),
        None => Box::new(io::stdout()),
    };
    let summary =
        normalize::write_entries(&lines, strip.as_ref(), out).context(WriteOutput { target })?;

    info!(
        "{} entries written, {} invalid lines skipped, {} pitch suffixes removed",
        summary.written, summary.invalid, summary.stripped
    );
    Ok(())
}
