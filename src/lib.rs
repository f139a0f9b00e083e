#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*
 * PCV-Grid is part of the Geo-Rust framework.
 * Authors: Guillaume W. Bres <guillaume.bressaix@gmail.com> et al.
 * (cf. https://github.com/georust/rinex/graphs/contributors)
 * This framework is shipped under both Apache-2.0 and MIT License.
 */

pub mod antenna;
pub mod axis;
pub mod formatting;
pub mod grid;
pub mod parsing;
pub mod reader;

mod error;

#[cfg(test)]
mod tests;

use std::{io::BufRead, path::Path};

use reader::BufferedReader;

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        antenna::Antenna,
        axis::AxisSpec,
        error::{Error, ParsingError},
        formatting::{to_writer, FormattingOptions},
        grid::{AngleReference, Orientation, PcvGrid},
        parsing::{AntennaReader, ParserOptions},
    };
}

use prelude::{Antenna, AntennaReader, Error, ParserOptions};

/// Parses all [Antenna]s from [BufRead]able interface.
/// Stops on first error: antennas parsed until then are dropped,
/// use [AntennaReader] to keep them.
pub fn from_reader<R: BufRead>(reader: R) -> Result<Vec<Antenna>, Error> {
    AntennaReader::new(reader).collect()
}

/// Same as [from_reader] with custom [ParserOptions]
pub fn from_reader_with_options<R: BufRead>(
    reader: R,
    options: ParserOptions,
) -> Result<Vec<Antenna>, Error> {
    AntennaReader::with_options(reader, options).collect()
}

/// Parses all [Antenna]s described by given string
pub fn from_str(content: &str) -> Result<Vec<Antenna>, Error> {
    from_reader(content.as_bytes())
}

/// Parses all [Antenna]s from local file.
/// Gzip compressed files (.gz) are supported with the `flate2` feature.
pub fn from_file(path: impl AsRef<Path>) -> Result<Vec<Antenna>, Error> {
    let reader = BufferedReader::new(path)?;
    from_reader(reader)
}
