//! Grid file parser
use std::{io::BufRead, str::FromStr};

use crate::{
    antenna::{expected_values, normalize_label, Antenna},
    axis::AxisSpec,
    prelude::{Error, ParsingError},
};

#[cfg(feature = "log")]
use log::{debug, error, trace};

/// Antenna record tag
pub(crate) const ANTENNA_TAG: &str = "ANT:";
/// Zenith axis record tag
pub(crate) const ZENITH_TAG: &str = "ZEN:";
/// Azimuth axis record tag
pub(crate) const AZIMUTH_TAG: &str = "AZI:";

/// Values we preallocate at most, whatever the grid declares
const MAX_PREALLOCATED_VALUES: usize = 1 << 16;

/// Parser settings
#[derive(Debug, Clone, PartialEq)]
pub struct ParserOptions {
    /// Lines starting with this token are ignored
    pub debug_marker: String,
    /// End of antenna marker
    pub end_marker: String,
    /// Maximal number of consecutive lines we tolerate
    /// while searching for the next antenna
    pub max_skipped_lines: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            debug_marker: "[DEBUG]".to_string(),
            end_marker: "EOA".to_string(),
            max_skipped_lines: 1024,
        }
    }
}

impl ParserOptions {
    pub fn with_debug_marker(&self, marker: &str) -> Self {
        let mut s = self.clone();
        s.debug_marker = marker.to_string();
        s
    }
    pub fn with_end_marker(&self, marker: &str) -> Self {
        let mut s = self.clone();
        s.end_marker = marker.to_string();
        s
    }
    pub fn with_max_skipped_lines(&self, max: usize) -> Self {
        let mut s = self.clone();
        s.max_skipped_lines = max;
        s
    }
}

/// Parser state. Antenna blocks go through
/// AwaitAntenna -> AwaitZenith -> AwaitAzimuth -> ReadingValues
#[derive(Debug, Clone, PartialEq)]
enum State {
    AwaitAntenna,
    AwaitZenith {
        label: String,
    },
    AwaitAzimuth {
        label: String,
        zenith: AxisSpec,
    },
    ReadingValues {
        label: String,
        zenith: AxisSpec,
        azimuth: Option<AxisSpec>,
        expected: usize,
        values: Vec<f64>,
    },
    Done,
}

/// Splits a record into its tag and remaining content
fn split_record(line: &str) -> (&str, &str) {
    let line = line.trim_start();
    match line.find(|c: char| c.is_ascii_whitespace()) {
        Some(offset) => (&line[..offset], &line[offset..]),
        None => (line, ""),
    }
}

/// Parses an axis record (ZEN: or AZI:)
fn parse_axis(line: &str, tag: &str) -> Result<AxisSpec, ParsingError> {
    let (record, content) = split_record(line);
    if record != tag {
        return Err(ParsingError::MalformedRecord(line.to_string()));
    }
    match AxisSpec::from_str(content) {
        Ok(axis) => Ok(axis),
        Err(ParsingError::NumericParse(_)) => Err(ParsingError::NumericParse(line.to_string())),
        Err(_) => Err(ParsingError::MalformedRecord(line.to_string())),
    }
}

/// Parses a single PCV value line
fn parse_value(line: &str) -> Result<f64, ParsingError> {
    let mut items = line.split_ascii_whitespace();
    match (items.next(), items.next()) {
        (Some(item), None) => {
            f64::from_str(item).or(Err(ParsingError::NumericParse(line.trim().to_string())))
        },
        _ => Err(ParsingError::MalformedRecord(line.to_string())),
    }
}

/// [AntennaReader] iterates over all [Antenna] blocks
/// contained in a [BufRead]able grid stream. Each [Antenna] is returned
/// once complete. The first error terminates the iteration.
///
/// ```
/// use pcv_grid::prelude::*;
///
/// let content = "ANT: LEIAR25.R4 NONE
/// ZEN: 0 2 1
/// AZI: 0 0 0
/// 1.0
/// 2.0
/// ";
/// let mut reader = AntennaReader::new(content.as_bytes());
/// let antenna = reader.next().unwrap().unwrap();
/// assert_eq!(antenna.label(), "LEIAR25.R4 NONE");
/// assert!(antenna.is_noazi());
/// assert_eq!(antenna.values(), &[1.0, 2.0]);
/// assert!(reader.next().is_none());
/// ```
#[derive(Debug)]
pub struct AntennaReader<R: BufRead> {
    reader: R,
    state: State,
    options: ParserOptions,
    /// Consecutive skipped lines
    skipped: usize,
    buf: String,
}

impl<R: BufRead> AntennaReader<R> {
    /// Builds a new [AntennaReader] with default [ParserOptions]
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParserOptions::default())
    }
    /// Builds a new [AntennaReader] with custom [ParserOptions]
    pub fn with_options(reader: R, options: ParserOptions) -> Self {
        Self {
            reader,
            options,
            state: State::AwaitAntenna,
            skipped: 0,
            buf: String::with_capacity(128),
        }
    }
    /// Returns true once the stream is exhausted or an error was met
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }
    fn is_debug(&self, line: &str) -> bool {
        split_record(line).0 == self.options.debug_marker
    }
    fn is_end_marker(&self, line: &str) -> bool {
        line.trim() == self.options.end_marker
    }
    /// Counts one more skipped line
    fn skip(&mut self) -> Result<(), ParsingError> {
        self.skipped += 1;
        if self.skipped > self.options.max_skipped_lines {
            Err(ParsingError::TooManySkippedLines(
                self.options.max_skipped_lines,
            ))
        } else {
            Ok(())
        }
    }
    /// Consumes one line in current state.
    /// Returns a complete [Antenna] when the last value was read.
    fn consume(&mut self, line: &str) -> Result<Option<Antenna>, ParsingError> {
        if self.is_debug(line) {
            #[cfg(feature = "log")]
            trace!("skipping debug line \"{}\"", line);
            self.skip()?;
            return Ok(None);
        }
        if self.state == State::AwaitAntenna
            && (line.trim().is_empty() || self.is_end_marker(line))
        {
            return self.skip().map(|_| None);
        }
        self.skipped = 0;
        let state = std::mem::replace(&mut self.state, State::Done);
        match state {
            State::AwaitAntenna => {
                let (record, content) = split_record(line);
                if record != ANTENNA_TAG {
                    return Err(ParsingError::MalformedRecord(line.to_string()));
                }
                let label = normalize_label(content);
                if label.is_empty() {
                    return Err(ParsingError::MalformedRecord(line.to_string()));
                }
                #[cfg(feature = "log")]
                debug!("new antenna \"{}\"", label);
                self.state = State::AwaitZenith { label };
            },
            State::AwaitZenith { label } => {
                let zenith = parse_axis(line, ZENITH_TAG)?;
                if zenith.num_points() == 0 {
                    return Err(ParsingError::InvalidAxis(line.to_string()));
                }
                self.state = State::AwaitAzimuth { label, zenith };
            },
            State::AwaitAzimuth { label, zenith } => {
                let azimuth = parse_axis(line, AZIMUTH_TAG)?;
                let azimuth = if azimuth.is_degenerate() {
                    #[cfg(feature = "log")]
                    debug!("\"{}\": NOAZI pattern", label);
                    None
                } else if azimuth.num_points() == 0 {
                    return Err(ParsingError::InvalidAxis(line.to_string()));
                } else {
                    Some(azimuth)
                };
                let expected = expected_values(&zenith, azimuth.as_ref())
                    .ok_or_else(|| ParsingError::InvalidAxis(line.to_string()))?;
                self.state = State::ReadingValues {
                    label,
                    zenith,
                    azimuth,
                    expected,
                    values: Vec::with_capacity(expected.min(MAX_PREALLOCATED_VALUES)),
                };
            },
            State::ReadingValues {
                label,
                zenith,
                azimuth,
                expected,
                mut values,
            } => {
                if self.is_end_marker(line) {
                    return Err(ParsingError::PrematureEndOfAntenna {
                        expected,
                        found: values.len(),
                    });
                }
                values.push(parse_value(line)?);
                if values.len() == expected {
                    #[cfg(feature = "log")]
                    debug!("\"{}\": {} pcv values", label, expected);
                    self.state = State::AwaitAntenna;
                    return Ok(Some(Antenna::from_parts(label, zenith, azimuth, values)));
                }
                self.state = State::ReadingValues {
                    label,
                    zenith,
                    azimuth,
                    expected,
                    values,
                };
            },
            State::Done => {},
        }
        Ok(None)
    }
    /// Handles end of stream in current state
    fn end_of_stream(&mut self) -> Result<(), ParsingError> {
        let state = std::mem::replace(&mut self.state, State::Done);
        match state {
            State::AwaitAntenna | State::Done => Ok(()),
            State::AwaitZenith { label } => Err(ParsingError::MissingRecord {
                label,
                record: ZENITH_TAG.to_string(),
            }),
            State::AwaitAzimuth { label, .. } => Err(ParsingError::MissingRecord {
                label,
                record: AZIMUTH_TAG.to_string(),
            }),
            State::ReadingValues {
                expected, values, ..
            } => Err(ParsingError::UnexpectedEndOfStream {
                expected,
                found: values.len(),
            }),
        }
    }
    fn next_antenna(&mut self) -> Result<Option<Antenna>, Error> {
        while self.state != State::Done {
            self.buf.clear();
            let size = self.reader.read_line(&mut self.buf)?;
            if size == 0 {
                self.end_of_stream()?;
                return Ok(None);
            }
            let line = std::mem::take(&mut self.buf);
            let line = line.trim_end_matches(['\n', '\r']);
            let antenna = self.consume(line)?;
            if antenna.is_some() {
                return Ok(antenna);
            }
        }
        Ok(None)
    }
}

impl<R: BufRead> Iterator for AntennaReader<R> {
    type Item = Result<Antenna, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done() {
            return None;
        }
        match self.next_antenna() {
            Ok(antenna) => antenna.map(Ok),
            Err(e) => {
                #[cfg(feature = "log")]
                error!("grid parsing: {}", e);
                self.state = State::Done;
                Some(Err(e))
            },
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for AntennaReader<R> {}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn record_splitting() {
        assert_eq!(split_record("ANT: LEIAR25 NONE"), ("ANT:", " LEIAR25 NONE"));
        assert_eq!(split_record("  EOA"), ("EOA", ""));
        assert_eq!(split_record(""), ("", ""));
    }
    #[test]
    fn axis_record() {
        assert_eq!(
            parse_axis("ZEN: 0 90 5", ZENITH_TAG),
            Ok(AxisSpec::new(0.0, 90.0, 5.0))
        );
        assert_eq!(
            parse_axis("AZI: 0 90 5", ZENITH_TAG),
            Err(ParsingError::MalformedRecord("AZI: 0 90 5".to_string()))
        );
        assert_eq!(
            parse_axis("ZEN: 0 90", ZENITH_TAG),
            Err(ParsingError::MalformedRecord("ZEN: 0 90".to_string()))
        );
        assert_eq!(
            parse_axis("ZEN: 0 90 5 1", ZENITH_TAG),
            Err(ParsingError::MalformedRecord("ZEN: 0 90 5 1".to_string()))
        );
        assert_eq!(
            parse_axis("ZEN: 0 x 5", ZENITH_TAG),
            Err(ParsingError::NumericParse("ZEN: 0 x 5".to_string()))
        );
    }
    #[test]
    fn value_record() {
        assert_eq!(parse_value("  -1.25 "), Ok(-1.25));
        assert_eq!(parse_value("1e-3"), Ok(1.0E-3));
        assert_eq!(
            parse_value("1.0 2.0"),
            Err(ParsingError::MalformedRecord("1.0 2.0".to_string()))
        );
        assert_eq!(
            parse_value(""),
            Err(ParsingError::MalformedRecord("".to_string()))
        );
        assert_eq!(
            parse_value("abc"),
            Err(ParsingError::NumericParse("abc".to_string()))
        );
    }
}
