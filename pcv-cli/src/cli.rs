use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};
use pcv_grid::prelude::{AngleReference, Orientation};

pub struct Cli {
    /// Arguments passed by user
    pub matches: ArgMatches,
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

/// Output product selected by user
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Output {
    /// One line summary per antenna
    Summary,
    /// Grid format
    Grid,
    /// JSON description
    Json,
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self {
            matches: Self::command().get_matches(),
        }
    }
    fn command() -> Command {
        Command::new("pcv-cli")
            .author("Guillaume W. Bres <guillaume.bressaix@gmail.com>")
            .version(env!("CARGO_PKG_VERSION"))
            .about("GNSS antenna Phase Center Variation grid inspection")
            .long_about("pcv-cli parses PCV grid files (ANT:/ZEN:/AZI: blocks
followed by one PCV value per line) and reports, re-formats
or exports the parsed antennas. Data is read from stdin
unless --fp is specified.")
            .color(ColorChoice::Always)
            .arg(
                Arg::new("filepath")
                    .long("fp")
                    .short('f')
                    .value_name("FILE")
                    .value_parser(value_parser!(PathBuf))
                    .help("Input grid file. Reads stdin by default. Gzip compressed files (.gz) are supported."),
            )
            .arg(
                Arg::new("altitude")
                    .short('i')
                    .long("altitude")
                    .action(ArgAction::SetTrue)
                    .help("Report altitude (90° - zenith distance) instead of zenith distance."),
            )
            .arg(
                Arg::new("dump")
                    .short('d')
                    .long("dump")
                    .action(ArgAction::SetTrue)
                    .conflicts_with("json")
                    .help("Re-emit the parsed grids in grid format."),
            )
            .arg(
                Arg::new("json")
                    .short('j')
                    .long("json")
                    .action(ArgAction::SetTrue)
                    .help("Export the parsed grids as JSON."),
            )
            .arg(
                Arg::new("orientation")
                    .long("orientation")
                    .value_name("zenith|azimuth")
                    .value_parser(value_parser!(String))
                    .default_value("zenith")
                    .help("PCV table orientation of the JSON export: rows per zenith distance, or rows per azimuth."),
            )
            .arg(
                Arg::new("diff")
                    .long("diff")
                    .action(ArgAction::SetTrue)
                    .help("First antenna is the reference: report (reference - antenna) grids for all other antennas."),
            )
    }
    /// Input file, None means stdin
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.matches.get_one::<PathBuf>("filepath")
    }
    pub fn angle_reference(&self) -> AngleReference {
        if self.matches.get_flag("altitude") {
            AngleReference::Altitude
        } else {
            AngleReference::ZenithDistance
        }
    }
    pub fn differential(&self) -> bool {
        self.matches.get_flag("diff")
    }
    pub fn output(&self) -> Output {
        if self.matches.get_flag("json") {
            Output::Json
        } else if self.matches.get_flag("dump") || self.differential() {
            Output::Grid
        } else {
            Output::Summary
        }
    }
    pub fn orientation(&self) -> Result<Orientation, String> {
        match self.matches.get_one::<String>("orientation") {
            Some(orientation) => orientation.parse::<Orientation>(),
            None => Ok(Orientation::default()),
        }
    }
}
