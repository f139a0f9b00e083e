//! Command line tool to inspect GNSS antenna PCV grids.
//! Homepage: <https://github.com/georust/rinex>

mod cli;
mod report;

use std::io::{stdin, stdout, BufWriter, Write};

use cli::{Cli, Output};
use env_logger::{Builder, Target};
use pcv_grid::prelude::{Antenna, AntennaReader};

#[macro_use]
extern crate log;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    StdioError(#[from] std::io::Error),
    #[error("grid error: {0}")]
    GridError(#[from] pcv_grid::prelude::Error),
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("differential analysis requires at least two antennas")]
    NotEnoughAntennas,
    #[error("no antenna shares the grid of reference \"{0}\"")]
    NoComparableAntennas(String),
}

/*
 * Parses user data, either from file or stdin
 */
fn user_data_parsing(cli: &Cli) -> Result<Vec<Antenna>, Error> {
    let antennas = match cli.input_path() {
        Some(path) => {
            info!("parsing \"{}\"", path.display());
            pcv_grid::from_file(path)?
        },
        None => {
            info!("parsing stdin");
            AntennaReader::new(stdin().lock()).collect::<Result<Vec<_>, _>>()?
        },
    };
    for antenna in antennas.iter() {
        debug!(
            "\"{}\": {} x {} grid",
            antenna.label(),
            antenna.num_zenith_points(),
            antenna.num_azimuth_points()
        );
    }
    info!("{} antenna(s)", antennas.len());
    Ok(antennas)
}

fn run(cli: &Cli) -> Result<(), Error> {
    let orientation = cli.orientation().map_err(Error::InvalidArgument)?;
    let reference = cli.angle_reference();

    let mut antennas = user_data_parsing(cli)?;
    if cli.differential() {
        antennas = report::differences(&antennas)?;
    }

    let mut w = BufWriter::new(stdout().lock());
    match cli.output() {
        Output::Summary => report::summary(&mut w, &antennas, reference)?,
        Output::Grid => report::grid(&mut w, &antennas)?,
        Output::Json => report::json(&mut w, &antennas, reference, orientation)?,
    }
    w.flush()?;
    Ok(())
}

pub fn main() -> Result<(), Error> {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stderr)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::new();
    run(&cli).map_err(|e| {
        error!("{}", e);
        e
    })
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn error_reports() {
        let e = Error::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "stdout closed",
        ));
        assert_eq!(e.to_string(), "i/o error: stdout closed");
        let e = Error::NoComparableAntennas("LEIAR25.R4 NONE".to_string());
        assert_eq!(
            e.to_string(),
            "no antenna shares the grid of reference \"LEIAR25.R4 NONE\""
        );
    }
}
