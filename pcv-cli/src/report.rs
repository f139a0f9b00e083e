//! Output products
use std::io::Write;

use pcv_grid::prelude::{
    to_writer, AngleReference, Antenna, AxisSpec, FormattingOptions, Orientation,
};
use serde::Serialize;

use crate::Error;

/// JSON description of one antenna
#[derive(Debug, Serialize)]
struct JsonAntenna<'a> {
    label: &'a str,
    noazi: bool,
    vertical_reference: AngleReference,
    vertical: AxisSpec,
    azimuth: Option<&'a AxisSpec>,
    orientation: Orientation,
    pcv: Vec<Vec<f64>>,
}

impl<'a> JsonAntenna<'a> {
    fn new(antenna: &'a Antenna, reference: AngleReference, orientation: Orientation) -> Self {
        Self {
            label: antenna.label(),
            noazi: antenna.is_noazi(),
            vertical_reference: reference,
            vertical: vertical_axis(antenna, reference),
            azimuth: antenna.azimuth(),
            orientation,
            pcv: antenna.grid().rows(orientation),
        }
    }
}

fn vertical_axis(antenna: &Antenna, reference: AngleReference) -> AxisSpec {
    match reference {
        AngleReference::ZenithDistance => *antenna.zenith(),
        AngleReference::Altitude => antenna.altitude_axis(),
    }
}

/// One line summary
pub fn summary<W: Write>(
    w: &mut W,
    antennas: &[Antenna],
    reference: AngleReference,
) -> Result<(), Error> {
    let name = match reference {
        AngleReference::ZenithDistance => "ZEN",
        AngleReference::Altitude => "ALT",
    };
    for antenna in antennas {
        let vertical = vertical_axis(antenna, reference);
        let azimuth = match antenna.azimuth() {
            Some(azimuth) => format!("AZI {} ({} pts)", azimuth, azimuth.num_points()),
            None => "NOAZI".to_string(),
        };
        writeln!(
            w,
            "{}: {} {} ({} pts) | {} | PCV [{}, {}] mm",
            antenna.label(),
            name,
            vertical,
            vertical.num_points(),
            azimuth,
            antenna.min_pcv(),
            antenna.max_pcv(),
        )?;
    }
    Ok(())
}

/// Grid format
pub fn grid<W: Write>(w: &mut W, antennas: &[Antenna]) -> Result<(), Error> {
    to_writer(w, antennas, &FormattingOptions::default())?;
    Ok(())
}

/// JSON export
pub fn json<W: Write>(
    w: &mut W,
    antennas: &[Antenna],
    reference: AngleReference,
    orientation: Orientation,
) -> Result<(), Error> {
    let content = antennas
        .iter()
        .map(|antenna| JsonAntenna::new(antenna, reference, orientation))
        .collect::<Vec<_>>();
    serde_json::to_writer_pretty(&mut *w, &content)?;
    writeln!(w)?;
    Ok(())
}

/// Returns (reference - antenna) for all antennas but the first one.
/// Antennas defined over another grid are skipped, at least one must remain.
pub fn differences(antennas: &[Antenna]) -> Result<Vec<Antenna>, Error> {
    let (reference, others) = antennas.split_first().ok_or(Error::NotEnoughAntennas)?;
    if others.is_empty() {
        return Err(Error::NotEnoughAntennas);
    }
    let mut diffs = Vec::with_capacity(others.len());
    for antenna in others {
        match antenna.difference(reference) {
            Ok(diff) => diffs.push(diff),
            Err(e) => {
                warn!(
                    "\"{}\" and \"{}\": {}",
                    reference.label(),
                    antenna.label(),
                    e
                );
            },
        }
    }
    if diffs.is_empty() {
        return Err(Error::NoComparableAntennas(reference.label().to_string()));
    }
    Ok(diffs)
}
