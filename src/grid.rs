//! Two dimensional views of a PCV pattern
use crate::antenna::Antenna;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Table orientation
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// Rows are indexed by zenith distance, columns by azimuth.
    /// This is the storage (and file) layout.
    #[default]
    ZenithMajor,
    /// Rows are indexed by azimuth, columns by zenith distance.
    /// This is the layout of a surface defined over `meshgrid(zenith, azimuth)`.
    AzimuthMajor,
}

impl std::str::FromStr for Orientation {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zenith" | "zen" => Ok(Self::ZenithMajor),
            "azimuth" | "azi" => Ok(Self::AzimuthMajor),
            _ => Err(format!("unknown orientation \"{}\"", s)),
        }
    }
}

/// Angle used to describe the vertical axis
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AngleReference {
    /// Angle from straight overhead
    #[default]
    ZenithDistance,
    /// Elevation angle, `90 - zenith distance`
    Altitude,
}

/// Borrowed 2D view of an [Antenna] pattern.
/// NOAZI patterns are exposed as a single azimuth column.
#[derive(Debug, Copy, Clone)]
pub struct PcvGrid<'a> {
    antenna: &'a Antenna,
}

impl<'a> PcvGrid<'a> {
    pub(crate) fn new(antenna: &'a Antenna) -> Self {
        Self { antenna }
    }
    /// Returns (rows, columns) for given orientation
    pub fn shape(&self, orientation: Orientation) -> (usize, usize) {
        let (n_zen, n_azi) = (
            self.antenna.num_zenith_points(),
            self.antenna.num_azimuth_points(),
        );
        match orientation {
            Orientation::ZenithMajor => (n_zen, n_azi),
            Orientation::AzimuthMajor => (n_azi, n_zen),
        }
    }
    /// PCV value at given zenith and azimuth indexes
    pub fn get(&self, zenith: usize, azimuth: usize) -> Option<f64> {
        self.antenna.pcv(zenith, azimuth)
    }
    /// Returns the table of values with given orientation
    pub fn rows(&self, orientation: Orientation) -> Vec<Vec<f64>> {
        let n_azi = self.antenna.num_azimuth_points();
        let values = self.antenna.values();
        match orientation {
            Orientation::ZenithMajor => values.chunks(n_azi).map(|row| row.to_vec()).collect(),
            Orientation::AzimuthMajor => (0..n_azi)
                .map(|a| values.iter().skip(a).step_by(n_azi).copied().collect())
                .collect(),
        }
    }
    /// Vertical axis coordinates, as zenith distance or altitude
    pub fn vertical_points(&self, reference: AngleReference) -> Vec<f64> {
        match reference {
            AngleReference::ZenithDistance => self.antenna.zenith().points().collect(),
            AngleReference::Altitude => self.antenna.altitude_axis().points().collect(),
        }
    }
    /// Azimuth coordinates. NOAZI patterns return a single 0° point.
    pub fn azimuth_points(&self) -> Vec<f64> {
        match self.antenna.azimuth() {
            Some(azimuth) => azimuth.points().collect(),
            None => vec![0.0],
        }
    }
    /// Returns coordinate matrices (X, Y) in azimuth major layout:
    /// `X[a][z]` is the vertical coordinate, `Y[a][z]` the azimuth.
    /// Pairs with `rows(Orientation::AzimuthMajor)`.
    pub fn meshgrid(&self, reference: AngleReference) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let vertical = self.vertical_points(reference);
        let azimuth = self.azimuth_points();
        let x = azimuth.iter().map(|_| vertical.clone()).collect();
        let y = azimuth
            .iter()
            .map(|azi| vec![*azi; vertical.len()])
            .collect();
        (x, y)
    }
}
