//! Antenna PCV pattern
use itertools::Itertools;

use crate::{
    axis::AxisSpec,
    grid::PcvGrid,
    parsing::ANTENNA_TAG,
    prelude::{Error, ParsingError},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Antenna] describes the Phase Center Variation pattern
/// of one GNSS antenna, as defined by one block of a grid file.
/// PCV values are expressed in mm and stored zenith major:
/// value for zenith index `z` and azimuth index `a` is located
/// at `z * num_azimuth_points() + a`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "AntennaFields"))]
pub struct Antenna {
    /// Antenna type, radome and possible serial number
    label: String,
    /// Zenith distance axis, in degrees
    zenith: AxisSpec,
    /// Azimuth axis, in degrees. None for NOAZI patterns.
    azimuth: Option<AxisSpec>,
    /// PCV values, in mm
    values: Vec<f64>,
}

/// Deserialized [Antenna] content, validated by [Antenna::new]
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct AntennaFields {
    label: String,
    zenith: AxisSpec,
    azimuth: Option<AxisSpec>,
    values: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<AntennaFields> for Antenna {
    type Error = Error;
    fn try_from(fields: AntennaFields) -> Result<Self, Self::Error> {
        Self::new(&fields.label, fields.zenith, fields.azimuth, fields.values)
    }
}

/// Collapses all whitespace runs to a single space
pub(crate) fn normalize_label(label: &str) -> String {
    label.split_ascii_whitespace().join(" ")
}

/// Returns expected number of PCV values for given axes,
/// None if it overflows
pub(crate) fn expected_values(zenith: &AxisSpec, azimuth: Option<&AxisSpec>) -> Option<usize> {
    match azimuth {
        Some(azimuth) => zenith.num_points().checked_mul(azimuth.num_points()),
        None => Some(zenith.num_points()),
    }
}

impl Antenna {
    /// Builds a new [Antenna]. Degenerate azimuth axes are
    /// considered as NOAZI patterns. Fails if the label is empty
    /// or if the number of values does not match the grid definition.
    pub fn new(
        label: &str,
        zenith: AxisSpec,
        azimuth: Option<AxisSpec>,
        values: Vec<f64>,
    ) -> Result<Self, Error> {
        let label = normalize_label(label);
        if label.is_empty() {
            return Err(ParsingError::MalformedRecord(ANTENNA_TAG.to_string()).into());
        }
        let azimuth = azimuth.filter(|azi| !azi.is_degenerate());
        if zenith.num_points() == 0 {
            return Err(ParsingError::InvalidAxis(zenith.to_string()).into());
        }
        if let Some(azi) = azimuth {
            if azi.num_points() == 0 {
                return Err(ParsingError::InvalidAxis(azi.to_string()).into());
            }
        }
        let expected = expected_values(&zenith, azimuth.as_ref())
            .ok_or_else(|| ParsingError::InvalidAxis(zenith.to_string()))?;
        if values.len() != expected {
            return Err(Error::ValueCount {
                expected,
                found: values.len(),
            });
        }
        Ok(Self {
            label,
            zenith,
            azimuth,
            values,
        })
    }
    /// Builds [Antenna] from fields the parser already validated
    pub(crate) fn from_parts(
        label: String,
        zenith: AxisSpec,
        azimuth: Option<AxisSpec>,
        values: Vec<f64>,
    ) -> Self {
        Self {
            label,
            zenith,
            azimuth,
            values,
        }
    }
    /// Antenna type, radome and serial number
    pub fn label(&self) -> &str {
        &self.label
    }
    /// Zenith distance axis
    pub fn zenith(&self) -> &AxisSpec {
        &self.zenith
    }
    /// Azimuth axis, None for NOAZI patterns
    pub fn azimuth(&self) -> Option<&AxisSpec> {
        self.azimuth.as_ref()
    }
    /// Raw PCV values, zenith major
    pub fn values(&self) -> &[f64] {
        &self.values
    }
    /// Returns true if this pattern does not depend on azimuth
    pub fn is_noazi(&self) -> bool {
        self.azimuth.is_none()
    }
    pub fn num_zenith_points(&self) -> usize {
        self.zenith.num_points()
    }
    /// Number of azimuth points, 1 for NOAZI patterns
    pub fn num_azimuth_points(&self) -> usize {
        self.azimuth.map(|azi| azi.num_points()).unwrap_or(1)
    }
    /// Returns PCV value at given grid indexes.
    /// `azimuth` must be 0 for NOAZI patterns.
    pub fn pcv(&self, zenith: usize, azimuth: usize) -> Option<f64> {
        if zenith >= self.num_zenith_points() || azimuth >= self.num_azimuth_points() {
            return None;
        }
        self.values
            .get(zenith * self.num_azimuth_points() + azimuth)
            .copied()
    }
    /// Returns PCV value at given grid node, expressed as zenith distance
    /// and azimuth angles in degrees. Azimuth is ignored for NOAZI patterns.
    /// No interpolation is performed: coordinates must match a grid node.
    pub fn pcv_at(&self, zenith_deg: f64, azimuth_deg: f64) -> Option<f64> {
        let z = self.zenith.index_of(zenith_deg)?;
        let a = match self.azimuth {
            Some(azi) => azi.index_of(azimuth_deg)?,
            None => 0,
        };
        self.pcv(z, a)
    }
    /// Smallest PCV value
    pub fn min_pcv(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }
    /// Largest PCV value
    pub fn max_pcv(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
    /// Zenith axis expressed as altitude (elevation) axis
    pub fn altitude_axis(&self) -> AxisSpec {
        self.zenith.to_altitude()
    }
    /// Returns a [PcvGrid] view of this pattern
    pub fn grid(&self) -> PcvGrid<'_> {
        PcvGrid::new(self)
    }
    /// Returns `reference - self`, for each grid node.
    /// Both patterns must share the same axes.
    pub fn difference(&self, reference: &Self) -> Result<Self, Error> {
        if self.zenith != reference.zenith || self.azimuth != reference.azimuth {
            return Err(Error::GridMismatch);
        }
        let values = reference
            .values
            .iter()
            .zip(self.values.iter())
            .map(|(r, v)| r - v)
            .collect();
        Ok(Self {
            label: format!("{}-{}", reference.label, self.label),
            zenith: self.zenith,
            azimuth: self.azimuth,
            values,
        })
    }
    /// File stem for exported products: whitespace replaced by '_',
    /// lower case.
    pub fn file_stem(&self) -> String {
        self.label
            .split_ascii_whitespace()
            .join("_")
            .to_lowercase()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    fn leiar25() -> Antenna {
        Antenna::new(
            "LEIAR25.R4      LEIT",
            AxisSpec::new(0.0, 10.0, 5.0),
            Some(AxisSpec::new(0.0, 360.0, 120.0)),
            vec![0.0, 0.1, 0.2, 1.0, 1.1, 1.2],
        )
        .unwrap()
    }
    #[test]
    fn antenna_accessors() {
        let ant = leiar25();
        assert_eq!(ant.label(), "LEIAR25.R4 LEIT");
        assert!(!ant.is_noazi());
        assert_eq!(ant.num_zenith_points(), 2);
        assert_eq!(ant.num_azimuth_points(), 3);
        assert_eq!(ant.pcv(0, 0), Some(0.0));
        assert_eq!(ant.pcv(0, 2), Some(0.2));
        assert_eq!(ant.pcv(1, 1), Some(1.1));
        assert_eq!(ant.pcv(2, 0), None);
        assert_eq!(ant.pcv(0, 3), None);
        assert_eq!(ant.pcv_at(5.0, 240.0), Some(1.2));
        assert_eq!(ant.pcv_at(5.0, 241.0), None);
        assert_eq!(ant.min_pcv(), 0.0);
        assert_eq!(ant.max_pcv(), 1.2);
        assert_eq!(ant.file_stem(), "leiar25.r4_leit");
    }
    #[test]
    fn noazi_antenna() {
        let ant = Antenna::new(
            "TRM41249.00 NONE",
            AxisSpec::new(0.0, 3.0, 1.0),
            Some(AxisSpec::new(0.0, 0.0, 0.0)),
            vec![-1.0, 0.0, 1.0],
        )
        .unwrap();
        assert!(ant.is_noazi());
        assert!(ant.azimuth().is_none());
        assert_eq!(ant.num_azimuth_points(), 1);
        assert_eq!(ant.pcv(2, 0), Some(1.0));
        assert_eq!(ant.pcv(2, 1), None);
        assert_eq!(ant.pcv_at(1.0, 123.0), Some(0.0));
    }
    #[test]
    fn value_count() {
        let err = Antenna::new(
            "TEST",
            AxisSpec::new(0.0, 3.0, 1.0),
            None,
            vec![0.0, 1.0],
        )
        .unwrap_err();
        match err {
            Error::ValueCount { expected, found } => {
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            },
            e => panic!("unexpected error {:?}", e),
        }
        assert!(Antenna::new("TEST", AxisSpec::new(0.0, 0.0, 0.0), None, vec![]).is_err());
    }
    #[test]
    fn empty_label() {
        match Antenna::new("  \n ", AxisSpec::new(0.0, 1.0, 1.0), None, vec![0.0]) {
            Err(Error::Parsing(ParsingError::MalformedRecord(_))) => {},
            r => panic!("unexpected result {:?}", r),
        }
    }
    #[test]
    fn oversized_grid() {
        let axis = AxisSpec::new(0.0, 1.0E10, 1.0);
        assert_eq!(expected_values(&axis, Some(&axis)), None);
        match Antenna::new("HUGE", axis, Some(axis), vec![0.0]) {
            Err(Error::Parsing(ParsingError::InvalidAxis(_))) => {},
            r => panic!("unexpected result {:?}", r),
        }
    }
    #[test]
    fn difference() {
        let ant = leiar25();
        let diff = ant.difference(&ant).unwrap();
        assert_eq!(diff.label(), "LEIAR25.R4 LEIT-LEIAR25.R4 LEIT");
        assert!(diff.values().iter().all(|v| *v == 0.0));

        let other = Antenna::new(
            "LEIAR25.R4 NONE",
            AxisSpec::new(0.0, 10.0, 5.0),
            Some(AxisSpec::new(0.0, 360.0, 120.0)),
            vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0],
        )
        .unwrap();
        let diff = ant.difference(&other).unwrap();
        assert_eq!(diff.label(), "LEIAR25.R4 NONE-LEIAR25.R4 LEIT");
        assert_eq!(diff.pcv(0, 0), Some(1.0));
        assert_eq!(diff.pcv(1, 0), Some(1.0));

        let noazi = Antenna::new("NOAZI", AxisSpec::new(0.0, 10.0, 5.0), None, vec![0.0, 0.0])
            .unwrap();
        assert!(matches!(ant.difference(&noazi), Err(Error::GridMismatch)));
    }
}
