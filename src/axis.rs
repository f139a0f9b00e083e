//! Grid axis definition
use std::str::FromStr;

use crate::prelude::ParsingError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used when comparing grid coordinates
/// and when snapping point counts to the closest integer.
pub(crate) const GRID_TOLERANCE: f64 = 1.0E-9;

/// Half open linear space, as used in antenna grid definitions.
/// Starts at `start` and ranges up to `stop` (excluded), with
/// `step` increment.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisSpec {
    /// First grid point
    pub start: f64,
    /// Grid end (excluded)
    pub stop: f64,
    /// Increment between two grid points
    pub step: f64,
}

impl AxisSpec {
    /// Builds a new [AxisSpec]
    pub fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }
    /// Returns true if this axis does not describe a grid,
    /// which is the NOAZI signal for azimuth axes.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.stop || self.step == 0.0
    }
    /// Returns number of grid points, `floor((stop - start) / step)`.
    /// Ratios within [GRID_TOLERANCE] of an integer are snapped first,
    /// so binary noise does not lose the last point.
    /// Axes whose point count does not fit in a `usize` describe no grid
    /// and return 0.
    pub fn num_points(&self) -> usize {
        if self.step == 0.0 {
            return 0;
        }
        let ratio = (self.stop - self.start) / self.step;
        if !ratio.is_finite() || ratio <= 0.0 || ratio >= usize::MAX as f64 {
            return 0;
        }
        let rounded = ratio.round();
        if (ratio - rounded).abs() < GRID_TOLERANCE {
            rounded as usize
        } else {
            ratio.floor() as usize
        }
    }
    /// Returns i-th grid point
    pub fn value(&self, i: usize) -> Option<f64> {
        if i < self.num_points() {
            Some(self.start + i as f64 * self.step)
        } else {
            None
        }
    }
    /// Returns index of the grid point matching `x`, if any
    pub fn index_of(&self, x: f64) -> Option<usize> {
        if self.step == 0.0 {
            return None;
        }
        let i = ((x - self.start) / self.step).round();
        if i < 0.0 || !i.is_finite() {
            return None;
        }
        let i = i as usize;
        let point = self.value(i)?;
        if (point - x).abs() < GRID_TOLERANCE {
            Some(i)
        } else {
            None
        }
    }
    /// Iterates over all grid points
    pub fn points(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        Box::new((0..self.num_points()).map(move |i| self.start + i as f64 * self.step))
    }
    /// Converts a zenith distance axis into an altitude axis
    /// (and the other way around). Point count is preserved:
    /// the step sign flips together with the bounds.
    pub fn to_altitude(&self) -> Self {
        Self {
            start: 90.0 - self.start,
            stop: 90.0 - self.stop,
            step: -self.step,
        }
    }
}

impl From<(f64, f64, f64)> for AxisSpec {
    fn from(tuple: (f64, f64, f64)) -> Self {
        Self {
            start: tuple.0,
            stop: tuple.1,
            step: tuple.2,
        }
    }
}

impl std::fmt::Display for AxisSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {} {}", self.start, self.stop, self.step)
    }
}

impl FromStr for AxisSpec {
    type Err = ParsingError;
    /// Parses "<start> <stop> <step>"
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let items: Vec<&str> = content.split_ascii_whitespace().collect();
        if items.len() != 3 {
            return Err(ParsingError::MalformedRecord(content.to_string()));
        }
        let mut fields = [0.0_f64; 3];
        for (field, item) in fields.iter_mut().zip(items.iter()) {
            *field = f64::from_str(item)
                .or(Err(ParsingError::NumericParse(item.to_string())))?;
        }
        Ok(Self::new(fields[0], fields[1], fields[2]))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn axis_points() {
        let axis = AxisSpec::new(0.0, 90.0, 5.0);
        assert_eq!(axis.num_points(), 18);
        assert!(!axis.is_degenerate());
        assert_eq!(axis.value(0), Some(0.0));
        assert_eq!(axis.value(17), Some(85.0));
        assert_eq!(axis.value(18), None);
        assert_eq!(axis.points().last(), Some(85.0));
        assert_eq!(axis.index_of(45.0), Some(9));
        assert_eq!(axis.index_of(46.0), None);
        assert_eq!(axis.index_of(90.0), None);
    }
    #[test]
    fn axis_floor() {
        assert_eq!(AxisSpec::new(0.0, 10.0, 3.0).num_points(), 3);
        assert_eq!(AxisSpec::new(0.0, 0.3, 0.1).num_points(), 3);
        assert_eq!(AxisSpec::new(0.0, 360.0, 1.0).num_points(), 360);
    }
    #[test]
    fn degenerate_axis() {
        for axis in [
            AxisSpec::new(0.0, 0.0, 0.0),
            AxisSpec::new(0.0, 0.0, 5.0),
            AxisSpec::new(0.0, 360.0, 0.0),
            AxisSpec::new(30.0, 30.0, 1.0),
        ] {
            assert!(axis.is_degenerate(), "{:?} should be degenerate", axis);
            assert_eq!(axis.num_points(), 0);
        }
    }
    #[test]
    fn oversized_axis() {
        assert_eq!(AxisSpec::new(0.0, 1.0E300, 1.0).num_points(), 0);
        assert_eq!(AxisSpec::new(0.0, f64::INFINITY, 1.0).num_points(), 0);
    }
    #[test]
    fn reversed_axis() {
        assert_eq!(AxisSpec::new(90.0, 0.0, 1.0).num_points(), 0);
        assert_eq!(AxisSpec::new(90.0, 0.0, -1.0).num_points(), 90);
    }
    #[test]
    fn altitude_transform() {
        let zenith = AxisSpec::new(0.0, 90.0, 1.0);
        let altitude = zenith.to_altitude();
        assert_eq!(altitude, AxisSpec::new(90.0, 0.0, -1.0));
        assert_eq!(altitude.num_points(), 90);
        assert_eq!(altitude.value(0), Some(90.0));
        assert_eq!(altitude.value(89), Some(1.0));
        assert_eq!(altitude.to_altitude(), zenith);
    }
    #[test]
    fn axis_parsing() {
        let axis = AxisSpec::from_str("  0 90.0   5 ").unwrap();
        assert_eq!(axis, AxisSpec::from((0.0, 90.0, 5.0)));
        assert_eq!(axis.to_string(), "0 90 5");
        assert_eq!(
            AxisSpec::from_str("0 90"),
            Err(ParsingError::MalformedRecord("0 90".to_string()))
        );
        assert_eq!(
            AxisSpec::from_str("0 ninety 5"),
            Err(ParsingError::NumericParse("ninety".to_string()))
        );
    }
}
