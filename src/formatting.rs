//! Grid file production
use std::io::Write;

use crate::{
    antenna::Antenna,
    parsing::{ANTENNA_TAG, AZIMUTH_TAG, ZENITH_TAG},
    prelude::Error,
};

#[cfg(feature = "log")]
use log::debug;

/// Formatting settings
#[derive(Debug, Clone, PartialEq)]
pub struct FormattingOptions {
    /// Terminate each antenna block with the end marker
    pub end_marker: Option<String>,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            end_marker: Some("EOA".to_string()),
        }
    }
}

impl FormattingOptions {
    /// Do not terminate antenna blocks with an explicit marker
    pub fn without_end_marker(&self) -> Self {
        let mut s = self.clone();
        s.end_marker = None;
        s
    }
    pub fn with_end_marker(&self, marker: &str) -> Self {
        let mut s = self.clone();
        s.end_marker = Some(marker.to_string());
        s
    }
}

impl Antenna {
    /// Formats this [Antenna] block into given [Write]able interface.
    /// Values are printed in their shortest exact representation,
    /// so parsing the output gives back the same [Antenna].
    pub fn format<W: Write>(&self, w: &mut W, opts: &FormattingOptions) -> Result<(), Error> {
        writeln!(w, "{} {}", ANTENNA_TAG, self.label())?;
        writeln!(w, "{} {}", ZENITH_TAG, self.zenith())?;
        match self.azimuth() {
            Some(azimuth) => writeln!(w, "{} {}", AZIMUTH_TAG, azimuth)?,
            None => writeln!(w, "{} 0 0 0", AZIMUTH_TAG)?,
        }
        for value in self.values() {
            writeln!(w, "{}", value)?;
        }
        if let Some(marker) = &opts.end_marker {
            writeln!(w, "{}", marker)?;
        }
        #[cfg(feature = "log")]
        debug!("\"{}\": {} pcv values formatted", self.label(), self.values().len());
        Ok(())
    }
}

impl std::fmt::Display for Antenna {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut buf = Vec::<u8>::new();
        self.format(&mut buf, &FormattingOptions::default())
            .or(Err(std::fmt::Error))?;
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}

/// Formats all [Antenna]s into given [Write]able interface
pub fn to_writer<'a, W: Write>(
    w: &mut W,
    antennas: impl IntoIterator<Item = &'a Antenna>,
    opts: &FormattingOptions,
) -> Result<(), Error> {
    for antenna in antennas {
        antenna.format(w, opts)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::axis::AxisSpec;
    #[test]
    fn noazi_formatting() {
        let antenna = Antenna::new(
            "LEIAR25.R4 NONE",
            AxisSpec::new(0.0, 2.0, 1.0),
            None,
            vec![1.0, -2.5],
        )
        .unwrap();
        assert_eq!(
            antenna.to_string(),
            "ANT: LEIAR25.R4 NONE\nZEN: 0 2 1\nAZI: 0 0 0\n1\n-2.5\nEOA\n"
        );
        let mut buf = Vec::<u8>::new();
        antenna
            .format(&mut buf, &FormattingOptions::default().without_end_marker())
            .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "ANT: LEIAR25.R4 NONE\nZEN: 0 2 1\nAZI: 0 0 0\n1\n-2.5\n"
        );
    }
    #[test]
    fn azi_formatting() {
        let antenna = Antenna::new(
            "TPSCR.G3 TPSH",
            AxisSpec::new(0.0, 10.0, 5.0),
            Some(AxisSpec::new(0.0, 360.0, 180.0)),
            vec![0.1, 0.2, 0.3, 0.4],
        )
        .unwrap();
        let mut buf = Vec::<u8>::new();
        to_writer(
            &mut buf,
            [&antenna, &antenna],
            &FormattingOptions::default().with_end_marker("END"),
        )
        .unwrap();
        let content = String::from_utf8(buf).unwrap();
        assert_eq!(content.lines().count(), 2 * 8);
        assert!(content.starts_with("ANT: TPSCR.G3 TPSH\nZEN: 0 10 5\nAZI: 0 360 180\n0.1\n"));
        assert!(content.ends_with("0.4\nEND\n"));
    }
}
