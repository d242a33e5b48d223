//! Wind Direction
//!
//! Meteorological wind direction is the bearing the wind blows *from*,
//! in degrees clockwise from true north. The dashboard names it with the
//! 16-point compass rose:
//!
//! ```text
//!                N
//!          NNW   |   NNE
//!       NW       |       NE
//!     WNW        |        ENE
//!    W ----------+---------- E
//!     WSW        |        ESE
//!       SW       |       SE
//!          SSW   |   SSE
//!                S
//! ```
//!
//! Each point owns a 22.5° sector centred on its bearing, so N covers
//! `[348.75, 11.25)`. The sector is `floor(angle / 22.5 + 0.5) mod 16`,
//! which puts an exact boundary (11.25°) into the clockwise neighbour.
//! Negative and >360° angles wrap.

use core::fmt;

use serde::Serialize;

use crate::constants::thresholds::{COMPASS_SECTORS, COMPASS_SECTOR_DEGREES};

use super::Classifier;

/// Sixteen-point compass rose, clockwise from north
///
/// Serialises as its abbreviation (`"NNE"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    /// All points in sector order
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::N,
        CompassPoint::NNE,
        CompassPoint::NE,
        CompassPoint::ENE,
        CompassPoint::E,
        CompassPoint::ESE,
        CompassPoint::SE,
        CompassPoint::SSE,
        CompassPoint::S,
        CompassPoint::SSW,
        CompassPoint::SW,
        CompassPoint::WSW,
        CompassPoint::W,
        CompassPoint::WNW,
        CompassPoint::NW,
        CompassPoint::NNW,
    ];

    /// Compass point for a bearing in degrees. `None` for non-finite input.
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        if !degrees.is_finite() {
            return None;
        }

        let sector = libm::floor(degrees / COMPASS_SECTOR_DEGREES + 0.5) as i64;
        let index = sector.rem_euclid(COMPASS_SECTORS as i64) as usize;
        Some(Self::ALL[index])
    }

    /// Sector index, 0 for N through 15 for NNW
    pub fn index(self) -> usize {
        self as usize
    }

    /// Abbreviation shown on the dashboard
    pub fn abbreviation(self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }

    /// Bearing at the centre of this point's sector
    pub fn center_degrees(self) -> f64 {
        self.index() as f64 * COMPASS_SECTOR_DEGREES
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Maps a wind bearing to its compass point
#[derive(Debug, Clone, Copy, Default)]
pub struct WindDirectionClassifier;

impl Classifier for WindDirectionClassifier {
    type Output = CompassPoint;

    fn classify(&self, raw: f64) -> Option<CompassPoint> {
        CompassPoint::from_degrees(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(degrees: f64) -> &'static str {
        CompassPoint::from_degrees(degrees).unwrap().abbreviation()
    }

    #[test]
    fn north_at_both_ends() {
        assert_eq!(point(0.0), "N");
        assert_eq!(point(360.0), "N");
        assert_eq!(point(348.75), "N");
        assert_eq!(point(11.24), "N");
    }

    #[test]
    fn boundary_goes_clockwise() {
        assert_eq!(point(11.25), "NNE");
        assert_eq!(point(33.75), "NE");
        assert_eq!(point(348.74), "NNW");
    }

    #[test]
    fn cardinal_points() {
        assert_eq!(point(90.0), "E");
        assert_eq!(point(180.0), "S");
        assert_eq!(point(270.0), "W");
    }

    #[test]
    fn wraps_out_of_range_angles() {
        assert_eq!(point(-22.5), "NNW");
        assert_eq!(point(-90.0), "W");
        assert_eq!(point(450.0), "E");
        assert_eq!(point(720.0), "N");
    }

    #[test]
    fn non_finite_is_unavailable() {
        assert!(CompassPoint::from_degrees(f64::NAN).is_none());
        assert!(WindDirectionClassifier.classify_reading(None).is_none());
    }

    #[test]
    fn centers_round_trip() {
        for point in CompassPoint::ALL {
            assert_eq!(CompassPoint::from_degrees(point.center_degrees()), Some(point));
        }
        assert_eq!(CompassPoint::SW.to_string(), "SW");
    }

    #[test]
    fn serializes_as_abbreviation() {
        for point in CompassPoint::ALL {
            let json = serde_json::to_string(&point).unwrap();
            assert_eq!(json, format!("\"{}\"", point.abbreviation()));
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_finite_angle_has_a_point(angle in -1.0e6f64..1.0e6) {
                prop_assert!(CompassPoint::from_degrees(angle).is_some());
            }

            #[test]
            fn full_turn_is_identity(angle in 0.0f64..360.0) {
                prop_assert_eq!(
                    CompassPoint::from_degrees(angle),
                    CompassPoint::from_degrees(angle + 360.0)
                );
            }

            #[test]
            fn within_half_sector_of_center(angle in 0.0f64..360.0) {
                let point = CompassPoint::from_degrees(angle).unwrap();
                let mut delta = (angle - point.center_degrees()).abs();
                if delta > 180.0 {
                    delta = 360.0 - delta;
                }
                prop_assert!(delta <= COMPASS_SECTOR_DEGREES / 2.0 + 1e-9);
            }
        }
    }
}
