//! Geographic coordinates and geodesic distance.

use std::fmt;
use std::str::FromStr;

use geo::{Distance, Geodesic, Point};

/// Error returned when a latitude/longitude pair is out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

impl InvalidCoordinate {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A WGS84 position in degrees.
///
/// Both components are finite, latitude is within [-90, 90] and longitude
/// within [-180, 180]. Any `Coordinate` value is valid by construction.
///
/// # Examples
///
/// ```
/// use route_matcher::domain::Coordinate;
///
/// let hsr = Coordinate::new(24.80818, 121.0405).unwrap();
/// assert_eq!(hsr.lat(), 24.80818);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoordinate::new("latitude and longitude must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate::new("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinate::new("longitude must be within [-180, 180]"));
        }
        Ok(Self { lat, lng })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Geodesic distance to `other` in metres.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance(*self, *other)
    }

    fn to_point(self) -> Point<f64> {
        // geo points are (x, y) = (lng, lat)
        Point::new(self.lng, self.lat)
    }
}

/// Distance in metres between two coordinates along the WGS84 ellipsoid.
///
/// Uses Karney's geodesic algorithm, which stays accurate to well under a
/// metre at city and regional scale.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    Geodesic.distance(a.to_point(), b.to_point())
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Error returned when parsing a `"lat,lng"` string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseCoordinateError {
    #[error("expected \"lat,lng\"")]
    Format,

    #[error("{0:?} is not a number")]
    Number(String),

    #[error(transparent)]
    Range(#[from] InvalidCoordinate),
}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s.split_once(',').ok_or(ParseCoordinateError::Format)?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| ParseCoordinateError::Number(part.trim().to_string()))
        };
        Ok(Coordinate::new(parse(lat)?, parse(lng)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn accepts_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(90.0001, 0.0).is_err());
        assert!(Coordinate::new(-90.0001, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.0001).is_err());
        assert!(Coordinate::new(0.0, -180.0001).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinate::new(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn one_degree_of_latitude_near_equator() {
        // Roughly 110.57 km on the WGS84 ellipsoid
        let d = distance(coord(0.0, 0.0), coord(1.0, 0.0));
        assert!((d - 110_574.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn city_scale_distance() {
        // Two points in Hsinchu about 1.1 km apart along a meridian
        let a = coord(24.80818, 121.0405);
        let b = coord(24.81818, 121.0405);
        let d = a.distance_to(&b);
        assert!((d - 1108.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn parse_from_str() {
        let c: Coordinate = "24.80818, 121.0405".parse().unwrap();
        assert_eq!(c.lat(), 24.80818);
        assert_eq!(c.lng(), 121.0405);

        assert_eq!(
            "24.8".parse::<Coordinate>(),
            Err(ParseCoordinateError::Format)
        );
        assert!(matches!(
            "north,121".parse::<Coordinate>(),
            Err(ParseCoordinateError::Number(_))
        ));
        assert!(matches!(
            "95,121".parse::<Coordinate>(),
            Err(ParseCoordinateError::Range(_))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(coord(24.80818, 121.0405).to_string(), "24.80818,121.0405");
    }
}
