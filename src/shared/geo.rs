use std::{
    cmp,
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Div, Mul, Sub},
};

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS: Distance = Distance::from_kilometers(6371.0);

#[derive(Debug, Clone, Copy, Default)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Add for Distance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Distance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl Sub for Distance {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for Distance {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Ratio between two distances.
impl Div for Distance {
    type Output = f64;
    fn div(self, rhs: Self) -> Self::Output {
        self.0 / rhs.0
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|distance| distance.0).sum())
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.as_kilometers() < 1.0 {
            write!(f, "{} m", self.as_meters().round())
        } else {
            write!(f, "{:.2} km", self.as_kilometers())
        }
    }
}

impl Distance {
    pub const ZERO: Distance = Distance(0.0);

    pub const fn from_meters(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn from_kilometers(distance: f64) -> Self {
        Self(distance * 1000.0)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }

    pub const fn as_kilometers(&self) -> f64 {
        self.0 / 1000.0
    }
}

/// A latitude/longitude pair in decimal degrees.
///
/// Serialized as a `[lat, lng]` array so snapshots stay compatible with
/// map tooling that works on plain tuples.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle (haversine) distance.
    pub fn distance(&self, coord: &Self) -> Distance {
        let dist_lat = f64::to_radians(coord.latitude - self.latitude);
        let dist_lon = f64::to_radians(coord.longitude - self.longitude);
        let a = f64::powi(f64::sin(dist_lat / 2.0), 2)
            + f64::cos(f64::to_radians(self.latitude))
                * f64::cos(f64::to_radians(coord.latitude))
                * f64::sin(dist_lon / 2.0)
                * f64::sin(dist_lon / 2.0);
        let c = 2.0 * f64::atan2(f64::sqrt(a), f64::sqrt(1.0 - a));
        EARTH_RADIUS * c
    }

    /// Linear interpolation in degree space, `t` in [0, 1].
    pub fn lerp(&self, coord: &Self, t: f64) -> Self {
        Self {
            latitude: self.latitude + (coord.latitude - self.latitude) * t,
            longitude: self.longitude + (coord.longitude - self.longitude) * t,
        }
    }
}

/// Sum of great-circle distances over consecutive points.
pub fn path_length(points: &[Coordinate]) -> Distance {
    if points.len() < 2 {
        return Distance::ZERO;
    }
    points
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .sum()
}

/// Nearest point on the finite segment `start..end`.
///
/// The interpolation parameter is found in degree space and clamped to [0, 1].
/// A zero-length segment projects onto `start`.
pub fn project_onto_segment(point: &Coordinate, start: &Coordinate, end: &Coordinate) -> Coordinate {
    let a = point.latitude - start.latitude;
    let b = point.longitude - start.longitude;
    let c = end.latitude - start.latitude;
    let d = end.longitude - start.longitude;

    let len_sq = c * c + d * d;
    if len_sq == 0.0 {
        return *start;
    }

    let t = ((a * c + b * d) / len_sq).clamp(0.0, 1.0);
    start.lerp(end, t)
}

pub fn distance_to_segment(point: &Coordinate, start: &Coordinate, end: &Coordinate) -> Distance {
    point.distance(&project_onto_segment(point, start, end))
}

#[test]
fn distance_test() {
    let coord_a = Coordinate {
        latitude: 48.85800943005911,
        longitude: 2.3514350059357927,
    };

    let coord_b = Coordinate {
        latitude: 51.5052389927712,
        longitude: -0.12495407345099824,
    };
    let d = coord_a.distance(&coord_b);
    assert!((d.as_kilometers() - 343.08).abs() < 0.5);
}

#[test]
fn distance_eq_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(1.0);
    assert_eq!(dist_a, dist_b)
}

#[test]
fn distance_cmp_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(0.5);
    assert!(dist_a > dist_b)
}

#[test]
fn distance_display_test() {
    assert_eq!(Distance::from_meters(420.4).to_string(), "420 m");
    assert_eq!(Distance::from_kilometers(1.2345).to_string(), "1.23 km");
}
