use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use chrono::{DateTime, Utc};

pub type Timestamp = DateTime<Utc>;

/// Milliseconds since the Unix epoch, the resolution trains record their last update in.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Simulated elapsed time in (fractional) milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Duration(f64);

impl From<f64> for Duration {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<std::time::Duration> for Duration {
    fn from(value: std::time::Duration) -> Self {
        Self(value.as_secs_f64() * 1000.0)
    }
}

impl Duration {
    pub const ZERO: Duration = Duration(0.0);

    pub const fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    pub const fn from_seconds(secs: f64) -> Self {
        Self(secs * 1000.0)
    }

    pub const fn from_minutes(minutes: f64) -> Self {
        Self(minutes * 60.0 * 1000.0)
    }

    pub const fn from_hours(hours: f64) -> Self {
        Self(hours * 60.0 * 60.0 * 1000.0)
    }

    pub const fn as_millis(&self) -> f64 {
        self.0
    }

    pub const fn as_seconds(&self) -> f64 {
        self.0 / 1000.0
    }

    pub const fn as_hours(&self) -> f64 {
        self.0 / (60.0 * 60.0 * 1000.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 <= 0.0
    }

    /// Subtraction floored at zero.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self((self.0 - rhs.0).max(0.0))
    }

    pub fn min(self, rhs: Self) -> Self {
        Self(self.0.min(rhs.0))
    }
}

impl Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl Mul<f64> for Duration {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

#[test]
fn conversion_test() {
    assert_eq!(Duration::from_seconds(1.5).as_millis(), 1500.0);
    assert_eq!(Duration::from_hours(0.5).as_seconds(), 1800.0);
    assert_eq!(Duration::from_minutes(90.0).as_hours(), 1.5);
}

#[test]
fn saturating_sub_test() {
    let wait = Duration::from_millis(10.0);
    assert_eq!(wait.saturating_sub(Duration::from_millis(25.0)), Duration::ZERO);
    assert!(wait.saturating_sub(Duration::from_millis(25.0)).is_zero());
    assert_eq!(
        wait.saturating_sub(Duration::from_millis(4.0)),
        Duration::from_millis(6.0)
    );
}

#[test]
fn std_conversion_test() {
    let std = std::time::Duration::from_millis(250);
    assert_eq!(Duration::from(std).as_millis(), 250.0);
}
