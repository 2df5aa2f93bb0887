use std::fmt;

use crate::{Error, Result};

/// A point in the plane.
///
/// Equality is exact component-wise comparison, which is what value lookups in
/// [`PointSet`](crate::PointSet) rely on. For geographic use `x` holds the
/// longitude and `y` the latitude, both in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn from_lat_lng(lat: f64, lng: f64) -> Self {
        Self { x: lng, y: lat }
    }

    pub fn lat(&self) -> f64 {
        self.y
    }

    pub fn lng(&self) -> f64 {
        self.x
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rejects points carrying NaN or infinite coordinates.
    pub(crate) fn validated(self) -> Result<Self> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(Error::invalid_data(format!(
                "point ({:?}, {:?}) has a non-finite coordinate",
                self.x, self.y
            )))
        }
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bx = ryu::Buffer::new();
        let mut by = ryu::Buffer::new();
        write!(f, "{},{}", bx.format(self.x), by.format(self.y))
    }
}
