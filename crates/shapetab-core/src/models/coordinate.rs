//! Coordinate types shared by the formatter, the projection and the output rows.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in WGS 84 decimal degrees, longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// True when both components fall inside the WGS 84 domain.
    pub fn is_in_range(&self) -> bool {
        (-180.0..=180.0).contains(&self.lon) && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.x(), point.y())
    }
}

/// A Web Mercator coordinate in whole meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedCoordinate {
    pub x: i64,
    pub y: i64,
}

impl ProjectedCoordinate {
    /// Round projected meters to the nearest integer meter.
    ///
    /// Ties go to the even neighbour. Non-finite input saturates
    /// (`NaN` becomes 0, infinities clamp to the `i64` bounds).
    pub fn from_meters(x: f64, y: f64) -> Self {
        Self {
            x: x.round_ties_even() as i64,
            y: y.round_ties_even() as i64,
        }
    }
}
