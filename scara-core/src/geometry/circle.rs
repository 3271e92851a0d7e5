//! Two-circle intersection
//!
//! Chord-midpoint construction: with `d` the distance between centres,
//! `a = (r1² - r2² + d²) / (2d)` locates the chord midpoint along the
//! centre line and `h = sqrt(r1² - a²)` is the half-chord. The arithmetic
//! is kept in exactly this form so results match recorded test vectors
//! bit for bit.

use super::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A circle in the drawing plane
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    /// Create a circle from centre coordinates and radius
    pub const fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            center: Point::new(x, y),
            radius,
        }
    }
}

/// Why two circles have no usable intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntersectionError {
    /// Centres further apart than the sum of the radii
    TooFarApart,
    /// One circle lies entirely inside the other
    Contained,
    /// Same centre and radius; infinitely many intersections
    Coincident,
}

/// Intersect two circles
///
/// Returns both intersection points. For tangent circles the two points
/// coincide.
pub fn circle_intersection(c1: Circle, c2: Circle) -> Result<(Point, Point), IntersectionError> {
    let (x1, y1, r1) = (c1.center.x, c1.center.y, c1.radius);
    let (x2, y2, r2) = (c2.center.x, c2.center.y, c2.radius);

    let dx = x2 - x1;
    let dy = y2 - y1;
    let d = libm::sqrt(dx * dx + dy * dy);

    if d > r1 + r2 {
        return Err(IntersectionError::TooFarApart);
    }
    if d < libm::fabs(r1 - r2) {
        return Err(IntersectionError::Contained);
    }
    if d == 0.0 && r1 == r2 {
        return Err(IntersectionError::Coincident);
    }

    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    // Rounding can push r1² - a² a hair below zero for tangent circles
    let h = libm::sqrt(libm::fmax(r1 * r1 - a * a, 0.0));
    let xm = x1 + a * dx / d;
    let ym = y1 + a * dy / d;

    let p1 = Point::new(xm + h * dy / d, ym - h * dx / d);
    let p2 = Point::new(xm - h * dy / d, ym + h * dx / d);
    Ok((p1, p2))
}
