//! Straight line and circle outlines as point sequences
//!
//! The arm only moves point to point, so longer shapes are drawn by
//! visiting closely spaced points along the outline.

use super::kinematics::DEG_TO_RAD;
use super::Point;

/// Number of straight segments used to approximate a circle
pub const CIRCLE_SEGMENTS: u32 = 60;

/// Points from `start` to `end`, roughly one unit apart
///
/// Yields `trunc(length)` evenly spaced points starting at `start`,
/// followed by `end` itself.
#[derive(Debug, Clone)]
pub struct LinePath {
    start: Point,
    end: Point,
    segments: u32,
    index: u32,
}

impl LinePath {
    pub fn new(start: Point, end: Point) -> Self {
        let length = start.distance_to(end);
        Self {
            start,
            end,
            segments: libm::trunc(length) as u32,
            index: 0,
        }
    }

    /// Number of segments the line is split into
    pub fn segments(&self) -> u32 {
        self.segments
    }
}

impl Iterator for LinePath {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.index > self.segments {
            return None;
        }
        let i = self.index;
        self.index += 1;
        if i == self.segments {
            return Some(self.end);
        }
        let n = self.segments as f64;
        let t = i as f64;
        Some(Point::new(
            self.start.x + (self.end.x - self.start.x) / n * t,
            self.start.y + (self.end.y - self.start.y) / n * t,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.segments + 1).saturating_sub(self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LinePath {}

/// Closed outline of a circle, counter-clockwise from angle 0
///
/// Yields `CIRCLE_SEGMENTS + 1` points; the last repeats the first.
#[derive(Debug, Clone)]
pub struct CirclePath {
    center: Point,
    radius: f64,
    index: u32,
}

impl CirclePath {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            index: 0,
        }
    }
}

impl Iterator for CirclePath {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.index > CIRCLE_SEGMENTS {
            return None;
        }
        let step_deg = 360.0 / CIRCLE_SEGMENTS as f64;
        let theta = self.index as f64 * step_deg * DEG_TO_RAD;
        self.index += 1;
        Some(Point::new(
            self.radius * libm::cos(theta) + self.center.x,
            self.radius * libm::sin(theta) + self.center.y,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (CIRCLE_SEGMENTS + 1).saturating_sub(self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CirclePath {}
