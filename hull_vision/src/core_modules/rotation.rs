// THEORY:
// A `Rotation` caches the cosine and sine of one angle so that many points can be
// moved into (and back out of) a rotated frame with a single trigonometric
// evaluation.
//
// The frame convention is the row-vector product `p · R` with
// `R = [[cos, -sin], [sin, cos]]`. `R` is orthonormal, so its inverse is its
// transpose: `from_frame` applies `p · Rᵀ` and never recomputes an angle.

use crate::core_modules::point::point::Point;

/// The cached cosine/sine of one frame angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    cos: f64,
    sin: f64,
}

impl Rotation {
    /// A rotation of `theta` radians.
    pub fn new(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self { cos, sin }
    }

    /// Maps a point into the rotated frame: `p · R`.
    #[inline]
    pub fn to_frame(&self, p: &Point) -> Point {
        Point::new(p.x * self.cos + p.y * self.sin, p.y * self.cos - p.x * self.sin)
    }

    /// Maps a frame point back out: `p · Rᵀ`.
    #[inline]
    pub fn from_frame(&self, p: &Point) -> Point {
        Point::new(p.x * self.cos - p.y * self.sin, p.x * self.sin + p.y * self.cos)
    }
}
