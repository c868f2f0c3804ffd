// THEORY:
// The bounding-box utility answers "what rectangle, at this angle, encloses these
// points?" It is independent of the calipers search: given any point set and any
// angle it centres the set on its mean, moves it into the rotated frame, takes the
// axis-aligned box there, and maps the four corners back to the original frame.
//
// It is how a calipers result (an angle plus an area) becomes a concrete polygon
// that can be drawn or checked.
//
// Centring uses the mean of each axis separately. Centring does not change the
// shape of the box, only the translation used for the round trip.

use crate::core_modules::error::{GeometryError, Result};
use crate::core_modules::point::point::Point;
use crate::core_modules::rotation::Rotation;

/// An axis-aligned box, in whatever frame its points were expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// The tightest box around `points`, or `None` when there are no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Bounds {
            min: first,
            max: first,
        };
        for p in points {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Corners in the order (min, min), (min, max), (max, max), (max, min).
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min.x, self.min.y),
            Point::new(self.min.x, self.max.y),
            Point::new(self.max.x, self.max.y),
            Point::new(self.max.x, self.min.y),
        ]
    }
}

/// Per-axis mean of a non-empty point set.
pub fn centroid(points: &[Point]) -> Result<Point> {
    if points.is_empty() {
        return Err(GeometryError::EmptyPointSet);
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Ok(Point::new(sx / n, sy / n))
}

/// The box enclosing `points` in the frame rotated by `angle`, as four corners in
/// the original frame.
pub fn rotated_bbox_corners(points: &[Point], angle: f64) -> Result<[Point; 4]> {
    let mean = centroid(points)?;
    let rotation = Rotation::new(angle);

    let bounds = Bounds::from_points(points.iter().map(|p| rotation.to_frame(&p.sub(&mean))))
        .ok_or(GeometryError::EmptyPointSet)?;

    Ok(bounds.corners().map(|corner| {
        let p = rotation.from_frame(&corner);
        Point::new(p.x + mean.x, p.y + mean.y)
    }))
}
