// THEORY:
// The rotating calipers optimizer finds the minimum-area rectangle, at any
// orientation, that encloses a convex polygon.
//
// The search relies on Toussaint's observation (Toussaint, "Solving geometric
// problems with the rotating calipers", Proc. IEEE MELECON 1983): the optimal
// rectangle always has one side flush with a hull edge. A `CaliperFrame` is placed
// on the four extreme vertices and stepped exactly N times for an N-vertex hull.
// Each step lays one support line along a hull edge; together the N steps sweep the
// cross through a quarter turn, which visits every edge orientation.
//
// After every step the rectangle spanned by the four support points is measured in
// the frame's own coordinates: the points are rotated by the frame's reference
// angle and the axis-aligned span is taken. Only four points are rotated per step,
// so the whole search is O(N) once the hull is known.
//
// The best frame is replaced only on a strictly smaller area, so ties keep the
// earliest orientation found.

use crate::core_modules::bounding_box::{Bounds, rotated_bbox_corners};
use crate::core_modules::caliper_frame::CaliperFrame;
use crate::core_modules::error::{GeometryError, Result};
use crate::core_modules::point::point::Point;
use crate::core_modules::rotation::Rotation;
use log::trace;

/// The best rectangle seen by a calipers search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleResult {
    /// Snapshot of the calipers (vertex indices into the hull, and directions).
    pub frame: CaliperFrame,
    /// Area of the rectangle; never negative.
    pub area: f64,
}

impl RectangleResult {
    /// Hull vertex index per caliper (left, top, right, bottom).
    pub fn calipers(&self) -> [usize; 4] {
        self.frame.vertices
    }

    /// Support-line directions per caliper (left, top, right, bottom).
    pub fn angles(&self) -> [f64; 4] {
        self.frame.angles
    }

    /// The rectangle as four corners in the hull's frame.
    pub fn corners(&self, hull: &[Point]) -> Result<[Point; 4]> {
        rotated_bbox_corners(hull, self.frame.reference_angle())
    }
}

/// Area of the rectangle spanned by the frame's four support points.
///
/// The frame rotation is applied as `p · R`; because `R` is orthonormal no inverse
/// (and no second `sin_cos`) is needed anywhere in the search.
fn frame_area(hull: &[Point], frame: &CaliperFrame) -> f64 {
    let rotation = Rotation::new(frame.reference_angle());
    let support = frame.support_points(hull);
    Bounds::from_points(support.iter().map(|p| rotation.to_frame(p)))
        .map_or(0.0, |bounds| bounds.area())
}

/// Minimum-area enclosing rectangle of a convex polygon given in clockwise order.
pub fn min_area_rect(hull: &[Point]) -> Result<RectangleResult> {
    let mut frame = CaliperFrame::from_extremes(hull)?;
    let mut best: Option<RectangleResult> = None;

    for _ in 0..hull.len() {
        frame.step(hull);

        let area = frame_area(hull, &frame);
        if best.is_none_or(|b| area < b.area) {
            trace!("calipers: new best area {area:.6}");
            best = Some(RectangleResult { frame, area });
        }
    }

    best.ok_or(GeometryError::EmptyHull)
}
