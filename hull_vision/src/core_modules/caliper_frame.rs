// THEORY:
// A `CaliperFrame` is the rigid cross of four support lines that the rotating
// calipers search turns around a convex polygon. Each line ("caliper") rests on one
// hull vertex and carries the direction it should align with. The four directions
// are always exactly a quarter turn apart, so they are stored together and only ever
// rotated together.
//
// Roles, for a clockwise hull in a y-up frame:
// - `Left`   rests on the minimum-x vertex and starts pointing up    (π/2).
// - `Top`    rests on the maximum-y vertex and starts pointing right (0).
// - `Right`  rests on the maximum-x vertex and starts pointing down  (-π/2).
// - `Bottom` rests on the minimum-y vertex and starts pointing left  (π).
//
// One step of the search (`step`) looks at the next hull edge ahead of every
// caliper, picks the caliper whose edge is closest to its direction (the pivot),
// moves only the pivot onto its next vertex, and rotates the whole cross by the
// pivot's angle delta.

use crate::core_modules::error::{GeometryError, Result};
use crate::core_modules::point::point::Point;
use log::trace;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Which support line of the cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaliperRole {
    Left,
    Top,
    Right,
    Bottom,
}

impl CaliperRole {
    /// Roles in pivot tie-break order.
    pub const ALL: [CaliperRole; 4] = [
        CaliperRole::Left,
        CaliperRole::Top,
        CaliperRole::Right,
        CaliperRole::Bottom,
    ];

    pub fn slot(self) -> usize {
        match self {
            CaliperRole::Left => 0,
            CaliperRole::Top => 1,
            CaliperRole::Right => 2,
            CaliperRole::Bottom => 3,
        }
    }

    /// Direction of this support line before any rotation.
    pub fn initial_angle(self) -> f64 {
        match self {
            CaliperRole::Left => FRAC_PI_2,
            CaliperRole::Top => 0.0,
            CaliperRole::Right => -FRAC_PI_2,
            CaliperRole::Bottom => PI,
        }
    }
}

/// Normalises an angle into (-π, π].
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle % TAU;
    if wrapped > PI {
        wrapped - TAU
    } else if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Outcome of one calipers step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    pub role: CaliperRole,
    /// Angle the whole cross was rotated by (subtracted from every direction).
    pub delta: f64,
}

/// Four hull vertex indices plus the direction of each support line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaliperFrame {
    /// Hull vertex index per role, in `CaliperRole::slot` order.
    pub vertices: [usize; 4],
    /// Support-line direction per role, in radians.
    pub angles: [f64; 4],
}

impl CaliperFrame {
    /// Places the calipers on the extreme vertices of `hull`. Ties keep the
    /// earliest vertex.
    pub fn from_extremes(hull: &[Point]) -> Result<Self> {
        if hull.is_empty() {
            return Err(GeometryError::EmptyHull);
        }

        let mut vertices = [0usize; 4];
        for (i, p) in hull.iter().enumerate() {
            let [left, top, right, bottom] = vertices;
            if p.x < hull[left].x {
                vertices[0] = i;
            }
            if p.y > hull[top].y {
                vertices[1] = i;
            }
            if p.x > hull[right].x {
                vertices[2] = i;
            }
            if p.y < hull[bottom].y {
                vertices[3] = i;
            }
        }

        Ok(Self {
            vertices,
            angles: CaliperRole::ALL.map(CaliperRole::initial_angle),
        })
    }

    pub fn vertex(&self, role: CaliperRole) -> usize {
        self.vertices[role.slot()]
    }

    pub fn angle(&self, role: CaliperRole) -> f64 {
        self.angles[role.slot()]
    }

    /// The angle the area is measured in; the left caliper's direction.
    pub fn reference_angle(&self) -> f64 {
        self.angles[0]
    }

    /// The four hull points the calipers rest on.
    pub fn support_points(&self, hull: &[Point]) -> [Point; 4] {
        self.vertices.map(|v| hull[v])
    }

    /// For each caliper, how far its direction must turn to lie along the edge to
    /// its next vertex, normalised into (-π, π].
    pub fn angle_deltas(&self, hull: &[Point]) -> [f64; 4] {
        let n = hull.len();
        let mut deltas = [0.0; 4];
        for (slot, delta) in deltas.iter_mut().enumerate() {
            let current = self.vertices[slot];
            let edge = hull[(current + 1) % n].sub(&hull[current]);
            *delta = wrap_angle(self.angles[slot] - edge.angle());
        }
        deltas
    }

    /// Advances the pivot caliper and rotates the cross; returns the pivot.
    pub fn step(&mut self, hull: &[Point]) -> Pivot {
        let deltas = self.angle_deltas(hull);

        let mut pivot = 0;
        for slot in 1..4 {
            if deltas[slot].abs() < deltas[pivot].abs() {
                pivot = slot;
            }
        }
        let delta = deltas[pivot];

        self.vertices[pivot] = (self.vertices[pivot] + 1) % hull.len();
        for angle in self.angles.iter_mut() {
            *angle -= delta;
        }

        let role = CaliperRole::ALL[pivot];
        trace!("calipers pivot {role:?} by {delta:.6} rad");
        Pivot { role, delta }
    }
}
