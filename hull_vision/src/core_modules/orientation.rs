// THEORY:
// The orientation predicates are the only geometric decisions the hull builder makes.
// Given a candidate point `p` and a directed edge `a -> b`, `is_left_turn` reports
// whether `p` lies strictly on the side that makes `a -> b` a poor support line for
// a clockwise hull, i.e. whether `p` should replace `b` as the running candidate.
//
// Collinear points (cross product exactly zero) are never left turns. They are
// settled by `is_collinear_beyond` instead: a point on the ray `a -> b` past `b`
// replaces `b`, so a hull edge always ends on its farthest point and points lying
// on an edge never become vertices.

use crate::core_modules::point::point::Point;

/// Returns `true` iff `p` lies strictly to the left of `a -> b` in the clockwise
/// hull convention, i.e. `(p - a) × (b - a) < 0`.
#[inline]
pub fn is_left_turn(p: &Point, a: &Point, b: &Point) -> bool {
    let cross = (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x);
    cross < 0.0
}

/// Returns `true` iff `p` lies exactly on the ray from `a` through `b`, strictly
/// farther from `a` than `b` is.
#[inline]
pub fn is_collinear_beyond(p: &Point, a: &Point, b: &Point) -> bool {
    let ap = p.sub(a);
    let ab = b.sub(a);
    ap.cross(&ab) == 0.0 && ap.dot(&ab) > ab.dot(&ab)
}
