// THEORY:
// The `gift_wrapper` is the per-row hull kernel: a Jarvis march over one point set.
// Both execution strategies (the sequential host loop and the data-parallel device
// launch) call exactly this function for every row, which is what guarantees that
// they produce bit-identical output.
//
// Algorithm steps:
// 1.  **Anchor**: Scan all M points in index order and keep the smallest x seen so far
//     under a strict `<`. Ties keep the earliest index. The anchor is always a hull
//     vertex and is where the walk starts and ends.
// 2.  **Wrap**: From the current hull vertex, scan all M points. The first index that
//     is not the current vertex seeds the running endpoint; every later point that
//     `is_left_turn` of the edge (current, endpoint) replaces it, and so does a point
//     on the same ray lying farther out. The surviving endpoint is the next hull
//     vertex in clockwise order, and it is always the far end of its edge.
//     Points lying exactly on a hull edge are therefore never recorded.
// 3.  **Close**: Record each hull vertex once. Stop as soon as the walk comes back to
//     the anchor; the anchor is not recorded a second time.
// 4.  **Pad**: Every unused trailing slot is filled with the sentinel.
//
// Degenerate rows:
// - A candidate that coincides with the current vertex describes a zero-length edge
//   and gives the predicate nothing to work with, so the next non-coincident point
//   takes its place. When every point coincides with the current vertex the walk
//   closes on the spot. A single-point row and a row of identical points both
//   produce `[anchor, -1, ...]`.
// - A row whose points all lie on one line yields its two extreme points.
// - A walk that fills all M slots without closing stops there. With exact
//   orientation tests every vertex is visited once, so this only happens when
//   rounding makes the predicate inconsistent across candidates.
//
// Cost is O(h * M) per row for h hull vertices, O(M^2) in the worst case.

use crate::core_modules::hull_buffer::SENTINEL;
use crate::core_modules::orientation::{is_collinear_beyond, is_left_turn};
use crate::core_modules::point::point::Point;
use log::{trace, warn};

/// Index of the leftmost point; ties keep the earliest index.
pub fn anchor_index(points: &[Point]) -> usize {
    let mut anchor = 0;
    let mut min_x = points[0].x;
    for (j, point) in points.iter().enumerate() {
        if point.x < min_x {
            min_x = point.x;
            anchor = j;
        }
    }
    anchor
}

/// The hull vertex that follows `current` in clockwise order.
fn next_vertex(points: &[Point], current: usize) -> usize {
    let origin = points[current];
    let mut endpoint = 0;
    for (j, candidate) in points.iter().enumerate() {
        if endpoint == current {
            endpoint = j;
        } else if points[endpoint] == origin {
            if *candidate != origin {
                endpoint = j;
            }
        } else if is_left_turn(candidate, &origin, &points[endpoint])
            || is_collinear_beyond(candidate, &origin, &points[endpoint])
        {
            endpoint = j;
        }
    }
    endpoint
}

/// Walks the hull of one point set and writes it into `hull`.
///
/// `hull` must have one slot per point. Returns the number of hull vertices written;
/// all remaining slots hold [`SENTINEL`]. `points` must not be empty.
pub fn wrap_row(points: &[Point], hull: &mut [i32]) -> usize {
    debug_assert_eq!(points.len(), hull.len());
    let capacity = points.len();

    let start = anchor_index(points);
    let mut point_on_hull = start;
    let mut count = 0;
    loop {
        hull[count] = point_on_hull as i32;
        count += 1;

        let mut endpoint = next_vertex(points, point_on_hull);
        if points[endpoint] == points[point_on_hull] {
            endpoint = start;
        }
        point_on_hull = endpoint;

        if endpoint == start {
            break;
        }
        if count == capacity {
            warn!(
                "hull walk filled all {capacity} slots without closing; \
                 orientation tests disagreed under rounding, truncating"
            );
            break;
        }
    }

    hull[count..].fill(SENTINEL);
    trace!("wrapped row: {count} of {capacity} points on hull");
    count
}
