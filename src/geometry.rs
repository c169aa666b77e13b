//! Real-valued helpers over grid positions.

use crate::grid::Position;

pub fn distance(a: Position, b: Position) -> f64 {
    let (ay, ax) = a.to_vector();
    let (by, bx) = b.to_vector();
    (by - ay).hypot(bx - ax)
}

pub fn manhattan_distance(a: Position, b: Position) -> usize {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

/// Whether `candidate` lies on the line through `p1` and `p2`.
///
/// The cross product is divided by the length of the baseline so `tolerance` is a
/// distance from the line. Coincident reference points have no line and always
/// return `false`.
pub fn is_collinear(p1: Position, p2: Position, candidate: Position, tolerance: f64) -> bool {
    let (y1, x1) = p1.to_vector();
    let (y2, x2) = p2.to_vector();
    let (y3, x3) = candidate.to_vector();
    let (v1y, v1x) = (y2 - y1, x2 - x1);
    let (v2y, v2x) = (y3 - y1, x3 - x1);
    let baseline = v1y.hypot(v1x);
    if baseline == 0.0 {
        return false;
    }
    let cross = (v1y * v2x - v1x * v2y) / baseline;
    cross.abs() < tolerance
}

/// Whether `distance(candidate, p2) / distance(candidate, p1)` is within `tolerance` of `ratio`.
pub fn has_distance_ratio(
    p1: Position,
    p2: Position,
    candidate: Position,
    ratio: f64,
    tolerance: f64,
) -> bool {
    let d1 = distance(candidate, p1);
    let d2 = distance(candidate, p2);
    if d1 == 0.0 || d2 == 0.0 {
        return false;
    }
    (d2 / d1 - ratio).abs() < tolerance
}
