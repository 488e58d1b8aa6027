//! Grid cells and the Manhattan metric.

use serde::{Deserialize, Serialize};

/// An integer grid cell.
///
/// Value type: equality, hashing and ordering are by coordinate pair.
/// The `Ord` impl (x first, then y) gives routing a deterministic way
/// to order otherwise-unordered location sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Manhattan distance `|ax - bx| + |ay - by|`.
///
/// Non-negative, symmetric, zero iff `a == b`, and satisfies the
/// triangle inequality.
pub fn manhattan(a: Location, b: Location) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}
