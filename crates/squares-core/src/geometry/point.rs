use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// Integer pixel coordinate, as produced by contour tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// z-component of the cross product of `self` and `other` taken as
    /// position vectors
    pub fn cross(&self, other: &Point) -> i128 {
        self.x as i128 * other.y as i128 - self.y as i128 * other.x as i128
    }
}

/// Displacement between two points. Wide enough for any pair of `i32`
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub dx: i64,
    pub dy: i64,
}

impl Offset {
    pub fn cross(&self, other: &Offset) -> i128 {
        self.dx as i128 * other.dy as i128 - self.dy as i128 * other.dx as i128
    }

    pub fn dot(&self, other: &Offset) -> f64 {
        self.dx as f64 * other.dx as f64 + self.dy as f64 * other.dy as f64
    }

    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, rhs: Point) -> Offset {
        Offset {
            dx: self.x as i64 - rhs.x as i64,
            dy: self.y as i64 - rhs.y as i64,
        }
    }
}
