//! Closed polygons and the measurements the square heuristic relies on.
//!
//! The free functions work on raw point slices so that callers holding a
//! contour of any length can measure it without first building a `Polygon`.

use super::{GeometryError, Point};
use serde::{Deserialize, Serialize};

/// Keeps `corner_cosine` finite when an edge has zero length.
const COSINE_EPSILON: f64 = 1e-10;

/// Closed polygon; vertex order is the winding order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Build a polygon from at least 3 vertices.
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::TooFewVertices(points.len()));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Shoelace area; positive for counter-clockwise winding in a y-up frame.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Length of the closed boundary, including the edge back to the first vertex.
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| (self.points[(i + 1) % n] - self.points[i]).norm_squared().sqrt())
            .sum()
    }

    pub fn is_convex(&self) -> bool {
        is_convex(&self.points)
    }

    pub fn max_corner_cosine(&self) -> f64 {
        max_corner_cosine(&self.points)
    }
}

pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    // four i32 vertices can push the sum past i64
    let twice: i128 = (0..n).map(|i| points[i].cross(&points[(i + 1) % n])).sum();
    twice as f64 / 2.0
}

/// Every turn along the boundary bends the same way. Collinear runs (zero
/// cross product) do not break convexity.
pub fn is_convex(points: &[Point]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }

    let mut orientation = 0i128;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];

        let turn = (b - a).cross(&(c - b)).signum();
        if turn == 0 {
            continue;
        }
        if orientation == 0 {
            orientation = turn;
        } else if orientation != turn {
            return false;
        }
    }

    true
}

/// Cosine of the angle at `corner` between the rays towards `prev` and `next`.
pub fn corner_cosine(prev: Point, corner: Point, next: Point) -> f64 {
    let v1 = next - corner;
    let v2 = prev - corner;
    v1.dot(&v2) / (v1.norm_squared() * v2.norm_squared() + COSINE_EPSILON).sqrt()
}

/// Largest `|cos|` over every corner of the closed polygon; 0 for a rectangle.
pub fn max_corner_cosine(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| corner_cosine(points[(i + n - 1) % n], points[i], points[(i + 1) % n]).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: i32, y: i32, side: i32) -> Vec<Point> {
        vec![
            Point::new(x, y),
            Point::new(x + side, y),
            Point::new(x + side, y + side),
            Point::new(x, y + side),
        ]
    }

    #[test]
    fn test_rejects_short_polygon() {
        let result = Polygon::new(vec![Point::new(0, 0), Point::new(1, 1)]);
        assert_eq!(result, Err(GeometryError::TooFewVertices(2)));
    }

    #[test]
    fn test_area_sign_follows_winding() {
        let mut points = square(0, 0, 10);
        let forward = signed_area(&points);
        points.reverse();
        let backward = signed_area(&points);

        assert_eq!(forward, -backward);
        assert_eq!(forward.abs(), 100.0);
    }

    #[test]
    fn test_area_of_full_i32_span() {
        let span = vec![
            Point::new(i32::MIN, i32::MIN),
            Point::new(i32::MAX, i32::MIN),
            Point::new(i32::MAX, i32::MAX),
            Point::new(i32::MIN, i32::MAX),
        ];
        let side = u32::MAX as f64;

        assert_eq!(signed_area(&span), side * side);
        assert!(is_convex(&span));
        assert!(max_corner_cosine(&span) < 1e-12);
    }

    #[test]
    fn test_perimeter_closes_the_loop() {
        let polygon = Polygon::new(square(5, 5, 10)).unwrap();
        assert!((polygon.perimeter() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_convexity() {
        assert!(is_convex(&square(0, 0, 10)));

        // dart: the fourth vertex is pulled inside the triangle
        let dart = vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(3, 3),
            Point::new(0, 10),
        ];
        assert!(!is_convex(&dart));

        let with_collinear = vec![
            Point::new(0, 0),
            Point::new(5, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        assert!(is_convex(&with_collinear));
    }

    #[test]
    fn test_corner_cosine_right_angle_is_zero() {
        let cosine = corner_cosine(Point::new(0, 10), Point::new(0, 0), Point::new(10, 0));
        assert!(cosine.abs() < 1e-12);
    }

    #[test]
    fn test_corner_cosine_degenerate_edge_is_finite() {
        let p = Point::new(3, 3);
        let cosine = corner_cosine(p, p, Point::new(7, 3));
        assert!(cosine.is_finite());
        assert_eq!(cosine, 0.0);
    }

    #[test]
    fn test_max_corner_cosine_of_rhombus() {
        // 60/120 degree rhombus: |cos| = 0.5 at every corner
        let rhombus = vec![
            Point::new(0, 0),
            Point::new(1000, 0),
            Point::new(1500, 866),
            Point::new(500, 866),
        ];
        assert!((max_corner_cosine(&rhombus) - 0.5).abs() < 1e-3);
    }
}
