pub mod curve;
mod point;
mod points;
mod round;
pub mod surface;
mod triangle;
mod vector;

pub use curve::{Circle, Curve, CurveDomain, Line, LineSegment};
pub use point::Point;
pub use points::Points;
pub use surface::{Cylinder, Extent, Plane, Sphere};
pub use triangle::{Side, Triangle, TriangleKind, Vertex};
pub use vector::Vector;

use crate::error::Result;
use crate::math::Tolerance;

/// Primitives that can measure their distance to a point.
pub trait Distance {
    /// Shortest (unsigned) distance from the primitive to `point`.
    ///
    /// # Errors
    ///
    /// Returns an error if the point's dimension does not match the primitive.
    fn distance_point(&self, point: &Point) -> Result<f64>;

    /// Checks whether `point` lies on the primitive, i.e. its distance is
    /// within `tol.abs` of zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the point's dimension does not match the primitive.
    fn contains_point(&self, point: &Point, tol: Tolerance) -> Result<bool> {
        Ok(tol.is_zero(self.distance_point(point)?))
    }

    /// Sum of squared distances from `points` to the primitive.
    ///
    /// # Errors
    ///
    /// Returns an error if the points' dimension does not match the primitive.
    fn sum_squares(&self, points: &Points) -> Result<f64> {
        points
            .iter()
            .map(|p| self.distance_point(p).map(|d| d * d))
            .sum()
    }
}
