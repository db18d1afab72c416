use std::ops::Index;

use crate::error::{check_dimension, GeometryError, Result};
use crate::math::linalg::matrix_rank;
use crate::math::{Coords, Matrix, Tolerance};

use super::Point;

/// An ordered, non-empty collection of points sharing one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Points {
    points: Vec<Point>,
}

impl Points {
    /// Creates a collection from rows of coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, a row is invalid, or the rows
    /// differ in length.
    pub fn new<I, R>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<Vec<f64>>,
    {
        let points = rows
            .into_iter()
            .map(Point::new)
            .collect::<Result<Vec<_>>>()?;
        Self::from_points(points)
    }

    /// Creates a collection from existing points.
    ///
    /// # Errors
    ///
    /// Returns an error if `points` is empty or the dimensions differ.
    pub fn from_points(points: Vec<Point>) -> Result<Self> {
        let first = points.first().ok_or(GeometryError::Empty)?;
        let dimension = first.dimension();
        for point in &points {
            check_dimension(dimension, point.dimension())?;
        }
        Ok(Self { points })
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a collection holds at least one point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dimension shared by every point.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.points[0].dimension()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Point> {
        self.points
    }

    /// The points as an `n x dimension` matrix, one point per row.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix {
        Matrix::from_fn(self.len(), self.dimension(), |i, j| self.points[i][j])
    }

    /// Component-wise mean of the points.
    #[must_use]
    pub fn centroid(&self) -> Point {
        let sum = self
            .points
            .iter()
            .fold(Coords::zeros(self.dimension()), |acc, p| acc + p.coords());
        #[allow(clippy::cast_precision_loss)]
        let n = self.len() as f64;
        Point::from_coords(sum / n)
    }

    /// Subtracts the centroid from every point.
    ///
    /// Returns the centered collection and the centroid that was removed, so
    /// adding the centroid back restores the original points.
    #[must_use]
    pub fn mean_center(&self) -> (Self, Point) {
        let centroid = self.centroid();
        let points = self
            .points
            .iter()
            .map(|p| Point::from_coords(p.coords() - centroid.coords()))
            .collect();
        (Self { points }, centroid)
    }

    /// Mean-centers the points and scales them to fit inside the unit ball.
    ///
    /// The point farthest from the centroid ends up at distance 1.
    ///
    /// # Errors
    ///
    /// Returns an error if all points coincide.
    pub fn normalize_distance(&self) -> Result<Self> {
        let (centered, _) = self.mean_center();
        let max = centered
            .points
            .iter()
            .map(|p| p.coords().norm())
            .fold(0.0_f64, f64::max);
        if max == 0.0 {
            return Err(GeometryError::Degenerate(
                "cannot normalize coincident points".into(),
            )
            .into());
        }
        let points = centered
            .points
            .iter()
            .map(|p| Point::from_coords(p.coords() / max))
            .collect();
        Ok(Self { points })
    }

    /// Removes exact duplicates, keeping the first occurrence of each point.
    #[must_use]
    pub fn unique(&self) -> Self {
        let mut points: Vec<Point> = Vec::with_capacity(self.len());
        for point in &self.points {
            if !points.contains(point) {
                points.push(point.clone());
            }
        }
        Self { points }
    }

    /// Pads every point with zeros up to `dimension`.
    ///
    /// # Errors
    ///
    /// Returns an error if `dimension` is smaller than the current one.
    pub fn set_dimension(&self, dimension: usize) -> Result<Self> {
        let points = self
            .points
            .iter()
            .map(|p| p.set_dimension(dimension))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { points })
    }

    /// Dimension of the smallest affine subspace containing the points.
    ///
    /// Exact duplicates are dropped first so they do not pull the centroid.
    /// The rank is the numerical rank of the centered point matrix, with the
    /// singular-value threshold taken from `tol`.
    #[must_use]
    pub fn affine_rank(&self, tol: Tolerance) -> usize {
        let (centered, _) = self.unique().mean_center();
        matrix_rank(&centered.to_matrix(), tol)
    }

    /// Checks whether all points coincide (affine rank 0).
    #[must_use]
    pub fn are_concurrent(&self, tol: Tolerance) -> bool {
        self.affine_rank(tol) == 0
    }

    /// Checks whether all points lie on one line (affine rank at most 1).
    #[must_use]
    pub fn are_collinear(&self, tol: Tolerance) -> bool {
        self.affine_rank(tol) <= 1
    }

    /// Checks whether all points lie on one plane (affine rank at most 2).
    #[must_use]
    pub fn are_coplanar(&self, tol: Tolerance) -> bool {
        self.affine_rank(tol) <= 2
    }
}

impl Index<usize> for Points {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a Points {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl IntoIterator for Points {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
