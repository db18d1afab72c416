use std::fmt;
use std::ops::{Add, Index, Sub};

use crate::error::{check_dimension, Result};
use crate::math::{Coords, Tolerance};

use super::vector::{all_close, pad, validate_components, write_components};
use super::{Points, Vector};

/// A position in n-dimensional space.
///
/// `Point - Point` yields a [`Vector`], `Point + Vector` yields a `Point`.
/// Adding two points is not defined.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    coords: Coords,
}

impl Point {
    /// Creates a point from its coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are empty or not all finite.
    pub fn new(coords: impl Into<Vec<f64>>) -> Result<Self> {
        let coords = coords.into();
        validate_components(&coords)?;
        Ok(Self {
            coords: Coords::from_vec(coords),
        })
    }

    /// The origin of the given dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if `dimension` is zero.
    pub fn origin(dimension: usize) -> Result<Self> {
        Self::new(vec![0.0; dimension])
    }

    pub(crate) fn from_coords(coords: Coords) -> Self {
        Self { coords }
    }

    #[must_use]
    pub fn coords(&self) -> &Coords {
        &self.coords
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        self.coords.as_slice()
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// Euclidean distance to another point.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn distance_point(&self, other: &Self) -> Result<f64> {
        check_dimension(self.dimension(), other.dimension())?;
        Ok((&self.coords - &other.coords).norm())
    }

    /// The vector from this point to `other`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn vector_to(&self, other: &Self) -> Result<Vector> {
        check_dimension(self.dimension(), other.dimension())?;
        Ok(Vector::from_coords(&other.coords - &self.coords))
    }

    /// Moves the point by `vector`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn translate(&self, vector: &Vector) -> Result<Self> {
        check_dimension(self.dimension(), vector.dimension())?;
        Ok(Self::from_coords(&self.coords + vector.coords()))
    }

    /// Pads the point with zeros up to `dimension`.
    ///
    /// # Errors
    ///
    /// Returns an error if `dimension` is smaller than the current one.
    pub fn set_dimension(&self, dimension: usize) -> Result<Self> {
        Ok(Self::from_coords(pad(&self.coords, dimension)?))
    }

    /// Checks whether all coordinates are close within `tol`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn is_close(&self, other: &Self, tol: Tolerance) -> Result<bool> {
        check_dimension(self.dimension(), other.dimension())?;
        Ok(all_close(&self.coords, &other.coords, tol))
    }

    /// Checks whether this point and `b`, `c` lie on one line.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn is_collinear(&self, b: &Self, c: &Self, tol: Tolerance) -> Result<bool> {
        let points = Points::from_points(vec![self.clone(), b.clone(), c.clone()])?;
        Ok(points.are_collinear(tol))
    }
}

impl TryFrom<Vec<f64>> for Point {
    type Error = crate::error::SpatiumError;

    fn try_from(coords: Vec<f64>) -> Result<Self> {
        Self::new(coords)
    }
}

impl TryFrom<&[f64]> for Point {
    type Error = crate::error::SpatiumError;

    fn try_from(coords: &[f64]) -> Result<Self> {
        Self::new(coords)
    }
}

impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.coords[index]
    }
}

/// # Panics
///
/// Panics if the dimensions differ. Use [`Point::translate`] for a checked
/// version.
impl Add<&Vector> for &Point {
    type Output = Point;

    fn add(self, rhs: &Vector) -> Point {
        Point::from_coords(&self.coords + rhs.coords())
    }
}

/// # Panics
///
/// Panics if the dimensions differ.
impl Sub<&Vector> for &Point {
    type Output = Point;

    fn sub(self, rhs: &Vector) -> Point {
        Point::from_coords(&self.coords - rhs.coords())
    }
}

/// # Panics
///
/// Panics if the dimensions differ. Use [`Point::vector_to`] for a checked
/// version.
impl Sub for &Point {
    type Output = Vector;

    fn sub(self, rhs: &Point) -> Vector {
        Vector::from_coords(&self.coords - &rhs.coords)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point(")?;
        write_components(f, self.as_slice())?;
        write!(f, ")")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(c: &[f64]) -> Point {
        Point::new(c).unwrap()
    }

    #[test]
    fn distance_is_symmetric() {
        let a = p(&[1.0, 2.0, 3.0]);
        let b = p(&[4.0, 6.0, 3.0]);
        assert_relative_eq!(a.distance_point(&b).unwrap(), 5.0);
        assert_relative_eq!(b.distance_point(&a).unwrap(), 5.0);
        assert_relative_eq!(a.distance_point(&a).unwrap(), 0.0);
        assert!(a.distance_point(&p(&[1.0, 2.0])).is_err());
    }

    #[test]
    fn point_vector_arithmetic() {
        let a = p(&[1.0, 2.0]);
        let b = p(&[4.0, 6.0]);
        let v = &b - &a;
        assert_eq!(v, Vector::new([3.0, 4.0]).unwrap());
        assert_eq!(&a + &v, b);
        assert_eq!(&b - &v, a);
        assert_eq!(a.translate(&v).unwrap(), b);
        assert!(a.translate(&Vector::new([1.0]).unwrap()).is_err());
    }

    #[test]
    fn collinear_points() {
        let tol = Tolerance::default();
        assert!(p(&[0.0, 0.0]).is_collinear(&p(&[1.0, 1.0]), &p(&[3.0, 3.0]), tol).unwrap());
        assert!(!p(&[0.0, 0.0]).is_collinear(&p(&[1.0, 0.0]), &p(&[0.0, 1.0]), tol).unwrap());
        assert!(p(&[1.0, 1.0, 1.0])
            .is_collinear(&p(&[1.0, 1.0, 1.0]), &p(&[1.0, 1.0, 1.0]), tol)
            .unwrap());
    }

    #[test]
    fn set_dimension_and_close() {
        let tol = Tolerance::default();
        let a = p(&[1.0, 2.0]).set_dimension(3).unwrap();
        assert!(a.is_close(&p(&[1.0, 2.0, 1e-12]), tol).unwrap());
        assert!(!a.is_close(&p(&[1.0, 2.0, 1e-3]), tol).unwrap());
    }
}
