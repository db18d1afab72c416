use std::fmt;
use std::ops::{Add, Index, Mul, Neg, Sub};

use crate::error::{check_dimension, require_dimension, GeometryError, Result};
use crate::math::{Coords, Tolerance};

use super::Point;

/// A displacement in n-dimensional space.
///
/// Components are validated at construction: the vector is never empty and
/// every component is finite. The zero vector is allowed, but operations
/// that need a direction (`unit`, `angle_between`, ...) reject it.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    coords: Coords,
}

impl Vector {
    /// Creates a vector from its components.
    ///
    /// # Errors
    ///
    /// Returns an error if the components are empty or not all finite.
    pub fn new(components: impl Into<Vec<f64>>) -> Result<Self> {
        let components = components.into();
        validate_components(&components)?;
        Ok(Self {
            coords: Coords::from_vec(components),
        })
    }

    /// Creates the vector pointing from `a` to `b`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points have different dimensions.
    pub fn from_points(a: &Point, b: &Point) -> Result<Self> {
        a.vector_to(b)
    }

    /// The zero vector of the given dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if `dimension` is zero.
    pub fn zeros(dimension: usize) -> Result<Self> {
        Self::new(vec![0.0; dimension])
    }

    pub(crate) fn from_coords(coords: Coords) -> Self {
        Self { coords }
    }

    /// Returns the underlying coordinates.
    #[must_use]
    pub fn coords(&self) -> &Coords {
        &self.coords
    }

    /// Returns the components as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        self.coords.as_slice()
    }

    /// Returns the number of components.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// Euclidean length.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.coords.norm()
    }

    /// Checks whether the norm is within `tol.abs` of zero.
    #[must_use]
    pub fn is_zero(&self, tol: Tolerance) -> bool {
        tol.is_zero(self.norm())
    }

    /// Returns the unit vector in the same direction.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the norm is zero.
    pub fn unit(&self) -> Result<Self> {
        let len = self.nonzero_norm()?;
        Ok(Self::from_coords(&self.coords / len))
    }

    /// Dot product.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn dot(&self, other: &Self) -> Result<f64> {
        check_dimension(self.dimension(), other.dimension())?;
        Ok(self.coords.dot(&other.coords))
    }

    /// Cross product.
    ///
    /// Defined for 2D and 3D inputs. 2D inputs are treated as lying in the
    /// `z = 0` plane, so the result is always a 3D vector; for two 2D inputs
    /// only its z-component is non-zero.
    ///
    /// # Errors
    ///
    /// Returns an error if either input is not 2D or 3D.
    pub fn cross(&self, other: &Self) -> Result<Self> {
        require_dimension("cross product", self.dimension(), &[2, 3])?;
        require_dimension("cross product", other.dimension(), &[2, 3])?;
        let a = to_vector3(&self.coords);
        let b = to_vector3(&other.coords);
        let c = a.cross(&b);
        Ok(Self::from_coords(Coords::from_column_slice(c.as_slice())))
    }

    /// The z-component of the cross product of two 2D vectors,
    /// `a.x * b.y - a.y * b.x`.
    ///
    /// # Errors
    ///
    /// Returns an error if either vector is not 2D.
    pub fn cross_z(&self, other: &Self) -> Result<f64> {
        require_dimension("2D cross product", self.dimension(), &[2])?;
        require_dimension("2D cross product", other.dimension(), &[2])?;
        Ok(self.coords[0] * other.coords[1] - self.coords[1] * other.coords[0])
    }

    /// Cosine of the angle between the vectors, clamped to `[-1, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ or either vector is zero.
    pub fn cosine_similarity(&self, other: &Self) -> Result<f64> {
        check_dimension(self.dimension(), other.dimension())?;
        let denom = self.nonzero_norm()? * other.nonzero_norm()?;
        Ok((self.coords.dot(&other.coords) / denom).clamp(-1.0, 1.0))
    }

    /// Angle between the vectors in `[0, pi]`.
    ///
    /// Computed as `atan2(|a ^ b|, a . b)`, which stays accurate near 0 and pi
    /// where `acos` of the cosine similarity does not. `|a ^ b|` is the area
    /// of the parallelogram spanned by the vectors, so this works in any
    /// dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ or either vector is zero.
    pub fn angle_between(&self, other: &Self) -> Result<f64> {
        check_dimension(self.dimension(), other.dimension())?;
        self.nonzero_norm()?;
        other.nonzero_norm()?;
        let area = wedge_norm(&self.coords, &other.coords);
        Ok(area.atan2(self.coords.dot(&other.coords)))
    }

    /// Signed angle from this vector to `other` in `(-pi, pi]`.
    ///
    /// Positive when `other` is counterclockwise from `self`.
    ///
    /// # Errors
    ///
    /// Returns an error if either vector is not 2D.
    pub fn angle_signed(&self, other: &Self) -> Result<f64> {
        let det = self.cross_z(other)?;
        Ok(det.atan2(self.coords.dot(&other.coords)))
    }

    /// Signed angle between two 3D vectors, right-handed about
    /// `direction_positive`.
    ///
    /// # Errors
    ///
    /// Returns an error if any vector is not 3D, or `direction_positive` is
    /// not perpendicular to the plane spanned by the two vectors.
    pub fn angle_signed_3d(
        &self,
        other: &Self,
        direction_positive: &Self,
        tol: Tolerance,
    ) -> Result<f64> {
        require_dimension("3D signed angle", self.dimension(), &[3])?;
        require_dimension("3D signed angle", other.dimension(), &[3])?;
        require_dimension("3D signed angle", direction_positive.dimension(), &[3])?;

        let cross = self.cross(other)?;
        if !cross.is_parallel(direction_positive, tol)? {
            return Err(GeometryError::Degenerate(
                "the positive direction must be perpendicular to both vectors".into(),
            )
            .into());
        }
        let positive = direction_positive.unit()?;
        Ok(cross
            .coords
            .dot(&positive.coords)
            .atan2(self.coords.dot(&other.coords)))
    }

    /// Checks `|a . b| <= tol.abs`. The zero vector is perpendicular to
    /// every vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn is_perpendicular(&self, other: &Self, tol: Tolerance) -> Result<bool> {
        Ok(tol.is_zero(self.dot(other)?))
    }

    /// Checks whether the vectors are parallel (or anti-parallel).
    ///
    /// The sine of the angle between the unit vectors must be within
    /// `tol.abs` of zero. The zero vector is parallel to every vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn is_parallel(&self, other: &Self, tol: Tolerance) -> Result<bool> {
        check_dimension(self.dimension(), other.dimension())?;
        if self.is_zero(tol) || other.is_zero(tol) {
            return Ok(true);
        }
        let a = &self.coords / self.norm();
        let b = &other.coords / other.norm();
        Ok(tol.is_zero(wedge_norm(&a, &b)))
    }

    /// Which side of this 2D vector `other` points to.
    ///
    /// Returns `1` if `other` is to the right, `-1` if it is to the left and
    /// `0` if the vectors are parallel (`cross_z` within `tol.abs` of zero).
    ///
    /// # Errors
    ///
    /// Returns an error if either vector is not 2D.
    pub fn side_vector(&self, other: &Self, tol: Tolerance) -> Result<i8> {
        let value = other.cross_z(self)?;
        Ok(sign(value, tol))
    }

    /// Signed length of the projection of `other` onto this vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ or this vector is zero.
    pub fn scalar_projection(&self, other: &Self) -> Result<f64> {
        check_dimension(self.dimension(), other.dimension())?;
        let len = self.nonzero_norm()?;
        Ok(self.coords.dot(&other.coords) / len)
    }

    /// Projects `other` onto this vector: `(u . v / u . u) * u`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ or this vector is zero.
    pub fn project_vector(&self, other: &Self) -> Result<Self> {
        check_dimension(self.dimension(), other.dimension())?;
        self.nonzero_norm()?;
        let scale = self.coords.dot(&other.coords) / self.coords.norm_squared();
        Ok(Self::from_coords(&self.coords * scale))
    }

    /// Returns a simple unit vector that is not parallel to this one.
    ///
    /// Useful as a seed for building perpendicular vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if this is the zero vector.
    pub fn different_direction(&self, tol: Tolerance) -> Result<Self> {
        if self.is_zero(tol) {
            return Err(GeometryError::ZeroVector.into());
        }
        let dim = self.dimension();
        if dim == 1 {
            return Self::new([-self.coords[0].signum()]);
        }

        let mut candidate = Coords::zeros(dim);
        candidate[0] = 1.0;
        if self.is_parallel(&Self::from_coords(candidate.clone()), tol)? {
            candidate[0] = 0.0;
            candidate[1] = 1.0;
        }
        Ok(Self::from_coords(candidate))
    }

    /// Pads the vector with zeros up to `dimension`.
    ///
    /// # Errors
    ///
    /// Returns an error if `dimension` is smaller than the current one.
    pub fn set_dimension(&self, dimension: usize) -> Result<Self> {
        Ok(Self::from_coords(pad(&self.coords, dimension)?))
    }

    /// Checks whether all components are close within `tol`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn is_close(&self, other: &Self, tol: Tolerance) -> Result<bool> {
        check_dimension(self.dimension(), other.dimension())?;
        Ok(all_close(&self.coords, &other.coords, tol))
    }

    fn nonzero_norm(&self) -> Result<f64> {
        let len = self.norm();
        if len == 0.0 {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(len)
    }
}

/// Area of the parallelogram spanned by `a` and `b`, in any dimension.
pub(crate) fn wedge_norm(a: &Coords, b: &Coords) -> f64 {
    let aa = a.norm_squared();
    if aa == 0.0 {
        return 0.0;
    }
    let perp = b - a * (a.dot(b) / aa);
    aa.sqrt() * perp.norm()
}

pub(crate) fn to_vector3(coords: &Coords) -> nalgebra::Vector3<f64> {
    let get = |i: usize| coords.get(i).copied().unwrap_or(0.0);
    nalgebra::Vector3::new(get(0), get(1), get(2))
}

pub(crate) fn validate_components(components: &[f64]) -> Result<()> {
    if components.is_empty() {
        return Err(GeometryError::Empty.into());
    }
    if !components.iter().all(|c| c.is_finite()) {
        return Err(GeometryError::NonFinite.into());
    }
    Ok(())
}

pub(crate) fn pad(coords: &Coords, dimension: usize) -> Result<Coords> {
    if dimension < coords.len() {
        return Err(GeometryError::Degenerate(format!(
            "the desired dimension {dimension} cannot be less than the current dimension {}",
            coords.len()
        ))
        .into());
    }
    Ok(Coords::from_fn(dimension, |i, _| {
        coords.get(i).copied().unwrap_or(0.0)
    }))
}

pub(crate) fn all_close(a: &Coords, b: &Coords, tol: Tolerance) -> bool {
    a.iter().zip(b.iter()).all(|(&x, &y)| tol.is_close(x, y))
}

pub(crate) fn sign(value: f64, tol: Tolerance) -> i8 {
    if tol.is_zero(value) {
        0
    } else if value > 0.0 {
        1
    } else {
        -1
    }
}

impl TryFrom<Vec<f64>> for Vector {
    type Error = crate::error::SpatiumError;

    fn try_from(components: Vec<f64>) -> Result<Self> {
        Self::new(components)
    }
}

impl TryFrom<&[f64]> for Vector {
    type Error = crate::error::SpatiumError;

    fn try_from(components: &[f64]) -> Result<Self> {
        Self::new(components)
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.coords[index]
    }
}

/// # Panics
///
/// Panics if the dimensions differ.
impl Add for &Vector {
    type Output = Vector;

    fn add(self, rhs: &Vector) -> Vector {
        Vector::from_coords(&self.coords + &rhs.coords)
    }
}

/// # Panics
///
/// Panics if the dimensions differ.
impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, rhs: &Vector) -> Vector {
        Vector::from_coords(&self.coords - &rhs.coords)
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::from_coords(&self.coords * rhs)
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::from_coords(-&self.coords)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector(")?;
        write_components(f, self.as_slice())?;
        write!(f, ")")
    }
}

pub(crate) fn write_components(f: &mut fmt::Formatter<'_>, values: &[f64]) -> fmt::Result {
    write!(f, "[")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{v}")?;
    }
    write!(f, "]")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn v(c: &[f64]) -> Vector {
        Vector::new(c).unwrap()
    }

    #[test]
    fn rejects_empty_and_non_finite() {
        assert!(Vector::new(Vec::<f64>::new()).is_err());
        assert!(Vector::new([1.0, f64::NAN]).is_err());
        assert!(Vector::new([1.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn unit_has_norm_one() {
        for c in [&[1.0, 0.0][..], &[-20.0, 0.0], &[1.0, 1.0, 1.0], &[3.0, -4.0, 12.0, 1.0]] {
            assert_relative_eq!(v(c).unit().unwrap().norm(), 1.0, epsilon = 1e-12);
        }
        assert!(v(&[0.0, 0.0]).unit().is_err());
    }

    #[test]
    fn tiny_vectors_still_normalize() {
        let u = v(&[1e-11, 0.0]).unit().unwrap();
        assert_eq!(u, v(&[1.0, 0.0]));
        assert_relative_eq!(v(&[3e-12, 4e-12]).unit().unwrap().norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(v(&[1e-11, 0.0]).angle_between(&v(&[0.0, 1e-11])).unwrap(), FRAC_PI_2);
    }

    #[test]
    fn cross_pads_2d_inputs() {
        let c = v(&[1.0, 0.0]).cross(&v(&[0.0, 1.0])).unwrap();
        assert_eq!(c, v(&[0.0, 0.0, 1.0]));
        let c = v(&[2.0, 5.0]).cross(&v(&[1.0, 1.0])).unwrap();
        assert_eq!(c, v(&[0.0, 0.0, -3.0]));
        let c = v(&[1.0, 1.0, 1.0]).cross(&v(&[0.0, 1.0, 0.0])).unwrap();
        assert_eq!(c, v(&[-1.0, 0.0, 1.0]));
        assert!(v(&[1.0, 0.0, 0.0, 0.0]).cross(&v(&[0.0, 1.0, 0.0, 0.0])).is_err());
    }

    #[test]
    fn angle_between_cases() {
        assert_relative_eq!(v(&[1.0, 0.0]).angle_between(&v(&[0.0, 1.0])).unwrap(), FRAC_PI_2);
        assert_relative_eq!(v(&[1.0, 0.0]).angle_between(&v(&[1.0, 1.0])).unwrap(), FRAC_PI_4);
        assert_relative_eq!(v(&[1.0, 0.0]).angle_between(&v(&[-2.0, 0.0])).unwrap(), PI);
        assert_relative_eq!(v(&[1.0, 1.0, 1.0]).angle_between(&v(&[1.0, 1.0, 1.0])).unwrap(), 0.0);
        assert!(v(&[0.0, 0.0]).angle_between(&v(&[1.0, 0.0])).is_err());
        assert!(v(&[1.0, 0.0]).angle_between(&v(&[1.0, 0.0, 0.0])).is_err());
    }

    #[test]
    fn angle_between_is_symmetric() {
        let a = v(&[1.0, 2.0, -3.0, 0.5]);
        let b = v(&[-2.0, 0.1, 4.0, 1.0]);
        assert_relative_eq!(a.angle_between(&b).unwrap(), b.angle_between(&a).unwrap());
    }

    #[test]
    fn signed_angles() {
        assert_relative_eq!(v(&[1.0, 0.0]).angle_signed(&v(&[0.0, 1.0])).unwrap(), FRAC_PI_2);
        assert_relative_eq!(v(&[1.0, 0.0]).angle_signed(&v(&[0.0, -1.0])).unwrap(), -FRAC_PI_2);
        assert!(v(&[1.0, 0.0, 0.0]).angle_signed(&v(&[0.0, -1.0, 0.0])).is_err());

        let tol = Tolerance::default();
        let a = v(&[1.0, 0.0, 0.0]);
        let b = v(&[0.0, -1.0, 0.0]);
        let up = a.angle_signed_3d(&b, &v(&[0.0, 0.0, 2.0]), tol).unwrap();
        let down = a.angle_signed_3d(&b, &v(&[0.0, 0.0, -5.0]), tol).unwrap();
        assert_relative_eq!(up, -FRAC_PI_2);
        assert_relative_eq!(down, FRAC_PI_2);
        assert!(a.angle_signed_3d(&b, &v(&[1.0, 0.0, 0.0]), tol).is_err());
    }

    #[test]
    fn cosine_similarity_values() {
        assert_relative_eq!(v(&[1.0, 0.0]).cosine_similarity(&v(&[0.0, 1.0])).unwrap(), 0.0);
        assert_relative_eq!(v(&[1.0, 0.0]).cosine_similarity(&v(&[-1.0, 0.0])).unwrap(), -1.0);
        assert!(v(&[0.0, 0.0]).cosine_similarity(&v(&[1.0, 1.0])).is_err());
    }

    #[test]
    fn parallel_and_perpendicular() {
        let tol = Tolerance::default();
        assert!(!v(&[0.0, 1.0]).is_parallel(&v(&[1.0, 0.0]), tol).unwrap());
        assert!(v(&[-1.0, 5.0]).is_parallel(&v(&[2.0, -10.0]), tol).unwrap());
        assert!(v(&[1.0, 2.0, 3.0, 4.0]).is_parallel(&v(&[-2.0, -4.0, -6.0, -8.0]), tol).unwrap());
        assert!(v(&[1.0, 2.0, 3.0]).is_parallel(&v(&[0.0, 0.0, 0.0]), tol).unwrap());

        assert!(v(&[0.0, 1.0]).is_perpendicular(&v(&[1.0, 0.0]), tol).unwrap());
        assert!(!v(&[-1.0, 5.0]).is_perpendicular(&v(&[3.0, 4.0]), tol).unwrap());
        assert!(v(&[0.0, 0.0, 0.0]).is_perpendicular(&v(&[1.0, 2.0, 3.0]), tol).unwrap());
    }

    #[test]
    fn side_vector_convention() {
        let tol = Tolerance::default();
        let target = v(&[0.0, 1.0]);
        assert_eq!(target.side_vector(&v(&[0.0, 2.0]), tol).unwrap(), 0);
        assert_eq!(target.side_vector(&v(&[0.0, -5.0]), tol).unwrap(), 0);
        assert_eq!(target.side_vector(&v(&[1.0, 1.0]), tol).unwrap(), 1);
        assert_eq!(target.side_vector(&v(&[1.0, -10.0]), tol).unwrap(), 1);
        assert_eq!(target.side_vector(&v(&[-3.0, 4.0]), tol).unwrap(), -1);
        assert!(v(&[1.0]).side_vector(&v(&[2.0]), tol).is_err());
    }

    #[test]
    fn projections() {
        assert_eq!(v(&[0.0, 100.0]).project_vector(&v(&[2.0, 1.0])).unwrap(), v(&[0.0, 1.0]));
        assert_eq!(v(&[0.0, 1.0]).project_vector(&v(&[9.0, 5.0])).unwrap(), v(&[0.0, 5.0]));
        assert_relative_eq!(v(&[0.0, 1.0]).scalar_projection(&v(&[2.0, 1.0])).unwrap(), 1.0);
        assert_relative_eq!(v(&[5.0, 0.0]).scalar_projection(&v(&[-10.0, 3.0])).unwrap(), -10.0);
        assert!(v(&[0.0, 0.0]).project_vector(&v(&[1.0, 1.0])).is_err());
    }

    #[test]
    fn different_direction_is_not_parallel() {
        let tol = Tolerance::default();
        assert_eq!(v(&[100.0]).different_direction(tol).unwrap(), v(&[-1.0]));
        assert_eq!(v(&[1.0, 0.0]).different_direction(tol).unwrap(), v(&[0.0, 1.0]));
        assert_eq!(v(&[1.0, 1.0]).different_direction(tol).unwrap(), v(&[1.0, 0.0]));
        assert!(v(&[0.0, 0.0]).different_direction(tol).is_err());
    }

    #[test]
    fn set_dimension_pads_with_zeros() {
        assert_eq!(v(&[1.0, 2.0]).set_dimension(4).unwrap(), v(&[1.0, 2.0, 0.0, 0.0]));
        assert!(v(&[1.0, 2.0]).set_dimension(1).is_err());
    }

    #[test]
    fn display_lists_components() {
        assert_eq!(v(&[1.0, -2.5]).to_string(), "Vector([1, -2.5])");
    }
}
