use std::fmt;
use std::str::FromStr;

use crate::error::{check_dimension, require_dimension, GeometryError, Result, SpatiumError};
use crate::math::Tolerance;

use super::vector::wedge_norm;
use super::{Line, Point, Vector};

/// A vertex label of a [`Triangle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertex {
    A,
    B,
    C,
}

impl Vertex {
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    /// The side across from this vertex.
    #[must_use]
    pub fn opposite(self) -> Side {
        match self {
            Self::A => Side::A,
            Self::B => Side::B,
            Self::C => Side::C,
        }
    }
}

/// A side label of a [`Triangle`], named after the vertex it faces:
/// side `a` joins `B` and `C`, side `b` joins `C` and `A`, side `c` joins
/// `A` and `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
    C,
}

impl Side {
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];
}

impl TryFrom<char> for Vertex {
    type Error = SpatiumError;

    fn try_from(label: char) -> Result<Self> {
        match label {
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            'C' => Ok(Self::C),
            _ => Err(label_error("vertex", "'A', 'B', or 'C'", label)),
        }
    }
}

impl TryFrom<char> for Side {
    type Error = SpatiumError;

    fn try_from(label: char) -> Result<Self> {
        match label {
            'a' => Ok(Self::A),
            'b' => Ok(Self::B),
            'c' => Ok(Self::C),
            _ => Err(label_error("side", "'a', 'b', or 'c'", label)),
        }
    }
}

impl FromStr for Vertex {
    type Err = SpatiumError;

    fn from_str(s: &str) -> Result<Self> {
        single_char(s)
            .ok_or_else(|| label_error("vertex", "'A', 'B', or 'C'", s))
            .and_then(Self::try_from)
    }
}

impl FromStr for Side {
    type Err = SpatiumError;

    fn from_str(s: &str) -> Result<Self> {
        single_char(s)
            .ok_or_else(|| label_error("side", "'a', 'b', or 'c'", s))
            .and_then(Self::try_from)
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

fn label_error(
    parameter: &'static str,
    expected: &'static str,
    value: impl ToString,
) -> SpatiumError {
    GeometryError::OutOfRange {
        parameter,
        expected,
        value: value.to_string(),
    }
    .into()
}

/// Classification of a triangle by its side lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleKind {
    /// All three sides are equal.
    Equilateral,
    /// Exactly two sides are equal.
    Isosceles,
    /// No two sides are equal.
    Scalene,
}

impl fmt::Display for TriangleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equilateral => "equilateral",
            Self::Isosceles => "isosceles",
            Self::Scalene => "scalene",
        };
        f.write_str(name)
    }
}

/// A triangle with vertices `A`, `B`, `C` of equal dimension.
///
/// Collinear vertices are accepted; the triangle then has zero area and
/// operations that need a proper triangle (altitudes, orthocenter, ...)
/// report an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    a: Point,
    b: Point,
    c: Point,
}

impl Triangle {
    /// Creates a triangle from three vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn new(a: Point, b: Point, c: Point) -> Result<Self> {
        check_dimension(a.dimension(), b.dimension())?;
        check_dimension(a.dimension(), c.dimension())?;
        Ok(Self { a, b, c })
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.a.dimension()
    }

    /// Returns the vertex with the given label.
    #[must_use]
    pub fn point(&self, vertex: Vertex) -> &Point {
        match vertex {
            Vertex::A => &self.a,
            Vertex::B => &self.b,
            Vertex::C => &self.c,
        }
    }

    /// Endpoints of a side, in the order `a = BC`, `b = CA`, `c = AB`.
    #[must_use]
    pub fn endpoints(&self, side: Side) -> (&Point, &Point) {
        match side {
            Side::A => (&self.b, &self.c),
            Side::B => (&self.c, &self.a),
            Side::C => (&self.a, &self.b),
        }
    }

    /// The line along a side, directed as in [`Triangle::endpoints`].
    ///
    /// # Errors
    ///
    /// Returns an error if the side's endpoints coincide.
    pub fn line(&self, side: Side) -> Result<Line> {
        let (from, to) = self.endpoints(side);
        Line::from_points(from, to)
    }

    #[must_use]
    pub fn length(&self, side: Side) -> f64 {
        let (from, to) = self.endpoints(side);
        (from - to).norm()
    }

    /// Side lengths `[a, b, c]`.
    #[must_use]
    pub fn lengths(&self) -> [f64; 3] {
        Side::ALL.map(|side| self.length(side))
    }

    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.lengths().iter().sum()
    }

    /// Area, in any dimension.
    ///
    /// Half the area of the parallelogram spanned by `AB` and `AC`, from the
    /// Gram determinant `|AB|^2 |AC|^2 - (AB . AC)^2`.
    #[must_use]
    pub fn area(&self) -> f64 {
        let ab = &self.b - &self.a;
        let ac = &self.c - &self.a;
        0.5 * wedge_norm(ab.coords(), ac.coords())
    }

    /// The normal `AB x AC`, not normalized. Its length is twice the area
    /// and its sign follows the vertex order.
    ///
    /// # Errors
    ///
    /// Returns an error if the triangle is not 2D or 3D.
    pub fn normal(&self) -> Result<Vector> {
        require_dimension("triangle normal", self.dimension(), &[2, 3])?;
        (&self.b - &self.a).cross(&(&self.c - &self.a))
    }

    #[must_use]
    pub fn centroid(&self) -> Point {
        let sum = self.a.coords() + self.b.coords() + self.c.coords();
        Point::from_coords(sum / 3.0)
    }

    /// Interior angle at a vertex, in radians.
    ///
    /// # Errors
    ///
    /// Returns an error if a neighbouring vertex coincides with `vertex`.
    pub fn angle(&self, vertex: Vertex) -> Result<f64> {
        let (here, first, second) = match vertex {
            Vertex::A => (&self.a, &self.b, &self.c),
            Vertex::B => (&self.b, &self.c, &self.a),
            Vertex::C => (&self.c, &self.a, &self.b),
        };
        (first - here).angle_between(&(second - here))
    }

    /// Line through `vertex` perpendicular to the opposite side.
    ///
    /// # Errors
    ///
    /// Returns an error if the triangle is degenerate at that vertex.
    pub fn altitude(&self, vertex: Vertex) -> Result<Line> {
        let base = self.line(vertex.opposite())?;
        let here = self.point(vertex);
        let foot = base.project_point(here)?;
        Line::from_points(here, &foot)
    }

    /// Intersection of the altitudes.
    ///
    /// # Errors
    ///
    /// Returns an error if the triangle is degenerate.
    pub fn orthocenter(&self, tol: Tolerance) -> Result<Point> {
        let from_a = self.altitude(Vertex::A)?;
        let from_b = self.altitude(Vertex::B)?;
        from_a.intersect_line(&from_b, tol)
    }

    /// Classifies the triangle by how many pairs of side lengths are close.
    #[must_use]
    pub fn classify(&self, tol: Tolerance) -> TriangleKind {
        let [a, b, c] = self.lengths();
        let close = [(a, b), (b, c), (a, c)]
            .into_iter()
            .filter(|&(x, y)| tol.is_close(x, y))
            .count();
        match close {
            3 => TriangleKind::Equilateral,
            1 | 2 => TriangleKind::Isosceles,
            _ => TriangleKind::Scalene,
        }
    }

    /// Checks the Pythagorean relation on the sorted side lengths.
    #[must_use]
    pub fn is_right(&self, tol: Tolerance) -> bool {
        let mut lengths = self.lengths();
        lengths.sort_by(f64::total_cmp);
        let [a, b, c] = lengths;
        tol.is_close(a * a + b * b, c * c)
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Triangle(point_a={}, point_b={}, point_c={})",
            self.a, self.b, self.c
        )
    }
}
