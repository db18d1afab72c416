use thiserror::Error;

/// Top-level error type for spatium.
#[derive(Debug, Error)]
pub enum SpatiumError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Intersection(#[from] IntersectionError),

    #[error(transparent)]
    Fit(#[from] FitError),
}

/// Coarse classification of a [`SpatiumError`].
///
/// Lets callers branch on the kind of precondition that was violated
/// without matching the nested error enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operands have different dimensions, or the dimension is not supported.
    DimensionMismatch,
    /// The input makes the operation mathematically undefined.
    Degenerate,
    /// Parallel lines or planes where a crossing configuration is required.
    Parallel,
    /// Skew lines where coplanarity is required.
    NotCoplanar,
    /// Too few points for a fit or multi-point operation.
    InsufficientData,
    /// A label or parameter outside its valid set.
    OutOfRange,
    /// The primitives do not meet.
    NoIntersection,
}

impl SpatiumError {
    /// Returns the coarse kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Geometry(e) => match e {
                GeometryError::DimensionMismatch { .. }
                | GeometryError::UnsupportedDimension { .. } => ErrorKind::DimensionMismatch,
                GeometryError::OutOfRange { .. } => ErrorKind::OutOfRange,
                GeometryError::Degenerate(_)
                | GeometryError::ZeroVector
                | GeometryError::NonFinite
                | GeometryError::Empty
                | GeometryError::NonPositiveRadius(_) => ErrorKind::Degenerate,
            },
            Self::Intersection(e) => match e {
                IntersectionError::Parallel(_) => ErrorKind::Parallel,
                IntersectionError::NotCoplanar => ErrorKind::NotCoplanar,
                IntersectionError::Coincident(_) => ErrorKind::Degenerate,
                IntersectionError::NoIntersection(_) => ErrorKind::NoIntersection,
            },
            Self::Fit(e) => match e {
                FitError::InsufficientData { .. } => ErrorKind::InsufficientData,
                FitError::Degenerate(_) | FitError::SvdFailed => ErrorKind::Degenerate,
            },
        }
    }
}

/// Errors related to constructing and measuring primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("{operation} is not defined for dimension {dimension}")]
    UnsupportedDimension {
        operation: &'static str,
        dimension: usize,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("the values must all be finite")]
    NonFinite,

    #[error("the array must not be empty")]
    Empty,

    #[error("the radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("{parameter} must be one of {expected}, got {value:?}")]
    OutOfRange {
        parameter: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Errors raised when two primitives cannot be intersected.
#[derive(Debug, Error)]
pub enum IntersectionError {
    #[error("the {0} must not be parallel")]
    Parallel(&'static str),

    #[error("the lines must be coplanar")]
    NotCoplanar,

    #[error("the {0} do not intersect")]
    NoIntersection(&'static str),

    #[error("the {0} are coincident")]
    Coincident(&'static str),
}

/// Errors raised by the best-fit engine.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("at least {required} points are required, got {found}")]
    InsufficientData { required: usize, found: usize },

    #[error("degenerate point set: {0}")]
    Degenerate(String),

    #[error("singular value decomposition failed")]
    SvdFailed,
}

/// Convenience type alias for results using [`SpatiumError`].
pub type Result<T> = std::result::Result<T, SpatiumError>;

/// Returns an error unless `found == expected`.
pub(crate) fn check_dimension(expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(GeometryError::DimensionMismatch { expected, found }.into())
    }
}

/// Returns an error unless `dimension` is one of `allowed`.
pub(crate) fn require_dimension(
    operation: &'static str,
    dimension: usize,
    allowed: &[usize],
) -> Result<()> {
    if allowed.contains(&dimension) {
        Ok(())
    } else {
        Err(GeometryError::UnsupportedDimension {
            operation,
            dimension,
        }
        .into())
    }
}
