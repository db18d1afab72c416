pub mod linalg;
pub mod measurement;
pub mod search;
mod tolerance;
pub mod transform;

pub use tolerance::Tolerance;

/// Dynamically sized column vector backing points and vectors.
pub type Coords = nalgebra::DVector<f64>;

/// Dynamically sized matrix, one sample per row where it holds points.
pub type Matrix = nalgebra::DMatrix<f64>;

/// 3x3 matrix used by the rotation helpers.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Guard for near-zero denominators.
pub const TOLERANCE: f64 = 1e-10;
