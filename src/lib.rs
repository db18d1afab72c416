pub mod error;
pub mod fit;
pub mod geometry;
pub mod math;

pub use error::{ErrorKind, Result, SpatiumError};
pub use fit::FitReport;
pub use geometry::{
    Circle, Cylinder, Distance, Extent, Line, LineSegment, Plane, Point, Points, Sphere, Triangle,
    Vector,
};
pub use math::Tolerance;
