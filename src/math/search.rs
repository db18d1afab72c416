//! Derivative-free minimization over axis directions in 3D.
//!
//! Directions are parametrized by spherical angles. A golden-spiral scan of
//! the upper hemisphere picks a starting direction, then a compass search
//! refines it. Opposite directions describe the same axis, so only one
//! hemisphere is sampled.

use std::f64::consts::{PI, TAU};

use nalgebra::Vector3;
use tracing::debug;

/// Spherical angles of a direction: polar `theta` from +z, azimuth `phi`
/// from +x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalAngles {
    pub theta: f64,
    pub phi: f64,
}

impl SphericalAngles {
    /// Angles of a non-zero direction.
    ///
    /// The azimuth is 0 for directions along the z axis.
    #[must_use]
    pub fn from_direction(direction: &Vector3<f64>) -> Self {
        let norm = direction.norm();
        let theta = (direction.z / norm).clamp(-1.0, 1.0).acos();
        let phi = direction.y.atan2(direction.x);
        Self { theta, phi }
    }

    /// Unit direction for these angles.
    #[must_use]
    pub fn to_direction(self) -> Vector3<f64> {
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        Vector3::new(cos_phi * sin_theta, sin_phi * sin_theta, cos_theta)
    }
}

/// Parameters of [`minimize_direction`].
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    /// Number of golden-spiral samples on the hemisphere.
    pub samples: usize,
    /// Initial compass step, in radians.
    pub initial_step: f64,
    /// The search stops once the step falls below this.
    pub min_step: f64,
    /// Upper bound on compass iterations.
    pub max_iterations: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            samples: 128,
            initial_step: 0.1,
            min_step: 1e-10,
            max_iterations: 10_000,
        }
    }
}

/// Result of [`minimize_direction`].
#[derive(Debug, Clone, Copy)]
pub struct SearchResult {
    /// Unit direction with the lowest objective found.
    pub direction: Vector3<f64>,
    /// Objective value at `direction`.
    pub value: f64,
    /// Compass iterations performed.
    pub iterations: usize,
}

/// `count` unit directions spread evenly over the hemisphere `z > 0`.
#[must_use]
pub fn golden_spiral_hemisphere(count: usize) -> Vec<Vector3<f64>> {
    let golden_ratio = (1.0 + 5.0_f64.sqrt()) / 2.0;
    #[allow(clippy::cast_precision_loss)]
    let n = count as f64;

    (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let i = i as f64;
            let z = 1.0 - (i + 0.5) / n;
            let r = (1.0 - z * z).max(0.0).sqrt();
            let angle = TAU * i / golden_ratio;
            Vector3::new(r * angle.cos(), r * angle.sin(), z)
        })
        .collect()
}

/// Minimizes `objective` over unit directions in 3D.
///
/// The best of `initial` and the hemisphere samples seeds a compass search
/// over the spherical angles. Steps that improve the objective are taken
/// greedily; otherwise the step is halved.
pub fn minimize_direction<F>(
    objective: F,
    initial: &Vector3<f64>,
    options: SearchOptions,
) -> SearchResult
where
    F: Fn(&Vector3<f64>) -> f64,
{
    let mut best = SphericalAngles::from_direction(initial);
    let mut best_value = objective(&best.to_direction());

    for sample in golden_spiral_hemisphere(options.samples) {
        let value = objective(&sample);
        if value < best_value {
            best = SphericalAngles::from_direction(&sample);
            best_value = value;
        }
    }
    debug!(
        samples = options.samples,
        theta = best.theta,
        phi = best.phi,
        value = best_value,
        "hemisphere scan done"
    );

    let mut step = options.initial_step;
    let mut iterations = 0;
    while step >= options.min_step && iterations < options.max_iterations {
        iterations += 1;
        let moves = [(step, 0.0), (-step, 0.0), (0.0, step), (0.0, -step)];
        let improved = moves.iter().find_map(|&(d_theta, d_phi)| {
            let candidate = SphericalAngles {
                theta: (best.theta + d_theta).clamp(0.0, PI),
                phi: best.phi + d_phi,
            };
            let value = objective(&candidate.to_direction());
            (value < best_value).then_some((candidate, value))
        });
        match improved {
            Some((candidate, value)) => {
                best = candidate;
                best_value = value;
            }
            None => step *= 0.5,
        }
    }
    debug!(iterations, step, value = best_value, "compass search done");

    SearchResult {
        direction: best.to_direction(),
        value: best_value,
        iterations,
    }
}
