//! Curve traits and Hermite evaluation primitives.

mod constant_speed;
mod cubic;

use serde::{Deserialize, Serialize};

use alps_core::Result;

use crate::math::{Point3, Vector3};

pub use constant_speed::ConstantSpeedCurve;
pub use cubic::CubicSpline;

/// Step for central finite-difference velocity estimation, in parameter
/// units.
///
/// Machine epsilon is far too small here: the two point samples would
/// agree in almost every bit and the quotient amplifies the rounding
/// noise into garbage. `1e-4` balances truncation against rounding error
/// for coordinates up to roughly `1e5` model units. Override per curve
/// with [`CubicSpline::set_velocity_step`] when the parameter scale
/// differs.
pub const DEFAULT_VELOCITY_STEP: f64 = 1e-4;

/// One knot of a Hermite spline: a position and the velocity the curve
/// has there.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SplinePoint {
    pub position: Point3,
    pub velocity: Vector3,
}

impl SplinePoint {
    pub fn new(position: Point3, velocity: Vector3) -> Self {
        Self { position, velocity }
    }
}

/// Trait for parametric curves in 3D space.
///
/// Evaluation is fallible: parameters outside the half-open domain
/// `[t_min, t_max)` are rejected, never clamped or read past the end.
pub trait Curve: Send + Sync {
    /// Evaluate the curve position at parameter `t`.
    fn point_at(&self, t: f64) -> Result<Point3>;

    /// Estimate the velocity vector at parameter `t`.
    fn tangent_at(&self, t: f64) -> Result<Vector3>;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);
}

/// Cubic Hermite blend of two spline points at local parameter `t`.
///
/// `h11` weights the first point's velocity and `h10` the second's;
/// this pairing defines the curve shape the whole engine is built
/// around and must not be "fixed".
pub(crate) fn hermite_point(sp0: &SplinePoint, sp1: &SplinePoint, t: f64) -> Point3 {
    let t_sq = t * t;
    let one_minus_t = 1.0 - t;
    let one_minus_t_sq = one_minus_t * one_minus_t;
    let two_t = 2.0 * t;

    let h00 = (1.0 + two_t) * one_minus_t_sq;
    let h11 = t * one_minus_t_sq;
    let h01 = t_sq * (3.0 - two_t);
    let h10 = t_sq * (t - 1.0);

    h00 * sp0.position + h10 * sp1.velocity + h01 * sp1.position + h11 * sp0.velocity
}

/// Hermite evaluation with the segment index clamped into range, letting
/// the local parameter run slightly past `[0, 1]`.
///
/// The finite-difference sampler needs `t ± h` near the domain edges;
/// the cubic extrapolates smoothly there.
pub(crate) fn hermite_point_extrapolated(points: &[SplinePoint], param: f64) -> Point3 {
    let last_segment = points.len() - 2;
    let index = (param.floor().max(0.0) as usize).min(last_segment);
    let t = param - index as f64;
    hermite_point(&points[index], &points[index + 1], t)
}

/// Central finite difference of the Hermite curve over `points`.
pub(crate) fn finite_difference_velocity(
    points: &[SplinePoint],
    param: f64,
    step: f64,
) -> Vector3 {
    let p0 = hermite_point_extrapolated(points, param - step);
    let p1 = hermite_point_extrapolated(points, param + step);
    (p1 - p0) / (2.0 * step)
}
