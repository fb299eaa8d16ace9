//! Arc-length-parameterized spline produced by constant-speed resampling.

use alps_core::{AlpsError, HeapStorage, Result, Storage, Tolerance, Validate};

use super::{
    finite_difference_velocity, hermite_point, Curve, SplinePoint, DEFAULT_VELOCITY_STEP,
};
use crate::math::{Point3, Vector3};

/// A Hermite spline whose consecutive control points are equally spaced
/// in arc length.
///
/// Built by [`Resampler`]. Because the spacing is uniform by
/// construction, evaluating by arc length needs no search: the
/// bracketing segment is `floor(arc_length / sub_spline_length)`. The
/// stored velocities all have magnitude `sub_spline_length`, so Hermite
/// interpolation between adjacent points approximates constant-speed
/// traversal.
///
/// [`Resampler`]: crate::resample::Resampler
#[derive(Debug, Clone)]
pub struct ConstantSpeedCurve<S = HeapStorage<SplinePoint>> {
    points: S,
    sub_spline_length: f64,
}

impl<S: Storage<SplinePoint>> ConstantSpeedCurve<S> {
    /// Assemble a curve from points spaced `sub_spline_length` apart in
    /// arc length.
    pub fn new(points: S, sub_spline_length: f64) -> Result<Self> {
        if points.len() < 2 {
            return Err(AlpsError::Construction(format!(
                "a constant-speed curve needs at least 2 points, got {}",
                points.len()
            )));
        }
        if !(sub_spline_length > 0.0) || !sub_spline_length.is_finite() {
            return Err(AlpsError::Construction(format!(
                "sub-spline length must be positive and finite, got {sub_spline_length}"
            )));
        }
        Ok(Self {
            points,
            sub_spline_length,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[SplinePoint] {
        self.points.as_slice()
    }

    /// Arc length between consecutive control points.
    pub fn sub_spline_length(&self) -> f64 {
        self.sub_spline_length
    }

    /// Upper bound of the parameter domain `[0, max_param())`.
    pub fn max_param(&self) -> f64 {
        (self.len() - 1) as f64
    }

    /// Total arc length covered, `(len - 1) * sub_spline_length`.
    pub fn total_length(&self) -> f64 {
        self.max_param() * self.sub_spline_length
    }

    /// Evaluate by the curve's native parameter, domain `[0, len-1)`.
    pub fn point_at_param(&self, param: f64) -> Result<Point3> {
        let max = self.max_param();
        if !param.is_finite() || param < 0.0 || param >= max {
            return Err(AlpsError::Domain(format!(
                "parameter {param} outside the domain [0, {max})"
            )));
        }
        let index = param.floor() as usize;
        let t = param - index as f64;
        let points = self.points.as_slice();
        Ok(hermite_point(&points[index], &points[index + 1], t))
    }

    /// Evaluate directly by arc length in O(1).
    ///
    /// `arc_length` must lie in `[0, total_length())`; out-of-range
    /// requests are rejected, matching the half-open parameter domain.
    pub fn point_at_arc_length(&self, arc_length: f64) -> Result<Point3> {
        let total = self.total_length();
        if !arc_length.is_finite() || arc_length < 0.0 || arc_length >= total {
            return Err(AlpsError::Domain(format!(
                "arc length {arc_length} outside the range [0, {total})"
            )));
        }
        let index = ((arc_length / self.sub_spline_length) as usize).min(self.len() - 2);
        let t = (arc_length - index as f64 * self.sub_spline_length) / self.sub_spline_length;
        let points = self.points.as_slice();
        Ok(hermite_point(&points[index], &points[index + 1], t))
    }
}

impl<S: Storage<SplinePoint>> Validate for ConstantSpeedCurve<S> {
    /// Every stored velocity must have magnitude `sub_spline_length`.
    fn validate(&self) -> Result<()> {
        let tol = Tolerance::loose();
        for (i, point) in self.points.as_slice().iter().enumerate() {
            let speed = point.velocity.length();
            if !tol.linear_eq(speed, self.sub_spline_length) {
                return Err(AlpsError::Construction(format!(
                    "velocity magnitude {speed} at point {i} deviates from the sub-spline \
                     length {}",
                    self.sub_spline_length
                )));
            }
        }
        Ok(())
    }
}

impl<S: Storage<SplinePoint> + Send + Sync> Curve for ConstantSpeedCurve<S> {
    fn point_at(&self, t: f64) -> Result<Point3> {
        self.point_at_param(t)
    }

    fn tangent_at(&self, t: f64) -> Result<Vector3> {
        let max = self.max_param();
        if !t.is_finite() || t < 0.0 || t >= max {
            return Err(AlpsError::Domain(format!(
                "parameter {t} outside the domain [0, {max})"
            )));
        }
        Ok(finite_difference_velocity(
            self.points.as_slice(),
            t,
            DEFAULT_VELOCITY_STEP,
        ))
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, self.max_param())
    }
}
