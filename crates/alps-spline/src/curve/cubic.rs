//! Editable cubic Hermite spline.

use alps_core::{AlpsError, HeapStorage, Result, Storage};

use super::{
    finite_difference_velocity, hermite_point, Curve, SplinePoint, DEFAULT_VELOCITY_STEP,
};
use crate::math::{Point3, Vector3};

/// A cubic Hermite spline over `n >= 2` control points.
///
/// The parameter domain is the half-open `[0, n-1)`: segment `i` spans
/// `[i, i+1]` and blends control points `i` and `i+1`. Evaluating at
/// exactly `n-1` would read past the last segment and is rejected;
/// callers that need the very end sample just below it (the arc-length
/// integrator backs off by `5e-7`).
///
/// Storage is injectable so hosts can back curves with arenas or pools;
/// the default is the global allocator. The curve owns its storage
/// exclusively, so distinct instances may be used from different threads
/// without coordination. Edits to a shared instance must be serialized
/// by the host.
#[derive(Debug, Clone)]
pub struct CubicSpline<S = HeapStorage<SplinePoint>> {
    points: S,
    velocity_step: f64,
}

impl CubicSpline<HeapStorage<SplinePoint>> {
    /// Create a spline with `n` zero-initialized control points on the
    /// heap.
    pub fn with_points(n: usize) -> Result<Self> {
        Self::with_points_in(n)
    }

    /// Create a spline from an existing control-point list.
    pub fn from_points(points: &[SplinePoint]) -> Result<Self> {
        let mut spline = Self::with_points(points.len())?;
        spline.points_mut().copy_from_slice(points);
        Ok(spline)
    }
}

impl<S: Storage<SplinePoint>> CubicSpline<S> {
    /// Create a spline with `n` zero-initialized control points in `S`.
    pub fn with_points_in(n: usize) -> Result<Self> {
        if n < 2 {
            return Err(AlpsError::Construction(format!(
                "a cubic spline needs at least 2 control points, got {n}"
            )));
        }
        Ok(Self {
            points: S::allocate(n)?,
            velocity_step: DEFAULT_VELOCITY_STEP,
        })
    }

    /// Resize to `n` control points.
    ///
    /// Points below `min(old, n)` keep their data and new slots are
    /// zero-initialized. When the resize fails the spline is unchanged.
    pub fn resize(&mut self, n: usize) -> Result<()> {
        if n < 2 {
            return Err(AlpsError::Construction(format!(
                "a cubic spline needs at least 2 control points, got {n}"
            )));
        }
        self.points.resize(n)
    }

    /// Override the finite-difference step used by [`velocity_at`].
    ///
    /// [`velocity_at`]: CubicSpline::velocity_at
    pub fn set_velocity_step(&mut self, step: f64) -> Result<()> {
        if !(step > 0.0) || !step.is_finite() {
            return Err(AlpsError::Construction(format!(
                "velocity step must be positive and finite, got {step}"
            )));
        }
        self.velocity_step = step;
        Ok(())
    }

    pub fn velocity_step(&self) -> f64 {
        self.velocity_step
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Upper bound of the parameter domain `[0, max_param())`.
    pub fn max_param(&self) -> f64 {
        (self.len() - 1) as f64
    }

    pub fn points(&self) -> &[SplinePoint] {
        self.points.as_slice()
    }

    pub fn points_mut(&mut self) -> &mut [SplinePoint] {
        self.points.as_mut_slice()
    }

    /// The backing storage, for hosts that need to inspect their own
    /// strategy.
    pub fn storage(&self) -> &S {
        &self.points
    }

    fn check_param(&self, param: f64) -> Result<()> {
        let max = self.max_param();
        if !param.is_finite() || param < 0.0 || param >= max {
            return Err(AlpsError::Domain(format!(
                "parameter {param} outside the domain [0, {max})"
            )));
        }
        Ok(())
    }

    /// Evaluate the curve position at `param`.
    pub fn point_at(&self, param: f64) -> Result<Point3> {
        self.check_param(param)?;
        let index = param.floor() as usize;
        let t = param - index as f64;
        let points = self.points.as_slice();
        Ok(hermite_point(&points[index], &points[index + 1], t))
    }

    /// Estimate the curve velocity at `param` by central finite
    /// difference of the position.
    pub fn velocity_at(&self, param: f64) -> Result<Vector3> {
        self.check_param(param)?;
        Ok(finite_difference_velocity(
            self.points.as_slice(),
            param,
            self.velocity_step,
        ))
    }
}

impl<S: Storage<SplinePoint> + Send + Sync> Curve for CubicSpline<S> {
    fn point_at(&self, t: f64) -> Result<Point3> {
        CubicSpline::point_at(self, t)
    }

    fn tangent_at(&self, t: f64) -> Result<Vector3> {
        CubicSpline::velocity_at(self, t)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, self.max_param())
    }
}
