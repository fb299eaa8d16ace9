//! Constant-speed resampling of parametric curves.

use alps_core::{AlpsError, HeapStorage, Result, Storage, Tolerance};

use crate::arclength::{ArcLengthTable, BOUNDARY_EPS};
use crate::curve::{ConstantSpeedCurve, Curve, SplinePoint};

/// Default number of uniform arc-length segments in the output curve.
pub const DEFAULT_SUB_SPLINES: usize = 100;

/// Default integration step for the internal arc-length table.
///
/// The resampling is only as accurate as this integration. Lower it for
/// long or sharply curved splines; raise it to trade accuracy for build
/// time (table construction is O(domain span / step)).
pub const DEFAULT_INTEGRATION_STEP: f64 = 0.001;

/// Rebuilds a curve so that consecutive control points are equally
/// spaced in arc length.
///
/// For each output point the target arc length is inverted through the
/// table to a source parameter, the source curve is evaluated there, and
/// the tangent is rescaled to the segment spacing so that Hermite
/// interpolation between adjacent output points approximates
/// constant-speed motion.
#[derive(Debug, Clone, Copy)]
pub struct Resampler {
    pub sub_splines: usize,
    pub integration_step: f64,
}

impl Default for Resampler {
    fn default() -> Self {
        Self {
            sub_splines: DEFAULT_SUB_SPLINES,
            integration_step: DEFAULT_INTEGRATION_STEP,
        }
    }
}

impl Resampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sub_splines(mut self, sub_splines: usize) -> Self {
        self.sub_splines = sub_splines;
        self
    }

    pub fn with_integration_step(mut self, step: f64) -> Self {
        self.integration_step = step;
        self
    }

    /// Resample `curve` into a constant-speed curve on the heap.
    pub fn resample(&self, curve: &dyn Curve) -> Result<ConstantSpeedCurve> {
        self.resample_in::<HeapStorage<SplinePoint>>(curve)
    }

    /// Resample `curve` with the output points placed in `S`.
    pub fn resample_in<S: Storage<SplinePoint>>(
        &self,
        curve: &dyn Curve,
    ) -> Result<ConstantSpeedCurve<S>> {
        if self.sub_splines == 0 {
            return Err(AlpsError::Construction(
                "sub-spline count must be positive".into(),
            ));
        }

        let table = ArcLengthTable::build(curve, self.integration_step)?;
        let total = table.total_length();
        let tol = Tolerance::default_precision();
        if !total.is_finite() || total < 0.0 || tol.is_zero(total) {
            return Err(AlpsError::Construction(format!(
                "curve has degenerate total arc length {total}"
            )));
        }

        let sub_length = total / self.sub_splines as f64;
        let n_points = (total / sub_length) as usize + 1;
        let (_, t_max) = curve.domain();

        let mut points = S::allocate(n_points)?;
        for (i, slot) in points.as_mut_slice().iter_mut().enumerate() {
            let target = (i as f64 * sub_length).min(total);
            let param = table.arc_length_to_param(target)?;
            // The inversion may land exactly on the domain edge, which
            // the half-open evaluation domain excludes.
            let param = param.min(t_max - BOUNDARY_EPS);

            let position = curve.point_at(param)?;
            let velocity = curve.tangent_at(param)?;
            let speed = velocity.length();
            if tol.is_zero(speed) {
                return Err(AlpsError::Construction(format!(
                    "curve speed vanishes at parameter {param}; tangents must not be zero"
                )));
            }
            *slot = SplinePoint::new(position, velocity * (sub_length / speed));
        }

        ConstantSpeedCurve::new(points, sub_length)
    }
}

#[cfg(test)]
mod tests {
    use alps_core::Validate;
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::curve::CubicSpline;
    use crate::math::DVec3;

    fn straight_spline() -> CubicSpline {
        CubicSpline::from_points(&[
            SplinePoint::new(DVec3::new(300.0, 500.0, 0.0), DVec3::new(100.0, 0.0, 0.0)),
            SplinePoint::new(DVec3::new(1300.0, 500.0, 0.0), DVec3::new(100.0, 0.0, 0.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_resample_straight_spline() {
        let spline = straight_spline();
        let curve = Resampler::new().resample(&spline).unwrap();

        assert_abs_diff_eq!(curve.sub_spline_length(), 10.0, epsilon = 1e-3);
        // Output spans the whole source length in uniform segments.
        assert_abs_diff_eq!(
            curve.total_length(),
            1000.0,
            epsilon = curve.sub_spline_length()
        );
        curve.validate().unwrap();

        // The resampled points march along x in equal arc-length steps.
        for window in curve.points().windows(2) {
            let gap = (window[1].position - window[0].position).length();
            assert_abs_diff_eq!(gap, curve.sub_spline_length(), epsilon = 1e-2);
        }
    }

    #[test]
    fn test_resampled_tangents_have_uniform_magnitude() {
        let spline = straight_spline();
        let curve = Resampler::new().resample(&spline).unwrap();
        for point in curve.points() {
            assert_abs_diff_eq!(
                point.velocity.length(),
                curve.sub_spline_length(),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_sub_spline_count_options() {
        let spline = straight_spline();
        let curve = Resampler::new()
            .with_sub_splines(10)
            .resample(&spline)
            .unwrap();
        assert_abs_diff_eq!(curve.sub_spline_length(), 100.0, epsilon = 1e-2);

        assert!(Resampler::new()
            .with_sub_splines(0)
            .resample(&spline)
            .is_err());
    }

    #[test]
    fn test_degenerate_curve_rejected() {
        // All points coincide with zero tangents: zero speed everywhere.
        let spline = CubicSpline::from_points(&[
            SplinePoint::new(DVec3::new(5.0, 5.0, 5.0), DVec3::ZERO),
            SplinePoint::new(DVec3::new(5.0, 5.0, 5.0), DVec3::ZERO),
        ])
        .unwrap();
        assert!(Resampler::new().resample(&spline).is_err());
    }

    #[test]
    fn test_bad_integration_step_propagates() {
        let spline = straight_spline();
        assert!(Resampler::new()
            .with_integration_step(0.0)
            .resample(&spline)
            .is_err());
    }
}
