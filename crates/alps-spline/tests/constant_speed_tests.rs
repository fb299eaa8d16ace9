use alps_core::{AlpsError, Result, Storage, Validate};
use approx::assert_abs_diff_eq;

use alps_spline::arclength::ArcLengthTable;
use alps_spline::curve::{ConstantSpeedCurve, CubicSpline, Curve, SplinePoint};
use alps_spline::math::DVec3;
use alps_spline::resample::Resampler;

/// A gently wavy 5-point spline whose tangents match the sampled path,
/// so its speed stays far from zero. `phase` varies the configuration.
fn wavy_spline(phase: f64) -> CubicSpline {
    let points: Vec<SplinePoint> = (0..5)
        .map(|i| {
            let t = i as f64;
            let position = DVec3::new(
                200.0 * t + 50.0 * (1.3 * t + phase).sin(),
                120.0 * t + 40.0 * (0.7 * t + phase).cos(),
                30.0 * t,
            );
            let velocity = DVec3::new(
                200.0 + 65.0 * (1.3 * t + phase).cos(),
                120.0 - 28.0 * (0.7 * t + phase).sin(),
                30.0,
            );
            SplinePoint::new(position, velocity)
        })
        .collect();
    CubicSpline::from_points(&points).unwrap()
}

fn straight_spline() -> CubicSpline {
    CubicSpline::from_points(&[
        SplinePoint::new(DVec3::new(300.0, 500.0, 0.0), DVec3::new(100.0, 0.0, 0.0)),
        SplinePoint::new(DVec3::new(1300.0, 500.0, 0.0), DVec3::new(100.0, 0.0, 0.0)),
    ])
    .unwrap()
}

#[test]
fn round_trip_inversion_on_varied_splines() {
    for &phase in &[0.0, 1.9, 4.2] {
        let spline = wavy_spline(phase);
        let table = ArcLengthTable::build(&spline, 0.001).unwrap();
        table.validate().unwrap();

        let mut param = 0.0;
        while param < spline.max_param() {
            let arc = table.param_to_arc_length(param);
            let back = table.arc_length_to_param(arc).unwrap();
            assert_abs_diff_eq!(back, param, epsilon = 1e-3);
            param += 0.01;
        }
    }
}

#[test]
fn resampled_points_are_uniformly_spaced_in_arc_length() {
    let spline = wavy_spline(0.8);
    let curve = Resampler::new().resample(&spline).unwrap();
    curve.validate().unwrap();

    // Re-integrate the resampled curve and check that each segment
    // contributes one sub-spline length of arc.
    let table = ArcLengthTable::build(&curve, 0.001).unwrap();
    let sub = curve.sub_spline_length();
    for i in 0..curve.len() - 1 {
        let lo = table.param_to_arc_length(i as f64);
        let hi = table.param_to_arc_length((i + 1) as f64);
        assert_abs_diff_eq!(hi - lo, sub, epsilon = 0.05 * sub);
    }
}

#[test]
fn arc_length_evaluation_agrees_with_inversion() {
    let spline = wavy_spline(2.4);
    let curve = Resampler::new().resample(&spline).unwrap();
    let table = ArcLengthTable::build(&curve, 0.001).unwrap();

    let total = curve.total_length();
    let (_, t_max) = curve.domain();
    let mut s = 0.0;
    while s < total {
        let direct = curve.point_at_arc_length(s).unwrap();
        let param = table.arc_length_to_param(s.min(table.total_length())).unwrap();
        let indirect = curve.point_at_param(param.min(t_max - 1e-6)).unwrap();
        assert!(
            (direct - indirect).length() < 0.05,
            "s={s}: direct={direct:?} indirect={indirect:?}"
        );
        s += 3.7;
    }
}

#[test]
fn constant_speed_sampling_tracks_time_uniformly() {
    // The whole point of the engine: stepping the arc length linearly
    // must move the sample point at near-constant speed, even though the
    // source parameterization is very uneven.
    let spline = straight_spline();
    let curve = Resampler::new().resample(&spline).unwrap();

    let total = curve.total_length();
    let n = 50;
    let mut previous = curve.point_at_arc_length(0.0).unwrap();
    for i in 1..n {
        let s = (i as f64 / n as f64) * total;
        let p = curve.point_at_arc_length(s).unwrap();
        let step = (p - previous).length();
        assert_abs_diff_eq!(step, total / n as f64, epsilon = 0.2);
        previous = p;
    }
}

/// Minimal host-supplied storage, standing in for an arena or pool.
struct CountingStorage {
    items: Vec<SplinePoint>,
    resizes: usize,
}

impl Storage<SplinePoint> for CountingStorage {
    fn allocate(len: usize) -> Result<Self> {
        Ok(Self {
            items: vec![SplinePoint::default(); len],
            resizes: 0,
        })
    }

    fn resize(&mut self, new_len: usize) -> Result<()> {
        self.resizes += 1;
        self.items.resize(new_len, SplinePoint::default());
        Ok(())
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn as_slice(&self) -> &[SplinePoint] {
        &self.items
    }

    fn as_mut_slice(&mut self) -> &mut [SplinePoint] {
        &mut self.items
    }
}

#[test]
fn custom_storage_threads_through_curves_and_resampling() {
    let mut spline = CubicSpline::<CountingStorage>::with_points_in(2).unwrap();
    spline.points_mut().copy_from_slice(&[
        SplinePoint::new(DVec3::new(300.0, 500.0, 0.0), DVec3::new(100.0, 0.0, 0.0)),
        SplinePoint::new(DVec3::new(1300.0, 500.0, 0.0), DVec3::new(100.0, 0.0, 0.0)),
    ]);

    let curve: ConstantSpeedCurve<CountingStorage> =
        Resampler::new().resample_in(&spline).unwrap();
    assert!(curve.len() >= 100);
    assert_abs_diff_eq!(curve.sub_spline_length(), 10.0, epsilon = 1e-3);
}

#[test]
fn custom_storage_resize_goes_through_the_strategy() {
    let mut spline = CubicSpline::<CountingStorage>::with_points_in(3).unwrap();
    spline.resize(5).unwrap();
    spline.resize(2).unwrap();
    // CubicSpline never reallocates behind the strategy's back.
    assert_eq!(spline.storage().resizes, 2);
    assert_eq!(spline.len(), 2);
}

#[test]
fn errors_carry_their_taxonomy() {
    let spline = straight_spline();

    match spline.point_at(2.5) {
        Err(AlpsError::Domain(_)) => {}
        other => panic!("expected a domain error, got {other:?}"),
    }

    let table = ArcLengthTable::build(&spline, 0.001).unwrap();
    match table.arc_length_to_param(-5.0) {
        Err(AlpsError::NotFound(_)) => {}
        other => panic!("expected a not-found error, got {other:?}"),
    }

    match ArcLengthTable::build(&spline, -1.0) {
        Err(AlpsError::Construction(_)) => {}
        other => panic!("expected a construction error, got {other:?}"),
    }
}
