//! Terminal walkthrough of the constant-speed resampling pipeline.
//!
//! Builds the straight demo spline whose parameter speed is very uneven
//! (short tangents, long chord), integrates it into an arc-length table,
//! resamples it, and shows that uniform arc-length steps now move the
//! sample point at constant speed.

use alps_core::Result;
use alps_spline::arclength::ArcLengthTable;
use alps_spline::curve::{CubicSpline, SplinePoint};
use alps_spline::math::DVec3;
use alps_spline::resample::Resampler;

fn main() -> Result<()> {
    let spline = CubicSpline::from_points(&[
        SplinePoint::new(DVec3::new(300.0, 500.0, 0.0), DVec3::new(100.0, 0.0, 0.0)),
        SplinePoint::new(DVec3::new(1300.0, 500.0, 0.0), DVec3::new(100.0, 0.0, 0.0)),
    ])?;

    let table = ArcLengthTable::build(&spline, 0.001)?;
    println!(
        "arc-length table: {} entries, step {}, total length {:.3}",
        table.len(),
        table.step_size(),
        table.total_length()
    );

    println!("\nuniform parameter steps (uneven spacing):");
    for i in 0..=10 {
        let param = (i as f64 / 10.0).min(1.0 - 1e-6);
        let p = spline.point_at(param)?;
        let arc = table.param_to_arc_length(param);
        println!("  param {param:.2} -> x {:8.2}  arc {arc:8.2}", p.x);
    }

    let curve = Resampler::new().resample(&spline)?;
    println!(
        "\nresampled into {} points, {:.3} arc units apart",
        curve.len(),
        curve.sub_spline_length()
    );

    println!("\nuniform arc-length steps (even spacing):");
    let total = curve.total_length();
    for i in 0..=10 {
        let s = (i as f64 / 10.0 * total).min(total - 1e-6);
        let p = curve.point_at_arc_length(s)?;
        println!("  arc {s:8.2} -> x {:8.2}", p.x);
    }

    Ok(())
}
