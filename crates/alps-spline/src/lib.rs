//! ALPSpline: cubic Hermite splines with arc-length re-parametrization.
//!
//! Build a [`CubicSpline`] from positions and tangents, integrate its
//! speed into an [`ArcLengthTable`], and resample it with [`Resampler`]
//! into a [`ConstantSpeedCurve`] whose native parameter already advances
//! at uniform arc-length steps, so it can be sampled by arc length in
//! O(1). The typical host is an animation or camera path that must move
//! at constant speed along an arbitrarily parameterized curve.

pub mod arclength;
pub mod curve;
pub mod math;
pub mod resample;

pub use arclength::ArcLengthTable;
pub use curve::{ConstantSpeedCurve, CubicSpline, Curve, SplinePoint};
pub use resample::Resampler;
