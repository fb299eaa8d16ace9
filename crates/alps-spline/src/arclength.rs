//! Parameter ↔ arc-length conversion tables.

use alps_core::{AlpsError, Result, Tolerance, Validate};

use crate::curve::Curve;

/// Offset subtracted from the domain's upper bound whenever a speed
/// sample is needed at the right edge, which the half-open evaluation
/// domain excludes.
pub const BOUNDARY_EPS: f64 = 5e-7;

/// Monotone lookup table mapping curve parameters to cumulative arc
/// length.
///
/// Built by integrating the curve's local speed (tangent magnitude) with
/// Simpson's rule at fixed parameter steps. Entry `i` holds the arc
/// length accumulated up to parameter `t_min + i * step_size`, except
/// the last entry, which sits at the domain's upper bound. The sequence
/// is non-decreasing as long as the curve's tangents never vanish.
///
/// The table is a snapshot of the curve it was built from and does not
/// track staleness; rebuild it after editing the curve.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    t_min: f64,
    t_max: f64,
    step_size: f64,
    arc_lengths: Vec<f64>,
}

impl ArcLengthTable {
    /// Integrate `curve`'s speed over its whole domain, sampling every
    /// `step_size` parameter units.
    ///
    /// Each full interval is accumulated with Simpson's rule over its
    /// endpoints and midpoint; the final partial interval runs from the
    /// last grid breakpoint to the domain edge.
    pub fn build(curve: &dyn Curve, step_size: f64) -> Result<Self> {
        if !(step_size > 0.0) || !step_size.is_finite() {
            return Err(AlpsError::Construction(format!(
                "integration step must be positive and finite, got {step_size}"
            )));
        }
        let (t_min, t_max) = curve.domain();
        let span = t_max - t_min;
        let n_steps = (span / step_size) as usize + 1;
        if n_steps < 2 {
            return Err(AlpsError::Construction(format!(
                "integration step {step_size} does not fit the domain span {span}"
            )));
        }

        let mut arc_lengths = Vec::new();
        arc_lengths.try_reserve_exact(n_steps)?;
        arc_lengths.push(0.0);

        // Samples that land on or past the upper bound back off by
        // BOUNDARY_EPS.
        let edge = t_max - BOUNDARY_EPS;
        let speed = |t: f64| -> Result<f64> { Ok(curve.tangent_at(t.min(edge))?.length()) };

        let mut total = 0.0;
        for i in 1..n_steps - 1 {
            let t = t_min + (i - 1) as f64 * step_size;
            total += simpson_interval(
                speed(t)?,
                speed(t + 0.5 * step_size)?,
                speed(t + step_size)?,
                step_size,
            );
            arc_lengths.push(total);
        }

        let t = t_min + (n_steps - 2) as f64 * step_size;
        let width = t_max - t;
        total += simpson_interval(speed(t)?, speed(t + 0.5 * width)?, speed(t_max)?, width);
        arc_lengths.push(total);

        Ok(Self {
            t_min,
            t_max,
            step_size,
            arc_lengths,
        })
    }

    pub fn len(&self) -> usize {
        self.arc_lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arc_lengths.is_empty()
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Cumulative arc-length entries, starting at 0.
    pub fn arc_lengths(&self) -> &[f64] {
        &self.arc_lengths
    }

    /// Parameter domain of the source curve.
    pub fn domain(&self) -> (f64, f64) {
        (self.t_min, self.t_max)
    }

    /// Arc length of the whole curve.
    pub fn total_length(&self) -> f64 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Arc length from the curve start to `param`, in O(1).
    ///
    /// Interpolates linearly between the two bracketing entries.
    /// Out-of-range parameters clamp to the table; rejection happens at
    /// the curve evaluation boundary, not here.
    pub fn param_to_arc_length(&self, param: f64) -> f64 {
        let n = self.arc_lengths.len();
        let offset = (param - self.t_min).clamp(0.0, self.t_max - self.t_min);
        let index = ((offset / self.step_size) as usize).min(n - 1);
        if index >= n - 2 {
            return self.arc_lengths[index];
        }
        let remainder = offset - index as f64 * self.step_size;
        let fraction = remainder / self.step_size;
        let lower = self.arc_lengths[index];
        let upper = self.arc_lengths[index + 1];
        lower + fraction * (upper - lower)
    }

    /// Invert the table: the parameter whose cumulative arc length is
    /// `arc_length`, in O(log n).
    ///
    /// Fails with `NotFound` when `arc_length` lies outside
    /// `[0, total_length()]` — there is no bracketing entry pair to
    /// interpolate from.
    pub fn arc_length_to_param(&self, arc_length: f64) -> Result<f64> {
        let total = self.total_length();
        if !arc_length.is_finite() || arc_length < 0.0 || arc_length > total {
            return Err(AlpsError::NotFound(format!(
                "arc length {arc_length} outside the table range [0, {total}]"
            )));
        }

        // Largest entry still <= arc_length; the sequence is sorted so
        // the standard-library binary search applies.
        let index = self.arc_lengths.partition_point(|&l| l <= arc_length) - 1;
        if index == self.arc_lengths.len() - 1 {
            return Ok(self.t_max);
        }

        let lower = self.arc_lengths[index];
        let upper = self.arc_lengths[index + 1];
        let fraction = if upper > lower {
            (arc_length - lower) / (upper - lower)
        } else {
            0.0
        };
        let param_lo = self.param_at(index);
        let param_hi = self.param_at(index + 1);
        Ok(param_lo + fraction * (param_hi - param_lo))
    }

    /// Parameter value of table entry `index`. The last entry sits at
    /// the domain edge, not on the step grid.
    fn param_at(&self, index: usize) -> f64 {
        (self.t_min + index as f64 * self.step_size).min(self.t_max)
    }
}

impl Validate for ArcLengthTable {
    /// The table must start at zero and never decrease.
    fn validate(&self) -> Result<()> {
        let tol = Tolerance::default_precision();
        match self.arc_lengths.first() {
            Some(&first) if tol.is_zero(first) => {}
            _ => {
                return Err(AlpsError::Construction(
                    "arc-length table must start at 0".into(),
                ))
            }
        }
        for window in self.arc_lengths.windows(2) {
            if window[1] < window[0] {
                return Err(AlpsError::Construction(format!(
                    "arc lengths decrease from {} to {}",
                    window[0], window[1]
                )));
            }
        }
        Ok(())
    }
}

/// Simpson's rule over one interval, phrased as the weighted mix of the
/// midpoint and trapezoid areas.
fn simpson_interval(left: f64, mid: f64, right: f64, width: f64) -> f64 {
    let mid_area = mid * width;
    let trap_area = 0.5 * (left + right) * width;
    (2.0 * mid_area + trap_area) / 3.0
}
