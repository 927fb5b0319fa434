use crate::foundation::core::{Canvas, TracePoint};
use crate::foundation::error::ThoughtlineResult;
use crate::foundation::math::{Fnv1a64, trunc_i32, trunc_i64};
use crate::plan::phases::PhasePlan;
use crate::walk::rng::TraceRng;

/// Pixels kept free around the random starting window.
const START_MARGIN: f64 = 50.0;
/// Pixels kept free around every emitted point.
const CLAMP_MARGIN: f64 = 20.0;

const FREQ_SCALE_X: f64 = 0.05;
const FREQ_SCALE_Y: f64 = 0.03;

/// The ordered path produced by [`walk`]. Order is significant and never changed downstream.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Trace {
    /// Points in walk order.
    pub points: Vec<TracePoint>,
    /// Seed the trace was walked from; renderers derive their own stream from it.
    pub seed: u64,
}

impl Trace {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the trace has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Stable 64-bit fingerprint of the point sequence.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u64(self.points.len() as u64);
        for p in &self.points {
            h.write_i32(p.x);
            h.write_i32(p.y);
        }
        h.finish()
    }
}

/// Walk the three phases from a seeded start, emitting one clamped point per step.
///
/// Wave arguments use the global point index, so the periodic terms stay continuous
/// across phase boundaries.
///
/// Points are clamped to `[20, extent - 20]` on each axis. An axis shorter than 40 px has
/// no such range: its window collapses to the centre line (`extent / 2`) and every point
/// lands on it.
#[tracing::instrument(skip(plan), fields(points = plan.total_points()))]
pub fn walk(plan: &PhasePlan, seed: u64, canvas: Canvas) -> ThoughtlineResult<Trace> {
    let canvas = canvas.validate()?;
    let mut rng = TraceRng::for_walk(seed);
    let mood = plan.mood;

    let (sx_lo, sx_hi) = canvas.x_window(START_MARGIN);
    let (sy_lo, sy_hi) = canvas.y_window(START_MARGIN);
    let start_x = rng.int_in(sx_lo as i64, sx_hi as i64)
        + trunc_i64(mood.intensity * 50.0 - mood.calm * 20.0);
    let start_y = rng.int_in(sy_lo as i64, sy_hi as i64)
        + trunc_i64(mood.calm * 50.0 - mood.intensity * 20.0);

    let (x_lo, x_hi) = canvas.x_window(CLAMP_MARGIN);
    let (y_lo, y_hi) = canvas.y_window(CLAMP_MARGIN);

    let mut x = start_x as f64;
    let mut y = start_y as f64;
    let total = usize::try_from(plan.total_points()).unwrap_or(usize::MAX);
    let mut points = Vec::with_capacity(total);
    let mut wave_offset = 0u64;

    for phase in plan.iter() {
        for local in 0..phase.point_count {
            let k = (local + wave_offset) as f64;
            let jitter = rng.between(0.8, 0.4);
            let freq_x = phase.wave_frequency * FREQ_SCALE_X * jitter;
            let freq_y = phase.wave_frequency * FREQ_SCALE_Y * jitter;

            let wave_x = phase.wave_amplitude * (k * freq_x).sin();
            let wave_y = phase.wave_amplitude * (k * freq_y).cos();

            let noise_sd = phase.noise_scale / 10.0;
            let dx = phase.drift_x + rng.normal(noise_sd) + wave_x;
            let dy = phase.drift_y + rng.normal(noise_sd) + wave_y;

            x = (x + dx).clamp(x_lo, x_hi);
            y = (y + dy).clamp(y_lo, y_hi);

            points.push(TracePoint::new(trunc_i32(x), trunc_i32(y)));
        }
        wave_offset += phase.point_count;
    }

    tracing::debug!(start_x, start_y, emitted = points.len(), "walked trace");
    Ok(Trace { points, seed })
}

#[cfg(test)]
#[path = "../../tests/unit/walk/walker.rs"]
mod tests;
