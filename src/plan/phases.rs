use crate::features::extract::TextFeatures;
use crate::features::normalized::NormalizedFeatures;
use crate::foundation::math::trunc_i64;

const MIN_OPENING_POINTS: i64 = 30;
const MIN_CLOSING_POINTS: i64 = 10;

/// Narrative beat a phase models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseBeat {
    /// Accelerates with resolve.
    Resolve,
    /// Bursts with joy.
    Burst,
    /// Contracts delicately.
    Contract,
}

/// Walk parameters for one phase of a trace.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseSpec {
    /// Which beat this phase models.
    pub beat: PhaseBeat,
    /// Points emitted by this phase.
    pub point_count: u64,
    /// Constant per-step drift along X.
    pub drift_x: f64,
    /// Constant per-step drift along Y.
    pub drift_y: f64,
    /// Amplitude of the periodic offsets.
    pub wave_amplitude: f64,
    /// Base frequency of the periodic offsets.
    pub wave_frequency: f64,
    /// Noise scale; per-step gaussian noise has standard deviation `noise_scale / 10`.
    pub noise_scale: f64,
}

/// The three ordered phases plus the normalized scores they were derived from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhasePlan {
    /// Resolve, burst, contract, in walk order.
    pub phases: [PhaseSpec; 3],
    /// Scores that also bias the walker's starting point.
    pub mood: NormalizedFeatures,
}

impl PhasePlan {
    /// Total number of points the walker will emit.
    pub fn total_points(&self) -> u64 {
        self.phases.iter().map(|p| p.point_count).sum()
    }

    /// Iterate phases in walk order.
    pub fn iter(&self) -> impl Iterator<Item = &PhaseSpec> {
        self.phases.iter()
    }
}

/// Split the point budget into three phases and reweight the base wave quantities.
///
/// Phases 1 and 2 take `budget * share` points clamped to `[30, budget / 2]`; phase 3
/// takes the remainder but never fewer than 10, so the total may exceed the budget in
/// that edge case.
pub fn plan(features: &TextFeatures, mood: &NormalizedFeatures) -> PhasePlan {
    let i = mood.intensity;
    let c = mood.calm;
    let unrest = mood.unrest();
    let amp = features.wave_amplitude_base;
    let freq = features.wave_frequency_base;

    let budget = i64::try_from(features.point_budget).unwrap_or(i64::MAX);
    let opening_share = |share: f64| {
        let n = trunc_i64(budget as f64 * share);
        n.clamp(MIN_OPENING_POINTS, (budget / 2).max(MIN_OPENING_POINTS))
    };
    let p1 = opening_share(0.25 + i * 0.1 - c * 0.05);
    let p2 = opening_share(0.35 + i * 0.2 - c * 0.1);
    let p3 = (budget - p1 - p2).max(MIN_CLOSING_POINTS);

    let resolve = PhaseSpec {
        beat: PhaseBeat::Resolve,
        point_count: p1 as u64,
        drift_x: (2.0 + i * 3.0) * (1.0 - c * 0.5),
        drift_y: (-3.0 - i * 3.0) * (1.0 - c * 0.5),
        wave_amplitude: amp * (1.0 - i * 0.7) + c * 15.0,
        wave_frequency: freq * (1.0 + i * 0.8) * (1.0 - c * 0.4),
        noise_scale: (10.0 + i * 10.0) * (1.0 - c * 0.5),
    };

    let burst = PhaseSpec {
        beat: PhaseBeat::Burst,
        point_count: p2 as u64,
        drift_x: (1.5 + i * 2.0) * (1.0 - c * 0.3),
        drift_y: (-2.5 - i * 2.0) * (1.0 - c * 0.3),
        wave_amplitude: amp * (1.0 - i * 0.3) + c * 30.0,
        wave_frequency: freq * (1.0 + i * 1.5) * (1.0 - c * 0.2),
        noise_scale: (25.0 + i * 30.0) * (1.0 + unrest * 0.5),
    };

    let contract = PhaseSpec {
        beat: PhaseBeat::Contract,
        point_count: p3 as u64,
        drift_x: (0.5 + unrest * 1.5) * (1.0 - i * 0.3),
        drift_y: (-0.5 - unrest * 1.5) * (1.0 - i * 0.3),
        wave_amplitude: amp * (1.0 - i * 0.9) + unrest * 10.0,
        wave_frequency: freq * (1.0 + unrest * 2.0 + i * 0.5),
        noise_scale: (15.0 + unrest * 20.0) * (1.0 + i * 0.5),
    };

    tracing::debug!(
        resolve = p1,
        burst = p2,
        contract = p3,
        budget = features.point_budget,
        "planned trace phases"
    );

    PhasePlan {
        phases: [resolve, burst, contract],
        mood: *mood,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/phases.rs"]
mod tests;
