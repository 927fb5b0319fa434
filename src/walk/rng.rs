use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

const WALK_STREAM: u64 = 0;
const RENDER_STREAM: u64 = 1;

/// Seeded, platform-independent random source for one pipeline invocation.
///
/// The walk and the renderer read independent ChaCha streams of the same seed, so
/// rendering choices never shift the trace.
#[derive(Clone, Debug)]
pub struct TraceRng {
    inner: ChaCha8Rng,
}

impl TraceRng {
    /// Stream used by the trace walker.
    pub fn for_walk(seed: u64) -> Self {
        Self::on_stream(seed, WALK_STREAM)
    }

    /// Stream used by stroke styles that scatter or break the trace.
    pub fn for_render(seed: u64) -> Self {
        Self::on_stream(seed, RENDER_STREAM)
    }

    fn on_stream(seed: u64, stream: u64) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(seed);
        inner.set_stream(stream);
        Self { inner }
    }

    /// Uniform integer in `[lo, hi)`; a degenerate range yields `lo`.
    pub fn int_in(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        self.inner.gen_range(lo..hi)
    }

    /// Uniform real in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.inner.r#gen::<f64>()
    }

    /// Uniform real in `[lo, lo + span)`.
    pub fn between(&mut self, lo: f64, span: f64) -> f64 {
        lo + self.unit() * span
    }

    /// Zero-mean gaussian sample with the given standard deviation.
    pub fn normal(&mut self, std_dev: f64) -> f64 {
        let z: f64 = self.inner.sample(StandardNormal);
        z * std_dev
    }
}

#[cfg(test)]
#[path = "../../tests/unit/walk/rng.rs"]
mod tests;
