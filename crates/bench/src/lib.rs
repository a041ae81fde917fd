use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const RNG_SEED: u64 = 0x5EED_2026;

/// Criterion timing profile, chosen by input size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuntimeProfile {
    Small,
    Medium,
    Large,
}

impl RuntimeProfile {
    pub fn for_size(size: usize) -> Self {
        match size {
            0..=4_096 => Self::Small,
            4_097..=16_384 => Self::Medium,
            _ => Self::Large,
        }
    }

    /// `(sample_size, warm_up_ms, measure_ms)`
    fn settings(self) -> (usize, u64, u64) {
        match self {
            Self::Small => (15, 100, 200),
            Self::Medium => (15, 500, 1_000),
            Self::Large => (10, 800, 1_500),
        }
    }

    pub fn apply<M: Measurement>(self, group: &mut BenchmarkGroup<'_, M>) {
        let (samples, warm_up_ms, measure_ms) = self.settings();
        group.sample_size(samples);
        group.warm_up_time(Duration::from_millis(warm_up_ms));
        group.measurement_time(Duration::from_millis(measure_ms));
    }
}

pub fn apply_runtime_config_for_size<M: Measurement>(
    group: &mut BenchmarkGroup<'_, M>,
    size: usize,
) {
    RuntimeProfile::for_size(size).apply(group);
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

/// Non-empty half-open ranges inside `0..n`.
pub fn random_ranges<R: Rng + ?Sized>(rng: &mut R, n: usize, count: usize) -> Vec<(usize, usize)> {
    assert!(n > 0, "cannot draw ranges from an empty domain");
    let mut ranges = Vec::with_capacity(count);
    for _ in 0..count {
        let l = rng.random_range(0..n);
        let r = rng.random_range((l + 1)..=n);
        ranges.push((l, r));
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_follow_size_thresholds() {
        let cases = [
            (1, RuntimeProfile::Small),
            (4_096, RuntimeProfile::Small),
            (4_097, RuntimeProfile::Medium),
            (16_384, RuntimeProfile::Medium),
            (65_536, RuntimeProfile::Large),
        ];
        for (size, expected) in cases {
            assert_eq!(RuntimeProfile::for_size(size), expected, "size={size}");
        }
    }

    #[test]
    fn random_ranges_are_non_empty_and_in_bounds() {
        let mut rng = default_rng();
        for n in 1..20 {
            for (l, r) in random_ranges(&mut rng, n, 50) {
                assert!(l < r && r <= n, "n={n} l={l} r={r}");
            }
        }
    }
}
