use rand::RngCore;
use spinsight_analyzers::CandidateSet;
use spinsight_wheel::{Slot, WheelTopology, random_slot};

use crate::outcome::ValidationResult;

/// Where validation spins come from, chosen explicitly at every call site.
///
/// - [`Replay`](Self::Replay) walks a held-out historical window from its
///   start: repeated calls with the same window produce bit-identical
///   results.
/// - [`Simulated`](Self::Simulated) draws fresh uniform spins through the
///   caller's RNG: results are statistically consistent rather than
///   identical, unless the caller reseeds.
pub enum ValidationSource<'a> {
    /// Deterministic replay of held-out spins.
    Replay(&'a [Slot]),
    /// Fresh uniform draws from the wheel.
    Simulated {
        topology: &'a WheelTopology,
        rng: &'a mut dyn RngCore,
    },
}

/// Replays `spin_count` outcomes against a candidate set.
///
/// Neither the candidate set nor the validation window is mutated. In replay
/// mode the draw count is capped at the window length; the result's `spins`
/// field records how many were actually drawn.
///
/// # Example
///
/// ```
/// use spinsight_analyzers::CandidateSet;
/// use spinsight_validation::{ValidationSource, validate};
/// use spinsight_wheel::Slot;
///
/// let mut candidates = CandidateSet::new();
/// candidates.push(Slot::straight(7)?);
/// let window = vec![Slot::straight(7)?, Slot::straight(8)?, Slot::straight(7)?];
///
/// let result = validate(&candidates, ValidationSource::Replay(&window), 3);
/// assert_eq!(result.wins, 2);
/// assert_eq!(result.spins, 3);
/// # Ok::<(), spinsight_wheel::UnknownSlotError>(())
/// ```
#[must_use]
pub fn validate(
    candidates: &CandidateSet,
    source: ValidationSource<'_>,
    spin_count: u32,
) -> ValidationResult {
    let (wins, spins) = match source {
        ValidationSource::Replay(window) => {
            let limit = usize::try_from(spin_count).unwrap_or(usize::MAX);
            let drawn = window.iter().take(limit);
            let spins = u32::try_from(drawn.len()).unwrap_or(u32::MAX);
            let wins = drawn.filter(|&&s| candidates.contains(s)).count();
            (u32::try_from(wins).unwrap_or(u32::MAX), spins)
        }
        ValidationSource::Simulated { topology, rng } => {
            let mut wins = 0;
            for _ in 0..spin_count {
                if candidates.contains(random_slot(topology, rng)) {
                    wins += 1;
                }
            }
            (wins, spin_count)
        }
    };
    ValidationResult::new(wins, spins, candidates.len())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn candidate_set(labels: &[&str]) -> CandidateSet {
        let mut set = CandidateSet::new();
        for label in labels {
            set.push(label.parse().unwrap());
        }
        set
    }

    #[test]
    fn test_replay_is_bit_identical_across_calls() {
        let wheel = WheelTopology::american();
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let window: Vec<Slot> = (0..500).map(|_| random_slot(&wheel, &mut rng)).collect();
        let candidates = candidate_set(&["1", "2", "3", "00"]);

        let a = validate(&candidates, ValidationSource::Replay(&window), 500);
        let b = validate(&candidates, ValidationSource::Replay(&window), 500);
        assert_eq!(a, b);
    }

    #[test]
    fn test_replay_caps_at_window_length() {
        let window: Vec<Slot> = vec!["4".parse().unwrap(); 10];
        let candidates = candidate_set(&["4"]);
        let result = validate(&candidates, ValidationSource::Replay(&window), 1_000);
        assert_eq!(result.spins, 10);
        assert_eq!(result.wins, 10);
        assert_eq!(result.win_rate, 100.0);
    }

    #[test]
    fn test_simulated_uniform_draws_sit_near_baseline() {
        // 8 candidates over 3_800 uniform spins: win rate should sit near
        // the 8/38 ≈ 21.05% coverage baseline.
        let wheel = WheelTopology::american();
        let mut rng = Pcg64Mcg::seed_from_u64(1234);
        let candidates = candidate_set(&["0", "00", "7", "17", "23", "5", "32", "12"]);
        let result = validate(
            &candidates,
            ValidationSource::Simulated {
                topology: &wheel,
                rng: &mut rng,
            },
            3_800,
        );
        assert_eq!(result.spins, 3_800);
        assert!(
            (result.win_rate - result.coverage).abs() < 3.0,
            "win rate {} vs coverage {}",
            result.win_rate,
            result.coverage
        );
        assert!(result.performance.abs() < 15.0);
    }

    #[test]
    fn test_empty_candidate_set_never_wins() {
        let window: Vec<Slot> = vec!["9".parse().unwrap(); 50];
        let result = validate(&CandidateSet::new(), ValidationSource::Replay(&window), 50);
        assert_eq!(result.wins, 0);
        assert_eq!(result.coverage, 0.0);
        assert_eq!(result.performance, 0.0);
    }
}
