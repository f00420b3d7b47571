use log::{debug, info};
use rand::RngCore;
use spinsight_analyzers::{PriorStats, ScoringAnalyzer, default_analyzers};
use spinsight_wheel::{OutcomeHistory, WheelTopology};

use crate::{
    outcome::AnalysisOutcome,
    validator::{ValidationSource, validate},
};

/// Runs one analyzer end to end: score, select, validate.
///
/// This is the single place an analyzer's window (the analysis side of the
/// history split) meets a validation source, so no analyzer can accidentally
/// score the spins it is later validated on.
pub fn run_analysis(
    analyzer: &dyn ScoringAnalyzer,
    wheel: &WheelTopology,
    history: &OutcomeHistory,
    priors: &PriorStats,
    source: ValidationSource<'_>,
    spin_count: u32,
) -> AnalysisOutcome {
    let window = history.analysis_window();
    let candidates = analyzer.candidates(wheel, window, Some(priors));
    let detected_cycle = analyzer.detected_cycle(window);
    if let Some(cycle) = &detected_cycle {
        info!(
            "{}: detected cycle of length {} (strength {:.3})",
            analyzer.name(),
            cycle.length,
            cycle.strength
        );
    }
    let validation = validate(&candidates, source, spin_count);
    debug!(
        "{}: {} candidates, win rate {:.2}% over {} spins (performance {:+.2}%)",
        analyzer.name(),
        candidates.len(),
        validation.win_rate,
        validation.spins,
        validation.performance
    );
    AnalysisOutcome {
        analyzer: analyzer.name().to_owned(),
        candidates,
        detected_cycle,
        validation,
    }
}

/// Runs the full default analyzer suite over one history, in reporting order.
///
/// Priors are computed once from the analysis window and shared. When
/// `simulated_rng` is `Some`, every analyzer is validated against fresh
/// uniform spins drawn through it; otherwise each is replayed against the
/// held-out validation window.
pub fn run_all_analyzers(
    wheel: &WheelTopology,
    history: &OutcomeHistory,
    spin_count: u32,
    mut simulated_rng: Option<&mut dyn RngCore>,
) -> Vec<AnalysisOutcome> {
    let priors = PriorStats::from_window(history.analysis_window());
    default_analyzers()
        .iter()
        .map(|analyzer| {
            let source = match simulated_rng.as_deref_mut() {
                Some(rng) => ValidationSource::Simulated {
                    topology: wheel,
                    rng,
                },
                None => ValidationSource::Replay(history.validation_window()),
            };
            run_analysis(analyzer.as_ref(), wheel, history, &priors, source, spin_count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;
    use spinsight_wheel::{Slot, random_slot};

    use super::*;

    fn seeded_history(spins: usize, holdout: usize, seed: u64) -> OutcomeHistory {
        let wheel = WheelTopology::american();
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let outcomes: Vec<Slot> = (0..spins).map(|_| random_slot(&wheel, &mut rng)).collect();
        OutcomeHistory::from_outcomes(outcomes, holdout)
    }

    #[test]
    fn test_replay_suite_produces_one_outcome_per_analyzer() {
        let wheel = WheelTopology::american();
        let history = seeded_history(4_000, 500, 7);
        let outcomes = run_all_analyzers(&wheel, &history, 500, None);

        let names: Vec<&str> = outcomes.iter().map(|o| o.analyzer.as_str()).collect();
        assert_eq!(
            names,
            [
                "temporal-cycle",
                "repeat-cluster",
                "chaotic-domain",
                "variance-balance",
                "visual-ballistics",
            ]
        );
        for outcome in &outcomes {
            assert_eq!(outcome.validation.spins, 500);
        }
    }

    #[test]
    fn test_candidate_sets_stay_bounded_and_duplicate_free() {
        let wheel = WheelTopology::american();
        let history = seeded_history(4_000, 500, 11);
        for outcome in run_all_analyzers(&wheel, &history, 500, None) {
            assert!(outcome.candidates.len() <= 10, "{}", outcome.analyzer);
            let unique: BTreeSet<Slot> = outcome.candidates.iter().collect();
            assert_eq!(unique.len(), outcome.candidates.len(), "{}", outcome.analyzer);
        }
    }

    #[test]
    fn test_replay_runs_are_reproducible() {
        let wheel = WheelTopology::american();
        let history = seeded_history(4_000, 500, 13);
        let first = run_all_analyzers(&wheel, &history, 500, None);
        let second = run_all_analyzers(&wheel, &history, 500, None);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.candidates.as_slice(), b.candidates.as_slice());
            assert_eq!(a.validation, b.validation);
        }
    }

    #[test]
    fn test_simulated_suite_draws_the_requested_spins() {
        let wheel = WheelTopology::american();
        let history = seeded_history(2_000, 200, 17);
        let mut rng = Pcg64Mcg::seed_from_u64(99);
        let outcomes = run_all_analyzers(&wheel, &history, 1_000, Some(&mut rng));
        for outcome in &outcomes {
            assert_eq!(outcome.validation.spins, 1_000);
        }
    }

    #[test]
    fn test_coverage_matches_candidate_count() {
        let wheel = WheelTopology::american();
        let history = seeded_history(4_000, 500, 23);
        for outcome in run_all_analyzers(&wheel, &history, 500, None) {
            #[expect(clippy::cast_precision_loss)]
            let expected = 100.0 * outcome.candidates.len() as f64 / 38.0;
            assert_eq!(outcome.validation.coverage, expected, "{}", outcome.analyzer);
        }
    }
}
