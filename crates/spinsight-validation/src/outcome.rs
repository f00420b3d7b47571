use serde::Serialize;
use spinsight_analyzers::{CandidateSet, CycleDetection};
use spinsight_wheel::SLOT_COUNT;

/// Realized performance of one candidate set over one validation pass.
///
/// Computed once per (candidate set, validation source) pair and immutable
/// thereafter. Degenerate inputs (no spins, empty set) yield zero rates, not
/// NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Validation spins that landed in the candidate set.
    pub wins: u32,
    /// Validation spins actually drawn.
    pub spins: u32,
    /// `100 x wins / spins`.
    pub win_rate: f64,
    /// Percentage of the wheel the candidate set occupies.
    pub coverage: f64,
    /// Relative edge over the coverage-implied random baseline.
    pub performance: f64,
}

impl ValidationResult {
    /// Derives all rates from raw counts.
    ///
    /// `performance` is exactly zero when the set performs at baseline
    /// (`win_rate == coverage`) and defined as zero when coverage or spins
    /// are zero.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(wins: u32, spins: u32, candidate_count: usize) -> Self {
        let win_rate = if spins == 0 {
            0.0
        } else {
            100.0 * f64::from(wins) / f64::from(spins)
        };
        let coverage = 100.0 * candidate_count as f64 / SLOT_COUNT as f64;
        let performance = if coverage == 0.0 || spins == 0 || win_rate == coverage {
            0.0
        } else {
            (win_rate / coverage - 1.0) * 100.0
        };
        Self {
            wins,
            spins,
            win_rate,
            coverage,
            performance,
        }
    }
}

/// The record every analyzer run produces: the candidate set plus its
/// validation, ready for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    /// Name of the producing analyzer.
    pub analyzer: String,
    /// Candidate slots in the analyzer's rank order.
    pub candidates: CandidateSet,
    /// Cycle diagnostics, for analyzers that detect periodicity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_cycle: Option<CycleDetection>,
    /// Realized performance on the validation source.
    pub validation: ValidationResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_identity() {
        for count in 0..=10 {
            let result = ValidationResult::new(0, 100, count);
            #[expect(clippy::cast_precision_loss)]
            let expected = 100.0 * count as f64 / 38.0;
            assert_eq!(result.coverage, expected);
        }
    }

    #[test]
    fn test_zero_coverage_has_zero_performance() {
        let result = ValidationResult::new(0, 500, 0);
        assert_eq!(result.performance, 0.0);
        assert_eq!(result.win_rate, 0.0);
    }

    #[test]
    fn test_zero_spins_has_zero_rates() {
        let result = ValidationResult::new(0, 0, 8);
        assert_eq!(result.win_rate, 0.0);
        assert_eq!(result.performance, 0.0);
    }

    #[test]
    fn test_baseline_performance_is_exactly_zero() {
        // 5 wins out of 19 spins is exactly the 10/38 coverage baseline.
        let result = ValidationResult::new(5, 19, 10);
        assert!((result.win_rate - result.coverage).abs() < 1e-9);
        let baseline = ValidationResult::new(result.wins, result.spins, 10);
        assert!(baseline.performance.abs() < 1e-9);
    }

    #[test]
    fn test_outcome_serializes_candidates_as_labels_and_omits_absent_cycle() {
        let mut candidates = CandidateSet::new();
        candidates.push("00".parse().unwrap());
        candidates.push("17".parse().unwrap());
        let outcome = AnalysisOutcome {
            analyzer: "repeat-cluster".to_owned(),
            candidates,
            detected_cycle: None,
            validation: ValidationResult::new(3, 10, 2),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["analyzer"], "repeat-cluster");
        assert_eq!(json["candidates"][0], "00");
        assert_eq!(json["candidates"][1], "17");
        assert!(json.get("detected_cycle").is_none());
        assert_eq!(json["validation"]["wins"], 3);
    }

    #[test]
    fn test_performance_sign_tracks_the_edge() {
        let above = ValidationResult::new(30, 100, 8);
        assert!(above.performance > 0.0);
        let below = ValidationResult::new(10, 100, 8);
        assert!(below.performance < 0.0);
    }
}
