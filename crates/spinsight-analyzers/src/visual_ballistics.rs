//! Visual-ballistics analysis: deflector-driven landing bias.
//!
//! Models the technique of watching where the ball drops off the track. A
//! real wheel has eight deflector diamonds but a few dominate; a ball leaving
//! a dominant diamond travels a fairly repeatable number of pockets against
//! the wheel's rotation before settling. Every (diamond, travel distance)
//! pair, widened by a small symmetric scatter, votes for the pocket it lands
//! on; hit-count priors fold in as a light secondary adjustment.

use spinsight_wheel::{Slot, WheelTopology};

use crate::{
    analyzer::{PriorStats, ScoringAnalyzer},
    score::NumberScore,
};

/// One dominant deflector diamond and its observed travel distances.
#[derive(Debug, Clone)]
pub struct DiamondProfile {
    /// Rim position of the diamond.
    pub position: usize,
    /// Plausible pocket counts the ball travels after striking it.
    pub travel_distances: Vec<usize>,
}

/// Tuning constants for [`VisualBallisticsAnalyzer`].
#[derive(Debug, Clone)]
pub struct VisualBallisticsConfig {
    /// The dominant diamonds of the modeled wheel.
    pub diamonds: Vec<DiamondProfile>,
    /// Symmetric slop around each nominal travel distance, in pockets.
    pub scatter: usize,
    /// Blend weight of the landing votes when priors are present.
    pub vote_weight: f64,
    /// Blend weight of the prior hit frequencies.
    pub frequency_weight: f64,
    /// Size bound of the candidate set.
    pub target_size: usize,
}

impl Default for VisualBallisticsConfig {
    fn default() -> Self {
        Self {
            diamonds: vec![
                DiamondProfile {
                    position: 0,
                    travel_distances: vec![15, 16, 17, 18],
                },
                DiamondProfile {
                    position: 3,
                    travel_distances: vec![12, 13, 14, 15],
                },
                DiamondProfile {
                    position: 5,
                    travel_distances: vec![18, 19, 20, 21],
                },
            ],
            scatter: 2,
            vote_weight: 0.9,
            frequency_weight: 0.1,
            target_size: 8,
        }
    }
}

/// Scores pockets by how often the diamond/travel-distance model lands on
/// them.
///
/// The model is pure topology: the outcome window only matters through the
/// optional priors, so any window length (including zero) is acceptable.
#[derive(Debug, Clone, Default)]
pub struct VisualBallisticsAnalyzer {
    config: VisualBallisticsConfig,
}

impl VisualBallisticsAnalyzer {
    #[must_use]
    pub const fn new(config: VisualBallisticsConfig) -> Self {
        Self { config }
    }

    /// One vote per (diamond, distance, scatter offset) landing.
    #[expect(clippy::cast_possible_wrap)]
    fn landing_votes(&self, wheel: &WheelTopology) -> NumberScore {
        let scatter = self.config.scatter as isize;
        let mut votes = NumberScore::new();
        for diamond in &self.config.diamonds {
            let position = diamond.position as isize;
            for &distance in &diamond.travel_distances {
                let distance = distance as isize;
                for offset in -scatter..=scatter {
                    // The ball travels against wheel rotation, so landing
                    // positions count backward from the diamond.
                    let landing = wheel.slot_at_wrapped(position - distance + offset);
                    votes.add(landing, 1.0);
                }
            }
        }
        votes
    }
}

impl ScoringAnalyzer for VisualBallisticsAnalyzer {
    fn name(&self) -> &'static str {
        "visual-ballistics"
    }

    fn target_size(&self) -> usize {
        self.config.target_size
    }

    fn score(
        &self,
        wheel: &WheelTopology,
        _window: &[Slot],
        priors: Option<&PriorStats>,
    ) -> NumberScore {
        let votes = self.landing_votes(wheel);
        match priors {
            Some(p) if p.total_hits() > 0 => votes.normalized().blended(
                &p.hit_frequencies().normalized(),
                self.config.vote_weight,
                self.config.frequency_weight,
            ),
            _ => votes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_votes_stay_within_the_reachable_arc() {
        let analyzer = VisualBallisticsAnalyzer::default();
        let wheel = WheelTopology::american();
        // Landing positions span (diamond - distance - scatter) ..=
        // (diamond - distance + scatter) over all configured pairs: rim
        // positions 18..=31 once wrapped.
        let votes = analyzer.landing_votes(&wheel);
        for (slot, _) in votes.iter() {
            let pos = wheel.position_of(slot);
            assert!((18..=31).contains(&pos), "unexpected landing at {pos}");
        }
    }

    #[test]
    fn test_candidates_are_bounded_and_deterministic() {
        let analyzer = VisualBallisticsAnalyzer::default();
        let wheel = WheelTopology::american();
        let a = analyzer.candidates(&wheel, &[], None);
        let b = analyzer.candidates(&wheel, &[], None);
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn test_prior_blend_is_a_light_adjustment() {
        let analyzer = VisualBallisticsAnalyzer::default();
        let wheel = WheelTopology::american();
        // A heavy prior on a pocket the model never reaches must not push it
        // past the model's strongest landing zones.
        let hot = wheel.slot_at(2);
        let window = vec![hot; 50];
        let priors = PriorStats::from_window(&window);
        let set = analyzer.candidates(&wheel, &[], Some(&priors));
        let top = set.as_slice()[0];
        assert!((18..=31).contains(&wheel.position_of(top)));
    }
}
