use std::path::PathBuf;

use log::info;
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;
use serde::Serialize;
use spinsight_validation::{AnalysisOutcome, run_all_analyzers};
use spinsight_wheel::{OutcomeHistory, SlotColor, WheelSession, WheelTopology};

use crate::util::{Output, read_history_file};

/// Keeps the validation draw stream distinct from the session draw stream
/// when both derive from the same user-supplied seed.
const VALIDATION_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// Number of spins to simulate when no history file is given
    #[arg(long, default_value_t = 5000)]
    spins: usize,
    /// Trailing spins held out of analysis for replay validation
    #[arg(long, default_value_t = 500)]
    holdout: usize,
    /// Number of validation spins per analyzer
    #[arg(long, default_value_t = 500)]
    validation_spins: u32,
    /// RNG seed; a random one is drawn (and reported) when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Validate against fresh simulated spins instead of the held-out window
    #[arg(long)]
    simulated: bool,
    /// JSON file holding a recorded spin history (array of slot labels)
    #[arg(long)]
    history: Option<PathBuf>,
    /// Emit the report as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Default for AnalyzeArg {
    fn default() -> Self {
        Self {
            spins: 5000,
            holdout: 500,
            validation_spins: 500,
            seed: None,
            simulated: false,
            history: None,
            json: false,
            output: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct AnalysisReport {
    seed: u64,
    analysis_spins: usize,
    holdout: usize,
    validation_mode: &'static str,
    outcomes: Vec<AnalysisOutcome>,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let seed = arg.seed.unwrap_or_else(rand::random);
    let wheel = WheelTopology::american();

    let history = match &arg.history {
        Some(path) => {
            let outcomes = read_history_file(path)?;
            info!("loaded {} recorded spins from {}", outcomes.len(), path.display());
            OutcomeHistory::from_outcomes(outcomes, arg.holdout)
        }
        None => {
            let mut session =
                WheelSession::new(wheel.clone(), Pcg64Mcg::seed_from_u64(seed), arg.holdout);
            session.spin_batch(arg.spins);
            info!("simulated {} spins with seed {seed}", arg.spins);
            session.into_history()
        }
    };

    let mut validation_rng;
    let simulated_rng = if arg.simulated {
        validation_rng = Pcg64Mcg::seed_from_u64(seed ^ VALIDATION_STREAM);
        Some(&mut validation_rng as &mut dyn rand::RngCore)
    } else {
        None
    };

    let outcomes = run_all_analyzers(&wheel, &history, arg.validation_spins, simulated_rng);
    let report = AnalysisReport {
        seed,
        analysis_spins: history.analysis_window().len(),
        holdout: history.validation_window().len(),
        validation_mode: if arg.simulated { "simulated" } else { "replay" },
        outcomes,
    };

    if arg.json {
        Output::save_json(&report, arg.output.clone())?;
    } else {
        let mut output = Output::from_output_path(arg.output.clone())?;
        write_text_report(&mut output, &report)?;
    }
    Ok(())
}

fn write_text_report(output: &mut Output, report: &AnalysisReport) -> anyhow::Result<()> {
    use std::io::Write as _;

    writeln!(
        output,
        "seed {} | {} analysis spins, {} held out | validation: {}",
        report.seed, report.analysis_spins, report.holdout, report.validation_mode
    )?;
    writeln!(output)?;
    for outcome in &report.outcomes {
        writeln!(output, "{}", outcome.analyzer)?;
        let candidates: Vec<String> = outcome
            .candidates
            .iter()
            .map(|slot| format!("{slot}({})", color_tag(slot.color())))
            .collect();
        writeln!(output, "  candidates: {}", candidates.join(" "))?;
        if let Some(cycle) = &outcome.detected_cycle {
            writeln!(
                output,
                "  cycle: length {} (strength {:.3})",
                cycle.length, cycle.strength
            )?;
        }
        let v = &outcome.validation;
        writeln!(
            output,
            "  validation: {}/{} wins, win rate {:.2}%, coverage {:.2}%, performance {:+.2}%",
            v.wins, v.spins, v.win_rate, v.coverage, v.performance
        )?;
        writeln!(output)?;
    }
    output
        .flush()
        .map_err(|e| anyhow::anyhow!("Failed to flush report to {}: {e}", output.display_path()))
}

fn color_tag(color: SlotColor) -> &'static str {
    match color {
        SlotColor::Red => "R",
        SlotColor::Black => "B",
        SlotColor::Green => "G",
    }
}
