use clap::{Parser, Subcommand};

use self::analyze::AnalyzeArg;

mod analyze;
mod show_wheel;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Score the wheel history with every analyzer and validate the picks
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Print the physical rim layout with pocket colors
    ShowWheel,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Analyze(AnalyzeArg::default())) {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::ShowWheel => show_wheel::run()?,
    }
    Ok(())
}
