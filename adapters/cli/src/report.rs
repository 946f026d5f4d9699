//! Output formats produced at the end of a run.

use std::fmt::Write as _;

use act_man_system_turn_loop::{RunReport, RunState};
use serde::Serialize;

/// Renders the plain-text report.
///
/// The first line lists the action codes separated by spaces, the second line
/// holds the final score and the remaining lines are the final grid rows.
#[must_use]
pub(crate) fn render_report(report: &RunReport) -> String {
    let codes: Vec<String> = report
        .action_codes()
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut text = String::new();
    let _ = writeln!(text, "{}", codes.join(" "));
    let _ = writeln!(text, "{}", report.score);
    for row in report.grid_rows() {
        let _ = writeln!(text, "{row}");
    }
    text
}

/// Machine-readable summary of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct RunSummary {
    /// Seed the dice were created with.
    seed: u64,
    /// State the run stopped in.
    outcome: RunState,
    /// Number of turns that were started.
    turns: u64,
    /// Final score.
    score: i32,
    /// Action codes in turn order.
    actions: Vec<i32>,
    /// Number of monsters still alive.
    monsters_remaining: usize,
    /// Final grid rows.
    grid: Vec<String>,
}

impl RunSummary {
    /// Captures the summary of a finished run.
    #[must_use]
    pub(crate) fn new(seed: u64, report: &RunReport) -> Self {
        Self {
            seed,
            outcome: report.outcome,
            turns: report.turns,
            score: report.score,
            actions: report.action_codes(),
            monsters_remaining: report.monsters_remaining,
            grid: report.grid_rows(),
        }
    }

    /// Serializes the summary as pretty-printed JSON.
    pub(crate) fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
