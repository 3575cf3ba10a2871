//! Rendering of submission state and prompts
//!
//! Pure string builders with a `color` switch, so tests can check the plain
//! text and the terminal gets the coloured version.

use owo_colors::OwoColorize;
use poke_common::{FeatureField, FeatureVector, SubmissionState};
use std::io::IsTerminal;

const TAG: &str = "[pokepredict]";

/// Whether stdout should get ANSI colours
pub fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

fn tag(color: bool) -> String {
    if color {
        TAG.bright_cyan().to_string()
    } else {
        TAG.to_string()
    }
}

/// Human-readable rendering of a state
pub fn render_state(state: &SubmissionState, color: bool) -> String {
    match state {
        SubmissionState::Idle => format!(
            "{}  Fill in the stats and submit to see the predicted rarity here.",
            tag(color)
        ),
        SubmissionState::Pending { .. } => format!("{}  Analyzing stats...", tag(color)),
        SubmissionState::Succeeded { display_text } => {
            let label = if color {
                display_text.bright_yellow().bold().to_string()
            } else {
                display_text.clone()
            };
            format!(
                "{}  Predicted rarity: {}\n{}  Based on the trained ML model",
                tag(color),
                label,
                tag(color)
            )
        }
        SubmissionState::Failed { category, message } => {
            let head = format!("{}:", category);
            let head = if color {
                head.bright_red().to_string()
            } else {
                head
            };
            format!("{}  {} {}", tag(color), head, message)
        }
    }
}

/// JSON rendering used by `--json`
pub fn render_json(state: &SubmissionState) -> String {
    serde_json::to_string_pretty(state).unwrap_or_else(|_| "{}".to_string())
}

/// Prompt line for one field, showing the current value and advisory range
pub fn field_prompt(field: FeatureField, current: i64, color: bool) -> String {
    let range = field.advisory_range();
    let hint = format!("({}-{}) [{}]", range.start(), range.end(), current);
    if color {
        format!("{} {}: ", field.label().bold(), hint.dimmed())
    } else {
        format!("{} {}: ", field.label(), hint)
    }
}

/// Warnings for values outside the advisory ranges; empty when all are in range
pub fn advisory_warnings(vector: &FeatureVector) -> Vec<String> {
    vector
        .advisory_violations()
        .into_iter()
        .map(|field| {
            let range = field.advisory_range();
            format!(
                "{} is {} (expected {}-{}); submitting anyway",
                field.label(),
                vector.get(field),
                range.start(),
                range.end()
            )
        })
        .collect()
}
