//! Command implementations
//!
//! This is the presentation layer: it collects edits into a `FeatureVector`,
//! hands it to the controller and renders whatever state comes back. Decisions
//! about responses and failures all live in poke_common.

use crate::cli::{Cli, Commands, StatArgs};
use crate::display;
use crate::errors::{exit_code, EXIT_SUCCESS};
use crate::progress::ProgressIndicator;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use poke_common::{
    FeatureField, FeatureVector, HttpTransport, PredictionTransport, PredictorConfig,
    SubmissionController, SubmissionState, SubmitRejected,
};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

/// Dispatch a parsed command line; returns the process exit code
pub async fn run(cli: Cli) -> Result<i32> {
    let config = cli.apply_overrides(PredictorConfig::load()?);
    debug!(endpoint = %config.endpoint, timeout_secs = config.timeout_secs, "Configuration resolved");

    match &cli.command {
        Commands::Predict(stats) => predict(&config, stats, cli.json).await,
        Commands::Interactive => interactive(&config, cli.json).await,
        Commands::Config => show_config(&config, cli.json),
    }
}

fn controller(config: &PredictorConfig) -> Result<SubmissionController<HttpTransport>> {
    let transport = HttpTransport::from_config(config).context("Failed to create HTTP client")?;
    Ok(SubmissionController::new(transport).with_timeout(config.timeout()))
}

/// One-shot prediction from command line values
pub async fn predict(config: &PredictorConfig, stats: &StatArgs, json: bool) -> Result<i32> {
    let vector = stats.apply(FeatureVector::default());
    print_advisory_warnings(&vector);

    let controller = controller(config)?;
    let state = run_submission(&controller, vector, !json).await?;
    print_state(&state, json);

    Ok(exit_code(&state))
}

/// Prompt for the stats, predict, and offer another round
pub async fn interactive(config: &PredictorConfig, json: bool) -> Result<i32> {
    let controller = controller(config)?;
    let mut input = BufReader::new(tokio::io::stdin());
    let color = display::use_color();

    if color {
        println!("{}", "PokéPredict".bright_yellow().bold());
    } else {
        println!("PokéPredict");
    }
    println!("Enter the Pokémon's stats to predict its rarity. Enter - to keep a value.");
    println!();

    let mut vector = FeatureVector::default();
    let mut code = EXIT_SUCCESS;

    loop {
        vector = match read_vector(&mut input, vector, color).await? {
            Some(edited) => edited,
            None => break,
        };
        print_advisory_warnings(&vector);

        let state = run_submission(&controller, vector, !json).await?;
        print_state(&state, json);
        code = exit_code(&state);

        print!("Predict again? [Y/n] ");
        std::io::stdout().flush()?;
        match next_line(&mut input).await? {
            Some(answer) if answer.eq_ignore_ascii_case("n") || answer.eq_ignore_ascii_case("no") => break,
            Some(_) => println!(),
            None => break,
        }
    }

    Ok(code)
}

fn show_config(config: &PredictorConfig, json: bool) -> Result<i32> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        match PredictorConfig::config_path() {
            Some(path) => println!("# {}", path.display()),
            None => println!("# no config directory"),
        }
        print!("{}", config.to_toml());
    }
    Ok(EXIT_SUCCESS)
}

/// Submit and follow the controller's state until it is terminal,
/// showing a spinner while it is pending.
pub async fn run_submission<T: PredictionTransport>(
    controller: &SubmissionController<T>,
    vector: FeatureVector,
    show_progress: bool,
) -> Result<SubmissionState, SubmitRejected> {
    let mut updates = controller.subscribe();
    let submit = controller.submit(vector);
    tokio::pin!(submit);

    let mut progress: Option<ProgressIndicator> = None;

    loop {
        tokio::select! {
            result = &mut submit => {
                if let Some(progress) = progress.take() {
                    let elapsed = progress.finish();
                    debug!(elapsed_ms = elapsed.as_millis() as u64, "Submission finished");
                }
                return result;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    // Sender gone; only the submit future is left to wait on
                    return submit.await;
                }
                if updates.borrow_and_update().is_pending() && progress.is_none() {
                    progress = Some(ProgressIndicator::new("Analyzing stats...", show_progress));
                }
            }
        }
    }
}

/// Prompt answer that leaves a field as it is
pub const KEEP_VALUE: &str = "-";

/// Prompt for every field; `None` on end of input.
/// An empty answer is an edit like any other and coerces to 0.
async fn read_vector<R>(
    input: &mut R,
    mut vector: FeatureVector,
    color: bool,
) -> Result<Option<FeatureVector>>
where
    R: AsyncBufRead + Unpin,
{
    for field in FeatureField::ALL {
        print!("{}", display::field_prompt(field, vector.get(field), color));
        std::io::stdout().flush()?;

        match next_line(input).await? {
            Some(raw) if raw == KEEP_VALUE => {}
            Some(raw) => vector = vector.update(field, &raw),
            None => return Ok(None),
        }
    }
    Ok(Some(vector))
}

fn print_advisory_warnings(vector: &FeatureVector) {
    let color = display::use_color();
    for warning in display::advisory_warnings(vector) {
        if color {
            eprintln!("{}  {}", "warning:".yellow(), warning);
        } else {
            eprintln!("warning:  {}", warning);
        }
    }
}

fn print_state(state: &SubmissionState, json: bool) {
    if json {
        println!("{}", display::render_json(state));
    } else {
        println!("{}", display::render_state(state, display::use_color()));
    }
}

/// One line from the prompt input, trimmed; `None` on end of input
async fn next_line<R: AsyncBufRead + Unpin>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use poke_common::transport::FakeTransport;
    use poke_common::{ErrorCategory, SubmissionFailure};

    #[tokio::test]
    async fn test_run_submission_success() {
        let controller = SubmissionController::new(FakeTransport::always_ok(r#"{"result": "Rare"}"#));
        let state = run_submission(&controller, FeatureVector::default(), false)
            .await
            .unwrap();
        assert_eq!(
            state,
            SubmissionState::Succeeded {
                display_text: "Rare".into()
            }
        );
    }

    #[tokio::test]
    async fn test_run_submission_failure() {
        let controller =
            SubmissionController::new(FakeTransport::always_err(SubmissionFailure::Status(404)));
        let state = run_submission(&controller, FeatureVector::default(), false)
            .await
            .unwrap();
        assert_eq!(state.category(), Some(ErrorCategory::HttpError));
        assert_eq!(exit_code(&state), crate::errors::EXIT_HTTP_ERROR);
    }

    #[tokio::test]
    async fn test_read_vector_applies_edits() {
        let script = "80\n-\nabc\n 12x\n\n-\n3\n";
        let mut input = BufReader::new(script.as_bytes());

        let start = FeatureVector::default()
            .with(FeatureField::Attack, 50)
            .with(FeatureField::SpDef, 70)
            .with(FeatureField::Speed, 90);
        let v = read_vector(&mut input, start, false).await.unwrap().unwrap();
        assert_eq!(v.hp, 80);
        assert_eq!(v.attack, 50);
        assert_eq!(v.defense, 0);
        assert_eq!(v.sp_atk, 12);
        // Cleared field coerces to 0 instead of keeping 70
        assert_eq!(v.sp_def, 0);
        assert_eq!(v.speed, 90);
        assert_eq!(v.generation, 3);
    }

    #[tokio::test]
    async fn test_read_vector_end_of_input() {
        let mut input = BufReader::new("45\n49\n".as_bytes());
        let v = read_vector(&mut input, FeatureVector::default(), false)
            .await
            .unwrap();
        assert!(v.is_none());
    }
}
