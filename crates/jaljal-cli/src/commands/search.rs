use anyhow::Result;
use jaljal_config::Config;
use jaljal_core::{SessionState, View, render};
use tracing::info;

use super::build_engine;
use crate::cli::OutputFormat;

pub async fn handle(
    config: &Config,
    duration: &str,
    attempts: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let mut engine = build_engine(config)?;

    info!(duration, attempts, "Searching for combinations");
    engine.search(duration, attempts).await?;

    match format {
        OutputFormat::Json => print_json(engine.state())?,
        OutputFormat::Text => {
            let view = render(engine.state(), &config.render_options());
            if !matches!(view, View::Error { .. }) {
                for line in view.to_lines() {
                    println!("{}", line);
                }
            }
        }
    }

    if let SessionState::Failed(failure) = engine.state() {
        if let Some(hint) = failure.hint() {
            eprintln!("Hint: {}", hint);
        }
        anyhow::bail!("{}", failure.message());
    }

    Ok(())
}

/// Successful searches print the combinations as the service sent them
fn print_json(state: &SessionState) -> Result<()> {
    if let SessionState::Succeeded(result) = state {
        println!("{}", serde_json::to_string_pretty(result)?);
    }
    Ok(())
}
