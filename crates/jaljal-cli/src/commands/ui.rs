use anyhow::Result;
use jaljal_config::Config;

use super::build_engine;

pub async fn handle(config: &Config) -> Result<()> {
    let engine = build_engine(config)?;
    jaljal_tui::run(engine, config.render_options(), config.search.default_attempts).await
}
