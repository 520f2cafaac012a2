pub mod config;
pub mod search;
pub mod ui;

use anyhow::Result;
use jaljal_client::{DataSource, HttpSearchClient};
use jaljal_config::Config;
use jaljal_core::SessionController;
use jaljal_engine::SearchEngine;
use std::sync::Arc;

/// Apply command-line overrides on top of the loaded config
pub fn override_api(
    config: &mut Config,
    base_url: Option<String>,
    source: Option<DataSource>,
) -> Result<()> {
    if let Some(url) = base_url {
        config.api.base_url = url;
    }
    if source.is_some() {
        config.api.data_source = source;
    }
    config.validate()?;
    Ok(())
}

/// Wire a session controller to the HTTP client described by `config`
pub fn build_engine(config: &Config) -> Result<SearchEngine> {
    let client = HttpSearchClient::new(config.client_options())?;
    tracing::debug!(endpoint = client.endpoint(), "Search client ready");

    let controller =
        SessionController::new(config.duration_policy(), config.search.default_attempts);
    Ok(SearchEngine::new(controller, Arc::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_api() {
        let mut config = Config::default();
        override_api(
            &mut config,
            Some("http://10.1.1.1:5000/api".to_string()),
            Some(DataSource::Database),
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://10.1.1.1:5000/api");
        assert_eq!(config.api.data_source, Some(DataSource::Database));

        // no flag keeps the configured source
        override_api(&mut config, None, None).unwrap();
        assert_eq!(config.api.data_source, Some(DataSource::Database));
    }

    #[test]
    fn test_override_rejects_bad_url() {
        let mut config = Config::default();
        assert!(override_api(&mut config, Some("localhost".to_string()), None).is_err());
    }

    #[test]
    fn test_build_engine_starts_idle() {
        let engine = build_engine(&Config::default()).unwrap();
        assert!(!engine.is_loading());
        assert_eq!(engine.state(), &jaljal_core::SessionState::Idle);
    }
}
