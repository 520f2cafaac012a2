use async_trait::async_trait;
use jaljal_core::{ApiError, DataSource, SearchError, SearchRequest, SearchResult};
use std::time::Duration;
use tracing::{debug, warn};

use crate::search::CombinationSearch;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`HttpSearchClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
    /// Sent as `use_youtube` / `use_database` only when set
    pub data_source: Option<DataSource>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            data_source: None,
        }
    }
}

/// Talks to the `/combinations` endpoint over HTTP
pub struct HttpSearchClient {
    client: reqwest::Client,
    endpoint: String,
    data_source: Option<DataSource>,
}

impl HttpSearchClient {
    pub fn new(options: ClientOptions) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("jaljal/", env!("CARGO_PKG_VERSION")))
            .timeout(options.timeout)
            .build()
            .map_err(|e| {
                SearchError::TransportFailure(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/combinations", options.base_url.trim_end_matches('/')),
            data_source: options.data_source,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn query(&self, request: &SearchRequest) -> Vec<(&'static str, String)> {
        let mut params = request.query_pairs();
        if let Some(source) = &self.data_source {
            params.extend(source.query_pairs());
        }
        params
    }
}

/// Turn a non-success response into the matching error.
///
/// A readable `{"error": ...}` body wins; anything else is a transport failure.
fn rejection(status: u16, body: &str) -> SearchError {
    match serde_json::from_str::<ApiError>(body) {
        Ok(api_error) if !api_error.error.trim().is_empty() => SearchError::ServiceRejected {
            message: api_error.error,
            hint: api_error.hint,
        },
        _ => SearchError::TransportFailure(format!("HTTP error {}", status)),
    }
}

/// A body that stops arriving before the timeout counts as no response
fn body_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        warn!(error = %e, "Timed out reading combination response");
        SearchError::Unreachable(e.to_string())
    } else {
        SearchError::TransportFailure(format!("Failed to read response: {}", e))
    }
}

#[async_trait]
impl CombinationSearch for HttpSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        let params = self.query(request);
        debug!(endpoint = %self.endpoint, ?params, "Requesting combinations");

        let response = self
            .client
            .get(&self.endpoint)
            .header("accept", "application/json")
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Combination service unreachable");
                SearchError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(body_error)?;

        if !status.is_success() {
            let err = rejection(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %err, "Combination search rejected");
            return Err(err);
        }

        let result: SearchResult = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Undecodable combination payload");
            SearchError::TransportFailure(format!("Invalid response body: {}", e))
        })?;

        debug!(combinations = result.len(), "Received combinations");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = HttpSearchClient::new(ClientOptions {
            base_url: "http://example.com/api/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.endpoint(), "http://example.com/api/combinations");
    }

    #[test]
    fn test_rejection_prefers_error_text() {
        let err = rejection(400, r#"{"error": "duration too large", "hint": "try 60"}"#);
        assert_eq!(
            err,
            SearchError::ServiceRejected {
                message: "duration too large".to_string(),
                hint: Some("try 60".to_string()),
            }
        );
    }

    #[test]
    fn test_rejection_without_usable_body() {
        assert_eq!(
            rejection(502, "<html>Bad Gateway</html>"),
            SearchError::TransportFailure("HTTP error 502".to_string())
        );
        assert_eq!(
            rejection(500, r#"{"error": ""}"#),
            SearchError::TransportFailure("HTTP error 500".to_string())
        );
        assert_eq!(
            rejection(500, ""),
            SearchError::TransportFailure("HTTP error 500".to_string())
        );
    }

    #[test]
    fn test_data_source_only_sent_when_configured() {
        let request =
            SearchRequest::build(jaljal_core::validate_duration("30").unwrap(), None).unwrap();

        let plain = HttpSearchClient::new(ClientOptions::default()).unwrap();
        assert_eq!(plain.query(&request).len(), 2);

        let youtube = HttpSearchClient::new(ClientOptions {
            data_source: Some(DataSource::Youtube),
            ..Default::default()
        })
        .unwrap();
        let params = youtube.query(&request);
        assert!(params.contains(&("use_youtube", "true".to_string())));
        assert!(params.contains(&("use_database", "false".to_string())));
    }
}
