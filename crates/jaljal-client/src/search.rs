//! Combination search trait

use async_trait::async_trait;
use jaljal_core::{SearchError, SearchRequest, SearchResult};

/// Anything that can answer a combination search.
///
/// One call is one attempt: implementations must not retry, cache, or
/// merge concurrent identical requests.
#[async_trait]
pub trait CombinationSearch: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError>;
}
