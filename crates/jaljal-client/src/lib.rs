pub mod http;
pub mod search;

pub use http::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, HttpSearchClient};
pub use jaljal_core::DataSource;
pub use search::CombinationSearch;
