//! Wire models returned by the combination-search service
//!
//! All times are in seconds, as the service emits them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Minutes;

/// A single video inside a combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub duration: u64,
    #[serde(default)]
    pub duration_formatted: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// One candidate answer to a duration request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCombination {
    pub videos: Vec<Video>,
    pub total_time: u64,
    #[serde(default)]
    pub total_time_formatted: String,
    pub remaining_time: i64,
    #[serde(default)]
    pub remaining_time_formatted: String,
}

impl VideoCombination {
    /// Whether `total_time + remaining_time` adds up to the requested target.
    ///
    /// The client never enforces this; it is the service's contract.
    pub fn reconciles_with(&self, target: Minutes) -> bool {
        let target_secs = target.as_seconds().round() as i128;
        self.total_time as i128 + self.remaining_time as i128 == target_secs
    }
}

/// Ordered list of combinations from one successful search
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResult(Vec<VideoCombination>);

impl SearchResult {
    pub fn new(combinations: Vec<VideoCombination>) -> Self {
        Self(combinations)
    }

    pub fn combinations(&self) -> &[VideoCombination] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<VideoCombination> {
        self.0
    }

    /// Indices of combinations whose times do not add up to `target`
    pub fn mismatches(&self, target: Minutes) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, combo)| !combo.reconciles_with(target))
            .map(|(i, _)| i)
            .collect()
    }
}

impl From<Vec<VideoCombination>> for SearchResult {
    fn from(combinations: Vec<VideoCombination>) -> Self {
        Self(combinations)
    }
}

impl<'a> IntoIterator for &'a SearchResult {
    type Item = &'a VideoCombination;
    type IntoIter = std::slice::Iter<'a, VideoCombination>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Error body sent by the service on non-success responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Video catalogue the service should draw from.
///
/// Older service versions accepted this as `use_youtube` / `use_database`
/// flags. Current ones ignore it, so clients only send it when configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Memory,
    Youtube,
    Database,
}

impl DataSource {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("use_youtube", (*self == DataSource::Youtube).to_string()),
            ("use_database", (*self == DataSource::Database).to_string()),
        ]
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataSource::Memory => "memory",
            DataSource::Youtube => "youtube",
            DataSource::Database => "database",
        };
        f.write_str(name)
    }
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(DataSource::Memory),
            "youtube" => Ok(DataSource::Youtube),
            "database" | "db" => Ok(DataSource::Database),
            other => Err(format!(
                "Unknown data source '{}' (expected memory, youtube or database)",
                other
            )),
        }
    }
}
