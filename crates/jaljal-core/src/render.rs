//! Render mapping - session state to display records
//!
//! Pure and deterministic: the same state always yields the same view.
//! Frontends (terminal UI, plain-text CLI output) only draw a [`View`].

use serde::Serialize;

use crate::{SessionState, Video, VideoCombination};

/// Shown when a search succeeded but nothing matched
pub const EMPTY_RESULT_MESSAGE: &str = "No matching combination was found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Placeholder blocks drawn while a search is in flight
    pub placeholders: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { placeholders: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    /// Nothing beyond the form
    Blank,
    Loading {
        placeholders: usize,
    },
    Error {
        message: String,
        hint: Option<String>,
        /// Validation errors sit next to the input, others are page-level
        inline: bool,
    },
    Empty {
        message: String,
    },
    Combinations {
        combinations: Vec<CombinationView>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinationView {
    /// 1-based position in the result list
    pub index: usize,
    pub videos: Vec<VideoLine>,
    pub total: String,
    pub remaining: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoLine {
    pub title: String,
    pub duration: String,
    pub link: Option<String>,
    pub thumbnail: Option<String>,
}

impl View {
    /// Plain-text rendering, one entry per output line
    pub fn to_lines(&self) -> Vec<String> {
        match self {
            View::Blank => Vec::new(),
            View::Loading { placeholders } => {
                let mut lines = vec!["Searching...".to_string()];
                for _ in 0..*placeholders {
                    lines.push(String::new());
                    lines.push("  ░░░░░░░░░░░░░░░░░░░░░░░░".to_string());
                    lines.push("  ░░░░░░░░░░░░░░░░".to_string());
                }
                lines
            }
            View::Error { message, hint, .. } => {
                let mut lines = vec![format!("Error: {}", message)];
                if let Some(hint) = hint {
                    lines.push(format!("Hint: {}", hint));
                }
                lines
            }
            View::Empty { message } => vec![message.clone()],
            View::Combinations { combinations } => {
                let mut lines = vec![format!("Combinations ({})", combinations.len())];
                for combo in combinations {
                    lines.push(String::new());
                    lines.push(format!("Combination {}", combo.index));
                    for (i, video) in combo.videos.iter().enumerate() {
                        lines.push(format!("  {}. {} [{}]", i + 1, video.title, video.duration));
                        if let Some(link) = &video.link {
                            lines.push(format!("     {}", link));
                        }
                        if let Some(thumbnail) = &video.thumbnail {
                            lines.push(format!("     thumbnail: {}", thumbnail));
                        }
                    }
                    lines.push(format!(
                        "  Total: {}  Remaining: {}",
                        combo.total, combo.remaining
                    ));
                }
                lines
            }
        }
    }
}

pub fn render(state: &SessionState, options: &RenderOptions) -> View {
    match state {
        SessionState::Idle | SessionState::Validating => View::Blank,
        SessionState::Submitting { .. } => View::Loading {
            placeholders: options.placeholders,
        },
        SessionState::Failed(failure) => View::Error {
            message: failure.message(),
            hint: failure.hint().map(str::to_string),
            inline: failure.is_inline(),
        },
        SessionState::Succeeded(result) if result.is_empty() => View::Empty {
            message: EMPTY_RESULT_MESSAGE.to_string(),
        },
        SessionState::Succeeded(result) => View::Combinations {
            combinations: result
                .combinations()
                .iter()
                .enumerate()
                .map(|(i, combo)| combination_view(i + 1, combo))
                .collect(),
        },
    }
}

fn combination_view(index: usize, combo: &VideoCombination) -> CombinationView {
    CombinationView {
        index,
        videos: combo.videos.iter().map(video_line).collect(),
        total: formatted_or_clock(&combo.total_time_formatted, combo.total_time as i64),
        remaining: formatted_or_clock(&combo.remaining_time_formatted, combo.remaining_time),
    }
}

fn video_line(video: &Video) -> VideoLine {
    VideoLine {
        title: video.title.clone(),
        duration: formatted_or_clock(&video.duration_formatted, video.duration as i64),
        link: video.url.clone().filter(|u| !u.is_empty()),
        thumbnail: video.thumbnail_url.clone().filter(|u| !u.is_empty()),
    }
}

fn formatted_or_clock(formatted: &str, seconds: i64) -> String {
    if formatted.trim().is_empty() {
        format_clock(seconds)
    } else {
        formatted.to_string()
    }
}

/// Format seconds as `H:MM:SS`, matching what the service sends
pub fn format_clock(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let secs = seconds.unsigned_abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}
