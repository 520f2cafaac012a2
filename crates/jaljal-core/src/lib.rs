//! Core domain models and logic for jaljal
//!
//! This crate contains:
//! - Domain models (Video, VideoCombination, SearchResult)
//! - Duration validation and request building
//! - Session controller (search lifecycle state machine)
//! - Render mapping (deterministic state -> view)

pub mod duration;
pub mod error;
pub mod models;
pub mod render;
pub mod request;
pub mod session;

pub use duration::{DurationPolicy, MAX_MINUTES, Minutes, validate_duration};
pub use error::{SearchError, ValidationError};
pub use models::{ApiError, DataSource, SearchResult, Video, VideoCombination};
pub use render::{CombinationView, RenderOptions, View, VideoLine, format_clock, render};
pub use request::{DEFAULT_ATTEMPTS, MAX_ATTEMPTS, SearchRequest};
pub use session::{Failure, Resolution, SessionController, SessionState, Submission, Ticket};
