//! Client for a résumé/job-description scoring service: validates the inputs,
//! submits them in one multipart request and renders the returned scores.

pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod types;
pub mod utils;
pub mod view;

pub use config::ClientConfig;
pub use controller::{AnalysisController, Phase, SubmitOutcome, ViewState};
pub use crate::core::{AnalysisClient, AnalysisService, InputCapture};
pub use error::{RequestError, ValidationError};
pub use types::{AnalysisRequest, AnalysisResult, CvFile, ScoreSlot};
pub use view::{DisplaySurface, ResultsView, ScoreAnimator, TerminalSurface};
