// src/core/mod.rs
//! Input capture and the scoring-service client

pub mod analysis_client;
pub mod input_capture;

pub use analysis_client::{AnalysisClient, AnalysisService, ANALYZE_ENDPOINT};
pub use input_capture::{FileLabel, InputCapture};
