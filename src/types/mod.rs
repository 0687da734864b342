// src/types/mod.rs
pub mod analysis;

pub use analysis::{clamp_score, AnalysisRequest, AnalysisResult, CvFile, ScoreSlot};
