// src/types/analysis.rs
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// A résumé picked by the user, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl CvFile {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }
}

/// One submission. Built fresh by `InputCapture::validate` and consumed by the client.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub id: Uuid,
    pub file: CvFile,
    pub job_description: String,
}

impl AnalysisRequest {
    pub fn new(file: CvFile, job_description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            file,
            job_description,
        }
    }
}

// ===== Service Response =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_score: f64,
    pub skill_score: f64,
    pub text_similarity: f64,
    pub education_score: f64,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub emails: Vec<String>,
    pub cv_skills_count: u64,
    pub job_skills_count: u64,
}

impl AnalysisResult {
    /// Raw score as sent by the service for the given slot
    pub fn score(&self, slot: ScoreSlot) -> f64 {
        match slot {
            ScoreSlot::Total => self.total_score,
            ScoreSlot::Skill => self.skill_score,
            ScoreSlot::TextSimilarity => self.text_similarity,
            ScoreSlot::Education => self.education_score,
        }
    }

    /// Score for the given slot, clamped and rounded for display
    pub fn display_score(&self, slot: ScoreSlot) -> u8 {
        let raw = self.score(slot);
        let clamped = clamp_score(raw);
        if !(0.0..=100.0).contains(&raw) {
            warn!(
                slot = slot.key(),
                raw_score = raw,
                displayed = clamped,
                "Service returned a score outside [0, 100]"
            );
        }
        clamped
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreSlot {
    Total,
    Skill,
    TextSimilarity,
    Education,
}

impl ScoreSlot {
    pub const ALL: [ScoreSlot; 4] = [
        ScoreSlot::Total,
        ScoreSlot::Skill,
        ScoreSlot::TextSimilarity,
        ScoreSlot::Education,
    ];

    pub fn index(self) -> usize {
        match self {
            ScoreSlot::Total => 0,
            ScoreSlot::Skill => 1,
            ScoreSlot::TextSimilarity => 2,
            ScoreSlot::Education => 3,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ScoreSlot::Total => "total",
            ScoreSlot::Skill => "skill",
            ScoreSlot::TextSimilarity => "semantic",
            ScoreSlot::Education => "education",
        }
    }
}

/// Clamp a service score into [0, 100] and round it to a whole percent.
/// NaN maps to 0.
pub fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(72.0), 72);
        assert_eq!(clamp_score(-5.0), 0);
        assert_eq!(clamp_score(140.0), 100);
        assert_eq!(clamp_score(66.5), 67);
        assert_eq!(clamp_score(66.4), 66);
        assert_eq!(clamp_score(f64::NAN), 0);
        assert_eq!(clamp_score(f64::INFINITY), 100);
    }

    #[test]
    fn test_result_parses_service_payload() {
        let body = r#"{
            "total_score": 72, "skill_score": 60.0, "text_similarity": 80,
            "education_score": 90, "matching_skills": ["Go"],
            "missing_skills": ["Kubernetes"], "emails": ["a@b.com"],
            "cv_skills_count": 5, "job_skills_count": 8, "extra": true
        }"#;
        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.display_score(ScoreSlot::Total), 72);
        assert_eq!(result.display_score(ScoreSlot::TextSimilarity), 80);
        assert_eq!(result.matching_skills, vec!["Go".to_string()]);
        assert_eq!(result.job_skills_count, 8);
    }

    #[test]
    fn test_result_rejects_negative_counts_and_missing_fields() {
        let negative = r#"{
            "total_score": 1, "skill_score": 1, "text_similarity": 1,
            "education_score": 1, "matching_skills": [], "missing_skills": [],
            "emails": [], "cv_skills_count": -1, "job_skills_count": 0
        }"#;
        assert!(serde_json::from_str::<AnalysisResult>(negative).is_err());
        assert!(serde_json::from_str::<AnalysisResult>(r#"{"total_score": 3}"#).is_err());
    }

    #[test]
    fn test_slot_indices_are_distinct() {
        let indices: Vec<usize> = ScoreSlot::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}
