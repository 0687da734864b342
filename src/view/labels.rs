// src/view/labels.rs
//! User-visible strings, one table per supported language.

use crate::types::ScoreSlot;

#[derive(Debug)]
pub struct Labels {
    pub results_title: &'static str,
    pub score_titles: [&'static str; 4],
    pub matching_title: &'static str,
    pub missing_title: &'static str,
    pub info_title: &'static str,
    pub emails_row: &'static str,
    pub cv_skills_row: &'static str,
    pub job_skills_row: &'static str,
    pub no_matches: &'static str,
    pub all_present: &'static str,
    pub no_email: &'static str,
    pub no_file_selected: &'static str,
    pub loading: &'static str,
    pub validation_notice: &'static str,
    pub failure_notice: &'static str,
    pub unsupported_format_notice: &'static str,
}

pub static EN: Labels = Labels {
    results_title: "Analysis Results",
    score_titles: ["Overall Score", "Skills", "Experience", "Education"],
    matching_title: "Strengths",
    missing_title: "Missing Skills",
    info_title: "Extracted Information",
    emails_row: "Emails",
    cv_skills_row: "CV Skills",
    job_skills_row: "Required Skills",
    no_matches: "No direct skill matches found.",
    all_present: "All required skills are present!",
    no_email: "No email detected",
    no_file_selected: "No file selected",
    loading: "Analyzing...",
    validation_notice: "Please upload a CV and provide a job description.",
    failure_notice: "An error occurred. Please try again.",
    unsupported_format_notice: "Only PDF or DOCX CV files are accepted.",
};

pub static FR: Labels = Labels {
    results_title: "Résultats de l'Analyse",
    score_titles: ["Score Global", "Compétences", "Expérience", "Formation"],
    matching_title: "Points Forts",
    missing_title: "Compétences Manquantes",
    info_title: "Informations Extraites",
    emails_row: "Emails",
    cv_skills_row: "Compétences CV",
    job_skills_row: "Compétences Requises",
    no_matches: "Aucune compétence directe trouvée.",
    all_present: "Toutes les compétences requises sont présentes !",
    no_email: "Aucun email détecté",
    no_file_selected: "Aucun fichier choisi",
    loading: "Analyse en cours...",
    validation_notice: "Veuillez uploader un CV et fournir une description de poste.",
    failure_notice: "Une erreur est survenue. Veuillez réessayer.",
    unsupported_format_notice: "Seuls les CV au format PDF ou DOCX sont acceptés.",
};

impl Labels {
    /// Labels for a language code; anything unknown falls back to English
    pub fn for_language(lang: &str) -> &'static Labels {
        match crate::utils::normalize_language(Some(lang)).as_str() {
            "fr" => &FR,
            _ => &EN,
        }
    }

    pub fn score_title(&self, slot: ScoreSlot) -> &'static str {
        self.score_titles[slot.index()]
    }
}
