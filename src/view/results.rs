// src/view/results.rs
use std::time::Duration;
use tracing::debug;

use super::animator::ScoreAnimator;
use super::labels::Labels;
use super::markup::{ResultsMarkup, TagKind, TagNode, Tone};
use crate::types::{AnalysisResult, ScoreSlot};

/// Results surface model. The markup skeleton is created on the first render and reused.
#[derive(Debug)]
pub struct ResultsView {
    labels: &'static Labels,
    markup: Option<ResultsMarkup>,
    animator: ScoreAnimator,
}

impl ResultsView {
    pub fn new(labels: &'static Labels, tick: Duration) -> Self {
        Self {
            labels,
            markup: None,
            animator: ScoreAnimator::new(tick),
        }
    }

    pub fn markup(&self) -> Option<&ResultsMarkup> {
        self.markup.as_ref()
    }

    pub fn animator(&self) -> &ScoreAnimator {
        &self.animator
    }

    /// Stop every running counter; stopped gauges keep the value they reached.
    pub fn stop_animations(&mut self) {
        self.animator.stop_all();
    }

    /// Populate the surface from `result`, replacing everything shown before.
    pub fn render(&mut self, result: &AnalysisResult) -> &ResultsMarkup {
        let labels = self.labels;
        let markup = self.markup.get_or_insert_with(|| {
            debug!("Building results skeleton");
            ResultsMarkup::skeleton(labels)
        });

        for slot in ScoreSlot::ALL {
            let gauge = markup.card(slot).gauge.clone();
            self.animator
                .animate(slot, gauge, result.display_score(slot));
        }

        markup.matching.fill(
            &result.matching_skills,
            TagKind::Match,
            TagNode::Placeholder {
                text: labels.no_matches,
                tone: Tone::Muted,
            },
        );
        markup.missing.fill(
            &result.missing_skills,
            TagKind::Missing,
            TagNode::Placeholder {
                text: labels.all_present,
                tone: Tone::Success,
            },
        );

        markup.emails.value = if result.emails.is_empty() {
            labels.no_email.to_string()
        } else {
            result.emails.join(", ")
        };
        markup.cv_skills.value = result.cv_skills_count.to_string();
        markup.job_skills.value = result.job_skills_count.to_string();

        markup
    }
}
