// src/view/markup.rs
//! Typed node tree for the results surface. Built once, then repopulated.

use std::sync::Arc;
use tokio::sync::watch;

use super::labels::Labels;
use crate::types::ScoreSlot;

const GAUGE_FILL: &str = "#4CAF50";
const GAUGE_TRACK: &str = "#eee";

/// What a score display shows at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GaugeFrame {
    pub value: u8,
    pub target: u8,
}

impl GaugeFrame {
    pub fn label(&self) -> String {
        format!("{}%", self.value)
    }

    /// Filled arc of the circular gauge; 100% is a full 360° sweep
    pub fn arc_degrees(&self) -> f64 {
        f64::from(self.value) * 3.6
    }

    pub fn gradient(&self) -> String {
        format!(
            "conic-gradient({} {}deg, {} 0deg)",
            GAUGE_FILL,
            self.arc_degrees(),
            GAUGE_TRACK
        )
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target
    }
}

/// Shared handle to one score display. Written by the animator, read by surfaces.
#[derive(Debug, Clone)]
pub struct ScoreGauge {
    tx: Arc<watch::Sender<GaugeFrame>>,
}

impl ScoreGauge {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(GaugeFrame::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> GaugeFrame {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<GaugeFrame> {
        self.tx.subscribe()
    }

    pub(crate) fn reset(&self, target: u8) {
        self.tx.send_replace(GaugeFrame { value: 0, target });
    }

    /// Values past the current target are dropped, so a stopped counter stays put.
    pub(crate) fn set_value(&self, value: u8) {
        self.tx.send_if_modified(|frame| {
            if value > frame.target || value == frame.value {
                return false;
            }
            frame.value = value;
            true
        });
    }

    /// Settle at whatever is displayed now
    pub(crate) fn freeze(&self) {
        self.tx.send_if_modified(|frame| {
            let moved = frame.target != frame.value;
            frame.target = frame.value;
            moved
        });
    }
}

impl Default for ScoreGauge {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ScoreGauge {
    fn eq(&self, other: &Self) -> bool {
        self.current() == other.current()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub slot: ScoreSlot,
    pub title: &'static str,
    pub gauge: ScoreGauge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Match,
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Muted,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagNode {
    Tag { text: String, kind: TagKind },
    Placeholder { text: &'static str, tone: Tone },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagList {
    pub title: &'static str,
    pub nodes: Vec<TagNode>,
}

impl TagList {
    fn empty(title: &'static str) -> Self {
        Self {
            title,
            nodes: Vec::new(),
        }
    }

    /// Replace every node. Empty `skills` yields the single placeholder.
    pub(crate) fn fill(&mut self, skills: &[String], kind: TagKind, placeholder: TagNode) {
        self.nodes = if skills.is_empty() {
            vec![placeholder]
        } else {
            skills
                .iter()
                .map(|skill| TagNode::Tag {
                    text: skill.clone(),
                    kind,
                })
                .collect()
        };
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|node| match node {
            TagNode::Tag { text, .. } => Some(text.as_str()),
            TagNode::Placeholder { .. } => None,
        })
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            TagNode::Placeholder { text, .. } => Some(*text),
            TagNode::Tag { .. } => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
}

impl InfoRow {
    fn empty(label: &'static str) -> Self {
        Self {
            label,
            value: "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsMarkup {
    pub title: &'static str,
    pub scores: [ScoreCard; 4],
    pub matching: TagList,
    pub missing: TagList,
    pub info_title: &'static str,
    pub emails: InfoRow,
    pub cv_skills: InfoRow,
    pub job_skills: InfoRow,
}

impl ResultsMarkup {
    /// Empty skeleton: gauges at 0%, no tags, "-" in every info row
    pub fn skeleton(labels: &'static Labels) -> Self {
        let card = |slot: ScoreSlot| ScoreCard {
            slot,
            title: labels.score_title(slot),
            gauge: ScoreGauge::new(),
        };

        Self {
            title: labels.results_title,
            scores: ScoreSlot::ALL.map(card),
            matching: TagList::empty(labels.matching_title),
            missing: TagList::empty(labels.missing_title),
            info_title: labels.info_title,
            emails: InfoRow::empty(labels.emails_row),
            cv_skills: InfoRow::empty(labels.cv_skills_row),
            job_skills: InfoRow::empty(labels.job_skills_row),
        }
    }

    pub fn card(&self, slot: ScoreSlot) -> &ScoreCard {
        &self.scores[slot.index()]
    }
}
