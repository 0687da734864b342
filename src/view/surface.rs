// src/view/surface.rs
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

use super::labels::Labels;
use super::markup::{GaugeFrame, ResultsMarkup, TagKind, TagList, TagNode, Tone};
use crate::core::FileLabel;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Validation,
    Failure,
}

/// A user-visible message raised by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
}

/// Where the controller draws. Methods take `&self`; implementations handle their own locking.
pub trait DisplaySurface: Send + Sync {
    fn set_loading(&self, visible: bool);
    fn hide_results(&self);
    fn show_results(&self, markup: &ResultsMarkup);
    /// Best effort; surfaces without scrolling may ignore it
    fn scroll_into_view(&self);
    fn notify(&self, notice: Notice);
}

/// Text surface writing to a terminal (or any writer).
pub struct TerminalSurface<W: Write + Send> {
    out: Mutex<W>,
    labels: &'static Labels,
    pending: Mutex<Option<ResultsMarkup>>,
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W, labels: &'static Labels) -> Self {
        Self {
            out: Mutex::new(out),
            labels,
            pending: Mutex::new(None),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn out(&self) -> MutexGuard<'_, W> {
        self.out.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn show_file_label(&self, label: &FileLabel) -> Result<()> {
        let mut out = self.out();
        if label.emphasized {
            writeln!(out, "CV: \x1b[1m{}\x1b[0m", label.text)?;
        } else {
            writeln!(out, "CV: {}", label.text)?;
        }
        Ok(())
    }

    /// Draw whatever `show_results` handed over, following the score animations until they settle.
    pub async fn present(&self) -> Result<()> {
        let markup = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(markup) = markup else {
            return Ok(());
        };

        writeln!(self.out(), "\n== {} ==", markup.title).context("Failed to write results")?;

        loop {
            let frames: Vec<GaugeFrame> = markup
                .scores
                .iter()
                .map(|card| card.gauge.current())
                .collect();
            {
                let mut out = self.out();
                write!(out, "\r{}", score_line(&markup, &frames))?;
                out.flush()?;
            }
            if frames.iter().all(GaugeFrame::is_settled) {
                break;
            }
            tokio::time::sleep(FRAME_INTERVAL).await;
        }

        let mut out = self.out();
        writeln!(out)?;
        write_tags(&mut *out, &markup.matching)?;
        write_tags(&mut *out, &markup.missing)?;
        writeln!(out, "\n{}", markup.info_title)?;
        for row in [&markup.emails, &markup.cv_skills, &markup.job_skills] {
            writeln!(out, "  {}: {}", row.label, row.value)?;
        }
        out.flush().context("Failed to flush terminal output")
    }
}

impl<W: Write + Send + Clone> TerminalSurface<W> {
    /// Copy of everything written so far (for in-memory writers)
    pub fn clone_output(&self) -> W {
        self.out().clone()
    }
}

fn score_line(markup: &ResultsMarkup, frames: &[GaugeFrame]) -> String {
    markup
        .scores
        .iter()
        .zip(frames)
        .map(|(card, frame)| format!("{} {:>4} {}", card.title, frame.label(), bar(frame)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Linear stand-in for the circular gauge: filled cells follow the arc angle
fn bar(frame: &GaugeFrame) -> String {
    let filled = ((frame.arc_degrees() / 360.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn log_write_error(result: std::io::Result<()>, what: &str) {
    if let Err(e) = result {
        warn!(error = %e, "Failed to write {} to terminal", what);
    }
}

fn write_tags(out: &mut impl Write, list: &TagList) -> std::io::Result<()> {
    writeln!(out, "\n{}", list.title)?;
    let rendered: Vec<String> = list
        .nodes
        .iter()
        .map(|node| match node {
            TagNode::Tag {
                text,
                kind: TagKind::Match,
            } => format!("[+ {}]", text),
            TagNode::Tag {
                text,
                kind: TagKind::Missing,
            } => format!("[- {}]", text),
            TagNode::Placeholder {
                text,
                tone: Tone::Muted,
            } => format!("({})", text),
            TagNode::Placeholder {
                text,
                tone: Tone::Success,
            } => format!("* {}", text),
        })
        .collect();
    writeln!(out, "  {}", rendered.join(" "))
}

impl<W: Write + Send> DisplaySurface for TerminalSurface<W> {
    fn set_loading(&self, visible: bool) {
        let mut out = self.out();
        let written = if visible {
            write!(out, "{}", self.labels.loading)
        } else {
            // erase the indicator line
            write!(out, "\r\x1b[2K")
        };
        log_write_error(written.and_then(|()| out.flush()), "loading indicator");
    }

    fn hide_results(&self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    fn show_results(&self, markup: &ResultsMarkup) {
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(markup.clone());
    }

    fn scroll_into_view(&self) {
        log_write_error(self.out().flush(), "results");
    }

    fn notify(&self, notice: Notice) {
        let mut out = self.out();
        let written = writeln!(out, "! {}", notice.message).and_then(|()| out.flush());
        log_write_error(written, "notice");
    }
}
