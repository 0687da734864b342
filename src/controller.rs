// src/controller.rs
//! Submission state machine: Idle -> Loading -> Idle, with Error as a pass-through on failures.

use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::core::{AnalysisService, InputCapture};
use crate::error::{RequestError, ValidationError};
use crate::types::{AnalysisResult, ScoreSlot};
use crate::view::{DisplaySurface, Labels, Notice, NoticeKind, ResultsView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub phase: Phase,
    pub last_result: Option<AnalysisResult>,
    pub rendered_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl ViewState {
    fn transition(&mut self, to: Phase) {
        if self.phase != to {
            debug!(from = ?self.phase, to = ?to, "View state transition");
            self.phase = to;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Rendered,
    Invalid(ValidationError),
    Failed(RequestError),
    /// A request was already in flight
    Ignored,
}

impl SubmitOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, SubmitOutcome::Rendered)
    }
}

struct Inner {
    state: ViewState,
    view: ResultsView,
}

pub struct AnalysisController<S, D> {
    service: S,
    surface: D,
    labels: &'static Labels,
    inner: Mutex<Inner>,
}

/// Hides the loading indicator and leaves Loading on every exit path, including a dropped future.
struct LoadingGuard<'a, S: AnalysisService, D: DisplaySurface> {
    controller: &'a AnalysisController<S, D>,
    armed: bool,
}

impl<S: AnalysisService, D: DisplaySurface> LoadingGuard<'_, S, D> {
    /// Leave Loading while the caller already holds the state lock
    fn release(mut self, state: &mut ViewState) {
        self.armed = false;
        self.controller.surface.set_loading(false);
        state.transition(Phase::Idle);
    }
}

impl<S: AnalysisService, D: DisplaySurface> Drop for LoadingGuard<'_, S, D> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.controller.surface.set_loading(false);
        let mut inner = self.controller.lock();
        if inner.state.phase == Phase::Loading {
            inner.state.transition(Phase::Idle);
        }
    }
}

impl<S: AnalysisService, D: DisplaySurface> AnalysisController<S, D> {
    pub fn new(service: S, surface: D, labels: &'static Labels, tick: Duration) -> Self {
        Self {
            service,
            surface,
            labels,
            inner: Mutex::new(Inner {
                state: ViewState::default(),
                view: ResultsView::new(labels, tick),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn state(&self) -> ViewState {
        self.lock().state.clone()
    }

    /// Validate `input`, call the service once and render the outcome.
    pub async fn submit(&self, input: &InputCapture) -> SubmitOutcome {
        let request = {
            let mut inner = self.lock();
            if inner.state.phase == Phase::Loading {
                info!("Submission ignored: a request is already in flight");
                return SubmitOutcome::Ignored;
            }

            match input.validate() {
                Ok(request) => {
                    inner.state.transition(Phase::Loading);
                    inner.view.stop_animations();
                    request
                }
                Err(e) => {
                    warn!(error = %e, "Submission blocked by validation");
                    let notice = Notice {
                        kind: NoticeKind::Validation,
                        message: self.validation_message(&e),
                    };
                    self.fail(&mut inner.state, e.to_string(), notice);
                    return SubmitOutcome::Invalid(e);
                }
            }
        };

        let request_id = request.id;
        info!(%request_id, "Submitting analysis request");
        self.surface.hide_results();
        self.surface.set_loading(true);
        let loading = LoadingGuard {
            controller: self,
            armed: true,
        };

        let response = self.service.submit(request).await;
        // leaving Loading and rendering happen under one lock
        let mut inner = self.lock();
        loading.release(&mut inner.state);

        match response {
            Ok(result) => {
                info!(%request_id, "Analysis received");
                self.render(&mut inner, result);
                SubmitOutcome::Rendered
            }
            Err(e) => {
                if e.is_contract_violation() {
                    error!(%request_id, error = %e, "Scoring service broke the response contract");
                } else {
                    error!(%request_id, error = %e, "Analysis request failed");
                }
                let notice = Notice {
                    kind: NoticeKind::Failure,
                    message: self.labels.failure_notice,
                };
                self.fail(&mut inner.state, e.to_string(), notice);
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Render a result that is already in hand. An in-flight submission keeps its Loading phase.
    pub fn display(&self, result: AnalysisResult) {
        let mut inner = self.lock();
        if inner.state.phase == Phase::Loading {
            debug!("Rendering while a request is in flight");
        }
        self.render(&mut inner, result);
    }

    fn render(&self, inner: &mut Inner, result: AnalysisResult) {
        let Inner { state, view } = inner;

        let markup = view.render(&result);
        self.surface.show_results(markup);
        self.surface.scroll_into_view();

        state.last_result = Some(result);
        state.rendered_at = Some(Utc::now());
        state.last_error = None;
    }

    fn validation_message(&self, e: &ValidationError) -> &'static str {
        match e {
            ValidationError::UnsupportedFileType(_) => self.labels.unsupported_format_notice,
            ValidationError::MissingFile | ValidationError::EmptyJobDescription => {
                self.labels.validation_notice
            }
        }
    }

    fn fail(&self, state: &mut ViewState, reason: String, notice: Notice) {
        state.transition(Phase::Error);
        state.last_error = Some(reason);
        self.surface.notify(notice);
        state.transition(Phase::Idle);
    }

    /// Wait for every running score animation to reach its target
    pub async fn settle_animations(&self) {
        let receivers: Vec<_> = {
            let inner = self.lock();
            let animator = inner.view.animator();
            let receivers = ScoreSlot::ALL
                .iter()
                .filter_map(|slot| animator.handle(*slot).map(|h| h.subscribe()))
                .collect();
            receivers
        };
        for mut rx in receivers {
            let _ = rx.wait_for(|frame| frame.is_settled()).await;
        }
    }
}
