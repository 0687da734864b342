// src/view/animator.rs
//! Counter animation for the four score displays. One cancellable tick task per slot.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::markup::{GaugeFrame, ScoreGauge};
use crate::types::ScoreSlot;

/// A running (or finished) animation for one slot. Dropping it stops the timer.
#[derive(Debug)]
pub struct AnimationHandle {
    gauge: ScoreGauge,
    task: Option<JoinHandle<()>>,
}

impl AnimationHandle {
    fn start(gauge: ScoreGauge, target: u8, tick: Duration) -> Self {
        let target = target.min(100);
        gauge.reset(target);

        let task = if target == 0 || tick.is_zero() {
            gauge.set_value(target);
            None
        } else {
            let writer = gauge.clone();
            Some(tokio::spawn(async move {
                let mut interval = tokio::time::interval(tick);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                // first tick completes immediately
                interval.tick().await;
                for value in 1..=target {
                    interval.tick().await;
                    writer.set_value(value);
                }
            }))
        };

        Self { gauge, task }
    }

    pub fn subscribe(&self) -> watch::Receiver<GaugeFrame> {
        self.gauge.subscribe()
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }

    /// Abort the timer and settle the gauge on the value it reached
    pub fn stop(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
        self.gauge.freeze();
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Debug)]
pub struct ScoreAnimator {
    tick: Duration,
    handles: [Option<AnimationHandle>; 4],
}

impl ScoreAnimator {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            handles: [None, None, None, None],
        }
    }

    /// Start counting `slot` up to `target`, stopping whatever was running there first.
    pub fn animate(&mut self, slot: ScoreSlot, gauge: ScoreGauge, target: u8) -> &AnimationHandle {
        let entry = &mut self.handles[slot.index()];
        if let Some(previous) = entry.take() {
            if !previous.is_finished() {
                debug!(slot = slot.key(), "Superseding running score animation");
            }
            previous.stop();
        }

        entry.insert(AnimationHandle::start(gauge, target, self.tick))
    }

    pub fn handle(&self, slot: ScoreSlot) -> Option<&AnimationHandle> {
        self.handles[slot.index()].as_ref()
    }

    pub fn stop_all(&mut self) {
        for handle in self.handles.iter_mut().filter_map(Option::take) {
            handle.stop();
        }
    }
}
