// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use jiff::Zoned;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::period::{Period, minutes_of_day};

/// Default polling interval of the tracker.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Where the current time falls in the school day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LivePosition {
    /// The period in progress, `None` before, after or between periods.
    pub active_period: Option<usize>,

    /// Fraction of the school day elapsed, in `[0, 1]`.
    pub day_progress: f64,

    /// Whether the first period has started.
    pub has_day_started: bool,
}

impl LivePosition {
    /// Computes the position at `now_minutes` minutes from midnight.
    ///
    /// The first matching period wins. A grid whose last end is not after
    /// its first start, such as one wrapping past midnight, has no progress.
    pub fn compute(periods: &[Period], now_minutes: u32) -> Self {
        let active_period = periods
            .iter()
            .position(|p| p.start_minutes() <= now_minutes && now_minutes < p.end_minutes());

        let (day_progress, has_day_started) = match (periods.first(), periods.last()) {
            (Some(first), Some(last)) => {
                let start = f64::from(first.start_minutes());
                let end = f64::from(last.end_minutes());
                let now = f64::from(now_minutes);
                let progress = if end <= start {
                    0.0
                } else {
                    ((now - start) / (end - start)).clamp(0.0, 1.0)
                };
                (progress, now_minutes >= first.start_minutes())
            }
            _ => (0.0, false),
        };

        Self {
            active_period,
            day_progress,
            has_day_started,
        }
    }

    /// Computes the position at the current local time.
    pub fn now(periods: &[Period]) -> Self {
        Self::compute(periods, local_minutes())
    }
}

/// Minutes from midnight of the current local time.
pub fn local_minutes() -> u32 {
    minutes_of_day(Zoned::now().time())
}

/// A background task publishing the live position at a fixed interval.
///
/// The task is aborted when the tracker is dropped.
#[derive(Debug)]
pub struct LiveTracker {
    rx: watch::Receiver<LivePosition>,
    handle: JoinHandle<()>,
}

impl LiveTracker {
    /// Starts polling `clock` every `interval`. The position at spawn time is
    /// available immediately.
    ///
    /// Must be called within a tokio runtime.
    pub fn spawn<F>(periods: Vec<Period>, interval: Duration, clock: F) -> Self
    where
        F: Fn() -> u32 + Send + 'static,
    {
        let (tx, rx) = watch::channel(LivePosition::compute(&periods, clock()));

        let handle = tokio::spawn(async move {
            tracing::debug!(interval_secs = interval.as_secs(), "starting live tracker");

            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                let position = LivePosition::compute(&periods, clock());
                if tx.send(position).is_err() {
                    tracing::debug!("no live position receivers left, stopping");
                    break;
                }
            }
        });

        Self { rx, handle }
    }

    /// Starts polling the local wall clock.
    pub fn spawn_local(periods: Vec<Period>, interval: Duration) -> Self {
        Self::spawn(periods, interval, local_minutes)
    }

    /// The most recently published position.
    pub fn current(&self) -> LivePosition {
        *self.rx.borrow()
    }

    /// A receiver notified at every poll.
    pub fn subscribe(&self) -> watch::Receiver<LivePosition> {
        self.rx.clone()
    }

    /// Stops the task.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for LiveTracker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
