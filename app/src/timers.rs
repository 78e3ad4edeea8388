//! Runs the timer effects emitted by the view core as local tokio tasks.

use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tokio::task::spawn_local;
use tokio::time::{self, Duration, MissedTickBehavior};
use ui::{TimerEffect, TimerId, TimerKind};

struct Running {
    id: TimerId,
    shutdown: oneshot::Sender<()>,
}

/// One live task per timer kind; arming a kind replaces its previous task.
pub struct TimerDriver {
    ticks: mpsc::UnboundedSender<TimerId>,
    running: HashMap<TimerKind, Running>,
}

impl TimerDriver {
    pub fn new(ticks: mpsc::UnboundedSender<TimerId>) -> Self {
        Self {
            ticks,
            running: HashMap::new(),
        }
    }

    /// Must be called from within a `LocalSet`.
    pub fn apply(&mut self, effect: TimerEffect) {
        match effect {
            TimerEffect::Arm { id, delay, repeat } => {
                self.stop(id.kind);
                let running = self.spawn(id, delay, repeat);
                self.running.insert(id.kind, running);
            }
            TimerEffect::Cancel(id) => {
                if self.running.get(&id.kind).map(|r| r.id) == Some(id) {
                    self.stop(id.kind);
                }
            }
        }
    }

    #[cfg(test)]
    fn active(&self) -> usize {
        self.running.len()
    }

    pub fn shutdown(&mut self) {
        let kinds: Vec<_> = self.running.keys().copied().collect();
        for kind in kinds {
            self.stop(kind);
        }
    }

    fn stop(&mut self, kind: TimerKind) {
        if let Some(running) = self.running.remove(&kind) {
            // the task may already have finished for one-shot timers
            let _ = running.shutdown.send(());
            tracing::trace!(id = ?running.id, "Timer stopped");
        }
    }

    fn spawn(&self, id: TimerId, delay: Duration, repeat: bool) -> Running {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let ticks = self.ticks.clone();
        spawn_local(async move {
            let mut interval = time::interval_at(time::Instant::now() + delay, delay);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = interval.tick() => {
                        if ticks.send(id).is_err() {
                            tracing::debug!(?id, "Tick receiver gone");
                            break;
                        }
                        if !repeat {
                            break;
                        }
                    }
                }
            }
        });
        tracing::trace!(?id, ?delay, repeat, "Timer armed");
        Running {
            id,
            shutdown: shutdown_tx,
        }
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::task::LocalSet;
    use ui::Timer;

    fn arm(timer: &mut Timer, delay_ms: u64) -> (TimerId, Vec<TimerEffect>) {
        let mut effects = Vec::new();
        let id = timer.arm(Duration::from_millis(delay_ms), &mut effects);
        (id, effects)
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeating_timer_ticks_until_cancelled() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let (tx, mut rx) = mpsc::unbounded_channel();
                let mut driver = TimerDriver::new(tx);
                let mut timer = Timer::repeating(TimerKind::Advance);
                let (id, effects) = arm(&mut timer, 100);
                effects.into_iter().for_each(|e| driver.apply(e));

                assert_eq!(rx.recv().await, Some(id));
                assert_eq!(rx.recv().await, Some(id));

                driver.apply(TimerEffect::Cancel(id));
                assert_eq!(driver.active(), 0);
                time::sleep(Duration::from_millis(500)).await;
                assert!(rx.try_recv().is_err());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_shot_fires_once() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let (tx, mut rx) = mpsc::unbounded_channel();
                let mut driver = TimerDriver::new(tx);
                let mut timer = Timer::one_shot(TimerKind::OverlayHide);
                let (id, effects) = arm(&mut timer, 50);
                effects.into_iter().for_each(|e| driver.apply(e));

                assert_eq!(rx.recv().await, Some(id));
                time::sleep(Duration::from_millis(200)).await;
                assert!(rx.try_recv().is_err());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_previous_task() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let (tx, mut rx) = mpsc::unbounded_channel();
                let mut driver = TimerDriver::new(tx);
                let mut timer = Timer::repeating(TimerKind::Advance);
                let (first, effects) = arm(&mut timer, 100);
                effects.into_iter().for_each(|e| driver.apply(e));
                let (second, effects) = arm(&mut timer, 300);
                effects.into_iter().for_each(|e| driver.apply(e));

                assert_eq!(driver.active(), 1);
                assert_eq!(rx.recv().await, Some(second));
                assert_ne!(first, second);
            })
            .await;
    }
}
