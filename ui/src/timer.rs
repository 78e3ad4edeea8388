//! Cancellable timer slots for the slideshow.
//!
//! A [`Timer`] never runs anything by itself. Arming or cancelling pushes a
//! [`TimerEffect`] for the runtime to carry out, and every arm gets a fresh
//! [`TimerId`]. Ticks are only accepted for the id currently armed, so a tick
//! that was already queued when its timer got cancelled is dropped.

use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimerKind {
    Advance,
    OverlayHide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId {
    pub kind: TimerKind,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEffect {
    /// Start a timer. Repeating timers fire every `delay` until cancelled.
    Arm {
        id: TimerId,
        delay: Duration,
        repeat: bool,
    },
    Cancel(TimerId),
}

#[derive(Debug)]
pub struct Timer {
    kind: TimerKind,
    repeat: bool,
    generation: u64,
    armed: Option<TimerId>,
}

impl Timer {
    pub fn repeating(kind: TimerKind) -> Self {
        Self::new(kind, true)
    }

    pub fn one_shot(kind: TimerKind) -> Self {
        Self::new(kind, false)
    }

    fn new(kind: TimerKind, repeat: bool) -> Self {
        Self {
            kind,
            repeat,
            generation: 0,
            armed: None,
        }
    }

    /// Clears any armed instance, then arms a new one.
    pub fn arm(&mut self, delay: Duration, effects: &mut Vec<TimerEffect>) -> TimerId {
        self.cancel(effects);
        self.generation += 1;
        let id = TimerId {
            kind: self.kind,
            generation: self.generation,
        };
        self.armed = Some(id);
        effects.push(TimerEffect::Arm {
            id,
            delay,
            repeat: self.repeat,
        });
        id
    }

    /// Idempotent.
    pub fn cancel(&mut self, effects: &mut Vec<TimerEffect>) {
        if let Some(id) = self.armed.take() {
            effects.push(TimerEffect::Cancel(id));
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Accepts a tick for the armed instance. One-shot timers disarm on fire.
    pub fn fire(&mut self, id: TimerId) -> bool {
        if self.armed != Some(id) {
            return false;
        }
        if !self.repeat {
            self.armed = None;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rearm_cancels_previous() {
        let mut effects = Vec::new();
        let mut timer = Timer::repeating(TimerKind::Advance);
        let first = timer.arm(Duration::from_secs(7), &mut effects);
        let second = timer.arm(Duration::from_secs(9), &mut effects);
        assert_ne!(first, second);
        assert_eq!(
            effects,
            vec![
                TimerEffect::Arm { id: first, delay: Duration::from_secs(7), repeat: true },
                TimerEffect::Cancel(first),
                TimerEffect::Arm { id: second, delay: Duration::from_secs(9), repeat: true },
            ]
        );
        assert!(!timer.fire(first));
        assert!(timer.fire(second));
        assert!(timer.fire(second));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut effects = Vec::new();
        let mut timer = Timer::repeating(TimerKind::Advance);
        let id = timer.arm(Duration::from_secs(3), &mut effects);
        timer.cancel(&mut effects);
        timer.cancel(&mut effects);
        assert_eq!(effects.len(), 2);
        assert!(!timer.is_armed());
        assert!(!timer.fire(id));
    }

    #[test]
    fn test_one_shot_disarms_after_fire() {
        let mut effects = Vec::new();
        let mut timer = Timer::one_shot(TimerKind::OverlayHide);
        let id = timer.arm(Duration::from_secs(5), &mut effects);
        assert!(timer.fire(id));
        assert!(!timer.is_armed());
        assert!(!timer.fire(id));
    }
}
