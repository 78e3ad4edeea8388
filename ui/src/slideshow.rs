//! Full-screen slideshow state and its two timers.

use crate::timer::{Timer, TimerEffect, TimerId, TimerKind};
use serde::Serialize;
use std::time::Duration;

pub const MIN_SPEED_SECONDS: u32 = 3;
pub const MAX_SPEED_SECONDS: u32 = 30;
pub const DEFAULT_SPEED_SECONDS: u32 = 7;
/// Step used by the `[` and `]` keys.
pub const SPEED_STEP_SECONDS: i32 = 2;
pub const OVERLAY_HIDE_DELAY: Duration = Duration::from_secs(5);

/// Base view a slideshow goes back to when it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReturnTarget {
    Top,
    Album,
}

/// What an accepted timer tick asks the owner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideshowTick {
    Advance,
    HideControls,
}

pub fn clamp_speed(seconds: i64) -> u32 {
    seconds.clamp(MIN_SPEED_SECONDS as i64, MAX_SPEED_SECONDS as i64) as u32
}

#[derive(Debug)]
pub struct SlideshowController {
    open: bool,
    playing: bool,
    speed_seconds: u32,
    return_target: ReturnTarget,
    controls_visible: bool,
    advance: Timer,
    overlay_hide: Timer,
    effects: Vec<TimerEffect>,
}

impl SlideshowController {
    pub fn new(speed_seconds: u32) -> Self {
        Self {
            open: false,
            playing: true,
            speed_seconds: clamp_speed(speed_seconds as i64),
            return_target: ReturnTarget::Album,
            controls_visible: false,
            advance: Timer::repeating(TimerKind::Advance),
            overlay_hide: Timer::one_shot(TimerKind::OverlayHide),
            effects: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed_seconds(&self) -> u32 {
        self.speed_seconds
    }

    pub fn return_target(&self) -> ReturnTarget {
        self.return_target
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn timers_armed(&self) -> (bool, bool) {
        (self.advance.is_armed(), self.overlay_hide.is_armed())
    }

    /// Opening an already open slideshow re-arms both timers from scratch.
    pub fn open(&mut self, return_target: ReturnTarget) {
        if self.open {
            tracing::debug!("Slideshow re-opened, re-arming timers");
        }
        self.open = true;
        self.return_target = return_target;
        self.set_playing(true);
        self.register_activity();
    }

    /// Disarms both timers and hands back the captured return target.
    /// Closing a closed slideshow returns `None`.
    pub fn close(&mut self) -> Option<ReturnTarget> {
        if !self.open {
            return None;
        }
        self.advance.cancel(&mut self.effects);
        self.overlay_hide.cancel(&mut self.effects);
        self.open = false;
        self.controls_visible = false;
        Some(self.return_target)
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
        if playing && self.open {
            self.advance
                .arm(Duration::from_secs(self.speed_seconds as u64), &mut self.effects);
        } else {
            self.advance.cancel(&mut self.effects);
        }
    }

    pub fn toggle_playing(&mut self) -> bool {
        self.set_playing(!self.playing);
        self.playing
    }

    pub fn adjust_speed(&mut self, delta: i32) -> u32 {
        self.speed_seconds = clamp_speed(self.speed_seconds as i64 + delta as i64);
        if self.playing {
            self.set_playing(true);
        }
        self.speed_seconds
    }

    /// Shows the on-screen controls and restarts the hide countdown.
    pub fn register_activity(&mut self) {
        if !self.open {
            return;
        }
        self.controls_visible = true;
        self.overlay_hide.arm(OVERLAY_HIDE_DELAY, &mut self.effects);
    }

    pub fn on_timer(&mut self, id: TimerId) -> Option<SlideshowTick> {
        if !self.open {
            return None;
        }
        if self.advance.fire(id) {
            return self.playing.then_some(SlideshowTick::Advance);
        }
        if self.overlay_hide.fire(id) {
            self.controls_visible = false;
            return Some(SlideshowTick::HideControls);
        }
        None
    }

    pub fn drain_effects(&mut self) -> Vec<TimerEffect> {
        std::mem::take(&mut self.effects)
    }
}

impl Default for SlideshowController {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_SECONDS)
    }
}
