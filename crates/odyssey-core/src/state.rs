//! Page-level phase machine and the simulated loading progress.
//!
//! The whole experience moves through a fixed set of phases; every change
//! goes through [`PhaseMachine::apply`] so that illegal jumps (scrolling
//! before the intro finished, replaying the loader) are rejected instead
//! of being patched over with flags.

use rand::Rng;
use std::time::Duration;

use crate::constants::{LOADER_FADE_DELAY_MS, LOADER_FADE_MS, LOADER_STEP_MS};
use crate::error::SceneError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Loading,
    IntroPlaying,
    IntroComplete,
    ScrollNavigable,
    EndingShown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseEvent {
    LoadFinished,
    IntroFinished,
    HandoverFinished,
    ReachedEnd,
    LeftEnd,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseMachine {
    phase: Phase,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Next phase for `event`, or `None` when the pair is not allowed.
    pub fn next(phase: Phase, event: PhaseEvent) -> Option<Phase> {
        use Phase::*;
        use PhaseEvent::*;
        match (phase, event) {
            (Loading, LoadFinished) => Some(IntroPlaying),
            (IntroPlaying, IntroFinished) => Some(IntroComplete),
            (IntroComplete, HandoverFinished) => Some(ScrollNavigable),
            (ScrollNavigable, ReachedEnd) => Some(EndingShown),
            (EndingShown, LeftEnd) => Some(ScrollNavigable),
            _ => None,
        }
    }

    pub fn apply(&mut self, event: PhaseEvent) -> Result<Phase, SceneError> {
        let next = Self::next(self.phase, event).ok_or(SceneError::InvalidTransition {
            from: self.phase,
            event,
        })?;
        log::info!("[phase] {:?} -> {:?}", self.phase, next);
        self.phase = next;
        Ok(next)
    }

    /// Scroll input only moves the camera once the intro handed over.
    pub fn accepts_scroll(&self) -> bool {
        matches!(self.phase, Phase::ScrollNavigable | Phase::EndingShown)
    }

    pub fn is_intro(&self) -> bool {
        matches!(self.phase, Phase::IntroPlaying | Phase::IntroComplete)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoaderStatus {
    pub percent: u8,
    pub fading: bool,
    pub fade_opacity: f32,
    pub finished: bool,
}

/// Cosmetic loading bar: a random 1–2 % every step, a short hold at
/// 100 %, then a fade.
#[derive(Clone, Debug, Default)]
pub struct LoaderSimulation {
    percent: u8,
    step_accum: Duration,
    hold: Duration,
    fade: Duration,
}

impl LoaderSimulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance<R: Rng + ?Sized>(&mut self, dt: Duration, rng: &mut R) -> LoaderStatus {
        let step = Duration::from_millis(LOADER_STEP_MS);
        let fade_delay = Duration::from_millis(LOADER_FADE_DELAY_MS);
        let fade_len = Duration::from_millis(LOADER_FADE_MS);

        if self.percent < 100 {
            self.step_accum += dt;
            while self.step_accum >= step && self.percent < 100 {
                self.step_accum -= step;
                let inc: u8 = rng.gen_range(1..=2);
                self.percent = self.percent.saturating_add(inc).min(100);
            }
        } else if self.hold < fade_delay {
            self.hold = (self.hold + dt).min(fade_delay);
        } else {
            self.fade = (self.fade + dt).min(fade_len);
        }
        self.status()
    }

    pub fn status(&self) -> LoaderStatus {
        let fade_delay = Duration::from_millis(LOADER_FADE_DELAY_MS);
        let fade_len = Duration::from_millis(LOADER_FADE_MS);
        let fading = self.percent >= 100 && self.hold >= fade_delay;
        let fade_opacity = if fading {
            1.0 - self.fade.as_secs_f32() / fade_len.as_secs_f32()
        } else {
            1.0
        };
        LoaderStatus {
            percent: self.percent,
            fading,
            fade_opacity: fade_opacity.clamp(0.0, 1.0),
            finished: fading && self.fade >= fade_len,
        }
    }
}
