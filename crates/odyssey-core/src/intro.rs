//! Intro fly-through: galaxy fly-in, credits, fly-out and the progress
//! ramp that hands the camera over to the scroll path.

use glam::Vec3;
use std::time::Duration;

use crate::camera::CameraPose;
use crate::constants::*;
use crate::easing::{fraction, Easing};
use crate::timeline::Timeline;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroCue {
    FlyIn,
    CreditsIn,
    ByLine,
    RevealName(usize),
    FlyOut,
    Halfway,
    Complete,
}

#[inline]
fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

// Absolute offsets derived from the step lengths.
const CREDITS_IN_AT: u64 = INTRO_FLY_IN_MS;
const BY_LINE_AT: u64 = CREDITS_IN_AT + INTRO_BY_LINE_DELAY_MS;
const FLY_OUT_AT: u64 = INTRO_FLY_IN_MS + INTRO_PAUSE_MS;
const HALFWAY_AT: u64 = FLY_OUT_AT + INTRO_HALFWAY_AFTER_FLY_OUT_MS;
const COMPLETE_AT: u64 = FLY_OUT_AT + INTRO_FLY_OUT_MS + INTRO_COMPLETE_DELAY_MS;

pub fn intro_timeline() -> Timeline<IntroCue> {
    let mut timeline = Timeline::new()
        .then(Duration::ZERO, IntroCue::FlyIn)
        .then(ms(INTRO_FLY_IN_MS), IntroCue::CreditsIn)
        .then(ms(INTRO_BY_LINE_DELAY_MS), IntroCue::ByLine);
    for i in 0..CREDITS_NAMES.len() {
        timeline = timeline.then(ms(INTRO_NAME_STEP_MS), IntroCue::RevealName(i));
    }
    let fly_out_delay = FLY_OUT_AT - timeline.end().as_millis() as u64;
    timeline
        .then(ms(fly_out_delay), IntroCue::FlyOut)
        .then(ms(INTRO_HALFWAY_AFTER_FLY_OUT_MS), IntroCue::Halfway)
        .then(ms(COMPLETE_AT - HALFWAY_AT), IntroCue::Complete)
}

pub fn intro_duration() -> Duration {
    ms(COMPLETE_AT)
}

/// Camera pose `elapsed` into the intro.
pub fn intro_camera_pose(elapsed: Duration) -> CameraPose {
    let t = elapsed.as_secs_f32() * 1000.0;
    let fly_out_at = FLY_OUT_AT as f32;
    if t < fly_out_at {
        let k = Easing::Power1InOut.apply(fraction(t, INTRO_FLY_IN_MS as f32));
        return CameraPose::new(
            INTRO_START_POSITION.lerp(INTRO_FLY_IN_POSITION, k),
            Vec3::ZERO,
        );
    }
    let since = t - fly_out_at;
    let k = Easing::Power3Out.apply(fraction(since, INTRO_FLY_OUT_MS as f32));
    let drift = Easing::Power1InOut.apply(fraction(since, INTRO_LOOK_DRIFT_MS as f32));
    CameraPose::new(
        INTRO_FLY_IN_POSITION.lerp(INTRO_FLY_OUT_POSITION, k),
        Vec3::ZERO.lerp(INTRO_LOOK_DRIFT_TARGET, drift),
    )
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CreditsState {
    pub visible: bool,
    pub opacity: f32,
    pub scale: f32,
    pub by_line: bool,
    pub names_shown: usize,
}

pub fn credits_state(elapsed: Duration) -> CreditsState {
    let t = elapsed.as_secs_f32() * 1000.0;
    if t < CREDITS_IN_AT as f32 || t >= COMPLETE_AT as f32 {
        return CreditsState {
            scale: 1.0,
            ..CreditsState::default()
        };
    }

    let names_shown = CREDITS_NAMES
        .iter()
        .enumerate()
        .filter(|(i, _)| t >= (BY_LINE_AT + INTRO_NAME_STEP_MS * (*i as u64 + 1)) as f32)
        .count();
    let by_line = t >= BY_LINE_AT as f32;

    let (opacity, scale) = if t < FLY_OUT_AT as f32 {
        let p = fraction(t - CREDITS_IN_AT as f32, INTRO_CREDITS_IN_MS as f32);
        (p, 0.7 + p * 0.3)
    } else {
        let p = fraction(t - FLY_OUT_AT as f32, INTRO_CREDITS_OUT_MS as f32);
        let opacity = if p > CREDITS_FADE_START {
            1.0 - (p - CREDITS_FADE_START) / (1.0 - CREDITS_FADE_START)
        } else {
            1.0
        };
        (opacity.clamp(0.0, 1.0), 1.0 - p * 0.5)
    };

    CreditsState {
        visible: true,
        opacity,
        scale,
        by_line,
        names_shown,
    }
}

/// Linear ramp of the curve progress from 0 to the first planet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntroRamp {
    target: f32,
    duration: Duration,
    elapsed: Duration,
}

impl IntroRamp {
    pub fn new(target: f32) -> Self {
        Self::with_duration(target, ms(INTRO_RAMP_MS))
    }

    pub fn with_duration(target: f32, duration: Duration) -> Self {
        Self {
            target,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.progress()
    }

    /// How far through the ramp we are, in [0, 1].
    pub fn fraction(&self) -> f32 {
        fraction(
            self.elapsed.as_secs_f32(),
            self.duration.as_secs_f32(),
        )
    }

    pub fn progress(&self) -> f32 {
        self.target * self.fraction()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
