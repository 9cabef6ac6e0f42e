// Host-side tests for the declarative timeline and the intro choreography.

use odyssey_core::constants::*;
use odyssey_core::{
    credits_state, intro_camera_pose, intro_duration, intro_timeline, IntroCue, IntroRamp,
    Timeline, TimelinePlayer,
};
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn timeline_delays_are_relative() {
    let t = Timeline::new().then(ms(100), 'a').then(ms(50), 'b').then(ms(0), 'c');
    let at: Vec<_> = t.steps().iter().map(|s| s.at).collect();
    assert_eq!(at, vec![ms(100), ms(150), ms(150)]);
    assert_eq!(t.end(), ms(150));
    assert_eq!(t.len(), 3);
}

#[test]
fn player_fires_in_order_without_skipping() {
    let t = Timeline::new().then(ms(10), 1).then(ms(10), 2).then(ms(10), 3);
    let mut p = TimelinePlayer::new(t);
    assert!(p.advance(ms(5)).is_empty());
    assert_eq!(p.advance(ms(5)).as_slice(), &[1]);
    // One long frame releases everything that became due, in order.
    assert_eq!(p.advance(ms(100)).as_slice(), &[2, 3]);
    assert!(p.is_finished());
    assert!(p.advance(ms(100)).is_empty());
}

#[test]
fn cancel_drops_the_whole_remaining_sequence() {
    let t = Timeline::new().then(ms(10), 'x').then(ms(10), 'y');
    let mut p = TimelinePlayer::new(t);
    assert_eq!(p.advance(ms(10)).as_slice(), &['x']);
    assert_eq!(p.pending(), 1);
    p.cancel();
    assert!(p.is_cancelled());
    assert_eq!(p.pending(), 0);
    assert!(p.advance(ms(1000)).is_empty());
}

#[test]
fn intro_cues_land_at_their_times() {
    let t = intro_timeline();
    let find = |cue: IntroCue| t.steps().iter().find(|s| s.action == cue).map(|s| s.at);
    assert_eq!(find(IntroCue::FlyIn), Some(ms(0)));
    assert_eq!(find(IntroCue::CreditsIn), Some(ms(2000)));
    assert_eq!(find(IntroCue::ByLine), Some(ms(2800)));
    assert_eq!(find(IntroCue::RevealName(0)), Some(ms(3400)));
    assert_eq!(find(IntroCue::RevealName(1)), Some(ms(4000)));
    assert_eq!(find(IntroCue::RevealName(2)), Some(ms(4600)));
    assert_eq!(find(IntroCue::FlyOut), Some(ms(6500)));
    assert_eq!(find(IntroCue::Halfway), Some(ms(8750)));
    assert_eq!(find(IntroCue::Complete), Some(ms(11650)));
    assert_eq!(intro_duration(), ms(11650));
    assert_eq!(t.end(), intro_duration());
}

#[test]
fn intro_camera_flies_in_then_out() {
    let start = intro_camera_pose(ms(0));
    assert_eq!(start.position, INTRO_START_POSITION);
    assert_eq!(start.look_at, glam::Vec3::ZERO);

    let held = intro_camera_pose(ms(4000));
    assert!((held.position - INTRO_FLY_IN_POSITION).length() < 1e-5);

    let end = intro_camera_pose(intro_duration());
    assert!((end.position - INTRO_FLY_OUT_POSITION).length() < 1e-5);
    // Look drift runs longer than the fly-out and is still under way.
    assert!(end.look_at.length() > 0.0);
    assert!(end.look_at.length() < INTRO_LOOK_DRIFT_TARGET.length());
}

#[test]
fn credits_fade_in_and_out() {
    assert!(!credits_state(ms(1000)).visible);

    let arriving = credits_state(ms(2600));
    assert!(arriving.visible);
    assert!((arriving.opacity - 0.5).abs() < 1e-3);
    assert!((arriving.scale - 0.85).abs() < 1e-3);
    assert!(!arriving.by_line);

    let names = credits_state(ms(4100));
    assert!(names.by_line);
    assert_eq!(names.names_shown, 2);
    assert_eq!(names.opacity, 1.0);

    // Early fly-out: shrinking but still opaque.
    let leaving = credits_state(ms(6500 + 1000));
    assert_eq!(leaving.opacity, 1.0);
    assert!((leaving.scale - 0.8).abs() < 1e-3);

    let gone = credits_state(ms(6500 + 2500));
    assert!(gone.opacity.abs() < 1e-4);

    assert!(!credits_state(intro_duration()).visible);
}

#[test]
fn ramp_moves_linearly_to_the_first_planet() {
    let mut ramp = IntroRamp::with_duration(0.4, ms(1000));
    assert_eq!(ramp.progress(), 0.0);
    assert!((ramp.advance(ms(500)) - 0.2).abs() < 1e-6);
    assert!(!ramp.is_finished());
    assert!((ramp.advance(ms(900)) - 0.4).abs() < 1e-6);
    assert!(ramp.is_finished());
    assert_eq!(ramp.fraction(), 1.0);

    let default = IntroRamp::new(0.0);
    assert!(!default.is_finished());
}
