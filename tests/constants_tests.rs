// Host-side tests for web and core constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use odyssey_core::constants as scene;

#[test]
#[allow(clippy::assertions_on_constants)]
fn web_constants_are_within_reasonable_bounds() {
    assert!(DEVICE_PIXEL_RATIO_CAP >= 1.0);
    assert!(MAX_FRAME_DT_MS > 0);
    assert!(PLANET_MARKER_SIZE > SHIP_MARKER_SIZE);
    assert!(ACTIVE_PLANET_SCALE >= 1.0);
    assert!(MAX_MARKERS > PLANET_COLORS.len());
    for c in PLANET_COLORS.iter().chain(std::iter::once(&SHIP_COLOR)) {
        assert!(c.iter().all(|v| (0.0..=1.0).contains(v)));
    }
    assert!(CLEAR_RGBA.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn selectors_use_the_section_attribute() {
    assert!(SECTION_SELECTOR.contains(SECTION_INDEX_ATTR));
    assert!(!CANVAS_ID.is_empty());
}

#[test]
fn one_color_per_default_planet() {
    let story = odyssey_core::Story::default();
    assert_eq!(story.planet_count(), PLANET_COLORS.len());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn intro_timings_line_up() {
    assert!(scene::INTRO_CREDITS_IN_MS <= scene::INTRO_PAUSE_MS);
    assert!(scene::INTRO_HALFWAY_AFTER_FLY_OUT_MS < scene::INTRO_FLY_OUT_MS);
    assert!(scene::INTRO_CREDITS_OUT_MS < scene::INTRO_FLY_OUT_MS);
    assert!(scene::INTRO_LOOK_DRIFT_MS >= scene::INTRO_FLY_OUT_MS);
    let names_end = scene::INTRO_FLY_IN_MS
        + scene::INTRO_BY_LINE_DELAY_MS
        + scene::INTRO_NAME_STEP_MS * scene::CREDITS_NAMES.len() as u64;
    assert!(names_end <= scene::INTRO_FLY_IN_MS + scene::INTRO_PAUSE_MS);
    assert!(scene::TITLE_REVEAL_TIMEOUT_MS > odyssey_core::intro_duration().as_millis() as u64);
}

#[test]
fn intro_hands_over_where_the_path_begins() {
    let first = odyssey_core::constants::path_control_points()[0];
    assert_eq!(first, scene::INTRO_FLY_OUT_POSITION);
    assert_eq!(scene::FALLBACK_CAMERA_POSITION, scene::INTRO_FLY_OUT_POSITION);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scroll_and_camera_constants_are_sane() {
    assert!(scene::TEXT_SECTION_T_OFFSET > 0.0 && scene::TEXT_SECTION_T_OFFSET < 1.0);
    assert!(scene::TEXT_CAMERA_LAG >= 0.0 && scene::TEXT_CAMERA_LAG <= 1.0);
    assert!(scene::ENDING_PROGRESS_THRESHOLD < 1.0);
    assert!(scene::CAMERA_ZNEAR < scene::CAMERA_ZFAR);
    assert!(scene::TANGENT_EPSILON > 0.0 && scene::TANGENT_EPSILON < 0.01);
    assert!(scene::PATH_CONTROL_POINTS.len() >= 2);
}
