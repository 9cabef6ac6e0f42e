// Host-side tests for nearest-section resolution and UI hiding.

use odyssey_core::{hide_ui, resolve_nearest, PlanetResolver, SceneError, SectionBounds};

/// Bounds for a section whose document-space center is `center`.
fn centered(center: f64, height: f64, scroll: f64) -> Option<SectionBounds> {
    Some(SectionBounds::new(center - height / 2.0 - scroll, height))
}

#[test]
fn picks_section_closest_to_viewport_center() {
    let scroll = 450.0;
    let bounds = [
        centered(100.0, 100.0, scroll),
        centered(500.0, 100.0, scroll),
        centered(900.0, 100.0, scroll),
    ];
    assert_eq!(resolve_nearest(scroll, 200.0, &bounds), Ok(1));
}

#[test]
fn document_center_adds_scroll_back() {
    let b = SectionBounds::new(-50.0, 300.0);
    assert_eq!(b.document_center(1000.0), 1100.0);
}

#[test]
fn unmeasured_sections_are_skipped() {
    let scroll = 0.0;
    let bounds = [None, centered(800.0, 100.0, scroll), None];
    assert_eq!(resolve_nearest(scroll, 200.0, &bounds), Ok(1));
}

#[test]
fn nothing_measured_is_an_error() {
    assert_eq!(
        resolve_nearest(0.0, 800.0, &[None, None]),
        Err(SceneError::MissingMeasurement)
    );
    assert_eq!(
        resolve_nearest(0.0, 800.0, &[]),
        Err(SceneError::MissingMeasurement)
    );
}

#[test]
fn ties_keep_the_lowest_index() {
    // Viewport center at 500; sections equally far above and below.
    let bounds = [centered(400.0, 100.0, 0.0), centered(600.0, 100.0, 0.0)];
    assert_eq!(resolve_nearest(0.0, 1000.0, &bounds), Ok(0));
}

#[test]
fn planet_resolver_holds_last_answer_without_geometry() {
    let mut r = PlanetResolver::new(3);
    let scroll = 450.0;
    let bounds = [
        centered(100.0, 100.0, scroll),
        centered(500.0, 100.0, scroll),
        centered(900.0, 100.0, scroll),
    ];
    assert_eq!(r.resolve(scroll, 200.0, &bounds), 1);
    assert_eq!(r.resolve(scroll, 200.0, &[None, None, None]), 1);
    assert_eq!(r.current(), 1);
}

#[test]
fn planet_resolver_ignores_indices_beyond_planet_count() {
    let mut r = PlanetResolver::new(1);
    let bounds = [centered(5000.0, 100.0, 0.0), centered(100.0, 100.0, 0.0)];
    assert_eq!(r.resolve(0.0, 200.0, &bounds), 0);
    r.set_current(4);
    assert_eq!(r.current(), 0);
}

#[test]
fn ui_hides_past_fifty_pixels() {
    assert!(!hide_ui(0.0));
    assert!(!hide_ui(50.0));
    assert!(hide_ui(50.5));
    assert!(hide_ui(2000.0));
}
