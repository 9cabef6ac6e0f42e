// Host-side tests for the section-to-curve table and scroll evaluation.

use odyssey_core::{
    default_sections, NarrativeSection, PlanetContent, ScrollState, SectionCurveTable, SectionKind,
};

fn planet(i: usize) -> NarrativeSection {
    NarrativeSection::Planet {
        planet_index: i,
        content: PlanetContent {
            title: format!("planet {i}"),
            body: String::new(),
            spec_text: String::new(),
        },
    }
}

fn text(id: &str) -> NarrativeSection {
    NarrativeSection::Text {
        story_id: id.to_string(),
        body: "...".to_string(),
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn planets_and_texts_get_raw_positions() {
    let sections = vec![planet(0), text("a"), planet(1), text("b"), planet(2)];
    let table = SectionCurveTable::build(&sections);
    let expected = [0.0, 0.2, 1.0, 1.2, 2.0];
    for (got, want) in table.raw_t().iter().zip(expected) {
        assert!(approx(*got, want), "{got} vs {want}");
    }
    let normalized: Vec<f32> = expected.iter().map(|t| t / 2.0).collect();
    for (got, want) in table.normalized_t().iter().zip(normalized) {
        assert!(approx(*got, want));
    }
    assert_eq!(table.kind(1), Some(SectionKind::Text));
    assert_eq!(table.planet_count(), 3);
    assert_eq!(table.planet_t(), vec![0.0, 0.5, 1.0]);
}

#[test]
fn leading_text_sits_at_the_start() {
    let table = SectionCurveTable::build(&[text("intro"), planet(0), text("x"), planet(1)]);
    assert_eq!(table.raw_t()[0], 0.0);
    assert_eq!(table.section_planet_t()[0], 0.0);
}

#[test]
fn normalized_table_is_non_decreasing_and_ends_at_one() {
    let table = SectionCurveTable::build(&default_sections());
    let t = table.normalized_t();
    assert!(t.windows(2).all(|w| w[0] <= w[1]), "{t:?}");
    let max = t.iter().copied().fold(0.0f32, f32::max);
    assert!(approx(max, 1.0));
}

#[test]
fn texts_after_the_last_planet_can_exceed_it() {
    // The final text section defines t_max, so the last planet lands below 1.
    let table = SectionCurveTable::build(&[planet(0), planet(1), text("tail")]);
    let t = table.normalized_t();
    assert!(approx(t[2], 1.0));
    assert!(t[1] < 1.0);
}

#[test]
fn evaluate_endpoints_match_table_ends() {
    let table = SectionCurveTable::build(&default_sections());
    let first = table.evaluate(0.0);
    let last = table.evaluate(1.0);
    assert!(approx(first.curve_progress, table.normalized_t()[0]));
    assert!(approx(
        last.curve_progress,
        *table.normalized_t().last().unwrap()
    ));
    assert_eq!(last.section_index, table.len() - 1);
}

#[test]
fn evaluate_is_pure() {
    let table = SectionCurveTable::build(&default_sections());
    for p in [0.0, 0.13, 0.5, 0.77, 1.0] {
        assert_eq!(table.evaluate(p), table.evaluate(p));
    }
}

#[test]
fn evaluate_interpolates_inside_a_section() {
    let table = SectionCurveTable::build(&[planet(0), planet(1), planet(2)]);
    // Halfway through the first segment.
    let r = table.evaluate(0.25);
    assert_eq!(r.section_index, 0);
    assert!(approx(r.local_t, 0.5));
    assert!(approx(r.curve_progress, 0.25));
    assert!(approx(r.camera_progress, r.curve_progress));
}

#[test]
fn camera_lags_in_text_sections() {
    let table = SectionCurveTable::build(&[planet(0), text("gap"), planet(1)]);
    // raw t: 0, 0.2, 1 -> normalized 0, 0.2, 1
    let r = table.evaluate(0.75);
    assert_eq!(r.section_index, 1);
    assert!(approx(r.curve_progress, 0.6));
    // anchor planet at 0, lag 0.5
    assert!(approx(r.camera_progress, 0.3));
}

#[test]
fn single_section_always_reports_zero() {
    let table = SectionCurveTable::build(&[planet(0)]);
    for p in [0.0, 0.5, 1.0, f32::NAN] {
        let r = table.evaluate(p);
        assert_eq!(r.curve_progress, 0.0);
        assert_eq!(r.camera_progress, 0.0);
    }
    assert_eq!(table.scroll_progress_for(0), 0.0);
}

#[test]
fn empty_and_text_only_tables_are_safe() {
    let empty = SectionCurveTable::build(&[]);
    assert!(empty.is_empty());
    assert_eq!(empty.evaluate(0.4).curve_progress, 0.0);

    let texts = SectionCurveTable::build(&[text("a"), text("b")]);
    assert!(texts.normalized_t().iter().all(|t| *t == 0.0));
    assert_eq!(texts.evaluate(0.9).curve_progress, 0.0);
}

#[test]
fn out_of_range_progress_is_clamped() {
    let table = SectionCurveTable::build(&default_sections());
    assert_eq!(table.evaluate(-3.0), table.evaluate(0.0));
    assert_eq!(table.evaluate(7.0), table.evaluate(1.0));
    assert_eq!(table.evaluate(f32::NAN), table.evaluate(0.0));
}

#[test]
fn scroll_progress_for_section_lands_on_that_section() {
    let table = SectionCurveTable::build(&default_sections());
    for i in 0..table.len() {
        let p = table.scroll_progress_for(i);
        let r = table.evaluate(p);
        assert_eq!(r.section_index, i);
        assert!(approx(r.curve_progress, table.normalized_t()[i]));
    }
}

#[test]
fn scroll_state_progress_is_clamped() {
    assert_eq!(ScrollState::new(0.0, 1000.0).progress(), 0.0);
    assert!(approx(ScrollState::new(250.0, 1000.0).progress(), 0.25));
    assert_eq!(ScrollState::new(5000.0, 1000.0).progress(), 1.0);
    assert_eq!(ScrollState::new(-20.0, 1000.0).progress(), 0.0);
    assert_eq!(ScrollState::new(f64::NAN, 1000.0).progress(), 0.0);
    // Document shorter than the viewport
    assert_eq!(ScrollState::new(0.0, -100.0).progress(), 0.0);
}
