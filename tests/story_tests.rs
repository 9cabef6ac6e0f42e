// Host-side tests for story content and the typewriter reveal.

use odyssey_core::{NarrativeSection, Story, Typewriter};
use std::time::Duration;

#[test]
fn default_story_interleaves_three_planets_with_text() {
    let story = Story::default();
    assert_eq!(story.len(), 7);
    assert_eq!(story.planet_count(), 3);
    assert_eq!(story.planet_section_indices(), vec![1, 3, 5]);
    let titles: Vec<_> = (0..3)
        .map(|i| story.planet_content(i).unwrap().title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["Nebulosa Azure", "Pianetta Rossa", "Chrysalis Prime"]
    );
    assert!(matches!(
        story.section(0),
        Some(NarrativeSection::Text { .. })
    ));
}

#[test]
fn story_ids_resolve_to_sections() {
    let story = Story::default();
    assert_eq!(story.section_by_story_id("departure"), Some(0));
    assert_eq!(story.section_by_story_id("arrival"), Some(6));
    assert_eq!(story.section_by_story_id("nowhere"), None);
    assert!(story.planet_content(9).is_none());
}

#[test]
fn typewriter_reveals_one_char_per_interval() {
    let mut tw = Typewriter::new("héllo");
    assert_eq!(tw.visible(), "");
    assert_eq!(tw.advance(Duration::from_millis(29)), "");
    assert_eq!(tw.advance(Duration::from_millis(1)), "h");
    // Multi-byte characters are never split.
    assert_eq!(tw.advance(Duration::from_millis(30)), "hé");
    assert_eq!(tw.advance(Duration::from_millis(95)), "héllo");
    assert!(tw.is_complete());
    assert_eq!(tw.advance(Duration::from_secs(1)), "héllo");
}

#[test]
fn typewriter_reset_starts_over() {
    let mut tw = Typewriter::new("abc");
    tw.advance(Duration::from_millis(60));
    assert_eq!(tw.visible(), "ab");
    tw.reset();
    assert_eq!(tw.visible(), "");
    assert!(!tw.is_complete());
}

#[test]
fn empty_text_is_complete_immediately() {
    let tw = Typewriter::new("");
    assert!(tw.is_complete());
    assert_eq!(tw.visible(), "");
}
