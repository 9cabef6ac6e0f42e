use fnv::FnvHashMap;
use std::time::Duration;

use crate::constants::TYPEWRITER_CHAR_MS;
use crate::sections::{NarrativeSection, PlanetContent};

/// Ordered narrative content plus a lookup from story id to section.
#[derive(Clone, Debug)]
pub struct Story {
    sections: Vec<NarrativeSection>,
    by_story_id: FnvHashMap<String, usize>,
}

impl Default for Story {
    fn default() -> Self {
        Self::new(default_sections())
    }
}

impl Story {
    pub fn new(sections: Vec<NarrativeSection>) -> Self {
        let mut by_story_id = FnvHashMap::default();
        for (i, section) in sections.iter().enumerate() {
            if let NarrativeSection::Text { story_id, .. } = section {
                if by_story_id.insert(story_id.clone(), i).is_some() {
                    log::warn!("[story] duplicate story id {story_id:?}; keeping section {i}");
                }
            }
        }
        Self {
            sections,
            by_story_id,
        }
    }

    pub fn sections(&self) -> &[NarrativeSection] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&NarrativeSection> {
        self.sections.get(index)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section_by_story_id(&self, story_id: &str) -> Option<usize> {
        self.by_story_id.get(story_id).copied()
    }

    pub fn planet_count(&self) -> usize {
        self.sections.iter().filter(|s| s.is_planet()).count()
    }

    /// Section index of every planet, in planet order.
    pub fn planet_section_indices(&self) -> Vec<usize> {
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_planet())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn planet_content(&self, planet_index: usize) -> Option<&PlanetContent> {
        self.sections.iter().find_map(|s| match s {
            NarrativeSection::Planet {
                planet_index: p,
                content,
            } if *p == planet_index => Some(content),
            _ => None,
        })
    }
}

fn planet(planet_index: usize, title: &str, body: &str, spec_text: &str) -> NarrativeSection {
    NarrativeSection::Planet {
        planet_index,
        content: PlanetContent {
            title: title.to_string(),
            body: body.to_string(),
            spec_text: spec_text.to_string(),
        },
    }
}

fn text(story_id: &str, body: &str) -> NarrativeSection {
    NarrativeSection::Text {
        story_id: story_id.to_string(),
        body: body.to_string(),
    }
}

pub fn default_sections() -> Vec<NarrativeSection> {
    vec![
        text(
            "departure",
            "Odyssey-42 leaves the galactic core with three worlds on its charts.",
        ),
        planet(
            0,
            "Nebulosa Azure",
            "A gas giant wrapped in drifting blue storms.",
            "Mass 2.1 J | Day 9h | Moons 14",
        ),
        text(
            "azure-crossing",
            "The storms fall behind. Ahead, a red glow cuts through the dust.",
        ),
        planet(
            1,
            "Pianetta Rossa",
            "A small red world shielded by two rotating energy shells and a single moon.",
            "Mass 0.4 E | Day 31h | Moons 1",
        ),
        text(
            "rossa-crossing",
            "Beyond the shields the charts go blank, save for one name.",
        ),
        planet(
            2,
            "Chrysalis Prime",
            "A slowly turning cocoon of crystal plates around a warm core.",
            "Mass 1.3 E | Day 52h | Moons 0",
        ),
        text(
            "arrival",
            "End of the charted route. The crew logs the last coordinates.",
        ),
    ]
}

/// Reveals text one character at a time.
#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    shown_chars: usize,
    total_chars: usize,
    accum: Duration,
    char_interval: Duration,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let total_chars = text.chars().count();
        Self {
            text,
            shown_chars: 0,
            total_chars,
            accum: Duration::ZERO,
            char_interval: Duration::from_millis(TYPEWRITER_CHAR_MS),
        }
    }

    pub fn advance(&mut self, dt: Duration) -> &str {
        if !self.is_complete() {
            self.accum += dt;
            while self.accum >= self.char_interval && !self.is_complete() {
                self.accum -= self.char_interval;
                self.shown_chars += 1;
            }
        }
        self.visible()
    }

    pub fn visible(&self) -> &str {
        match self.text.char_indices().nth(self.shown_chars) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    pub fn reset(&mut self) {
        self.shown_chars = 0;
        self.accum = Duration::ZERO;
    }

    pub fn is_complete(&self) -> bool {
        self.shown_chars >= self.total_chars
    }
}
