//! Section layout → curve parameter mapping.
//!
//! Each narrative section gets a curve parameter `t`: planets sit on
//! consecutive integers, text sections sit a fifth of the way past the
//! planet they follow. The table is normalized to [0, 1] once and then
//! sampled every frame with the live scroll progress.

use crate::constants::{TEXT_CAMERA_LAG, TEXT_SECTION_T_OFFSET};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanetContent {
    pub title: String,
    pub body: String,
    pub spec_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NarrativeSection {
    Planet {
        planet_index: usize,
        content: PlanetContent,
    },
    Text {
        story_id: String,
        body: String,
    },
}

impl NarrativeSection {
    pub fn is_planet(&self) -> bool {
        matches!(self, NarrativeSection::Planet { .. })
    }

    pub fn planet_index(&self) -> Option<usize> {
        match self {
            NarrativeSection::Planet { planet_index, .. } => Some(*planet_index),
            NarrativeSection::Text { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionKind {
    Planet,
    Text,
}

/// Raw scroll metrics as reported by the host page.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub raw_offset_px: f64,
    pub max_offset_px: f64,
}

impl ScrollState {
    pub fn new(raw_offset_px: f64, max_offset_px: f64) -> Self {
        Self {
            raw_offset_px,
            max_offset_px,
        }
    }

    /// Scroll position in [0, 1]; non-finite offsets read as the top.
    pub fn progress(&self) -> f32 {
        let p = self.raw_offset_px / self.max_offset_px.max(1.0);
        if p.is_nan() {
            return 0.0;
        }
        p.clamp(0.0, 1.0) as f32
    }
}

/// Per-frame result of sampling the table.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CurveProgress {
    pub curve_progress: f32,
    pub camera_progress: f32,
    pub section_index: usize,
    pub local_t: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionCurveTable {
    raw_t: Vec<f32>,
    normalized_t: Vec<f32>,
    section_planet_t: Vec<f32>,
    kinds: Vec<SectionKind>,
}

impl SectionCurveTable {
    pub fn build(sections: &[NarrativeSection]) -> Self {
        let mut raw_t = Vec::with_capacity(sections.len());
        let mut kinds = Vec::with_capacity(sections.len());
        let mut planet_index = 0usize;
        for section in sections {
            if section.is_planet() {
                raw_t.push(planet_index as f32);
                planet_index += 1;
                kinds.push(SectionKind::Planet);
            } else {
                // Text ahead of every planet (including the very first
                // section) has no anchor yet and stays at the start.
                let t = if planet_index == 0 {
                    0.0
                } else {
                    (planet_index - 1) as f32 + TEXT_SECTION_T_OFFSET
                };
                raw_t.push(t);
                kinds.push(SectionKind::Text);
            }
        }

        let t_max = raw_t.iter().copied().fold(0.0f32, f32::max);
        let normalized_t: Vec<f32> = if t_max > 0.0 {
            raw_t.iter().map(|t| t / t_max).collect()
        } else {
            vec![0.0; raw_t.len()]
        };

        let mut section_planet_t = Vec::with_capacity(normalized_t.len());
        let mut last_planet_t = 0.0f32;
        for (kind, t) in kinds.iter().zip(&normalized_t) {
            if *kind == SectionKind::Planet {
                last_planet_t = *t;
            }
            section_planet_t.push(last_planet_t);
        }

        log::debug!(
            "[sections] built curve table: {} sections, {} planets, t_max={}",
            kinds.len(),
            planet_index,
            t_max
        );
        Self {
            raw_t,
            normalized_t,
            section_planet_t,
            kinds,
        }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn raw_t(&self) -> &[f32] {
        &self.raw_t
    }

    pub fn normalized_t(&self) -> &[f32] {
        &self.normalized_t
    }

    pub fn section_planet_t(&self) -> &[f32] {
        &self.section_planet_t
    }

    pub fn kind(&self, section_index: usize) -> Option<SectionKind> {
        self.kinds.get(section_index).copied()
    }

    /// Normalized `t` of every planet, in planet order.
    pub fn planet_t(&self) -> Vec<f32> {
        self.kinds
            .iter()
            .zip(&self.normalized_t)
            .filter(|(k, _)| **k == SectionKind::Planet)
            .map(|(_, t)| *t)
            .collect()
    }

    pub fn planet_count(&self) -> usize {
        self.kinds
            .iter()
            .filter(|k| **k == SectionKind::Planet)
            .count()
    }

    /// Scroll progress at which `section_index` is exactly in view.
    pub fn scroll_progress_for(&self, section_index: usize) -> f32 {
        let n = self.len();
        if n <= 1 {
            return 0.0;
        }
        (section_index.min(n - 1) as f32 / (n - 1) as f32).clamp(0.0, 1.0)
    }

    pub fn evaluate(&self, scroll_progress: f32) -> CurveProgress {
        let n = self.len();
        if n <= 1 {
            return CurveProgress::default();
        }
        let p = if scroll_progress.is_nan() {
            0.0
        } else {
            scroll_progress.clamp(0.0, 1.0)
        };
        let segments = (n - 1) as f32;
        let section_index = ((p * segments).floor() as usize).min(n - 1);
        let next_index = (section_index + 1).min(n - 1);

        let section_start = section_index as f32 / segments;
        let section_end = (section_index + 1) as f32 / segments;
        let local_t = ((p - section_start) / (section_end - section_start)).clamp(0.0, 1.0);

        let a = self.normalized_t[section_index];
        let b = self.normalized_t[next_index];
        let curve_progress = a + (b - a) * local_t;

        let camera_progress = match self.kinds[section_index] {
            SectionKind::Planet => curve_progress,
            SectionKind::Text => {
                let t_planet = self.section_planet_t[section_index];
                t_planet + (curve_progress - t_planet) * TEXT_CAMERA_LAG
            }
        };

        CurveProgress {
            curve_progress,
            camera_progress,
            section_index,
            local_t,
        }
    }
}
