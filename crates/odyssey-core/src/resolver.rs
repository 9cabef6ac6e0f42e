use crate::constants::HIDE_UI_SCROLL_THRESHOLD_PX;
use crate::error::SceneError;

/// Bounding box of a section element, `top` relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Vertical center in document coordinates.
    #[inline]
    pub fn document_center(&self, scroll_offset: f64) -> f64 {
        self.top + scroll_offset + self.height / 2.0
    }
}

/// Index of the measured section whose center is closest to the viewport
/// center. Unmeasured entries are skipped; ties keep the lowest index.
pub fn resolve_nearest(
    scroll_offset: f64,
    viewport_height: f64,
    bounds: &[Option<SectionBounds>],
) -> Result<usize, SceneError> {
    let viewport_center = scroll_offset + viewport_height / 2.0;
    let mut best: Option<(usize, f64)> = None;
    for (i, b) in bounds.iter().enumerate() {
        let Some(b) = b else { continue };
        let distance = (b.document_center(scroll_offset) - viewport_center).abs();
        if distance.is_nan() {
            continue;
        }
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i).ok_or(SceneError::MissingMeasurement)
}

#[inline]
pub fn hide_ui(scroll_offset: f64) -> bool {
    scroll_offset > HIDE_UI_SCROLL_THRESHOLD_PX
}

/// Tracks the current planet across scroll events, holding the last good
/// answer while section geometry is unavailable.
#[derive(Clone, Debug, Default)]
pub struct PlanetResolver {
    current: usize,
    planet_count: usize,
}

impl PlanetResolver {
    pub fn new(planet_count: usize) -> Self {
        Self {
            current: 0,
            planet_count,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// `planet_bounds` is indexed by planet index, not section index.
    pub fn resolve(
        &mut self,
        scroll_offset: f64,
        viewport_height: f64,
        planet_bounds: &[Option<SectionBounds>],
    ) -> usize {
        match resolve_nearest(scroll_offset, viewport_height, planet_bounds) {
            Ok(i) if i < self.planet_count => self.current = i,
            Ok(i) => {
                log::warn!(
                    "[scroll] nearest planet {} outside planet list ({})",
                    i,
                    self.planet_count
                );
            }
            Err(_) => {}
        }
        self.current
    }

    /// Forces the current planet, e.g. after keyboard navigation.
    pub fn set_current(&mut self, planet_index: usize) {
        if planet_index < self.planet_count {
            self.current = planet_index;
        }
    }
}
