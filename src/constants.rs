// DOM hooks, renderer tuning and frame pacing for the web front-end.

// Element ids and selectors the page must provide
pub const CANVAS_ID: &str = "galaxy-canvas";
pub const LOADER_ID: &str = "loader";
pub const LOADER_BAR_ID: &str = "loader-bar";
pub const LOADER_PERCENT_ID: &str = "loader-percent";
pub const CREDITS_ID: &str = "credits";
pub const CREDITS_BY_ID: &str = "credits-by";
pub const CREDITS_NAME_ID_PREFIX: &str = "credits-name-";
pub const TITLE_ID: &str = "site-title";
pub const ENDING_ID: &str = "ending";
pub const SECTION_SELECTOR: &str = "[data-section-index]";
pub const SECTION_INDEX_ATTR: &str = "data-section-index";
pub const TYPEWRITER_ATTR: &str = "data-typewriter";
pub const ACTIVE_PLANET_ATTR: &str = "data-active-planet";

// Body classes toggled from frame output
pub const HIDE_UI_CLASS: &str = "hide-ui";
pub const REVEALED_CLASS: &str = "revealed";
pub const SCROLL_LOCKED_CLASS: &str = "scroll-locked";

// Backing-store resolution is capped to keep 500k billboards affordable
pub const DEVICE_PIXEL_RATIO_CAP: f64 = 2.0;

// Frame pacing: long gaps (tab switch, debugger) are clamped
pub const MAX_FRAME_DT_MS: u64 = 100;

pub const CLEAR_RGBA: [f64; 4] = [0.0, 0.0, 0.012, 1.0];

// Marker quads drawn on top of the galaxy
pub const PLANET_MARKER_SIZE: f32 = 0.35;
pub const ACTIVE_PLANET_SCALE: f32 = 1.35;
pub const SHIP_MARKER_SIZE: f32 = 0.08;
pub const PLANET_COLORS: [[f32; 4]; 3] = [
    [0.35, 0.55, 1.0, 1.0], // azure
    [0.95, 0.3, 0.25, 1.0], // rossa
    [0.9, 0.8, 0.45, 1.0],  // chrysalis
];
pub const SHIP_COLOR: [f32; 4] = [0.9, 0.95, 1.0, 1.0];
pub const MAX_MARKERS: usize = 16;

// Seed for the director's loader RNG; the galaxy itself uses entropy
pub const DIRECTOR_SEED: u64 = 42;
