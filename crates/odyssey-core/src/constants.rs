use glam::Vec3;

// Shared scene tuning constants used by the core and the web frontend.

// Galaxy (main background)
pub const GALAXY_COUNT: usize = 500_000;
pub const GALAXY_SIZE: f32 = 0.018; // world-space particle size
pub const GALAXY_RADIUS: f32 = 2000.0;
pub const GALAXY_BRANCHES: u32 = 20;
pub const GALAXY_SPIN: f32 = 5.0; // radians per unit of radius
pub const GALAXY_RANDOMNESS: f32 = 2.0;
pub const GALAXY_RANDOMNESS_POWER: f32 = 3.0;
pub const GALAXY_INSIDE_COLOR: &str = "#6e58ad";
pub const GALAXY_OUTSIDE_COLOR: &str = "#8808dd";

// Galaxy (loading screen, lighter)
pub const LOADER_GALAXY_COUNT: usize = 20_000;
pub const LOADER_GALAXY_RADIUS: f32 = 200.0;
pub const LOADER_GALAXY_BRANCHES: u32 = 8;

// Section curve table
pub const TEXT_SECTION_T_OFFSET: f32 = 0.2; // text sits 20% past its anchor planet
pub const TEXT_CAMERA_LAG: f32 = 0.5; // camera stops half-way between planet and curve

// Path control points the narrative flies along; starts where the intro ends
pub const PATH_CONTROL_POINTS: [[f32; 3]; 6] = [
    [3.0, 3.0, 3.0],
    [1.0, 1.8, -3.0],
    [-3.0, 0.8, -9.0],
    [-1.0, -0.4, -15.0],
    [3.5, 0.2, -21.0],
    [1.0, 1.0, -27.0],
];
pub const CATMULL_ROM_TENSION: f32 = 0.5;
pub const TANGENT_EPSILON: f32 = 0.0005;

// Planets sit beside the path rather than on it
pub const PLANET_ANCHOR_OFFSET: Vec3 = Vec3::new(1.6, -0.3, 0.0);

// Third-person rig
pub const TRAIL_T_OFFSET: f32 = 0.07;
pub const TRAIL_DISTANCE: f32 = 1.4;
pub const TRAIL_HEIGHT: f32 = 0.45;
pub const TRAIL_LOOK_AHEAD: f32 = 2.0;

// Fallback pose used when the path cannot be sampled
pub const FALLBACK_CAMERA_POSITION: Vec3 = Vec3::new(3.0, 3.0, 3.0);
pub const FALLBACK_CAMERA_LOOK_AT: Vec3 = Vec3::ZERO;

// Projection (matches the original scene camera)
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Scroll / visibility
pub const HIDE_UI_SCROLL_THRESHOLD_PX: f64 = 50.0;
pub const ENDING_PROGRESS_THRESHOLD: f32 = 0.999;

// Navigation tween (explicit next/previous section)
pub const NAVIGATION_TWEEN_MS: u64 = 900;

// Intro progress ramp towards the first planet
pub const INTRO_RAMP_MS: u64 = 1800;

// Intro choreography (milliseconds)
pub const INTRO_FLY_IN_MS: u64 = 2000;
pub const INTRO_CREDITS_IN_MS: u64 = 1200;
pub const INTRO_BY_LINE_DELAY_MS: u64 = 800;
pub const INTRO_NAME_STEP_MS: u64 = 600;
pub const INTRO_PAUSE_MS: u64 = 4500; // after fly-in, before fly-out
pub const INTRO_FLY_OUT_MS: u64 = 5000;
pub const INTRO_CREDITS_OUT_MS: u64 = 2500;
pub const INTRO_LOOK_DRIFT_MS: u64 = 7000;
pub const INTRO_HALFWAY_AFTER_FLY_OUT_MS: u64 = 2250;
pub const INTRO_COMPLETE_DELAY_MS: u64 = 150;

pub const INTRO_START_POSITION: Vec3 = Vec3::new(0.0, 0.0, 0.1);
pub const INTRO_FLY_IN_POSITION: Vec3 = Vec3::new(0.5, 0.2, 0.5);
pub const INTRO_FLY_OUT_POSITION: Vec3 = Vec3::new(3.0, 3.0, 3.0);
pub const INTRO_LOOK_DRIFT_TARGET: Vec3 = Vec3::new(0.5, 0.2, 0.0);

pub const CREDITS_BY_LINE: &str = "by";
pub const CREDITS_NAMES: [&str; 3] = ["Jules Crevoisier", "Audric Fullhardt", "Gabriel Maillard"];
pub const CREDITS_FADE_START: f32 = 0.7; // fraction of credits-out after which opacity drops

// Title reveal fallback if no lifecycle signal ever arrives
pub const TITLE_REVEAL_TIMEOUT_MS: u64 = 15_000;

// Loader simulation
pub const LOADER_STEP_MS: u64 = 50;
pub const LOADER_FADE_DELAY_MS: u64 = 200;
pub const LOADER_FADE_MS: u64 = 600;

// Typewriter reveal for text sections
pub const TYPEWRITER_CHAR_MS: u64 = 30;

#[inline]
pub fn path_control_points() -> Vec<Vec3> {
    PATH_CONTROL_POINTS.iter().map(|p| Vec3::from(*p)).collect()
}
