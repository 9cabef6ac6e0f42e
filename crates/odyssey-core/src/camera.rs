//! Camera placement along the narrative path.
//!
//! The synthesizer turns a normalized camera progress into a pose, either
//! riding the curve and facing the nearest planet, or trailing a ship that
//! flies the curve. Explicit jumps between poses go through
//! [`CameraTween`] so the view never pops.

use glam::{Mat4, Vec3};
use std::time::Duration;

use crate::constants::*;
use crate::curve::PathCurve;
use crate::easing::Easing;
use crate::sections::SectionCurveTable;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::fallback()
    }
}

impl CameraPose {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    pub fn fallback() -> Self {
        Self::new(FALLBACK_CAMERA_POSITION, FALLBACK_CAMERA_LOOK_AT)
    }

    pub fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(other.position, t),
            look_at: self.look_at.lerp(other.look_at, t),
        }
    }
}

/// Where the ship sits on the path and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipPose {
    pub position: Vec3,
    pub forward: Vec3,
}

impl Default for ShipPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CameraMode {
    CurveFollow,
    #[default]
    ThirdPerson,
}

/// Fixed offsets of the trailing camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailingRig {
    pub t_offset: f32,
    pub distance: f32,
    pub height: f32,
    pub look_ahead: f32,
}

impl Default for TrailingRig {
    fn default() -> Self {
        Self {
            t_offset: TRAIL_T_OFFSET,
            distance: TRAIL_DISTANCE,
            height: TRAIL_HEIGHT,
            look_ahead: TRAIL_LOOK_AHEAD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanetAnchor {
    pub t: f32,
    pub position: Vec3,
}

/// Planet anchors for every planet in the table, placed beside the path.
pub fn planet_anchors(curve: &PathCurve, table: &SectionCurveTable) -> Vec<PlanetAnchor> {
    table
        .planet_t()
        .into_iter()
        .map(|t| PlanetAnchor {
            t,
            position: curve.point_at(t) + PLANET_ANCHOR_OFFSET,
        })
        .collect()
}

/// Index of the anchor whose `t` is closest to `progress` (lowest wins ties).
pub fn nearest_anchor(anchors: &[PlanetAnchor], progress: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, a) in anchors.iter().enumerate() {
        let d = (a.t - progress).abs();
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

#[derive(Clone, Debug)]
pub struct PoseSynthesizer {
    curve: PathCurve,
    anchors: Vec<PlanetAnchor>,
    rig: TrailingRig,
}

impl PoseSynthesizer {
    pub fn new(curve: PathCurve, anchors: Vec<PlanetAnchor>, rig: TrailingRig) -> Self {
        Self {
            curve,
            anchors,
            rig,
        }
    }

    pub fn for_table(curve: PathCurve, table: &SectionCurveTable) -> Self {
        let anchors = planet_anchors(&curve, table);
        Self::new(curve, anchors, TrailingRig::default())
    }

    pub fn curve(&self) -> &PathCurve {
        &self.curve
    }

    pub fn anchors(&self) -> &[PlanetAnchor] {
        &self.anchors
    }

    pub fn synthesize(&self, camera_progress: f32, mode: CameraMode) -> CameraPose {
        if let Err(e) = self.curve.check() {
            log::debug!("[camera] {e}; using fallback pose");
            return CameraPose::fallback();
        }
        let p = if camera_progress.is_nan() {
            0.0
        } else {
            camera_progress.clamp(0.0, 1.0)
        };
        match mode {
            CameraMode::CurveFollow => self.curve_follow(p),
            CameraMode::ThirdPerson => self.third_person(p),
        }
    }

    pub fn ship(&self, progress: f32) -> ShipPose {
        if self.curve.is_degenerate() {
            return ShipPose::default();
        }
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        ShipPose {
            position: self.curve.point_at(p),
            forward: self.curve.tangent_at(p),
        }
    }

    fn curve_follow(&self, p: f32) -> CameraPose {
        let position = self.curve.point_at(p);
        let look_at = match nearest_anchor(&self.anchors, p) {
            Some(i) => self.anchors[i].position,
            None => position + self.curve.tangent_at(p),
        };
        CameraPose { position, look_at }
    }

    fn third_person(&self, p: f32) -> CameraPose {
        let tracked = self.curve.point_at(p);
        let trailing = self.curve.point_at((p - self.rig.t_offset).max(0.0));
        let tangent = self.curve.tangent_at(p);

        let mut side = Vec3::Y.cross(tangent);
        if side.length_squared() < 1e-8 {
            // Travelling straight up or down; any horizontal side will do.
            side = Vec3::X;
        }
        let side = side.normalize();
        let up = tangent.cross(side).normalize_or_zero();

        CameraPose {
            position: trailing + up * self.rig.height - tangent * self.rig.distance,
            look_at: tracked + tangent * self.rig.look_ahead,
        }
    }
}

/// Time-based ease between two poses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTween {
    from: CameraPose,
    to: CameraPose,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl CameraTween {
    pub fn new(from: CameraPose, to: CameraPose, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::SmoothStep,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn target(&self) -> CameraPose {
        self.to
    }

    /// Moves the destination without restarting the clock.
    pub fn retarget(&mut self, to: CameraPose) {
        self.to = to;
    }

    pub fn advance(&mut self, dt: Duration) -> CameraPose {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.sample()
    }

    pub fn sample(&self) -> CameraPose {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
        };
        self.from.lerp(&self.to, self.easing.apply(t))
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Right-handed perspective camera used by the renderer.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn from_pose(pose: &CameraPose, aspect: f32) -> Self {
        Self {
            eye: pose.position,
            target: pose.look_at,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// World to view transform. Nudges the target when it coincides with
    /// the eye so the matrix stays finite.
    pub fn view_matrix(&self) -> Mat4 {
        let target = if (self.target - self.eye).length_squared() < 1e-10 {
            self.eye + Vec3::NEG_Z
        } else {
            self.target
        };
        Mat4::look_at_rh(self.eye, target, self.up)
    }
}
