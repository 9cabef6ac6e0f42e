use glam::Vec3;

use crate::constants::{path_control_points, CATMULL_ROM_TENSION, TANGENT_EPSILON};
use crate::error::SceneError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurveKind {
    /// Passes through every control point.
    CatmullRom { tension: f32 },
    /// Single Bezier of degree `points - 1`; only touches the endpoints.
    Bezier,
}

impl Default for CurveKind {
    fn default() -> Self {
        CurveKind::CatmullRom {
            tension: CATMULL_ROM_TENSION,
        }
    }
}

/// The 3-D path the narrative travels along, parameterized over [0, 1].
///
/// Sampling never fails: an empty path samples the origin and a single
/// point samples itself. Use [`PathCurve::check`] to detect those cases.
#[derive(Clone, Debug, PartialEq)]
pub struct PathCurve {
    points: Vec<Vec3>,
    kind: CurveKind,
}

impl Default for PathCurve {
    fn default() -> Self {
        Self::new(path_control_points(), CurveKind::default())
    }
}

impl PathCurve {
    pub fn new(points: impl Into<Vec<Vec3>>, kind: CurveKind) -> Self {
        Self {
            points: points.into(),
            kind,
        }
    }

    pub fn catmull_rom(points: impl Into<Vec<Vec3>>) -> Self {
        Self::new(points, CurveKind::default())
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    pub fn check(&self) -> Result<(), SceneError> {
        if self.points.len() < 2 {
            return Err(SceneError::DegenerateGeometry {
                points: self.points.len(),
            });
        }
        Ok(())
    }

    pub fn is_degenerate(&self) -> bool {
        self.check().is_err()
    }

    pub fn point_at(&self, u: f32) -> Vec3 {
        match self.points.len() {
            0 => return Vec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }
        let u = if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0) };
        match self.kind {
            CurveKind::CatmullRom { tension } => self.catmull_rom_at(u, tension),
            CurveKind::Bezier => de_casteljau(&self.points, u),
        }
    }

    /// Unit direction of travel at `u`; falls back to -Z on flat spots.
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        let a = self.point_at((u - TANGENT_EPSILON).max(0.0));
        let b = self.point_at((u + TANGENT_EPSILON).min(1.0));
        let dir = (b - a).normalize_or_zero();
        if dir == Vec3::ZERO {
            Vec3::NEG_Z
        } else {
            dir
        }
    }

    fn catmull_rom_at(&self, u: f32, tension: f32) -> Vec3 {
        let last = self.points.len() - 1;
        let scaled = u * last as f32;
        let i1 = (scaled.floor() as usize).min(last - 1);
        let t = scaled - i1 as f32;
        let i0 = i1.saturating_sub(1);
        let i2 = i1 + 1;
        let i3 = (i1 + 2).min(last);
        hermite(
            self.points[i0],
            self.points[i1],
            self.points[i2],
            self.points[i3],
            t,
            tension,
        )
    }
}

// Cubic Hermite form of a Catmull-Rom segment between p1 and p2.
fn hermite(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32, tension: f32) -> Vec3 {
    let v0 = (p2 - p0) * tension;
    let v1 = (p3 - p1) * tension;

    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    p1 * h00 + v0 * h10 + p2 * h01 + v1 * h11
}

fn de_casteljau(points: &[Vec3], t: f32) -> Vec3 {
    let mut scratch = points.to_vec();
    let n = scratch.len();
    for level in 1..n {
        for i in 0..n - level {
            scratch[i] = scratch[i].lerp(scratch[i + 1], t);
        }
    }
    scratch[0]
}
