//! Procedural spiral galaxy point cloud.
//!
//! Every particle is assigned to an arm by its index, pushed out to a
//! random radius, twisted by `radius * spin` and scattered with a
//! power-law jitter that grows with the radius. The radius is drawn
//! uniformly in length (not in area), which packs the core densely; that
//! look is the intended one.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

use crate::constants::*;
use crate::error::SceneError;

#[derive(Clone, Debug, PartialEq)]
pub struct GalaxyParameters {
    pub count: usize,
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: [f32; 3],
    pub outside_color: [f32; 3],
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: GALAXY_COUNT,
            size: GALAXY_SIZE,
            radius: GALAXY_RADIUS,
            branches: GALAXY_BRANCHES,
            spin: GALAXY_SPIN,
            randomness: GALAXY_RANDOMNESS,
            randomness_power: GALAXY_RANDOMNESS_POWER,
            inside_color: hex_or_white(GALAXY_INSIDE_COLOR),
            outside_color: hex_or_white(GALAXY_OUTSIDE_COLOR),
        }
    }
}

impl GalaxyParameters {
    /// Lighter variant shown behind the loading progress.
    pub fn loader() -> Self {
        Self {
            count: LOADER_GALAXY_COUNT,
            radius: LOADER_GALAXY_RADIUS,
            branches: LOADER_GALAXY_BRANCHES,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if self.branches == 0 {
            return Err(SceneError::invalid("branches", "must be at least 1"));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SceneError::invalid(
                "radius",
                format!("must be positive, got {}", self.radius),
            ));
        }
        if self.randomness_power.is_nan() || self.randomness_power < 1.0 {
            return Err(SceneError::invalid(
                "randomness_power",
                format!("must be >= 1, got {}", self.randomness_power),
            ));
        }
        if self.randomness.is_nan() || self.randomness < 0.0 {
            return Err(SceneError::invalid(
                "randomness",
                format!("must be >= 0, got {}", self.randomness),
            ));
        }
        Ok(())
    }

    /// Angle of the arm particle `index` belongs to.
    #[inline]
    pub fn branch_angle(&self, index: usize) -> f32 {
        let branches = self.branches.max(1) as usize;
        (index % branches) as f32 / branches as f32 * TAU
    }

    /// Position on the spiral centerline before jitter.
    #[inline]
    pub fn spiral_point(&self, index: usize, radius: f32) -> Vec3 {
        let angle = self.branch_angle(index) + radius * self.spin;
        Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
    }

    #[inline]
    pub fn color_at(&self, radius: f32) -> [f32; 3] {
        let t = (radius / self.radius).clamp(0.0, 1.0);
        let a = Vec3::from(self.inside_color);
        let b = Vec3::from(self.outside_color);
        a.lerp(b, t).to_array()
    }
}

/// Flat position/color buffers, three floats per point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.positions
            .get(index * 3..index * 3 + 3)
            .map(Vec3::from_slice)
    }

    pub fn color(&self, index: usize) -> Option<[f32; 3]> {
        self.colors
            .get(index * 3..index * 3 + 3)
            .map(|c| [c[0], c[1], c[2]])
    }
}

pub fn generate<R: Rng + ?Sized>(
    params: &GalaxyParameters,
    rng: &mut R,
) -> Result<PointCloud, SceneError> {
    params.validate()?;

    let mut positions = Vec::with_capacity(params.count * 3);
    let mut colors = Vec::with_capacity(params.count * 3);
    for i in 0..params.count {
        let radius = rng.gen::<f32>() * params.radius;
        let jitter_x = jitter(rng, params, radius);
        let jitter_y = jitter(rng, params, radius);
        let jitter_z = jitter(rng, params, radius);

        let p = params.spiral_point(i, radius) + Vec3::new(jitter_x, jitter_y, jitter_z);
        positions.extend_from_slice(&p.to_array());
        colors.extend_from_slice(&params.color_at(radius));
    }
    log::debug!(
        "[galaxy] generated {} points (branches={}, radius={})",
        params.count,
        params.branches,
        params.radius
    );
    Ok(PointCloud { positions, colors })
}

#[inline]
fn jitter<R: Rng + ?Sized>(rng: &mut R, params: &GalaxyParameters, radius: f32) -> f32 {
    let magnitude = rng.gen::<f32>().powf(params.randomness_power);
    let sign = if rng.gen::<f32>() < 0.5 { 1.0 } else { -1.0 };
    magnitude * sign * params.randomness * radius
}

/// Parse `#rrggbb` (or `rrggbb`) into [0, 1] components.
pub fn parse_hex_color(hex: &str) -> Result<[f32; 3], SceneError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(SceneError::invalid(
            "color",
            format!("expected #rrggbb, got {hex:?}"),
        ));
    }
    let mut out = [0.0f32; 3];
    for (i, c) in out.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
            .map_err(|e| SceneError::invalid("color", format!("{hex:?}: {e}")))?;
        *c = byte as f32 / 255.0;
    }
    Ok(out)
}

fn hex_or_white(hex: &str) -> [f32; 3] {
    parse_hex_color(hex).unwrap_or([1.0, 1.0, 1.0])
}
