use eframe::egui::{Color32, Vec2};
use once_cell::sync::OnceCell;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Number of stars generated per session.
pub const STAR_COUNT: usize = 200;

/// Viewport assumed when no real size is known yet.
pub const FALLBACK_VIEWPORT: Vec2 = Vec2::new(1000.0, 1000.0);

pub const MIN_RADIUS: f32 = 0.5;
pub const MAX_RADIUS: f32 = 2.5;
pub const MIN_OPACITY: f32 = 0.3;
pub const MAX_OPACITY: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarColor {
    pub hex: &'static str,
    pub rgb: [u8; 3],
}

impl StarColor {
    pub fn with_opacity(self, opacity: f32) -> Color32 {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(self.rgb[0], self.rgb[1], self.rgb[2], alpha)
    }
}

pub const PALETTE: [StarColor; 5] = [
    StarColor { hex: "#ffffff", rgb: [255, 255, 255] },
    StarColor { hex: "#fffaf0", rgb: [255, 250, 240] },
    StarColor { hex: "#ffd700", rgb: [255, 215, 0] },
    StarColor { hex: "#ff8c00", rgb: [255, 140, 0] },
    StarColor { hex: "#87cefa", rgb: [135, 206, 250] },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarPoint {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub opacity: f32,
    pub color: StarColor,
}

fn usable_viewport(viewport: Option<Vec2>) -> Vec2 {
    match viewport {
        Some(v) if v.x > 0.0 && v.y > 0.0 && v.x.is_finite() && v.y.is_finite() => v,
        _ => FALLBACK_VIEWPORT,
    }
}

/// Generate a fresh set of [`STAR_COUNT`] stars scattered over `viewport`.
///
/// A missing or degenerate viewport falls back to [`FALLBACK_VIEWPORT`].
pub fn generate_stars<R: Rng + ?Sized>(rng: &mut R, viewport: Option<Vec2>) -> Vec<StarPoint> {
    let size = usable_viewport(viewport);
    (0..STAR_COUNT as u32)
        .map(|id| StarPoint {
            id,
            x: rng.gen_range(0.0..size.x),
            y: rng.gen_range(0.0..size.y),
            radius: rng.gen_range(MIN_RADIUS..MAX_RADIUS),
            opacity: rng.gen_range(MIN_OPACITY..MAX_OPACITY),
            color: PALETTE[rng.gen_range(0..PALETTE.len())],
        })
        .collect()
}

/// Session-scoped memo of the generated stars.
///
/// The first call to [`StarField::get_or_generate`] decides the field; every
/// later call returns the same list regardless of the viewport it is given.
pub struct StarField {
    seed: Option<u64>,
    stars: OnceCell<Arc<[StarPoint]>>,
}

impl StarField {
    pub fn new() -> Self {
        Self {
            seed: None,
            stars: OnceCell::new(),
        }
    }

    /// A field whose stars are reproducible from `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            stars: OnceCell::new(),
        }
    }

    pub fn get_or_generate(&self, viewport: Option<Vec2>) -> Arc<[StarPoint]> {
        self.stars
            .get_or_init(|| {
                let stars = match self.seed {
                    Some(seed) => generate_stars(&mut StdRng::seed_from_u64(seed), viewport),
                    None => generate_stars(&mut rand::thread_rng(), viewport),
                };
                tracing::debug!(count = stars.len(), seed = ?self.seed, "star field generated");
                stars.into()
            })
            .clone()
    }

    pub fn is_generated(&self) -> bool {
        self.stars.get().is_some()
    }
}

impl Default for StarField {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_viewport_uses_fallback() {
        assert_eq!(usable_viewport(None), FALLBACK_VIEWPORT);
        assert_eq!(usable_viewport(Some(Vec2::new(0.0, 300.0))), FALLBACK_VIEWPORT);
        assert_eq!(usable_viewport(Some(Vec2::new(f32::NAN, 3.0))), FALLBACK_VIEWPORT);
        assert_eq!(
            usable_viewport(Some(Vec2::new(640.0, 480.0))),
            Vec2::new(640.0, 480.0)
        );
    }

    #[test]
    fn opacity_becomes_alpha() {
        let c = PALETTE[2].with_opacity(1.0);
        assert_eq!(c.a(), 255);
        let faint = PALETTE[0].with_opacity(0.3);
        assert_eq!(faint.a(), 77);
    }
}
