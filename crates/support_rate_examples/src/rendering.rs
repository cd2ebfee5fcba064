use std::path::Path;

use glam::{Vec2, Vec3};
use image::{Rgb, RgbImage};
use support_rate::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a compact `tracing` subscriber honoring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

/// Maps the world ground plane (x, z) onto an image. World +Z points up in the image.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub domain_extent: Vec2,
    pub domain_center: Vec2,
    pub background: [u8; 3],
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), domain_extent: Vec2) -> Self {
        Self {
            image_size,
            domain_extent,
            domain_center: Vec2::ZERO,
            background: [24, 28, 24],
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_center(mut self, domain_center: Vec2) -> Self {
        self.domain_center = domain_center;
        self
    }

    /// Pixels per world unit along X.
    pub fn scale(&self) -> f32 {
        self.image_size.0 as f32 / self.domain_extent.x.max(f32::EPSILON)
    }

    pub fn world_to_pixel(&self, p: Vec2) -> (i64, i64) {
        let rel = p - self.domain_center + self.domain_extent * 0.5;
        let u = rel.x / self.domain_extent.x.max(f32::EPSILON);
        let v = 1.0 - rel.y / self.domain_extent.y.max(f32::EPSILON);
        (
            (u * self.image_size.0 as f32).floor() as i64,
            (v * self.image_size.1 as f32).floor() as i64,
        )
    }
}

pub struct Canvas {
    config: RenderConfig,
    image: RgbImage,
}

impl Canvas {
    pub fn new(config: RenderConfig) -> Self {
        let (w, h) = config.image_size;
        let image = RgbImage::from_pixel(w, h, Rgb(config.background));
        Self { config, image }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn put(&mut self, x: i64, y: i64, color: [u8; 3]) {
        let (w, h) = self.config.image_size;
        if x >= 0 && y >= 0 && x < w as i64 && y < h as i64 {
            self.image.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }

    /// Filled disk with a pixel radius.
    pub fn disk(&mut self, center: Vec2, radius_px: i64, color: [u8; 3]) {
        let (cx, cy) = self.config.world_to_pixel(center);
        for dy in -radius_px..=radius_px {
            for dx in -radius_px..=radius_px {
                if dx * dx + dy * dy <= radius_px * radius_px {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Circle outline with a world-space radius.
    pub fn ring(&mut self, center: Vec2, radius: f32, color: [u8; 3]) {
        let steps = ((radius * self.config.scale()) as usize * 8).max(32);
        for i in 0..steps {
            let a = i as f32 / steps as f32 * std::f32::consts::TAU;
            let (x, y) = self
                .config
                .world_to_pixel(center + Vec2::new(a.cos(), a.sin()) * radius);
            self.put(x, y, color);
        }
    }

    /// Axis-aligned rectangle outline in world space.
    pub fn rect(&mut self, min: Vec2, max: Vec2, color: [u8; 3]) {
        let corners = [
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, max.y),
            Vec2::new(min.x, min.y),
        ];
        self.polyline(&corners, color);
    }

    pub fn polyline(&mut self, points: &[Vec2], color: [u8; 3]) {
        for pair in points.windows(2) {
            let (x0, y0) = self.config.world_to_pixel(pair[0]);
            let (x1, y1) = self.config.world_to_pixel(pair[1]);
            let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
            for s in 0..=steps {
                let t = s as f32 / steps as f32;
                let x = x0 as f32 + (x1 - x0) as f32 * t;
                let y = y0 as f32 + (y1 - y0) as f32 * t;
                self.put(x.round() as i64, y.round() as i64, color);
            }
        }
    }

    /// Shades every pixel by `f(world)`; `None` keeps the background.
    pub fn shade(&mut self, f: impl Fn(Vec2) -> Option<[u8; 3]>) {
        let (w, h) = self.config.image_size;
        let extent = self.config.domain_extent;
        let origin = self.config.domain_center - extent * 0.5;
        for py in 0..h {
            for px in 0..w {
                let u = (px as f32 + 0.5) / w as f32;
                let v = 1.0 - (py as f32 + 0.5) / h as f32;
                let world = origin + Vec2::new(u * extent.x, v * extent.y);
                if let Some(color) = f(world) {
                    self.image.put_pixel(px, py, Rgb(color));
                }
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.image.save(path)?;
        info!("Wrote {}.", path.display());
        Ok(())
    }
}

/// Draws the spawn area, the exclusion zone and every accepted position, then saves a PNG.
pub fn render_placement_to_png(
    result: &PlacementResult,
    request: &PlacementRequest,
    rc: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let mut canvas = Canvas::new(rc.clone());
    draw_placement(&mut canvas, result, request);
    canvas.save(path)
}

pub(crate) fn draw_placement(
    canvas: &mut Canvas,
    result: &PlacementResult,
    request: &PlacementRequest,
) {
    let half = request.area_extent() * 0.5;
    canvas.rect(request.origin - half, request.origin + half, [90, 140, 90]);
    canvas.ring(Vec2::ZERO, request.exclusion_radius, [200, 80, 80]);

    let dot = (request.min_separation * 0.5 * canvas.config().scale()).round() as i64;
    for p in result.iter() {
        let planar = planar(*p);
        if request.min_separation > 0.0 {
            canvas.ring(planar, request.min_separation * 0.5, [120, 110, 60]);
        }
        canvas.disk(planar, dot.clamp(2, 6), [255, 214, 0]);
    }
}

pub(crate) fn planar(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_to_pixel_flips_z() {
        let rc = RenderConfig::new((100, 100), Vec2::new(10.0, 10.0));
        assert_eq!(rc.world_to_pixel(Vec2::new(-5.0, 5.0)), (0, 0));
        assert_eq!(rc.world_to_pixel(Vec2::ZERO), (50, 50));
        assert_eq!(rc.world_to_pixel(Vec2::new(4.95, -4.95)), (99, 99));
    }

    #[test]
    fn drawing_outside_is_ignored() {
        let rc = RenderConfig::new((8, 8), Vec2::new(8.0, 8.0));
        let mut canvas = Canvas::new(rc);
        canvas.disk(Vec2::new(100.0, 100.0), 3, [255, 0, 0]);
        canvas.polyline(&[Vec2::new(-50.0, 0.0), Vec2::new(50.0, 0.0)], [0, 255, 0]);
    }
}
