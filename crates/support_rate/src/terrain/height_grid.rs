//! Height samples over a regular grid, queried with bilinear interpolation.
use glam::Vec2;
use tracing::debug;

use crate::error::{Error, Result};
use crate::terrain::GroundProbe;

/// Row-major heights on a `width x depth` lattice of points spaced `cell_size` apart.
///
/// `origin` is the world (x, z) of sample `(0, 0)`; the grid spans
/// `origin .. origin + (width - 1, depth - 1) * cell_size`.
#[derive(Clone, Debug)]
pub struct HeightGrid {
    origin: Vec2,
    cell_size: f32,
    width: usize,
    depth: usize,
    heights: Vec<f32>,
}

impl HeightGrid {
    pub fn try_new(
        origin: Vec2,
        cell_size: f32,
        width: usize,
        depth: usize,
        heights: Vec<f32>,
    ) -> Result<Self> {
        if width < 2 || depth < 2 {
            return Err(Error::InvalidConfig(
                "height grid needs at least 2x2 samples".into(),
            ));
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(Error::InvalidConfig("cell_size must be > 0".into()));
        }
        if !origin.is_finite() {
            return Err(Error::InvalidConfig("origin must be finite".into()));
        }
        if heights.len() != width * depth {
            return Err(Error::InvalidConfig(format!(
                "expected {} height samples, got {}",
                width * depth,
                heights.len()
            )));
        }
        debug!("Height grid {}x{} @ {} units.", width, depth, cell_size);
        Ok(Self {
            origin,
            cell_size,
            width,
            depth,
            heights,
        })
    }

    /// Build a grid centered on `center` by evaluating `f(x, z)` at every sample point.
    pub fn from_fn(
        center: Vec2,
        cell_size: f32,
        width: usize,
        depth: usize,
        f: impl Fn(f32, f32) -> f32,
    ) -> Result<Self> {
        let span = Vec2::new(
            width.saturating_sub(1) as f32,
            depth.saturating_sub(1) as f32,
        ) * cell_size;
        let origin = center - span * 0.5;
        let mut heights = Vec::with_capacity(width * depth);
        for iz in 0..depth {
            for ix in 0..width {
                let x = origin.x + ix as f32 * cell_size;
                let z = origin.y + iz as f32 * cell_size;
                heights.push(f(x, z));
            }
        }
        Self::try_new(origin, cell_size, width, depth, heights)
    }

    /// Sample count as `(width, depth)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.depth)
    }

    /// World (x, z) bounds as `(min, max)`.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let span = Vec2::new((self.width - 1) as f32, (self.depth - 1) as f32) * self.cell_size;
        (self.origin, self.origin + span)
    }

    #[inline]
    fn at(&self, ix: usize, iz: usize) -> f32 {
        self.heights[iz * self.width + ix]
    }

    /// Bilinear height at a world (x, z), or `None` outside the grid.
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let (min, max) = self.bounds();
        if !(x >= min.x && x <= max.x && z >= min.y && z <= max.y) {
            return None;
        }

        let gx = (x - self.origin.x) / self.cell_size;
        let gz = (z - self.origin.y) / self.cell_size;
        let ix = (gx.floor() as usize).min(self.width - 2);
        let iz = (gz.floor() as usize).min(self.depth - 2);
        let tx = (gx - ix as f32).clamp(0.0, 1.0);
        let tz = (gz - iz as f32).clamp(0.0, 1.0);

        let h00 = self.at(ix, iz);
        let h10 = self.at(ix + 1, iz);
        let h01 = self.at(ix, iz + 1);
        let h11 = self.at(ix + 1, iz + 1);
        let near = h00 + (h10 - h00) * tx;
        let far = h01 + (h11 - h01) * tx;
        Some(near + (far - near) * tz)
    }
}

impl GroundProbe for HeightGrid {
    #[inline]
    fn probe_ground_height(&self, x: f32, z: f32) -> Option<f32> {
        self.height_at(x, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> HeightGrid {
        // height = x on a 3x3 lattice from (0, 0) to (2, 2)
        HeightGrid::try_new(
            Vec2::ZERO,
            1.0,
            3,
            3,
            vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0, 0.0, 1.0, 2.0],
        )
        .expect("valid grid")
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(HeightGrid::try_new(Vec2::ZERO, 1.0, 1, 3, vec![0.0; 3]).is_err());
        assert!(HeightGrid::try_new(Vec2::ZERO, 0.0, 2, 2, vec![0.0; 4]).is_err());
        assert!(HeightGrid::try_new(Vec2::ZERO, 1.0, 2, 2, vec![0.0; 3]).is_err());
    }

    #[test]
    fn samples_exact_lattice_points() {
        let g = ramp();
        assert_eq!(g.height_at(0.0, 0.0), Some(0.0));
        assert_eq!(g.height_at(2.0, 2.0), Some(2.0));
        assert_eq!(g.height_at(1.0, 2.0), Some(1.0));
    }

    #[test]
    fn interpolates_between_samples() {
        let g = ramp();
        let h = g.height_at(0.25, 1.7).expect("inside");
        assert!((h - 0.25).abs() < 1e-6);
    }

    #[test]
    fn outside_grid_is_a_miss() {
        let g = ramp();
        assert_eq!(g.probe_ground_height(-0.1, 1.0), None);
        assert_eq!(g.probe_ground_height(1.0, 2.1), None);
        assert_eq!(g.probe_ground_height(f32::NAN, 1.0), None);
    }

    #[test]
    fn from_fn_centers_the_grid() {
        let g = HeightGrid::from_fn(Vec2::ZERO, 0.5, 5, 5, |x, z| x + z).expect("valid grid");
        let (min, max) = g.bounds();
        assert_eq!(min, Vec2::new(-1.0, -1.0));
        assert_eq!(max, Vec2::new(1.0, 1.0));
        let h = g.height_at(0.3, -0.1).expect("inside");
        assert!((h - 0.2).abs() < 1e-5);
    }
}
