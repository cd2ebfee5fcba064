//! Uniform random candidate drawing over a centered rectangle.
use mint::Vector2;
use rand::Rng;

use crate::sampling::{rand01, CandidateSampling};

/// Uniform i.i.d. point in `[-w/2, w/2] x [-l/2, l/2]`.
///
/// Non-positive or non-finite extents collapse to the center line on that axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRectSampling;

impl UniformRectSampling {
    pub fn new() -> Self {
        Self
    }
}

#[inline]
fn axis(extent: f32, u: f32) -> f32 {
    if !extent.is_finite() || extent <= 0.0 {
        return 0.0;
    }
    let half = extent * 0.5;
    (u * extent - half).clamp(-half, half)
}

impl CandidateSampling for UniformRectSampling {
    fn draw(&self, area_extent: Vector2<f32>, rng: &mut dyn Rng) -> Vector2<f32> {
        // Always consume two draws so the random stream advances identically for every area.
        let u = rand01(rng);
        let v = rand01(rng);
        Vector2 {
            x: axis(area_extent.x, u),
            y: axis(area_extent.y, v),
        }
    }
}
