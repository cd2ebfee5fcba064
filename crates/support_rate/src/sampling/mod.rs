//! Candidate drawing over the rectangular spawn area.
//!
//! The placement sampler asks a [`CandidateSampling`] strategy for one planar point per attempt
//! and decides acceptance itself, so strategies stay stateless and cheap.
use mint::Vector2;
use rand::Rng;

pub mod uniform_rect;

pub use uniform_rect::UniformRectSampling;

/// Trait for drawing a single candidate point in an area centered on the origin.
///
/// `area_extent.x` is the width (world X) and `area_extent.y` the length (world Z).
pub trait CandidateSampling: Send + Sync {
    fn draw(&self, area_extent: Vector2<f32>, rng: &mut dyn Rng) -> Vector2<f32>;
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn Rng) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn rand01_stays_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..1000 {
            let v = rand01(&mut rng);
            assert!((0.0..=1.0).contains(&v), "rand01 produced {v}");
        }
    }

    #[test]
    fn rand01_is_deterministic_per_seed() {
        let mut a = StdRng::seed_from_u64(77);
        let mut b = StdRng::seed_from_u64(77);
        let va: Vec<f32> = (0..16).map(|_| rand01(&mut a)).collect();
        let vb: Vec<f32> = (0..16).map(|_| rand01(&mut b)).collect();
        assert_eq!(va, vb);
    }
}
