//! Ground-height probes.
//!
//! Placement and player motion rest things on the surface through [`GroundProbe`]:
//! - Use [`FlatGround`] for a level arena and [`NoGround`] when no surface exists.
//! - Wrap any closure with [`FnProbe`].
//! - Sample authored terrain with [`HeightGrid`].
use std::sync::Arc;

pub mod height_grid;

pub use height_grid::HeightGrid;

/// Query for the surface elevation beneath a horizontal coordinate.
///
/// Returning `None` means "no surface here"; callers fall back to a default height.
pub trait GroundProbe: Send + Sync {
    fn probe_ground_height(&self, x: f32, z: f32) -> Option<f32>;
}

impl<T: GroundProbe + ?Sized> GroundProbe for &T {
    #[inline]
    fn probe_ground_height(&self, x: f32, z: f32) -> Option<f32> {
        (**self).probe_ground_height(x, z)
    }
}

impl<T: GroundProbe + ?Sized> GroundProbe for Box<T> {
    #[inline]
    fn probe_ground_height(&self, x: f32, z: f32) -> Option<f32> {
        (**self).probe_ground_height(x, z)
    }
}

impl<T: GroundProbe + ?Sized> GroundProbe for Arc<T> {
    #[inline]
    fn probe_ground_height(&self, x: f32, z: f32) -> Option<f32> {
        (**self).probe_ground_height(x, z)
    }
}

/// Infinite level plane.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatGround {
    pub height: f32,
}

impl FlatGround {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl GroundProbe for FlatGround {
    #[inline]
    fn probe_ground_height(&self, _x: f32, _z: f32) -> Option<f32> {
        Some(self.height)
    }
}

/// Probe that never finds a surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGround;

impl GroundProbe for NoGround {
    #[inline]
    fn probe_ground_height(&self, _x: f32, _z: f32) -> Option<f32> {
        None
    }
}

/// Adapter turning a closure into a [`GroundProbe`].
pub struct FnProbe<F>
where
    F: Fn(f32, f32) -> Option<f32> + Send + Sync,
{
    f: F,
}

impl<F> FnProbe<F>
where
    F: Fn(f32, f32) -> Option<f32> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> GroundProbe for FnProbe<F>
where
    F: Fn(f32, f32) -> Option<f32> + Send + Sync,
{
    #[inline]
    fn probe_ground_height(&self, x: f32, z: f32) -> Option<f32> {
        (self.f)(x, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_ground_reports_its_height_everywhere() {
        let g = FlatGround::new(2.5);
        assert_eq!(g.probe_ground_height(0.0, 0.0), Some(2.5));
        assert_eq!(g.probe_ground_height(-1e6, 3e5), Some(2.5));
    }

    #[test]
    fn no_ground_never_hits() {
        assert_eq!(NoGround.probe_ground_height(1.0, 1.0), None);
    }

    #[test]
    fn fn_probe_forwards_to_closure() {
        let ramp = FnProbe::new(|x, _z| (x >= 0.0).then_some(x * 0.5));
        assert_eq!(ramp.probe_ground_height(4.0, 0.0), Some(2.0));
        assert_eq!(ramp.probe_ground_height(-1.0, 0.0), None);
    }

    #[test]
    fn smart_pointers_forward() {
        let boxed: Box<dyn GroundProbe> = Box::new(FlatGround::new(1.0));
        let shared: Arc<dyn GroundProbe> = Arc::new(NoGround);
        assert_eq!(boxed.probe_ground_height(0.0, 0.0), Some(1.0));
        assert_eq!(shared.probe_ground_height(0.0, 0.0), None);
        assert_eq!((&boxed).probe_ground_height(0.0, 0.0), Some(1.0));
    }
}
