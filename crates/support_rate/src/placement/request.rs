//! Placement request: spawn area, spacing rules and attempt budget.
use glam::Vec2;

use crate::error::{Error, Result};

/// Parameters for one spawn event.
///
/// Planar coordinates use `x` for world X and `y` for world Z.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementRequest {
    /// Area width along world X.
    pub area_width: f32,
    /// Area length along world Z.
    pub area_length: f32,
    /// Desired number of positions.
    pub count: usize,
    /// Minimum planar distance between any two accepted positions.
    pub min_separation: f32,
    /// Minimum distance from the world origin (the player start).
    ///
    /// Measured in 3D, so it includes the resolved item height: on ground raised at least this
    /// far above the origin, nothing is excluded.
    pub exclusion_radius: f32,
    /// Attempt budget is `count * attempts_multiplier`.
    pub attempts_multiplier: usize,
    /// World (x, z) of the area center.
    pub origin: Vec2,
    /// Height used when the ground probe finds no surface.
    pub fallback_height: f32,
    /// Lift applied on top of the ground (or fallback) height.
    pub vertical_offset: f32,
}

impl Default for PlacementRequest {
    fn default() -> Self {
        Self {
            area_width: 20.0,
            area_length: 20.0,
            count: 20,
            min_separation: 2.0,
            exclusion_radius: 3.0,
            attempts_multiplier: 10,
            origin: Vec2::ZERO,
            fallback_height: 0.0,
            vertical_offset: 1.0,
        }
    }
}

impl PlacementRequest {
    /// Creates a request for `count` positions in a `width x length` area with default spacing.
    pub fn new(area_width: f32, area_length: f32, count: usize) -> Self {
        Self {
            area_width,
            area_length,
            count,
            ..Default::default()
        }
    }

    /// Sets the area size.
    pub fn with_area(mut self, width: f32, length: f32) -> Self {
        self.area_width = width;
        self.area_length = length;
        self
    }

    /// Sets the desired count.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the minimum planar separation.
    pub fn with_min_separation(mut self, min_separation: f32) -> Self {
        self.min_separation = min_separation;
        self
    }

    /// Sets the exclusion radius around the world origin.
    pub fn with_exclusion_radius(mut self, exclusion_radius: f32) -> Self {
        self.exclusion_radius = exclusion_radius;
        self
    }

    /// Sets the attempts multiplier.
    pub fn with_attempts_multiplier(mut self, attempts_multiplier: usize) -> Self {
        self.attempts_multiplier = attempts_multiplier;
        self
    }

    /// Sets the area center in world (x, z).
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the fallback height.
    pub fn with_fallback_height(mut self, fallback_height: f32) -> Self {
        self.fallback_height = fallback_height;
        self
    }

    /// Sets the vertical offset.
    pub fn with_vertical_offset(mut self, vertical_offset: f32) -> Self {
        self.vertical_offset = vertical_offset;
        self
    }

    /// Area extent as (width, length).
    pub fn area_extent(&self) -> Vec2 {
        Vec2::new(self.area_width, self.area_length)
    }

    /// Total attempt budget, saturating on overflow.
    pub fn max_attempts(&self) -> usize {
        self.count.saturating_mul(self.attempts_multiplier)
    }

    /// Validates the request, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("area_width", self.area_width),
            ("area_length", self.area_length),
            ("min_separation", self.min_separation),
            ("exclusion_radius", self.exclusion_radius),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and >= 0 (got {value})"
                )));
            }
        }
        if self.attempts_multiplier < 1 {
            return Err(Error::InvalidConfig(
                "attempts_multiplier must be >= 1".into(),
            ));
        }
        if !self.origin.is_finite() {
            return Err(Error::InvalidConfig("origin must be finite".into()));
        }
        if !self.fallback_height.is_finite() || !self.vertical_offset.is_finite() {
            return Err(Error::InvalidConfig(
                "fallback_height and vertical_offset must be finite".into(),
            ));
        }

        Ok(())
    }
}
