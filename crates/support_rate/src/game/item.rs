//! Collectible pickup items: spin, bob and pickup detection.
use glam::{Quat, Vec3};

use crate::error::{Error, Result};

/// Per-item tuning shared by every spawned item.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemConfig {
    /// Points credited on pickup.
    pub point_value: u32,
    /// Spin around the vertical axis, in degrees per second.
    pub spin_speed_deg: f32,
    /// Bob frequency in radians per second.
    pub bob_speed: f32,
    /// Bob amplitude in world units.
    pub bob_height: f32,
    /// Trigger sphere radius.
    pub trigger_radius: f32,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            point_value: 10,
            spin_speed_deg: 100.0,
            bob_speed: 2.0,
            bob_height: 0.3,
            trigger_radius: 0.25,
        }
    }
}

impl ItemConfig {
    pub fn with_point_value(mut self, point_value: u32) -> Self {
        self.point_value = point_value;
        self
    }

    pub fn with_bob(mut self, bob_speed: f32, bob_height: f32) -> Self {
        self.bob_speed = bob_speed;
        self.bob_height = bob_height;
        self
    }

    pub fn with_trigger_radius(mut self, trigger_radius: f32) -> Self {
        self.trigger_radius = trigger_radius;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let finite = self.spin_speed_deg.is_finite()
            && self.bob_speed.is_finite()
            && self.bob_height.is_finite();
        if !finite {
            return Err(Error::InvalidConfig(
                "item animation values must be finite".into(),
            ));
        }
        if !self.trigger_radius.is_finite() || self.trigger_radius < 0.0 {
            return Err(Error::InvalidConfig(
                "trigger_radius must be finite and >= 0".into(),
            ));
        }
        Ok(())
    }
}

/// A pickup resting at a placed position.
#[derive(Debug, Clone)]
pub struct CollectibleItem {
    config: ItemConfig,
    base_position: Vec3,
    position: Vec3,
    yaw_deg: f32,
    collected: bool,
}

impl CollectibleItem {
    pub fn new(base_position: Vec3, config: ItemConfig) -> Self {
        Self {
            config,
            base_position,
            position: base_position,
            yaw_deg: 0.0,
            collected: false,
        }
    }

    /// Where the item was placed.
    pub fn base_position(&self) -> Vec3 {
        self.base_position
    }

    /// Current animated position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw_deg(&self) -> f32 {
        self.yaw_deg
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw_deg.to_radians())
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn trigger_radius(&self) -> f32 {
        self.config.trigger_radius
    }

    /// Advances the animation. `elapsed` is the round time used for the bob phase.
    pub fn update(&mut self, dt: f32, elapsed: f32) {
        if self.collected {
            return;
        }
        self.yaw_deg = (self.yaw_deg + self.config.spin_speed_deg * dt).rem_euclid(360.0);
        self.position.y =
            self.base_position.y + (elapsed * self.config.bob_speed).sin() * self.config.bob_height;
    }

    /// Marks the item collected and returns its points, or `None` if it was already taken.
    pub fn collect(&mut self) -> Option<u32> {
        if self.collected {
            return None;
        }
        self.collected = true;
        Some(self.config.point_value)
    }
}
