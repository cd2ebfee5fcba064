//! Third-person orbit camera that trails the player.
use glam::{EulerRot, Quat, Vec2, Vec3};

use crate::error::{Error, Result};

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CameraConfig {
    /// Distance behind the player.
    pub distance: f32,
    /// Extra height above the orbit point.
    pub height: f32,
    /// Follow smoothing rate; the lerp factor per frame is `smooth_speed * dt`.
    pub smooth_speed: f32,
    /// Degrees of orbit per unit of drag.
    pub sensitivity: f32,
    pub min_pitch_deg: f32,
    pub max_pitch_deg: f32,
    /// Height above the player's feet the camera looks at.
    pub look_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 5.0,
            height: 3.0,
            smooth_speed: 5.0,
            sensitivity: 0.2,
            min_pitch_deg: -20.0,
            max_pitch_deg: 60.0,
            look_height: 1.5,
        }
    }
}

impl CameraConfig {
    pub fn with_distance(mut self, distance: f32, height: f32) -> Self {
        self.distance = distance;
        self.height = height;
        self
    }

    pub fn with_pitch_limits(mut self, min_pitch_deg: f32, max_pitch_deg: f32) -> Self {
        self.min_pitch_deg = min_pitch_deg;
        self.max_pitch_deg = max_pitch_deg;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_pitch_deg > self.max_pitch_deg {
            return Err(Error::InvalidConfig(
                "min_pitch_deg must be <= max_pitch_deg".into(),
            ));
        }
        if !self.smooth_speed.is_finite() || self.smooth_speed < 0.0 {
            return Err(Error::InvalidConfig("smooth_speed must be >= 0".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    config: CameraConfig,
    yaw_deg: f32,
    pitch_deg: f32,
    position: Vec3,
    look_target: Vec3,
}

impl OrbitCamera {
    /// Initial pose: behind and above the origin, looking at the player start.
    pub const START_POSITION: Vec3 = Vec3::new(0.0, 5.0, -7.0);

    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            yaw_deg: 0.0,
            pitch_deg: 20.0_f32.max(config.min_pitch_deg).min(config.max_pitch_deg),
            position: Self::START_POSITION,
            look_target: Vec3::Y * config.look_height,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_target(&self) -> Vec3 {
        self.look_target
    }

    pub fn yaw_deg(&self) -> f32 {
        self.yaw_deg
    }

    pub fn pitch_deg(&self) -> f32 {
        self.pitch_deg
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        (self.look_target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::Z)
    }

    /// Unit right vector for the current view.
    pub fn right(&self) -> Vec3 {
        Vec3::Y.cross(self.forward()).try_normalize().unwrap_or(Vec3::X)
    }

    /// Applies a drag delta: `x` turns, `y` tilts (dragging up lowers the camera).
    pub fn orbit(&mut self, drag: Vec2) {
        if !drag.is_finite() {
            return;
        }
        self.yaw_deg += drag.x * self.config.sensitivity;
        self.pitch_deg = (self.pitch_deg - drag.y * self.config.sensitivity)
            .max(self.config.min_pitch_deg)
            .min(self.config.max_pitch_deg);
    }

    /// Where the camera wants to be for a player standing at `player`.
    pub fn desired_position(&self, player: Vec3) -> Vec3 {
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            self.yaw_deg.to_radians(),
            self.pitch_deg.to_radians(),
            0.0,
        );
        let mut offset = rotation * Vec3::new(0.0, 0.0, -self.config.distance);
        offset.y += self.config.height;
        player + offset
    }

    /// Eases toward [`Self::desired_position`] and re-aims at the player.
    pub fn follow(&mut self, dt: f32, player: Vec3) {
        let t = (self.config.smooth_speed * dt).clamp(0.0, 1.0);
        self.position = self.position.lerp(self.desired_position(player), t);
        self.look_target = player + Vec3::Y * self.config.look_height;
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }
}
