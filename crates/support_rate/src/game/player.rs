//! Player character motion: input blending, camera-relative walking, gravity and facing.
use glam::{Quat, Vec2, Vec3, Vec3Swizzles};

use crate::error::{Error, Result};
use crate::game::camera::OrbitCamera;
use crate::terrain::GroundProbe;

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    /// Walking speed in units per second.
    pub move_speed: f32,
    /// Facing slerp rate; the factor per frame is `rotation_speed * dt`.
    pub rotation_speed: f32,
    /// Downward acceleration while airborne (negative).
    pub gravity: f32,
    /// Vertical velocity held while grounded, keeps the character pressed to the floor.
    pub grounded_velocity: f32,
    /// Capsule radius.
    pub radius: f32,
    /// Capsule height, feet to head.
    pub height: f32,
    /// Joystick magnitude below which keyboard axes are used instead.
    pub joystick_dead_zone: f32,
    /// Arena walls sit at `±arena_half_extent` on X and Z.
    pub arena_half_extent: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            rotation_speed: 10.0,
            gravity: -9.81,
            grounded_velocity: -2.0,
            radius: 0.5,
            height: 2.0,
            joystick_dead_zone: 0.1,
            arena_half_extent: 15.0,
        }
    }
}

impl PlayerConfig {
    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    pub fn with_arena_half_extent(mut self, arena_half_extent: f32) -> Self {
        self.arena_half_extent = arena_half_extent;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidConfig("player radius must be > 0".into()));
        }
        if !self.height.is_finite() || self.height < 2.0 * self.radius {
            return Err(Error::InvalidConfig(
                "player height must be >= 2 * radius".into(),
            ));
        }
        if !self.arena_half_extent.is_finite() || self.arena_half_extent <= self.radius {
            return Err(Error::InvalidConfig(
                "arena_half_extent must exceed the player radius".into(),
            ));
        }
        if !(self.move_speed.is_finite() && self.gravity.is_finite()) {
            return Err(Error::InvalidConfig(
                "move_speed and gravity must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Raw input for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Keyboard axes: `x` horizontal, `y` vertical, each in [-1, 1].
    pub keyboard: Vec2,
    /// Virtual joystick vector in the unit disk.
    pub joystick: Vec2,
    /// Camera drag delta for this frame.
    pub camera_drag: Vec2,
}

impl FrameInput {
    pub fn keyboard(axes: Vec2) -> Self {
        Self {
            keyboard: axes,
            ..Default::default()
        }
    }

    pub fn joystick(stick: Vec2) -> Self {
        Self {
            joystick: stick,
            ..Default::default()
        }
    }

    pub fn with_camera_drag(mut self, drag: Vec2) -> Self {
        self.camera_drag = drag;
        self
    }
}

/// Joystick wins over the keyboard once it leaves the dead zone.
pub fn blend_input(keyboard: Vec2, joystick: Vec2, dead_zone: f32) -> Vec2 {
    if joystick.length() > dead_zone {
        joystick
    } else {
        keyboard
    }
}

/// Walking direction on the ground plane for stick `axes` seen from a camera.
pub fn camera_relative_direction(camera_forward: Vec3, camera_right: Vec3, axes: Vec2) -> Vec3 {
    let forward = camera_forward.with_y(0.0).normalize_or_zero();
    let right = camera_right.with_y(0.0).normalize_or_zero();
    (forward * axes.y + right * axes.x).normalize_or_zero()
}

#[derive(Debug, Clone)]
pub struct Player {
    config: PlayerConfig,
    position: Vec3,
    rotation: Quat,
    vertical_velocity: f32,
    grounded: bool,
    move_direction: Vec3,
}

impl Player {
    pub fn new(config: PlayerConfig, position: Vec3) -> Self {
        Self {
            config,
            position,
            rotation: Quat::IDENTITY,
            vertical_velocity: 0.0,
            grounded: false,
            move_direction: Vec3::ZERO,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Feet position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn move_direction(&self) -> Vec3 {
        self.move_direction
    }

    /// Whether a sphere at `center` with `radius` overlaps the player's capsule.
    pub fn touches(&self, center: Vec3, radius: f32) -> bool {
        let r = self.config.radius;
        let bottom = self.position.y + r;
        let top = self.position.y + (self.config.height - r).max(r);
        let closest = Vec3::new(
            self.position.x,
            center.y.clamp(bottom, top),
            self.position.z,
        );
        closest.distance(center) <= r + radius
    }

    /// Advances one frame. `axes` are already-blended stick axes.
    pub fn update<P>(&mut self, dt: f32, axes: Vec2, camera: &OrbitCamera, probe: &P)
    where
        P: GroundProbe + ?Sized,
    {
        self.move_direction = camera_relative_direction(camera.forward(), camera.right(), axes);

        if self.grounded {
            self.vertical_velocity = self.config.grounded_velocity;
        } else {
            self.vertical_velocity += self.config.gravity * dt;
        }

        let mut velocity = self.move_direction * self.config.move_speed;
        velocity.y = self.vertical_velocity;
        let mut next = self.position + velocity * dt;

        let limit = self.config.arena_half_extent - self.config.radius;
        let planar = next.xz().clamp(Vec2::splat(-limit), Vec2::splat(limit));
        next.x = planar.x;
        next.z = planar.y;

        // No surface under the player means it keeps falling.
        match probe.probe_ground_height(next.x, next.z) {
            Some(ground) if next.y <= ground => {
                next.y = ground;
                self.grounded = true;
            }
            _ => self.grounded = false,
        }
        self.position = next;

        if self.move_direction.length() > 0.1 {
            let yaw = self.move_direction.x.atan2(self.move_direction.z);
            let target = Quat::from_rotation_y(yaw);
            let t = (self.config.rotation_speed * dt).clamp(0.0, 1.0);
            self.rotation = self.rotation.slerp(target, t);
        }
    }

    /// Puts the player back at `position`, standing still.
    pub fn reset(&mut self, position: Vec3) {
        *self = Self::new(self.config, position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::camera::CameraConfig;
    use crate::terrain::{FlatGround, NoGround};

    const EPS: f32 = 1e-4;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(CameraConfig::default())
    }

    #[test]
    fn joystick_overrides_keyboard_outside_dead_zone() {
        let kb = Vec2::new(1.0, 0.0);
        assert_eq!(blend_input(kb, Vec2::new(0.0, 0.05), 0.1), kb);
        assert_eq!(
            blend_input(kb, Vec2::new(0.0, 0.5), 0.1),
            Vec2::new(0.0, 0.5)
        );
    }

    #[test]
    fn direction_is_flattened_and_normalized() {
        let forward = Vec3::new(0.0, -0.6, 0.8);
        let right = Vec3::X;
        let d = camera_relative_direction(forward, right, Vec2::new(0.0, 1.0));
        assert!((d - Vec3::Z).length() < EPS);

        let d = camera_relative_direction(forward, right, Vec2::new(1.0, 1.0));
        assert!((d.length() - 1.0).abs() < EPS);
        assert_eq!(d.y, 0.0);

        assert_eq!(
            camera_relative_direction(forward, right, Vec2::ZERO),
            Vec3::ZERO
        );
    }

    #[test]
    fn walks_forward_on_flat_ground() {
        let mut p = Player::new(PlayerConfig::default(), Vec3::ZERO);
        let cam = camera();
        for _ in 0..10 {
            p.update(0.1, Vec2::new(0.0, 1.0), &cam, &FlatGround::new(0.0));
        }
        assert!((p.position().z - 5.0).abs() < 1e-3);
        assert!(p.position().x.abs() < EPS);
        assert_eq!(p.position().y, 0.0);
        assert!(p.is_grounded());
        assert_eq!(p.vertical_velocity(), -2.0);
    }

    #[test]
    fn falls_without_ground() {
        let mut p = Player::new(PlayerConfig::default(), Vec3::new(0.0, 10.0, 0.0));
        p.update(1.0, Vec2::ZERO, &camera(), &NoGround);
        assert!(!p.is_grounded());
        assert!((p.vertical_velocity() + 9.81).abs() < EPS);
        assert!((p.position().y - 0.19).abs() < EPS);
    }

    #[test]
    fn lands_on_ground_below() {
        let mut p = Player::new(PlayerConfig::default(), Vec3::new(0.0, 0.5, 0.0));
        p.update(0.5, Vec2::ZERO, &camera(), &FlatGround::new(0.0));
        assert!(p.is_grounded());
        assert_eq!(p.position().y, 0.0);
    }

    #[test]
    fn arena_walls_clamp_position() {
        let mut p = Player::new(PlayerConfig::default(), Vec3::ZERO);
        for _ in 0..100 {
            p.update(0.1, Vec2::new(1.0, 0.0), &camera(), &FlatGround::new(0.0));
        }
        assert!((p.position().x - 14.5).abs() < EPS);
    }

    #[test]
    fn turns_toward_movement() {
        let mut p = Player::new(PlayerConfig::default(), Vec3::ZERO);
        p.update(1.0, Vec2::new(1.0, 0.0), &camera(), &FlatGround::new(0.0));
        assert!((p.forward() - Vec3::X).length() < 1e-3);
    }

    #[test]
    fn capsule_touch_test() {
        let p = Player::new(PlayerConfig::default(), Vec3::ZERO);
        assert!(p.touches(Vec3::new(0.6, 1.0, 0.0), 0.25));
        assert!(!p.touches(Vec3::new(0.8, 1.0, 0.0), 0.25));
        assert!(p.touches(Vec3::new(0.0, 2.2, 0.0), 0.25));
        assert!(!p.touches(Vec3::new(0.0, 2.3, 0.0), 0.25));
    }

    #[test]
    fn validate_rejects_bad_capsule() {
        let mut config = PlayerConfig::default();
        config.height = 0.5;
        assert!(config.validate().is_err());
        assert!(PlayerConfig::default()
            .with_arena_half_extent(0.1)
            .validate()
            .is_err());
    }
}
