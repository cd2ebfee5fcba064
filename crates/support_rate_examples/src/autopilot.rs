use glam::Vec2;
use support_rate::prelude::*;

use crate::rendering::planar;

/// Joystick input that walks the player straight at the nearest remaining item.
pub fn chase_nearest_item<P: GroundProbe>(world: &GameWorld<P>) -> FrameInput {
    let player = planar(world.player().position());
    let Some(target) = world
        .remaining_items()
        .map(|item| planar(item.position()))
        .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)))
    else {
        return FrameInput::default();
    };

    let to = (target - player).normalize_or_zero();
    let forward = planar(world.camera().forward()).normalize_or_zero();
    let right = planar(world.camera().right()).normalize_or_zero();
    FrameInput::joystick(Vec2::new(to.dot(right), to.dot(forward)))
}
