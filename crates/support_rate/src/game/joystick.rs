//! On-screen joystick: maps a pointer position to a stick vector in the unit disk.
use glam::Vec2;

#[derive(Debug, Clone)]
pub struct VirtualJoystick {
    center: Vec2,
    handle_range: f32,
    input: Vec2,
}

impl VirtualJoystick {
    pub const DEFAULT_HANDLE_RANGE: f32 = 50.0;

    pub fn new(center: Vec2) -> Self {
        Self::with_handle_range(center, Self::DEFAULT_HANDLE_RANGE)
    }

    pub fn with_handle_range(center: Vec2, handle_range: f32) -> Self {
        Self {
            center,
            handle_range,
            input: Vec2::ZERO,
        }
    }

    /// Pointer pressed: behaves like a drag to the same position.
    pub fn press(&mut self, pointer: Vec2) -> Vec2 {
        self.drag(pointer)
    }

    /// Pointer moved while pressed. Returns the new stick vector.
    pub fn drag(&mut self, pointer: Vec2) -> Vec2 {
        let direction = pointer - self.center;
        self.input = if self.handle_range <= 0.0 || direction.length() > self.handle_range {
            direction.normalize_or_zero()
        } else {
            direction / self.handle_range
        };
        self.input
    }

    /// Pointer released: the stick recenters.
    pub fn release(&mut self) -> Vec2 {
        self.input = Vec2::ZERO;
        self.input
    }

    pub fn input(&self) -> Vec2 {
        self.input
    }

    /// Handle offset from the center, in pointer units.
    pub fn handle_offset(&self) -> Vec2 {
        self.input * self.handle_range
    }
}
