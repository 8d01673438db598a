//! Pointer input tracking

use winit::event::MouseScrollDelta;
use crate::camera::WHEEL_NOTCH;
use crate::selection::PointerPosition;

/// Convert a winit scroll delta to wheel units, 120 per notch
///
/// Line deltas count notches; pixel deltas (touchpads) are already fine
/// grained and pass through rounded.
pub fn wheel_delta_units(delta: MouseScrollDelta) -> i32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => (y * WHEEL_NOTCH as f32).round() as i32,
        MouseScrollDelta::PixelDelta(position) => position.y.round() as i32,
    }
}

/// Remembers where the pointer last was over the render surface
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    pointer: PointerPosition,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer(&self) -> PointerPosition {
        self.pointer
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = PointerPosition::new(x, y);
    }

    pub fn pointer_left(&mut self) {
        self.pointer = PointerPosition::INVALID;
    }
}
