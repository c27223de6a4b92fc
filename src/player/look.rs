use crate::player::LookControlParams;
use bevy::math::{Quat, Vec2};
use bevy::prelude::Component;

/// Marks the bone that bends to follow the player's aim
#[derive(Component, Debug)]
pub struct SpineBone;

/// Accumulated aim of the player's upper body
#[derive(Component, Default, Debug, Copy, Clone, PartialEq)]
pub struct LookState {
    /// radians, positive looks up
    pub pitch: f32,
}

impl LookState {
    /// Accumulate a look delta. Returns the yaw (radians around +Y) the body should turn by;
    /// the pitch stays on the spine and is clamped to `±max_pitch`.
    pub fn apply(&mut self, look_axis: Vec2, params: &LookControlParams) -> f32 {
        self.pitch = (self.pitch + look_axis.y * params.sensitivity).clamp(-params.max_pitch, params.max_pitch);
        -look_axis.x * params.sensitivity
    }

    /// Local rotation of the spine bone
    pub fn spine_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch)
    }
}
