use crate::util::ActionButton;
use bevy::math::Vec2;
use bevy::prelude::Component;

/// The latest value of every action the player can perform.
///
/// Written once per frame by the input system, read by everything else.
#[derive(Component, Default, Debug, Clone)]
pub struct PlayerInput {
    /// x: turn (positive is right), y: forward/backward
    pub move_axis: Vec2,

    /// look delta accumulated since the last frame; x: yaw, y: pitch (positive is up)
    pub look_axis: Vec2,

    pub jump: ActionButton,
    pub fire: ActionButton,
    pub armed_toggle: ActionButton,
    pub escape: ActionButton,
}

/// Raw scalar values for the button-like actions, before edge detection
#[derive(Default, Debug, Copy, Clone)]
pub struct ActionValues {
    pub jump: f32,
    pub fire: f32,
    pub armed_toggle: f32,
    pub escape: f32,
}

impl PlayerInput {
    /// Overwrite the axes and advance every button by one tick
    pub fn update(&mut self, move_axis: Vec2, look_axis: Vec2, values: ActionValues) {
        self.move_axis = move_axis;
        self.look_axis = look_axis;
        self.jump.tick(values.jump);
        self.fire.tick(values.fire);
        self.armed_toggle.tick(values.armed_toggle);
        self.escape.tick(values.escape);
    }
}
