use crate::player::{CombatState, Health, MovementState, PlayerControlState};
use bevy::color::Color;
use bevy::prelude::Component;

/// The single animation state the character should be showing
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AnimState {
    Locomotion { forward_speed: f32 },
    ChargingJump { charge: f32 },
    Airborne,
    Landing,
    Dead,
}

/// Everything a presentation layer needs to pick and blend clips.
/// Recomputed from the gameplay state every tick, never written to by anything else.
#[derive(Component, Debug, Copy, Clone, PartialEq)]
pub struct AnimationParams {
    pub state: AnimState,
    pub armed: bool,
    pub firing: bool,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            state: AnimState::Airborne,
            armed: false,
            firing: false,
        }
    }
}

impl AnimationParams {
    pub fn from_state(control: &PlayerControlState, combat: &CombatState, health: &Health) -> Self {
        let state = if health.is_dead() {
            AnimState::Dead
        } else {
            match control.movement {
                MovementState::Grounded => AnimState::Locomotion {
                    forward_speed: control.forward_speed,
                },
                MovementState::ChargingJump { charge } => AnimState::ChargingJump {
                    charge: charge.seconds(),
                },
                MovementState::Airborne => AnimState::Airborne,
                MovementState::Landing => AnimState::Landing,
            }
        };
        Self {
            state,
            armed: combat.armed,
            firing: combat.firing,
        }
    }

    /// Debug tint for the placeholder body mesh
    pub fn debug_color(&self) -> Color {
        match self.state {
            AnimState::Locomotion { .. } if self.armed => Color::srgb(0.9, 0.4, 0.1),
            AnimState::Locomotion { .. } => Color::srgb(1.0, 0.5, 0.0),
            AnimState::ChargingJump { .. } => Color::srgb(1.0, 0.85, 0.1),
            AnimState::Airborne => Color::srgb(0.3, 0.6, 1.0),
            AnimState::Landing => Color::srgb(0.5, 0.9, 0.5),
            AnimState::Dead => Color::srgb(0.25, 0.25, 0.25),
        }
    }
}
