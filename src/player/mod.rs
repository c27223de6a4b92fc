mod animation;
mod combat;
mod control_params;
mod control_state;
mod input;
mod loader;
mod look;
mod system;

use crate::util::{Socket, SocketMap};
use bevy::asset::Handle;
use bevy::prelude::{Component, Entity};
pub use animation::*;
pub use combat::*;
pub use control_params::*;
pub use control_state::*;
pub use input::*;
pub use loader::*;
pub use look::*;
pub use system::*;

#[derive(Component, Debug)]
#[require(PlayerControlState, LookState, CombatState, Health, PlayerInput, AnimationParams)]
pub struct Player {
    pub params: Handle<PlayerControlParams>,
    /// distance from the body's origin down to its feet
    pub feet_offset: f32,
}

/// Entities making up the player's skeleton and equipment
#[derive(Component, Debug)]
pub struct PlayerRig {
    pub spine: Entity,
    pub weapon: Entity,
    pub muzzle: Entity,
    pub sockets: SocketMap<Entity>,
    /// the socket the weapon is currently parented to
    pub weapon_socket: Socket,
}

/// Tip of the weapon, where the laser starts
#[derive(Component, Debug)]
pub struct Muzzle;

/// Something that reacts to being shot
#[derive(Component, Default, Debug)]
pub struct Target {
    pub hits_taken: u32,
}

/// Colliders that hurt the player on contact
#[derive(Component, Debug)]
pub struct Hazard;
