use bevy::math::Vec3;
use bevy::prelude::Entity;

/// Result of a successful downward ray-cast
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GroundHit {
	pub entity: Entity,
	/// distance from the ray origin to the hit point
	pub distance: f32,
	pub point: Vec3,
}

/// The pieces of a physics world the player controller needs.
///
/// Implemented over Rapier in the player system, and by hand-written fakes in tests.
pub trait PhysicsProbe {
	/// Cast a ray straight down from `origin`, up to `max_distance`.
	/// `None` means nothing was hit, which the controller reads as "airborne".
	fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<GroundHit>;

	/// Apply an instantaneous impulse to the player's rigid body
	fn apply_impulse(&mut self, impulse: Vec3);
}

/// Describes the single ray projected below the player's feet to detect ground.
#[derive(Default, Debug, Copy, Clone)]
pub struct GroundSensor {
	/// the most recent hit, if any
	pub hit: Option<GroundHit>,
}

impl GroundSensor {
	/// Updates `hit` by casting from slightly above `feet`, so the ray doesn't start
	/// inside the ground when standing on it.
	pub fn update<P: PhysicsProbe + ?Sized>(
		&mut self,
		probe: &P,
		feet: Vec3,
		probe_offset: f32,
		probe_length: f32,
	) -> Option<GroundHit> {
		let origin = feet + Vec3::Y * probe_offset;
		self.hit = probe.cast_down(origin, probe_offset + probe_length);
		self.hit
	}

	pub fn is_grounded(&self) -> bool {
		self.hit.is_some()
	}
}
