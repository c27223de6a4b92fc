/// A cooldown timer, measured in seconds.
/// By default, the timer is "ready".
/// The timer can be `reset` to a specified duration, so that it will not be ready again
/// until [Cooldown::tick] has been called with at least that much elapsed time.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct Cooldown(f32);

impl Cooldown {
	/// Put the associated action "on cooldown" for the specified duration
	pub fn reset(&mut self, duration: f32) {
		self.0 = duration.max(0.0);
	}

	/// Advance the cooldown timer, possibly causing the associated action to become "ready"
	pub fn tick(&mut self, dt: f32) {
		self.0 = (self.0 - dt).max(0.0);
	}

	/// Check if the associated action is ready, i.e. "off cooldown"
	pub fn is_ready(&self) -> bool {
		self.0 <= 0.0
	}

	/// Seconds until the cooldown is ready
	pub fn remaining(&self) -> f32 {
		self.0
	}
}

/// Accumulates how long an input has been held, e.g. the "effort" put into a jump.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct ChargeMeter(f32);

impl ChargeMeter {
	/// Add `dt` seconds of charge
	pub fn charge(&mut self, dt: f32) {
		self.0 += dt.max(0.0);
	}

	/// Seconds of charge accumulated so far
	pub fn seconds(&self) -> f32 {
		self.0
	}

	/// Converts the accumulated charge into a multiplier, clamped to `[min, max]`
	/// regardless of how long the input was held.
	pub fn scale(&self, rate: f32, min: f32, max: f32) -> f32 {
		(self.0 * rate).clamp(min, max)
	}

	/// Empty the meter, returning the charge it held
	pub fn take(&mut self) -> f32 {
		std::mem::take(&mut self.0)
	}
}

/// A scalar input action (like a trigger or a key) that remembers its value from the
/// previous tick, so that presses and releases can be told apart from holds.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct ActionButton {
	pressed: bool,
	was_pressed: bool,
}

impl ActionButton {
	/// Values above this count as "pressed"
	pub const PRESS_THRESHOLD: f32 = 0.5;

	/// Feed the action's current scalar value for this tick
	pub fn tick(&mut self, value: f32) {
		self.was_pressed = self.pressed;
		self.pressed = value > Self::PRESS_THRESHOLD;
	}

	/// Check if the action is *currently* held
	pub fn is_pressed(&self) -> bool {
		self.pressed
	}

	pub fn just_pressed(&self) -> bool {
		self.pressed && !self.was_pressed
	}

	pub fn just_released(&self) -> bool {
		!self.pressed && self.was_pressed
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cooldown_is_ready_by_default() {
		assert!(Cooldown::default().is_ready());
	}

	#[test]
	fn cooldown_ticks_down_to_ready() {
		let mut cd = Cooldown::default();
		cd.reset(0.25);
		cd.tick(0.1);
		assert!(!cd.is_ready());
		cd.tick(0.1);
		assert!(!cd.is_ready());
		cd.tick(0.1);
		assert!(cd.is_ready());
		assert_eq!(cd.remaining(), 0.0);
	}

	#[test]
	fn charge_scale_is_clamped() {
		let mut meter = ChargeMeter::default();
		assert_eq!(meter.scale(2.0, 1.0, 3.0), 1.0);
		meter.charge(1.0);
		assert_eq!(meter.scale(2.0, 1.0, 3.0), 2.0);
		meter.charge(100.0);
		assert_eq!(meter.scale(2.0, 1.0, 3.0), 3.0);
		assert_eq!(meter.take(), 101.0);
		assert_eq!(meter.seconds(), 0.0);
	}

	#[test]
	fn negative_dt_does_not_drain_charge() {
		let mut meter = ChargeMeter::default();
		meter.charge(0.5);
		meter.charge(-1.0);
		assert_eq!(meter.seconds(), 0.5);
	}

	#[test]
	fn button_edges() {
		let mut b = ActionButton::default();
		b.tick(1.0);
		assert!(b.just_pressed());
		assert!(b.is_pressed());
		b.tick(1.0);
		assert!(!b.just_pressed());
		assert!(b.is_pressed());
		b.tick(0.0);
		assert!(b.just_released());
		b.tick(0.0);
		assert!(!b.just_released());
		assert!(!b.is_pressed());
	}
}
