use crate::player::{PlayerControlParams, PlayerInput};
use crate::util::{ChargeMeter, Cooldown, GroundSensor, PhysicsProbe};
use bevy::log::debug;
use bevy::math::{Vec2, Vec3};
use bevy::prelude::Component;

/// Where the player is in the ground -> charge -> air -> landing loop
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub enum MovementState {
    /// standing or running on the ground
    Grounded,

    /// jump input is held while grounded; the meter grows each tick
    ChargingJump { charge: ChargeMeter },

    /// not touching the ground, either after a launch or after walking off a ledge.
    /// The player spawns in this state and settles onto the ground on the first ticks.
    #[default]
    Airborne,

    /// touched down recently; becomes `Grounded` once the landing time has passed
    Landing,
}

impl MovementState {
    /// Whether the player's own movement input should drive their horizontal velocity
    pub fn has_footing(&self) -> bool {
        !matches!(self, MovementState::Airborne)
    }
}

#[derive(Component, Default, Debug)]
pub struct PlayerControlState {
    pub movement: MovementState,

    /// signed speed along the player's forward direction (negative means backing up)
    pub forward_speed: f32,

    /// the speed that `forward_speed` is approaching, derived from the move input
    pub desired_speed: f32,

    /// a single ray below the player's feet
    pub ground_sensor: GroundSensor,

    /// ground hits are ignored while this is running, so a launch isn't immediately
    /// undone by the ray still touching the floor we are leaving
    pub launch_grace: Cooldown,

    /// time remaining in the `Landing` state
    pub landing: Cooldown,
}

/// World-space pose of the player, as seen by the controller
#[derive(Debug, Copy, Clone)]
pub struct MotorPose {
    pub feet: Vec3,
    pub forward: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Launch {
    /// charge multiplier, always within the configured `[min_scale, max_scale]`
    pub scale: f32,
    pub impulse: Vec3,
}

/// What happened during a single [PlayerControlState::tick]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct MotorOutput {
    /// radians to rotate around +Y this tick
    pub yaw_delta: f32,
    pub launched: Option<Launch>,
    pub landed: bool,
}

impl PlayerControlState {
    pub fn is_grounded(&self) -> bool {
        self.ground_sensor.is_grounded()
    }

    /// Advance the controller by `dt` seconds.
    ///
    /// When `frozen` is set (the player is dead) the move and jump inputs are ignored,
    /// but the ground is still checked so the body can settle.
    pub fn tick<P: PhysicsProbe + ?Sized>(
        &mut self,
        input: &PlayerInput,
        frozen: bool,
        params: &PlayerControlParams,
        pose: MotorPose,
        probe: &mut P,
        dt: f32,
    ) -> MotorOutput {
        let mut output = MotorOutput::default();

        self.launch_grace.tick(dt);
        self.landing.tick(dt);

        let grounded = if self.launch_grace.is_ready() {
            self.ground_sensor
                .update(probe, pose.feet, params.ground.probe_offset, params.ground.probe_length)
                .is_some()
        } else {
            self.ground_sensor.hit = None;
            false
        };

        let move_axis = if frozen { Vec2::ZERO } else { input.move_axis };
        let m = &params.movement;
        self.desired_speed = desired_forward_speed(move_axis, m.max_forward_speed);
        let rate = if has_move_input(move_axis) {
            m.acceleration
        } else {
            m.deceleration
        };
        self.forward_speed = move_towards(self.forward_speed, self.desired_speed, rate * dt);

        // positive sideways input turns right, which is clockwise seen from above
        output.yaw_delta = -move_axis.x * m.turn_speed.to_radians() * dt;

        self.movement = match self.movement {
            MovementState::Grounded if !grounded => MovementState::Airborne,
            MovementState::Grounded if !frozen && input.jump.just_pressed() => {
                debug!("charging jump");
                MovementState::ChargingJump {
                    charge: ChargeMeter::default(),
                }
            }
            MovementState::Grounded => MovementState::Grounded,

            MovementState::ChargingJump { .. } if !grounded => {
                debug!("lost the ground while charging a jump");
                MovementState::Airborne
            }
            MovementState::ChargingJump { .. } if frozen => MovementState::Grounded,
            MovementState::ChargingJump { mut charge } if input.jump.is_pressed() => {
                charge.charge(dt);
                MovementState::ChargingJump { charge }
            }
            MovementState::ChargingJump { charge } => {
                let launch = self.launch(charge, params, pose);
                debug!("launching with scale {} after {}s of charge", launch.scale, charge.seconds());
                probe.apply_impulse(launch.impulse);
                output.launched = Some(launch);
                MovementState::Airborne
            }

            MovementState::Airborne if grounded => {
                self.landing.reset(params.jump.landing_time);
                output.landed = true;
                MovementState::Landing
            }
            MovementState::Airborne => MovementState::Airborne,

            MovementState::Landing if !grounded => MovementState::Airborne,
            MovementState::Landing if self.landing.is_ready() => MovementState::Grounded,
            MovementState::Landing => MovementState::Landing,
        };

        output
    }

    fn launch(&mut self, charge: ChargeMeter, params: &PlayerControlParams, pose: MotorPose) -> Launch {
        let jump = &params.jump;
        let scale = charge.scale(jump.charge_rate, jump.min_scale, jump.max_scale);
        let horizontal = pose.forward.with_y(0.0).normalize_or_zero();
        let impulse =
            Vec3::Y * jump.impulse * scale + horizontal * self.forward_speed * jump.forward_impulse;

        self.launch_grace.reset(jump.launch_grace);
        self.ground_sensor.hit = None;
        Launch { scale, impulse }
    }
}

fn has_move_input(move_axis: Vec2) -> bool {
    move_axis.length_squared() > f32::EPSILON
}

/// Speed the player wants to reach for the given move input.
///
/// The input magnitude is capped at 1, and the direction comes from the forward
/// component alone: pure sideways input still walks forward while turning.
fn desired_forward_speed(move_axis: Vec2, max_forward_speed: f32) -> f32 {
    let magnitude = move_axis.length().min(1.0);
    let direction = if move_axis.y < 0.0 { -1.0 } else { 1.0 };
    magnitude * max_forward_speed * direction
}

/// Step `current` towards `target` by at most `max_delta`, never overshooting
fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let goal_delta = target - current;
    if goal_delta.abs() <= max_delta {
        target
    } else {
        current + max_delta * goal_delta.signum()
    }
}
