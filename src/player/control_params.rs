use bevy::prelude::{Asset, Component, TypePath};
use serde::Deserialize;
use thiserror::Error;

#[derive(Asset, Copy, Clone, Component, Debug, Deserialize, TypePath)]
pub struct PlayerControlParams {
    #[serde(rename = "move")]
    pub movement: MoveControlParams,
    pub jump: JumpControlParams,
    pub ground: GroundProbeParams,
    pub look: LookControlParams,
    pub combat: CombatControlParams,
    pub health: HealthParams,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct MoveControlParams {
    pub max_forward_speed: f32,
    /// rate (units/s²) at which forward speed approaches the desired speed while there is move input
    pub acceleration: f32,
    /// rate (units/s²) used when there is no move input
    pub deceleration: f32,
    /// degrees per second at full sideways input
    pub turn_speed: f32,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct JumpControlParams {
    /// vertical impulse at a scale of 1
    pub impulse: f32,
    /// how much scale is gained per second of holding the jump input
    pub charge_rate: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// horizontal impulse per unit of forward speed at launch
    pub forward_impulse: f32,
    /// seconds after a launch during which ground hits are ignored
    pub launch_grace: f32,
    /// seconds spent in the landing state before the player is grounded again
    pub landing_time: f32,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct GroundProbeParams {
    pub probe_offset: f32,
    pub probe_length: f32,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct LookControlParams {
    /// radians per unit of look input
    pub sensitivity: f32,
    pub max_pitch: f32,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct CombatControlParams {
    pub laser_range: f32,
    pub fire_cooldown: f32,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct HealthParams {
    pub max: u32,
    pub contact_damage: u32,
}

/// Upper bound on how much a fully charged jump can multiply the base impulse
pub const MAX_JUMP_SCALE: f32 = 3.0;

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("`{0}` must be greater than zero")]
    NotPositive(&'static str),

    #[error("`{0}` must not be negative")]
    Negative(&'static str),

    #[error("jump scale range [{min}, {max}] is invalid; expected 1 <= min <= max <= 3")]
    JumpScaleRange { min: f32, max: f32 },
}

impl PlayerControlParams {
    /// Rejects parameter sets that would make the controller misbehave,
    /// e.g. a jump that could launch with less than its base impulse.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = [
            ("move.max_forward_speed", self.movement.max_forward_speed),
            ("move.acceleration", self.movement.acceleration),
            ("move.deceleration", self.movement.deceleration),
            ("jump.impulse", self.jump.impulse),
            ("ground.probe_length", self.ground.probe_length),
            ("combat.laser_range", self.combat.laser_range),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ParamsError::NotPositive(name));
            }
        }

        let non_negative = [
            ("move.turn_speed", self.movement.turn_speed),
            ("jump.charge_rate", self.jump.charge_rate),
            ("jump.forward_impulse", self.jump.forward_impulse),
            ("jump.launch_grace", self.jump.launch_grace),
            ("jump.landing_time", self.jump.landing_time),
            ("ground.probe_offset", self.ground.probe_offset),
            ("look.sensitivity", self.look.sensitivity),
            ("look.max_pitch", self.look.max_pitch),
            ("combat.fire_cooldown", self.combat.fire_cooldown),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ParamsError::Negative(name));
            }
        }

        let JumpControlParams { min_scale, max_scale, .. } = self.jump;
        if !(min_scale >= 1.0 && min_scale <= max_scale && max_scale <= MAX_JUMP_SCALE) {
            return Err(ParamsError::JumpScaleRange {
                min: min_scale,
                max: max_scale,
            });
        }

        if self.health.max == 0 {
            return Err(ParamsError::NotPositive("health.max"));
        }
        if self.health.contact_damage == 0 {
            return Err(ParamsError::NotPositive("health.contact_damage"));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn shipped_params() -> PlayerControlParams {
        ron::from_str(include_str!("../../assets/player.ron")).expect("player.ron parses")
    }

    #[test]
    fn shipped_params_are_valid() {
        let params = shipped_params();
        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.movement.max_forward_speed, 8.0);
        assert_eq!(params.jump.min_scale, 1.0);
        assert_eq!(params.jump.max_scale, 3.0);
        assert_eq!(params.health.max, 100);
    }

    #[test]
    fn rejects_inverted_jump_scale() {
        let mut params = shipped_params();
        params.jump.min_scale = 4.0;
        assert_eq!(
            params.validate(),
            Err(ParamsError::JumpScaleRange { min: 4.0, max: 3.0 })
        );
    }

    #[test]
    fn rejects_scale_above_three() {
        let mut params = shipped_params();
        params.jump.max_scale = 10.0;
        let err = params.validate().unwrap_err();
        assert_eq!(err, ParamsError::JumpScaleRange { min: 1.0, max: 10.0 });
        assert!(err.to_string().contains("expected 1 <= min <= max <= 3"));

        params.jump.max_scale = MAX_JUMP_SCALE;
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn rejects_scale_below_one() {
        let mut params = shipped_params();
        params.jump.min_scale = 0.5;
        assert!(matches!(params.validate(), Err(ParamsError::JumpScaleRange { .. })));
    }

    #[test]
    fn rejects_zero_damage_and_nan_speed() {
        let mut params = shipped_params();
        params.health.contact_damage = 0;
        assert_eq!(
            params.validate(),
            Err(ParamsError::NotPositive("health.contact_damage"))
        );

        let mut params = shipped_params();
        params.movement.max_forward_speed = f32::NAN;
        assert_eq!(
            params.validate(),
            Err(ParamsError::NotPositive("move.max_forward_speed"))
        );
    }
}
