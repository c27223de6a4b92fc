use crate::util::{Cooldown, Socket};
use bevy::math::Vec3;
use bevy::prelude::{Component, Entity};

/// Where the laser pointer ended up this tick
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LaserHit {
    pub entity: Entity,
    pub point: Vec3,
    /// whether `entity` is something that reacts to being shot
    pub is_target: bool,
}

#[derive(Component, Default, Debug)]
pub struct CombatState {
    /// gates the laser pointer and the fire trigger
    pub armed: bool,

    /// true for the tick in which a shot went off
    pub firing: bool,

    pub fire_cooldown: Cooldown,

    /// the result of this tick's laser ray-cast; always `None` while unarmed
    pub laser: Option<LaserHit>,
}

/// Outcome of pulling the trigger
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FireResult {
    /// the shot hit something tagged as a target
    HitTarget { entity: Entity, point: Vec3 },
    /// the shot hit scenery, or nothing within range
    Miss,
}

impl CombatState {
    /// The socket the weapon should be attached to
    pub fn socket(&self) -> Socket {
        Socket::for_armed(self.armed)
    }

    /// Returns `true` if the armed state actually changed
    pub fn set_armed(&mut self, armed: bool) -> bool {
        let changed = self.armed != armed;
        self.armed = armed;
        if !armed {
            self.laser = None;
            self.firing = false;
        }
        changed
    }

    pub fn tick(&mut self, dt: f32) {
        self.fire_cooldown.tick(dt);
        self.firing = false;
    }

    /// Attempt to fire at whatever the laser currently points to.
    /// Nothing happens while unarmed, dead, or on cooldown.
    pub fn try_fire(&mut self, fire_pressed: bool, alive: bool, cooldown: f32) -> Option<FireResult> {
        if !(self.armed && alive && fire_pressed && self.fire_cooldown.is_ready()) {
            return None;
        }
        self.firing = true;
        self.fire_cooldown.reset(cooldown);
        Some(match self.laser {
            Some(LaserHit {
                entity,
                point,
                is_target: true,
            }) => FireResult::HitTarget { entity, point },
            _ => FireResult::Miss,
        })
    }
}

/// What a single hit did to a [Health] pool
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DamageOutcome {
    Hurt { remaining: u32 },
    /// this hit brought health to zero; reported exactly once
    Died,
    /// health was already at zero, nothing changed
    AlreadyDead,
}

#[derive(Component, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::AlreadyDead;
        }
        self.current = self.current.saturating_sub(amount);
        if self.is_dead() {
            DamageOutcome::Died
        } else {
            DamageOutcome::Hurt {
                remaining: self.current,
            }
        }
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::full(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_hit() -> LaserHit {
        LaserHit {
            entity: Entity::PLACEHOLDER,
            point: Vec3::new(0.0, 1.0, -10.0),
            is_target: true,
        }
    }

    #[test]
    fn unarmed_cannot_fire() {
        let mut combat = CombatState::default();
        combat.laser = Some(target_hit());
        assert_eq!(combat.try_fire(true, true, 0.25), None);
        assert!(!combat.firing);
    }

    #[test]
    fn armed_fire_hits_target() {
        let mut combat = CombatState::default();
        assert!(combat.set_armed(true));
        assert!(!combat.set_armed(true));
        assert_eq!(combat.socket(), Socket::Hand);
        combat.laser = Some(target_hit());
        assert_eq!(
            combat.try_fire(true, true, 0.25),
            Some(FireResult::HitTarget {
                entity: Entity::PLACEHOLDER,
                point: Vec3::new(0.0, 1.0, -10.0),
            })
        );
        assert!(combat.firing);
    }

    #[test]
    fn scenery_hit_is_a_miss() {
        let mut combat = CombatState::default();
        combat.set_armed(true);
        combat.laser = Some(LaserHit {
            is_target: false,
            ..target_hit()
        });
        assert_eq!(combat.try_fire(true, true, 0.25), Some(FireResult::Miss));
    }

    #[test]
    fn fire_respects_cooldown_and_death() {
        let mut combat = CombatState::default();
        combat.set_armed(true);
        assert!(combat.try_fire(true, true, 0.25).is_some());
        combat.tick(0.1);
        assert!(!combat.firing);
        assert!(combat.try_fire(true, true, 0.25).is_none());
        combat.tick(0.2);
        assert!(combat.try_fire(true, false, 0.25).is_none());
        assert!(combat.try_fire(true, true, 0.25).is_some());
    }

    #[test]
    fn disarming_clears_laser() {
        let mut combat = CombatState::default();
        combat.set_armed(true);
        combat.laser = Some(target_hit());
        assert!(combat.set_armed(false));
        assert_eq!(combat.laser, None);
        assert_eq!(combat.socket(), Socket::Hip);
    }

    #[test]
    fn health_never_goes_negative() {
        let mut health = Health::full(100);
        assert_eq!(health.apply_damage(30), DamageOutcome::Hurt { remaining: 70 });
        assert_eq!(health.apply_damage(500), DamageOutcome::Died);
        assert_eq!(health.current, 0);
        assert!(health.is_dead());
    }

    #[test]
    fn death_is_reported_once() {
        let mut health = Health::full(20);
        let outcomes: Vec<_> = (0..5).map(|_| health.apply_damage(10)).collect();
        assert_eq!(
            outcomes,
            vec![
                DamageOutcome::Hurt { remaining: 10 },
                DamageOutcome::Died,
                DamageOutcome::AlreadyDead,
                DamageOutcome::AlreadyDead,
                DamageOutcome::AlreadyDead,
            ]
        );
    }
}
