use crate::player::{
    ActionValues, AnimationParams, CombatState, DamageOutcome, FireResult, Hazard, Health, LaserHit, LookState,
    MotorPose, Muzzle, Player, PlayerControlParams, PlayerControlState, PlayerInput, PlayerRig, SpineBone, Target,
};
use crate::util::{GroundHit, PhysicsProbe};
use crate::PlayerStatusText;
use bevy::app::AppExit;
use bevy::asset::{AssetEvent, Assets};
use bevy::color::Color;
use bevy::input::mouse::MouseMotion;
use bevy::input::ButtonInput;
use bevy::log::{debug, info};
use bevy::math::{Vec2, Vec3};
use bevy::pbr::{MeshMaterial3d, StandardMaterial};
use bevy::prelude::{
    default, BuildChildren, Commands, DetectChangesMut, Entity, Event, EventReader, EventWriter, Gizmos, GlobalTransform, KeyCode,
    MouseButton, Or, Query, Res, ResMut, Text, Time, Transform, With,
};
use bevy_rapier3d::dynamics::{ExternalImpulse, Velocity};
use bevy_rapier3d::pipeline::{CollisionEvent, QueryFilter, QueryFilterFlags};
use bevy_rapier3d::plugin::ReadRapierContext;

/// Sent when a shot from the player lands on a [Target]
#[derive(Event, Debug, Copy, Clone, PartialEq)]
pub struct TargetHit {
    pub shooter: Entity,
    pub target: Entity,
    pub point: Vec3,
}

/// Sent exactly once per player, when their health reaches zero
#[derive(Event, Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlayerDied {
    pub player: Entity,
}

/// [PhysicsProbe] backed by the Rapier world, pushing impulses into the player's body
struct RapierProbe<'a, 'w, 's> {
    rapier_context: &'a ReadRapierContext<'w, 's>,
    player: Entity,
    impulse: &'a mut ExternalImpulse,
}

impl PhysicsProbe for RapierProbe<'_, '_, '_> {
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<GroundHit> {
        let rapier_context = self.rapier_context.single();
        rapier_context
            .cast_ray(
                /* origin */ origin,
                /* ray_dir */ Vec3::NEG_Y,
                /* max_toi */ max_distance,
                /* solid */ true,
                /* filter */
                QueryFilter {
                    flags: QueryFilterFlags::EXCLUDE_SENSORS,
                    exclude_collider: Some(self.player),
                    exclude_rigid_body: Some(self.player),
                    ..default()
                },
            )
            .map(|(entity, distance)| GroundHit {
                entity,
                distance,
                point: origin + Vec3::NEG_Y * distance,
            })
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.impulse.impulse += impulse;
    }
}

/// Samples keyboard and mouse into each player's [PlayerInput]
pub fn read_player_input(
    kb: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut players: Query<&mut PlayerInput>,
    mut exit: EventWriter<AppExit>,
) {
    let value = |pressed: bool| if pressed { 1.0 } else { 0.0 };
    let axis = |positive: [KeyCode; 2], negative: [KeyCode; 2]| {
        value(kb.any_pressed(positive)) - value(kb.any_pressed(negative))
    };

    let move_axis = Vec2::new(
        axis([KeyCode::KeyD, KeyCode::ArrowRight], [KeyCode::KeyA, KeyCode::ArrowLeft]),
        axis([KeyCode::KeyW, KeyCode::ArrowUp], [KeyCode::KeyS, KeyCode::ArrowDown]),
    );
    // screen-space mouse Y grows downward; look Y grows upward
    let look_axis = mouse_motion
        .read()
        .fold(Vec2::ZERO, |acc, motion| acc + Vec2::new(motion.delta.x, -motion.delta.y));
    let values = ActionValues {
        jump: value(kb.pressed(KeyCode::Space)),
        fire: value(mouse.pressed(MouseButton::Left)),
        armed_toggle: value(kb.pressed(KeyCode::KeyQ)),
        escape: value(kb.pressed(KeyCode::Escape)),
    };

    for mut input in &mut players {
        input.update(move_axis, look_axis, values);
        if input.escape.just_pressed() {
            info!("escape pressed, exiting");
            exit.send(AppExit::Success);
        }
    }
}

/// Movement, turning, charged jumping, and ground detection
pub fn player_system(
    mut player_query: Query<(
        Entity,
        &Player,
        &mut PlayerControlState,
        &mut LookState,
        &PlayerInput,
        &Health,
        &Transform,
        &mut Velocity,
        &mut ExternalImpulse,
    )>,
    control_params: Res<Assets<PlayerControlParams>>,
    time: Res<Time>,
    rapier_context: ReadRapierContext,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (player_entity, player, mut control, mut look, input, health, transform, mut velocity, mut impulse) in
        &mut player_query
    {
        if let Some(params) = control_params.get(player.params.id()) {
            // a dead player keeps settling onto the ground, but ignores all input
            let frozen = health.is_dead();

            let forward = *transform.forward();
            let pose = MotorPose {
                feet: transform.translation - Vec3::Y * player.feet_offset,
                forward,
            };
            let mut probe = RapierProbe {
                rapier_context: &rapier_context,
                player: player_entity,
                impulse: &mut *impulse,
            };
            let output = control.tick(input, frozen, params, pose, &mut probe, dt);

            let look_yaw = if frozen {
                0.0
            } else {
                look.apply(input.look_axis, &params.look)
            };
            velocity.angvel = Vec3::Y * (output.yaw_delta + look_yaw) / dt;

            // the player only steers while touching the ground; in the air, physics takes over
            if control.movement.has_footing() {
                let planar = forward.with_y(0.0).normalize_or_zero() * control.forward_speed;
                velocity.linvel.x = planar.x;
                velocity.linvel.z = planar.z;
            }

            if let Some(launch) = output.launched {
                info!("jumped with charge scale {:.2} (impulse {:?})", launch.scale, launch.impulse);
            }
            if output.landed {
                debug!("landed on {:?}", control.ground_sensor.hit.map(|hit| hit.entity));
            }
        } else {
            info!("player params not loaded yet");
        }
    }
}

/// Casts the laser pointer for armed players and draws it
pub fn laser_system(
    mut players: Query<(Entity, &Player, &mut CombatState, &PlayerRig)>,
    rig_transforms: Query<&GlobalTransform, Or<(With<Muzzle>, With<SpineBone>)>>,
    targets: Query<(), With<Target>>,
    control_params: Res<Assets<PlayerControlParams>>,
    rapier_context: ReadRapierContext,
    mut gizmos: Gizmos,
) {
    let rapier_context = rapier_context.single();

    for (player_entity, player, mut combat, rig) in &mut players {
        if !combat.armed {
            continue;
        }
        let Some(params) = control_params.get(player.params.id()) else {
            continue;
        };

        // the laser leaves the muzzle, but follows the spine's aim rather than the weapon mesh
        let (Ok(muzzle), Ok(spine)) = (rig_transforms.get(rig.muzzle), rig_transforms.get(rig.spine)) else {
            debug!("muzzle {:?} or spine {:?} is missing, the laser is disabled", rig.muzzle, rig.spine);
            combat.laser = None;
            continue;
        };
        let origin = muzzle.translation();
        let direction = *spine.forward();
        let range = params.combat.laser_range;

        combat.laser = rapier_context
            .cast_ray(
                origin,
                direction,
                range,
                true,
                QueryFilter {
                    flags: QueryFilterFlags::EXCLUDE_SENSORS,
                    exclude_collider: Some(player_entity),
                    exclude_rigid_body: Some(player_entity),
                    ..default()
                },
            )
            .map(|(entity, toi)| LaserHit {
                entity,
                point: origin + direction * toi,
                is_target: targets.contains(entity),
            });

        let end = combat.laser.map_or(origin + direction * range, |hit| hit.point);
        gizmos.line(origin, end, Color::srgb(1.0, 0.1, 0.1));
    }
}

/// Armed toggle and firing at whatever the laser points to
pub fn trigger_system(
    mut players: Query<(Entity, &Player, &PlayerInput, &Health, &mut CombatState)>,
    control_params: Res<Assets<PlayerControlParams>>,
    time: Res<Time>,
    mut target_hits: EventWriter<TargetHit>,
) {
    for (player_entity, player, input, health, mut combat) in &mut players {
        let Some(params) = control_params.get(player.params.id()) else {
            continue;
        };
        combat.tick(time.delta_secs());

        let alive = !health.is_dead();
        if alive && input.armed_toggle.just_pressed() {
            let armed = !combat.armed;
            combat.set_armed(armed);
            info!("player {}", if armed { "drew their weapon" } else { "holstered their weapon" });
        }

        match combat.try_fire(input.fire.is_pressed(), alive, params.combat.fire_cooldown) {
            Some(FireResult::HitTarget { entity, point }) => {
                target_hits.send(TargetHit {
                    shooter: player_entity,
                    target: entity,
                    point,
                });
            }
            Some(FireResult::Miss) => debug!("shot missed"),
            None => {}
        }
    }
}

/// Reacts to shots landing on targets
pub fn target_system(
    mut hits: EventReader<TargetHit>,
    mut targets: Query<(&mut Target, Option<&MeshMaterial3d<StandardMaterial>>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for hit in hits.read() {
        if let Ok((mut target, material)) = targets.get_mut(hit.target) {
            target.hits_taken += 1;
            info!("target {:?} hit at {:?} ({} hits)", hit.target, hit.point, target.hits_taken);
            if let Some(material) = material.and_then(|m| materials.get_mut(&m.0)) {
                material.base_color = Color::hsl((target.hits_taken * 40 % 360) as f32, 0.8, 0.5);
            }
        }
    }
}

/// Moves the weapon to the socket that matches the armed state.
/// The weapon's local transform is overwritten with the socket's exact pose.
pub fn weapon_socket_system(mut commands: Commands, mut players: Query<(&CombatState, &mut PlayerRig)>) {
    for (combat, mut rig) in &mut players {
        let socket = combat.socket();
        if socket == rig.weapon_socket {
            continue;
        }
        debug!("moving weapon from {:?} to {:?}", rig.weapon_socket, socket);
        commands
            .entity(rig.weapon)
            .set_parent(rig.sockets[socket])
            .insert(socket.local_pose());
        rig.weapon_socket = socket;
    }
}

/// Applies flat damage whenever a player starts touching a [Hazard]
pub fn contact_damage_system(
    mut collisions: EventReader<CollisionEvent>,
    hazards: Query<(), With<Hazard>>,
    mut players: Query<(&Player, &mut Health)>,
    control_params: Res<Assets<PlayerControlParams>>,
    mut deaths: EventWriter<PlayerDied>,
) {
    for collision in collisions.read() {
        let (a, b) = match collision {
            CollisionEvent::Started(a, b, _) => (*a, *b),
            CollisionEvent::Stopped(..) => continue,
        };
        let (player_entity, other) = if players.contains(a) {
            (a, b)
        } else if players.contains(b) {
            (b, a)
        } else {
            continue;
        };
        if !hazards.contains(other) {
            continue;
        }

        let Ok((player, mut health)) = players.get_mut(player_entity) else {
            continue;
        };
        let Some(params) = control_params.get(player.params.id()) else {
            continue;
        };
        match health.apply_damage(params.health.contact_damage) {
            DamageOutcome::Hurt { remaining } => {
                info!("player hit {:?} and took damage, {} health left", other, remaining);
            }
            DamageOutcome::Died => {
                info!("player died touching {:?}", other);
                deaths.send(PlayerDied { player: player_entity });
            }
            DamageOutcome::AlreadyDead => {}
        }
    }
}

/// Fills health pools when params are first loaded, and re-caps them on hot reload
pub fn sync_health_params(
    mut events: EventReader<AssetEvent<PlayerControlParams>>,
    control_params: Res<Assets<PlayerControlParams>>,
    mut players: Query<(&Player, &mut Health)>,
) {
    for event in events.read() {
        let (id, added) = match event {
            AssetEvent::Added { id } => (*id, true),
            AssetEvent::Modified { id } => (*id, false),
            _ => continue,
        };
        let Some(params) = control_params.get(id) else {
            continue;
        };
        let max = params.health.max;
        for (player, mut health) in &mut players {
            if player.params.id() != id {
                continue;
            }
            *health = if added {
                Health::full(max)
            } else {
                Health {
                    current: health.current.min(max),
                    max,
                }
            };
        }
    }
}

/// Derives the tagged animation state, and tints the placeholder body to match
pub fn animation_system(
    mut players: Query<(
        &PlayerControlState,
        &CombatState,
        &Health,
        &mut AnimationParams,
        Option<&MeshMaterial3d<StandardMaterial>>,
    )>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (control, combat, health, mut anim, material) in &mut players {
        let next = AnimationParams::from_state(control, combat, health);
        if std::mem::discriminant(&anim.state) != std::mem::discriminant(&next.state) {
            debug!("animation state {:?} -> {:?}", anim.state, next.state);
        }
        let recolor = anim.debug_color() != next.debug_color();
        anim.set_if_neq(next);
        if recolor {
            if let Some(material) = material.and_then(|m| materials.get_mut(&m.0)) {
                material.base_color = next.debug_color();
            }
        }
    }
}

/// Bends the spine toward the aim, after movement and animation have run
pub fn spine_look_system(players: Query<(&LookState, &PlayerRig)>, mut bones: Query<&mut Transform, With<SpineBone>>) {
    for (look, rig) in &players {
        if let Ok(mut spine) = bones.get_mut(rig.spine) {
            spine.rotation = look.spine_rotation();
        } else {
            debug!("spine bone {:?} is missing", rig.spine);
        }
    }
}

pub fn status_text_system(
    players: Query<(&PlayerControlState, &CombatState, &Health, &AnimationParams)>,
    mut status_text_query: Query<&mut Text, With<PlayerStatusText>>,
) {
    let Ok(mut status_text) = status_text_query.get_single_mut() else {
        return;
    };
    for (control, combat, health, anim) in &players {
        status_text.0 = format!(
            "speed: {:.2}\nstate: {:?}\ngrounded: {}\nhealth: {}/{}\narmed: {}\nlaser: {:?}",
            control.forward_speed,
            anim.state,
            control.is_grounded(),
            health.current,
            health.max,
            combat.armed,
            combat.laser.map(|hit| hit.entity),
        );
    }
}
