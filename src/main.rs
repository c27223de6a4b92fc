mod player;
mod util;

use crate::player::*;
use crate::util::{Socket, SocketMap};
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// total height of the player's capsule
const PLAYER_HEIGHT: f32 = 1.8;
const PLAYER_RADIUS: f32 = 0.35;
/// kilograms; jump impulses in `player.ron` are tuned against this
const PLAYER_MASS: f32 = 70.0;

fn main() {
	App::new()
		// baseline bevy stuff
		.add_plugins(DefaultPlugins)
		.insert_resource(Time::<Fixed>::from_hz(60.))
		.init_asset::<PlayerControlParams>()
		.init_asset_loader::<PlayerAssetLoader>()
		.add_event::<TargetHit>()
		.add_event::<PlayerDied>()
		//
		// scene
		.add_systems(Startup, setup_camera)
		.add_systems(Startup, setup_player)
		.add_systems(Startup, setup_arena)
		//
		// player
		.add_systems(
			FixedUpdate,
			(
				read_player_input,
				sync_health_params,
				contact_damage_system,
				player_system,
				laser_system,
				trigger_system,
				weapon_socket_system,
				target_system,
				animation_system,
			)
				.chain(),
		)
		.add_systems(Update, status_text_system)
		.add_systems(
			PostUpdate,
			(spine_look_system, follow_camera_system).before(TransformSystem::TransformPropagate),
		)
		//
		// rapier physics
		//
		.insert_resource(TimestepMode::Fixed {
			dt: 1. / 60.,
			substeps: 1,
		})
		.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
		.add_plugins(RapierDebugRenderPlugin::default())
		.run();
}

#[derive(Component)]
struct FollowCamera {
	/// offset from the player, in the player's local space
	offset: Vec3,
}

#[derive(Component)]
struct PlayerStatusText;

fn setup_camera(mut commands: Commands) {
	commands.spawn((
		Camera3d::default(),
		FollowCamera {
			offset: Vec3::new(0.6, 2.2, 4.5),
		},
		Transform::from_xyz(0.6, 3.0, 4.5).looking_at(Vec3::new(0.0, 1.5, 0.0), Vec3::Y),
	));
	commands.spawn((
		DirectionalLight {
			shadows_enabled: true,
			..default()
		},
		Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
	));
}

/// Keeps the camera behind the player's shoulder
fn follow_camera_system(
	players: Query<&Transform, With<Player>>,
	mut cameras: Query<(&FollowCamera, &mut Transform), Without<Player>>,
) {
	let Ok(player) = players.get_single() else {
		return;
	};
	for (follow, mut camera) in &mut cameras {
		let eye = player.translation + player.rotation * follow.offset;
		let focus = player.translation + Vec3::Y * 1.2 + *player.forward() * 4.0;
		*camera = Transform::from_translation(eye).looking_at(focus, Vec3::Y);
	}
}

struct BlockArgs {
	color: Color,
	pos: Vec3,
	size: Vec3,
}
impl BlockArgs {
	fn spawn<'a>(
		self,
		commands: &'a mut Commands,
		meshes: &mut Assets<Mesh>,
		materials: &mut Assets<StandardMaterial>,
	) -> EntityCommands<'a> {
		let BlockArgs { color, pos, size } = self;
		commands.spawn((
			RigidBody::Fixed,
			Mesh3d(meshes.add(Cuboid::from_size(size))),
			MeshMaterial3d(materials.add(color)),
			Collider::cuboid(size.x * 0.5, size.y * 0.5, size.z * 0.5),
			Transform::from_translation(pos),
		))
	}
}

fn setup_arena(
	mut commands: Commands,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
) {
	// floor
	BlockArgs {
		color: Color::srgb(0.15, 0.8, 0.25),
		pos: Vec3::new(0.0, -0.5, 0.0),
		size: Vec3::new(60.0, 1.0, 60.0),
	}
	.spawn(&mut commands, &mut meshes, &mut materials);

	// a ledge to jump onto
	BlockArgs {
		color: Color::srgb(0.45, 0.5, 0.15),
		pos: Vec3::new(4.0, 0.75, -8.0),
		size: Vec3::new(6.0, 1.5, 4.0),
	}
	.spawn(&mut commands, &mut meshes, &mut materials);

	// targets to shoot at
	for (i, x) in [-6.0, 0.0, 6.0].into_iter().enumerate() {
		BlockArgs {
			color: Color::srgb(0.9, 0.9, 0.9),
			pos: Vec3::new(x, 1.0, -18.0 - i as f32 * 2.0),
			size: Vec3::new(1.0, 2.0, 0.3),
		}
		.spawn(&mut commands, &mut meshes, &mut materials)
		.insert(Target::default());
	}

	// spikes that hurt on contact
	BlockArgs {
		color: Color::srgb(0.8, 0.1, 0.1),
		pos: Vec3::new(-5.0, 0.15, -4.0),
		size: Vec3::new(2.0, 0.3, 2.0),
	}
	.spawn(&mut commands, &mut meshes, &mut materials)
	.insert((Hazard, ActiveEvents::COLLISION_EVENTS));
}

fn setup_player(
	mut commands: Commands,
	asset_server: Res<AssetServer>,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
) {
	let cylinder_half_height = PLAYER_HEIGHT * 0.5 - PLAYER_RADIUS;
	let player = commands
		.spawn((
			Player {
				params: asset_server.load("player.ron"),
				feet_offset: PLAYER_HEIGHT * 0.5,
			},
			Mesh3d(meshes.add(Capsule3d::new(PLAYER_RADIUS, cylinder_half_height * 2.0))),
			MeshMaterial3d(materials.add(Color::srgb(1., 0.5, 0.))),
			Transform::from_xyz(0.0, PLAYER_HEIGHT * 0.5 + 0.05, 0.0),
			RigidBody::Dynamic,
			Collider::capsule_y(cylinder_half_height, PLAYER_RADIUS),
			ColliderMassProperties::Mass(PLAYER_MASS),
			LockedAxes::ROTATION_LOCKED_X | LockedAxes::ROTATION_LOCKED_Z,
			Friction {
				coefficient: 0.0,
				combine_rule: CoefficientCombineRule::Min,
			},
			Velocity::default(),
			ExternalImpulse::default(),
			ActiveEvents::COLLISION_EVENTS,
		))
		.id();

	// skeleton: a spine that bends to aim, with the right hand hanging off it
	let spine = commands
		.spawn((SpineBone, Transform::from_xyz(0.0, 0.2, 0.0), Visibility::default()))
		.set_parent(player)
		.id();
	let hand = commands
		.spawn((Transform::from_xyz(0.35, 0.25, -0.3), Visibility::default()))
		.set_parent(spine)
		.id();
	let hip = commands
		.spawn((Transform::from_xyz(0.0, -PLAYER_HEIGHT * 0.5, 0.0), Visibility::default()))
		.set_parent(player)
		.id();
	let sockets = SocketMap { hip, hand };

	// weapon starts holstered; its barrel points along local -Z
	let weapon = commands
		.spawn((
			Mesh3d(meshes.add(Cuboid::new(0.08, 0.12, 0.5))),
			MeshMaterial3d(materials.add(Color::srgb(0.2, 0.2, 0.25))),
			Socket::Hip.local_pose(),
		))
		.set_parent(hip)
		.id();
	let muzzle = commands
		.spawn((Muzzle, Transform::from_xyz(0.0, 0.0, -0.3), Visibility::default()))
		.set_parent(weapon)
		.id();

	commands.entity(player).insert(PlayerRig {
		spine,
		weapon,
		muzzle,
		sockets,
		weapon_socket: Socket::Hip,
	});

	// Debug text for player state
	commands.spawn((
		PlayerStatusText,
		Text::new("hello world"),
		TextLayout::new_with_justify(JustifyText::Right),
		Node {
			position_type: PositionType::Absolute,
			top: Val::Px(10.0),
			right: Val::Px(10.0),
			..default()
		},
	));
}
