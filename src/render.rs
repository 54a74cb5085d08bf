use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::GameConfig;
use crate::entities::{Body, Bounds, EntityId, EntityKind};
use crate::game::GameNotice;
use crate::resources::{field_bounds, to_world, GameScreen, Screen};
use crate::session::{Session, SessionEvent};

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_images)
            .add_systems(OnEnter(Screen::Game), spawn_starfield)
            .add_systems(
                Update,
                (sync_body_sprites, follow_ship_with_shield, scroll_starfield)
                    .run_if(in_state(Screen::Game).and(resource_exists::<Session>)),
            )
            .add_observer(on_body_spawned)
            .add_observer(on_body_despawned)
            .add_observer(on_shield_changed);
    }
}

/// Seconds for the starfield to scroll one full screen.
const STARFIELD_PERIOD: f32 = 10.0;

#[derive(Resource)]
pub struct GameImages {
    pub spaceship: Handle<Image>,
    pub asteroid: Handle<Image>,
    pub projectile: Handle<Image>,
    pub power_up: Handle<Image>,
    pub shield: Handle<Image>,
    pub stars: Handle<Image>,
    pub explosion: Handle<Image>,
    pub blaster: Handle<Image>,
    pub music: Handle<Image>,
    pub restart: Handle<Image>,
    pub planets: Vec<Handle<Image>>,
}

impl GameImages {
    fn for_body(&self, body: &Body) -> Handle<Image> {
        match body.kind {
            EntityKind::Spaceship => self.spaceship.clone(),
            EntityKind::Asteroid => self.asteroid.clone(),
            EntityKind::Projectile => self.projectile.clone(),
            EntityKind::PowerUp => self.power_up.clone(),
            EntityKind::BackgroundDecoration => self
                .planets
                .get(body.image)
                .cloned()
                .unwrap_or_default(),
        }
    }
}

fn load_images(mut commands: Commands, asset_server: Res<AssetServer>, config: Res<GameConfig>) {
    let planets = (0..config.decoration_images)
        .map(|i| asset_server.load(format!("images/planet{}.png", i + 1)))
        .collect();

    commands.insert_resource(GameImages {
        spaceship: asset_server.load("images/spaceship.png"),
        asteroid: asset_server.load("images/asteroid.png"),
        projectile: asset_server.load("images/laser.png"),
        power_up: asset_server.load("images/powerup.png"),
        shield: asset_server.load("images/shield.png"),
        stars: asset_server.load("images/stars.png"),
        explosion: asset_server.load("images/explosion.png"),
        blaster: asset_server.load("images/blaster.png"),
        music: asset_server.load("images/music.png"),
        restart: asset_server.load("images/try_again.png"),
        planets,
    });
}

/// Links a sprite to the session body it draws.
#[derive(Component)]
pub struct SessionBody(pub EntityId);

#[derive(Component)]
struct ShieldMarker;

#[derive(Component)]
struct Starfield;

/// Draw order: planets behind everything, the ship on top.
pub fn layer(kind: EntityKind) -> f32 {
    match kind {
        EntityKind::BackgroundDecoration => -5.0,
        EntityKind::PowerUp => 1.0,
        EntityKind::Asteroid => 2.0,
        EntityKind::Projectile => 3.0,
        EntityKind::Spaceship => 4.0,
    }
}

fn body_transform(bounds: Bounds, body: &Body) -> Transform {
    let p = to_world(bounds, body.position);
    Transform::from_xyz(p.x, p.y, layer(body.kind)).with_rotation(Quat::from_rotation_z(body.rotation))
}

fn on_body_spawned(
    trigger: On<GameNotice>,
    mut commands: Commands,
    session: Option<Res<Session>>,
    images: Res<GameImages>,
) {
    let &SessionEvent::Spawned { id, .. } = &trigger.0 else {
        return;
    };
    let Some(session) = session else {
        return;
    };
    // Already gone again before its first frame.
    let Some(body) = session.registry().get(id) else {
        return;
    };

    commands.spawn((
        SessionBody(id),
        GameScreen,
        Sprite {
            image: images.for_body(body),
            custom_size: Some(Vec2::splat(body.radius * 2.0)),
            ..default()
        },
        body_transform(session.bounds(), body),
    ));
}

fn on_body_despawned(
    trigger: On<GameNotice>,
    mut commands: Commands,
    sprites: Query<(Entity, &SessionBody)>,
) {
    let &SessionEvent::Despawned { id } = &trigger.0 else {
        return;
    };
    for (entity, body) in &sprites {
        if body.0 == id {
            commands.entity(entity).despawn();
        }
    }
}

/// Copies positions and headings from the session onto the sprites.
fn sync_body_sprites(session: Res<Session>, mut sprites: Query<(&SessionBody, &mut Transform)>) {
    let bounds = session.bounds();
    for (body_ref, mut transform) in &mut sprites {
        if let Some(body) = session.registry().get(body_ref.0) {
            let p = to_world(bounds, body.position);
            transform.translation.x = p.x;
            transform.translation.y = p.y;
            transform.rotation = Quat::from_rotation_z(body.rotation);
        }
    }
}

fn on_shield_changed(
    trigger: On<GameNotice>,
    mut commands: Commands,
    session: Option<Res<Session>>,
    images: Res<GameImages>,
    shields: Query<Entity, With<ShieldMarker>>,
) {
    match &trigger.0 {
        SessionEvent::ShieldRaised => {
            let Some(ship) = session.as_ref().and_then(|s| s.registry().spaceship()) else {
                return;
            };
            commands.spawn((
                ShieldMarker,
                GameScreen,
                Sprite {
                    image: images.shield.clone(),
                    custom_size: Some(Vec2::splat(ship.radius * 3.0)),
                    color: Color::srgba(0.6, 0.8, 1.0, 0.7),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, layer(EntityKind::Spaceship) + 0.5),
            ));
        }
        SessionEvent::ShieldLowered | SessionEvent::Restarted => {
            for entity in &shields {
                commands.entity(entity).despawn();
            }
        }
        _ => {}
    }
}

fn follow_ship_with_shield(
    session: Res<Session>,
    mut shields: Query<(&mut Transform, &mut Visibility), With<ShieldMarker>>,
) {
    let ship = session.registry().spaceship();
    for (mut transform, mut visibility) in &mut shields {
        match ship {
            Some(ship) => {
                let p = to_world(session.bounds(), ship.position);
                transform.translation.x = p.x;
                transform.translation.y = p.y;
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

/// Two screen-sized tiles, one above the other.
fn spawn_starfield(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Res<GameConfig>,
    images: Res<GameImages>,
) {
    let bounds = field_bounds(windows.single().ok(), config.field_size);
    let size = Vec2::new(bounds.width, bounds.height);

    for i in 0..2 {
        commands.spawn((
            Starfield,
            GameScreen,
            Sprite {
                image: images.stars.clone(),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(0.0, i as f32 * bounds.height, -10.0),
        ));
    }
}

fn scroll_starfield(
    time: Res<Time>,
    session: Res<Session>,
    mut tiles: Query<&mut Transform, With<Starfield>>,
) {
    let height = session.bounds().height;
    let step = height / STARFIELD_PERIOD * time.delta_secs();
    for mut transform in &mut tiles {
        transform.translation.y -= step;
        if transform.translation.y <= -height {
            transform.translation.y += height * 2.0;
        }
    }
}
