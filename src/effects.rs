use bevy::prelude::*;

use crate::entities::EntityKind;
use crate::game::GameNotice;
use crate::render::GameImages;
use crate::resources::{to_world, GameScreen};
use crate::session::{Session, SessionEvent};

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, explosion_fade_system)
            .add_observer(on_explosion);
    }
}

/// A burst that grows and fades out, then despawns itself.
#[derive(Component)]
pub struct Explosion {
    pub timer: Timer,
    pub start_size: f32,
}

/// How long and how big a burst is for the body that blew up.
fn burst_for(kind: EntityKind) -> Option<(f32, f32)> {
    match kind {
        EntityKind::Spaceship => Some((1.2, 120.0)),
        EntityKind::Asteroid => Some((0.6, 70.0)),
        EntityKind::Projectile => Some((0.3, 30.0)),
        EntityKind::PowerUp | EntityKind::BackgroundDecoration => None,
    }
}

fn on_explosion(
    trigger: On<GameNotice>,
    mut commands: Commands,
    session: Option<Res<Session>>,
    images: Res<GameImages>,
) {
    let &SessionEvent::Explosion { kind, position } = &trigger.0 else {
        return;
    };
    let (Some(session), Some((seconds, size))) = (session, burst_for(kind)) else {
        return;
    };

    let p = to_world(session.bounds(), position);
    commands.spawn((
        Explosion {
            timer: Timer::from_seconds(seconds, TimerMode::Once),
            start_size: size,
        },
        GameScreen,
        Sprite {
            image: images.explosion.clone(),
            custom_size: Some(Vec2::splat(size)),
            color: Color::srgba(1.0, 0.8, 0.4, 1.0),
            ..default()
        },
        Transform::from_xyz(p.x, p.y, 5.0),
    ));
}

pub fn explosion_fade_system(
    mut commands: Commands,
    mut query: Query<(Entity, &mut Sprite, &mut Explosion)>,
    time: Res<Time>,
) {
    for (entity, mut sprite, mut explosion) in query.iter_mut() {
        explosion.timer.tick(time.delta());
        if explosion.timer.is_finished() {
            commands.entity(entity).despawn();
            continue;
        }

        let t = explosion.timer.fraction();
        sprite.color = sprite.color.with_alpha(1.0 - t);
        sprite.custom_size = Some(Vec2::splat(explosion.start_size * (1.0 + t)));
    }
}
