use bevy::{
    audio::{AudioSinkPlayback, Volume},
    prelude::*,
};

use crate::entities::EntityKind;
use crate::game::{dispatch_session_events, GameNotice};
use crate::resources::{GameScreen, Screen};
use crate::session::{Session, SessionEvent};

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_audio)
            .init_resource::<PendingExplosions>()
            .add_systems(OnEnter(Screen::Game), start_music)
            .add_systems(
                Update,
                play_explosion_sounds
                    .after(dispatch_session_events)
                    .run_if(in_state(Screen::Game)),
            )
            .add_observer(on_mute_toggled)
            .add_observer(on_explosion_queued);
    }
}

#[derive(Resource)]
pub struct GameAudio {
    /// Handle<T> is Bevy's way of referencing assets.
    pub music: Handle<AudioSource>,
    pub ship_explosion: Handle<AudioSource>,
    pub rock_explosion: Handle<AudioSource>,
}

/// The looping soundtrack for the game screen.
#[derive(Component)]
struct BackgroundMusic;

pub fn setup_audio(mut commands: Commands, asset_server: Res<AssetServer>) {
    // Loading happens in the background; a missing file is logged by the
    // asset server and simply never plays.
    commands.insert_resource(GameAudio {
        music: asset_server.load("audio/backgroundMusic.mp3"),
        ship_explosion: asset_server.load("audio/explosionSound.mp3"),
        rock_explosion: asset_server.load("audio/rockexplosion.mp3"),
    });
}

fn start_music(mut commands: Commands, audio: Res<GameAudio>) {
    commands.spawn((
        BackgroundMusic,
        GameScreen,
        AudioPlayer::new(audio.music.clone()),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(0.6)),
    ));
}

fn on_mute_toggled(trigger: On<GameNotice>, sinks: Query<&AudioSink, With<BackgroundMusic>>) {
    let &SessionEvent::MuteToggled(muted) = &trigger.0 else {
        return;
    };
    for sink in &sinks {
        if muted {
            sink.pause();
        } else {
            sink.play();
        }
    }
    debug!("Music {}", if muted { "paused" } else { "resumed" });
}

/// Kinds of body that blew up during the current frame.
#[derive(Resource, Default)]
struct PendingExplosions(Vec<EntityKind>);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplosionClip {
    Ship,
    Rock,
}

/// Clips for one frame's explosions. Losing the ship drowns out everything
/// else, so a ship hit plays only the ship clip.
pub fn explosion_clips(kinds: &[EntityKind]) -> Vec<ExplosionClip> {
    if kinds.contains(&EntityKind::Spaceship) {
        return vec![ExplosionClip::Ship];
    }
    kinds
        .iter()
        .filter(|kind| **kind == EntityKind::Asteroid)
        .map(|_| ExplosionClip::Rock)
        .collect()
}

fn on_explosion_queued(trigger: On<GameNotice>, mut pending: ResMut<PendingExplosions>) {
    if let &SessionEvent::Explosion { kind, .. } = &trigger.0 {
        pending.0.push(kind);
    }
}

fn play_explosion_sounds(
    mut commands: Commands,
    mut pending: ResMut<PendingExplosions>,
    audio: Res<GameAudio>,
    session: Option<Res<Session>>,
) {
    if pending.0.is_empty() {
        return;
    }
    let kinds = std::mem::take(&mut pending.0);
    if session.is_some_and(|s| s.state().is_muted) {
        return;
    }

    for clip in explosion_clips(&kinds) {
        let handle = match clip {
            ExplosionClip::Ship => audio.ship_explosion.clone(),
            ExplosionClip::Rock => audio.rock_explosion.clone(),
        };
        // DESPAWN removes the entity once the clip finishes.
        commands.spawn((AudioPlayer::new(handle), PlaybackSettings::DESPAWN, GameScreen));
    }
}
