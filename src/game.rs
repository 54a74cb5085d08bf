// game.rs - Drives the Session from Bevy and turns its events into observers.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::GameConfig;
use crate::input::ButtonLayout;
use crate::resources::{field_bounds, GameScreen, Screen};
use crate::save_load::HighScoreBoard;
use crate::session::{Session, SessionEvent};

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Game), start_session)
            .add_systems(OnExit(Screen::Game), end_session)
            .add_systems(
                Update,
                (tick_session_system, dispatch_session_events)
                    .chain()
                    .run_if(in_state(Screen::Game).and(resource_exists::<Session>)),
            )
            .add_observer(on_game_over);
    }
}

/// One session event, forwarded to whichever observers care about it.
#[derive(Event, Debug, Clone)]
pub struct GameNotice(pub SessionEvent);

/// Fired once the final score has been recorded.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameFinished {
    pub final_score: u32,
    pub new_high_score: bool,
}

fn start_session(
    mut commands: Commands,
    config: Res<GameConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let bounds = field_bounds(windows.single().ok(), config.field_size);
    info!("Starting a game on a {}x{} field", bounds.width, bounds.height);

    commands.insert_resource(ButtonLayout::for_bounds(bounds));
    commands.insert_resource(Session::new(GameConfig::clone(&config), bounds));
}

fn end_session(mut commands: Commands, leftovers: Query<Entity, With<GameScreen>>) {
    for entity in &leftovers {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<Session>();
    commands.remove_resource::<ButtonLayout>();
}

pub fn tick_session_system(time: Res<Time>, mut session: ResMut<Session>) {
    session.tick(time.delta_secs_f64());
}

pub fn dispatch_session_events(mut commands: Commands, mut session: ResMut<Session>) {
    for event in session.drain_events() {
        commands.trigger(GameNotice(event));
    }
}

fn on_game_over(
    trigger: On<GameNotice>,
    mut commands: Commands,
    board: Option<ResMut<HighScoreBoard>>,
) {
    let &SessionEvent::GameOver { final_score } = &trigger.0 else {
        return;
    };

    let new_high_score = match board {
        Some(mut board) => board.record(final_score),
        None => {
            warn!("High score board missing; score {} not recorded", final_score);
            false
        }
    };

    commands.trigger(GameFinished {
        final_score,
        new_high_score,
    });
}
