use bevy::prelude::*;

use crate::config::GameConfig;
use crate::resources::Screen;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Astro Dash".into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(GameConfig::load())
        .init_state::<Screen>()
        .add_plugins((
            save_load::SaveLoadPlugin,
            audio::AudioPlugin,
            render::RenderPlugin,
            effects::EffectsPlugin,
            menu::MenuPlugin,
            game::GamePlugin,
            input::InputPlugin,
            hud::HudPlugin,
        ))
        .add_systems(Startup, spawn_camera)
        .run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

mod audio;
mod collision;
mod config;
mod effects;
mod entities;
mod game;
mod high_scores;
mod hud;
mod input;
mod menu;
mod movement;
mod registry;
mod render;
mod resources;
mod save_load;
mod scheduler;
mod session;
mod spawner;
