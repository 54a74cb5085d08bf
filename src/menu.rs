// menu.rs - Title screen with the start button and the top-3 table.

use bevy::prelude::*;

use crate::resources::Screen;
use crate::save_load::HighScoreBoard;

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Menu), spawn_menu_ui)
            .add_systems(OnExit(Screen::Menu), cleanup_menu_ui)
            .add_systems(
                Update,
                (start_button_system, start_key_system).run_if(in_state(Screen::Menu)),
            );
    }
}

#[derive(Component)]
struct MenuUi;

#[derive(Component)]
struct StartButton;

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.2, 0.45);
const BUTTON_HOVER: Color = Color::srgb(0.25, 0.3, 0.6);

/// Lines for the high-score list, best first.
pub fn high_score_lines(scores: &[u32]) -> Vec<String> {
    if scores.is_empty() {
        return vec!["No high scores yet".to_string()];
    }
    scores
        .iter()
        .enumerate()
        .map(|(rank, score)| format!("{}. {}", rank + 1, score))
        .collect()
}

fn spawn_menu_ui(mut commands: Commands, board: Option<Res<HighScoreBoard>>) {
    let scores: Vec<u32> = board
        .map(|board| board.table.scores().to_vec())
        .unwrap_or_default();

    commands
        .spawn((
            MenuUi,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(30.0),
                ..default()
            },
            BackgroundColor(Color::NONE),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Astro Dash"),
                TextFont {
                    font_size: 80.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            parent
                .spawn((
                    Button,
                    Node {
                        width: Val::Px(260.0),
                        height: Val::Px(80.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(BUTTON_IDLE),
                    BorderColor::all(Color::srgb(0.5, 0.6, 0.9)),
                    StartButton,
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("Start Game"),
                        TextFont {
                            font_size: 40.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });

            parent.spawn((
                Text::new("High Scores"),
                TextFont {
                    font_size: 32.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.85, 0.2)),
            ));
            for line in high_score_lines(&scores) {
                parent.spawn((
                    Text::new(line),
                    TextFont {
                        font_size: 28.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            }
        });
}

fn start_button_system(
    mut query: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<StartButton>)>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    for (interaction, mut background) in &mut query {
        match *interaction {
            Interaction::Pressed => next_screen.set(Screen::Game),
            Interaction::Hovered => background.0 = BUTTON_HOVER,
            Interaction::None => background.0 = BUTTON_IDLE,
        }
    }
}

fn start_key_system(keys: Res<ButtonInput<KeyCode>>, mut next_screen: ResMut<NextState<Screen>>) {
    if keys.just_pressed(KeyCode::Enter) || keys.just_pressed(KeyCode::Space) {
        next_screen.set(Screen::Game);
    }
}

fn cleanup_menu_ui(mut commands: Commands, query: Query<Entity, With<MenuUi>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_has_a_placeholder() {
        assert_eq!(high_score_lines(&[]), vec!["No high scores yet"]);
    }

    #[test]
    fn scores_are_ranked() {
        assert_eq!(high_score_lines(&[90, 40]), vec!["1. 90", "2. 40"]);
    }
}
