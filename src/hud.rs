// hud.rs - Score, countdown and game-over panel, plus the in-field buttons.
//
// Text lives in UI nodes. The blaster, mute and restart buttons are sprites in
// world space, placed from the same ButtonLayout the input system hit-tests.

use bevy::prelude::*;

use crate::game::{GameFinished, GameNotice};
use crate::input::{ButtonLayout, HitBox};
use crate::render::GameImages;
use crate::resources::{to_world, GameScreen, Screen};
use crate::session::{Phase, Session, SessionEvent};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            spawn_field_buttons.run_if(
                in_state(Screen::Game)
                    .and(resource_exists::<Session>)
                    .and(not(any_with_component::<FieldButton>)),
            ),
        )
        .add_systems(OnEnter(Screen::Game), spawn_hud)
        .add_observer(on_hud_notice)
        .add_observer(on_game_finished);
    }
}

/// Which line of HUD text this is.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
enum HudText {
    Score,
    Countdown,
    GameOver,
    FinalScore,
    NewHighScore,
}

#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
enum FieldButton {
    Fire,
    Mute,
    Restart,
}

const MUTED_TINT: Color = Color::srgba(0.5, 0.5, 0.5, 0.6);

pub fn score_label(score: u32) -> String {
    format!("Score: {score}")
}

pub fn final_score_label(score: u32) -> String {
    format!("Final Score: {score}")
}

fn hud_line(kind: HudText, text: &str, font_size: f32, color: Color, visible: bool) -> impl Bundle {
    (
        kind,
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        TextLayout::new_with_justify(Justify::Center),
        if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        },
    )
}

fn spawn_hud(mut commands: Commands) {
    // Score in the top-left corner
    commands
        .spawn((
            GameScreen,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                top: Val::Px(20.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn(hud_line(HudText::Score, &score_label(0), 32.0, Color::WHITE, true));
        });

    // Countdown and game-over text stacked in the middle
    commands
        .spawn((
            GameScreen,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(20.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn(hud_line(HudText::Countdown, "", 120.0, Color::WHITE, true));
            parent.spawn(hud_line(HudText::GameOver, "Game Over!", 64.0, Color::srgb(0.9, 0.2, 0.2), false));
            parent.spawn(hud_line(HudText::FinalScore, "", 40.0, Color::WHITE, false));
            parent.spawn(hud_line(
                HudText::NewHighScore,
                "Congratulations, new high score!",
                28.0,
                Color::srgb(1.0, 0.85, 0.2),
                false,
            ));
        });
}

/// Runs once per game, as soon as the layout exists.
fn spawn_field_buttons(
    mut commands: Commands,
    session: Res<Session>,
    layout: Res<ButtonLayout>,
    images: Res<GameImages>,
) {
    let bounds = session.bounds();
    let buttons: [(FieldButton, HitBox, &Handle<Image>); 3] = [
        (FieldButton::Fire, layout.fire, &images.blaster),
        (FieldButton::Mute, layout.mute, &images.music),
        (FieldButton::Restart, layout.restart, &images.restart),
    ];

    for (button, hit_box, image) in buttons {
        let p = to_world(bounds, hit_box.center);
        let visibility = if button == FieldButton::Restart {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
        let mut entity = commands.spawn((
            button,
            GameScreen,
            Sprite {
                image: image.clone(),
                custom_size: Some(hit_box.size()),
                ..default()
            },
            Transform::from_xyz(p.x, p.y, 10.0),
            visibility,
        ));
        if button == FieldButton::Restart {
            entity.with_children(|parent| {
                parent.spawn((
                    Text2d::new("Restart?"),
                    TextFont {
                        font_size: 28.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    Transform::from_xyz(0.0, -hit_box.size().y, 0.1),
                ));
            });
        }
    }
}

fn set_visible(visibility: &mut Visibility, visible: bool) {
    *visibility = if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
}

fn on_hud_notice(
    trigger: On<GameNotice>,
    mut texts: Query<(&HudText, &mut Text, &mut Visibility)>,
    mut buttons: Query<(&FieldButton, &mut Sprite, &mut Visibility), Without<HudText>>,
) {
    match &trigger.0 {
        &SessionEvent::ScoreChanged(score) => {
            for (kind, mut text, _) in &mut texts {
                if *kind == HudText::Score {
                    **text = score_label(score);
                }
            }
        }
        &SessionEvent::CountdownTick(n) => {
            for (kind, mut text, mut visibility) in &mut texts {
                if *kind == HudText::Countdown {
                    **text = n.to_string();
                    set_visible(&mut visibility, true);
                }
            }
        }
        SessionEvent::PhaseChanged(Phase::Playing) => {
            for (kind, _, mut visibility) in &mut texts {
                if *kind == HudText::Countdown {
                    set_visible(&mut visibility, false);
                }
            }
        }
        SessionEvent::Restarted => {
            for (kind, _, mut visibility) in &mut texts {
                if matches!(kind, HudText::GameOver | HudText::FinalScore | HudText::NewHighScore) {
                    set_visible(&mut visibility, false);
                }
            }
            for (button, _, mut visibility) in &mut buttons {
                if *button == FieldButton::Restart {
                    set_visible(&mut visibility, false);
                }
            }
        }
        &SessionEvent::MuteToggled(muted) => {
            for (button, mut sprite, _) in &mut buttons {
                if *button == FieldButton::Mute {
                    sprite.color = if muted { MUTED_TINT } else { Color::WHITE };
                }
            }
        }
        _ => {}
    }
}

fn on_game_finished(
    trigger: On<GameFinished>,
    mut texts: Query<(&HudText, &mut Text, &mut Visibility)>,
    mut buttons: Query<(&FieldButton, &mut Visibility), Without<HudText>>,
) {
    for (kind, mut text, mut visibility) in &mut texts {
        match kind {
            HudText::GameOver => set_visible(&mut visibility, true),
            HudText::FinalScore => {
                **text = final_score_label(trigger.final_score);
                set_visible(&mut visibility, true);
            }
            HudText::NewHighScore => set_visible(&mut visibility, trigger.new_high_score),
            HudText::Score | HudText::Countdown => {}
        }
    }

    for (button, mut visibility) in &mut buttons {
        if *button == FieldButton::Restart {
            set_visible(&mut visibility, true);
        }
    }
}
