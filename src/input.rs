// input.rs - Mouse and touch input for the game screen.
//
// A press is classified once: it either hits one of the on-screen buttons or
// steers the ship. A press that started as steering keeps steering while the
// finger (or mouse button) is held and dragged.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::entities::Bounds;
use crate::game::tick_session_system;
use crate::resources::{to_field, Screen};
use crate::session::{Phase, Session};

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                pointer_input_system.before(tick_session_system),
                back_to_menu_system,
            )
                .run_if(in_state(Screen::Game).and(resource_exists::<Session>)),
        );
    }
}

/// What a press at some point on the field means.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchAction {
    Fire,
    ToggleMute,
    Restart,
    Steer(Vec2),
}

/// Axis-aligned hit area in field coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitBox {
    pub center: Vec2,
    pub half_size: Vec2,
}

impl HitBox {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        HitBox {
            center,
            half_size: size / 2.0,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half_size.x && d.y <= self.half_size.y
    }

    pub fn size(&self) -> Vec2 {
        self.half_size * 2.0
    }
}

/// Where the on-screen buttons sit. Drawn by the HUD, hit-tested here.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ButtonLayout {
    pub fire: HitBox,
    pub mute: HitBox,
    pub restart: HitBox,
}

impl ButtonLayout {
    /// Mute in the bottom-right corner, the blaster to its left, restart
    /// just under the middle of the field.
    pub fn for_bounds(bounds: Bounds) -> Self {
        let fire_x = (bounds.width - 300.0).max(60.0);
        ButtonLayout {
            fire: HitBox::new(Vec2::new(fire_x, 70.0), Vec2::splat(90.0)),
            mute: HitBox::new(Vec2::new(bounds.width - 50.0, 50.0), Vec2::splat(60.0)),
            restart: HitBox::new(
                Vec2::new(bounds.width / 2.0, bounds.height / 2.0 - 100.0),
                Vec2::new(200.0, 70.0),
            ),
        }
    }
}

/// Buttons win over steering; the restart button only counts while shown.
pub fn classify_touch(point: Vec2, layout: &ButtonLayout, restart_visible: bool) -> TouchAction {
    if layout.fire.contains(point) {
        TouchAction::Fire
    } else if layout.mute.contains(point) {
        TouchAction::ToggleMute
    } else if restart_visible && layout.restart.contains(point) {
        TouchAction::Restart
    } else {
        TouchAction::Steer(point)
    }
}

/// Window position -> field position, through the 2D camera.
fn window_to_field(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    bounds: Bounds,
    position: Vec2,
) -> Option<Vec2> {
    let world = camera.viewport_to_world_2d(camera_transform, position).ok()?;
    Some(to_field(bounds, world))
}

/// Applies one frame of pointer input, all in field coordinates.
///
/// `presses` began this frame; `held` is where a still-held pointer is now.
/// A press that steered already counts as this frame's steering, so the
/// drag only takes over from the next frame.
pub fn apply_pointer_frame(
    session: &mut Session,
    layout: &ButtonLayout,
    presses: &[Vec2],
    held: Option<Vec2>,
    dragging: &mut bool,
) {
    let mut steered = false;
    for &point in presses {
        let restart_visible = session.phase() == Phase::GameOver;
        match classify_touch(point, layout, restart_visible) {
            TouchAction::Fire => {
                session.try_fire();
            }
            TouchAction::ToggleMute => {
                session.toggle_mute();
            }
            TouchAction::Restart => {
                *dragging = false;
                session.restart();
            }
            TouchAction::Steer(target) => {
                *dragging = true;
                steered = true;
                session.steer_toward(target);
            }
        }
    }

    match held {
        Some(target) if *dragging && !steered => session.steer_toward(target),
        Some(_) => {}
        None => *dragging = false,
    }
}

fn pointer_input_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    layout: Res<ButtonLayout>,
    mut session: ResMut<Session>,
    mut dragging: Local<bool>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let bounds = session.bounds();
    let cursor = || windows.single().ok().and_then(|w| w.cursor_position());

    // Fresh presses: touches first, then the left mouse button.
    let mut pressed: Vec<Vec2> = touches
        .iter_just_pressed()
        .map(|touch| touch.position())
        .collect();
    if mouse.just_pressed(MouseButton::Left) {
        pressed.extend(cursor());
    }
    let presses: Vec<Vec2> = pressed
        .into_iter()
        .filter_map(|position| window_to_field(camera, camera_transform, bounds, position))
        .collect();

    let held = touches
        .iter()
        .next()
        .map(|touch| touch.position())
        .or_else(|| mouse.pressed(MouseButton::Left).then(cursor).flatten())
        .and_then(|position| window_to_field(camera, camera_transform, bounds, position));

    apply_pointer_frame(&mut session, &layout, &presses, held, &mut dragging);
}

fn back_to_menu_system(keys: Res<ButtonInput<KeyCode>>, mut next_screen: ResMut<NextState<Screen>>) {
    if keys.just_pressed(KeyCode::Escape) {
        next_screen.set(Screen::Menu);
    }
}
