// resources.rs - Screen state and the mapping between field and world space.
// The session measures the field from its bottom-left corner; the 2D camera
// puts the world origin in the middle of the window.

use bevy::prelude::*;

use crate::entities::Bounds;

#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    #[default]
    Menu,
    Game,
}

/// Marker for everything spawned for the game screen, despawned on exit.
#[derive(Component)]
pub struct GameScreen;

/// Field point -> world point.
pub fn to_world(bounds: Bounds, point: Vec2) -> Vec2 {
    point - bounds.center()
}

/// World point -> field point.
pub fn to_field(bounds: Bounds, point: Vec2) -> Vec2 {
    point + bounds.center()
}

/// Field size for the current window, falling back to the configured size
/// when the window reports nothing usable.
pub fn field_bounds(window: Option<&Window>, fallback: (f32, f32)) -> Bounds {
    match window {
        Some(window) if window.width() > 0.0 && window.height() > 0.0 => {
            Bounds::new(window.width(), window.height())
        }
        _ => Bounds::new(fallback.0, fallback.1),
    }
}
