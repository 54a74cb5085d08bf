use std::f32::consts::FRAC_PI_2;

use bevy::math::Vec2;

use crate::entities::{Body, Bounds};

/// Steering gains are tuned per frame at this rate; velocities are stored per second.
pub const REFERENCE_FPS: f32 = 60.0;

pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    (1.0 - t) * start + t * end
}

/// New ship velocity after a touch at `target`.
///
/// The ship wants to close `gain` of the remaining distance each frame, but the
/// current velocity only moves `easing` of the way there, so direction changes
/// feel smooth instead of snapping.
pub fn steer_velocity(current: Vec2, ship: Vec2, target: Vec2, gain: f32, easing: f32) -> Vec2 {
    let wanted = (target - ship) * gain * REFERENCE_FPS;
    Vec2::new(
        lerp(current.x, wanted.x, easing),
        lerp(current.y, wanted.y, easing),
    )
}

/// Heading that points the ship's nose (drawn facing up) at `target`.
pub fn heading_toward(ship: Vec2, target: Vec2) -> f32 {
    let diff = target - ship;
    diff.y.atan2(diff.x) - FRAC_PI_2
}

/// Moves a body along its velocity.
pub fn integrate(body: &mut Body, delta: f32) {
    body.position += body.velocity * delta;
}

/// Moves the ship and keeps it fully inside the field.
pub fn integrate_ship(ship: &mut Body, bounds: &Bounds, delta: f32) {
    integrate(ship, delta);
    ship.position = bounds.clamp_inset(ship.position, ship.radius);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EntityKind;

    #[test]
    fn steering_eases_toward_touch() {
        let v = steer_velocity(Vec2::ZERO, Vec2::ZERO, Vec2::new(100.0, 0.0), 0.05, 0.2);
        // 100 * 0.05 = 5 units per frame wanted, eased by 0.2 -> 1 per frame.
        assert!((v.x - REFERENCE_FPS).abs() < 1e-3);
        assert_eq!(v.y, 0.0);

        let again = steer_velocity(v, Vec2::ZERO, Vec2::new(100.0, 0.0), 0.05, 0.2);
        assert!(again.x > v.x);
    }

    #[test]
    fn heading_points_nose_at_target() {
        assert!(heading_toward(Vec2::ZERO, Vec2::new(0.0, 10.0)).abs() < 1e-6);
        let right = heading_toward(Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((right + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn ship_stays_inside_field() {
        let bounds = Bounds::new(200.0, 300.0);
        let mut ship = Body::new(EntityKind::Spaceship, Vec2::new(190.0, 150.0), 20.0)
            .with_velocity(Vec2::new(1000.0, 0.0));
        integrate_ship(&mut ship, &bounds, 1.0);
        assert_eq!(ship.position, Vec2::new(180.0, 150.0));
    }
}
