// spawner.rs - Random sampling for new bodies.
// All randomness comes through `rng`, so tests can pass a seeded StdRng.

use bevy::math::Vec2;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Body, Bounds, EntityKind};

/// x within the field, inset by `radius` when the field is wide enough.
fn sample_x(rng: &mut impl Rng, bounds: &Bounds, radius: f32) -> f32 {
    let low = radius;
    let high = bounds.width - radius;
    if high > low {
        rng.gen_range(low..=high)
    } else {
        bounds.width / 2.0
    }
}

/// An asteroid just above the top edge, falling with some sideways drift.
pub fn asteroid(rng: &mut impl Rng, config: &GameConfig, bounds: &Bounds) -> Body {
    let (min_scale, max_scale) = config.asteroid_scale;
    let scale = rng.gen_range(min_scale..max_scale);
    let radius = config.asteroid_radius * scale;

    let (min_speed, max_speed) = config.asteroid_speed;
    let speed = rng.gen_range(min_speed..max_speed);
    let drift = rng.gen_range(-config.asteroid_drift..=config.asteroid_drift) as f32;

    let x = sample_x(rng, bounds, radius);
    let mut body = Body::new(
        EntityKind::Asteroid,
        Vec2::new(x, bounds.height + radius),
        config.asteroid_radius,
    )
    .with_scale(scale)
    .with_velocity(Vec2::new(drift, -speed));
    body.mass = scale;
    body
}

/// A power-up that crosses the whole field in `power_up_traversal` seconds.
pub fn power_up(rng: &mut impl Rng, config: &GameConfig, bounds: &Bounds) -> Body {
    let radius = config.power_up_radius;
    let x = sample_x(rng, bounds, radius);
    let distance = bounds.height + radius * 2.0;
    let speed = distance / config.power_up_traversal;

    Body::new(
        EntityKind::PowerUp,
        Vec2::new(x, bounds.height + radius),
        radius,
    )
    .with_velocity(Vec2::new(0.0, -speed))
}

/// A planet drifting slowly behind everything else.
pub fn decoration(rng: &mut impl Rng, config: &GameConfig, bounds: &Bounds) -> Body {
    let scale = if config.decoration_scales.is_empty() {
        1.0
    } else {
        config.decoration_scales[rng.gen_range(0..config.decoration_scales.len())]
    };
    let image = rng.gen_range(0..config.decoration_images.max(1));
    let radius = config.decoration_radius * scale;
    let x = rng.gen_range(0.0..bounds.width.max(1.0));
    let speed = (bounds.height + radius * 2.0) / config.decoration_traversal;

    let mut body = Body::new(
        EntityKind::BackgroundDecoration,
        Vec2::new(x, bounds.height + radius),
        config.decoration_radius,
    )
    .with_scale(scale)
    .with_velocity(Vec2::new(0.0, -speed));
    body.image = image;
    body
}

/// A shot leaving the ship straight up.
pub fn projectile(config: &GameConfig, bounds: &Bounds, origin: Vec2) -> Body {
    Body::new(EntityKind::Projectile, origin, config.projectile_radius)
        .with_velocity(Vec2::new(0.0, bounds.height * config.projectile_speed))
}

/// The player's ship, bottom centre.
pub fn spaceship(config: &GameConfig, bounds: &Bounds) -> Body {
    let position = Vec2::new(
        bounds.width / 2.0,
        config.ship_radius + config.ship_spawn_offset,
    );
    Body::new(EntityKind::Spaceship, position, config.ship_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn asteroids_sample_within_ranges() {
        let mut rng = seeded_rng();
        let config = GameConfig::default();
        let bounds = Bounds::new(480.0, 800.0);

        for _ in 0..500 {
            let rock = asteroid(&mut rng, &config, &bounds);
            assert!(rock.scale >= 0.2 && rock.scale < 1.2);
            assert_eq!(rock.mass, rock.scale);
            assert!(rock.velocity.y <= -100.0 && rock.velocity.y > -400.0);
            assert!(rock.velocity.x >= -50.0 && rock.velocity.x <= 50.0);
            assert_eq!(rock.velocity.x.fract(), 0.0);
            assert!(rock.position.x >= rock.radius);
            assert!(rock.position.x <= bounds.width - rock.radius);
            assert_eq!(rock.position.y, bounds.height + rock.radius);
        }
    }

    #[test]
    fn power_up_crosses_field_in_traversal_time() {
        let mut rng = seeded_rng();
        let config = GameConfig::default();
        let bounds = Bounds::new(480.0, 800.0);
        let item = power_up(&mut rng, &config, &bounds);

        let travelled = -item.velocity.y * config.power_up_traversal;
        assert!((travelled - (bounds.height + item.radius * 2.0)).abs() < 1e-3);
        assert_eq!(item.velocity.x, 0.0);
    }

    #[test]
    fn decoration_picks_from_fixed_sets() {
        let mut rng = seeded_rng();
        let config = GameConfig::default();
        let bounds = Bounds::new(480.0, 800.0);

        for _ in 0..100 {
            let planet = decoration(&mut rng, &config, &bounds);
            assert!(config.decoration_scales.contains(&planet.scale));
            assert!(planet.image < config.decoration_images);
            assert!(planet.velocity.y < 0.0);
        }
    }

    #[test]
    fn narrow_field_still_spawns() {
        let mut rng = seeded_rng();
        let config = GameConfig::default();
        let bounds = Bounds::new(10.0, 100.0);
        let rock = asteroid(&mut rng, &config, &bounds);
        assert!(rock.position.x.is_finite());
    }
}
