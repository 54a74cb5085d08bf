// collision.rs - Contact detection and the collision dispatch table.
//
// Detection finds overlapping pairs whose categories are interested in each
// other and reports each pair once, when the overlap starts. Resolution maps a
// pair of kinds to an Effect; applying it is the session's job.

use std::collections::HashSet;

use crate::entities::{Body, Category, EntityId, EntityKind};

/// What should happen when two kinds touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Ship hit a rock: both explode, game over.
    DestroyShip { ship: Side, asteroid: Side },
    /// A shot hit a rock: both explode, score goes up.
    DestroyAsteroid { projectile: Side, asteroid: Side },
    /// Ship picked up a power-up: shield on, power-up removed.
    GrantShield { ship: Side, power_up: Side },
    Ignore,
}

/// Which side of the contact pair a role was found on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn pick<T>(self, a: T, b: T) -> T {
        match self {
            Side::A => a,
            Side::B => b,
        }
    }
}

/// The dispatch table. Order-independent: `resolve(a, b)` names the same
/// effect as `resolve(b, a)`, with the sides swapped.
pub fn resolve(a: EntityKind, b: EntityKind) -> Effect {
    use EntityKind::*;

    match (a, b) {
        (Spaceship, Asteroid) => Effect::DestroyShip {
            ship: Side::A,
            asteroid: Side::B,
        },
        (Asteroid, Spaceship) => Effect::DestroyShip {
            ship: Side::B,
            asteroid: Side::A,
        },
        (Projectile, Asteroid) => Effect::DestroyAsteroid {
            projectile: Side::A,
            asteroid: Side::B,
        },
        (Asteroid, Projectile) => Effect::DestroyAsteroid {
            projectile: Side::B,
            asteroid: Side::A,
        },
        (Spaceship, PowerUp) => Effect::GrantShield {
            ship: Side::A,
            power_up: Side::B,
        },
        (PowerUp, Spaceship) => Effect::GrantShield {
            ship: Side::B,
            power_up: Side::A,
        },
        _ => Effect::Ignore,
    }
}

/// Unordered pair key, smaller id first.
fn pair_key(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Remembers which pairs were touching last frame so contacts fire on onset only.
#[derive(Debug, Default)]
pub struct ContactTracker {
    touching: HashSet<(EntityId, EntityId)>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pairs that started touching this frame.
    ///
    /// `category_of` gives each body's current category, which lets an
    /// invincible ship drop out of filtering without changing its kind.
    /// Bodies with no category take part in no contacts at all.
    pub fn detect<'a>(
        &mut self,
        bodies: impl IntoIterator<Item = &'a Body>,
        category_of: impl Fn(&Body) -> Category,
    ) -> Vec<(EntityId, EntityId)> {
        let candidates: Vec<(&Body, Category)> = bodies
            .into_iter()
            .map(|body| (body, category_of(body)))
            .filter(|(_, category)| *category != Category::NONE)
            .collect();

        let mut now_touching = HashSet::new();
        let mut started = Vec::new();

        for i in 0..candidates.len() {
            for j in (i + 1)..candidates.len() {
                let (a, cat_a) = candidates[i];
                let (b, cat_b) = candidates[j];

                let interested = a.kind.contact_mask().intersects(cat_b)
                    || b.kind.contact_mask().intersects(cat_a);
                if !interested || !a.overlaps(b) {
                    continue;
                }

                let key = pair_key(a.id, b.id);
                if !self.touching.contains(&key) {
                    started.push((a.id, b.id));
                }
                now_touching.insert(key);
            }
        }

        self.touching = now_touching;
        started
    }

    pub fn clear(&mut self) {
        self.touching.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;
    use EntityKind::*;

    fn body(id: u64, kind: EntityKind, x: f32) -> Body {
        let mut body = Body::new(kind, Vec2::new(x, 0.0), 10.0);
        body.id = EntityId(id);
        body
    }

    #[test]
    fn table_is_order_independent() {
        let kinds = [Spaceship, Asteroid, Projectile, PowerUp, BackgroundDecoration];
        for a in kinds {
            for b in kinds {
                let forward = resolve(a, b);
                let backward = resolve(b, a);
                let same_effect = std::mem::discriminant(&forward) == std::mem::discriminant(&backward);
                assert!(same_effect, "{a:?} x {b:?}");
            }
        }
    }

    #[test]
    fn table_names_the_right_sides() {
        assert_eq!(
            resolve(Asteroid, Spaceship),
            Effect::DestroyShip {
                ship: Side::B,
                asteroid: Side::A
            }
        );
        assert_eq!(
            resolve(Projectile, Asteroid),
            Effect::DestroyAsteroid {
                projectile: Side::A,
                asteroid: Side::B
            }
        );
        assert_eq!(
            resolve(PowerUp, Spaceship),
            Effect::GrantShield {
                ship: Side::B,
                power_up: Side::A
            }
        );
    }

    #[test]
    fn unmatched_pairs_are_ignored() {
        assert_eq!(resolve(Asteroid, Asteroid), Effect::Ignore);
        assert_eq!(resolve(Projectile, PowerUp), Effect::Ignore);
        assert_eq!(resolve(Spaceship, Projectile), Effect::Ignore);
        assert_eq!(resolve(BackgroundDecoration, Spaceship), Effect::Ignore);
    }

    #[test]
    fn contact_fires_on_onset_only() {
        let mut tracker = ContactTracker::new();
        let bodies = vec![body(1, Spaceship, 0.0), body(2, Asteroid, 5.0)];

        let first = tracker.detect(&bodies, |b| b.kind.category());
        assert_eq!(first.len(), 1);
        let second = tracker.detect(&bodies, |b| b.kind.category());
        assert!(second.is_empty());

        let apart = vec![body(1, Spaceship, 0.0), body(2, Asteroid, 500.0)];
        assert!(tracker.detect(&apart, |b| b.kind.category()).is_empty());
        assert_eq!(tracker.detect(&bodies, |b| b.kind.category()).len(), 1);
    }

    #[test]
    fn filtering_skips_uninterested_pairs() {
        let mut tracker = ContactTracker::new();
        let bodies = vec![
            body(1, Asteroid, 0.0),
            body(2, Asteroid, 1.0),
            body(3, BackgroundDecoration, 2.0),
            body(4, PowerUp, 3.0),
            body(5, Projectile, 4.0),
        ];
        let contacts = tracker.detect(&bodies, |b| b.kind.category());
        // Only projectile x asteroid pairs are interesting here.
        assert_eq!(contacts.len(), 2);
    }

    #[test]
    fn uncategorised_ship_is_not_hit() {
        let mut tracker = ContactTracker::new();
        let bodies = vec![body(1, Spaceship, 0.0), body(2, Asteroid, 5.0)];
        let contacts = tracker.detect(&bodies, |b| match b.kind {
            Spaceship => Category::NONE,
            other => other.category(),
        });
        assert!(contacts.is_empty());
    }
}
