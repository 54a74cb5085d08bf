// registry.rs - Owns every live body in the session.
// Lookups by id tolerate "not found": removing something twice is a no-op.

use std::collections::BTreeMap;

use bevy::log::debug;

use crate::entities::{Body, Bounds, EntityId, EntityKind};

#[derive(Debug, Default)]
pub struct EntityRegistry {
    bodies: BTreeMap<EntityId, Body>,
    next_id: u64,
    asteroid_count: usize,
    spaceship: Option<EntityId>,
    /// The single background decoration slot.
    decoration: Option<EntityId>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the body under a fresh id and returns that id.
    /// A second spaceship or decoration replaces the slot holder's registration,
    /// so callers are expected to check the slot first.
    pub fn insert(&mut self, mut body: Body) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        body.id = id;

        match body.kind {
            EntityKind::Asteroid => self.asteroid_count += 1,
            EntityKind::Spaceship => self.spaceship = Some(id),
            EntityKind::BackgroundDecoration => self.decoration = Some(id),
            EntityKind::Projectile | EntityKind::PowerUp => {}
        }

        self.bodies.insert(id, body);
        id
    }

    /// Removes a body. Returns it if it was still live.
    pub fn remove(&mut self, id: EntityId) -> Option<Body> {
        let body = self.bodies.remove(&id)?;
        match body.kind {
            EntityKind::Asteroid => self.asteroid_count -= 1,
            EntityKind::Spaceship => self.spaceship = None,
            EntityKind::BackgroundDecoration => self.decoration = None,
            EntityKind::Projectile | EntityKind::PowerUp => {}
        }
        Some(body)
    }

    pub fn get(&self, id: EntityId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.bodies.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.values_mut()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn asteroid_count(&self) -> usize {
        self.asteroid_count
    }

    pub fn spaceship(&self) -> Option<&Body> {
        self.spaceship.and_then(|id| self.bodies.get(&id))
    }

    pub fn spaceship_id(&self) -> Option<EntityId> {
        self.spaceship
    }

    pub fn decoration(&self) -> Option<EntityId> {
        self.decoration
    }

    /// Removes every body that has fully left the field and returns them.
    pub fn prune_off_screen(&mut self, bounds: &Bounds) -> Vec<Body> {
        let gone: Vec<EntityId> = self
            .bodies
            .values()
            .filter(|body| body.kind != EntityKind::Spaceship && bounds.has_left(body))
            .map(|body| body.id)
            .collect();

        let removed: Vec<Body> = gone.into_iter().filter_map(|id| self.remove(id)).collect();
        if !removed.is_empty() {
            debug!(
                "Pruned {} off-screen bodies, {} asteroids live",
                removed.len(),
                self.asteroid_count
            );
        }
        removed
    }

    /// Drops everything. Ids keep counting up so stale ids never match.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.asteroid_count = 0;
        self.spaceship = None;
        self.decoration = None;
    }
}
