// session.rs - One game from countdown to game over, and every restart after.
//
// The Session owns all mutable game state: the bodies, the timers, the score
// and the phase. Nothing here knows about Bevy's ECS. The host calls `tick`
// once per frame, forwards input, and drains `SessionEvent`s to keep sprites,
// HUD and audio in step.

use bevy::log::{debug, error, info};
use bevy::math::Vec2;
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::collision::{resolve, ContactTracker, Effect};
use crate::config::GameConfig;
use crate::entities::{Body, Bounds, Category, EntityId, EntityKind};
use crate::movement::{heading_toward, integrate, integrate_ship, steer_velocity};
use crate::registry::EntityRegistry;
use crate::scheduler::{Scheduler, TimerKey};
use crate::spawner;

/// Slack for comparing accumulated frame times against whole intervals.
const TIME_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Counting down; the number is what is currently on screen.
    Countdown(u32),
    Playing,
    GameOver,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub score: u32,
    pub phase: Phase,
    pub is_muted: bool,
    /// Session time at which the shield drops, while one is up.
    pub invincible_until: Option<f64>,
    /// Session time of the last successful shot.
    pub last_fire: Option<f64>,
}

impl GameState {
    fn new(countdown: u32, is_muted: bool) -> Self {
        GameState {
            score: 0,
            phase: Phase::Countdown(countdown),
            is_muted,
            invincible_until: None,
            last_fire: None,
        }
    }
}

/// Something the host should react to.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Spawned { id: EntityId, kind: EntityKind },
    Despawned { id: EntityId },
    Explosion { kind: EntityKind, position: Vec2 },
    ScoreChanged(u32),
    CountdownTick(u32),
    PhaseChanged(Phase),
    GameOver { final_score: u32 },
    ShieldRaised,
    ShieldLowered,
    MuteToggled(bool),
    Restarted,
}

/// A shielded ship has no category, so nothing can touch it.
fn effective_category(body: &Body, shielded: bool) -> Category {
    if body.kind == EntityKind::Spaceship && shielded {
        Category::NONE
    } else {
        body.kind.category()
    }
}

#[derive(Resource)]
pub struct Session {
    config: GameConfig,
    bounds: Bounds,
    state: GameState,
    registry: EntityRegistry,
    scheduler: Scheduler,
    contacts: ContactTracker,
    rng: StdRng,
    /// Seconds since the session was created. Keeps running after game over.
    clock: f64,
    events: Vec<SessionEvent>,
}

impl Session {
    pub fn new(config: GameConfig, bounds: Bounds) -> Self {
        Self::with_rng(config, bounds, StdRng::from_entropy())
    }

    /// An invalid config is replaced by the defaults.
    pub fn with_rng(config: GameConfig, bounds: Bounds, rng: StdRng) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                error!("Invalid game config: {}. Using defaults.", e);
                GameConfig::default()
            }
        };
        let state = GameState::new(config.countdown, false);
        let mut session = Session {
            config,
            bounds,
            state,
            registry: EntityRegistry::new(),
            scheduler: Scheduler::new(),
            contacts: ContactTracker::new(),
            rng,
            clock: 0.0,
            events: Vec::new(),
        };
        session.begin();
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_invincible(&self) -> bool {
        self.state
            .invincible_until
            .is_some_and(|until| self.clock < until)
    }

    /// Takes every event recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Lifecycle ───────────────────────────────────────────────────────────

    /// Scene entry: ship, background timer, countdown.
    fn begin(&mut self) {
        let ship = spawner::spaceship(&self.config, &self.bounds);
        self.add(ship);

        self.scheduler.schedule_repeating(
            TimerKey::SpawnDecoration,
            self.clock,
            self.config.decoration_interval,
        );

        let count = self.config.countdown;
        if count == 0 {
            self.start_playing();
            return;
        }

        self.state.phase = Phase::Countdown(count);
        self.scheduler
            .schedule_repeating(TimerKey::Countdown, self.clock + 1.0, 1.0);
        self.events.push(SessionEvent::PhaseChanged(self.state.phase));
        self.events.push(SessionEvent::CountdownTick(count));
    }

    fn start_playing(&mut self) {
        self.scheduler.cancel(TimerKey::Countdown);
        self.state.phase = Phase::Playing;

        // Spawners fire right away, the score only after its first interval.
        self.scheduler.schedule_repeating(
            TimerKey::SpawnAsteroid,
            self.clock,
            self.config.asteroid_interval,
        );
        self.scheduler.schedule_repeating(
            TimerKey::SpawnPowerUp,
            self.clock,
            self.config.power_up_interval,
        );
        self.scheduler.schedule_repeating(
            TimerKey::IncrementScore,
            self.clock + self.config.score_interval,
            self.config.score_interval,
        );

        info!("Countdown finished, game on");
        self.events.push(SessionEvent::PhaseChanged(Phase::Playing));
    }

    fn game_over(&mut self) {
        self.state.phase = Phase::GameOver;
        self.scheduler.cancel(TimerKey::SpawnAsteroid);
        self.scheduler.cancel(TimerKey::SpawnPowerUp);
        self.scheduler.cancel(TimerKey::IncrementScore);

        info!("Game over with {} points", self.state.score);
        self.events.push(SessionEvent::PhaseChanged(Phase::GameOver));
        self.events.push(SessionEvent::GameOver {
            final_score: self.state.score,
        });
    }

    /// Wipes the field and starts over from the countdown. Mute survives.
    pub fn restart(&mut self) {
        info!("Restarting, clearing {} bodies", self.registry.len());
        let ids: Vec<EntityId> = self.registry.iter().map(|body| body.id).collect();
        for id in ids {
            self.events.push(SessionEvent::Despawned { id });
        }
        self.registry.clear();
        self.scheduler.clear();
        self.contacts.clear();
        self.state = GameState::new(self.config.countdown, self.state.is_muted);

        self.events.push(SessionEvent::Restarted);
        self.events.push(SessionEvent::ScoreChanged(0));
        self.begin();
    }

    // ── Frame ───────────────────────────────────────────────────────────────

    /// Advances the session by `delta` seconds.
    pub fn tick(&mut self, delta: f64) {
        self.clock += delta.max(0.0);

        for key in self.scheduler.advance(self.clock) {
            self.on_timer(key);
        }

        self.move_bodies(delta as f32);

        let shielded = self.is_invincible();
        let started = self
            .contacts
            .detect(self.registry.iter(), |body| effective_category(body, shielded));
        for (a, b) in started {
            self.handle_contact(a, b);
        }

        for body in self.registry.prune_off_screen(&self.bounds) {
            self.events.push(SessionEvent::Despawned { id: body.id });
        }
    }

    fn on_timer(&mut self, key: TimerKey) {
        match key {
            TimerKey::Countdown => {
                if let Phase::Countdown(remaining) = self.state.phase {
                    let next = remaining.saturating_sub(1);
                    if next == 0 {
                        self.start_playing();
                    } else {
                        self.state.phase = Phase::Countdown(next);
                        self.events.push(SessionEvent::CountdownTick(next));
                    }
                }
            }
            TimerKey::SpawnAsteroid => {
                self.spawn_asteroid();
            }
            TimerKey::SpawnPowerUp => {
                self.spawn_power_up();
            }
            TimerKey::SpawnDecoration => {
                self.spawn_decoration();
            }
            TimerKey::IncrementScore => {
                if self.state.phase == Phase::Playing {
                    self.add_score(self.config.score_increment);
                }
            }
            TimerKey::Invincibility => {
                self.state.invincible_until = None;
                debug!("Shield down");
                self.events.push(SessionEvent::ShieldLowered);
            }
        }
    }

    fn move_bodies(&mut self, delta: f32) {
        let frozen = self.state.phase == Phase::GameOver;
        let bounds = self.bounds;

        for body in self.registry.iter_mut() {
            if frozen && body.kind.freezes_on_game_over() {
                continue;
            }
            match body.kind {
                EntityKind::Spaceship => integrate_ship(body, &bounds, delta),
                _ => integrate(body, delta),
            }
        }
    }

    // ── Spawning ────────────────────────────────────────────────────────────

    fn add(&mut self, body: Body) -> EntityId {
        let kind = body.kind;
        let id = self.registry.insert(body);
        self.events.push(SessionEvent::Spawned { id, kind });
        id
    }

    /// Spawns an asteroid unless the field is already at capacity.
    pub fn spawn_asteroid(&mut self) -> Option<EntityId> {
        if self.registry.asteroid_count() >= self.config.max_asteroids {
            return None;
        }
        let rock = spawner::asteroid(&mut self.rng, &self.config, &self.bounds);
        let id = self.add(rock);
        debug!("Asteroids live: {}", self.registry.asteroid_count());
        Some(id)
    }

    pub fn spawn_power_up(&mut self) -> EntityId {
        let item = spawner::power_up(&mut self.rng, &self.config, &self.bounds);
        self.add(item)
    }

    /// Spawns a planet unless one is already drifting by.
    pub fn spawn_decoration(&mut self) -> Option<EntityId> {
        if self.registry.decoration().is_some() {
            debug!("Background object already active");
            return None;
        }
        let planet = spawner::decoration(&mut self.rng, &self.config, &self.bounds);
        Some(self.add(planet))
    }

    // ── Input ───────────────────────────────────────────────────────────────

    /// Fires a projectile if the ship is alive, the game is on, and the last
    /// shot was at least `fire_interval` ago.
    pub fn try_fire(&mut self) -> Option<EntityId> {
        if self.state.phase != Phase::Playing {
            return None;
        }
        let ready = self
            .state
            .last_fire
            .is_none_or(|last| self.clock - last + TIME_EPSILON >= self.config.fire_interval);
        if !ready {
            return None;
        }
        let origin = self.registry.spaceship()?.position;

        self.state.last_fire = Some(self.clock);
        let shot = spawner::projectile(&self.config, &self.bounds, origin);
        Some(self.add(shot))
    }

    /// Turns the ship toward `target` and eases its velocity that way.
    pub fn steer_toward(&mut self, target: Vec2) {
        if self.state.phase == Phase::GameOver {
            return;
        }
        let gain = self.config.steering_gain;
        let easing = self.config.steering_easing;
        let Some(id) = self.registry.spaceship_id() else {
            return;
        };
        if let Some(ship) = self.registry.get_mut(id) {
            ship.velocity = steer_velocity(ship.velocity, ship.position, target, gain, easing);
            ship.rotation = heading_toward(ship.position, target);
        }
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.state.is_muted = !self.state.is_muted;
        self.events.push(SessionEvent::MuteToggled(self.state.is_muted));
        self.state.is_muted
    }

    // ── Collisions ──────────────────────────────────────────────────────────

    /// Applies one reported contact. Contacts naming a body that is already
    /// gone are ignored, so duplicates in the same frame are harmless.
    pub fn handle_contact(&mut self, a: EntityId, b: EntityId) {
        let (Some(body_a), Some(body_b)) = (self.registry.get(a), self.registry.get(b)) else {
            return;
        };
        let effect = resolve(body_a.kind, body_b.kind);
        debug!("Contact {:?} x {:?}: {:?}", body_a.kind, body_b.kind, effect);

        match effect {
            Effect::DestroyShip { ship, asteroid } => {
                if self.state.phase != Phase::Playing || self.is_invincible() {
                    return;
                }
                self.explode(ship.pick(a, b));
                self.explode(asteroid.pick(a, b));
                self.game_over();
            }
            Effect::DestroyAsteroid {
                projectile,
                asteroid,
            } => {
                if self.state.phase == Phase::GameOver {
                    return;
                }
                self.explode(projectile.pick(a, b));
                self.explode(asteroid.pick(a, b));
                self.add_score(self.config.kill_score);
            }
            Effect::GrantShield { power_up, .. } => {
                if self.state.phase == Phase::GameOver {
                    return;
                }
                self.remove(power_up.pick(a, b));
                self.raise_shield();
            }
            Effect::Ignore => {}
        }
    }

    fn raise_shield(&mut self) {
        let was_up = self.is_invincible();
        let until = self.clock + self.config.invincibility;
        self.state.invincible_until = Some(until);
        self.scheduler.schedule_once(TimerKey::Invincibility, until);
        if !was_up {
            debug!("Shield up until {:.1}", until);
            self.events.push(SessionEvent::ShieldRaised);
        }
    }

    fn explode(&mut self, id: EntityId) {
        if let Some(body) = self.remove(id) {
            self.events.push(SessionEvent::Explosion {
                kind: body.kind,
                position: body.position,
            });
        }
    }

    fn remove(&mut self, id: EntityId) -> Option<Body> {
        let body = self.registry.remove(id)?;
        self.events.push(SessionEvent::Despawned { id });
        Some(body)
    }

    fn add_score(&mut self, amount: u32) {
        self.state.score = self.state.score.saturating_add(amount);
        self.events.push(SessionEvent::ScoreChanged(self.state.score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn new_session() -> Session {
        Session::with_rng(
            GameConfig::default(),
            Bounds::new(480.0, 800.0),
            StdRng::seed_from_u64(7),
        )
    }

    /// A session that has finished its countdown.
    fn playing_session() -> Session {
        let mut session = new_session();
        session.tick(3.0);
        assert_eq!(session.phase(), Phase::Playing);
        session
    }

    fn ship_id(session: &Session) -> EntityId {
        session.registry().spaceship_id().unwrap()
    }

    /// Places a fresh asteroid right on top of the ship, out of reach of timers.
    fn rock_on_ship(session: &mut Session) -> EntityId {
        let position = session.registry().spaceship().unwrap().position;
        session.add(Body::new(EntityKind::Asteroid, position, 10.0))
    }

    fn count_events(session: &mut Session, wanted: &SessionEvent) -> usize {
        session
            .drain_events()
            .iter()
            .filter(|event| *event == wanted)
            .count()
    }

    #[test]
    fn starts_in_countdown_with_ship() {
        let mut session = new_session();
        assert_eq!(session.phase(), Phase::Countdown(3));
        assert!(session.registry().spaceship().is_some());
        let events = session.drain_events();
        assert!(events.contains(&SessionEvent::CountdownTick(3)));
    }

    #[test]
    fn countdown_steps_once_per_second() {
        let mut session = new_session();
        session.drain_events();

        session.tick(1.0);
        assert_eq!(session.phase(), Phase::Countdown(2));
        session.tick(1.0);
        assert_eq!(session.phase(), Phase::Countdown(1));
        assert_eq!(session.registry().asteroid_count(), 0);
        session.tick(1.0);
        assert_eq!(session.phase(), Phase::Playing);

        let events = session.drain_events();
        assert!(events.contains(&SessionEvent::CountdownTick(2)));
        assert!(events.contains(&SessionEvent::CountdownTick(1)));
        assert!(events.contains(&SessionEvent::PhaseChanged(Phase::Playing)));
    }

    #[test]
    fn no_score_during_countdown() {
        let mut session = new_session();
        session.tick(2.9);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn score_ticks_up_every_second_while_playing() {
        let mut session = playing_session();
        for _ in 0..60 {
            session.tick(FRAME);
        }
        session.tick(0.01);
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn asteroids_never_exceed_capacity() {
        let mut session = playing_session();
        for _ in 0..100 {
            session.spawn_asteroid();
            assert!(session.registry().asteroid_count() <= 20);
        }
        assert_eq!(session.registry().asteroid_count(), 20);
        assert!(session.spawn_asteroid().is_none());
    }

    #[test]
    fn asteroid_timer_spawns_while_playing() {
        let mut session = playing_session();
        session.tick(0.0);
        assert_eq!(session.registry().asteroid_count(), 1);
        session.tick(0.5);
        assert_eq!(session.registry().asteroid_count(), 2);
    }

    #[test]
    fn decoration_slot_allows_only_one() {
        let mut session = new_session();
        // The scene-entry decoration timer fires on the first tick.
        assert!(session.registry().decoration().is_none());
        session.tick(0.0);
        let first = session.registry().decoration();
        assert!(first.is_some());
        assert!(session.spawn_decoration().is_none());

        let planets = session
            .registry()
            .iter()
            .filter(|body| body.kind == EntityKind::BackgroundDecoration)
            .count();
        assert_eq!(planets, 1);
    }

    #[test]
    fn decoration_slot_clears_after_exit() {
        let mut session = new_session();
        session.tick(0.0);
        assert!(session.registry().decoration().is_some());

        session.tick(14.0);
        assert!(session.registry().decoration().is_some());
        // The 15s spawn finds the slot taken, then the planet leaves.
        session.tick(1.5);
        assert!(session.registry().decoration().is_none());
    }

    #[test]
    fn fire_rate_is_limited() {
        let mut session = playing_session();
        assert!(session.try_fire().is_some());
        session.tick(0.2);
        assert!(session.try_fire().is_none());
        session.tick(0.29);
        assert!(session.try_fire().is_none());
        session.tick(0.01);
        assert!(session.try_fire().is_some());
        session.tick(0.5);
        assert!(session.try_fire().is_some());
    }

    #[test]
    fn cannot_fire_during_countdown() {
        let mut session = new_session();
        assert!(session.try_fire().is_none());
    }

    #[test]
    fn ship_hit_ends_the_game_once() {
        let mut session = playing_session();
        session.drain_events();
        let ship = ship_id(&session);
        let first = rock_on_ship(&mut session);
        let second = rock_on_ship(&mut session);

        session.handle_contact(ship, first);
        session.handle_contact(second, ship);

        assert_eq!(session.phase(), Phase::GameOver);
        assert!(!session.scheduler().is_scheduled(TimerKey::SpawnAsteroid));
        assert!(!session.scheduler().is_scheduled(TimerKey::SpawnPowerUp));
        assert!(!session.scheduler().is_scheduled(TimerKey::IncrementScore));
        assert!(session.registry().spaceship().is_none());
        assert!(session.registry().contains(second));
        assert_eq!(
            count_events(&mut session, &SessionEvent::PhaseChanged(Phase::GameOver)),
            1
        );
    }

    #[test]
    fn simultaneous_contacts_in_one_frame_end_the_game_once() {
        let mut session = playing_session();
        session.tick(0.0);
        session.drain_events();
        rock_on_ship(&mut session);
        rock_on_ship(&mut session);
        rock_on_ship(&mut session);

        session.tick(FRAME);
        assert_eq!(session.phase(), Phase::GameOver);
        let events = session.drain_events();
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn score_freezes_after_game_over() {
        let mut session = playing_session();
        session.tick(1.0);
        let ship = ship_id(&session);
        let rock = rock_on_ship(&mut session);
        session.handle_contact(ship, rock);
        let final_score = session.score();

        session.tick(5.0);
        assert_eq!(session.score(), final_score);
    }

    #[test]
    fn shot_destroys_asteroid_and_scores() {
        let mut session = playing_session();
        let shot = session.try_fire().unwrap();
        let rock = session.add(Body::new(EntityKind::Asteroid, Vec2::new(10.0, 10.0), 10.0));
        let before = session.score();

        session.handle_contact(rock, shot);
        assert_eq!(session.score(), before + 10);
        assert!(!session.registry().contains(shot));
        assert!(!session.registry().contains(rock));

        let explosions = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, SessionEvent::Explosion { .. }))
            .count();
        assert_eq!(explosions, 2);
    }

    #[test]
    fn contact_with_removed_body_is_a_no_op() {
        let mut session = playing_session();
        let shot = session.try_fire().unwrap();
        let rock = session.add(Body::new(EntityKind::Asteroid, Vec2::ZERO, 10.0));
        session.handle_contact(shot, rock);
        let score = session.score();

        session.handle_contact(shot, rock);
        assert_eq!(session.score(), score);
    }

    #[test]
    fn power_up_grants_eight_seconds_of_immunity() {
        let mut session = playing_session();
        let ship = ship_id(&session);
        let item = session.spawn_power_up();
        session.handle_contact(item, ship);
        assert!(session.is_invincible());
        assert!(!session.registry().contains(item));

        session.tick(7.9);
        let rock = rock_on_ship(&mut session);
        session.handle_contact(ship, rock);
        assert_eq!(session.phase(), Phase::Playing);

        session.tick(0.2);
        // The rock still sitting on the ship now counts.
        assert!(!session.is_invincible());
        assert_eq!(session.phase(), Phase::GameOver);
        assert!(!session.registry().contains(rock));
    }

    #[test]
    fn shield_events_bracket_the_window() {
        let mut session = playing_session();
        session.drain_events();
        let ship = ship_id(&session);
        let item = session.spawn_power_up();
        session.handle_contact(ship, item);
        assert_eq!(count_events(&mut session, &SessionEvent::ShieldRaised), 1);

        session.tick(8.0);
        assert_eq!(count_events(&mut session, &SessionEvent::ShieldLowered), 1);
    }

    #[test]
    fn second_power_up_extends_the_shield() {
        let mut session = playing_session();
        let ship = ship_id(&session);
        let first = session.spawn_power_up();
        session.handle_contact(ship, first);
        session.tick(5.0);
        let second = session.spawn_power_up();
        session.handle_contact(ship, second);

        session.tick(5.0);
        assert!(session.is_invincible());
        session.tick(3.0);
        assert!(!session.is_invincible());
    }

    #[test]
    fn shielded_ship_passes_through_asteroids() {
        let mut session = playing_session();
        let ship = ship_id(&session);
        let item = session.spawn_power_up();
        session.handle_contact(ship, item);

        rock_on_ship(&mut session);
        session.tick(FRAME);
        assert_eq!(session.phase(), Phase::Playing);
        assert!(session.registry().spaceship().is_some());
    }

    #[test]
    fn restart_resets_everything_but_mute() {
        let mut session = playing_session();
        session.toggle_mute();
        session.tick(1.0);
        session.try_fire();
        let ship = ship_id(&session);
        let rock = rock_on_ship(&mut session);
        session.handle_contact(ship, rock);
        assert_eq!(session.phase(), Phase::GameOver);

        session.restart();
        assert_eq!(session.score(), 0);
        assert_eq!(session.phase(), Phase::Countdown(3));
        assert!(session.state().is_muted);
        assert_eq!(session.state().last_fire, None);
        assert_eq!(session.registry().len(), 1);
        assert!(session.registry().spaceship().is_some());
        assert!(session.scheduler().is_scheduled(TimerKey::Countdown));
        assert!(!session.scheduler().is_scheduled(TimerKey::SpawnAsteroid));

        session.tick(3.0);
        assert_eq!(session.phase(), Phase::Playing);
        assert!(session.scheduler().is_scheduled(TimerKey::SpawnAsteroid));
    }

    #[test]
    fn restart_despawns_every_old_body() {
        let mut session = playing_session();
        session.tick(1.0);
        let old: Vec<EntityId> = session.registry().iter().map(|b| b.id).collect();
        session.drain_events();

        session.restart();
        let events = session.drain_events();
        for id in old {
            assert!(events.contains(&SessionEvent::Despawned { id }));
        }
    }

    #[test]
    fn game_over_freezes_rocks_but_not_planets() {
        let mut session = playing_session();
        session.tick(0.0);
        let ship = ship_id(&session);
        let hit = rock_on_ship(&mut session);
        session.handle_contact(ship, hit);

        let rock = session
            .registry()
            .iter()
            .find(|b| b.kind == EntityKind::Asteroid)
            .map(|b| (b.id, b.position))
            .unwrap();
        let planet = session
            .registry()
            .iter()
            .find(|b| b.kind == EntityKind::BackgroundDecoration)
            .map(|b| (b.id, b.position))
            .unwrap();

        session.tick(FRAME);
        assert_eq!(session.registry().get(rock.0).unwrap().position, rock.1);
        assert_ne!(session.registry().get(planet.0).unwrap().position, planet.1);
    }

    #[test]
    fn steering_moves_ship_toward_touch() {
        let mut session = playing_session();
        let start = session.registry().spaceship().unwrap().position;
        let target = start + Vec2::new(100.0, 0.0);
        for _ in 0..10 {
            session.steer_toward(target);
            session.tick(FRAME);
        }
        let now = session.registry().spaceship().unwrap().position;
        assert!(now.x > start.x);
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let config = GameConfig {
            asteroid_interval: 0.0,
            asteroid_scale: (1.0, 1.0),
            ..GameConfig::default()
        };
        let mut session =
            Session::with_rng(config, Bounds::new(480.0, 800.0), StdRng::seed_from_u64(7));
        session.tick(3.0);
        session.tick(0.0);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.registry().asteroid_count(), 1);
    }

    #[test]
    fn mute_toggles() {
        let mut session = new_session();
        assert!(session.toggle_mute());
        assert!(!session.toggle_mute());
    }
}
