// scheduler.rs - Named timers advanced once per frame.
//
// Each entry has a fire time and an optional period. `advance` returns every
// key that came due, in fire-time order, including several firings of the same
// recurring key if a long frame covered more than one period. Registering a key
// that already exists replaces it, so there is never more than one timer per key.

use std::collections::HashMap;

use bevy::log::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKey {
    Countdown,
    SpawnAsteroid,
    SpawnPowerUp,
    SpawnDecoration,
    IncrementScore,
    Invincibility,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Entry {
    fire_at: f64,
    period: Option<f64>,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    entries: HashMap<TimerKey, Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires once at `fire_at`.
    pub fn schedule_once(&mut self, key: TimerKey, fire_at: f64) {
        self.entries.insert(
            key,
            Entry {
                fire_at,
                period: None,
            },
        );
    }

    /// Fires first at `first_at`, then every `period` seconds. A period that
    /// is not positive degrades to a single firing.
    pub fn schedule_repeating(&mut self, key: TimerKey, first_at: f64, period: f64) {
        let period = if period > 0.0 {
            Some(period)
        } else {
            warn!("Timer {:?} has period {}; firing it once", key, period);
            None
        };
        self.entries.insert(
            key,
            Entry {
                fire_at: first_at,
                period,
            },
        );
    }

    /// Stops a timer. Cancelling an unknown key does nothing.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        self.entries.remove(&key).is_some()
    }

    pub fn is_scheduled(&self, key: TimerKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn next_fire(&self, key: TimerKey) -> Option<f64> {
        self.entries.get(&key).map(|entry| entry.fire_at)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Collects every firing due at or before `now`, sorted by fire time.
    /// Ties break on key order so the result is deterministic.
    pub fn advance(&mut self, now: f64) -> Vec<TimerKey> {
        let mut fired: Vec<(f64, TimerKey)> = Vec::new();

        self.entries.retain(|key, entry| {
            while entry.fire_at <= now {
                fired.push((entry.fire_at, *key));
                match entry.period {
                    Some(period) => entry.fire_at += period,
                    None => return false,
                }
            }
            true
        });

        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        fired.into_iter().map(|(_, key)| key).collect()
    }
}
