// config.rs - Tunable game constants.
// Everything the session needs to know about timing, spawning and scoring lives
// here so a RON file can override it without recompiling.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// File read by `GameConfig::load` from the working directory.
pub const CONFIG_FILE: &str = "astro_dash.ron";

/// All gameplay tunables.
///
/// Static game data: it never changes during play. `#[serde(default)]` on the
/// container means a config file only needs the values it overrides.
#[derive(Resource, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Seconds between asteroid spawn attempts.
    pub asteroid_interval: f64,
    /// Maximum number of live asteroids.
    pub max_asteroids: usize,
    /// Asteroid scale is sampled from `[min, max)`.
    pub asteroid_scale: (f32, f32),
    /// Downward speed magnitude is sampled from `[min, max)`, units per second.
    pub asteroid_speed: (f32, f32),
    /// Horizontal drift is an integer sampled from `[-drift, drift]`.
    pub asteroid_drift: i32,
    /// Radius of an asteroid at scale 1.0.
    pub asteroid_radius: f32,

    pub power_up_interval: f64,
    /// Seconds a power-up takes to cross the whole field.
    pub power_up_traversal: f32,
    pub power_up_radius: f32,

    pub decoration_interval: f64,
    pub decoration_traversal: f32,
    pub decoration_scales: Vec<f32>,
    /// Number of distinct planet images the host can draw.
    pub decoration_images: usize,
    /// Radius of a decoration at scale 1.0.
    pub decoration_radius: f32,

    /// Minimum seconds between two successful shots.
    pub fire_interval: f64,
    /// Projectile speed as a fraction of the field height per second.
    pub projectile_speed: f32,
    pub projectile_radius: f32,

    pub invincibility: f64,

    pub score_interval: f64,
    pub score_increment: u32,
    pub kill_score: u32,

    pub countdown: u32,

    /// Fraction of the ship-to-touch offset used as the target velocity.
    pub steering_gain: f32,
    /// Lerp factor easing the current velocity toward the target velocity.
    pub steering_easing: f32,
    pub ship_radius: f32,
    /// Distance of the ship's spawn point above the bottom edge.
    pub ship_spawn_offset: f32,

    /// Play field used when no window is available.
    pub field_size: (f32, f32),
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            asteroid_interval: 0.5,
            max_asteroids: 20,
            asteroid_scale: (0.2, 1.2),
            asteroid_speed: (100.0, 400.0),
            asteroid_drift: 50,
            asteroid_radius: 40.0,

            power_up_interval: 30.0,
            power_up_traversal: 10.0,
            power_up_radius: 16.0,

            decoration_interval: 15.0,
            decoration_traversal: 15.0,
            decoration_scales: vec![0.01, 0.03, 0.05, 0.08, 0.1, 0.3, 0.5, 0.7],
            decoration_images: 10,
            decoration_radius: 300.0,

            fire_interval: 0.5,
            projectile_speed: 1.0,
            projectile_radius: 6.0,

            invincibility: 8.0,

            score_interval: 1.0,
            score_increment: 10,
            kill_score: 10,

            countdown: 3,

            steering_gain: 0.05,
            steering_easing: 0.2,
            ship_radius: 24.0,
            ship_spawn_offset: 50.0,

            field_size: (480.0, 800.0),
        }
    }
}

/// Why a config file was rejected.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("not valid RON: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("{field} {problem}")]
    Invalid {
        field: &'static str,
        problem: &'static str,
    },
}

fn invalid(field: &'static str, problem: &'static str) -> ConfigError {
    ConfigError::Invalid { field, problem }
}

fn positive_f64(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive number of seconds"))
    }
}

fn positive_f32(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be positive"))
    }
}

fn range(field: &'static str, (low, high): (f32, f32)) -> Result<(), ConfigError> {
    if low.is_finite() && high.is_finite() && low > 0.0 && low < high {
        Ok(())
    } else {
        Err(invalid(field, "must be a (min, max) pair with 0 < min < max"))
    }
}

impl GameConfig {
    /// Reads `astro_dash.ron` if it exists, otherwise returns the defaults.
    /// A broken or out-of-range file is logged and ignored rather than
    /// aborting the game.
    pub fn load() -> Self {
        let path = std::path::Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_ron(&contents).unwrap_or_else(|e| {
                error!("Rejected {:?}: {}. Using defaults.", path, e);
                Self::default()
            }),
            Err(e) => {
                error!("Failed to read {:?}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }

    /// Parses and validates config overrides.
    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        let config = ron::from_str::<GameConfig>(contents)?;
        config.validate()?;
        info!("Loaded game config overrides");
        Ok(config)
    }

    /// Checks every value the timers and samplers depend on. Zero periods
    /// would never stop firing and empty ranges cannot be sampled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_f64("asteroid_interval", self.asteroid_interval)?;
        positive_f64("power_up_interval", self.power_up_interval)?;
        positive_f64("decoration_interval", self.decoration_interval)?;
        positive_f64("score_interval", self.score_interval)?;

        if !(self.fire_interval.is_finite() && self.fire_interval >= 0.0) {
            return Err(invalid("fire_interval", "must not be negative"));
        }
        if !(self.invincibility.is_finite() && self.invincibility >= 0.0) {
            return Err(invalid("invincibility", "must not be negative"));
        }

        range("asteroid_scale", self.asteroid_scale)?;
        range("asteroid_speed", self.asteroid_speed)?;
        if self.asteroid_drift < 0 {
            return Err(invalid("asteroid_drift", "must not be negative"));
        }

        positive_f32("power_up_traversal", self.power_up_traversal)?;
        positive_f32("decoration_traversal", self.decoration_traversal)?;
        positive_f32("asteroid_radius", self.asteroid_radius)?;
        positive_f32("power_up_radius", self.power_up_radius)?;
        positive_f32("decoration_radius", self.decoration_radius)?;
        positive_f32("projectile_radius", self.projectile_radius)?;
        positive_f32("ship_radius", self.ship_radius)?;
        positive_f32("field_size.0", self.field_size.0)?;
        positive_f32("field_size.1", self.field_size.1)?;

        if self.decoration_scales.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(invalid("decoration_scales", "must all be positive"));
        }
        if !(0.0..=1.0).contains(&self.steering_easing) {
            return Err(invalid("steering_easing", "must be between 0 and 1"));
        }
        Ok(())
    }
}
