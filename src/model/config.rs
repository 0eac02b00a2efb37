//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. All tunable constants of the simulation (world
//! bounds, trait generation ranges, motion viscosity, detection radii and
//! feature gates) live here rather than as module-level globals, so a test
//! or embedding application can inject its own values at construction time.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 1280.0
//! height = 800.0
//! depth = 800.0
//! initial_population = 40
//! seed = 42
//!
//! [detection]
//! search_radius = 5.0
//! flash_reset_ms = 500
//! ```

use serde::{Deserialize, Serialize};

/// World-level simulation configuration.
///
/// The world is an axis-aligned box; x spans `[0, width]`, y spans
/// `[0, height]` and z spans `[0, depth]`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub initial_population: usize,
    /// Seed for the world RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            depth: 800.0,
            initial_population: 40,
            seed: None,
        }
    }
}

/// Trait generation ranges and the fixed color palette.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TraitsConfig {
    /// Colors a newborn cell may draw, as 0xRRGGBB values.
    pub palette: Vec<u32>,
    /// Inclusive lower bound for `sight` and `strength`.
    pub min_attribute: u32,
    /// Inclusive upper bound for `sight` and `strength`.
    pub max_attribute: u32,
    /// Inclusive lower bound for `speed`.
    pub min_speed: u32,
    /// Exclusive upper bound for `speed`.
    pub max_speed: u32,
}

impl Default for TraitsConfig {
    fn default() -> Self {
        Self {
            palette: vec![0xEFEFEF, 0xFF6348, 0xF2CB05, 0x49F09F, 0x52B0ED],
            min_attribute: 1,
            max_attribute: 100,
            min_speed: 10,
            max_speed: 100,
        }
    }
}

/// Motion planner configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MotionConfig {
    /// Scalar converting `distance / speed` into a transition duration in
    /// milliseconds. Higher values make every cell slower.
    pub viscosity: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self { viscosity: 1000.0 }
    }
}

/// Collision/sight detector configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DetectionConfig {
    /// Neighbor query radius around a cell, in world units.
    pub search_radius: f64,
    /// Display color forced on a cell when a probe reports a collision.
    pub alarm_color: u32,
    /// Logical delay before a flashed cell reverts to its trait color.
    pub flash_reset_ms: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            search_radius: 5.0,
            alarm_color: 0xFF0000,
            flash_reset_ms: 500,
        }
    }
}

/// Reproduction policy configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ReproductionConfig {
    pub enabled: bool,
}

impl Default for ReproductionConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Feature gates for behavior that differed between the two historical
/// variants of the cell logic. Defaults enable the superset.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Generate the (currently unused) `sight` trait.
    pub sight_trait: bool,
    /// Request offspring on qualifying collisions.
    pub spawn_on_collision: bool,
    /// Flash the alarm color on collision.
    pub collision_flash: bool,
    /// Sample z for movement targets instead of pinning it to mid-depth.
    pub sample_depth: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            sight_trait: true,
            spawn_on_collision: true,
            collision_flash: true,
            sample_depth: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub traits: TraitsConfig,
    pub motion: MotionConfig,
    pub detection: DetectionConfig,
    pub reproduction: ReproductionConfig,
    pub features: FeaturesConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` describing the
    /// first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation. The largest possible cell has size 5 and keeps a
        // one-unit margin from every wall, so each axis needs room for that.
        let min_extent = 2.0 * (5.0 + 1.0);
        anyhow::ensure!(
            self.world.width > min_extent,
            "World width must exceed {min_extent}"
        );
        anyhow::ensure!(
            self.world.height > min_extent,
            "World height must exceed {min_extent}"
        );
        anyhow::ensure!(
            self.world.depth > min_extent,
            "World depth must exceed {min_extent}"
        );
        anyhow::ensure!(
            self.world.initial_population <= 100_000,
            "Initial population too large (max 100000)"
        );

        // Traits validation
        anyhow::ensure!(
            !self.traits.palette.is_empty(),
            "Trait palette must not be empty"
        );
        anyhow::ensure!(
            self.traits.min_attribute >= 1,
            "Min attribute must be at least 1"
        );
        anyhow::ensure!(
            self.traits.min_attribute < self.traits.max_attribute,
            "Min attribute must be below max attribute"
        );
        anyhow::ensure!(
            self.traits.min_speed >= 1,
            "Min speed must be at least 1"
        );
        anyhow::ensure!(
            self.traits.min_speed < self.traits.max_speed,
            "Min speed must be below max speed"
        );
        anyhow::ensure!(
            self.traits.max_speed <= 1000,
            "Max speed too large (max 1000)"
        );

        // Motion validation
        anyhow::ensure!(self.motion.viscosity > 0.0, "Viscosity must be positive");

        // Detection validation
        anyhow::ensure!(
            self.detection.search_radius > 0.0,
            "Search radius must be positive"
        );
        anyhow::ensure!(
            self.detection.flash_reset_ms > 0,
            "Flash reset delay must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }
}
