//! Configuration types for loading disk scenarios from YAML.
//!
//! This module is the thin, `serde`-deserializable face of a scenario:
//!
//! - [`EngineConfig`]     – force law, clamp policy, serial or parallel stepping
//! - [`ParametersConfig`] – step size, tuned gravity, minimum distance, seed
//! - [`BodyConfig`]       – the central body
//! - [`DiskConfig`]       – particle count and the seeding distribution
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! Every field has a default, so an empty document is a valid scenario.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   force_law: "tuned"       # or "relativistic"
//!   clamp: "keep"            # "keep", "damp" or "reflect"
//!   damp_factor: 0.5         # velocity scale used by "damp"
//!   parallel: true
//!
//! parameters:
//!   dt: 0.016
//!   g_sim: 9.8
//!   min_distance: 50.0
//!   stabilizer: true
//!   frames: 600
//!   seed: 42                 # omit for an entropy seed
//!
//! body:
//!   position: [0.0, 0.0, 0.0]
//!   mass: 6.7e27
//!
//! disk:
//!   count: 200000
//!   radius_min: 50.0
//!   radius_span: 400.0
//!   height_std: 10.0
//!   speed_scale: 0.5
//!   particle_mass: 1.0
//! ```

use serde::Deserialize;

use crate::simulation::params::{DEFAULT_DT, DEFAULT_G_SIM, DEFAULT_MIN_DISTANCE};

/// Which radial force law drives the particles
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceLawConfig {
    #[serde(rename = "tuned")] // k / r^2 with k = g_sim * 1000, stable visuals
    #[default]
    Tuned,

    #[serde(rename = "relativistic")] // the central body's model, recalibrated to the tuned strength
    Relativistic,
}

/// Velocity treatment when a particle is snapped to the min-distance shell
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClampConfig {
    #[default]
    Keep,
    Damp,
    Reflect,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub force_law: ForceLawConfig,
    pub clamp: ClampConfig,
    pub damp_factor: f64, // only read when `clamp` is `damp`
    pub parallel: bool, // `true` - split each step across the rayon pool
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            force_law: ForceLawConfig::default(),
            clamp: ClampConfig::default(),
            damp_factor: 0.5,
            parallel: true,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub dt: f64,           // fixed step size
    pub g_sim: f64,        // tuned gravitational constant, not the physical G
    pub min_distance: f64, // minimum approach distance
    pub stabilizer: bool,  // tangential stabilizer on/off
    pub frames: u64,       // frames for the headless driver
    pub seed: Option<u64>, // deterministic seed to make runs reproducible
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            g_sim: DEFAULT_G_SIM,
            min_distance: DEFAULT_MIN_DISTANCE,
            stabilizer: true,
            frames: 600,
            seed: None,
        }
    }
}

/// Horizon radius of roughly 10 simulation units
pub const DEFAULT_BODY_MASS: f64 = 6.7e27;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BodyConfig {
    pub position: [f64; 3],
    pub mass: f64,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            mass: DEFAULT_BODY_MASS,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DiskConfig {
    pub count: usize,
    pub radius_min: f64,
    pub radius_span: f64,
    pub height_std: f64,
    pub speed_scale: f64,
    pub particle_mass: f64,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            count: 200_000,
            radius_min: 50.0,
            radius_span: 400.0,
            height_std: 10.0,
            speed_scale: 0.5,
            particle_mass: 1.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub body: BodyConfig,
    pub disk: DiskConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
