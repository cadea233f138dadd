//! Numerical and tuning parameters for the disk simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed step size and frame count,
//! - the integrator-tuned gravity constant `g_sim` (not the physical `G`),
//! - the minimum approach distance and stabilizer toggle,
//! - the optional deterministic seed

use crate::error::{require_positive, SimResult};

pub const DEFAULT_DT: f64 = 0.016; // ~60 Hz
pub const DEFAULT_G_SIM: f64 = 9.8;
pub const G_SIM_SCALE: f64 = 1000.0; // tuned law strength is g_sim * 1000
pub const DEFAULT_MIN_DISTANCE: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub dt: f64, // step size
    pub g_sim: f64, // tuned gravitational constant
    pub min_distance: f64, // minimum approach distance
    pub stabilizer: bool, // apply the tangential stabilizer term
    pub frames: u64, // frames the headless driver runs
    pub seed: Option<u64>, // deterministic seed, entropy when None
}

impl Default for Parameters {
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

impl Parameters {
    /// Strength `k` of the tuned radial law `k / r^2`
    pub fn attraction_strength(&self) -> f64 {
        self.g_sim * G_SIM_SCALE
    }

    pub fn validate(&self) -> SimResult<()> {
        require_positive("dt", self.dt)?;
        require_positive("g_sim", self.g_sim)?;
        require_positive("min_distance", self.min_distance)?;
        Ok(())
    }
}
