//! High-level runtime engine settings
//!
//! Selects the force law, what happens to velocity when a particle is
//! snapped to the minimum-distance shell, and whether steps run on the
//! rayon pool

use crate::configuration::config::{ClampConfig, EngineConfig, ForceLawConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub force_law: ForceLawConfig, // tuned or relativistic
    pub clamp: ClampPolicy, // velocity handling on clamp
    pub parallel: bool, // false = serial loop, true = rayon
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            force_law: ForceLawConfig::Tuned,
            clamp: ClampPolicy::Keep,
            parallel: true,
        }
    }
}

/// Velocity treatment when the minimum-approach clamp fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClampPolicy {
    /// Leave velocity untouched
    Keep,
    /// Scale velocity by the factor, expected in `[0, 1]`
    Damp(f64),
    /// Flip the inward radial component so the particle moves outward
    Reflect,
}

impl ClampPolicy {
    pub fn from_config(clamp: ClampConfig, damp_factor: f64) -> Self {
        match clamp {
            ClampConfig::Keep => ClampPolicy::Keep,
            ClampConfig::Damp => ClampPolicy::Damp(damp_factor),
            ClampConfig::Reflect => ClampPolicy::Reflect,
        }
    }
}

impl From<&EngineConfig> for Engine {
    fn from(cfg: &EngineConfig) -> Self {
        Self {
            force_law: cfg.force_law,
            clamp: ClampPolicy::from_config(cfg.clamp, cfg.damp_factor),
            parallel: cfg.parallel,
        }
    }
}
