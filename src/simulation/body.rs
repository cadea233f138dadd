//! The central body the disk orbits
//!
//! Gravitational model with a clamped relativistic correction and an ad-hoc
//! suppression term inside three Schwarzschild radii.

use crate::error::{SimError, SimResult};
use crate::simulation::states::NVec3;

pub const G: f64 = 6.67430e-11; // gravitational constant (m^3 kg^-1 s^-2)
pub const C: f64 = 299_792_458.0; // speed of light (m/s)

/// Upper bound on `2GM / (c^2 r)` inside the relativistic factor
pub const RELATIVISTIC_CLAMP: f64 = 0.99;

/// Influence radius in units of the event horizon radius
pub const INFLUENCE_FACTOR: f64 = 1.5;

/// Below this many horizon radii the suppression term applies
pub const SUPPRESSION_RANGE: f64 = 3.0;

pub const ACCRETION_COLOR: [f32; 3] = [1.0, 0.6, 0.0];

#[derive(Debug, Clone, PartialEq)]
pub struct CentralBody {
    position: NVec3,
    mass: f64,
    event_horizon_radius: f64,
    influence_radius: f64,
    accretion_color: [f32; 3],
}

impl CentralBody {
    /// Create a body at `position` with `mass` (kg)
    pub fn new(position: NVec3, mass: f64) -> SimResult<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::NonPositiveMass(mass));
        }
        if !position.iter().all(|c| c.is_finite()) {
            return Err(SimError::NonFinite("body position"));
        }

        // tiny masses underflow to a zero horizon
        let event_horizon_radius = schwarzschild_radius(mass);
        if !(event_horizon_radius.is_finite() && event_horizon_radius > 0.0) {
            return Err(SimError::InvalidParameter {
                name: "event_horizon_radius",
                value: event_horizon_radius,
            });
        }

        Ok(Self {
            position,
            mass,
            event_horizon_radius,
            influence_radius: INFLUENCE_FACTOR * event_horizon_radius,
            accretion_color: ACCRETION_COLOR,
        })
    }

    pub fn position(&self) -> NVec3 {
        self.position
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn event_horizon_radius(&self) -> f64 {
        self.event_horizon_radius
    }

    pub fn influence_radius(&self) -> f64 {
        self.influence_radius
    }

    pub fn accretion_color(&self) -> [f32; 3] {
        self.accretion_color
    }

    /// `1 / sqrt(1 - min(0.99, r_s / r))`, capped at 10
    pub fn relativistic_factor(&self, distance: f64) -> f64 {
        let ratio = (2.0 * G * self.mass / (C * C * distance)).min(RELATIVISTIC_CLAMP);
        1.0 / (1.0 - ratio).sqrt()
    }

    /// `(r_s / r)^4` inside `3 r_s`, otherwise 1.
    ///
    /// Not a physical law. It only softens motion very close to the body.
    pub fn suppression_factor(&self, distance: f64) -> f64 {
        if distance < SUPPRESSION_RANGE * self.event_horizon_radius {
            (self.event_horizon_radius / distance).powi(4)
        } else {
            1.0
        }
    }

    /// Gravitational force on a unit mass at `point`, pointing at the body
    pub fn force_at(&self, point: &NVec3) -> SimResult<NVec3> {
        let direction = self.position - point;
        let distance = direction.norm();
        if distance == 0.0 {
            return Err(SimError::ZeroDistance);
        }
        if !distance.is_finite() {
            return Err(SimError::NonFinite("query point"));
        }

        let newton = G * self.mass / (distance * distance);
        let magnitude = newton * self.relativistic_factor(distance) * self.suppression_factor(distance);

        Ok(direction / distance * magnitude)
    }
}

/// `2 G m / c^2`
pub fn schwarzschild_radius(mass: f64) -> f64 {
    2.0 * G * mass / (C * C)
}
