//! Core state types for the particle disk.
//!
//! - `Particle`      a single test particle (position, velocity, mass)
//! - `ParticleField` the owned, fixed-size particle collection around one attractor
//! - `FieldSnapshot` a read-only copy of the field handed to the renderer each frame

use nalgebra::Vector3;

use crate::error::{SimError, SimResult};

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub m: f64, // mass
}

impl Particle {
    pub fn new(x: NVec3, v: NVec3, m: f64) -> SimResult<Self> {
        if !(m.is_finite() && m > 0.0) {
            return Err(SimError::NonPositiveMass(m));
        }
        if !x.iter().chain(v.iter()).all(|c| c.is_finite()) {
            return Err(SimError::NonFinite("particle state"));
        }
        Ok(Self { x, v, m })
    }
}

/// The particle population orbiting a single attractor.
///
/// The number of particles is fixed when the field is built. Only the
/// integrator mutates particle state, through `&mut self`, so a reader can
/// never observe a half-advanced step.
#[derive(Debug, Clone)]
pub struct ParticleField {
    center: NVec3,
    particles: Vec<Particle>,
    t: f64, // simulated time
}

impl ParticleField {
    /// Build a field from explicit particles.
    ///
    /// Every particle goes through the same checks as [`Particle::new`], and
    /// none may sit exactly on the center where the force is undefined.
    pub fn from_particles(center: NVec3, particles: Vec<Particle>) -> SimResult<Self> {
        if particles.is_empty() {
            return Err(SimError::EmptyField);
        }
        if !center.iter().all(|c| c.is_finite()) {
            return Err(SimError::NonFinite("field center"));
        }
        for p in &particles {
            Particle::new(p.x, p.v, p.m)?;
            if (p.x - center).norm() == 0.0 {
                return Err(SimError::ZeroDistance);
            }
        }
        Ok(Self { center, particles, t: 0.0 })
    }

    pub fn center(&self) -> NVec3 {
        self.center
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Simulated time, advanced only by a completed step
    pub fn t(&self) -> f64 {
        self.t
    }

    pub(crate) fn advance_time(&mut self, dt: f64) {
        self.t += dt;
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Always false, construction rejects empty fields
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Distance of particle `i` from the attractor
    pub fn distance_of(&self, i: usize) -> Option<f64> {
        self.particles.get(i).map(|p| (p.x - self.center).norm())
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        let mut snap = FieldSnapshot::default();
        snap.refresh(self);
        snap
    }
}

/// Frame copy of a field for the renderer
///
/// Buffers are reused across frames by `refresh`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSnapshot {
    pub center: NVec3,
    pub positions: Vec<NVec3>,
    pub velocities: Vec<NVec3>,
    pub t: f64,
}

impl FieldSnapshot {
    /// Overwrite this snapshot with the current field state
    pub fn refresh(&mut self, field: &ParticleField) {
        self.center = field.center;
        self.t = field.t;

        self.positions.clear();
        self.velocities.clear();
        self.positions.extend(field.particles.iter().map(|p| p.x));
        self.velocities.extend(field.particles.iter().map(|p| p.v));
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
