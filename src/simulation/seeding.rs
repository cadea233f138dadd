//! Initial disk distribution
//!
//! Particles are scattered on a thick disk in the XZ plane around the
//! center, each moving tangentially with speed `sqrt(r) * speed_scale`.
//! That speed law is empirical and is not derived from the force law.
//! The random source is always passed in, so a seeded `StdRng` gives a
//! reproducible field.

use std::f64::consts::TAU;

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{require_positive, SimError, SimResult};
use crate::simulation::states::{NVec3, Particle, ParticleField};

#[derive(Debug, Clone, PartialEq)]
pub struct DiskDistribution {
    pub radius_min: f64, // inner edge of the seeded annulus
    pub radius_span: f64, // radius is drawn from [radius_min, radius_min + radius_span)
    pub height_std: f64, // std-dev of the Y offset
    pub speed_scale: f64, // v = sqrt(r) * speed_scale
    pub particle_mass: f64,
}

impl Default for DiskDistribution {
    fn default() -> Self {
        Self {
            radius_min: 50.0,
            radius_span: 400.0,
            height_std: 10.0,
            speed_scale: 0.5,
            particle_mass: 1.0,
        }
    }
}

impl DiskDistribution {
    pub fn validate(&self) -> SimResult<()> {
        require_positive("radius_min", self.radius_min)?;
        require_positive("radius_span", self.radius_span)?;
        require_positive("speed_scale", self.speed_scale)?;
        if !(self.height_std.is_finite() && self.height_std >= 0.0) {
            return Err(SimError::InvalidParameter { name: "height_std", value: self.height_std });
        }
        if !(self.particle_mass.is_finite() && self.particle_mass > 0.0) {
            return Err(SimError::NonPositiveMass(self.particle_mass));
        }
        Ok(())
    }

    /// A particle at polar `(radius, angle)` and `height`, with the tangential seed velocity
    pub fn particle_at(&self, center: &NVec3, radius: f64, angle: f64, height: f64) -> Particle {
        let (sin, cos) = angle.sin_cos();
        Particle {
            x: center + NVec3::new(radius * cos, height, radius * sin),
            v: NVec3::new(-sin, 0.0, cos) * (radius.sqrt() * self.speed_scale),
            m: self.particle_mass,
        }
    }

    /// Draw `count` particles around `center`
    pub fn sample<R: Rng>(&self, center: &NVec3, count: usize, rng: &mut R) -> SimResult<Vec<Particle>> {
        self.validate()?;
        if count == 0 {
            return Err(SimError::EmptyField);
        }

        let height = Normal::new(0.0, self.height_std)
            .map_err(|_| SimError::InvalidParameter { name: "height_std", value: self.height_std })?;

        let particles = (0..count)
            .map(|_| {
                let angle = rng.gen_range(0.0..TAU);
                let radius = self.radius_min + rng.gen_range(0.0..self.radius_span);
                let h = height.sample(&mut *rng);
                self.particle_at(center, radius, angle, h)
            })
            .collect();

        Ok(particles)
    }
}

impl ParticleField {
    /// Seed `count` particles with the default disk distribution
    pub fn seeded<R: Rng>(center: NVec3, count: usize, rng: &mut R) -> SimResult<Self> {
        Self::seeded_with(center, count, &DiskDistribution::default(), rng)
    }

    pub fn seeded_with<R: Rng>(
        center: NVec3,
        count: usize,
        disk: &DiskDistribution,
        rng: &mut R,
    ) -> SimResult<Self> {
        let particles = disk.sample(&center, count, rng)?;
        Self::from_particles(center, particles)
    }
}
