//! Build a fully-initialized disk scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - the central body (`CentralBody`)
//! - the seeded particle field (`ParticleField`)
//! - the active force law
//!
//! The driver calls [`Scenario::step`] once per frame and hands
//! [`Scenario::field`] to the renderer boundary in between.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::ScenarioConfig;
use crate::error::SimResult;
use crate::simulation::body::CentralBody;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{build_force_law, ForceLaw};
use crate::simulation::integrator::{euler_step, euler_step_par, StepReport};
use crate::simulation::params::Parameters;
use crate::simulation::seeding::DiskDistribution;
use crate::simulation::states::{NVec3, ParticleField};

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub body: CentralBody,
    field: ParticleField,
    force_law: Box<dyn ForceLaw>,
    frame: u64,
}

impl Scenario {
    /// Build from config, seeding from `parameters.seed` or from entropy
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        let mut rng = match cfg.parameters.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::build_with_rng(cfg, &mut rng)
    }

    pub fn build_with_rng<R: Rng>(cfg: ScenarioConfig, rng: &mut R) -> SimResult<Self> {
        let engine = Engine::from(&cfg.engine);

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            g_sim: p_cfg.g_sim,
            min_distance: p_cfg.min_distance,
            stabilizer: p_cfg.stabilizer,
            frames: p_cfg.frames,
            seed: p_cfg.seed,
        };
        parameters.validate()?;

        let [x, y, z] = cfg.body.position;
        let body = CentralBody::new(NVec3::new(x, y, z), cfg.body.mass)?;

        let d_cfg = cfg.disk;
        let disk = DiskDistribution {
            radius_min: d_cfg.radius_min,
            radius_span: d_cfg.radius_span,
            height_std: d_cfg.height_std,
            speed_scale: d_cfg.speed_scale,
            particle_mass: d_cfg.particle_mass,
        };

        // The field attracts toward the body's position
        let field = ParticleField::seeded_with(body.position(), d_cfg.count, &disk, rng)?;
        let force_law = build_force_law(engine.force_law, &parameters, &body, &field.center())?;

        tracing::info!(
            particles = field.len(),
            law = force_law.name(),
            horizon = body.event_horizon_radius(),
            dt = parameters.dt,
            "scenario built"
        );

        Ok(Self {
            engine,
            parameters,
            body,
            field,
            force_law,
            frame: 0,
        })
    }

    /// Read-only view for the renderer, never mid-step
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn force_law(&self) -> &dyn ForceLaw {
        self.force_law.as_ref()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame with the configured `dt`
    pub fn step(&mut self) -> SimResult<StepReport> {
        self.step_by(self.parameters.dt)
    }

    pub fn step_by(&mut self, dt: f64) -> SimResult<StepReport> {
        let report = if self.engine.parallel {
            euler_step_par(&mut self.field, self.force_law.as_ref(), &self.parameters, self.engine.clamp, dt)?
        } else {
            euler_step(&mut self.field, self.force_law.as_ref(), &self.parameters, self.engine.clamp, dt)?
        };
        self.frame += 1;

        if report.clamped > 0 {
            tracing::trace!(frame = self.frame, clamped = report.clamped, "min-distance clamp");
        }
        Ok(report)
    }
}
