use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::SimResult;
use crate::simulation::engine::ClampPolicy;
use crate::simulation::forces::TunedGravity;
use crate::simulation::integrator::{euler_step, euler_step_par};
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec3, ParticleField};

/// Per-step wall time for one field size
#[derive(Debug, Clone, Copy)]
pub struct StepTiming {
    pub n: usize,
    pub serial_ms: f64,
    pub parallel_ms: f64,
}

/// Time serial vs rayon steps for each particle count in `ns`
/// Output lines are CSV so they can be pasted straight into a sheet
pub fn bench_step(ns: &[usize], steps: usize) -> SimResult<Vec<StepTiming>> {
    let params = Parameters::default();
    let law = TunedGravity::from_params(&params);
    let steps = steps.max(1);

    println!("N,serial_ms,parallel_ms");

    let mut timings = Vec::with_capacity(ns.len());
    for &n in ns {
        // same seed for both so they advance identical fields
        let mut rng = StdRng::seed_from_u64(42);
        let template = ParticleField::seeded(NVec3::zeros(), n, &mut rng)?;

        let mut serial = template.clone();
        // Warm up
        euler_step(&mut serial, &law, &params, ClampPolicy::Keep, params.dt)?;
        let t0 = Instant::now();
        for _ in 0..steps {
            euler_step(&mut serial, &law, &params, ClampPolicy::Keep, params.dt)?;
        }
        let serial_ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let mut parallel = template;
        euler_step_par(&mut parallel, &law, &params, ClampPolicy::Keep, params.dt)?;
        let t1 = Instant::now();
        for _ in 0..steps {
            euler_step_par(&mut parallel, &law, &params, ClampPolicy::Keep, params.dt)?;
        }
        let parallel_ms = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, serial_ms, parallel_ms);
        tracing::debug!(n, serial_ms, parallel_ms, "step timing");
        timings.push(StepTiming { n, serial_ms, parallel_ms });
    }

    Ok(timings)
}

/// Field sizes up to the 200k particles the viewer runs with
pub const DEFAULT_SIZES: [usize; 6] = [1_000, 5_000, 25_000, 50_000, 100_000, 200_000];
