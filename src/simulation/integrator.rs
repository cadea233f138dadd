//! Explicit Euler stepping for the particle disk
//!
//! Each particle is advanced on its own: radial force from the active
//! [`ForceLaw`], an optional tangential stabilizer, then
//! `v += a dt; x += v dt`, then the minimum-approach clamp. Nothing is read
//! from other particles, so the rayon driver splits the slice freely and
//! only joins at the end of the step.
//!
//! Every distance is checked before any particle moves, so a step that
//! returns an error leaves the field exactly as it was.

use rayon::prelude::*;

use crate::error::{require_positive, SimError, SimResult};
use crate::simulation::engine::ClampPolicy;
use crate::simulation::forces::{tangential_stabilizer, ForceLaw};
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec3, Particle, ParticleField};

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub clamped: usize, // particles snapped to the min-distance shell
}

/// Settings shared read-only by every particle update in a step
struct StepContext<'a> {
    center: NVec3,
    law: &'a dyn ForceLaw,
    dt: f64,
    min_distance: f64,
    stabilizer: bool,
    clamp: ClampPolicy,
}

/// Advance the field by `dt` on the current thread
pub fn euler_step(
    field: &mut ParticleField,
    law: &dyn ForceLaw,
    params: &Parameters,
    clamp: ClampPolicy,
    dt: f64,
) -> SimResult<StepReport> {
    let ctx = context(field, law, params, clamp, dt)?;

    let clamped = field
        .particles_mut()
        .iter_mut()
        .try_fold(0usize, |acc, p| advance(p, &ctx).map(|c| acc + usize::from(c)))?;

    field.advance_time(dt);
    Ok(StepReport { clamped })
}

/// Advance the field by `dt`, splitting particles across the rayon pool
pub fn euler_step_par(
    field: &mut ParticleField,
    law: &dyn ForceLaw,
    params: &Parameters,
    clamp: ClampPolicy,
    dt: f64,
) -> SimResult<StepReport> {
    let ctx = context(field, law, params, clamp, dt)?;

    let clamped = field
        .particles_mut()
        .par_iter_mut()
        .map(|p| advance(p, &ctx).map(usize::from))
        .try_reduce(|| 0, |a, b| Ok(a + b))?;

    field.advance_time(dt);
    Ok(StepReport { clamped })
}

fn context<'a>(
    field: &ParticleField,
    law: &'a dyn ForceLaw,
    params: &Parameters,
    clamp: ClampPolicy,
    dt: f64,
) -> SimResult<StepContext<'a>> {
    require_positive("dt", dt)?;
    require_positive("min_distance", params.min_distance)?;
    if let ClampPolicy::Damp(f) = clamp {
        if !(0.0..=1.0).contains(&f) {
            return Err(SimError::InvalidParameter { name: "damp", value: f });
        }
    }

    let center = field.center();
    for p in field.particles() {
        let distance = (p.x - center).norm();
        if distance == 0.0 {
            return Err(SimError::ZeroDistance);
        }
        if !distance.is_finite() {
            return Err(SimError::NonFinite("particle position"));
        }
    }

    Ok(StepContext {
        center,
        law,
        dt,
        min_distance: params.min_distance,
        stabilizer: params.stabilizer,
        clamp,
    })
}

/// One particle, one step. Returns whether the clamp fired.
fn advance(p: &mut Particle, ctx: &StepContext<'_>) -> SimResult<bool> {
    let to_center = ctx.center - p.x;
    let distance = to_center.norm();
    if distance == 0.0 {
        return Err(SimError::ZeroDistance);
    }

    let mut force = ctx.law.force(&ctx.center, &p.x)?;
    if ctx.stabilizer {
        force += tangential_stabilizer(&p.v, distance);
    }
    let a = force / p.m;

    p.v += a * ctx.dt;
    p.x += p.v * ctx.dt;

    let after = (p.x - ctx.center).norm();
    if distance >= ctx.min_distance && after >= ctx.min_distance {
        return Ok(false);
    }

    // Snap along the pre-step direction toward the center. This lands on the
    // far side of the attractor, exactly `min_distance` away.
    let n = to_center / distance;
    p.x = ctx.center + n * ctx.min_distance;

    match ctx.clamp {
        ClampPolicy::Keep => {}
        ClampPolicy::Damp(f) => p.v *= f,
        ClampPolicy::Reflect => {
            // `n` is the outward normal at the new position
            let radial = p.v.dot(&n);
            if radial < 0.0 {
                p.v -= n * (2.0 * radial);
            }
        }
    }

    Ok(true)
}
