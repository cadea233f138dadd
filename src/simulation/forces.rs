//! Force laws driving the particle disk
//!
//! Two radial laws are available behind [`ForceLaw`]:
//! - [`TunedGravity`], the simplified `k / r^2` attraction with `k = g_sim * 1000`
//! - [`RelativisticGravity`], which routes through [`CentralBody::force_at`]
//!
//! plus the tangential stabilizer term the integrator adds on top of either.

use crate::configuration::config::ForceLawConfig;
use crate::error::{SimError, SimResult};
use crate::simulation::body::{CentralBody, G};
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec3;

/// Radial force on a particle at `x` due to an attractor at `center`
///
/// Laws are shared read-only across rayon workers during a step.
pub trait ForceLaw: Send + Sync {
    fn force(&self, center: &NVec3, x: &NVec3) -> SimResult<NVec3>;

    fn name(&self) -> &'static str;
}

/// Simplified, non-relativistic attraction `k / r^2` toward the center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TunedGravity {
    pub strength: f64, // k = g_sim * 1000
}

impl TunedGravity {
    pub fn from_params(params: &Parameters) -> Self {
        Self { strength: params.attraction_strength() }
    }
}

impl ForceLaw for TunedGravity {
    fn force(&self, center: &NVec3, x: &NVec3) -> SimResult<NVec3> {
        let to_center = center - x;
        let d2 = to_center.norm_squared();
        if d2 == 0.0 {
            return Err(SimError::ZeroDistance);
        }
        let d = d2.sqrt();

        Ok(to_center / d * (self.strength / d2))
    }

    fn name(&self) -> &'static str {
        "tuned"
    }
}

/// The central body's relativistic model, rescaled by `gain`.
///
/// Physical `G * M` is tiny in simulation units, so the Newtonian part is
/// recalibrated: `gain = strength / (G * M)` makes the far-field pull equal
/// to the tuned law's `strength / r^2`. The relativistic and suppression
/// factors still come from the body. The body position is the attractor,
/// so `center` must equal it. [`build_force_law`] rejects a mismatch.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativisticGravity {
    pub body: CentralBody,
    pub gain: f64,
}

impl RelativisticGravity {
    pub fn calibrated(body: CentralBody, strength: f64) -> Self {
        let gain = strength / (G * body.mass());
        Self { body, gain }
    }
}

impl ForceLaw for RelativisticGravity {
    fn force(&self, center: &NVec3, x: &NVec3) -> SimResult<NVec3> {
        debug_assert_eq!(*center, self.body.position());
        Ok(self.body.force_at(x)? * self.gain)
    }

    fn name(&self) -> &'static str {
        "relativistic"
    }
}

/// Build the configured law for `body`, driving a field centered on `center`
pub fn build_force_law(
    cfg: ForceLawConfig,
    params: &Parameters,
    body: &CentralBody,
    center: &NVec3,
) -> SimResult<Box<dyn ForceLaw>> {
    match cfg {
        ForceLawConfig::Tuned => Ok(Box::new(TunedGravity::from_params(params))),
        ForceLawConfig::Relativistic => {
            if *center != body.position() {
                return Err(SimError::CenterMismatch);
            }
            Ok(Box::new(RelativisticGravity::calibrated(
                body.clone(),
                params.attraction_strength(),
            )))
        }
    }
}

/// Empirical stabilizer perpendicular to the velocity in the XZ plane.
///
/// Direction `(-v.z, 0, v.x) / |v|`, magnitude `|v|^2 / distance`. Zero when
/// the particle is at rest.
pub fn tangential_stabilizer(v: &NVec3, distance: f64) -> NVec3 {
    let speed = v.norm();
    if speed == 0.0 || distance == 0.0 {
        return NVec3::zeros();
    }
    let dir = v / speed;
    let tangent = NVec3::new(-dir.z, 0.0, dir.x);

    tangent * (speed * speed / distance)
}
