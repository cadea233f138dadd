pub mod error;
pub mod simulation;
pub mod configuration;
pub mod frame;
pub mod benchmark;

pub use error::{SimError, SimResult};

pub use simulation::states::{NVec3, Particle, ParticleField, FieldSnapshot};
pub use simulation::body::CentralBody;
pub use simulation::forces::{ForceLaw, TunedGravity, RelativisticGravity, tangential_stabilizer};
pub use simulation::integrator::{euler_step, euler_step_par, StepReport};
pub use simulation::engine::{Engine, ClampPolicy};
pub use simulation::params::Parameters;
pub use simulation::seeding::DiskDistribution;
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, BodyConfig, DiskConfig, ScenarioConfig, ForceLawConfig, ClampConfig};

pub use frame::sink::{FrameSink, FieldStats, StatsSink, SnapshotSink};

pub use benchmark::benchmark::bench_step;
