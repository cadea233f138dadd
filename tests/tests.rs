use bhdisk::simulation::body::{schwarzschild_radius, CentralBody, RELATIVISTIC_CLAMP};
use bhdisk::simulation::engine::ClampPolicy;
use bhdisk::simulation::forces::{ForceLaw, RelativisticGravity, TunedGravity};
use bhdisk::simulation::integrator::{euler_step, euler_step_par};
use bhdisk::simulation::params::Parameters;
use bhdisk::simulation::seeding::DiskDistribution;
use bhdisk::simulation::states::{NVec3, Particle, ParticleField};
use bhdisk::{FieldStats, ForceLawConfig, Scenario, ScenarioConfig, SimError};

use rand::rngs::StdRng;
use rand::SeedableRng;

use std::fs::File;
use std::path::PathBuf;

/// Body at the origin with a horizon of ~10 units
pub fn test_body() -> CentralBody {
    CentralBody::new(NVec3::zeros(), 6.7e27).unwrap()
}

/// Default physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        seed: Some(42),
        ..Parameters::default()
    }
}

/// One particle seeded the way the disk seeds them
pub fn seeded_particle(radius: f64, angle: f64) -> Particle {
    DiskDistribution::default().particle_at(&NVec3::zeros(), radius, angle, 0.0)
}

pub fn field_of(particles: Vec<Particle>) -> ParticleField {
    ParticleField::from_particles(NVec3::zeros(), particles).unwrap()
}

fn run(field: &mut ParticleField, law: &dyn ForceLaw, p: &Parameters, steps: usize) {
    for _ in 0..steps {
        euler_step(field, law, p, ClampPolicy::Keep, p.dt).unwrap();
    }
}

// ==================================================================================
// Central body tests
// ==================================================================================

#[test]
fn horizon_is_inside_influence_radius_and_grows_with_mass() {
    let masses = [1.0e20, 1.0e25, 6.7e27, 1.0e30];
    let bodies: Vec<CentralBody> = masses
        .iter()
        .map(|&m| CentralBody::new(NVec3::zeros(), m).unwrap())
        .collect();

    for b in &bodies {
        assert!(b.event_horizon_radius() > 0.0);
        assert!(b.event_horizon_radius() < b.influence_radius());
        assert!((b.influence_radius() / b.event_horizon_radius() - 1.5).abs() < 1e-12);
    }
    for pair in bodies.windows(2) {
        assert!(pair[0].event_horizon_radius() < pair[1].event_horizon_radius());
        assert!(pair[0].influence_radius() < pair[1].influence_radius());
    }
}

#[test]
fn horizon_matches_schwarzschild_formula() {
    let b = test_body();
    let expected = 2.0 * 6.67430e-11 * 6.7e27 / (299_792_458.0f64 * 299_792_458.0);
    assert!((b.event_horizon_radius() - expected).abs() < 1e-9);
    assert_eq!(b.event_horizon_radius(), schwarzschild_radius(6.7e27));
}

#[test]
fn non_positive_mass_is_rejected() {
    for m in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = CentralBody::new(NVec3::zeros(), m).unwrap_err();
        assert!(matches!(err, SimError::NonPositiveMass(_)), "mass {m} accepted");
    }
}

#[test]
fn mass_too_small_for_a_horizon_is_rejected() {
    // 2GM/c^2 underflows to zero
    let err = CentralBody::new(NVec3::zeros(), 1e-300).unwrap_err();
    assert!(matches!(err, SimError::InvalidParameter { name: "event_horizon_radius", .. }));
}

#[test]
fn force_points_toward_body() {
    let b = CentralBody::new(NVec3::new(1.0, -2.0, 3.0), 6.7e27).unwrap();
    let points = [
        NVec3::new(100.0, 0.0, 0.0),
        NVec3::new(-40.0, 25.0, 7.0),
        NVec3::new(0.0, 0.0, -300.0),
        NVec3::new(12.0, 12.0, 12.0),
        NVec3::new(1.0, -2.0, 3.0 + 15.0), // inside 3 horizon radii
    ];

    for p in points {
        let f = b.force_at(&p).unwrap();
        let toward = b.position() - p;
        assert!(f.dot(&toward) > 0.0, "force at {p:?} is not attractive");
        // collinear with the direction to the body
        assert!(f.cross(&toward).norm() <= 1e-9 * f.norm() * toward.norm());
    }
}

#[test]
fn force_far_away_is_close_to_newtonian() {
    let b = test_body();
    let d = 1.0e6;
    let f = b.force_at(&NVec3::new(d, 0.0, 0.0)).unwrap();
    let newton = 6.67430e-11 * b.mass() / (d * d);
    assert!((f.norm() / newton - 1.0).abs() < 1e-4);
}

#[test]
fn force_at_body_position_is_a_domain_error() {
    let b = test_body();
    assert_eq!(b.force_at(&NVec3::zeros()), Err(SimError::ZeroDistance));
}

#[test]
fn relativistic_factor_stays_bounded_near_horizon() {
    let b = test_body();
    let cap = 1.0 / (1.0 - RELATIVISTIC_CLAMP).sqrt();

    for scale in [1.0001, 1.01, 1.5, 2.0, 10.0] {
        let d = b.event_horizon_radius() * scale;
        let factor = b.relativistic_factor(d);
        assert!(factor.is_finite());
        assert!(factor >= 1.0 && factor <= cap + 1e-9, "factor {factor} at {scale} r_s");

        let f = b.force_at(&NVec3::new(0.0, d, 0.0)).unwrap();
        assert!(f.iter().all(|c| c.is_finite()));
    }
    assert!((b.relativistic_factor(b.event_horizon_radius() * 1.0001) - cap).abs() < 1e-9);
}

#[test]
fn suppression_only_applies_inside_three_horizons() {
    let b = test_body();
    let rs = b.event_horizon_radius();

    assert_eq!(b.suppression_factor(3.0 * rs), 1.0);
    assert_eq!(b.suppression_factor(100.0 * rs), 1.0);
    assert!((b.suppression_factor(2.0 * rs) - 1.0 / 16.0).abs() < 1e-12);
}

// ==================================================================================
// Force law tests
// ==================================================================================

#[test]
fn tuned_law_is_inverse_square() {
    let law = TunedGravity::from_params(&test_params());
    let near = law.force(&NVec3::zeros(), &NVec3::new(100.0, 0.0, 0.0)).unwrap();
    let far = law.force(&NVec3::zeros(), &NVec3::new(200.0, 0.0, 0.0)).unwrap();

    assert!((near.norm() - 9.8 * 1000.0 / 10_000.0).abs() < 1e-12);
    assert!((near.norm() / far.norm() - 4.0).abs() < 1e-9);
    assert!(near.x < 0.0);
}

#[test]
fn relativistic_law_matches_tuned_strength_far_out() {
    let p = test_params();
    let tuned = TunedGravity::from_params(&p);
    let rel = RelativisticGravity::calibrated(test_body(), p.attraction_strength());
    let x = NVec3::new(0.0, 0.0, 5.0e4);

    let a = tuned.force(&NVec3::zeros(), &x).unwrap();
    let b = rel.force(&NVec3::zeros(), &x).unwrap();
    assert!((b.norm() / a.norm() - 1.0).abs() < 1e-3);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn distance_never_drops_below_floor() {
    let mut p = test_params();
    let mut rng = StdRng::seed_from_u64(3);
    let mut field = ParticleField::seeded(NVec3::zeros(), 500, &mut rng).unwrap();
    let law = TunedGravity::from_params(&p);

    for _ in 0..1500 {
        euler_step_par(&mut field, &law, &p, ClampPolicy::Keep, p.dt).unwrap();
        let stats = FieldStats::of(&field);
        assert!(stats.min_distance >= p.min_distance - 1e-9, "min {}", stats.min_distance);
    }

    // a particle starting inside the shell is pushed out on its first step
    p.stabilizer = false;
    let mut inner = field_of(vec![Particle { x: NVec3::new(5.0, 1.0, 0.0), v: NVec3::zeros(), m: 1.0 }]);
    run(&mut inner, &law, &p, 1);
    assert!((inner.distance_of(0).unwrap() - 50.0).abs() < 1e-9);
}

#[test]
fn clamp_catches_a_particle_crossing_the_floor() {
    let mut p = test_params();
    p.stabilizer = false;
    let law = TunedGravity::from_params(&p);
    // outside the shell, fast enough inward to end the step at r ~ 47.3
    let mut field = field_of(vec![Particle { x: NVec3::new(50.5, 0.0, 0.0), v: NVec3::new(-200.0, 0.0, 0.0), m: 1.0 }]);

    let report = euler_step(&mut field, &law, &p, ClampPolicy::Keep, p.dt).unwrap();

    assert_eq!(report.clamped, 1);
    assert!((field.distance_of(0).unwrap() - p.min_distance).abs() < 1e-9);
    assert!((field.particles()[0].x - NVec3::new(-50.0, 0.0, 0.0)).norm() < 1e-9);
}

#[test]
fn particles_do_not_interact() {
    let p = test_params();
    let law = TunedGravity::from_params(&p);
    let a = seeded_particle(120.0, 0.4);
    let b = seeded_particle(310.0, 2.9);

    let mut pair = field_of(vec![a, b]);
    let mut alone_a = field_of(vec![a]);
    let mut alone_b = field_of(vec![b]);

    run(&mut pair, &law, &p, 400);
    run(&mut alone_a, &law, &p, 400);
    run(&mut alone_b, &law, &p, 400);

    assert_eq!(pair.particles()[0], alone_a.particles()[0]);
    assert_eq!(pair.particles()[1], alone_b.particles()[0]);
}

#[test]
fn heavier_particles_accelerate_less() {
    let p = test_params();
    let law = TunedGravity::from_params(&p);
    let light = seeded_particle(150.0, 1.0);
    let heavy = Particle { m: 4.0, ..light };

    let mut field = field_of(vec![light, heavy]);
    run(&mut field, &law, &p, 1);

    let dv_light = field.particles()[0].v - light.v;
    let dv_heavy = field.particles()[1].v - heavy.v;
    assert!((dv_light.norm() / dv_heavy.norm() - 4.0).abs() < 1e-9);
}

#[test]
fn seeded_orbit_stays_in_band() {
    let p = test_params();
    let body = test_body();
    let laws: [Box<dyn ForceLaw>; 2] = [
        Box::new(TunedGravity::from_params(&p)),
        Box::new(RelativisticGravity::calibrated(body, p.attraction_strength())),
    ];

    for law in &laws {
        let mut field = field_of(vec![seeded_particle(200.0, 0.0)]);
        for _ in 0..1000 {
            euler_step(&mut field, law.as_ref(), &p, ClampPolicy::Keep, p.dt).unwrap();
            let r = field.distance_of(0).unwrap();
            assert!((150.0..=300.0).contains(&r), "{} law: r = {r}", law.name());
        }
        assert!((field.t() - 16.0).abs() < 1e-9);
    }
}

#[test]
fn particle_at_rest_skips_the_stabilizer() {
    let p = test_params();
    let law = TunedGravity::from_params(&p);
    let mut field = field_of(vec![Particle { x: NVec3::new(0.0, 0.0, 100.0), v: NVec3::zeros(), m: 1.0 }]);

    run(&mut field, &law, &p, 1);
    let v = field.particles()[0].v;
    assert!(v.iter().all(|c| c.is_finite()));
    assert!(v.x.abs() < 1e-12 && v.z < 0.0);
}

// ==================================================================================
// Seeding and scenario tests
// ==================================================================================

#[test]
fn seeded_fields_are_reproducible() {
    let a = ParticleField::seeded(NVec3::zeros(), 1_000, &mut StdRng::seed_from_u64(99)).unwrap();
    let b = ParticleField::seeded(NVec3::zeros(), 1_000, &mut StdRng::seed_from_u64(99)).unwrap();
    let c = ParticleField::seeded(NVec3::zeros(), 1_000, &mut StdRng::seed_from_u64(100)).unwrap();

    assert_eq!(a.particles(), b.particles());
    assert_ne!(a.particles(), c.particles());
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn empty_field_is_rejected() {
    assert_eq!(
        ParticleField::from_particles(NVec3::zeros(), Vec::new()).unwrap_err(),
        SimError::EmptyField
    );
}

#[test]
fn scenario_from_config_steps_and_counts_frames() {
    let mut cfg = ScenarioConfig::default();
    cfg.disk.count = 2_000;
    cfg.parameters.seed = Some(5);

    let mut scenario = Scenario::build_scenario(cfg.clone()).unwrap();
    let mut serial_cfg = cfg;
    serial_cfg.engine.parallel = false;
    let mut serial = Scenario::build_scenario(serial_cfg).unwrap();

    assert_eq!(scenario.field().len(), 2_000);
    assert_eq!(scenario.field().center(), scenario.body.position());

    for _ in 0..30 {
        scenario.step().unwrap();
        serial.step().unwrap();
    }
    assert_eq!(scenario.frame(), 30);
    assert_eq!(scenario.field().particles(), serial.field().particles());
}

#[test]
fn relativistic_scenario_inside_suppression_range_stays_finite() {
    let mut cfg = ScenarioConfig::default();
    cfg.engine.force_law = ForceLawConfig::Relativistic;
    cfg.parameters.min_distance = 20.0;
    cfg.parameters.seed = Some(17);
    cfg.disk.count = 500;
    cfg.disk.radius_min = 21.0;
    cfg.disk.radius_span = 8.0;
    cfg.disk.height_std = 2.0;

    let mut scenario = Scenario::build_scenario(cfg).unwrap();
    assert_eq!(scenario.force_law().name(), "relativistic");

    let suppression_edge = 3.0 * scenario.body.event_horizon_radius();
    assert!(scenario.parameters.min_distance < suppression_edge);
    assert!(FieldStats::of(scenario.field()).min_distance < suppression_edge);

    let floor = scenario.parameters.min_distance;
    for _ in 0..200 {
        scenario.step().unwrap();
        let field = scenario.field();
        for p in field.particles() {
            assert!(p.x.iter().chain(p.v.iter()).all(|c| c.is_finite()), "{p:?}");
        }
        assert!(FieldStats::of(field).min_distance >= floor - 1e-9);
    }
    assert_eq!(scenario.frame(), 200);
}

#[test]
fn scenario_rejects_bad_config() {
    let mut cfg = ScenarioConfig::default();
    cfg.body.mass = 0.0;
    assert!(Scenario::build_scenario(cfg).is_err());

    let mut cfg = ScenarioConfig::default();
    cfg.disk.count = 0;
    assert_eq!(Scenario::build_scenario(cfg).err(), Some(SimError::EmptyField));

    let mut cfg = ScenarioConfig::default();
    cfg.parameters.dt = -0.016;
    assert!(Scenario::build_scenario(cfg).is_err());
}

#[test]
fn bundled_scenarios_parse() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    for name in ["default.yaml", "relativistic.yaml"] {
        let file = File::open(dir.join(name)).unwrap();
        let cfg = ScenarioConfig::from_reader(file).unwrap();
        assert!(cfg.disk.count > 0, "{name}");
    }
}
