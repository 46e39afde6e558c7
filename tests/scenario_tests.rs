use approx::assert_relative_eq;

use solsim::{BodyKind, BodyType, PairForce, Scenario, ScenarioConfig, SimError};

const THREE_BODY_YAML: &str = r#"
engine:
  parallel: false

parameters:
  dt: 1.0
  target_fps: 30.0
  steps: 1

celestial_bodies:
  - type: Star
    name: Sun
    mass: 1.989e30
    radius: 696340.0
    position: { x: 0.0, y: 0.0, z: 0.0 }
    velocity: { x: 0.0, y: 0.0, z: 0.0 }
    angularVelocity: 2.865e-6
    luminosity: 3.828e26
    surfaceTemperature: 5778.0
  - type: Planet
    name: Earth
    mass: 5.972e24
    radius: 6371.0
    position: { x: 1.496e8, y: 0.0, z: 0.0 }
    velocity: { x: 0.0, y: 29.78, z: 0.0 }
    angularVelocity: 7.292e-5
  - type: Planet
    name: Moon
    mass: 7.342e22
    radius: 1737.4
    position: { x: 1.499844e8, y: 0.0, z: 0.0 }
    velocity: { x: 0.0, y: 30.802, z: 0.0 }
"#;

#[test]
fn parses_persisted_body_records() {
    let cfg = ScenarioConfig::from_yaml_str(THREE_BODY_YAML).unwrap();
    assert_eq!(cfg.celestial_bodies.len(), 3);

    let sun = &cfg.celestial_bodies[0];
    assert_eq!(sun.body_type, BodyType::Star);
    assert_eq!(sun.luminosity, Some(3.828e26));
    assert_eq!(sun.surface_temperature, Some(5778.0));

    let moon = &cfg.celestial_bodies[2];
    assert_eq!(moon.body_type, BodyType::Planet);
    assert_eq!(moon.angular_velocity, 0.0);
    assert_eq!(moon.velocity.y, 30.802);
}

#[test]
fn omitted_scoring_uses_reference_constants() {
    let cfg = ScenarioConfig::from_yaml_str(THREE_BODY_YAML).unwrap();
    let p = cfg.parameters();
    assert_eq!(p.scoring.min_score, 1);
    assert_eq!(p.scoring.max_score, 100);
    assert_eq!(p.scoring.log_base, 10.0);
    assert_eq!(p.scoring.log_range, 15.0);
    assert_relative_eq!(p.g, 6.6743e-20, max_relative = 1e-12);
}

#[test]
fn scenario_builds_star_and_planets() {
    let scenario = Scenario::build(ScenarioConfig::from_yaml_str(THREE_BODY_YAML).unwrap()).unwrap();
    let sys = &scenario.system;
    assert_eq!(sys.len(), 3);
    assert_eq!(sys.cache().len(), 3);

    let sun = sys.find("Sun").unwrap();
    assert!(matches!(sun.kind(), BodyKind::Star { .. }));
    assert_eq!(sun.luminosity(), Some(3.828e26));
    assert_relative_eq!(sun.surface_temperature_celsius().unwrap(), 5504.85, epsilon = 1e-9);

    let earth = sys.find("Earth").unwrap();
    assert_eq!(earth.kind(), &BodyKind::Planet);
    assert_relative_eq!(earth.rotational_period().unwrap(), 86_164.0, max_relative = 1e-3);
    assert_eq!(sys.find("Moon").unwrap().rotational_period(), None);
}

#[test]
fn three_body_tick_keeps_scores_in_range() {
    let mut scenario = Scenario::build(ScenarioConfig::from_yaml_str(THREE_BODY_YAML).unwrap()).unwrap();
    let total = scenario.run(|_, _, _| {}).unwrap();
    assert_eq!(total.pairs, 3);
    assert_eq!(total.recomputed, 3);

    let sys = &scenario.system;
    let ids: Vec<_> = sys.bodies().map(|b| b.id()).collect();
    for i in 0..ids.len() {
        for j in (i + 1)..ids.len() {
            match sys.force_between(ids[i], ids[j]).unwrap() {
                PairForce::Evaluated { score, .. } => assert!((1..=100).contains(&score)),
                PairForce::NotEvaluated => panic!("pair left unevaluated"),
            }
        }
    }
}

#[test]
fn run_reports_every_tick() {
    let mut cfg = ScenarioConfig::from_yaml_str(THREE_BODY_YAML).unwrap();
    cfg.parameters.steps = 4;
    cfg.engine.parallel = true;
    let mut scenario = Scenario::build(cfg).unwrap();

    let mut seen = Vec::new();
    scenario.run(|step, sys, stats| seen.push((step, sys.time(), stats.pairs))).unwrap();
    assert_eq!(seen, vec![(1, 1.0, 3), (2, 2.0, 3), (3, 3.0, 3), (4, 4.0, 3)]);
}

#[test]
fn star_without_luminosity_is_rejected() {
    let yaml = r#"
parameters: { dt: 1.0, target_fps: 30.0 }
celestial_bodies:
  - type: Star
    name: Dim
    mass: 1.0e30
    radius: 1.0
    position: { x: 0.0, y: 0.0, z: 0.0 }
"#;
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    assert!(matches!(Scenario::build(cfg), Err(SimError::Configuration(_))));
}

#[test]
fn massless_planet_is_rejected() {
    let yaml = r#"
parameters: { dt: 1.0, target_fps: 30.0 }
celestial_bodies:
  - type: Planet
    name: Nothing
    mass: 0.0
    radius: 1.0
    position: { x: 1.0, y: 0.0, z: 0.0 }
"#;
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    assert!(matches!(Scenario::build(cfg), Err(SimError::Configuration(_))));
}

#[test]
fn zero_target_fps_is_rejected_at_build() {
    let yaml = THREE_BODY_YAML.replace("target_fps: 30.0", "target_fps: 0.0");
    let cfg = ScenarioConfig::from_yaml_str(&yaml).unwrap();
    assert!(matches!(Scenario::build(cfg), Err(SimError::Configuration(_))));
}

#[test]
fn unknown_body_type_fails_to_parse() {
    let yaml = THREE_BODY_YAML.replace("type: Planet", "type: Comet");
    assert!(matches!(ScenarioConfig::from_yaml_str(&yaml), Err(SimError::Yaml(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let res = ScenarioConfig::from_path("definitely/not/here.yaml");
    assert!(matches!(res, Err(SimError::Io(_))));
}

#[test]
fn bundled_solar_system_scenario_loads_and_runs() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/solar_system.yaml");
    let mut cfg = ScenarioConfig::from_path(path).unwrap();
    cfg.parameters.steps = 10;

    let mut scenario = Scenario::build(cfg).unwrap();
    assert_eq!(scenario.system.len(), 7);
    assert_eq!(scenario.system.cache().len(), 21);

    scenario.run(|_, _, _| {}).unwrap();
    let earth = scenario.system.find("Earth").unwrap();
    assert_relative_eq!(earth.position().norm(), 1.496e8, max_relative = 1e-3);
}
