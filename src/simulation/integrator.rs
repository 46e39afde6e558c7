//! Fixed-step integrator for the solar system
//!
//! One force evaluation per tick, taken from the cached net forces.
//! Position uses the pre-update velocity plus the half-acceleration term,
//! velocity takes the full acceleration:
//!
//! x_n+1 = x_n + v_n dt + 1/2 a_n dt^2
//! v_n+1 = v_n + a_n dt

use std::f64::consts::TAU;

use crate::simulation::aggregator::NetForces;
use crate::simulation::body::Body;
use crate::simulation::vector::NVec3;

/// Advance every body in `bodies` by `dt` seconds under `net`.
/// Bodies missing from `net` feel no force this tick.
pub fn integrate(bodies: &mut [Body], net: &NetForces, dt: f64) {
    let half_dt2 = 0.5 * dt * dt; // 1/2 dt^2

    for b in bodies.iter_mut() {
        let force = net.get(b.id()).unwrap_or_else(NVec3::zeros);

        // a = F / m, mass is validated > 0 when the body is registered
        let a = force / b.mass();

        // Drift with the old velocity, then kick
        b.position += b.velocity * dt + a * half_dt2;
        b.velocity += a * dt;

        // Spin is display data only: keep the angle in [0, 2π)
        b.rotation = (b.rotation + b.angular_velocity() * dt).rem_euclid(TAU);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::body::BodyRecord;
    use crate::simulation::registry::BodyRegistry;

    #[test]
    fn constant_force_update() {
        let mut registry = BodyRegistry::new();
        let id = registry
            .insert(BodyRecord::planet("probe", 2.0, 1.0, NVec3::zeros(), NVec3::new(1.0, 0.0, 0.0)))
            .unwrap();
        let net: NetForces = [(id, NVec3::new(4.0, 0.0, 0.0))].into_iter().collect();

        integrate(registry.bodies_mut(), &net, 0.5);

        // a = 2, x = 0 + 1 * 0.5 + 0.5 * 2 * 0.25, v = 1 + 2 * 0.5
        let b = registry.get(id).unwrap();
        assert_eq!(b.position(), NVec3::new(0.75, 0.0, 0.0));
        assert_eq!(b.velocity(), NVec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn missing_net_force_means_free_motion() {
        let mut registry = BodyRegistry::new();
        let id = registry
            .insert(BodyRecord::planet("drifter", 1.0, 1.0, NVec3::new(1.0, 2.0, 3.0), NVec3::new(0.5, 0.0, -1.0)))
            .unwrap();

        integrate(registry.bodies_mut(), &NetForces::default(), 2.0);

        let b = registry.get(id).unwrap();
        assert_eq!(b.position(), NVec3::new(2.0, 2.0, 1.0));
        assert_eq!(b.velocity(), NVec3::new(0.5, 0.0, -1.0));
    }

    #[test]
    fn rotation_wraps_at_full_turn() {
        let mut registry = BodyRegistry::new();
        let id = registry
            .insert(BodyRecord::planet("spinner", 1.0, 1.0, NVec3::zeros(), NVec3::zeros()).with_angular_velocity(1.0))
            .unwrap();

        for _ in 0..7 {
            integrate(registry.bodies_mut(), &NetForces::default(), 1.0);
        }

        let rotation = registry.get(id).unwrap().rotation();
        assert!((0.0..TAU).contains(&rotation));
        assert!((rotation - (7.0 - TAU)).abs() < 1e-12);
    }
}
