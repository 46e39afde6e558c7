//! Pairwise force laws
//!
//! A [`ForceLaw`] maps two body snapshots to the force the second body
//! exerts on the first. [`NewtonianGravity`] is the only law the engine
//! ships with; the trait is the seam the force cache is written against.

use crate::error::{Result, SimError};
use crate::simulation::body::Body;
use crate::simulation::units::G_KM;
use crate::simulation::vector::{NVec3, VectorExt};

/// Trait for pairwise force sources
/// Implementations return the force exerted on `first` by `second`
pub trait ForceLaw: Send + Sync {
    fn force(&self, first: &Body, second: &Body) -> Result<NVec3>;
}

/// Newtonian gravity without softening
/// Coincident bodies are an error, never an infinite force
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant, km³ kg⁻¹ s⁻²
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self { g: G_KM }
    }
}

impl ForceLaw for NewtonianGravity {
    fn force(&self, first: &Body, second: &Body) -> Result<NVec3> {
        let names = || (first.name().to_owned(), second.name().to_owned());
        let force = gravitational_force(self.g, first.mass(), first.position(), second.mass(), second.position())
            .ok_or_else(|| {
                let (first, second) = names();
                SimError::DegenerateGeometry { first, second }
            })?;

        if force.iter().all(|c| c.is_finite()) {
            Ok(force)
        } else {
            let (first, second) = names();
            Err(SimError::NonFiniteForce { first, second })
        }
    }
}

/// Force on a body of mass `m1` at `x1` due to a body of mass `m2` at `x2`
///
/// Points from `x1` toward `x2` with magnitude `g * m1 * m2 / d²`.
/// Returns `None` when the two positions coincide exactly. Distinct positions
/// always yield a vector, which is non-finite if the magnitude overflows.
pub fn gravitational_force(g: f64, m1: f64, x1: NVec3, m2: f64, x2: NVec3) -> Option<NVec3> {
    // r is the displacement from the first body to the second,
    // so the first body is pulled along +r
    let r = x2 - x1;
    let dir = r.checked_normalize()?;
    let d = r.magnitude();
    Some(dir * (g * (m1 * m2) / (d * d)))
}
