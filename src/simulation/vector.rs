//! Three-component vector used for positions, velocities and forces.
//!
//! Arithmetic (add, subtract, scale, dot, cross, magnitude) comes straight
//! from `nalgebra`. [`VectorExt`] adds the few operations that must fail
//! loudly instead of producing NaN or infinity:
//! - `checked_div`       – division by a scalar, rejecting zero
//! - `checked_normalize` – unit vector, rejecting the zero vector
//! - `translate`         – in-place offset by components
//! - `distance_to`       – Euclidean distance between two points

use nalgebra::Vector3;

use crate::error::{Result, SimError};

pub type NVec3 = Vector3<f64>;

pub trait VectorExt: Sized {
    fn checked_div(&self, scalar: f64) -> Result<Self>;
    fn checked_normalize(&self) -> Option<Self>;
    fn translate(&mut self, dx: f64, dy: f64, dz: f64);
    fn distance_to(&self, other: &Self) -> f64;
}

impl VectorExt for NVec3 {
    /// Divide every component by `scalar`, failing on an exact zero
    fn checked_div(&self, scalar: f64) -> Result<Self> {
        if scalar == 0.0 {
            return Err(SimError::Configuration("division of a vector by zero".into()));
        }
        Ok(self / scalar)
    }

    /// Unit vector in the same direction, `None` for the zero vector
    fn checked_normalize(&self) -> Option<Self> {
        let mag = self.magnitude();
        if mag == 0.0 {
            return None;
        }
        Some(self / mag)
    }

    fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    fn distance_to(&self, other: &Self) -> f64 {
        (other - self).magnitude()
    }
}
