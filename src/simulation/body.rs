//! Body records for the solar system core.
//!
//! - [`BodyRecord`] – plain input produced by the loader (or built by hand)
//! - [`Body`]       – the registry-owned runtime record
//! - [`BodyId`]     – opaque handle issued by the registry, used as cache key
//! - [`BodyKind`]   – closed set of body types with their type-specific payload
//!
//! Mass, radius, name, kind and angular velocity are fixed at construction.
//! Position, velocity and rotation angle are only written by the integrator.

use crate::error::{Result, SimError};
use crate::simulation::units;
use crate::simulation::vector::NVec3;

/// Stable handle for a body. Issued once by the registry and never reused,
/// so a handle to a removed body can never alias a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub(crate) u32);

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyKind {
    Star {
        luminosity: f64,          // W
        surface_temperature: f64, // K
    },
    Planet,
}

impl BodyKind {
    pub fn label(&self) -> &'static str {
        match self {
            BodyKind::Star { .. } => "Star",
            BodyKind::Planet => "Planet",
        }
    }
}

/// Initial description of a body, before the registry has validated it
#[derive(Debug, Clone)]
pub struct BodyRecord {
    pub kind: BodyKind,
    pub name: String,
    pub mass: f64,             // kg
    pub radius: f64,           // km, display only
    pub position: NVec3,       // km, body centre
    pub velocity: NVec3,       // km/s
    pub angular_velocity: f64, // rad/s
}

impl BodyRecord {
    pub fn planet(name: impl Into<String>, mass: f64, radius: f64, position: NVec3, velocity: NVec3) -> Self {
        Self {
            kind: BodyKind::Planet,
            name: name.into(),
            mass,
            radius,
            position,
            velocity,
            angular_velocity: 0.0,
        }
    }

    pub fn star(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        position: NVec3,
        velocity: NVec3,
        luminosity: f64,
        surface_temperature: f64,
    ) -> Self {
        Self {
            kind: BodyKind::Star { luminosity, surface_temperature },
            name: name.into(),
            mass,
            radius,
            position,
            velocity,
            angular_velocity: 0.0,
        }
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Reject records that would break the integrator or the cache later on
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SimError::Configuration("body name must not be empty".into()));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SimError::Configuration(format!(
                "body `{}` has invalid mass {} (must be finite and > 0)",
                self.name, self.mass
            )));
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(SimError::Configuration(format!(
                "body `{}` has invalid radius {}",
                self.name, self.radius
            )));
        }
        let finite = |v: &NVec3| v.iter().all(|c| c.is_finite());
        if !finite(&self.position) || !finite(&self.velocity) || !self.angular_velocity.is_finite() {
            return Err(SimError::Configuration(format!(
                "body `{}` has a non-finite position, velocity or angular velocity",
                self.name
            )));
        }
        if let BodyKind::Star { luminosity, surface_temperature } = self.kind {
            if luminosity < 0.0 || surface_temperature < 0.0 {
                return Err(SimError::Configuration(format!(
                    "star `{}` must have non-negative luminosity and temperature",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    id: BodyId,
    name: String,
    kind: BodyKind,
    mass: f64,
    radius: f64,
    angular_velocity: f64,
    pub(crate) position: NVec3,
    pub(crate) velocity: NVec3,
    pub(crate) rotation: f64, // radians in [0, 2π)
}

impl Body {
    pub(crate) fn from_record(id: BodyId, record: BodyRecord) -> Result<Self> {
        record.validate()?;
        Ok(Self {
            id,
            name: record.name,
            kind: record.kind,
            mass: record.mass,
            radius: record.radius,
            angular_velocity: record.angular_velocity,
            position: record.position,
            velocity: record.velocity,
            rotation: 0.0,
        })
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &BodyKind {
        &self.kind
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn position(&self) -> NVec3 {
        self.position
    }

    pub fn velocity(&self) -> NVec3 {
        self.velocity
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn momentum(&self) -> NVec3 {
        self.velocity * self.mass
    }

    /// Seconds per full spin, `None` for a body that does not rotate
    pub fn rotational_period(&self) -> Option<f64> {
        (self.angular_velocity != 0.0)
            .then(|| units::angular_velocity_to_rotational_period(self.angular_velocity))
    }

    /// Surface temperature in Celsius, stars only
    pub fn surface_temperature_celsius(&self) -> Option<f64> {
        match self.kind {
            BodyKind::Star { surface_temperature, .. } => Some(units::kelvin_to_celsius(surface_temperature)),
            BodyKind::Planet => None,
        }
    }

    pub fn luminosity(&self) -> Option<f64> {
        match self.kind {
            BodyKind::Star { luminosity, .. } => Some(luminosity),
            BodyKind::Planet => None,
        }
    }
}
