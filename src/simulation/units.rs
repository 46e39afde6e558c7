//! Physical constants and unit conversions
//!
//! The core works in kilometres, kilograms and seconds, so the
//! gravitational constant is carried in km³ kg⁻¹ s⁻².

use std::f64::consts::PI;

/// Gravitational constant in SI units (m³ kg⁻¹ s⁻²)
pub const G_SI: f64 = 6.67430e-11;

/// Gravitational constant in km³ kg⁻¹ s⁻²
pub const G_KM: f64 = G_SI * 1.0e-9;

/// Mean Earth–Sun distance
pub const KM_PER_AU: f64 = 1.496e8;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - 273.15
}

pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    (kelvin - 273.15) * 9.0 / 5.0 + 32.0
}

/// Angular velocity (rad/s) of a body spinning once every `period` seconds
pub fn rotational_period_to_angular_velocity(period: f64) -> f64 {
    2.0 * PI / period
}

/// Seconds per full turn for a body spinning at `angular_velocity` rad/s
pub fn angular_velocity_to_rotational_period(angular_velocity: f64) -> f64 {
    2.0 * PI / angular_velocity
}
