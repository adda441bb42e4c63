// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Simulation-wide physical constants
//!
//! The gravitational constant, timestep, softening term and restitution
//! coefficient are fixed for the lifetime of a [`Simulation`](crate::Simulation).
//! They are gathered into one [`SimulationConfig`] that is validated once,
//! before the first step, and copied into the orchestrator.
//!
//! The defaults reproduce the interactive sandbox this core was built for:
//! screen-space units, `G = 900`, `dt = 0.7`.

use crate::collision::DEFAULT_RESTITUTION;
use crate::gravity::DEFAULT_SOFTENING;
use std::fmt;

/// Default gravitational constant (screen-space units)
pub const DEFAULT_GRAVITATIONAL_CONSTANT: f64 = 900.0;

/// Default fixed timestep
pub const DEFAULT_TIMESTEP: f64 = 0.7;

/// Physical constants for a simulation run
///
/// # Example
///
/// ```
/// use gravity_field::config::SimulationConfig;
///
/// let config = SimulationConfig::default()
///     .with_timestep(0.1)
///     .with_restitution(1.0);
/// assert!(config.validate().is_ok());
///
/// let broken = SimulationConfig::default().with_softening(0.0);
/// assert!(broken.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Gravitational constant G
    pub gravitational_constant: f64,
    /// Fixed timestep dt
    pub timestep: f64,
    /// Softening ε added to squared separations
    pub softening: f64,
    /// Restitution coefficient e for collisions (1 = perfectly elastic)
    pub restitution: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            timestep: DEFAULT_TIMESTEP,
            softening: DEFAULT_SOFTENING,
            restitution: DEFAULT_RESTITUTION,
        }
    }
}

impl SimulationConfig {
    /// Create a configuration with the given G and dt and default softening
    /// and restitution
    pub fn new(gravitational_constant: f64, timestep: f64) -> Self {
        SimulationConfig {
            gravitational_constant,
            timestep,
            ..Default::default()
        }
    }

    /// Set the gravitational constant
    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    /// Set the timestep
    pub fn with_timestep(mut self, dt: f64) -> Self {
        self.timestep = dt;
        self
    }

    /// Set the softening term
    pub fn with_softening(mut self, softening: f64) -> Self {
        self.softening = softening;
        self
    }

    /// Set the restitution coefficient
    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    /// Check every constant is in range
    ///
    /// - G must be finite and non-negative
    /// - dt must be finite and positive
    /// - ε must be finite and strictly positive (it is what keeps the force
    ///   law free of division by zero)
    /// - e must lie in `[0, 1]`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = self.gravitational_constant;
        if !(g >= 0.0 && g.is_finite()) {
            return Err(ConfigError::InvalidGravitationalConstant(g));
        }
        if !(self.timestep > 0.0 && self.timestep.is_finite()) {
            return Err(ConfigError::InvalidTimestep(self.timestep));
        }
        if !(self.softening > 0.0 && self.softening.is_finite()) {
            return Err(ConfigError::InvalidSoftening(self.softening));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ConfigError::InvalidRestitution(self.restitution));
        }
        Ok(())
    }
}

/// A physical constant outside its valid range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// G is negative, NaN or infinite
    InvalidGravitationalConstant(f64),
    /// dt is non-positive, NaN or infinite
    InvalidTimestep(f64),
    /// ε is non-positive, NaN or infinite
    InvalidSoftening(f64),
    /// e is outside `[0, 1]` or NaN
    InvalidRestitution(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidGravitationalConstant(g) => {
                write!(f, "Invalid gravitational constant {}: must be non-negative and finite", g)
            }
            ConfigError::InvalidTimestep(dt) => {
                write!(f, "Invalid timestep {}: must be positive and finite", dt)
            }
            ConfigError::InvalidSoftening(eps) => {
                write!(f, "Invalid softening {}: must be positive and finite", eps)
            }
            ConfigError::InvalidRestitution(e) => {
                write!(f, "Invalid restitution coefficient {}: must lie in [0, 1]", e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.gravitational_constant, 900.0);
        assert_eq!(config.timestep, 0.7);
        assert_eq!(config.softening, 1e-6);
        assert_eq!(config.restitution, 0.99999);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_keeps_default_softening_and_restitution() {
        let config = SimulationConfig::new(1.0, 0.01);
        assert_eq!(config.gravitational_constant, 1.0);
        assert_eq!(config.timestep, 0.01);
        assert_eq!(config.softening, DEFAULT_SOFTENING);
        assert_eq!(config.restitution, DEFAULT_RESTITUTION);
    }

    #[test]
    fn test_zero_gravity_is_valid() {
        assert!(SimulationConfig::default().with_gravitational_constant(0.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_gravity() {
        let err = SimulationConfig::default().with_gravitational_constant(-1.0).validate();
        assert_eq!(err, Err(ConfigError::InvalidGravitationalConstant(-1.0)));
    }

    #[test]
    fn test_rejects_bad_timesteps() {
        for dt in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let result = SimulationConfig::default().with_timestep(dt).validate();
            assert!(matches!(result, Err(ConfigError::InvalidTimestep(_))), "dt = {}", dt);
        }
    }

    #[test]
    fn test_rejects_non_positive_softening() {
        for eps in [0.0, -1e-6, f64::NAN] {
            let result = SimulationConfig::default().with_softening(eps).validate();
            assert!(matches!(result, Err(ConfigError::InvalidSoftening(_))), "eps = {}", eps);
        }
    }

    #[test]
    fn test_restitution_range() {
        assert!(SimulationConfig::default().with_restitution(0.0).validate().is_ok());
        assert!(SimulationConfig::default().with_restitution(1.0).validate().is_ok());
        assert!(SimulationConfig::default().with_restitution(1.5).validate().is_err());
        assert!(SimulationConfig::default().with_restitution(-0.1).validate().is_err());
        assert!(SimulationConfig::default().with_restitution(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_error_display() {
        let msg = ConfigError::InvalidTimestep(-2.0).to_string();
        assert!(msg.contains("-2"));
        assert!(msg.contains("positive and finite"));
    }
}
