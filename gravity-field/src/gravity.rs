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
//! Softened Newtonian gravity
//!
//! Every force in the simulation, body on body and body on probe, goes
//! through the single force law in this module.
//!
//! # Physics Background
//!
//! Newton's law of universal gravitation gives the attraction between two
//! point masses as
//!
//! **F = G * (m₁ * m₂) / r²**
//!
//! directed along the line joining them.
//!
//! # Softening
//!
//! To keep the force finite when two points coincide, a small constant ε is
//! added to the squared separation before anything is divided by it:
//!
//! ```text
//! r        = b - a
//! dist2    = r·r + ε
//! inv_dist = 1 / sqrt(dist2)
//! F        = (G * m_self * m_other * inv_dist²) * (r * inv_dist)
//! ```
//!
//! Because ε is strictly positive, `dist2 > 0` always holds and the law has
//! no error path. At zero separation `r` is zero and so is the force. The
//! magnitude is bounded above by `G * m_self * m_other / ε` for every
//! separation.
//!
//! Note that ε here is added to r² directly (it has units of length²), not
//! squared first.
//!
//! # References
//!
//! - Aarseth, S. J. (2003). "Gravitational N-Body Simulations"
//! - Dehnen, W. (2001). "Towards optimal softening in three-dimensional N-body codes"

use crate::components::{Body, Vec2};
use crate::config::SimulationConfig;

/// Default softening term added to the squared separation
pub const DEFAULT_SOFTENING: f64 = 1e-6;

/// Compute the force on a particle at `a` exerted by a mass at `b`
///
/// `self_mass` is the mass of the particle at `a` (1 for field probes),
/// `other_mass` the mass at `b`.
///
/// # Examples
///
/// ```
/// use gravity_field::components::Vec2;
/// use gravity_field::gravity::gravitational_force;
///
/// let f = gravitational_force(Vec2::zero(), Vec2::new(10.0, 0.0), 1.0, 100.0, 1.0, 1e-6);
/// assert!(f.x > 0.0);
/// assert_eq!(f.y, 0.0);
/// ```
#[inline]
pub fn gravitational_force(
    a: Vec2,
    b: Vec2,
    self_mass: f64,
    other_mass: f64,
    g_constant: f64,
    softening: f64,
) -> Vec2 {
    let r = b - a;
    let dist2 = r.dot(r) + softening;
    let inv_dist = 1.0 / dist2.sqrt();
    let direction = r * inv_dist;
    let magnitude = g_constant * self_mass * other_mass * inv_dist * inv_dist;
    direction * magnitude
}

/// Gravitational force law with fixed constants
///
/// Holds the gravitational constant and softening term so the integrator
/// and field sampler evaluate exactly the same law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceField {
    g_constant: f64,
    softening: f64,
}

impl ForceField {
    /// Create a force field
    ///
    /// # Panics
    ///
    /// Panics if `g_constant` is negative or not finite, or if `softening`
    /// is not strictly positive and finite.
    pub fn new(g_constant: f64, softening: f64) -> Self {
        assert!(
            g_constant >= 0.0 && g_constant.is_finite(),
            "Gravitational constant must be non-negative and finite"
        );
        assert!(
            softening > 0.0 && softening.is_finite(),
            "Softening must be positive and finite"
        );
        ForceField { g_constant, softening }
    }

    /// Create a force field from a validated configuration
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.gravitational_constant, config.softening)
    }

    /// Get the gravitational constant
    pub fn g_constant(&self) -> f64 {
        self.g_constant
    }

    /// Get the softening term
    pub fn softening(&self) -> f64 {
        self.softening
    }

    /// Force on a mass `self_mass` at `a` from a mass `other_mass` at `b`
    #[inline]
    pub fn force_between(&self, a: Vec2, self_mass: f64, b: Vec2, other_mass: f64) -> Vec2 {
        gravitational_force(a, b, self_mass, other_mass, self.g_constant, self.softening)
    }

    /// Net force on `bodies[index]` from every other body
    ///
    /// Contributions are summed in ascending body order, skipping the body
    /// itself.
    pub fn net_force_on(&self, index: usize, bodies: &[Body]) -> Vec2 {
        let body = &bodies[index];
        let self_mass = body.mass().value();
        let mut total = Vec2::zero();

        for (other_index, other) in bodies.iter().enumerate() {
            if other_index == index {
                continue;
            }
            total += self.force_between(body.position, self_mass, other.position, other.mass().value());
        }

        total
    }

    /// Field strength at `point` from every body, using `test_mass` for the
    /// sampled particle
    pub fn field_at(&self, point: Vec2, test_mass: f64, bodies: &[Body]) -> Vec2 {
        let mut total = Vec2::zero();
        for body in bodies {
            total += self.force_between(point, test_mass, body.position, body.mass().value());
        }
        total
    }
}

impl Default for ForceField {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}
