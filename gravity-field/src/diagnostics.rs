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
//! Conserved-quantity diagnostics
//!
//! Read-only measurements over a body collection, used by tests and drivers
//! to monitor momentum and energy drift.

use crate::components::{Body, Vec2};
use crate::gravity::ForceField;

/// Total linear momentum Σ m v
pub fn total_momentum(bodies: &[Body]) -> Vec2 {
    bodies.iter().fold(Vec2::zero(), |acc, body| acc + body.momentum())
}

/// Sum of momentum magnitudes Σ |m v|
///
/// Useful as a scale when judging how close [`total_momentum`] is to zero.
pub fn momentum_scale(bodies: &[Body]) -> f64 {
    bodies.iter().map(|body| body.momentum().length()).sum()
}

/// Kinetic energy of one body
///
/// KE = 0.5 * m * v²
pub fn kinetic_energy(body: &Body) -> f64 {
    0.5 * body.mass().value() * body.velocity.length_squared()
}

/// Total kinetic energy
pub fn total_kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(kinetic_energy).sum()
}

/// Total softened gravitational potential energy
///
/// U = -Σ_{i<j} G m_i m_j / sqrt(r² + ε), the potential whose gradient is
/// the softened force law.
pub fn potential_energy(bodies: &[Body], field: &ForceField) -> f64 {
    let mut total = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let r = b.position - a.position;
            let dist = (r.length_squared() + field.softening()).sqrt();
            total -= field.g_constant() * a.mass().value() * b.mass().value() / dist;
        }
    }
    total
}

/// Kinetic plus potential energy
pub fn total_energy(bodies: &[Body], field: &ForceField) -> f64 {
    total_kinetic_energy(bodies) + potential_energy(bodies, field)
}

/// Mass-weighted mean position, `None` for an empty collection
pub fn center_of_mass(bodies: &[Body]) -> Option<Vec2> {
    if bodies.is_empty() {
        return None;
    }
    let total_mass: f64 = bodies.iter().map(|b| b.mass().value()).sum();
    let weighted = bodies
        .iter()
        .fold(Vec2::zero(), |acc, b| acc + b.position * b.mass().value());
    Some(weighted / total_mass)
}
