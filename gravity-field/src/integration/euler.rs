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
//! Semi-implicit (symplectic) Euler integrator
//!
//! # Algorithm
//!
//! ```text
//! F_i   = Σ_{j≠i} gravity(p_i, p_j)      for every i, before anything moves
//! v_i' = v_i + (F_i / m_i) * dt
//! p_i' = p_i + v_i' * dt
//! ```
//!
//! The two phases are kept apart: if bodies were moved while forces were
//! still being accumulated, later bodies would see already-updated positions
//! of earlier ones and the pairwise forces would no longer cancel.
//!
//! # Properties
//!
//! - **Symplectic**: bounded energy drift for orbital motion
//! - **First-order accurate**: global error O(dt)
//! - **One force evaluation per step**
//!
//! # References
//!
//! - Hairer, E., Lubich, C., & Wanner, G. (2006). Geometric Numerical Integration.
//!   Springer. Section I.1.

use super::Integrator;
use crate::components::{Body, Vec2};
use crate::gravity::ForceField;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Semi-implicit Euler integrator
///
/// # Example
///
/// ```
/// use gravity_field::integration::{Integrator, SemiImplicitEuler};
///
/// let integrator = SemiImplicitEuler::new(0.7);
/// assert_eq!(integrator.timestep(), 0.7);
/// assert!(integrator.validate_timestep().is_ok());
/// ```
pub struct SemiImplicitEuler {
    timestep: f64,
    /// Per-body force scratch, reused across steps
    forces: Vec<Vec2>,
}

impl SemiImplicitEuler {
    /// Create a new integrator with the given timestep
    ///
    /// # Panics
    ///
    /// Panics if timestep is non-positive, NaN, or infinite
    pub fn new(timestep: f64) -> Self {
        assert!(
            timestep > 0.0 && timestep.is_finite(),
            "Timestep must be positive and finite"
        );
        SemiImplicitEuler {
            timestep,
            forces: Vec::new(),
        }
    }

    /// Recompute every body's `net_force` from the current positions
    ///
    /// Bodies are not moved. Each body's sum runs over the other bodies in
    /// ascending index order, so the parallel and sequential paths produce
    /// identical bits.
    pub fn accumulate_forces(&mut self, bodies: &mut [Body], field: &ForceField) {
        for body in bodies.iter_mut() {
            body.net_force = Vec2::zero();
        }

        let snapshot: &[Body] = bodies;

        #[cfg(feature = "parallel")]
        {
            (0..snapshot.len())
                .into_par_iter()
                .map(|i| field.net_force_on(i, snapshot))
                .collect_into_vec(&mut self.forces);
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.forces.clear();
            self.forces
                .extend((0..snapshot.len()).map(|i| field.net_force_on(i, snapshot)));
        }

        for (body, force) in bodies.iter_mut().zip(self.forces.iter()) {
            body.net_force = *force;
        }
    }

    /// Apply `v += (F/m) dt; p += v dt` using the already accumulated forces
    fn advance(&self, bodies: &mut [Body]) {
        let dt = self.timestep;
        for body in bodies.iter_mut() {
            let acceleration = body.net_force / body.mass().value();
            body.velocity += acceleration * dt;
            body.position += body.velocity * dt;
        }
    }
}

impl Integrator for SemiImplicitEuler {
    fn name(&self) -> &str {
        "Semi-implicit Euler"
    }

    fn timestep(&self) -> f64 {
        self.timestep
    }

    fn set_timestep(&mut self, dt: f64) {
        assert!(
            dt > 0.0 && dt.is_finite(),
            "Timestep must be positive and finite"
        );
        self.timestep = dt;
    }

    fn integrate(&mut self, bodies: &mut [Body], field: &ForceField) -> usize {
        self.accumulate_forces(bodies, field);
        self.advance(bodies);
        bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Mass;
    use crate::gravity::DEFAULT_SOFTENING;

    fn body(x: f64, y: f64, vx: f64, vy: f64, m: f64) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(vx, vy), Mass::new(m), 1.0)
    }

    #[test]
    fn test_free_body_moves_linearly() {
        let field = ForceField::new(900.0, DEFAULT_SOFTENING);
        let mut bodies = vec![body(0.0, 0.0, 2.0, -1.0, 1.0)];
        let mut integrator = SemiImplicitEuler::new(0.5);

        for _ in 0..4 {
            integrator.integrate(&mut bodies, &field);
        }

        assert_eq!(bodies[0].velocity, Vec2::new(2.0, -1.0));
        assert_eq!(bodies[0].position, Vec2::new(4.0, -2.0));
        assert_eq!(bodies[0].net_force, Vec2::zero());
    }

    #[test]
    fn test_velocity_updated_before_position() {
        // Semi-implicit: position uses the *new* velocity.
        let field = ForceField::new(900.0, DEFAULT_SOFTENING);
        let mut bodies = vec![
            body(0.0, 0.0, 0.0, 0.0, 1.0),
            body(30.0, 0.0, 0.0, 0.0, 1.0),
        ];
        let mut integrator = SemiImplicitEuler::new(1.0);
        integrator.integrate(&mut bodies, &field);

        let v = bodies[0].velocity.x;
        assert!(v > 0.0);
        assert_eq!(bodies[0].position.x, v * 1.0);
    }

    #[test]
    fn test_forces_computed_before_any_body_moves() {
        let field = ForceField::new(900.0, DEFAULT_SOFTENING);
        let initial = vec![
            body(-50.0, 10.0, 3.0, 0.0, 40.0),
            body(60.0, -20.0, 0.0, 2.0, 70.0),
            body(5.0, 80.0, -1.0, -1.0, 25.0),
        ];
        let expected: Vec<Vec2> = (0..initial.len())
            .map(|i| field.net_force_on(i, &initial))
            .collect();

        let mut bodies = initial.clone();
        let mut integrator = SemiImplicitEuler::new(0.7);
        integrator.integrate(&mut bodies, &field);

        for (body, force) in bodies.iter().zip(expected.iter()) {
            assert_eq!(body.net_force, *force);
        }
    }

    #[test]
    fn test_net_force_recomputed_not_accumulated() {
        let field = ForceField::new(900.0, DEFAULT_SOFTENING);
        let mut bodies = vec![body(0.0, 0.0, 0.0, 0.0, 1.0)];
        bodies[0].net_force = Vec2::new(1e6, 1e6);

        let mut integrator = SemiImplicitEuler::new(0.1);
        integrator.accumulate_forces(&mut bodies, &field);
        assert_eq!(bodies[0].net_force, Vec2::zero());
    }

    #[test]
    fn test_integrate_returns_body_count() {
        let field = ForceField::new(1.0, DEFAULT_SOFTENING);
        let mut bodies = vec![body(0.0, 0.0, 0.0, 0.0, 1.0), body(1.0, 0.0, 0.0, 0.0, 1.0)];
        let mut integrator = SemiImplicitEuler::new(0.1);
        assert_eq!(integrator.integrate(&mut bodies, &field), 2);
        assert_eq!(integrator.integrate(&mut [], &field), 0);
    }

    #[test]
    #[should_panic(expected = "Timestep must be positive and finite")]
    fn test_zero_timestep_panics() {
        SemiImplicitEuler::new(0.0);
    }

    #[test]
    fn test_timestep_validation() {
        assert!(SemiImplicitEuler::new(0.7).validate_timestep().is_ok());
        let small = SemiImplicitEuler::new(1e-10).validate_timestep();
        assert!(small.unwrap_err().contains("rounding"));
        let large = SemiImplicitEuler::new(2.0).validate_timestep();
        assert!(large.unwrap_err().contains("tunnel"));

        let edge = SemiImplicitEuler::new(crate::integration::MAX_ADVISED_TIMESTEP);
        assert!(edge.validate_timestep().is_ok());
    }

    #[test]
    fn test_set_timestep() {
        let mut integrator = SemiImplicitEuler::new(0.7);
        integrator.set_timestep(0.1);
        assert_eq!(integrator.timestep(), 0.1);
        assert_eq!(integrator.name(), "Semi-implicit Euler");
    }
}
