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
//! Fixed-timestep time integration
//!
//! An integrator advances every body by one timestep: it rebuilds each
//! body's `net_force` from the current configuration, then moves the bodies.
//!
//! # Integrators
//!
//! - **Semi-implicit Euler**: velocity first, then position from the updated
//!   velocity. Symplectic, first order, one force evaluation per step.
//!
//! # Timestep Guidelines
//!
//! The timestep is fixed for a run and is not derived from wall-clock time.
//! Frame-rate variance is absorbed by the driver (e.g. by sleeping to hit a
//! target frame duration).

use crate::components::Body;
use crate::gravity::ForceField;

mod euler;

pub use euler::SemiImplicitEuler;

/// Smallest timestep that passes [`Integrator::validate_timestep`] silently
pub const MIN_ADVISED_TIMESTEP: f64 = 1e-9;

/// Largest timestep that passes [`Integrator::validate_timestep`] silently
pub const MAX_ADVISED_TIMESTEP: f64 = 1.0;

/// Trait for numerical integration methods
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Get the timestep used by this integrator
    fn timestep(&self) -> f64;

    /// Set the timestep for this integrator
    ///
    /// # Panics
    ///
    /// Panics if timestep is non-positive, NaN, or infinite
    fn set_timestep(&mut self, dt: f64);

    /// Check the timestep against the range this simulation behaves well in
    ///
    /// Returns advice rather than failing: [`Simulation`](crate::Simulation)
    /// logs it and carries on. Below [`MIN_ADVISED_TIMESTEP`] a tick moves
    /// bodies by less than f64 can resolve at viewport coordinates. Above
    /// [`MAX_ADVISED_TIMESTEP`] two discs closing fast can cross each other
    /// between collision checks without ever being seen to overlap.
    fn validate_timestep(&self) -> Result<(), String> {
        let dt = self.timestep();

        if dt <= 0.0 || !dt.is_finite() {
            return Err(format!("Timestep {} is not positive and finite", dt));
        }
        if dt < MIN_ADVISED_TIMESTEP {
            return Err(format!(
                "Timestep {} is below {:e}: per-tick displacement is lost to rounding at viewport scale",
                dt, MIN_ADVISED_TIMESTEP
            ));
        }
        if dt > MAX_ADVISED_TIMESTEP {
            return Err(format!(
                "Timestep {} is above {}: fast bodies may tunnel through each other between contact checks",
                dt, MAX_ADVISED_TIMESTEP
            ));
        }

        Ok(())
    }

    /// Advance all bodies by one timestep
    ///
    /// Every body's `net_force` is zeroed and recomputed from the positions
    /// at the start of the step before any body moves. Returns the number of
    /// bodies updated.
    fn integrate(&mut self, bodies: &mut [Body], field: &ForceField) -> usize;
}
