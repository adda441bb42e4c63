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
//! Per-tick orchestration
//!
//! One call to [`Simulation::step`] runs, in this order and without
//! branching:
//!
//! 1. the integrator (gravity + semi-implicit Euler),
//! 2. the collision resolver,
//! 3. the field sampler.
//!
//! Sampling last means the probes reflect the post-step body positions.
//! The simulation does not own the bodies or probes: the driver keeps them
//! and lends them mutably for the duration of the step.

use crate::collision::CollisionResolver;
use crate::components::{Body, Probe};
use crate::config::{ConfigError, SimulationConfig};
use crate::field::FieldSampler;
use crate::gravity::ForceField;
use crate::integration::{Integrator, SemiImplicitEuler};
use crate::scene::Scene;
use log::{debug, trace, warn};

/// Summary of one completed step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Tick number of the step just completed, starting at 1
    pub tick: u64,
    /// Bodies advanced by the integrator
    pub bodies: usize,
    /// Contacts that received an impulse
    pub contacts: usize,
    /// Probes resampled
    pub probes: usize,
}

/// Fixed-timestep simulation driver
///
/// # Example
///
/// ```
/// use gravity_field::{Simulation, SimulationConfig};
/// use gravity_field::field::ProbeGrid;
/// use gravity_field::scene::{Preset, Scene, Viewport};
///
/// let mut scene = Scene::from_preset(Viewport::default(), ProbeGrid::default(), Preset::Pair).unwrap();
/// let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
///
/// let report = sim.step_scene(&mut scene);
/// assert_eq!(report.tick, 1);
/// assert_eq!(report.probes, 100);
/// ```
pub struct Simulation<I = SemiImplicitEuler> {
    config: SimulationConfig,
    field: ForceField,
    integrator: I,
    resolver: CollisionResolver,
    sampler: FieldSampler,
    ticks: u64,
}

impl Simulation<SemiImplicitEuler> {
    /// Create a simulation with the semi-implicit Euler integrator
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::with_integrator(config, SemiImplicitEuler::new(config.timestep))
    }
}

impl<I: Integrator> Simulation<I> {
    /// Create a simulation with a custom integrator
    ///
    /// The integrator's timestep is overwritten with the configured one.
    pub fn with_integrator(config: SimulationConfig, mut integrator: I) -> Result<Self, ConfigError> {
        config.validate()?;
        integrator.set_timestep(config.timestep);

        if let Err(advice) = integrator.validate_timestep() {
            warn!("{}", advice);
        }

        debug!(
            "Simulation configured: integrator={}, G={}, dt={}, softening={:e}, restitution={}",
            integrator.name(),
            config.gravitational_constant,
            config.timestep,
            config.softening,
            config.restitution
        );

        Ok(Simulation {
            config,
            field: ForceField::from_config(&config),
            integrator,
            resolver: CollisionResolver::new(config.restitution),
            sampler: FieldSampler::new(),
            ticks: 0,
        })
    }

    /// Advance bodies and probes by one tick
    pub fn step(&mut self, bodies: &mut [Body], probes: &mut [Probe]) -> StepReport {
        let advanced = self.integrator.integrate(bodies, &self.field);
        let contacts = self.resolver.resolve(bodies);
        let sampled = self.sampler.sample(probes, bodies, &self.field);

        self.ticks += 1;
        trace!(
            "Tick {}: {} bodies, {} contacts, {} probes",
            self.ticks,
            advanced,
            contacts,
            sampled
        );

        StepReport {
            tick: self.ticks,
            bodies: advanced,
            contacts,
            probes: sampled,
        }
    }

    /// Advance a scene by one tick
    pub fn step_scene(&mut self, scene: &mut Scene) -> StepReport {
        let (bodies, probes) = scene.split_mut();
        self.step(bodies, probes)
    }

    /// Advance a scene by `steps` ticks, returning the total number of
    /// contacts resolved
    pub fn run(&mut self, scene: &mut Scene, steps: u64) -> usize {
        (0..steps).map(|_| self.step_scene(scene).contacts).sum()
    }

    /// Get the configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Get the force law shared by the integrator and sampler
    pub fn field(&self) -> &ForceField {
        &self.field
    }

    /// Get the integrator
    pub fn integrator(&self) -> &I {
        &self.integrator
    }

    /// Number of completed ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time elapsed (ticks * dt)
    pub fn elapsed_time(&self) -> f64 {
        self.ticks as f64 * self.config.timestep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Mass, Vec2};

    #[test]
    fn test_rejects_invalid_config() {
        let result = Simulation::new(SimulationConfig::default().with_softening(-1.0));
        assert!(matches!(result, Err(ConfigError::InvalidSoftening(_))));
    }

    #[test]
    fn test_custom_integrator_takes_config_timestep() {
        let sim = Simulation::with_integrator(
            SimulationConfig::default().with_timestep(0.25),
            SemiImplicitEuler::new(0.9),
        )
        .unwrap();
        assert_eq!(sim.integrator().timestep(), 0.25);
    }

    #[test]
    fn test_tick_and_time_tracking() {
        let mut sim = Simulation::new(SimulationConfig::default().with_timestep(0.5)).unwrap();
        let mut bodies = vec![Body::new(Vec2::zero(), Vec2::new(1.0, 0.0), Mass::new(1.0), 1.0)];
        let mut probes = vec![Probe::new(Vec2::new(10.0, 0.0))];

        for expected in 1..=4 {
            let report = sim.step(&mut bodies, &mut probes);
            assert_eq!(report.tick, expected);
            assert_eq!(report.bodies, 1);
            assert_eq!(report.probes, 1);
        }
        assert_eq!(sim.ticks(), 4);
        assert_eq!(sim.elapsed_time(), 2.0);
    }

    #[test]
    fn test_field_matches_config() {
        let config = SimulationConfig::new(42.0, 0.1).with_softening(1e-3);
        let sim = Simulation::new(config).unwrap();
        assert_eq!(sim.field().g_constant(), 42.0);
        assert_eq!(sim.field().softening(), 1e-3);
        assert_eq!(sim.config(), &config);
    }

    #[test]
    fn test_probes_sampled_after_motion() {
        let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
        let mut bodies = vec![Body::new(Vec2::zero(), Vec2::new(10.0, 0.0), Mass::new(100.0), 1.0)];
        let mut probes = vec![Probe::new(Vec2::new(100.0, 0.0))];

        sim.step(&mut bodies, &mut probes);

        let expected = sim.field().field_at(probes[0].position(), 1.0, &bodies);
        assert_eq!(probes[0].net_force, expected);
        assert!(bodies[0].position.x > 0.0);
    }
}
