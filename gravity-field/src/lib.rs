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
//! # Gravity Field
//!
//! The simulation core of a 2D gravity sandbox: point masses attract each
//! other, bounce off each other elastically, and a fixed grid of probes
//! samples the resulting force field for visualization.
//!
//! ## Features
//!
//! - **Softened gravity**: one inverse-square force law, finite at zero separation
//! - **Semi-implicit Euler**: fixed timestep, forces computed before anything moves
//! - **Elastic collisions**: impulse response that conserves momentum exactly
//! - **Field sampling**: probe grid recording the field a unit mass would feel
//! - **Parallelization**: optional Rayon integration, bit-identical to the sequential path
//!
//! Windowing, GPU work and input are left to the caller; after each step the
//! scene can be handed to a renderer as a [`render::FrameSnapshot`].
//!
//! ## Example
//!
//! ```rust
//! use gravity_field::{Simulation, SimulationConfig};
//! use gravity_field::field::ProbeGrid;
//! use gravity_field::scene::{Preset, Scene, Viewport};
//!
//! let mut scene = Scene::from_preset(Viewport::new(1000.0, 800.0), ProbeGrid::new(10, 10), Preset::Triangle)
//!     .expect("valid scene");
//! let mut sim = Simulation::new(SimulationConfig::default()).expect("valid config");
//!
//! for _ in 0..60 {
//!     sim.step_scene(&mut scene);
//! }
//!
//! let snapshot = scene.snapshot();
//! assert_eq!(snapshot.bodies.len(), 3);
//! ```

#![warn(missing_docs)]

/// Vectors, masses, bodies and probes
pub mod components;

/// Physical constants and their validation
pub mod config;

/// The softened gravitational force law
pub mod gravity;

/// Numerical integration methods
pub mod integration;

/// Collision detection and impulse response
pub mod collision;

/// Probe grid layout and field sampling
pub mod field;

/// Scene setup and initial conditions
pub mod scene;

/// Per-tick orchestration
pub mod simulation;

/// Renderer hand-off
pub mod render;

/// Momentum and energy measurements
pub mod diagnostics;

pub use components::{Body, Mass, Probe, Vec2};
pub use config::{ConfigError, SimulationConfig};
pub use scene::{Scene, SceneError};
pub use simulation::{Simulation, StepReport};
