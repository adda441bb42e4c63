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
//! Scene setup: viewport, initial conditions and the body/probe collections
//!
//! A [`Scene`] is built once at startup and never changes size afterwards.
//! Every body is validated here, so a bad mass or radius is reported before
//! the first step runs instead of surfacing as NaN mid-simulation.

use crate::components::{Body, Mass, Probe, Vec2};
use crate::field::ProbeGrid;
use crate::render::FrameSnapshot;
use log::debug;
use std::fmt;

/// Size of the visible region, centered on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Width in world units
    pub width: f64,
    /// Height in world units
    pub height: f64,
}

impl Viewport {
    /// Create a viewport
    pub fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }

    /// Whether both dimensions are positive and finite
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.width.is_finite() && self.height > 0.0 && self.height.is_finite()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(1000.0, 800.0)
    }
}

/// Unvalidated initial state of one body
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodySpec {
    /// Initial position
    pub position: Vec2,
    /// Initial velocity
    pub velocity: Vec2,
    /// Mass, must be positive
    pub mass: f64,
    /// Collision radius, must be non-negative
    pub radius: f64,
    /// Render color
    #[cfg_attr(feature = "serde", serde(default = "default_color"))]
    pub color: [f32; 3],
}

#[cfg(feature = "serde")]
fn default_color() -> [f32; 3] {
    Body::DEFAULT_COLOR
}

impl BodySpec {
    /// Create a white body spec
    pub fn new(position: Vec2, velocity: Vec2, mass: f64, radius: f64) -> Self {
        BodySpec {
            position,
            velocity,
            mass,
            radius,
            color: Body::DEFAULT_COLOR,
        }
    }

    /// Set the render color
    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Validate and convert into a [`Body`]; `index` is used for error reporting
    pub fn build(&self, index: usize) -> Result<Body, SceneError> {
        let mass = Mass::try_new(self.mass).ok_or(SceneError::InvalidMass {
            index,
            mass: self.mass,
        })?;
        if !(self.radius >= 0.0 && self.radius.is_finite()) {
            return Err(SceneError::InvalidRadius {
                index,
                radius: self.radius,
            });
        }
        if !self.position.is_valid() || !self.velocity.is_valid() {
            return Err(SceneError::NonFiniteState { index });
        }
        Ok(Body::new(self.position, self.velocity, mass, self.radius).with_color(self.color))
    }
}

impl TryFrom<BodySpec> for Body {
    type Error = SceneError;

    fn try_from(spec: BodySpec) -> Result<Self, Self::Error> {
        spec.build(0)
    }
}

impl From<Body> for BodySpec {
    fn from(body: Body) -> Self {
        BodySpec::new(body.position, body.velocity, body.mass().value(), body.radius()).with_color(body.color)
    }
}

/// Mass used by the built-in presets
pub const PRESET_MASS: f64 = 100.0;

/// Radius used by the built-in presets
pub const PRESET_RADIUS: f64 = 50.0;

/// Built-in initial conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Preset {
    /// Two bodies at ±width/4 on the x axis, drifting past each other
    Pair,
    /// Three bodies on an equilateral triangle with near-orbital velocities
    Triangle,
}

impl Preset {
    /// Body specs for this preset
    pub fn bodies(&self, viewport: &Viewport) -> Vec<BodySpec> {
        match self {
            Preset::Pair => alternating_row(viewport, 2),
            Preset::Triangle => triangle_orbit(),
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pair" => Ok(Preset::Pair),
            "triangle" => Ok(Preset::Triangle),
            other => Err(format!("Unknown preset '{}': expected 'pair' or 'triangle'", other)),
        }
    }
}

/// `count` bodies spaced width/2 apart along the x axis starting at -width/4
///
/// Even-indexed bodies move with velocity (5, 3), odd ones with (-5, -3), so
/// neighbours approach each other and the total momentum is zero for an
/// even count.
pub fn alternating_row(viewport: &Viewport, count: usize) -> Vec<BodySpec> {
    (0..count)
        .map(|i| {
            let x = -viewport.width * 0.25 + i as f64 * viewport.width * 0.5;
            let velocity = if i % 2 == 0 {
                Vec2::new(5.0, 3.0)
            } else {
                Vec2::new(-5.0, -3.0)
            };
            BodySpec::new(Vec2::new(x, 0.0), velocity, PRESET_MASS, PRESET_RADIUS)
        })
        .collect()
}

/// Three equal bodies on a triangle of side 800 centered on the origin
///
/// Velocities have magnitude 10 and sum to zero, so the system starts with
/// zero total momentum.
pub fn triangle_orbit() -> Vec<BodySpec> {
    let sqrt3 = 3.0_f64.sqrt();
    vec![
        BodySpec::new(
            Vec2::new(-400.0, -400.0 * sqrt3 / 3.0),
            Vec2::new(10.0, 0.0),
            PRESET_MASS,
            PRESET_RADIUS,
        )
        .with_color([1.0, 0.0, 0.0]),
        BodySpec::new(
            Vec2::new(400.0, -400.0 * sqrt3 / 3.0),
            Vec2::new(-5.0, 5.0 * sqrt3),
            PRESET_MASS,
            PRESET_RADIUS,
        )
        .with_color([0.0, 1.0, 0.0]),
        BodySpec::new(
            Vec2::new(0.0, 400.0 * sqrt3 * 2.0 / 3.0),
            Vec2::new(-5.0, -5.0 * sqrt3),
            PRESET_MASS,
            PRESET_RADIUS,
        )
        .with_color([0.0, 0.0, 1.0]),
    ]
}

/// Bodies and probes owned by the driver loop
///
/// Both collections are sized once here and only ever lent out as slices,
/// so their length is fixed for the lifetime of the scene. The driver lends
/// them mutably to [`Simulation::step`](crate::Simulation::step) and hands
/// the renderer a read-only [`FrameSnapshot`] afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    viewport: Viewport,
    bodies: Vec<Body>,
    probes: Vec<Probe>,
}

impl Scene {
    /// Build a scene from explicit body specs and a probe grid
    pub fn new(viewport: Viewport, grid: ProbeGrid, specs: &[BodySpec]) -> Result<Self, SceneError> {
        if !viewport.is_valid() {
            return Err(SceneError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if grid.is_empty() {
            return Err(SceneError::EmptyProbeGrid);
        }

        let bodies = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| spec.build(index))
            .collect::<Result<Vec<_>, _>>()?;
        let probes = grid.layout(&viewport);

        debug!(
            "Scene built: {} bodies, {} probes, viewport {}x{}",
            bodies.len(),
            probes.len(),
            viewport.width,
            viewport.height
        );

        Ok(Scene {
            viewport,
            bodies,
            probes,
        })
    }

    /// Build a scene from a built-in preset
    pub fn from_preset(viewport: Viewport, grid: ProbeGrid, preset: Preset) -> Result<Self, SceneError> {
        Self::new(viewport, grid, &preset.bodies(&viewport))
    }

    /// Get the viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Simulated bodies
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Simulated bodies, mutably
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Field probes
    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    /// Field probes, mutably
    pub fn probes_mut(&mut self) -> &mut [Probe] {
        &mut self.probes
    }

    /// Bodies and probes borrowed mutably at the same time
    pub fn split_mut(&mut self) -> (&mut [Body], &mut [Probe]) {
        (&mut self.bodies, &mut self.probes)
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot::new(self.viewport, &self.bodies, &self.probes)
    }
}

/// Rejected scene setup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneError {
    /// Viewport has a non-positive or non-finite dimension
    InvalidViewport {
        /// Requested width
        width: f64,
        /// Requested height
        height: f64,
    },
    /// Probe grid has zero rows or columns
    EmptyProbeGrid,
    /// Body mass is zero, negative or not finite
    InvalidMass {
        /// Index of the offending body
        index: usize,
        /// Requested mass
        mass: f64,
    },
    /// Body radius is negative or not finite
    InvalidRadius {
        /// Index of the offending body
        index: usize,
        /// Requested radius
        radius: f64,
    },
    /// Body position or velocity is not finite
    NonFiniteState {
        /// Index of the offending body
        index: usize,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::InvalidViewport { width, height } => {
                write!(f, "Invalid viewport {}x{}: dimensions must be positive and finite", width, height)
            }
            SceneError::EmptyProbeGrid => write!(f, "Probe grid must have at least one row and column"),
            SceneError::InvalidMass { index, mass } => {
                write!(f, "Body {} has invalid mass {}: must be positive and finite", index, mass)
            }
            SceneError::InvalidRadius { index, radius } => {
                write!(f, "Body {} has invalid radius {}: must be non-negative and finite", index, radius)
            }
            SceneError::NonFiniteState { index } => {
                write!(f, "Body {} has a non-finite position or velocity", index)
            }
        }
    }
}

impl std::error::Error for SceneError {}
