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
//! Force-field sampling on a fixed probe grid
//!
//! Probes are a one-way read of the body configuration: they record the
//! force a unit test mass would feel at their position and nothing else.

use crate::components::{Body, Probe, Vec2};
use crate::gravity::ForceField;
use crate::scene::Viewport;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Mass assumed for a probe when evaluating the force law
pub const PROBE_TEST_MASS: f64 = 1.0;

/// Regular grid of probes covering a viewport
///
/// The viewport is split into `cols x rows` equal cells and one probe sits at
/// the center of each cell. Probes are laid out row-major starting from the
/// bottom-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbeGrid {
    /// Number of columns
    pub cols: usize,
    /// Number of rows
    pub rows: usize,
}

impl ProbeGrid {
    /// Create a grid description
    pub fn new(cols: usize, rows: usize) -> Self {
        ProbeGrid { cols, rows }
    }

    /// Total number of probes
    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    /// Whether the grid has no probes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lay out the probes over a viewport centered on the origin
    ///
    /// # Example
    ///
    /// ```
    /// use gravity_field::components::Vec2;
    /// use gravity_field::field::ProbeGrid;
    /// use gravity_field::scene::Viewport;
    ///
    /// let probes = ProbeGrid::new(10, 10).layout(&Viewport::new(1000.0, 800.0));
    /// assert_eq!(probes.len(), 100);
    /// assert_eq!(probes[0].position(), Vec2::new(-450.0, -360.0));
    /// ```
    pub fn layout(&self, viewport: &Viewport) -> Vec<Probe> {
        let dx = viewport.width / self.cols as f64;
        let dy = viewport.height / self.rows as f64;
        let start_x = -viewport.width * 0.5 + dx * 0.5;
        let start_y = -viewport.height * 0.5 + dy * 0.5;

        let mut probes = Vec::with_capacity(self.len());
        for row in 0..self.rows {
            for col in 0..self.cols {
                let position = Vec2::new(start_x + col as f64 * dx, start_y + row as f64 * dy);
                probes.push(Probe::new(position));
            }
        }
        probes
    }
}

impl Default for ProbeGrid {
    fn default() -> Self {
        ProbeGrid::new(10, 10)
    }
}

/// Recomputes the field strength stored in every probe
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldSampler;

impl FieldSampler {
    /// Create a sampler
    pub fn new() -> Self {
        FieldSampler
    }

    /// Overwrite each probe's `net_force` with the field at its position
    ///
    /// Bodies are read only. Probes keep their positions. Returns the
    /// number of probes sampled.
    pub fn sample(&self, probes: &mut [Probe], bodies: &[Body], field: &ForceField) -> usize {
        #[cfg(feature = "parallel")]
        {
            probes.par_iter_mut().for_each(|probe| {
                probe.net_force = field.field_at(probe.position(), PROBE_TEST_MASS, bodies);
            });
        }

        #[cfg(not(feature = "parallel"))]
        {
            for probe in probes.iter_mut() {
                probe.net_force = field.field_at(probe.position(), PROBE_TEST_MASS, bodies);
            }
        }

        probes.len()
    }
}
