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
//! Read-only hand-off to a renderer
//!
//! The core does not draw. After each step the driver passes a
//! [`FrameSnapshot`] to whatever renders the frame; probes are typically
//! drawn as oriented bars whose transform is given by [`Glyph`].

use crate::components::{Body, Probe, Vec2};
use crate::scene::Viewport;

/// Gain applied to the field magnitude before taking the logarithm
pub const GLYPH_GAIN: f64 = 200.0;

/// Smallest glyph length scale
pub const MIN_GLYPH_SCALE: f64 = 0.5;

/// Largest glyph length scale
pub const MAX_GLYPH_SCALE: f64 = 7.0;

/// Orientation and length of a field glyph
///
/// The length scale is `clamp(ln(|F| * 200), 0.5, 7)`, so the glyph grows
/// logarithmically with field strength and a zero field still draws a short
/// bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Rotation in radians, counter-clockwise from +x
    pub angle: f64,
    /// Length scale along the glyph's own x axis
    pub length_scale: f64,
    /// Field magnitude the glyph was built from
    pub magnitude: f64,
}

impl Glyph {
    /// Build the glyph for a sampled force
    pub fn from_force(force: Vec2) -> Self {
        let magnitude = force.length();
        let length_scale = (magnitude * GLYPH_GAIN).ln().clamp(MIN_GLYPH_SCALE, MAX_GLYPH_SCALE);
        Glyph {
            angle: force.y.atan2(force.x),
            length_scale,
            magnitude,
        }
    }
}

/// Borrowed view of a scene after a step
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    /// Viewport the scene was laid out for
    pub viewport: Viewport,
    /// Bodies after the step
    pub bodies: &'a [Body],
    /// Probes after the step
    pub probes: &'a [Probe],
}

impl<'a> FrameSnapshot<'a> {
    /// Wrap borrowed collections
    pub fn new(viewport: Viewport, bodies: &'a [Body], probes: &'a [Probe]) -> Self {
        FrameSnapshot {
            viewport,
            bodies,
            probes,
        }
    }

    /// Position and glyph for every probe, in probe order
    pub fn glyphs(&self) -> impl Iterator<Item = (Vec2, Glyph)> + 'a {
        let probes = self.probes;
        probes
            .iter()
            .map(|probe| (probe.position(), Glyph::from_force(probe.net_force)))
    }

    /// The glyph with the largest field magnitude, if any probes exist
    pub fn strongest_glyph(&self) -> Option<(Vec2, Glyph)> {
        self.glyphs()
            .max_by(|(_, a), (_, b)| a.magnitude.total_cmp(&b.magnitude))
    }
}
