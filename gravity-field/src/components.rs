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
//! Simulation entities
//!
//! This module provides the plain data types the simulation core operates on:
//! a double-precision 2D vector, a strictly positive mass, gravitating
//! [`Body`] values and massless field [`Probe`] values. None of these types
//! carry behavior beyond construction and validation; the physics lives in
//! the integrator, collision resolver and field sampler.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// 2D vector with double-precision components
///
/// Used for positions, velocities and forces alike. World space is centered
/// on the origin with +y pointing up.
///
/// # Examples
///
/// ```
/// use gravity_field::components::Vec2;
///
/// let v = Vec2::new(3.0, 4.0);
/// assert_eq!(v.length(), 5.0);
/// assert!(v.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vec2 {
    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    /// The zero vector
    pub const fn zero() -> Self {
        Vec2::new(0.0, 0.0)
    }

    /// Dot product
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Squared length
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Get the vector as an array
    pub fn as_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Create a vector from an array
    pub fn from_array(arr: [f64; 2]) -> Self {
        Vec2::new(arr[0], arr[1])
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from(arr: [f64; 2]) -> Self {
        Vec2::from_array(arr)
    }
}

/// Mass of a body
///
/// Mass is strictly positive and finite for the lifetime of the simulation.
/// Both the integrator (a = F/m) and the collision resolver (impulse / m)
/// divide by it, so a zero or negative mass is a programming error and is
/// rejected at construction rather than handled per step.
///
/// # Examples
///
/// ```
/// use gravity_field::components::Mass;
///
/// let mass = Mass::new(100.0);
/// assert_eq!(mass.inverse(), 0.01);
/// assert!(Mass::try_new(0.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Mass {
    value: f64,
}

impl Mass {
    /// Create a new mass
    ///
    /// # Panics
    ///
    /// Panics if the mass is not positive and finite. For fallible
    /// construction, use `try_new`.
    pub fn new(value: f64) -> Self {
        assert!(value > 0.0 && value.is_finite(), "Mass must be positive and finite");
        Mass { value }
    }

    /// Try to create a new mass
    ///
    /// Returns `None` if the value is zero, negative, NaN or infinite.
    pub fn try_new(value: f64) -> Option<Self> {
        if value > 0.0 && value.is_finite() {
            Some(Mass { value })
        } else {
            None
        }
    }

    /// Get the mass value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Get the inverse mass (1/m)
    pub fn inverse(&self) -> f64 {
        1.0 / self.value
    }
}

impl TryFrom<f64> for Mass {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Mass::try_new(value).ok_or_else(|| format!("Invalid mass {}: must be positive and finite", value))
    }
}

impl From<Mass> for f64 {
    fn from(mass: Mass) -> f64 {
        mass.value
    }
}

/// A gravitating point mass
///
/// `position`, `velocity` and `net_force` are rewritten every step.
/// `net_force` is transient: it holds the gravitational force accumulated in
/// the most recent step and is recomputed from scratch on the next one.
/// Mass and radius are fixed at construction.
///
/// With the `serde` feature a body (de)serializes through
/// [`BodySpec`](crate::scene::BodySpec), so loaded bodies pass the same
/// mass, radius and finiteness checks as [`Scene`](crate::Scene) setup.
/// `net_force` is not serialized.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "crate::scene::BodySpec", into = "crate::scene::BodySpec")
)]
pub struct Body {
    /// World-space position
    pub position: Vec2,
    /// Velocity in world units per time unit
    pub velocity: Vec2,
    /// Gravitational force accumulated during the last step
    pub net_force: Vec2,
    /// RGB color for the renderer. Never read by the physics.
    pub color: [f32; 3],
    mass: Mass,
    radius: f64,
}

impl Body {
    /// Color used when none is given
    pub const DEFAULT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

    /// Create a new body with zero accumulated force
    ///
    /// # Panics
    ///
    /// Panics if `radius` is negative or not finite.
    pub fn new(position: Vec2, velocity: Vec2, mass: Mass, radius: f64) -> Self {
        assert!(radius >= 0.0 && radius.is_finite(), "Radius must be non-negative and finite");
        Body {
            position,
            velocity,
            net_force: Vec2::zero(),
            color: Self::DEFAULT_COLOR,
            mass,
            radius,
        }
    }

    /// Set the render color
    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Get the mass
    pub fn mass(&self) -> Mass {
        self.mass
    }

    /// Get the collision radius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Linear momentum (m * v)
    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass.value()
    }

    /// Check that position, velocity and force are all finite
    pub fn is_valid(&self) -> bool {
        self.position.is_valid() && self.velocity.is_valid() && self.net_force.is_valid()
    }
}

/// A massless sample point of the force field
///
/// Probes never move and never act on bodies. `net_force` is overwritten
/// every step with the field strength at `position`, computed with a unit
/// test mass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Probe {
    position: Vec2,
    /// Field strength sampled during the last step
    #[cfg_attr(feature = "serde", serde(default))]
    pub net_force: Vec2,
}

impl Probe {
    /// Create a probe at the given position
    pub fn new(position: Vec2) -> Self {
        Probe {
            position,
            net_force: Vec2::zero(),
        }
    }

    /// Get the (fixed) position
    pub fn position(&self) -> Vec2 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(b / 2.0, Vec2::new(1.5, -0.5));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
        assert_eq!(a.dot(b), 1.0);
    }

    #[test]
    fn test_vec2_assign_ops() {
        let mut v = Vec2::new(1.0, 1.0);
        v += Vec2::new(2.0, 3.0);
        assert_eq!(v, Vec2::new(3.0, 4.0));
        v -= Vec2::new(3.0, 0.0);
        assert_eq!(v, Vec2::new(0.0, 4.0));
        assert_eq!(v.length(), 4.0);
    }

    #[test]
    fn test_vec2_validity() {
        assert!(Vec2::zero().is_valid());
        assert!(!Vec2::new(f64::NAN, 0.0).is_valid());
        assert!(!Vec2::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_vec2_array_conversion() {
        let v: Vec2 = [1.5, -2.5].into();
        assert_eq!(v.as_array(), [1.5, -2.5]);
    }

    #[test]
    fn test_mass_creation() {
        let mass = Mass::new(100.0);
        assert_eq!(mass.value(), 100.0);
        assert_eq!(mass.inverse(), 0.01);
    }

    #[test]
    #[should_panic(expected = "Mass must be positive and finite")]
    fn test_zero_mass_panics() {
        Mass::new(0.0);
    }

    #[test]
    #[should_panic(expected = "Mass must be positive and finite")]
    fn test_negative_mass_panics() {
        Mass::new(-1.0);
    }

    #[test]
    fn test_mass_try_new() {
        assert!(Mass::try_new(1.0).is_some());
        assert!(Mass::try_new(0.0).is_none());
        assert!(Mass::try_new(-5.0).is_none());
        assert!(Mass::try_new(f64::NAN).is_none());
        assert!(Mass::try_new(f64::INFINITY).is_none());
    }

    #[test]
    fn test_mass_try_from() {
        assert!(Mass::try_from(2.0).is_ok());
        let err = Mass::try_from(0.0).unwrap_err();
        assert!(err.contains("positive"));
    }

    #[test]
    fn test_body_creation() {
        let body = Body::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), Mass::new(2.0), 5.0);
        assert_eq!(body.net_force, Vec2::zero());
        assert_eq!(body.radius(), 5.0);
        assert_eq!(body.mass().value(), 2.0);
        assert_eq!(body.momentum(), Vec2::new(6.0, 8.0));
        assert_eq!(body.color, Body::DEFAULT_COLOR);
        assert!(body.is_valid());
    }

    #[test]
    #[should_panic(expected = "Radius must be non-negative and finite")]
    fn test_negative_radius_panics() {
        Body::new(Vec2::zero(), Vec2::zero(), Mass::new(1.0), -1.0);
    }

    #[test]
    fn test_probe_creation() {
        let probe = Probe::new(Vec2::new(-450.0, -360.0));
        assert_eq!(probe.position(), Vec2::new(-450.0, -360.0));
        assert_eq!(probe.net_force, Vec2::zero());
    }
}
