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
//! Impulse-based collision response between bodies
//!
//! Bodies are discs of radius `radius`. After integration, every unordered
//! pair is checked once; an overlapping pair that is still closing receives
//! equal and opposite impulses along the contact normal:
//!
//! ```text
//! n  = (p_j - p_i) / |p_j - p_i|
//! vn = (v_j - v_i) · n
//! J  = -(1 + e) * vn / (1/m_i + 1/m_j)
//! v_i -= J n / m_i
//! v_j += J n / m_j
//! ```
//!
//! Total momentum is conserved by construction.
//!
//! # Known limitations
//!
//! - No positional correction: overlapping bodies are not pushed apart, so
//!   they may visibly interpenetrate for a frame when `dt` is large relative
//!   to their approach speed.
//! - Pairs are visited in ascending `(i, j)` order with a single pass. When
//!   three or more bodies touch at once the result depends on that order and
//!   is not iterated to a fixed point.
//! - Pairs whose centers coincide exactly have no contact normal and are
//!   skipped.

use crate::components::Body;
use log::{trace, warn};

/// Default restitution coefficient (near-perfectly elastic)
pub const DEFAULT_RESTITUTION: f64 = 0.99999;

/// Result of examining one pair of bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    /// The discs do not overlap
    Apart,
    /// The discs overlap but are already moving apart
    Separating,
    /// The centers coincide, so no normal exists
    Degenerate,
    /// An impulse of the given magnitude was applied along the normal
    Resolved {
        /// Impulse magnitude J
        impulse: f64,
    },
}

impl ContactOutcome {
    /// Whether velocities were changed
    pub fn is_resolved(&self) -> bool {
        matches!(self, ContactOutcome::Resolved { .. })
    }
}

/// Resolves overlapping, closing body pairs with elastic impulses
///
/// # Example
///
/// ```
/// use gravity_field::collision::CollisionResolver;
/// use gravity_field::components::{Body, Mass, Vec2};
///
/// let resolver = CollisionResolver::new(1.0);
/// let mut bodies = vec![
///     Body::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Mass::new(1.0), 1.0),
///     Body::new(Vec2::new(1.5, 0.0), Vec2::new(-1.0, 0.0), Mass::new(1.0), 1.0),
/// ];
/// assert_eq!(resolver.resolve(&mut bodies), 1);
/// assert_eq!(bodies[0].velocity, Vec2::new(-1.0, 0.0));
/// assert_eq!(bodies[1].velocity, Vec2::new(1.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolver {
    restitution: f64,
}

impl CollisionResolver {
    /// Create a resolver with the given restitution coefficient
    ///
    /// # Panics
    ///
    /// Panics if `restitution` is outside `[0, 1]`.
    pub fn new(restitution: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&restitution),
            "Restitution must lie in [0, 1]"
        );
        CollisionResolver { restitution }
    }

    /// Get the restitution coefficient
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    /// Resolve every overlapping, closing pair once
    ///
    /// Pairs are processed in ascending `(i, j)` order with `i < j`; each
    /// resolution sees the velocities left by the pairs before it. Returns
    /// the number of pairs that received an impulse.
    pub fn resolve(&self, bodies: &mut [Body]) -> usize {
        let mut resolved = 0;
        let n = bodies.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let (first, second) = pair_mut(bodies, i, j);
                match self.resolve_pair(first, second) {
                    ContactOutcome::Resolved { impulse } => {
                        trace!("Resolved contact {}-{} with impulse {:.6e}", i, j, impulse);
                        resolved += 1;
                    }
                    ContactOutcome::Degenerate => {
                        warn!("Bodies {} and {} share a center; contact skipped", i, j);
                    }
                    ContactOutcome::Apart | ContactOutcome::Separating => {}
                }
            }
        }

        resolved
    }

    /// Resolve a single pair, `first` playing the role of `i` and `second`
    /// of `j`
    pub fn resolve_pair(&self, first: &mut Body, second: &mut Body) -> ContactOutcome {
        let d = second.position - first.position;
        let dist2 = d.dot(d);
        let reach = first.radius() + second.radius();

        if dist2 > reach * reach {
            return ContactOutcome::Apart;
        }
        if dist2 == 0.0 {
            return ContactOutcome::Degenerate;
        }

        let dist = dist2.sqrt();
        let normal = d / dist;
        let relative_velocity = second.velocity - first.velocity;
        let vn = relative_velocity.dot(normal);

        if vn > 0.0 {
            return ContactOutcome::Separating;
        }

        let m_first = first.mass().value();
        let m_second = second.mass().value();
        let impulse_magnitude = -(1.0 + self.restitution) * vn / (1.0 / m_first + 1.0 / m_second);
        let impulse = normal * impulse_magnitude;

        first.velocity -= impulse / m_first;
        second.velocity += impulse / m_second;

        ContactOutcome::Resolved {
            impulse: impulse_magnitude,
        }
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        CollisionResolver::new(DEFAULT_RESTITUTION)
    }
}

/// Borrow two distinct bodies mutably, `i < j`
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i < j);
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Mass, Vec2};

    fn disc(x: f64, vx: f64, m: f64, r: f64) -> Body {
        Body::new(Vec2::new(x, 0.0), Vec2::new(vx, 0.0), Mass::new(m), r)
    }

    fn momentum(a: &Body, b: &Body) -> Vec2 {
        a.momentum() + b.momentum()
    }

    #[test]
    fn test_unequal_masses_head_on() {
        let resolver = CollisionResolver::new(1.0);
        let mut a = disc(0.0, 10.0, 100.0, 50.0);
        let mut b = disc(90.0, -5.0, 50.0, 50.0);
        let before = momentum(&a, &b);

        let outcome = resolver.resolve_pair(&mut a, &mut b);

        // J = 2 * 15 / (1/100 + 1/50) = 1000
        match outcome {
            ContactOutcome::Resolved { impulse } => assert!((impulse - 1000.0).abs() < 1e-9),
            other => panic!("expected resolved contact, got {:?}", other),
        }
        assert!(a.velocity.x.abs() < 1e-12);
        assert!((b.velocity.x - 15.0).abs() < 1e-12);
        let after = momentum(&a, &b);
        assert!((after - before).length() < 1e-9);
    }

    #[test]
    fn test_apart_pair_untouched() {
        let resolver = CollisionResolver::default();
        let mut a = disc(0.0, 10.0, 1.0, 1.0);
        let mut b = disc(2.5, -10.0, 1.0, 1.0);
        assert_eq!(resolver.resolve_pair(&mut a, &mut b), ContactOutcome::Apart);
        assert_eq!(a.velocity.x, 10.0);
        assert_eq!(b.velocity.x, -10.0);
    }

    #[test]
    fn test_exact_touch_counts_as_contact() {
        let resolver = CollisionResolver::new(1.0);
        let mut a = disc(0.0, 1.0, 1.0, 1.0);
        let mut b = disc(2.0, -1.0, 1.0, 1.0);
        assert!(resolver.resolve_pair(&mut a, &mut b).is_resolved());
    }

    #[test]
    fn test_separating_pair_untouched() {
        let resolver = CollisionResolver::default();
        let mut a = disc(0.0, -3.0, 1.0, 1.0);
        let mut b = disc(1.0, 3.0, 1.0, 1.0);
        assert_eq!(resolver.resolve_pair(&mut a, &mut b), ContactOutcome::Separating);
        assert_eq!(a.velocity.x, -3.0);
        assert_eq!(b.velocity.x, 3.0);
    }

    #[test]
    fn test_coincident_centers_skipped() {
        let resolver = CollisionResolver::default();
        let mut a = disc(5.0, 1.0, 1.0, 1.0);
        let mut b = disc(5.0, -1.0, 1.0, 1.0);
        assert_eq!(resolver.resolve_pair(&mut a, &mut b), ContactOutcome::Degenerate);
        assert!(a.velocity.is_valid());
        assert_eq!(a.velocity.x, 1.0);
        assert_eq!(b.velocity.x, -1.0);
    }

    #[test]
    fn test_inelastic_contact_stops_closing() {
        let resolver = CollisionResolver::new(0.0);
        let mut a = disc(0.0, 4.0, 2.0, 1.0);
        let mut b = disc(1.0, -4.0, 2.0, 1.0);
        resolver.resolve_pair(&mut a, &mut b);
        assert!((a.velocity.x - b.velocity.x).abs() < 1e-12);
    }

    #[test]
    fn test_oblique_contact_keeps_tangential_velocity() {
        let resolver = CollisionResolver::new(1.0);
        let mut a = Body::new(Vec2::zero(), Vec2::new(1.0, 2.0), Mass::new(1.0), 1.0);
        let mut b = Body::new(Vec2::new(1.0, 0.0), Vec2::new(-1.0, -3.0), Mass::new(1.0), 1.0);
        resolver.resolve_pair(&mut a, &mut b);
        // normal is +x; tangential (y) components untouched
        assert_eq!(a.velocity.y, 2.0);
        assert_eq!(b.velocity.y, -3.0);
        assert!((a.velocity.x + 1.0).abs() < 1e-12);
        assert!((b.velocity.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_counts_contacts() {
        let resolver = CollisionResolver::default();
        let mut bodies = vec![
            disc(0.0, 1.0, 1.0, 1.0),
            disc(1.0, -1.0, 1.0, 1.0),
            disc(100.0, 0.0, 1.0, 1.0),
        ];
        assert_eq!(resolver.resolve(&mut bodies), 1);
        // Now separating: a second pass does nothing.
        assert_eq!(resolver.resolve(&mut bodies), 0);
    }

    #[test]
    #[should_panic(expected = "Restitution must lie in [0, 1]")]
    fn test_invalid_restitution_panics() {
        CollisionResolver::new(1.1);
    }
}
