//! Detecting overlapping bubbles and bouncing them apart.
//!
//! Collisions are resolved one pair at a time. The velocities of a pair are
//! projected onto the line between their centers and the resulting 1-D problem
//! is solved in closed form from conservation of momentum and kinetic energy.

use super::{Bubble, BubbleKey, BubbleSet};
use crate::math::{self as m, Unit, Vec2};
use itertools::Itertools;

/// Two roots closer than this are considered the same speed.
const ROOT_EPSILON: f64 = 0.001;

/// Solve a head-on elastic collision between two masses moving along a line.
///
/// Returns the speeds of both masses after the collision, scaled by `1 - dampening`.
///
/// The outgoing speed of the first mass is a root of the quadratic obtained by
/// substituting momentum conservation into energy conservation. One root is
/// always the incoming speed, i.e. the masses passing through each other,
/// and the other one is the bounce.
///
/// Degenerate inputs don't fail:
/// - with `m1 * (m1 + m2) == 0` the quadratic becomes linear
///   and both speeds are set to its solution,
/// - with no real roots both speeds stay at zero,
/// - a resulting speed of exactly zero is replaced with one
///   so that bubbles never come to a complete stop from a collision.
pub fn elastic_speeds(m1: f64, m2: f64, v1: f64, v2: f64, dampening: f64) -> [f64; 2] {
    // total momentum and twice the total kinetic energy
    let total_mv = m1 * v1 + m2 * v2;
    let total_mv2 = m1 * v1 * v1 + m2 * v2 * v2;
    let mut v = [0.0; 2];

    let a = m1 * m2 + m1 * m1;
    let b = -2.0 * total_mv * m1;
    let c = total_mv * total_mv - total_mv2 * m2;
    let d = b * b - 4.0 * a * c;
    if a == 0.0 {
        v[0] = -c / b;
        v[1] = -c / b;
    } else if d >= 0.0 {
        let root_plus = (-b + d.sqrt()) / (2.0 * a);
        let root_minus = (-b - d.sqrt()) / (2.0 * a);
        v[0] = if (root_plus - v1).abs() <= ROOT_EPSILON {
            root_minus
        } else {
            root_plus
        };
        v[1] = (total_mv - m1 * v[0]) / m2;
    }

    for speed in &mut v {
        *speed *= 1.0 - dampening;
        if *speed == 0.0 {
            *speed = 1.0;
        }
    }
    v
}

/// Finds colliding bubbles and gives them new velocities.
#[derive(Clone, Copy, Debug, Default)]
pub struct CollisionResolver {
    dampening: f64,
}

/// A pair of overlapping bubbles and the axis from the first to the second.
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    pub bubbles: [BubbleKey; 2],
    pub normal: Unit<Vec2>,
    pub depth: f64,
}

impl CollisionResolver {
    /// Create a resolver that removes the fraction `dampening` of speed from every collision.
    pub fn new(dampening: f64) -> Self {
        Self { dampening }
    }

    #[inline]
    pub fn dampening(&self) -> f64 {
        self.dampening
    }

    /// Find all overlapping pairs among bubbles that are neither grasped nor settled.
    pub fn find_contacts(&self, bubbles: &BubbleSet) -> Vec<Contact> {
        let free: Vec<(BubbleKey, &Bubble)> = bubbles
            .iter()
            .filter(|(_, b)| !b.grasped && b.moving)
            .collect();
        free.iter()
            .tuple_combinations()
            .filter_map(|(&(k1, b1), &(k2, b2))| {
                let offset = b2.center - b1.center;
                let depth = b1.size() + b2.size() - offset.mag();
                if depth <= 0.0 {
                    return None;
                }
                // coincident centers give no direction to push along
                let normal = Unit::try_new_normalize(offset)?;
                Some(Contact {
                    bubbles: [k1, k2],
                    normal,
                    depth,
                })
            })
            .collect()
    }

    /// Run one collision pass.
    ///
    /// Settled bubbles are removed from the set instead of being collided.
    /// Every other overlapping pair that is moving closer together along its
    /// contact normal gets new velocities from [`elastic_speeds`].
    ///
    /// Unlike re-solving every overlapping pair, pairs that overlap but are
    /// already separating keep their velocities. Two bubbles still overlapping
    /// after a bounce therefore drift apart instead of bouncing back into each other.
    ///
    /// Returns the keys of the removed bubbles.
    pub fn resolve(&self, bubbles: &mut BubbleSet) -> Vec<BubbleKey> {
        let settled: Vec<BubbleKey> = bubbles
            .iter()
            .filter(|(_, b)| !b.moving && !b.grasped)
            .map(|(k, _)| k)
            .collect();

        for contact in self.find_contacts(bubbles) {
            self.apply(bubbles, &contact);
        }

        for &key in &settled {
            if let Some(bubble) = bubbles.remove(key) {
                log::trace!("consumed settled bubble at {:?}", bubble.center);
            }
        }
        settled
    }

    fn apply(&self, bubbles: &mut BubbleSet, contact: &Contact) {
        let [k1, k2] = contact.bubbles;
        let (b1, b2) = match bubbles.get2_mut(k1, k2) {
            (Some(b1), Some(b2)) => (b1, b2),
            _ => return,
        };

        let (v1, rest1) = m::split_along(b1.velocity, contact.normal);
        let (v2, rest2) = m::split_along(b2.velocity, contact.normal);
        // separating already, e.g. still overlapping from last frame's bounce
        if v1 - v2 <= 0.0 {
            return;
        }

        let [v1_new, v2_new] = elastic_speeds(b1.size(), b2.size(), v1, v2, self.dampening);
        b1.velocity = rest1 + *contact.normal * v1_new;
        b2.velocity = rest2 + *contact.normal * v2_new;
        log::trace!(
            "collision along {:?}: {} -> {}, {} -> {}",
            *contact.normal,
            v1,
            v1_new,
            v2,
            v2_new
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    const TOL: f64 = 1e-3;

    fn assert_close(actual: [f64; 2], expected: [f64; 2]) {
        assert!(
            (actual[0] - expected[0]).abs() < TOL && (actual[1] - expected[1]).abs() < TOL,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    fn bubble(x: f64, y: f64, size: f64, vel: Vec2) -> Bubble {
        Bubble::create(ShapeKind::Circular, Vec2::new(x, y), size, 400.0, 400.0)
            .unwrap()
            .with_velocity(vel)
    }

    #[test]
    fn equal_masses_exchange_speeds() {
        assert_close(elastic_speeds(1.0, 1.0, 2.0, -2.0, 0.0), [-2.0, 2.0]);
        assert_close(elastic_speeds(3.0, 3.0, 1.5, 0.5, 0.0), [0.5, 1.5]);
    }

    #[test]
    fn unequal_masses_conserve_momentum_and_energy() {
        let (m1, m2, v1, v2) = (2.0, 5.0, 3.0, -1.0);
        let [u1, u2] = elastic_speeds(m1, m2, v1, v2, 0.0);
        // textbook 1-D elastic collision
        let e1 = ((m1 - m2) * v1 + 2.0 * m2 * v2) / (m1 + m2);
        let e2 = ((m2 - m1) * v2 + 2.0 * m1 * v1) / (m1 + m2);
        assert_close([u1, u2], [e1, e2]);
        assert!((m1 * u1 + m2 * u2 - (m1 * v1 + m2 * v2)).abs() < TOL);
        assert!((m1 * u1 * u1 + m2 * u2 * u2 - (m1 * v1 * v1 + m2 * v2 * v2)).abs() < TOL);
    }

    #[test]
    fn dampening_scales_results() {
        let cases = [
            (1.0, 1.0, 2.0, -2.0),
            (2.0, 5.0, 3.0, -1.0),
            (10.0, 30.0, 0.4, 0.1),
        ];
        for &(m1, m2, v1, v2) in &cases {
            let free = elastic_speeds(m1, m2, v1, v2, 0.0);
            for &damp in &[0.1, 0.5, 0.9] {
                let damped = elastic_speeds(m1, m2, v1, v2, damp);
                assert_close(damped, [free[0] * (1.0 - damp), free[1] * (1.0 - damp)]);
            }
        }
    }

    #[test]
    fn zero_results_become_one() {
        // equal masses, one at rest: the moving one stops dead
        let [u1, u2] = elastic_speeds(1.0, 1.0, 2.0, 0.0, 0.0);
        assert_eq!(u1, 1.0);
        assert!((u2 - 2.0).abs() < TOL);
        // full dampening zeroes everything
        assert_eq!(elastic_speeds(1.0, 1.0, 2.0, -2.0, 1.0), [1.0, 1.0]);
    }

    #[test]
    fn equal_speeds_pass_through() {
        // the discriminant is exactly zero and both roots are the incoming speed
        let [u1, u2] = elastic_speeds(2.0, 3.0, 1.0, 1.0, 0.0);
        assert_close([u1, u2], [1.0, 1.0]);
    }

    #[test]
    fn unsolvable_input_gives_fallback_speeds() {
        // the discriminant works out to (2 * m1 * m2 * (v1 - v2))^2, so it only goes
        // negative through rounding or turns NaN; either way no root is taken
        assert_eq!(elastic_speeds(1.0, 1.0, f64::NAN, 0.0, 0.0), [1.0, 1.0]);
        assert_eq!(elastic_speeds(1.0, 1.0, f64::NAN, 0.0, 0.5), [1.0, 1.0]);
    }

    #[test]
    fn linear_case_uses_single_root() {
        // m1 = 0 makes the quadratic term vanish; -c / b is then 0 / 0
        let [u1, u2] = elastic_speeds(0.0, 1.0, 1.0, 1.0, 0.0);
        assert!(u1.is_nan() && u2.is_nan());
        // m1 = -m2 also does, with a finite solution
        let [u1, u2] = elastic_speeds(-1.0, 1.0, 1.0, 2.0, 0.0);
        let expected = {
            let p: f64 = -1.0 + 2.0;
            let e = -1.0 + 4.0;
            -(p * p - e) / (2.0 * p)
        };
        assert_close([u1, u2], [expected, expected]);
    }

    #[test]
    fn finds_only_overlapping_free_pairs() {
        let mut set = BubbleSet::new();
        let a = set.insert(bubble(100.0, 100.0, 20.0, Vec2::zero()));
        let b = set.insert(bubble(130.0, 100.0, 20.0, Vec2::zero()));
        let _far = set.insert(bubble(300.0, 300.0, 20.0, Vec2::zero()));
        let grasped = set.insert(bubble(100.0, 110.0, 20.0, Vec2::zero()));
        set.get_mut(grasped).unwrap().grasped = true;

        let contacts = CollisionResolver::new(0.0).find_contacts(&set);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].bubbles, [a, b]);
        assert!((contacts[0].depth - 10.0).abs() < 1e-9);
        assert!((contacts[0].normal.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn head_on_pair_bounces() {
        let mut set = BubbleSet::new();
        let a = set.insert(bubble(100.0, 100.0, 20.0, Vec2::new(2.0, 0.5)));
        let b = set.insert(bubble(130.0, 100.0, 20.0, Vec2::new(-2.0, 0.0)));

        let removed = CollisionResolver::new(0.0).resolve(&mut set);
        assert!(removed.is_empty());
        let va = set.get(a).unwrap().velocity;
        let vb = set.get(b).unwrap().velocity;
        assert!((va.x + 2.0).abs() < TOL);
        // the perpendicular part is untouched
        assert_eq!(va.y, 0.5);
        assert!((vb.x - 2.0).abs() < TOL);
        assert_eq!(vb.y, 0.0);

        // now separating, so another pass leaves them alone
        CollisionResolver::new(0.0).resolve(&mut set);
        assert_eq!(set.get(a).unwrap().velocity, va);
        assert_eq!(set.get(b).unwrap().velocity, vb);
    }

    #[test]
    fn settled_bubbles_are_consumed_after_the_scan() {
        let mut set = BubbleSet::new();
        let a = set.insert(bubble(100.0, 100.0, 20.0, Vec2::new(1.0, 0.0)));
        let settled = set.insert(bubble(130.0, 100.0, 20.0, Vec2::new(-1.0, 0.0)));
        let c = set.insert(bubble(300.0, 300.0, 20.0, Vec2::zero()));
        set.get_mut(settled).unwrap().settle();

        let removed = CollisionResolver::new(0.0).resolve(&mut set);
        itertools::assert_equal(removed, [settled]);
        assert!(set.get(settled).is_none());
        assert_eq!(set.len(), 2);
        // the settled bubble didn't take part in collisions
        assert_eq!(set.get(a).unwrap().velocity, Vec2::new(1.0, 0.0));
        assert!(set.contains(c));
    }

    #[test]
    fn grasped_bubbles_are_never_consumed() {
        let mut set = BubbleSet::new();
        let key = set.insert(bubble(100.0, 100.0, 20.0, Vec2::zero()));
        {
            let b = set.get_mut(key).unwrap();
            b.settle();
            b.grasped = true;
        }
        assert!(CollisionResolver::new(0.0).resolve(&mut set).is_empty());
        assert!(set.contains(key));
    }
}
