use super::BubbleSet;

/// When a bubble counts as having come to rest.
///
/// A bubble slower than `threshold` for `frames` consecutive updates settles,
/// which makes the next collision pass consume it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub struct SettleRule {
    /// Speed in pixels per millisecond below which a bubble is considered still.
    pub threshold: f64,
    pub frames: u32,
}

impl Default for SettleRule {
    fn default() -> Self {
        Self {
            threshold: 0.001,
            frames: 120,
        }
    }
}

/// Moves free bubbles along their velocities once per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct Integrator {
    settle: Option<SettleRule>,
}

impl Integrator {
    /// Create an integrator. With `None`, bubbles never settle on their own.
    pub fn new(settle: Option<SettleRule>) -> Self {
        Self { settle }
    }

    /// Advance every bubble that isn't grasped by `dt` milliseconds.
    pub fn step(&self, bubbles: &mut BubbleSet, dt: f64) {
        for (_, bubble) in bubbles.iter_mut().filter(|(_, b)| !b.grasped) {
            bubble.advance(dt);

            let rule = match self.settle {
                Some(rule) => rule,
                None => continue,
            };
            if bubble.velocity.mag() < rule.threshold {
                bubble.still_frames = bubble.still_frames.saturating_add(1);
            } else {
                bubble.still_frames = 0;
            }
            if bubble.moving && bubble.still_frames >= rule.frames {
                log::trace!("bubble at {:?} settled", bubble.center);
                bubble.moving = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{math::Vec2, physics::Bubble, shape::ShapeKind};

    fn set_of(velocities: &[Vec2]) -> BubbleSet {
        velocities
            .iter()
            .map(|&v| {
                Bubble::create(ShapeKind::Circular, Vec2::new(50.0, 50.0), 5.0, 100.0, 100.0)
                    .unwrap()
                    .with_velocity(v)
            })
            .collect()
    }

    #[test]
    fn grasped_bubbles_stay_put() {
        let mut set = set_of(&[Vec2::new(1.0, 0.0), Vec2::new(1.0, 0.0)]);
        let grasped = set.iter().nth(1).map(|(k, _)| k).unwrap();
        set.get_mut(grasped).unwrap().grasped = true;

        Integrator::new(None).step(&mut set, 10.0);
        itertools::assert_equal(set.iter().map(|(_, b)| b.center.x), [60.0, 50.0]);
    }

    #[test]
    fn slow_bubbles_settle_after_enough_frames() {
        let mut set = set_of(&[Vec2::zero(), Vec2::new(0.5, 0.0)]);
        let integrator = Integrator::new(Some(SettleRule {
            threshold: 0.01,
            frames: 3,
        }));
        for _ in 0..2 {
            integrator.step(&mut set, 1.0);
        }
        assert!(set.iter().all(|(_, b)| b.is_moving()));
        integrator.step(&mut set, 1.0);
        itertools::assert_equal(set.iter().map(|(_, b)| b.is_moving()), [false, true]);
    }

    #[test]
    fn speeding_up_resets_the_count() {
        let mut set = set_of(&[Vec2::zero()]);
        let key = set.iter().next().map(|(k, _)| k).unwrap();
        let integrator = Integrator::new(Some(SettleRule {
            threshold: 0.01,
            frames: 2,
        }));
        integrator.step(&mut set, 1.0);
        set.get_mut(key).unwrap().velocity = Vec2::new(0.1, 0.0);
        integrator.step(&mut set, 1.0);
        set.get_mut(key).unwrap().velocity = Vec2::zero();
        integrator.step(&mut set, 1.0);
        assert!(set.get(key).unwrap().is_moving());
        integrator.step(&mut set, 1.0);
        assert!(!set.get(key).unwrap().is_moving());
    }

    #[test]
    fn no_rule_never_settles() {
        let mut set = set_of(&[Vec2::zero()]);
        let integrator = Integrator::new(None);
        for _ in 0..1000 {
            integrator.step(&mut set, 16.0);
        }
        assert!(set.iter().all(|(_, b)| b.is_moving()));
    }
}
