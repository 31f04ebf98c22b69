use super::Bubble;

use thunderdome as td;

/// Key type to look up a bubble stored in a [`BubbleSet`].
///
/// Keys stay valid until their bubble is removed. After that they never
/// resolve again, even if the slot gets reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BubbleKey(pub(crate) td::Index);

impl BubbleKey {
    /// Get the underlying [`thunderdome::Index`][thunderdome::Index] of this key.
    #[inline]
    pub fn index(&self) -> td::Index {
        self.0
    }

    /// Arena slot of the bubble. Slots of removed bubbles get reused.
    #[inline]
    pub fn slot(&self) -> u32 {
        self.0.slot()
    }
}

/// The live bubbles of a simulation.
///
/// Iteration goes in slot order, skipping removed bubbles.
/// Until a removed bubble's slot is reused this is also creation order.
#[derive(Clone, Debug, Default)]
pub struct BubbleSet {
    bubbles: td::Arena<Bubble>,
}

impl BubbleSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bubbles: td::Arena::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn insert(&mut self, bubble: Bubble) -> BubbleKey {
        BubbleKey(self.bubbles.insert(bubble))
    }

    /// Access a bubble, if it still exists.
    #[inline]
    pub fn get(&self, key: BubbleKey) -> Option<&Bubble> {
        self.bubbles.get(key.0)
    }

    /// Mutably access a bubble, if it still exists.
    #[inline]
    pub fn get_mut(&mut self, key: BubbleKey) -> Option<&mut Bubble> {
        self.bubbles.get_mut(key.0)
    }

    /// Mutably access two different bubbles at once.
    ///
    /// # Panics
    /// Panics if both keys are the same.
    #[inline]
    pub fn get2_mut(
        &mut self,
        a: BubbleKey,
        b: BubbleKey,
    ) -> (Option<&mut Bubble>, Option<&mut Bubble>) {
        self.bubbles.get2_mut(a.0, b.0)
    }

    #[inline]
    pub fn contains(&self, key: BubbleKey) -> bool {
        self.bubbles.contains(key.0)
    }

    /// Remove a bubble, returning it if it still existed.
    #[inline]
    pub fn remove(&mut self, key: BubbleKey) -> Option<Bubble> {
        self.bubbles.remove(key.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BubbleKey, &Bubble)> {
        self.bubbles.iter().map(|(idx, b)| (BubbleKey(idx), b))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BubbleKey, &mut Bubble)> {
        self.bubbles.iter_mut().map(|(idx, b)| (BubbleKey(idx), b))
    }
}

impl FromIterator<Bubble> for BubbleSet {
    fn from_iter<I: IntoIterator<Item = Bubble>>(iter: I) -> Self {
        let mut set = BubbleSet::new();
        for bubble in iter {
            set.insert(bubble);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{math::Vec2, shape::ShapeKind};

    fn bubble(x: f64) -> Bubble {
        Bubble::create(ShapeKind::Square, Vec2::new(x, 0.0), 1.0, 100.0, 100.0).unwrap()
    }

    #[test]
    fn iterates_in_slot_order() {
        let set: BubbleSet = [3.0, 1.0, 2.0].iter().map(|&x| bubble(x)).collect();
        itertools::assert_equal(set.iter().map(|(_, b)| b.center.x), [3.0, 1.0, 2.0]);
        itertools::assert_equal(set.iter().map(|(k, _)| k.slot()), [0u32, 1, 2]);
    }

    #[test]
    fn removed_keys_stay_dead() {
        let mut set = BubbleSet::new();
        let a = set.insert(bubble(1.0));
        let b = set.insert(bubble(2.0));
        assert_eq!(set.remove(a).map(|b| b.center.x), Some(1.0));
        assert!(set.get(a).is_none());
        assert!(!set.contains(a));
        assert_eq!(set.len(), 1);

        // the freed slot gets reused but the old key doesn't see the new bubble
        let c = set.insert(bubble(3.0));
        assert_eq!(c.slot(), a.slot());
        assert!(set.get(a).is_none());
        assert_eq!(set.get(c).map(|b| b.center.x), Some(3.0));
        assert!(set.remove(a).is_none());

        let (bm, cm) = set.get2_mut(b, c);
        bm.unwrap().center.x = 20.0;
        cm.unwrap().center.x = 30.0;
        itertools::assert_equal(set.iter().map(|(_, b)| b.center.x), [30.0, 20.0]);
    }
}
