//! Grabbing bubbles with a pointer and throwing them.

use crate::{
    input::{InputEvent, InputKind},
    math::Vec2,
    physics::{BubbleKey, BubbleSet},
};

/// Result of feeding a pointer move to a [`DragController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing is grasped, the move was ignored.
    NotGrasped,
    /// The grasped bubble followed the pointer.
    Moved,
    /// The pointer left the bounds so the bubble stayed where it was.
    RolledBack,
}

/// Tracks the bubble under the pointer during a drag gesture.
///
/// The bubble's velocity is estimated from consecutive pointer samples,
/// so whatever speed it had at the last move is kept when it's released.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragController {
    grasped: Option<BubbleKey>,
    last_touch: Vec2,
    last_time_ms: u64,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bubble currently being dragged, if any.
    #[inline]
    pub fn grasped(&self) -> Option<BubbleKey> {
        self.grasped
    }

    /// Feed any pointer event to the matching handler.
    pub fn handle(&mut self, bubbles: &mut BubbleSet, event: &InputEvent) {
        match event.kind {
            InputKind::Press => {
                self.press(bubbles, event.position, event.timestamp_ms);
            }
            InputKind::Move => {
                self.drag(bubbles, event.position, event.timestamp_ms);
            }
            InputKind::Release => {
                self.release(bubbles);
            }
        }
    }

    /// Start a drag at `point`, grasping the first bubble in set order that contains it.
    pub fn press(
        &mut self,
        bubbles: &mut BubbleSet,
        point: Vec2,
        timestamp_ms: u64,
    ) -> Option<BubbleKey> {
        if self.grasped.is_some() {
            self.release(bubbles);
        }
        self.last_touch = point;
        self.last_time_ms = timestamp_ms;

        let key = bubbles
            .iter()
            .find(|(_, b)| b.contains_point(point))
            .map(|(k, _)| k)?;
        let bubble = bubbles.get_mut(key)?;
        bubble.grasped = true;
        // picking a bubble up brings it back to life if it had settled
        bubble.moving = true;
        bubble.still_frames = 0;
        self.grasped = Some(key);
        log::debug!("grasped bubble {} at {:?}", key.slot(), point);
        Some(key)
    }

    /// Move the grasped bubble to `point` and update its velocity estimate.
    ///
    /// Samples that arrive in the same millisecond as the previous one
    /// leave the velocity alone but still become the reference for the next estimate.
    /// If the new position is out of bounds the bubble is put back,
    /// but the velocity estimate is kept.
    pub fn drag(
        &mut self,
        bubbles: &mut BubbleSet,
        point: Vec2,
        timestamp_ms: u64,
    ) -> DragOutcome {
        let key = match self.grasped {
            Some(key) => key,
            None => return DragOutcome::NotGrasped,
        };
        let bubble = match bubbles.get_mut(key) {
            Some(bubble) => bubble,
            None => {
                // consumed while we were holding it
                self.grasped = None;
                return DragOutcome::NotGrasped;
            }
        };

        let drag_time = timestamp_ms.saturating_sub(self.last_time_ms);
        if drag_time > 0 {
            bubble.velocity = (point - self.last_touch) / drag_time as f64;
        }
        self.last_touch = point;
        self.last_time_ms = timestamp_ms;

        let prev_center = bubble.center;
        bubble.move_to(point);
        if bubble.fits_within() {
            DragOutcome::Moved
        } else {
            bubble.move_to(prev_center);
            DragOutcome::RolledBack
        }
    }

    /// End the drag, leaving the bubble with its last estimated velocity.
    pub fn release(&mut self, bubbles: &mut BubbleSet) -> Option<BubbleKey> {
        let key = self.grasped.take()?;
        if let Some(bubble) = bubbles.get_mut(key) {
            bubble.grasped = false;
            log::debug!(
                "released bubble {} with velocity {:?}",
                key.slot(),
                bubble.velocity
            );
        }
        Some(key)
    }
}
