//! Pointer input in the form the bubble manager consumes,
//! and a tracker to produce it from `winit` window events.

use crate::math::Vec2;
use winit::{dpi::PhysicalPosition, event as ev};

pub use ev::{ElementState, MouseButton, TouchPhase};

/// What a pointer did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Press,
    Move,
    Release,
}

/// A single pointer sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputEvent {
    pub kind: InputKind,
    /// Pointer position in pixels down and right from the top left.
    pub position: Vec2,
    /// Time of the sample in milliseconds from any fixed starting point.
    pub timestamp_ms: u64,
}

impl InputEvent {
    pub fn new(kind: InputKind, x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self {
            kind,
            position: Vec2::new(x, y),
            timestamp_ms,
        }
    }

    pub fn press(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self::new(InputKind::Press, x, y, timestamp_ms)
    }

    pub fn moved(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self::new(InputKind::Move, x, y, timestamp_ms)
    }

    pub fn release(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self::new(InputKind::Release, x, y, timestamp_ms)
    }
}

/// Turns window events into [`InputEvent`]s.
///
/// The left mouse button and the first finger on a touch screen act as the pointer.
/// Winit doesn't attach a position to button events, so the tracker remembers
/// where the cursor last moved.
#[derive(Clone, Copy, Debug)]
pub struct InputTracker {
    cursor_pos: PhysicalPosition<f64>,
    button_held: bool,
    active_touch: Option<u64>,
}

impl InputTracker {
    pub fn new() -> Self {
        InputTracker {
            cursor_pos: PhysicalPosition::new(0.0, 0.0),
            button_held: false,
            active_touch: None,
        }
    }

    /// Perform whatever tracking is available for the given window event,
    /// returning the pointer event it amounts to, if any.
    pub fn track_window_event(
        &mut self,
        event: &ev::WindowEvent,
        timestamp_ms: u64,
    ) -> Option<InputEvent> {
        use ev::WindowEvent::*;
        match event {
            MouseInput { button, state, .. } => {
                self.track_mouse_button(*button, *state, timestamp_ms)
            }
            CursorMoved { position, .. } => self.track_cursor_movement(*position, timestamp_ms),
            Touch(touch) => self.track_touch(touch.id, touch.phase, touch.location, timestamp_ms),
            _ => None,
        }
    }

    /// Track a mouse button event. Only the left button drags.
    pub fn track_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
        timestamp_ms: u64,
    ) -> Option<InputEvent> {
        if button != MouseButton::Left {
            return None;
        }
        let kind = match (state, self.button_held) {
            (ElementState::Pressed, false) => InputKind::Press,
            (ElementState::Released, true) => InputKind::Release,
            _ => return None,
        };
        self.button_held = kind == InputKind::Press;
        Some(self.cursor_event(kind, timestamp_ms))
    }

    /// Track the screen position of the mouse cursor.
    /// Produces a move event only while the left button is held.
    pub fn track_cursor_movement(
        &mut self,
        position: PhysicalPosition<f64>,
        timestamp_ms: u64,
    ) -> Option<InputEvent> {
        self.cursor_pos = position;
        if self.button_held {
            Some(self.cursor_event(InputKind::Move, timestamp_ms))
        } else {
            None
        }
    }

    /// Track a touch event. Fingers other than the one that touched down first are ignored.
    pub fn track_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        location: PhysicalPosition<f64>,
        timestamp_ms: u64,
    ) -> Option<InputEvent> {
        let kind = match (phase, self.active_touch) {
            (TouchPhase::Started, None) => {
                self.active_touch = Some(id);
                InputKind::Press
            }
            (TouchPhase::Moved, Some(active)) if active == id => InputKind::Move,
            (TouchPhase::Ended | TouchPhase::Cancelled, Some(active)) if active == id => {
                self.active_touch = None;
                InputKind::Release
            }
            _ => return None,
        };
        Some(InputEvent::new(kind, location.x, location.y, timestamp_ms))
    }

    fn cursor_event(&self, kind: InputKind, timestamp_ms: u64) -> InputEvent {
        InputEvent::new(kind, self.cursor_pos.x, self.cursor_pos.y, timestamp_ms)
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new()
    }
}
