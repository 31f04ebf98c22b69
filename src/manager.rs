//! The entry point tying the simulation together.

use crate::{
    config::{ConfigError, SimulationParams},
    drag::DragController,
    fps::{FpsCounter, FpsReadout},
    graphics::Surface,
    input::InputEvent,
    layout,
    physics::{Bubble, BubbleKey, BubbleSet, CollisionResolver, Integrator},
};
use instant::Instant;
use rand::Rng;

/// Owns every bubble on the canvas and drives them through input, motion and collisions.
///
/// A host calls [`update`][Self::update] once per frame with the elapsed time,
/// forwards pointer events to [`on_input_event`][Self::on_input_event],
/// and renders with [`on_frame`][Self::on_frame].
#[derive(Debug)]
pub struct BubbleManager {
    bubbles: BubbleSet,
    drag: DragController,
    integrator: Integrator,
    resolver: CollisionResolver,
    fps: FpsCounter,
    readout: FpsReadout,
    width: f64,
    height: f64,
}

impl BubbleManager {
    /// Lay out a new set of bubbles with a randomly seeded generator.
    pub fn new(params: &SimulationParams) -> Result<Self, ConfigError> {
        Self::with_rng(params, &mut rand::thread_rng())
    }

    /// Lay out a new set of bubbles using the given random number generator.
    pub fn with_rng(params: &SimulationParams, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        params.validate()?;

        let bubbles: BubbleSet = layout::generate(
            params.shape,
            params.count,
            params.width,
            params.height,
            params.drift,
            rng,
        )
        .into_iter()
        .collect();
        log::debug!(
            "laid out {} {:?} bubbles on a {}x{} canvas",
            bubbles.len(),
            params.shape,
            params.width,
            params.height
        );

        Ok(Self {
            bubbles,
            drag: DragController::new(),
            integrator: Integrator::new(params.settle),
            resolver: CollisionResolver::new(params.dampening),
            fps: FpsCounter::new(),
            readout: params.readout,
            width: params.width,
            height: params.height,
        })
    }

    /// Draw every bubble followed by the frame rate readout.
    pub fn on_frame(&mut self, surface: &mut impl Surface) {
        self.on_frame_at(surface, Instant::now());
    }

    /// Like [`on_frame`][Self::on_frame], measuring the frame rate against the given time.
    pub fn on_frame_at(&mut self, surface: &mut impl Surface, now: Instant) {
        for (_, bubble) in self.bubbles.iter() {
            bubble.draw(surface);
        }
        let fps = self.fps.tick_at(now);
        self.readout.draw(fps, surface);
    }

    /// Handle a pointer press, move or release.
    pub fn on_input_event(&mut self, event: InputEvent) {
        self.drag.handle(&mut self.bubbles, &event);
    }

    /// Step the simulation forward by `dt` milliseconds.
    ///
    /// With `collision_enabled` set, overlapping bubbles bounce off each other
    /// and bubbles that have settled are consumed.
    pub fn update(&mut self, dt: f64, collision_enabled: bool) {
        self.integrator.step(&mut self.bubbles, dt);
        if !collision_enabled {
            return;
        }
        let consumed = self.resolver.resolve(&mut self.bubbles);
        if !consumed.is_empty() {
            log::debug!(
                "consumed {} settled bubbles, {} left",
                consumed.len(),
                self.bubbles.len()
            );
        }
    }

    #[inline]
    pub fn bubbles(&self) -> &BubbleSet {
        &self.bubbles
    }

    #[inline]
    pub fn get(&self, key: BubbleKey) -> Option<&Bubble> {
        self.bubbles.get(key)
    }

    /// The bubble currently held by the pointer, if it still exists.
    pub fn grasped(&self) -> Option<BubbleKey> {
        self.drag.grasped().filter(|&key| self.bubbles.contains(key))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Frame rate measured on the latest frame.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }
}
