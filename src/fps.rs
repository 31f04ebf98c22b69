//! Frame rate measurement for the on-screen readout.

use crate::{
    graphics::{Surface, TextStyle},
    math::Vec2,
};
use instant::Instant;
use std::time::Duration;

/// Where and how the frame rate is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FpsReadout {
    /// Screen position of the start of the text baseline.
    pub position: [f64; 2],
    pub style: TextStyle,
    /// Characters of the frame rate value to show.
    pub digits: usize,
}

impl Default for FpsReadout {
    fn default() -> Self {
        Self {
            position: [16.0, 192.0],
            style: TextStyle::default(),
            digits: 2,
        }
    }
}

impl FpsReadout {
    /// Format a frame rate, e.g. `59.9` becomes `"FPS:59"` with the default two digits.
    pub fn text(&self, fps: f32) -> String {
        let value = format!("{:?}", fps);
        format!("FPS:{}", value.chars().take(self.digits).collect::<String>())
    }

    pub fn draw(&self, fps: f32, surface: &mut impl Surface) {
        let [x, y] = self.position;
        surface.draw_text(&self.text(fps), Vec2::new(x, y), &self.style);
    }
}

/// Measures the time between consecutive frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct FpsCounter {
    last_frame: Option<Instant>,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame happening now and return the updated frame rate.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Record a frame happening at `now` and return the updated frame rate.
    ///
    /// The first frame and frames with no time passed since the previous one report zero.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last_frame {
            Some(last) if now > last => now - last,
            _ => Duration::ZERO,
        };
        self.fps = if dt.is_zero() {
            0.0
        } else {
            (1.0 / dt.as_secs_f64()) as f32
        };
        self.last_frame = Some(now);
        self.fps
    }

    /// Frame rate measured on the latest tick.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::RecordingSurface;

    #[test]
    fn measures_frame_gaps() {
        let mut counter = FpsCounter::new();
        let start = Instant::now();
        assert_eq!(counter.tick_at(start), 0.0);
        let fps = counter.tick_at(start + Duration::from_millis(20));
        assert!((fps - 50.0).abs() < 1e-3);
        assert_eq!(counter.fps(), fps);
        // no time passed
        assert_eq!(counter.tick_at(start + Duration::from_millis(20)), 0.0);
        let fps = counter.tick_at(start + Duration::from_millis(30));
        assert!((fps - 100.0).abs() < 1e-2);
    }

    #[test]
    fn readout_text_is_truncated() {
        let readout = FpsReadout::default();
        assert_eq!(readout.text(59.94), "FPS:59");
        assert_eq!(readout.text(0.0), "FPS:0.");
        assert_eq!(readout.text(7.5), "FPS:7.");
        assert_eq!(readout.text(144.0), "FPS:14");
        let wide = FpsReadout {
            digits: 5,
            ..Default::default()
        };
        assert_eq!(wide.text(59.94), "FPS:59.94");
    }

    #[test]
    fn readout_draws_at_its_position() {
        let mut surface = RecordingSurface::default();
        FpsReadout::default().draw(60.0, &mut surface);
        assert_eq!(surface.texts, vec![("FPS:60".to_string(), Vec2::new(16.0, 192.0))]);
    }
}
