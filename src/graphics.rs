//! The drawing interface bubbles render through.
//!
//! The crate does no rasterization of its own. A host implements [`Surface`]
//! on top of whatever canvas it has and passes it to
//! [`BubbleManager::on_frame`][crate::BubbleManager::on_frame].

use crate::math::Vec2;

/// RGBA color with components in `0.0..=1.0`.
pub type Color = [f32; 4];

pub const GRAY: Color = [0.5, 0.5, 0.5, 1.0];

/// Colors handed out to bubbles at layout time.
pub const PALETTE: [Color; 6] = [
    [0.937, 0.325, 0.314, 1.0],
    [1.0, 0.655, 0.149, 1.0],
    [0.4, 0.733, 0.416, 1.0],
    [0.259, 0.647, 0.961, 1.0],
    [0.671, 0.278, 0.737, 1.0],
    [0.149, 0.776, 0.855, 1.0],
];

/// Appearance of text drawn with [`Surface::draw_text`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TextStyle {
    pub color: Color,
    /// Text height in pixels.
    pub size: f32,
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: GRAY,
            size: 48.0,
            bold: true,
        }
    }
}

/// Something bubbles can be drawn onto.
pub trait Surface {
    /// Fill a convex polygon given by its vertices in order.
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Color);
    /// Draw a line of text with its baseline starting at `position`.
    fn draw_text(&mut self, text: &str, position: Vec2, style: &TextStyle);
}

/// A surface that records draw calls instead of rendering them.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub polygons: Vec<(Vec<Vec2>, Color)>,
    pub circles: Vec<(Vec2, f64, Color)>,
    pub texts: Vec<(String, Vec2)>,
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.polygons.push((points.to_vec(), color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Color) {
        self.circles.push((center, radius, color));
    }

    fn draw_text(&mut self, text: &str, position: Vec2, _style: &TextStyle) {
        self.texts.push((text.to_string(), position));
    }
}
