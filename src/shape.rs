//! Bubble outlines: vertex layout, point containment and drawing.

use crate::{
    graphics::{Color, Surface},
    math::{self as m, Vec2},
};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// The outline a bubble is drawn and hit-tested with.
///
/// Every kind is a regular figure inscribed in a circle of the bubble's size,
/// so the size also works as a bounding radius for collisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    Triangle,
    Square,
    Hexagon,
    Circular,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Triangle,
        ShapeKind::Square,
        ShapeKind::Hexagon,
        ShapeKind::Circular,
    ];

    /// Number of polygon sides, or None for a circle.
    pub fn sides(&self) -> Option<usize> {
        match self {
            ShapeKind::Triangle => Some(3),
            ShapeKind::Square => Some(4),
            ShapeKind::Hexagon => Some(6),
            ShapeKind::Circular => None,
        }
    }

    // angle of the first vertex, chosen so triangles point up
    // and squares sit flat on the screen axes
    fn start_angle(&self) -> f64 {
        match self {
            ShapeKind::Triangle => -FRAC_PI_2,
            ShapeKind::Square => FRAC_PI_4,
            ShapeKind::Hexagon | ShapeKind::Circular => 0.0,
        }
    }

    /// Polygon vertices around `center` with circumradius `radius`.
    /// Returns an empty Vec for circles.
    pub fn vertices(&self, center: Vec2, radius: f64) -> Vec<Vec2> {
        let sides = match self.sides() {
            Some(n) => n,
            None => return Vec::new(),
        };
        let angle_incr = 2.0 * PI / sides as f64;
        let start = self.start_angle();
        (0..sides)
            .map(|i| {
                let angle = start + angle_incr * i as f64;
                center + Vec2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect()
    }

    /// Check whether a point is inside the shape, boundary included.
    pub fn contains_point(&self, center: Vec2, radius: f64, point: Vec2) -> bool {
        if self.sides().is_none() {
            return (point - center).mag_sq() <= radius * radius;
        }
        // vertices wind with increasing angle,
        // so the point is inside if it's on the same side of every edge
        let verts = self.vertices(center, radius);
        verts
            .iter()
            .zip(verts.iter().cycle().skip(1))
            .all(|(&a, &b)| m::cross(b - a, point - a) >= 0.0)
    }

    pub fn draw(&self, center: Vec2, radius: f64, color: Color, surface: &mut impl Surface) {
        match self.sides() {
            Some(_) => surface.fill_polygon(&self.vertices(center, radius), color),
            None => surface.fill_circle(center, radius, color),
        }
    }
}

/// Error when parsing a [`ShapeKind`] from its name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown shape kind {0:?}")]
pub struct UnknownShape(pub String);

impl std::str::FromStr for ShapeKind {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "triangle" => Ok(ShapeKind::Triangle),
            "square" => Ok(ShapeKind::Square),
            "hexagon" => Ok(ShapeKind::Hexagon),
            "circle" | "circular" => Ok(ShapeKind::Circular),
            _ => Err(UnknownShape(s.to_string())),
        }
    }
}
