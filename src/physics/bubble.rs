use crate::{
    graphics::{Color, Surface},
    math::{self as m, Vec2},
    shape::ShapeKind,
};

/// A bubble is a shape that drifts around the canvas and collides with others.
///
/// Its `size` is the radius of the circle its shape is inscribed in.
/// The same number doubles as its mass in collisions.
#[derive(Clone, Copy, Debug)]
pub struct Bubble {
    /// Position of the center in pixels.
    pub center: Vec2,
    /// Velocity in pixels per millisecond.
    pub velocity: Vec2,
    pub color: Color,
    kind: ShapeKind,
    size: f64,
    bounds: Vec2,
    pub(crate) grasped: bool,
    pub(crate) moving: bool,
    // consecutive frames spent below the settling speed
    pub(crate) still_frames: u32,
}

/// Error when creating a bubble from invalid parameters.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ShapeError {
    #[error("Bubble size must be positive and finite, got {0}")]
    InvalidSize(f64),
    #[error("Bubble center must be finite, got ({0}, {1})")]
    InvalidCenter(f64, f64),
    #[error("Bounds must be positive and finite, got {0}x{1}")]
    InvalidBounds(f64, f64),
}

impl Bubble {
    /// Create a resting bubble of the given shape, confined to `[0, width] × [0, height]`.
    pub fn create(
        kind: ShapeKind,
        center: Vec2,
        size: f64,
        width: f64,
        height: f64,
    ) -> Result<Self, ShapeError> {
        if !(size > 0.0 && size.is_finite()) {
            return Err(ShapeError::InvalidSize(size));
        }
        if !(center.x.is_finite() && center.y.is_finite()) {
            return Err(ShapeError::InvalidCenter(center.x, center.y));
        }
        if !(width > 0.0 && width.is_finite() && height > 0.0 && height.is_finite()) {
            return Err(ShapeError::InvalidBounds(width, height));
        }
        Ok(Self {
            center,
            velocity: Vec2::zero(),
            color: crate::graphics::GRAY,
            kind,
            size,
            bounds: Vec2::new(width, height),
            grasped: false,
            moving: true,
            still_frames: 0,
        })
    }

    /// Set the velocity in a builder-like chain.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the color in a builder-like chain.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Bounding radius, also used as mass.
    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    #[inline]
    pub fn is_grasped(&self) -> bool {
        self.grasped
    }

    /// False once the bubble has settled and is waiting to be consumed by a collision pass.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Mark the bubble as settled so the next collision pass consumes it.
    pub fn settle(&mut self) {
        self.moving = false;
    }

    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.kind.contains_point(self.center, self.size, point)
    }

    /// Move along the stored velocity for `dt` milliseconds,
    /// bouncing off the edges of the bounds.
    ///
    /// A velocity component is only flipped if it points out of the bounds,
    /// so a bubble that starts out overlapping a wall doesn't get stuck shaking in place.
    pub fn advance(&mut self, dt: f64) {
        self.center += self.velocity * dt;

        let (w, h) = (self.bounds.x, self.bounds.y);
        let r = self.size;
        if (self.center.x - r < 0.0 && self.velocity.x < 0.0)
            || (self.center.x + r > w && self.velocity.x > 0.0)
        {
            self.velocity.x = -self.velocity.x;
        }
        if (self.center.y - r < 0.0 && self.velocity.y < 0.0)
            || (self.center.y + r > h && self.velocity.y > 0.0)
        {
            self.velocity.y = -self.velocity.y;
        }

        self.center.x = self.center.x.clamp(0.0, w);
        self.center.y = self.center.y.clamp(0.0, h);
    }

    /// Move the center to a point without any checks.
    /// See [`fits_within`][Self::fits_within] for validating the result.
    #[inline]
    pub fn move_to(&mut self, point: Vec2) {
        self.center = point;
    }

    /// Check whether the center is inside the bubble's bounds.
    #[inline]
    pub fn fits_within(&self) -> bool {
        m::in_bounds(self.center, self.bounds.x, self.bounds.y)
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        self.kind.draw(self.center, self.size, self.color, surface);
    }
}
