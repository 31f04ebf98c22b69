//! Types, aliases and helper operations for doing math with `ultraviolet`.
pub use ultraviolet as uv;

/// Positions and velocities in screen space.
/// x grows to the right and y grows downward, units are pixels.
pub type Vec2 = uv::DVec2;

/// A wrapper type to indicate a vector should always be normalized.
#[derive(Clone, Copy, Debug)]
pub struct Unit<T>(T);

impl Unit<Vec2> {
    pub fn new_normalize(v: Vec2) -> Self {
        Unit(v.normalized())
    }

    /// Normalize a vector, returning None if it has no length to normalize.
    pub fn try_new_normalize(v: Vec2) -> Option<Self> {
        let mag = v.mag();
        if mag > 0.0 && mag.is_finite() {
            Some(Unit(v / mag))
        } else {
            None
        }
    }
}

impl<T> std::ops::Deref for Unit<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Vec2 utils

/// 2D cross product, i.e. the z component of the 3D cross product.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Split a vector into its component along `axis` and the remainder perpendicular to it.
#[inline]
pub fn split_along(v: Vec2, axis: Unit<Vec2>) -> (f64, Vec2) {
    let along = v.dot(*axis);
    (along, v - *axis * along)
}

/// Check whether a point lies in the closed rectangle `[0, width] × [0, height]`.
#[inline]
pub fn in_bounds(p: Vec2, width: f64, height: f64) -> bool {
    (0.0..=width).contains(&p.x) && (0.0..=height).contains(&p.y)
}
