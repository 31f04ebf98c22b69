//! Initial placement of bubbles on a grid.

use crate::{graphics::PALETTE, math::Vec2, physics::Bubble, shape::ShapeKind};
use rand::Rng;

/// Range of speeds bubbles start drifting with, in pixels per millisecond.
/// The direction is picked uniformly at random.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DriftParams {
    pub min_speed: f64,
    pub max_speed: f64,
}

impl DriftParams {
    /// No initial motion at all.
    pub const fn still() -> Self {
        Self {
            min_speed: 0.0,
            max_speed: 0.0,
        }
    }

    fn sample(&self, rng: &mut impl Rng) -> Vec2 {
        if self.max_speed <= 0.0 {
            return Vec2::zero();
        }
        let speed = rng.gen_range(self.min_speed..=self.max_speed);
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        Vec2::new(speed * angle.cos(), speed * angle.sin())
    }
}

impl Default for DriftParams {
    fn default() -> Self {
        Self {
            min_speed: 0.05,
            max_speed: 0.2,
        }
    }
}

/// Smallest bubble size the layout hands out.
pub const MIN_SIZE: u32 = 10;

/// Number of grid columns (and rows) needed to fit `count` cells in a square grid.
pub fn columns_for(count: usize) -> usize {
    let mut columns = (count as f64).sqrt() as usize;
    if columns * columns < count {
        columns += 1;
    }
    columns
}

/// Lay out `count` bubbles in a square grid of cells filling the canvas from the top left.
///
/// Each bubble sits at the center of its own cell with a random integer size
/// between [`MIN_SIZE`] and half the cell size plus `MIN_SIZE - 1`.
/// The grid is sized by the shorter side of the canvas so every row fits.
///
/// Cells whose bubble can't be created are left empty.
pub fn generate(
    kind: ShapeKind,
    count: usize,
    width: f64,
    height: f64,
    drift: DriftParams,
    rng: &mut impl Rng,
) -> Vec<Bubble> {
    if count == 0 {
        return Vec::new();
    }
    let columns = columns_for(count);
    let cell_size = width.min(height) / columns as f64;
    let half_cell = (cell_size / 2.0).floor() as u32;

    let mut bubbles = Vec::with_capacity(count);
    for i in 0..count {
        let size = if half_cell > 0 {
            rng.gen_range(0..half_cell) + MIN_SIZE
        } else {
            MIN_SIZE
        };
        let center = Vec2::new(
            cell_size / 2.0 + (i % columns) as f64 * cell_size,
            cell_size / 2.0 + (i / columns) as f64 * cell_size,
        );
        let velocity = drift.sample(rng);
        let color = PALETTE[rng.gen_range(0..PALETTE.len())];

        match Bubble::create(kind, center, size as f64, width, height) {
            Ok(bubble) => bubbles.push(bubble.with_velocity(velocity).with_color(color)),
            Err(err) => log::warn!("Skipping bubble {} of {}: {}", i, count, err),
        }
    }
    bubbles
}
