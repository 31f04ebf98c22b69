//! Bubble motion and collisions.

pub mod bubble;
pub use bubble::{Bubble, ShapeError};

pub mod bubble_set;
pub use bubble_set::{BubbleKey, BubbleSet};

pub mod collision;
pub use collision::{elastic_speeds, CollisionResolver, Contact};

pub mod integrator;
pub use integrator::{Integrator, SettleRule};
