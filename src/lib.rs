pub mod config;
pub use config::{ConfigError, SimulationParams};

pub mod drag;
pub use drag::{DragController, DragOutcome};

pub mod fps;
pub use fps::{FpsCounter, FpsReadout};

pub mod graphics;
pub use graphics::{Color, Surface, TextStyle};

pub mod input;
pub use input::{InputEvent, InputKind, InputTracker};

pub mod layout;
pub use layout::DriftParams;

pub mod manager;
pub use manager::BubbleManager;

pub mod math;
pub use math::{uv, Unit, Vec2};

pub mod physics;
pub use physics::{
    elastic_speeds, Bubble, BubbleKey, BubbleSet, CollisionResolver, Integrator, SettleRule,
    ShapeError,
};

pub mod shape;
pub use shape::{ShapeKind, UnknownShape};

// Re-exported winit to guarantee versions match
pub use winit;
