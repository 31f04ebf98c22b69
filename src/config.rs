//! Parameters for setting up a bubble simulation.

use crate::{
    fps::FpsReadout,
    layout::DriftParams,
    physics::SettleRule,
    shape::{ShapeKind, UnknownShape},
};

/// Everything needed to construct a [`BubbleManager`][crate::BubbleManager].
///
/// With the `serde-types` feature this can be deserialized,
/// and any field left out takes its default value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SimulationParams {
    /// Shape of every bubble.
    pub shape: ShapeKind,
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Number of bubbles to lay out.
    pub count: usize,
    /// Fraction of speed lost in every collision, between 0 and 1.
    pub dampening: f64,
    /// Initial speed range of the bubbles.
    pub drift: DriftParams,
    /// When bubbles come to rest and get consumed. None disables settling.
    pub settle: Option<SettleRule>,
    /// Placement and look of the frame rate text.
    pub readout: FpsReadout,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Circular,
            width: 800.0,
            height: 600.0,
            count: 16,
            dampening: 0.0,
            drift: DriftParams::default(),
            settle: Some(SettleRule::default()),
            readout: FpsReadout::default(),
        }
    }
}

/// Error when simulation parameters don't make sense.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Canvas must have a positive finite size, got {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
    #[error("Dampening must be between 0 and 1, got {0}")]
    DampeningOutOfRange(f64),
    #[error("Drift speeds must satisfy 0 <= min <= max, got {min}..={max}")]
    InvalidDrift { min: f64, max: f64 },
    #[error("Settling threshold must be non-negative, got {0}")]
    InvalidSettleThreshold(f64),
    #[error("Settling must take at least one frame")]
    ZeroSettleFrames,
    #[error(transparent)]
    UnknownShape(#[from] UnknownShape),
}

impl SimulationParams {
    /// Parameters for `count` bubbles of the given shape on a `width` by `height` canvas,
    /// with defaults for everything else.
    pub fn new(shape: ShapeKind, width: f64, height: f64, count: usize) -> Self {
        Self {
            shape,
            width,
            height,
            count,
            ..Default::default()
        }
    }

    /// Set the shape by name, e.g. `"hexagon"`.
    pub fn with_shape_name(mut self, name: &str) -> Result<Self, ConfigError> {
        self.shape = name.parse()?;
        Ok(self)
    }

    pub fn with_dampening(mut self, dampening: f64) -> Self {
        self.dampening = dampening;
        self
    }

    pub fn with_drift(mut self, drift: DriftParams) -> Self {
        self.drift = drift;
        self
    }

    pub fn with_settle(mut self, settle: Option<SettleRule>) -> Self {
        self.settle = settle;
        self
    }

    pub fn with_readout(mut self, readout: FpsReadout) -> Self {
        self.readout = readout;
        self
    }

    /// Check that every value is in its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extent_ok = |e: f64| e > 0.0 && e.is_finite();
        if !extent_ok(self.width) || !extent_ok(self.height) {
            return Err(ConfigError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.dampening) {
            return Err(ConfigError::DampeningOutOfRange(self.dampening));
        }
        let DriftParams {
            min_speed,
            max_speed,
        } = self.drift;
        if !(min_speed >= 0.0 && min_speed <= max_speed && max_speed.is_finite()) {
            return Err(ConfigError::InvalidDrift {
                min: min_speed,
                max: max_speed,
            });
        }
        if let Some(rule) = self.settle {
            if !(rule.threshold >= 0.0) {
                return Err(ConfigError::InvalidSettleThreshold(rule.threshold));
            }
            if rule.frames == 0 {
                return Err(ConfigError::ZeroSettleFrames);
            }
        }
        Ok(())
    }
}
