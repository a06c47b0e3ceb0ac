#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! Every field has a default, so hosts only spell out what they override:
//! `{"touch": {"delay_ms": 350}}` is a complete configuration.

use core::time::Duration;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default long-press hold time before a touch drag activates.
pub const DEFAULT_LONG_PRESS_DELAY_MS: u32 = 500;

/// Default movement allowed during the hold before it counts as a scroll.
pub const DEFAULT_LONG_PRESS_JITTER_PX: f64 = 10.0;

/// Touch long-press recognizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongPressConfig {
    /// Hold time before activation, in milliseconds.
    pub delay_ms: u32,
    /// Maximum finger travel during the hold, in host pixels.
    pub jitter_px: f64,
}

impl LongPressConfig {
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.delay_ms))
    }
}

impl Default for LongPressConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_LONG_PRESS_DELAY_MS,
            jitter_px: DEFAULT_LONG_PRESS_JITTER_PX,
        }
    }
}

/// Display-list geometry settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Width of the invisible band that grabs resize drags.
    pub divider_hit_thickness: f64,
    /// Width of the drawn divider line.
    pub divider_visual_thickness: f64,
    /// Scale applied to the dragged panel's ghost.
    pub ghost_scale: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            divider_hit_thickness: 6.0,
            divider_visual_thickness: 2.0,
            ghost_scale: 0.95,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub touch: LongPressConfig,
    pub render: RenderConfig,
}

impl EngineConfig {
    /// Parse from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self, EngineConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|err| EngineConfigError::Parse {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        if self.touch.delay_ms == 0 {
            return Err(EngineConfigError::ZeroLongPressDelay);
        }
        let jitter = self.touch.jitter_px;
        if !jitter.is_finite() || jitter < 0.0 {
            return Err(EngineConfigError::InvalidJitter { value: jitter });
        }
        let hit = self.render.divider_hit_thickness;
        if !hit.is_finite() || hit <= 0.0 {
            return Err(EngineConfigError::InvalidDividerHitThickness { value: hit });
        }
        let visual = self.render.divider_visual_thickness;
        if !visual.is_finite() || visual <= 0.0 || visual > hit {
            return Err(EngineConfigError::InvalidDividerVisualThickness { value: visual, hit });
        }
        let scale = self.render.ghost_scale;
        if !(scale > 0.0 && scale <= 1.0) {
            return Err(EngineConfigError::InvalidGhostScale { value: scale });
        }
        Ok(())
    }
}

/// Configuration rejected at construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineConfigError {
    ZeroLongPressDelay,
    InvalidJitter {
        value: f64,
    },
    InvalidDividerHitThickness {
        value: f64,
    },
    InvalidDividerVisualThickness {
        value: f64,
        hit: f64,
    },
    InvalidGhostScale {
        value: f64,
    },
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
}

impl fmt::Display for EngineConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLongPressDelay => write!(f, "touch.delay_ms must be greater than zero"),
            Self::InvalidJitter { value } => {
                write!(f, "touch.jitter_px must be finite and non-negative (got {value})")
            }
            Self::InvalidDividerHitThickness { value } => write!(
                f,
                "render.divider_hit_thickness must be finite and positive (got {value})"
            ),
            Self::InvalidDividerVisualThickness { value, hit } => write!(
                f,
                "render.divider_visual_thickness must be in (0, {hit}] (got {value})"
            ),
            Self::InvalidGhostScale { value } => {
                write!(f, "render.ghost_scale must be in (0, 1] (got {value})")
            }
            Self::Parse {
                line,
                column,
                message,
            } => write!(f, "invalid engine config at {line}:{column}: {message}"),
        }
    }
}

impl std::error::Error for EngineConfigError {}
