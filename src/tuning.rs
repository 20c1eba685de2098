//! Game balance and layout configuration
//!
//! Every constant the simulation consults lives here. `Tuning::default()` is
//! the reference configuration; hosts may load overrides from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How a frame resolves when both lateral intents are asserted.
///
/// With `Independent` the cooldown gate is checked once on entry and the left
/// and right steps are then applied independently, so a single frame can step
/// left and straight back right (net zero, cooldown consumed). `FirstOnly`
/// applies at most one step per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveResolution {
    #[default]
    Independent,
    FirstOnly,
}

/// Errors raised while loading a tuning document or fitting a snapshot to it
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("snapshot does not fit tuning: {0}")]
    SnapshotMismatch(String),
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lane x positions, left to right
    pub lanes: Vec<f32>,
    pub field_width: f32,
    pub field_height: f32,
    pub spider_width: f32,
    pub spider_height: f32,
    pub droplet_width: f32,
    pub fly_width: f32,
    pub move_cooldown_ms: f64,
    pub bonus_cooldown_ms: f64,
    pub initial_spawn_rate: f64,
    pub spawn_rate_increment: f64,
    pub fall_speed: f32,
    /// Interaction zone spans `[height - zone_top_offset, height - zone_bottom_offset)`
    pub zone_top_offset: f32,
    pub zone_bottom_offset: f32,
    pub fly_points: u64,
    pub fly_bonus_points: u64,
    pub move_resolution: MoveResolution,
    /// Clear the move/bonus timestamps on reset (reference keeps them)
    pub reset_cooldowns_on_reset: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lanes: LANE_POSITIONS.to_vec(),
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            spider_width: SPIDER_WIDTH,
            spider_height: SPIDER_HEIGHT,
            droplet_width: DROPLET_WIDTH,
            fly_width: FLY_WIDTH,
            move_cooldown_ms: MOVE_COOLDOWN_MS,
            bonus_cooldown_ms: BONUS_COOLDOWN_MS,
            initial_spawn_rate: INITIAL_SPAWN_RATE,
            spawn_rate_increment: SPAWN_RATE_INCREMENT,
            fall_speed: FALL_SPEED,
            zone_top_offset: ZONE_TOP_OFFSET,
            zone_bottom_offset: ZONE_BOTTOM_OFFSET,
            fly_points: FLY_POINTS,
            fly_bonus_points: FLY_BONUS_POINTS,
            move_resolution: MoveResolution::Independent,
            reset_cooldowns_on_reset: false,
        }
    }
}

impl Tuning {
    /// Parse a tuning document. Missing fields take their reference values.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for shipping a template alongside a build)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from JSON, logging and falling back to the reference configuration
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning ({} lanes)", tuning.lanes.len());
                tuning
            }
            Err(e) => {
                log::warn!("Tuning rejected, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Check that the configuration describes a playable field
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.lanes.is_empty() {
            return Err(invalid("lanes", "at least one lane is required"));
        }
        if let Some(x) = self.lanes.iter().find(|x| !x.is_finite()) {
            return Err(invalid("lanes", format!("lane position {x} is not finite")));
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("spider_width", self.spider_width)?;
        positive("spider_height", self.spider_height)?;
        positive("droplet_width", self.droplet_width)?;
        positive("fly_width", self.fly_width)?;
        positive("fall_speed", self.fall_speed)?;

        if !(self.move_cooldown_ms >= 0.0) {
            return Err(invalid("move_cooldown_ms", "must be >= 0"));
        }
        if !(self.bonus_cooldown_ms >= 0.0) {
            return Err(invalid("bonus_cooldown_ms", "must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.initial_spawn_rate) {
            return Err(invalid("initial_spawn_rate", "must be within [0, 1]"));
        }
        if !(self.spawn_rate_increment >= 0.0) {
            return Err(invalid("spawn_rate_increment", "must be >= 0"));
        }
        if !(self.zone_top_offset > self.zone_bottom_offset) {
            return Err(invalid(
                "zone_top_offset",
                format!(
                    "{} must be greater than zone_bottom_offset {}",
                    self.zone_top_offset, self.zone_bottom_offset
                ),
            ));
        }
        Ok(())
    }

    /// Lane the spider starts in (middle lane, rounding down)
    #[inline]
    pub fn middle_lane(&self) -> usize {
        self.lanes.len() / 2
    }

    /// Top edge of the interaction zone
    #[inline]
    pub fn zone_top(&self) -> f32 {
        self.field_height - self.zone_top_offset
    }

    /// Bottom edge of the interaction zone (exclusive)
    #[inline]
    pub fn zone_bottom(&self) -> f32 {
        self.field_height - self.zone_bottom_offset
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be finite and > 0")))
    }
}
