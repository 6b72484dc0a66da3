//! Clamped zoom level owned by the presentation layer.

use crate::logic::date_math::{clamp_zoom, pixels_per_day, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};

/// Multiplier applied by one zoom step.
pub const ZOOM_STEP: f32 = 1.5;

/// Zoom level that is always inside `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomLevel(f32);

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}

impl ZoomLevel {
    pub fn new(value: f32) -> Self {
        Self(clamp_zoom(value))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn set(&mut self, value: f32) {
        self.0 = clamp_zoom(value);
    }

    pub fn zoom_in(&mut self) {
        self.0 = (self.0 * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.0 = (self.0 / ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn pixels_per_day(self) -> f32 {
        pixels_per_day(self.0)
    }
}

impl From<f32> for ZoomLevel {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

// Lets unsuffixed literals (`f64` by default) stand in for a zoom level.
impl From<f64> for ZoomLevel {
    fn from(value: f64) -> Self {
        Self::new(value as f32)
    }
}
