//! Fire source: point emitter driving smoke production
//!
//! The fire is a single point at floor level whose intensity accumulates for
//! as long as the simulation runs, modelling unchecked fire growth. Intensity
//! is deliberately uncapped here; consumers clamp at point of use (the spawn
//! formula saturates at 5, flame rendering at 10) so visible effects level
//! off while the underlying state keeps growing.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core_types::Speed;

/// Intensity gained per tick at 1x speed.
const GROWTH_PER_TICK: f32 = 0.005;

/// Cap applied to intensity reads meant for flame rendering.
const DISPLAY_INTENSITY_CAP: f32 = 10.0;

/// Point emitter with a monotonically growing intensity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireSource {
    x: f32,
    intensity: f32,
}

impl FireSource {
    /// Create a fire at the given horizontal position with intensity 1.0.
    pub fn new(x: f32) -> Self {
        FireSource { x, intensity: 1.0 }
    }

    /// Grow intensity by the per-tick increment, scaled by the speed
    /// multiplier. Never shrinks and never saturates.
    pub fn grow(&mut self, speed: Speed) {
        self.intensity += GROWTH_PER_TICK * speed.factor();
    }

    /// Relocate the emitter instantaneously. Intensity is unaffected.
    pub fn set_position(&mut self, x: f32) {
        info!("Fire moved to x={:.1}", x);
        self.x = x;
    }

    /// Horizontal position of the emitter.
    pub fn position(&self) -> f32 {
        self.x
    }

    /// Raw accumulated intensity (uncapped).
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Intensity clamped for flame rendering, bounding draw cost.
    pub fn display_intensity(&self) -> f32 {
        self.intensity.min(DISPLAY_INTENSITY_CAP)
    }

    /// Restore intensity to its initial value. Position is kept; placement
    /// is part of the room layout, not of the run.
    pub fn reset(&mut self) {
        self.intensity = 1.0;
    }
}
