//! Ceiling smoke layer: a 1-D thickness field
//!
//! Once particles stratify at the ceiling they stop being tracked
//! individually and become thickness in this field, one sample per horizontal
//! unit of surface width. Each tick the field drifts slightly with ambient
//! air movement, diffuses sideways, drains under active vents, and thins
//! through passive decay. The interior wall blocks diffusion except through
//! an open door.
//!
//! The update is computed from a frozen snapshot of the previous field
//! (double buffering); an in-place sweep would read already-updated
//! neighbours. The diffusion scheme is explicit with no stability clamp: at
//! 4x speed the effective rate is 1.2, above the 0.5 oscillation threshold,
//! matching the reference behaviour. Values are clamped to zero after every
//! adjustment, so the non-negativity invariant holds regardless.

use serde::{Deserialize, Serialize};

use crate::core_types::{Speed, VentState};
use crate::obstruction::Obstruction;

/// Lateral diffusion rate at 1x speed.
const DIFFUSION_RATE: f32 = 0.3;

/// Thickness removed per tick per column under an active vent, at 1x speed.
const VENT_DRAIN: f32 = 1.5;

/// Number of columns from the surface edge a vent drains.
const VENT_RANGE_COLUMNS: usize = 70;

/// Thickness every column loses per tick, independent of speed.
const PASSIVE_DECAY: f32 = 0.08;

/// Amplitude of the ambient sinusoidal drift.
const DRIFT_AMPLITUDE: f32 = 0.02;

/// Accumulated smoke thickness at the ceiling, per horizontal column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmokeLayerField {
    columns: Vec<f32>,
}

impl SmokeLayerField {
    /// Create a zeroed field of the given width in columns.
    pub fn new(width: usize) -> Self {
        SmokeLayerField {
            columns: vec![0.0; width],
        }
    }

    /// Read-only view of the thickness samples.
    pub fn columns(&self) -> &[f32] {
        &self.columns
    }

    /// Field width in columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the field has been configured with a nonzero width.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Add thickness to a column. Out-of-bounds indices are silently
    /// ignored; a deposit beyond the surface is physically meaningless.
    pub fn deposit_at(&mut self, column: usize, amount: f32) {
        if let Some(c) = self.columns.get_mut(column) {
            *c += amount;
        }
    }

    /// Change the field width, truncating or zero-padding existing columns.
    pub fn resize(&mut self, width: usize) {
        self.columns.resize(width, 0.0);
    }

    /// Zero every column, keeping the width.
    pub fn reset(&mut self) {
        self.columns.fill(0.0);
    }

    /// Largest thickness sample, 0 for an empty field.
    pub fn max_thickness(&self) -> f32 {
        self.columns.iter().copied().fold(0.0, f32::max)
    }

    /// Largest thickness among columns in `start..end` (clamped to bounds).
    pub fn max_in(&self, start: usize, end: usize) -> f32 {
        let end = end.min(self.columns.len());
        if start >= end {
            return 0.0;
        }
        self.columns[start..end].iter().copied().fold(0.0, f32::max)
    }

    /// Sum of all thickness samples.
    pub fn total_mass(&self) -> f32 {
        self.columns.iter().sum()
    }

    /// Advance the field by one tick.
    ///
    /// In order per column: ambient sinusoidal drift, explicit-Laplacian
    /// diffusion with wall blocking, vent drain, passive decay, clamp to
    /// zero. A zero-length field (before the first configure) is a no-op.
    pub fn step(
        &mut self,
        obstruction: &Obstruction,
        door_open: bool,
        vents: VentState,
        simulated_time: f32,
        speed: Speed,
    ) {
        if self.columns.is_empty() {
            return;
        }

        let dt = speed.factor();
        let rate = DIFFUSION_RATE * dt;
        let prev = self.columns.clone();
        let len = prev.len();
        let mut next = prev.clone();

        for i in 0..len {
            // 1. Ambient air movement: small oscillation in time and space.
            next[i] += (simulated_time * 0.05 + i as f32 * 0.3).sin() * DRIFT_AMPLITUDE;

            // 2-3. Diffusion from the frozen snapshot. Exchanges touching the
            // wall band are suppressed while the door is closed, leaving the
            // band-edge columns with one-sided diffusion only.
            if i > 0 && !obstruction.blocks_exchange(i - 1, i, door_open) {
                next[i] += rate * (prev[i - 1] - prev[i]);
            }
            if i + 1 < len && !obstruction.blocks_exchange(i, i + 1, door_open) {
                next[i] += rate * (prev[i + 1] - prev[i]);
            }

            // 4. Vent drain near active vents.
            if vents.left && i < VENT_RANGE_COLUMNS {
                next[i] -= VENT_DRAIN * dt;
            }
            if vents.right && i + VENT_RANGE_COLUMNS >= len {
                next[i] -= VENT_DRAIN * dt;
            }

            // 5. Passive decay, then clamp: thickness is never negative.
            next[i] -= PASSIVE_DECAY;
            next[i] = next[i].max(0.0);
        }

        self.columns = next;
    }
}
