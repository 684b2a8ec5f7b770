//! Core types shared across the simulation
//!
//! Small value types: the 2D vector alias used for particle motion and the
//! control-state enums consumed by the tick pipeline (speed multiplier, fire
//! intensity level, vent selection).

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// 2D vector type for particle positions and velocities.
///
/// Simple alias for `nalgebra::Vector2<f32>` in surface coordinates:
/// x grows rightward, y grows downward (the ceiling is at y = 0).
pub type Vec2 = Vector2<f32>;

/// Simulation speed multiplier.
///
/// The wall-clock tick period never changes; the multiplier scales the
/// magnitude of per-tick physics changes and the reported elapsed-time
/// increment instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Speed {
    /// Real-time pacing (1x)
    #[default]
    Normal,
    /// 2x physics per tick
    Double,
    /// 4x physics per tick
    Quadruple,
}

impl Speed {
    /// Scale factor applied to per-tick physics magnitudes.
    pub fn factor(self) -> f32 {
        match self {
            Speed::Normal => 1.0,
            Speed::Double => 2.0,
            Speed::Quadruple => 4.0,
        }
    }

    /// Cycle to the next speed (1x -> 2x -> 4x -> 1x), for one-button toggles.
    pub fn next(self) -> Self {
        match self {
            Speed::Normal => Speed::Double,
            Speed::Double => Speed::Quadruple,
            Speed::Quadruple => Speed::Normal,
        }
    }

    /// Parse a raw multiplier value; only 1, 2 and 4 are valid.
    pub fn from_multiplier(value: u8) -> Option<Self> {
        match value {
            1 => Some(Speed::Normal),
            2 => Some(Speed::Double),
            4 => Some(Speed::Quadruple),
            _ => None,
        }
    }
}

/// User-selected fire intensity level (1-3).
///
/// Scales the particle spawn rate and buoyancy. Distinct from the fire's own
/// intensity accumulator, which grows continuously while the simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntensityLevel {
    /// Smouldering fire (level 1)
    #[default]
    Low,
    /// Developing fire (level 2)
    Medium,
    /// Fully developed fire (level 3)
    High,
}

impl IntensityLevel {
    /// Numeric level used in the spawn-rate and buoyancy formulas.
    pub fn factor(self) -> f32 {
        match self {
            IntensityLevel::Low => 1.0,
            IntensityLevel::Medium => 2.0,
            IntensityLevel::High => 3.0,
        }
    }

    /// Parse a raw level value; only 1, 2 and 3 are valid.
    pub fn from_level(value: u8) -> Option<Self> {
        match value {
            1 => Some(IntensityLevel::Low),
            2 => Some(IntensityLevel::Medium),
            3 => Some(IntensityLevel::High),
            _ => None,
        }
    }
}

/// Which edge of the surface a vent sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VentSide {
    Left,
    Right,
}

/// Independent on/off state of the two edge vents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VentState {
    pub left: bool,
    pub right: bool,
}

impl VentState {
    /// Whether the vent on the given side is active.
    pub fn is_on(self, side: VentSide) -> bool {
        match side {
            VentSide::Left => self.left,
            VentSide::Right => self.right,
        }
    }

    /// Switch the vent on the given side on or off.
    pub fn set(&mut self, side: VentSide, on: bool) {
        match side {
            VentSide::Left => self.left = on,
            VentSide::Right => self.right = on,
        }
    }
}
