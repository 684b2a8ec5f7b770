//! Smoke Stratification Simulation Core
//!
//! An interactive real-time teaching model of smoke behaviour in a two-zone
//! room: buoyant rise from a growing fire, stratification into a ceiling
//! layer, lateral diffusion, obstruction by an interior wall with a door,
//! and removal by edge vents.
//!
//! This is a stylized teaching model, not a CFD solver. Smoke lives in two
//! representations: discrete particles between the fire and the ceiling, and
//! a 1-D thickness field once it stratifies at the ceiling. The only coupling
//! is the deposit a particle makes when it reaches the ceiling band.
//!
//! The crate is headless: [`SmokeSimulation::tick`] advances one step of the
//! pipeline (fire growth, spawn, particle advance, field step) and has no
//! rendering side effects. Drivers pace ticks at [`TICK_PERIOD`] and read
//! the state between ticks.

pub mod core_types;
pub mod fire;
pub mod layer;
pub mod obstruction;
pub mod particle;
pub mod simulation;

pub use core_types::{IntensityLevel, Speed, Vec2, VentSide, VentState};
pub use fire::FireSource;
pub use layer::SmokeLayerField;
pub use obstruction::Obstruction;
pub use particle::{Particle, ParticleSystem};
pub use simulation::{SmokeSimulation, TICK_PERIOD};
