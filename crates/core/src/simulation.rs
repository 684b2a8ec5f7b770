//! Simulation aggregate and tick sequencing
//!
//! `SmokeSimulation` owns every piece of mutable simulation state: the fire,
//! the particle system, the smoke layer field, the wall geometry, and the
//! control flags. Nothing is ambient; a tick's effects are fully traceable
//! through this one struct.
//!
//! The update is cooperative and tick-driven. The driver calls [`tick`] on a
//! fixed wall-clock period ([`TICK_PERIOD`]); the speed multiplier scales the
//! per-tick physics magnitudes and the reported elapsed time, never the tick
//! rate. `tick` is a plain synchronous call with no rendering side effects,
//! so it is directly testable; renderers read the state between ticks.
//!
//! [`tick`]: SmokeSimulation::tick

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core_types::{IntensityLevel, Speed, VentSide, VentState};
use crate::fire::FireSource;
use crate::layer::SmokeLayerField;
use crate::obstruction::Obstruction;
use crate::particle::{Particle, ParticleSystem};

/// Fixed wall-clock period between ticks. Pacing is the driver's job; the
/// core only sequences what happens inside a tick.
pub const TICK_PERIOD: Duration = Duration::from_millis(50);

/// One thickness unit of the layer corresponds to `1 / LAYER_DEPTH_SCALE`
/// real-world length units of smoke depth.
const LAYER_DEPTH_SCALE: f32 = 0.2;

/// The complete two-zone smoke simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokeSimulation {
    surface_width: f32,
    surface_height: f32,

    elapsed: f32,
    running: bool,
    speed: Speed,
    intensity_level: IntensityLevel,
    vents: VentState,
    door_open: bool,
    crouching: bool,

    fire: FireSource,
    particles: ParticleSystem,
    layer: SmokeLayerField,
    obstruction: Obstruction,
}

impl SmokeSimulation {
    /// Create a simulation for a surface of the given size: layer width in
    /// columns matches the surface width, the wall sits at the midpoint, the
    /// fire defaults to the centre of the left zone. Created paused at
    /// time 0.
    pub fn new(surface_width: f32, surface_height: f32) -> Self {
        info!(
            "Creating smoke simulation, surface {:.0}x{:.0}",
            surface_width, surface_height
        );
        SmokeSimulation {
            surface_width,
            surface_height,
            elapsed: 0.0,
            running: false,
            speed: Speed::default(),
            intensity_level: IntensityLevel::default(),
            vents: VentState::default(),
            door_open: false,
            crouching: false,
            fire: FireSource::new(surface_width / 4.0),
            particles: ParticleSystem::new(),
            layer: SmokeLayerField::new(surface_width.max(0.0) as usize),
            obstruction: Obstruction::new(surface_width / 2.0),
        }
    }

    /// (Re)initialize for a new surface size, e.g. after a resize: the layer
    /// is re-zeroed at the new width, the wall returns to the midpoint and
    /// the fire to its default position. Live particles are kept; out-of-
    /// bounds ones are culled on the next tick.
    pub fn configure(&mut self, surface_width: f32, surface_height: f32) {
        info!(
            "Configuring surface {:.0}x{:.0}",
            surface_width, surface_height
        );
        self.surface_width = surface_width;
        self.surface_height = surface_height;
        self.layer = SmokeLayerField::new(surface_width.max(0.0) as usize);
        self.obstruction = Obstruction::new(surface_width / 2.0);
        self.fire.set_position(surface_width / 4.0);
    }

    /// Begin (or resume) running. Ticks are no-ops until this is called.
    pub fn start(&mut self) {
        info!("Simulation started");
        self.running = true;
    }

    /// Return every owned entity to its initial state: particles cleared,
    /// field zeroed, fire intensity back to 1.0, vents and door closed,
    /// crouch off, speed 1x, elapsed time 0, paused. Idempotent and safe to
    /// call whether or not the simulation is running. The fire position and
    /// selected intensity level survive, as part of the scenario setup.
    pub fn reset(&mut self) {
        info!("Simulation reset");
        self.elapsed = 0.0;
        self.running = false;
        self.speed = Speed::default();
        self.vents = VentState::default();
        self.door_open = false;
        self.crouching = false;
        self.fire.reset();
        self.particles.clear();
        self.layer.reset();
    }

    /// Advance the simulation by one tick: grow the fire, spawn a particle
    /// batch, advance all particles (depositing into the layer at the
    /// ceiling), then step the layer field. A no-op while paused.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        self.elapsed += self.speed.factor();

        self.fire.grow(self.speed);

        self.particles.spawn(
            self.intensity_level,
            self.fire.intensity(),
            self.fire.position(),
            self.surface_height,
            self.speed,
        );

        self.particles.advance(
            self.surface_width,
            self.surface_height,
            &self.obstruction,
            self.door_open,
            self.vents,
            self.speed,
            &mut self.layer,
        );

        self.layer.step(
            &self.obstruction,
            self.door_open,
            self.vents,
            self.elapsed,
            self.speed,
        );

        debug!(
            "Tick: t={:.0}, particles={}, layer max={:.2}",
            self.elapsed,
            self.particles.count(),
            self.layer.max_thickness()
        );
    }

    // ====== Control setters (observed by the next tick) ======

    /// Move the fire emitter to a new horizontal position.
    pub fn set_fire_origin(&mut self, x: f32) {
        self.fire.set_position(x);
    }

    /// Select the fire intensity level.
    pub fn set_intensity_level(&mut self, level: IntensityLevel) {
        self.intensity_level = level;
    }

    /// Open or close the door in the interior wall.
    pub fn set_door_open(&mut self, open: bool) {
        self.door_open = open;
    }

    /// Switch the vent on the given side on or off.
    pub fn set_vent(&mut self, side: VentSide, on: bool) {
        self.vents.set(side, on);
    }

    /// Set the speed multiplier.
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Cycle the speed multiplier (1x -> 2x -> 4x -> 1x).
    pub fn cycle_speed(&mut self) {
        self.speed = self.speed.next();
    }

    /// Record whether the observer is crouching. Renderer-facing state only;
    /// the physics ignore it.
    pub fn set_crouch(&mut self, crouching: bool) {
        self.crouching = crouching;
    }

    // ====== Read accessors ======

    /// Elapsed simulated time in ticks, scaled by the speed multiplier.
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed
    }

    /// Whether the simulation is currently running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current speed multiplier.
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Selected fire intensity level.
    pub fn intensity_level(&self) -> IntensityLevel {
        self.intensity_level
    }

    /// Current vent state.
    pub fn vents(&self) -> VentState {
        self.vents
    }

    /// Whether the door is open.
    pub fn door_open(&self) -> bool {
        self.door_open
    }

    /// Whether the observer is crouching.
    pub fn is_crouching(&self) -> bool {
        self.crouching
    }

    /// The fire source.
    pub fn fire(&self) -> &FireSource {
        &self.fire
    }

    /// The wall-with-door geometry.
    pub fn obstruction(&self) -> &Obstruction {
        &self.obstruction
    }

    /// Read-only snapshot of the live particles.
    pub fn particles(&self) -> &[Particle] {
        self.particles.particles()
    }

    /// Number of live particles.
    pub fn particle_count(&self) -> usize {
        self.particles.count()
    }

    /// The smoke layer field.
    pub fn layer(&self) -> &SmokeLayerField {
        &self.layer
    }

    /// Maximum smoke-layer thickness converted to real-world smoke depth.
    pub fn smoke_depth(&self) -> f32 {
        self.layer.max_thickness() / LAYER_DEPTH_SCALE
    }

    /// Maximum layer thickness left and right of the wall, for the two-zone
    /// display.
    pub fn zone_maxima(&self) -> (f32, f32) {
        let wall = self.obstruction.wall_column();
        let left = self.layer.max_in(0, wall);
        let right = self.layer.max_in(wall + 1, self.layer.len());
        (left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_paused_at_time_zero() {
        let sim = SmokeSimulation::new(400.0, 400.0);
        assert!(!sim.is_running());
        assert_eq!(sim.elapsed_time(), 0.0);
        assert_eq!(sim.particle_count(), 0);
        assert_eq!(sim.layer().len(), 400);
        assert_eq!(sim.fire().intensity(), 1.0);
    }

    #[test]
    fn test_tick_is_a_noop_while_paused() {
        let mut sim = SmokeSimulation::new(400.0, 400.0);
        sim.tick();
        assert_eq!(sim.elapsed_time(), 0.0);
        assert_eq!(sim.particle_count(), 0);
    }

    #[test]
    fn test_elapsed_time_scales_with_speed() {
        let mut sim = SmokeSimulation::new(400.0, 400.0);
        sim.start();
        sim.set_speed(Speed::Quadruple);
        for _ in 0..10 {
            sim.tick();
        }
        assert_eq!(sim.elapsed_time(), 40.0);
    }

    #[test]
    fn test_running_tick_spawns_and_advances() {
        let mut sim = SmokeSimulation::new(400.0, 400.0);
        sim.start();
        sim.tick();
        assert!(sim.particle_count() > 0);
        assert!(sim.fire().intensity() > 1.0);
    }

    #[test]
    fn test_layer_length_tracks_surface_width() {
        let mut sim = SmokeSimulation::new(400.0, 400.0);
        sim.configure(640.0, 480.0);
        assert_eq!(sim.layer().len(), 640);
        assert!(sim.layer().columns().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_zero_width_surface_is_harmless() {
        let mut sim = SmokeSimulation::new(0.0, 0.0);
        sim.start();
        for _ in 0..10 {
            sim.tick();
        }
        assert!(sim.layer().is_empty());
    }

    #[test]
    fn test_smoke_depth_conversion() {
        let mut sim = SmokeSimulation::new(400.0, 400.0);
        sim.layer.deposit_at(10, 2.0);
        assert_eq!(sim.smoke_depth(), 10.0);
    }

    #[test]
    fn test_crouch_is_state_only() {
        let mut sim = SmokeSimulation::new(400.0, 400.0);
        sim.set_crouch(true);
        assert!(sim.is_crouching());
        sim.start();
        sim.tick();
        assert!(sim.is_crouching());
    }
}
