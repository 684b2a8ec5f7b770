//! Smoke particles: spawn, buoyant rise, collision, deposit, fade
//!
//! Individual smoke puffs exist only between the fire and the ceiling. They
//! rise under buoyancy with random turbulence, bounce off the interior wall,
//! get pulled toward active vents, and on reaching the ceiling band convert
//! into a thickness deposit in the smoke layer field. That deposit is the
//! sole transfer path from the particle representation to the layer
//! representation of smoke.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core_types::{IntensityLevel, Speed, Vec2, VentState};
use crate::layer::SmokeLayerField;
use crate::obstruction::Obstruction;

/// Batch-size constant: particles per tick per unit of (level x intensity).
const SPAWN_RATE_FACTOR: f32 = 2.0;

/// Fire intensity saturates at this value in the spawn formula.
const SPAWN_INTENSITY_CAP: f32 = 5.0;

/// Horizontal spawn jitter around the fire origin.
const SPAWN_JITTER: f32 = 6.0;

/// Particles start this far above the floor.
const NEAR_FLOOR_OFFSET: f32 = 12.0;

/// Base upward speed plus gain per intensity level.
const BASE_RISE: f32 = 2.0;
const RISE_PER_LEVEL: f32 = 1.0;

/// Per-tick zero-mean turbulence amplitudes.
const TURBULENCE_X: f32 = 0.08;
const TURBULENCE_Y: f32 = 0.1;

/// Horizontal velocity damping applied on wall reflection.
const REFLECT_DAMPING: f32 = 0.5;

/// Vent influence distance from the surface edge.
const VENT_RANGE: f32 = 70.0;

/// Attraction strength toward an active vent's corner.
const VENT_PULL: f32 = 0.002;

/// Extra opacity loss per tick while inside an active vent's range.
const VENT_FADE: f32 = 0.02;

/// Particles above this height deposit into the layer and disappear.
const CEILING_BAND: f32 = 16.0;

/// Thickness units deposited per particle reaching the ceiling.
const DEPOSIT_AMOUNT: f32 = 2.5;

/// Natural opacity loss per tick at 1x speed.
const FADE_RATE: f32 = 0.003;

/// A single smoke puff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) radius: f32,
    pub(crate) opacity: f32,
}

impl Particle {
    /// Position in surface coordinates (y grows downward).
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Velocity in surface units per tick.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Draw radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Opacity in [0, 1]; the particle is culled when it reaches 0.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

/// Owner of all live smoke particles.
///
/// Particles are exclusively held here and never aliased; rendering reads the
/// slice returned by [`ParticleSystem::particles`] between ticks.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        ParticleSystem::default()
    }

    /// Read-only view of the live particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    pub fn count(&self) -> usize {
        self.particles.len()
    }

    /// Remove every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Spawn this tick's batch of particles at the fire origin.
    ///
    /// Batch size is `floor(2 * level * min(intensity, 5) * speed)`, so spawn
    /// cost saturates even though fire intensity itself is unbounded. Each
    /// particle starts near the floor with a small random horizontal drift
    /// and an upward speed that grows with the intensity level.
    pub fn spawn(
        &mut self,
        level: IntensityLevel,
        fire_intensity: f32,
        origin_x: f32,
        surface_height: f32,
        speed: Speed,
    ) {
        let batch = (SPAWN_RATE_FACTOR
            * level.factor()
            * fire_intensity.min(SPAWN_INTENSITY_CAP)
            * speed.factor()) as usize;

        let mut rng = rand::rng();
        for _ in 0..batch {
            let rise = BASE_RISE + RISE_PER_LEVEL * level.factor() + rng.random_range(0.0..0.4);
            self.particles.push(Particle {
                position: Vec2::new(
                    origin_x + rng.random_range(-SPAWN_JITTER..SPAWN_JITTER),
                    surface_height - NEAR_FLOOR_OFFSET,
                ),
                velocity: Vec2::new(rng.random_range(-0.2..0.2), -rise),
                radius: rng.random_range(2.0..5.0),
                opacity: 0.7,
            });
        }
    }

    /// Advance every particle by one tick.
    ///
    /// Per particle, in order: turbulence, vent suction, Euler integration,
    /// wall collision, ceiling deposit, natural fade. Particle updates are
    /// independent; the shared layer deposit is commutative, so iteration
    /// order does not matter. Survivors are retained into a fresh collection
    /// rather than removed mid-iteration.
    #[allow(clippy::too_many_arguments)]
    pub fn advance(
        &mut self,
        surface_width: f32,
        surface_height: f32,
        obstruction: &Obstruction,
        door_open: bool,
        vents: VentState,
        speed: Speed,
        layer: &mut SmokeLayerField,
    ) {
        let dt = speed.factor();
        let mut rng = rand::rng();
        let mut survivors = Vec::with_capacity(self.particles.len());

        for mut p in self.particles.drain(..) {
            // 1. Buoyant instability: zero-mean velocity jitter.
            p.velocity.x += rng.random_range(-TURBULENCE_X..TURBULENCE_X);
            p.velocity.y += rng.random_range(-TURBULENCE_Y..TURBULENCE_Y);

            // 2. Vent suction: pull toward the vent corner, proportional to
            //    distance, with accelerated fade-out.
            if vents.left && p.position.x < VENT_RANGE {
                p.velocity.x -= p.position.x * VENT_PULL;
                p.velocity.y -= p.position.y * VENT_PULL;
                p.opacity -= VENT_FADE;
            }
            if vents.right && p.position.x > surface_width - VENT_RANGE {
                p.velocity.x += (surface_width - p.position.x) * VENT_PULL;
                p.velocity.y -= p.position.y * VENT_PULL;
                p.opacity -= VENT_FADE;
            }

            // 3. Integrate (explicit Euler, one tick = one step).
            let approached_from_left = p.position.x < obstruction.wall_x();
            p.position += p.velocity * dt;

            // 4. Wall collision: reflect with damping and clamp back outside
            //    the band on the approach side. Applied after integration so
            //    a tick never ends with a blocked particle inside the band.
            if obstruction.blocks_particle(p.position.x, p.position.y, surface_height, door_open) {
                p.velocity.x *= -REFLECT_DAMPING;
                p.position.x = obstruction.clamp_outside(approached_from_left);
            }

            // 5. Ceiling deposit: stratify into the layer and remove.
            if p.position.y < CEILING_BAND {
                let column = p.position.x.round();
                if column >= 0.0 {
                    layer.deposit_at(column as usize, DEPOSIT_AMOUNT);
                }
                continue;
            }

            // 6. Natural fade and bounds cull.
            p.opacity -= FADE_RATE * dt;
            let out_of_bounds = p.position.x < 0.0
                || p.position.x > surface_width
                || p.position.y > surface_height;
            if p.opacity <= 0.0 || out_of_bounds {
                continue;
            }
            survivors.push(p);
        }

        self.particles = survivors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance_once(
        system: &mut ParticleSystem,
        door_open: bool,
        vents: VentState,
        layer: &mut SmokeLayerField,
    ) {
        let wall = Obstruction::new(200.0);
        system.advance(400.0, 400.0, &wall, door_open, vents, Speed::Normal, layer);
    }

    #[test]
    fn test_spawn_batch_size_formula() {
        let mut system = ParticleSystem::new();
        system.spawn(IntensityLevel::Low, 1.0, 50.0, 400.0, Speed::Normal);
        assert_eq!(system.count(), 2);

        system.clear();
        system.spawn(IntensityLevel::High, 2.0, 50.0, 400.0, Speed::Double);
        assert_eq!(system.count(), 24);

        // Fire intensity saturates at 5 in the spawn formula.
        system.clear();
        system.spawn(IntensityLevel::Low, 50.0, 50.0, 400.0, Speed::Normal);
        assert_eq!(system.count(), 10);
    }

    #[test]
    fn test_spawned_particles_rise_from_near_the_floor() {
        let mut system = ParticleSystem::new();
        system.spawn(IntensityLevel::Medium, 1.0, 50.0, 400.0, Speed::Normal);
        for p in system.particles() {
            assert_eq!(p.position().y, 400.0 - NEAR_FLOOR_OFFSET);
            assert!((p.position().x - 50.0).abs() < SPAWN_JITTER);
            assert!(p.velocity().y < 0.0, "smoke rises (negative y velocity)");
            assert_eq!(p.opacity(), 0.7);
            assert!(p.radius() >= 2.0 && p.radius() < 5.0);
        }
    }

    #[test]
    fn test_higher_level_means_stronger_buoyancy() {
        let mut low = ParticleSystem::new();
        low.spawn(IntensityLevel::Low, 1.0, 50.0, 400.0, Speed::Normal);
        let mut high = ParticleSystem::new();
        high.spawn(IntensityLevel::High, 1.0, 50.0, 400.0, Speed::Normal);

        let slowest_high = high
            .particles()
            .iter()
            .map(|p| -p.velocity().y)
            .fold(f32::INFINITY, f32::min);
        let fastest_low = low
            .particles()
            .iter()
            .map(|p| -p.velocity().y)
            .fold(0.0, f32::max);
        assert!(slowest_high > fastest_low);
    }

    #[test]
    fn test_closed_door_keeps_particles_out_of_the_band() {
        let wall = Obstruction::new(200.0);
        let mut layer = SmokeLayerField::new(400);
        let mut system = ParticleSystem::new();
        // Stream of particles pushed hard at the wall from the left.
        for _ in 0..50 {
            system.particles.push(Particle {
                position: Vec2::new(190.0, 200.0),
                velocity: Vec2::new(8.0, 0.0),
                radius: 3.0,
                opacity: 0.7,
            });
            system.advance(400.0, 400.0, &wall, false, VentState::default(), Speed::Normal, &mut layer);
            for p in system.particles() {
                assert!(
                    !wall.in_band(p.position().x),
                    "particle ended a tick inside the wall band at x={}",
                    p.position().x
                );
            }
        }
    }

    #[test]
    fn test_ceiling_deposit_transfers_to_the_layer() {
        let mut layer = SmokeLayerField::new(400);
        let mut system = ParticleSystem::new();
        system.particles.push(Particle {
            position: Vec2::new(120.0, CEILING_BAND + 1.0),
            velocity: Vec2::new(0.0, -3.0),
            radius: 3.0,
            opacity: 0.7,
        });
        advance_once(&mut system, false, VentState::default(), &mut layer);

        assert_eq!(system.count(), 0, "depositing particle is removed");
        let deposited: f32 = layer.columns().iter().sum();
        assert_eq!(deposited, DEPOSIT_AMOUNT);
    }

    #[test]
    fn test_deposit_outside_bounds_is_dropped() {
        let mut layer = SmokeLayerField::new(100);
        let mut system = ParticleSystem::new();
        system.particles.push(Particle {
            position: Vec2::new(350.0, CEILING_BAND + 1.0),
            velocity: Vec2::new(0.0, -3.0),
            radius: 3.0,
            opacity: 0.7,
        });
        advance_once(&mut system, false, VentState::default(), &mut layer);
        assert_eq!(system.count(), 0);
        assert!(layer.columns().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_vent_suction_fades_particles_faster() {
        let vents = VentState { left: true, right: false };
        let mut vented = ParticleSystem::new();
        vented.particles.push(Particle {
            position: Vec2::new(30.0, 200.0),
            velocity: Vec2::zeros(),
            radius: 3.0,
            opacity: 0.7,
        });
        let mut layer = SmokeLayerField::new(400);
        advance_once(&mut vented, false, vents, &mut layer);
        let vented_opacity = vented.particles()[0].opacity();

        let mut calm = ParticleSystem::new();
        calm.particles.push(Particle {
            position: Vec2::new(30.0, 200.0),
            velocity: Vec2::zeros(),
            radius: 3.0,
            opacity: 0.7,
        });
        advance_once(&mut calm, false, VentState::default(), &mut layer);
        let calm_opacity = calm.particles()[0].opacity();

        assert!(vented_opacity < calm_opacity);
    }

    #[test]
    fn test_faded_particles_are_culled() {
        let mut layer = SmokeLayerField::new(400);
        let mut system = ParticleSystem::new();
        system.particles.push(Particle {
            position: Vec2::new(100.0, 200.0),
            velocity: Vec2::zeros(),
            radius: 3.0,
            opacity: 0.001,
        });
        advance_once(&mut system, false, VentState::default(), &mut layer);
        assert_eq!(system.count(), 0);
    }
}
