//! Interior wall with a door opening
//!
//! One wall divides the surface into a left and a right zone. A door of fixed
//! height sits at the bottom of the wall; only its passability changes, never
//! its geometry. The same geometry answers both particle-collision queries
//! (continuous coordinates) and field-blocking queries (column indices), so
//! the two representations of smoke agree on where the wall is.
//!
//! Passability is control state owned by the simulation aggregate and passed
//! into each query, keeping this type purely geometric.

use serde::{Deserialize, Serialize};

/// Half-width of the collision/blocking band around the wall centre, in
/// surface units.
const WALL_HALF_BAND: f32 = 6.0;

/// Height of the door opening, measured up from the floor.
const DOOR_HEIGHT: f32 = 80.0;

/// Wall-with-door geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstruction {
    wall_x: f32,
}

impl Obstruction {
    /// Create a wall centred at the given horizontal position.
    pub fn new(wall_x: f32) -> Self {
        Obstruction { wall_x }
    }

    /// Horizontal centre of the wall.
    pub fn wall_x(&self) -> f32 {
        self.wall_x
    }

    /// Field column index at the wall centre.
    pub fn wall_column(&self) -> usize {
        self.wall_x.round().max(0.0) as usize
    }

    /// Whether a horizontal position lies inside the wall band.
    pub fn in_band(&self, x: f32) -> bool {
        (x - self.wall_x).abs() < WALL_HALF_BAND
    }

    /// Whether a height lies above the door opening (y grows downward, so
    /// "above" means smaller y than the top of the door band).
    pub fn above_door(&self, y: f32, surface_height: f32) -> bool {
        y < surface_height - DOOR_HEIGHT
    }

    /// Whether a particle at (x, y) is blocked by the wall: inside the band
    /// and either above the door opening or facing a closed door.
    pub fn blocks_particle(&self, x: f32, y: f32, surface_height: f32, door_open: bool) -> bool {
        self.in_band(x) && (self.above_door(y, surface_height) || !door_open)
    }

    /// Position just outside the band on the given side of the wall, used to
    /// push a reflected particle back out.
    pub fn clamp_outside(&self, left_side: bool) -> f32 {
        if left_side {
            self.wall_x - WALL_HALF_BAND
        } else {
            self.wall_x + WALL_HALF_BAND
        }
    }

    /// Whether a field column index falls inside the wall band.
    pub fn column_in_band(&self, column: usize) -> bool {
        (column as f32 - self.wall_x).abs() <= WALL_HALF_BAND
    }

    /// Whether diffusion between two adjacent columns is blocked. The wall is
    /// impermeable while the door is closed: any exchange touching a band
    /// column is suppressed, which leaves the columns just outside the band
    /// exchanging only with their outward neighbour.
    pub fn blocks_exchange(&self, a: usize, b: usize, door_open: bool) -> bool {
        !door_open && (self.column_in_band(a) || self.column_in_band(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_membership() {
        let wall = Obstruction::new(200.0);
        assert!(wall.in_band(200.0));
        assert!(wall.in_band(195.0));
        assert!(!wall.in_band(193.0));
        assert!(!wall.in_band(207.0));
    }

    #[test]
    fn test_door_band_is_at_the_bottom() {
        let wall = Obstruction::new(200.0);
        let surface_height = 400.0;
        // Near the ceiling: above the door.
        assert!(wall.above_door(10.0, surface_height));
        // Near the floor: inside the door band.
        assert!(!wall.above_door(390.0, surface_height));
        assert!(!wall.above_door(surface_height - DOOR_HEIGHT, surface_height));
    }

    #[test]
    fn test_open_door_passes_only_low_particles() {
        let wall = Obstruction::new(200.0);
        let surface_height = 400.0;
        // In band, low, door open: passes.
        assert!(!wall.blocks_particle(200.0, 390.0, surface_height, true));
        // In band, high, door open: solid wall above the opening.
        assert!(wall.blocks_particle(200.0, 50.0, surface_height, true));
        // In band, low, door closed: blocked.
        assert!(wall.blocks_particle(200.0, 390.0, surface_height, false));
        // Out of band: never blocked.
        assert!(!wall.blocks_particle(100.0, 50.0, surface_height, false));
    }

    #[test]
    fn test_exchange_blocking_follows_the_door() {
        let wall = Obstruction::new(200.0);
        // Pair straddling the band edge, door closed: blocked.
        assert!(wall.blocks_exchange(193, 194, false));
        assert!(wall.blocks_exchange(206, 207, false));
        // Same pairs, door open: free.
        assert!(!wall.blocks_exchange(193, 194, true));
        // Pairs far from the wall are never blocked.
        assert!(!wall.blocks_exchange(10, 11, false));
    }

    #[test]
    fn test_clamp_outside_lands_outside_the_band() {
        let wall = Obstruction::new(200.0);
        assert!(!wall.in_band(wall.clamp_outside(true)));
        assert!(!wall.in_band(wall.clamp_outside(false)));
        assert!(wall.clamp_outside(true) < wall.wall_x());
        assert!(wall.clamp_outside(false) > wall.wall_x());
    }
}
