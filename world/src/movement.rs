//! Shared movement resolution with axis-fallback sliding.

use maze_escape_core::{Footprint, Position};

use crate::collision::TileCollisionMap;

/// Candidate that a resolution settled on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// The full displacement was accepted.
    Full,
    /// Only the horizontal component was accepted.
    SlideX,
    /// Only the vertical component was accepted.
    SlideY,
    /// Every candidate was blocked; the entity stays put.
    Blocked,
}

/// Result of resolving a requested displacement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    /// Position the entity ends up at.
    pub position: Position,
    /// Candidate that produced the position.
    pub outcome: MoveOutcome,
}

/// Stateless resolver turning desired displacements into legal ones.
///
/// Candidates are tried in a fixed order: the full displacement, then the
/// x component alone, then the y component alone. Trying x before y makes
/// entities slide along vertical walls first at concave corners. An axis with
/// zero displacement is not a candidate of its own since it would only
/// repeat the starting position. Non-finite components count as zero.
#[derive(Clone, Copy, Debug)]
pub struct MovementResolver<'map> {
    map: &'map TileCollisionMap,
    footprint: Footprint,
}

impl<'map> MovementResolver<'map> {
    /// Creates a resolver for entities of the provided footprint.
    #[must_use]
    pub const fn new(map: &'map TileCollisionMap, footprint: Footprint) -> Self {
        Self { map, footprint }
    }

    /// Resolves a displacement, reporting which candidate was accepted.
    #[must_use]
    pub fn resolve(&self, current: Position, dx: f32, dy: f32) -> Resolution {
        let (dx, dy) = (finite_or_zero(dx), finite_or_zero(dy));
        let full = current.offset(dx, dy);
        if self.is_open(full) {
            return Resolution {
                position: full,
                outcome: MoveOutcome::Full,
            };
        }

        if dx != 0.0 {
            let along_x = current.offset(dx, 0.0);
            if self.is_open(along_x) {
                return Resolution {
                    position: along_x,
                    outcome: MoveOutcome::SlideX,
                };
            }
        }

        if dy != 0.0 {
            let along_y = current.offset(0.0, dy);
            if self.is_open(along_y) {
                return Resolution {
                    position: along_y,
                    outcome: MoveOutcome::SlideY,
                };
            }
        }

        Resolution {
            position: current,
            outcome: MoveOutcome::Blocked,
        }
    }

    /// Returns the position reached after attempting the displacement.
    #[must_use]
    pub fn attempt_move(&self, current: Position, dx: f32, dy: f32) -> Position {
        self.resolve(current, dx, dy).position
    }

    /// Resolves a move along `direction` scaled by `speed`.
    #[must_use]
    pub fn step(&self, current: Position, (dx, dy): (f32, f32), speed: f32) -> Resolution {
        self.resolve(current, dx * speed, dy * speed)
    }

    fn is_open(&self, candidate: Position) -> bool {
        !self.map.is_blocked(candidate, self.footprint)
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_escape_core::{Layer, Tile, TileGrid, TileLayer, ENTITY_FOOTPRINT};

    fn map_with_walls(columns: u32, rows: u32, walls: &[(u32, u32)]) -> TileCollisionMap {
        let mut cells = vec![None; (columns * rows) as usize];
        for &(column, row) in walls {
            cells[(row * columns + column) as usize] = Some(Tile::new(1, true));
        }
        let layer =
            TileLayer::new("walls", (columns, rows), (16.0, 16.0), cells).expect("valid layer");
        TileCollisionMap::new(TileGrid::new(vec![Layer::Tiles(layer)]))
    }

    #[test]
    fn unobstructed_diagonal_is_accepted_whole() {
        let map = map_with_walls(6, 6, &[]);
        let resolver = MovementResolver::new(&map, ENTITY_FOOTPRINT);

        let resolution = resolver.resolve(Position::new(20.0, 20.0), 1.5, -1.0);

        assert_eq!(resolution.outcome, MoveOutcome::Full);
        assert_eq!(resolution.position, Position::new(21.5, 19.0));
    }

    #[test]
    fn concave_corner_slides_along_x_first() {
        // Wall tile directly up-right of the entity; both single-axis moves are open.
        let map = map_with_walls(6, 6, &[(2, 2)]);
        let resolver = MovementResolver::new(&map, ENTITY_FOOTPRINT);
        let start = Position::new(16.0, 16.0);

        let resolution = resolver.resolve(start, 8.0, 8.0);

        assert!(map.is_blocked(Position::new(24.0, 24.0), ENTITY_FOOTPRINT));
        assert!(!map.is_blocked(Position::new(24.0, 16.0), ENTITY_FOOTPRINT));
        assert!(!map.is_blocked(Position::new(16.0, 24.0), ENTITY_FOOTPRINT));
        assert_eq!(resolution.outcome, MoveOutcome::SlideX);
        assert_eq!(resolution.position, Position::new(24.0, 16.0));
    }

    #[test]
    fn falls_back_to_y_when_x_is_blocked() {
        let map = map_with_walls(6, 6, &[(2, 1), (2, 2)]);
        let resolver = MovementResolver::new(&map, ENTITY_FOOTPRINT);

        let resolution = resolver.resolve(Position::new(16.0, 16.0), 8.0, -8.0);

        assert_eq!(resolution.outcome, MoveOutcome::SlideY);
        assert_eq!(resolution.position, Position::new(16.0, 8.0));
    }

    #[test]
    fn fully_enclosed_move_is_a_no_op() {
        let map = map_with_walls(6, 6, &[(2, 1), (1, 2), (2, 2)]);
        let resolver = MovementResolver::new(&map, ENTITY_FOOTPRINT);
        let start = Position::new(16.0, 16.0);

        let resolution = resolver.resolve(start, 8.0, 8.0);

        assert_eq!(resolution.outcome, MoveOutcome::Blocked);
        assert_eq!(resolution.position, start);
        assert_eq!(resolver.attempt_move(start, 8.0, 8.0), start);
    }

    #[test]
    fn blocked_single_axis_move_reports_blocked() {
        let map = map_with_walls(6, 6, &[(2, 1)]);
        let resolver = MovementResolver::new(&map, ENTITY_FOOTPRINT);
        let start = Position::new(16.0, 16.0);

        let resolution = resolver.step(start, (1.0, 0.0), 8.0);

        assert_eq!(resolution.outcome, MoveOutcome::Blocked);
        assert_eq!(resolution.position, start);
    }

    #[test]
    fn accepted_positions_are_never_blocked() {
        let map = map_with_walls(8, 8, &[(3, 3), (3, 4), (4, 3), (6, 1), (1, 6)]);
        let resolver = MovementResolver::new(&map, ENTITY_FOOTPRINT);
        let displacements = [-9.0, -4.5, -1.0, 0.0, 0.7, 2.0, 8.0, 12.5];

        for x in (0..112).step_by(5) {
            for y in (0..112).step_by(5) {
                let start = Position::new(x as f32, y as f32);
                if map.is_blocked(start, ENTITY_FOOTPRINT) {
                    continue;
                }
                for &dx in &displacements {
                    for &dy in &displacements {
                        let end = resolver.attempt_move(start, dx, dy);
                        assert!(
                            !map.is_blocked(end, ENTITY_FOOTPRINT),
                            "move from {start:?} by ({dx}, {dy}) landed in a wall at {end:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn non_finite_components_are_dropped() {
        let map = map_with_walls(6, 6, &[]);
        let resolver = MovementResolver::new(&map, ENTITY_FOOTPRINT);
        let start = Position::new(16.0, 16.0);

        let resolution = resolver.resolve(start, f32::NAN, 2.0);
        assert_eq!(resolution.outcome, MoveOutcome::Full);
        assert_eq!(resolution.position, Position::new(16.0, 18.0));

        assert_eq!(resolver.attempt_move(start, f32::INFINITY, f32::NAN), start);
        assert_eq!(
            resolver.step(start, (f32::NAN, 1.0), f32::INFINITY).position,
            start
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let map = map_with_walls(6, 6, &[(2, 2)]);
        let resolver = MovementResolver::new(&map, ENTITY_FOOTPRINT);
        let start = Position::new(16.0, 16.0);

        let first = resolver.resolve(start, 8.0, 8.0);
        let second = resolver.resolve(start, 8.0, 8.0);

        assert_eq!(first, second);
    }
}
