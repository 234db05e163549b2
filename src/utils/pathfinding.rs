//! # Grid Pathfinding
//!
//! Single-step pathfinding over the realized tile grid, used for enemy
//! movement. This works on tiles, not on the room graph.

use crate::{Direction, Position};
use pathfinding::prelude::bfs;

/// Full 4-connected shortest path from `from` to `target`, both included.
///
/// `is_walkable` decides which cells may be entered; it must return `false`
/// outside the grid so the search stays bounded. The search ends as soon as
/// the target is generated as a successor.
pub fn grid_path<F>(from: Position, target: Position, is_walkable: F) -> Option<Vec<Position>>
where
    F: Fn(Position) -> bool,
{
    bfs(
        &from,
        |&cell| {
            Direction::cardinal()
                .into_iter()
                .map(move |direction| cell + direction.to_delta())
                .filter(|&next| is_walkable(next))
                .collect::<Vec<_>>()
        },
        |&cell| cell == target,
    )
}

/// The cell one step along a shortest path from `from` toward `target`.
///
/// Returns `from` unchanged when already at the target or when no path
/// exists; callers treat that as "stay in place".
///
/// # Examples
///
/// ```
/// use delve::{next_step_toward, Position};
///
/// let open = |pos: Position| (0..10).contains(&pos.x) && (0..10).contains(&pos.y);
/// let step = next_step_toward(Position::new(5, 5), Position::new(5, 1), open);
/// assert_eq!(step, Position::new(5, 4));
/// ```
pub fn next_step_toward<F>(from: Position, target: Position, is_walkable: F) -> Position
where
    F: Fn(Position) -> bool,
{
    if from == target {
        return from;
    }

    grid_path(from, target, is_walkable)
        .and_then(|path| path.get(1).copied())
        .unwrap_or(from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn open_grid(width: i32, height: i32) -> impl Fn(Position) -> bool {
        move |pos: Position| pos.x >= 0 && pos.y >= 0 && pos.x < width && pos.y < height
    }

    #[test]
    fn test_coincident_cells_do_not_move() {
        let pos = Position::new(3, 3);
        assert_eq!(next_step_toward(pos, pos, open_grid(10, 10)), pos);
    }

    #[test]
    fn test_straight_line_step() {
        let step = next_step_toward(Position::new(5, 5), Position::new(5, 1), open_grid(10, 10));
        assert_eq!(step, Position::new(5, 4));

        let step = next_step_toward(Position::new(1, 1), Position::new(8, 1), open_grid(10, 10));
        assert_eq!(step, Position::new(2, 1));
    }

    #[test]
    fn test_routes_around_wall() {
        // Vertical wall at x == 3 with a gap at y == 8
        let walls: HashSet<Position> = (0..8).map(|y| Position::new(3, y)).collect();
        let grid = open_grid(10, 10);
        let walkable = |pos: Position| grid(pos) && !walls.contains(&pos);

        let path = grid_path(Position::new(1, 1), Position::new(5, 1), &walkable)
            .expect("a path through the gap exists");
        assert!(path.contains(&Position::new(3, 8)));
        assert_eq!(path.first(), Some(&Position::new(1, 1)));
        assert_eq!(path.last(), Some(&Position::new(5, 1)));

        let step = next_step_toward(Position::new(1, 1), Position::new(5, 1), &walkable);
        assert!(walkable(step));
        assert_eq!(step.manhattan_distance(Position::new(1, 1)), 1);
    }

    #[test]
    fn test_unreachable_target_stays_in_place() {
        let walls: HashSet<Position> = (0..10).map(|y| Position::new(3, y)).collect();
        let grid = open_grid(10, 10);
        let walkable = |pos: Position| grid(pos) && !walls.contains(&pos);

        let from = Position::new(1, 1);
        assert_eq!(next_step_toward(from, Position::new(5, 1), walkable), from);
    }

    #[test]
    fn test_non_walkable_target_is_never_reached() {
        let from = Position::new(0, 0);
        let walkable = |pos: Position| open_grid(4, 4)(pos) && pos != Position::new(2, 2);
        assert_eq!(next_step_toward(from, Position::new(2, 2), walkable), from);
    }
}
