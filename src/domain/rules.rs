/// Frog movement rules.
///
/// Pure functions operating on the grid and the frog: they say what is
/// legal without performing the step.
///
/// ## Step truth table
/// ┌──────────────────────────┬────────┐
/// │ Condition                 │ Allow? │
/// ├──────────────────────────┼────────┤
/// │ Neighbour is an obstacle  │ DENY   │
/// │ Target outside play field │ DENY   │
/// │ Frog is riding a car      │ DENY   │ (input dismounts instead)
/// │ Frog awaits pickup        │ DENY   │
/// │ Otherwise                 │ ALLOW  │
/// └──────────────────────────┴────────┘
///
/// Debounce is a timing concern and lives in the step function.

use super::entity::{Frog, MoveDir, Permits};
use super::grid::Grid;

/// Permissions from the four cells around (row, col).
pub fn permits_at(grid: &Grid, row: usize, col: usize) -> Permits {
    Permits {
        up: !grid.tile_at(row.wrapping_sub(1), col).blocks_frog(),
        down: !grid.tile_at(row + 1, col).blocks_frog(),
        left: !grid.tile_at(row, col.wrapping_sub(1)).blocks_frog(),
        right: !grid.tile_at(row, col + 1).blocks_frog(),
    }
}

/// Cell one step away in `dir`, if it stays in the play field.
pub fn neighbour(grid: &Grid, row: usize, col: usize, dir: MoveDir) -> Option<(usize, usize)> {
    let (r, c) = match dir {
        MoveDir::Up => (row.checked_sub(1)?, col),
        MoveDir::Down => (row + 1, col),
        MoveDir::Left => (row, col.checked_sub(1)?),
        MoveDir::Right => (row, col + 1),
    };
    grid.in_play(r, c).then_some((r, c))
}

/// Where a step in `dir` would take the frog, or `None` if the step is refused.
/// Uses the frog's recorded permits, so call after they were refreshed.
pub fn step_target(grid: &Grid, frog: &Frog, dir: MoveDir) -> Option<(usize, usize)> {
    if frog.riding.is_some() || frog.awaiting { return None; }
    if !frog.permits.allows(dir) { return None; }
    neighbour(grid, frog.row, frog.col, dir)
}

/// May a riding frog get off where it currently is?
pub fn can_dismount(grid: &Grid, frog: &Frog) -> bool {
    frog.riding.is_some() && grid.tile_at(frog.row, frog.col).is_safe_ground()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::{MAX_CARS, SCREEN_WIDTH};

    fn grid_with(obstacles: &[(usize, usize)]) -> Grid {
        let mut g = Grid::new(MAX_CARS, SCREEN_WIDTH);
        for &(r, c) in obstacles { g.put_obstacle(r, c); }
        g.obstacles_placed = true;
        g
    }

    fn frog_at(grid: &Grid, row: usize, col: usize) -> Frog {
        let mut f = Frog::new(row, col);
        f.permits = permits_at(grid, row, col);
        f
    }

    #[test]
    fn open_ground_allows_all() {
        let g = grid_with(&[]);
        assert_eq!(permits_at(&g, 6, 10), Permits::ALL);
    }

    #[test]
    fn obstacles_block_each_side() {
        //   row 5:  . @ .
        //   row 6:  @ F @      (row 6 is a separator; obstacles sit on 5 and 7)
        //   row 7:  . @ .
        let g = grid_with(&[(5, 10), (7, 10)]);
        let p = permits_at(&g, 6, 10);
        assert!(!p.up);
        assert!(!p.down);
        assert!(p.left && p.right);

        let g = grid_with(&[(5, 9), (5, 11)]);
        let p = permits_at(&g, 5, 10);
        assert!(!p.left);
        assert!(!p.right);
        assert!(p.up && p.down);
    }

    #[test]
    fn blocked_step_is_refused() {
        let g = grid_with(&[(5, 10)]);
        let frog = frog_at(&g, 6, 10);
        assert_eq!(step_target(&g, &frog, MoveDir::Up), None);
        assert_eq!(step_target(&g, &frog, MoveDir::Down), Some((7, 10)));
    }

    #[test]
    fn field_edges_refuse_steps() {
        let g = grid_with(&[]);
        let frog = frog_at(&g, 13, 1);
        assert_eq!(step_target(&g, &frog, MoveDir::Down), None);
        assert_eq!(step_target(&g, &frog, MoveDir::Left), None);
        let frog = frog_at(&g, 1, 39);
        assert_eq!(step_target(&g, &frog, MoveDir::Up), None);
        assert_eq!(step_target(&g, &frog, MoveDir::Right), None);
    }

    #[test]
    fn riding_or_awaiting_refuses_steps() {
        let g = grid_with(&[]);
        let mut frog = frog_at(&g, 6, 10);
        frog.riding = Some(0);
        assert_eq!(step_target(&g, &frog, MoveDir::Up), None);
        frog.riding = None;
        frog.awaiting = true;
        assert_eq!(step_target(&g, &frog, MoveDir::Up), None);
    }

    #[test]
    fn dismount_only_on_safe_ground() {
        let g = grid_with(&[(5, 10)]);
        let mut frog = Frog::new(5, 10);
        frog.riding = Some(1);
        assert!(!can_dismount(&g, &frog));
        frog.col = 12;
        assert!(can_dismount(&g, &frog));
        frog.riding = None;
        assert!(!can_dismount(&g, &frog));
    }
}
