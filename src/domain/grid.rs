/// Static road layout.
///
/// Row map for the default five lanes (height = 3 × lanes = 15):
///
/// ```text
///  0  =========================================   border
///  1  =_______________________________________=   finish
///  2  =---------------------------------------=   separator
///  3  =         @@@@@                         =   lane 0
///  4  =---------------------------------------=
///  ..
/// 11  =                                       =   lane 4
/// 12  =---------------------------------------=
/// 13  =                   F                   =   start
/// 14  =========================================   border
/// ```
///
/// Borders, separators and the finish row never change. Obstacles are
/// placed once per round by rejection sampling and cleared on reset.

use crate::config::LookConfig;
use crate::rng::RandomSource;
use super::tile::Tile;

pub const MAX_CARS: usize = 5;
pub const SCREEN_WIDTH: usize = 41;
pub const SCREEN_HEIGHT: usize = 3 * MAX_CARS;

pub const FINISH_ROW: usize = 1;
pub const MIN_OBSTACLE_LEN: usize = 3;
pub const MAX_OBSTACLE_LEN: usize = 10;
/// Rejection-sampling budget for a single obstacle run.
pub const OBSTACLE_ATTEMPTS: usize = 64;

/// One horizontal obstacle run.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ObstacleRun {
    pub row: usize,
    pub col: usize,
    pub len: usize,
}

#[derive(Clone, Debug)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    cells: Vec<Vec<Tile>>,
    /// Set once the current round's obstacles exist.
    pub obstacles_placed: bool,
}

impl Grid {
    pub fn new(lanes: usize, width: usize) -> Self {
        let height = 3 * lanes;
        let mut grid = Grid {
            width,
            height,
            cells: vec![vec![Tile::Empty; width]; height],
            obstacles_placed: false,
        };
        grid.paint_static();
        grid
    }

    /// Borders, separators and the finish row.
    fn paint_static(&mut self) {
        let (w, h) = (self.width, self.height);
        for y in (2..h.saturating_sub(2)).step_by(2) {
            for x in 0..w { self.cells[y][x] = Tile::Separator; }
        }
        for x in 1..w.saturating_sub(1) {
            self.cells[FINISH_ROW][x] = Tile::Finish;
        }
        for x in 0..w {
            self.cells[0][x] = Tile::Border;
            self.cells[h - 1][x] = Tile::Border;
        }
        for y in 0..h {
            self.cells[y][0] = Tile::Border;
            self.cells[y][w - 1] = Tile::Border;
        }
    }

    /// Tile at (row, col). Out of bounds reads as border.
    #[inline]
    pub fn tile_at(&self, row: usize, col: usize) -> Tile {
        if row < self.height && col < self.width {
            self.cells[row][col]
        } else {
            Tile::Border
        }
    }

    #[cfg(test)]
    pub fn is_obstacle(&self, row: usize, col: usize) -> bool {
        self.tile_at(row, col) == Tile::Obstacle
    }

    /// Frog start: bottom lane, centre column.
    pub fn start(&self) -> (usize, usize) {
        (self.height - 2, self.width / 2)
    }

    /// Row the car in `slot` drives on.
    pub fn lane_row(slot: usize) -> usize {
        2 * slot + 3
    }

    /// Rightmost continuous car position.
    pub fn right_edge(&self) -> f32 {
        (self.width - 1) as f32
    }

    /// Is (row, col) a cell the frog may occupy?
    pub fn in_play(&self, row: usize, col: usize) -> bool {
        row >= 1 && row + 1 < self.height && col >= 1 && col + 1 < self.width
    }

    /// Odd rows strictly between the finish row and the start row.
    pub fn obstacle_rows(&self) -> Vec<usize> {
        let (start_row, _) = self.start();
        (FINISH_ROW + 1..start_row).filter(|r| r % 2 == 1).collect()
    }

    // ── Obstacles ──

    /// Remove every obstacle. The static layout is untouched.
    pub fn clear_obstacles(&mut self) {
        for row in &mut self.cells {
            for tile in row.iter_mut() {
                if *tile == Tile::Obstacle { *tile = Tile::Empty; }
            }
        }
        self.obstacles_placed = false;
    }

    /// Mark (row, col) as an obstacle if it is an empty lane cell.
    pub fn put_obstacle(&mut self, row: usize, col: usize) {
        debug_assert!(self.in_play(row, col), "obstacle outside the play field");
        if self.tile_at(row, col) == Tile::Empty {
            self.cells[row][col] = Tile::Obstacle;
        }
    }

    #[cfg(test)]
    pub fn obstacle_cells(&self) -> Vec<(usize, usize)> {
        let mut out = vec![];
        for (y, row) in self.cells.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                if *tile == Tile::Obstacle { out.push((y, x)); }
            }
        }
        out
    }

    /// Is `run` placeable: inside the interior, on empty lane cells, and
    /// leaving at least one free cell in its row?
    pub fn run_fits(&self, run: &ObstacleRun) -> bool {
        if run.len == 0 || run.col < 1 || run.col + run.len > self.width - 1 {
            return false;
        }
        if !self.obstacle_rows().contains(&run.row) {
            return false;
        }
        if (run.col..run.col + run.len).any(|x| self.tile_at(run.row, x) != Tile::Empty) {
            return false;
        }
        let free = (1..self.width - 1)
            .filter(|&x| self.tile_at(run.row, x) == Tile::Empty)
            .count();
        free > run.len
    }

    /// Draw candidate runs until one fits, at most `max_attempts` times.
    pub fn sample_obstacle_run<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        max_attempts: usize,
    ) -> Option<ObstacleRun> {
        let rows = self.obstacle_rows();
        if rows.is_empty() { return None; }
        let interior = self.width - 2;

        for _ in 0..max_attempts {
            let row = rows[rng.next_in_range(0, rows.len() as u32 - 1) as usize];
            let len = (rng.next_in_range(1, MAX_OBSTACLE_LEN as u32) as usize)
                .max(MIN_OBSTACLE_LEN)
                .min(interior);
            let last_col = self.width - 1 - len;
            let col = rng.next_in_range(1, last_col as u32) as usize;
            let run = ObstacleRun { row, col, len };
            if self.run_fits(&run) {
                return Some(run);
            }
        }
        None
    }

    /// Place up to `count` runs for the current round. Returns how many were placed.
    pub fn place_obstacles<R: RandomSource + ?Sized>(&mut self, rng: &mut R, count: usize) -> usize {
        let mut placed = 0;
        for _ in 0..count {
            if let Some(run) = self.sample_obstacle_run(rng, OBSTACLE_ATTEMPTS) {
                for x in run.col..run.col + run.len {
                    self.put_obstacle(run.row, x);
                }
                placed += 1;
            }
        }
        self.obstacles_placed = true;
        placed
    }

    /// Materialize the grid as display characters.
    pub fn to_chars(&self, look: &LookConfig) -> Vec<Vec<char>> {
        self.cells.iter()
            .map(|row| row.iter().map(|t| t.symbol(look)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedSource, SeededSource};

    fn grid() -> Grid {
        Grid::new(MAX_CARS, SCREEN_WIDTH)
    }

    #[test]
    fn dimensions_follow_lane_count() {
        let g = grid();
        assert_eq!(g.height, SCREEN_HEIGHT);
        assert_eq!(g.width, SCREEN_WIDTH);
        assert_eq!(Grid::new(6, 20).height, 18);
    }

    #[test]
    fn borders_surround_the_field() {
        let g = grid();
        for x in 0..g.width {
            assert_eq!(g.tile_at(0, x), Tile::Border);
            assert_eq!(g.tile_at(g.height - 1, x), Tile::Border);
        }
        for y in 0..g.height {
            assert_eq!(g.tile_at(y, 0), Tile::Border);
            assert_eq!(g.tile_at(y, g.width - 1), Tile::Border);
        }
        assert_eq!(g.tile_at(99, 99), Tile::Border);
    }

    #[test]
    fn separators_finish_and_lanes() {
        let g = grid();
        assert_eq!(g.tile_at(FINISH_ROW, 5), Tile::Finish);
        for y in [2, 4, 6, 8, 10, 12] {
            assert_eq!(g.tile_at(y, 5), Tile::Separator, "row {y}");
        }
        for slot in 0..MAX_CARS {
            assert_eq!(g.tile_at(Grid::lane_row(slot), 5), Tile::Empty);
        }
        assert_eq!(g.start(), (13, 20));
        assert_eq!(g.obstacle_rows(), vec![3, 5, 7, 9, 11]);
    }

    #[test]
    fn placed_obstacles_respect_layout() {
        for seed in 0..20 {
            let mut g = grid();
            let mut rng = SeededSource::new(Some(seed));
            g.place_obstacles(&mut rng, 5);
            assert!(g.obstacles_placed);
            let rows = g.obstacle_rows();
            for (y, x) in g.obstacle_cells() {
                assert!(rows.contains(&y), "obstacle on row {y}");
                assert!(x >= 1 && x < g.width - 1, "obstacle on column {x}");
            }
            // Every lane keeps a way through.
            for y in rows {
                assert!((1..g.width - 1).any(|x| !g.is_obstacle(y, x)));
            }
        }
    }

    #[test]
    fn sampled_runs_clamp_short_lengths() {
        let g = grid();
        // row index 0, length 1 (clamped to 3), column 4
        let mut rng = ScriptedSource::new(&[0, 1, 4]);
        let run = g.sample_obstacle_run(&mut rng, 1).unwrap();
        assert_eq!(run, ObstacleRun { row: 3, col: 4, len: MIN_OBSTACLE_LEN });
    }

    #[test]
    fn overlapping_runs_are_rejected() {
        let mut g = grid();
        let mut rng = ScriptedSource::new(&[0, 5, 10]);
        assert_eq!(g.place_obstacles(&mut rng, 1), 1);
        // Same proposal forever: every attempt overlaps, sampling gives up.
        let mut again = ScriptedSource::new(&[0, 5, 10]);
        assert_eq!(g.sample_obstacle_run(&mut again, 8), None);
        assert_eq!(again.draws(), 8 * 3);
        assert_eq!(g.obstacle_cells().len(), 5);
    }

    #[test]
    fn run_must_leave_a_gap() {
        let mut g = grid();
        for x in 1..g.width - 4 { g.put_obstacle(3, x); }
        let closing = ObstacleRun { row: 3, col: g.width - 4, len: 3 };
        assert!(!g.run_fits(&closing));
        let partial = ObstacleRun { row: 3, col: g.width - 4, len: 2 };
        assert!(g.run_fits(&partial));
    }

    #[test]
    fn runs_off_lane_rows_do_not_fit() {
        let g = grid();
        assert!(!g.run_fits(&ObstacleRun { row: 2, col: 3, len: 3 }));
        assert!(!g.run_fits(&ObstacleRun { row: 13, col: 3, len: 3 }));
        assert!(!g.run_fits(&ObstacleRun { row: 3, col: 0, len: 3 }));
        assert!(!g.run_fits(&ObstacleRun { row: 3, col: 38, len: 3 }));
    }

    #[test]
    fn clearing_keeps_static_layout() {
        let mut g = grid();
        let before = g.to_chars(&LookConfig::default());
        g.place_obstacles(&mut SeededSource::new(Some(3)), 5);
        assert!(!g.obstacle_cells().is_empty());
        g.clear_obstacles();
        assert!(!g.obstacles_placed);
        assert!(g.obstacle_cells().is_empty());
        assert_eq!(g.to_chars(&LookConfig::default()), before);
    }
}
