/// Tile types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.

use crate::config::LookConfig;

pub const OBSTACLE_SYMBOL: char = '@';
pub const FINISH_SYMBOL: char = '_';

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Tile {
    #[default]
    Empty,
    Border,     // Outer frame
    Separator,  // Painted line between lanes, always walkable
    Obstacle,   // Blocks the frog, never the cars
    Finish,     // Goal row
}

impl Tile {
    /// Does this tile block a frog step into it?
    pub fn blocks_frog(self) -> bool {
        matches!(self, Tile::Obstacle)
    }

    /// Can a frog stand here after dismounting?
    pub fn is_safe_ground(self) -> bool {
        !matches!(self, Tile::Obstacle | Tile::Border)
    }

    /// Character drawn for this tile.
    pub fn symbol(self, look: &LookConfig) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Border => look.border_symbol,
            Tile::Separator => look.lane_separator,
            Tile::Obstacle => OBSTACLE_SYMBOL,
            Tile::Finish => FINISH_SYMBOL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_obstacles_block() {
        assert!(Tile::Obstacle.blocks_frog());
        assert!(!Tile::Separator.blocks_frog());
        assert!(!Tile::Finish.blocks_frog());
        assert!(!Tile::Empty.blocks_frog());
    }

    #[test]
    fn symbols_follow_look() {
        let look = LookConfig::default();
        assert_eq!(Tile::Border.symbol(&look), look.border_symbol);
        assert_eq!(Tile::Separator.symbol(&look), look.lane_separator);
        assert_eq!(Tile::Obstacle.symbol(&look), '@');
        assert_eq!(Tile::Empty.symbol(&look), ' ');
    }
}
