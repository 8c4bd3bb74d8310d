/// Entities: Frog and Car, plus the per-frame input command.
/// Car behavior is a pair of closed enums fixed at (re)initialization.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn reversed(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Frog step direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveDir {
    Left,
    Right,
    Up,
    Down,
}

/// One discrete input symbol per frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Command {
    Move(MoveDir),
    TogglePickup,
    SkipRound,
    Quit,
    #[default]
    Idle,
}

/// What a car does at the edge of the road.
/// `limit` is how many edge events the car survives before it is replaced.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CarKind {
    Wraps { limit: u32 },
    Bounces { limit: u32 },
    Disappears,
}

/// What a car does to a frog it meets.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Interaction {
    Passive,    // Stops and waits
    Aggressive, // Runs the frog over
    Friendly,   // Stops, or gives a ride to a frog awaiting pickup
}

/// Which way the frog may step this frame. Recomputed every frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Permits {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Permits {
    pub const ALL: Permits = Permits { up: true, down: true, left: true, right: true };

    pub fn allows(&self, dir: MoveDir) -> bool {
        match dir {
            MoveDir::Up => self.up,
            MoveDir::Down => self.down,
            MoveDir::Left => self.left,
            MoveDir::Right => self.right,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Frog {
    pub row: usize,
    pub col: usize,
    pub awaiting: bool,
    pub permits: Permits,
    /// Slot of the car carrying the frog. The car drives the frog, never the reverse.
    pub riding: Option<usize>,
}

impl Frog {
    pub fn new(row: usize, col: usize) -> Self {
        Frog {
            row, col,
            awaiting: false,
            permits: Permits::ALL,
            riding: None,
        }
    }

    /// Back to the start cell; any ride ends.
    pub fn respawn(&mut self, start: (usize, usize)) {
        self.row = start.0;
        self.col = start.1;
        self.riding = None;
    }
}

#[derive(Clone, Debug)]
pub struct Car {
    pub slot: usize,
    pub row: usize,
    pub x: f32,
    pub facing: Facing,
    pub speed: u8,          // tier 1..=3
    pub kind: CarKind,
    pub interaction: Interaction,
    pub color: u8,
    pub edge_events: u32,   // since the last (re)initialization
    pub initialized: bool,
    pub stopped: bool,
    pub carrying: bool,
}

impl Car {
    /// An empty slot; `motion::initialize` gives it behavior.
    pub fn new(slot: usize, row: usize) -> Self {
        Car {
            slot, row,
            x: 0.0,
            facing: Facing::Right,
            speed: 1,
            kind: CarKind::Disappears,
            interaction: Interaction::Passive,
            color: 0,
            edge_events: 0,
            initialized: false,
            stopped: false,
            carrying: false,
        }
    }

    /// Grid column of the car: floor of `x`, clamped to `0..width`.
    /// Collision, riding and rendering all use this projection.
    pub fn column(&self, width: usize) -> usize {
        let col = self.x.max(0.0).floor() as usize;
        col.min(width.saturating_sub(1))
    }

    /// Take the car off the road until it is reinitialized.
    pub fn retire(&mut self) {
        self.initialized = false;
        self.stopped = false;
        self.carrying = false;
    }
}
