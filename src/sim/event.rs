/// Events emitted during a simulation step.
/// The presentation layer consumes these for sound and messages.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Scored { points: i32 },
    FrogSquashed { slot: usize },
    FrogBoarded { slot: usize },
    FrogDismounted { slot: usize },
    PickupToggled { awaiting: bool },
    CarRetired { slot: usize },
    SpeedsRerolled,
    RoundReset { score: i32, highscore: i32 },
}
