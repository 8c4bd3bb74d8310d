/// Car state machine.
///
/// ```text
///   uninitialized ──initialize──▶ active ──edge event──▶ active (wrapped / bounced)
///         ▲                         │
///         └────────── retire ◀──────┘  (disappears, or edge_events > limit)
/// ```
///
/// The road is continuous on `[0, right_edge]`. The edge test runs on the
/// *next* position before it is committed, so a car never leaves the road.

use crate::config::{LookConfig, RulesConfig};
use crate::rng::RandomSource;
use super::entity::{Car, CarKind, Facing, Interaction};

/// Cells from the edge where a fresh car appears.
pub const SPAWN_INSET: f32 = 2.0;
pub const MAX_SPEED_TIER: u32 = 3;

/// What happened at the edge this frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EdgeEvent {
    Wrapped,
    Bounced,
    /// The car left play and needs reinitializing.
    Retired,
}

/// Give a car fresh behavior: speed, kind, interaction, then start position.
/// Draw order is speed, kind, interaction.
pub fn initialize<R: RandomSource + ?Sized>(
    car: &mut Car,
    rng: &mut R,
    rules: &RulesConfig,
    look: &LookConfig,
    right_edge: f32,
) {
    car.speed = roll_speed(rng);
    car.kind = match rng.next_in_range(1, 3) {
        1 => CarKind::Wraps { limit: rules.number_of_wraps },
        2 => CarKind::Bounces { limit: rules.number_of_bounces },
        _ => CarKind::Disappears,
    };
    let (interaction, color) = match rng.next_in_range(1, 3) {
        1 => (Interaction::Passive, look.passive_car_color),
        2 => (Interaction::Aggressive, look.aggressive_car_color),
        _ => (Interaction::Friendly, look.friendly_car_color),
    };
    car.interaction = interaction;
    car.color = color;

    // Odd slots enter on the left heading right, even slots the reverse.
    if car.slot % 2 == 1 {
        car.x = SPAWN_INSET;
        car.facing = Facing::Right;
    } else {
        car.x = right_edge - SPAWN_INSET + 1.0;
        car.facing = Facing::Left;
    }

    car.edge_events = 0;
    car.stopped = false;
    car.carrying = false;
    car.initialized = true;
}

pub fn roll_speed<R: RandomSource + ?Sized>(rng: &mut R) -> u8 {
    rng.next_in_range(1, MAX_SPEED_TIER) as u8
}

/// Move one frame. Stopped and uninitialized cars hold still and skip
/// the edge check.
pub fn advance(car: &mut Car, unit_step: f32, right_edge: f32) -> Option<EdgeEvent> {
    if !car.initialized || car.stopped { return None; }

    let step = car.speed as f32 * unit_step;
    let next = match car.facing {
        Facing::Left => car.x - step,
        Facing::Right => car.x + step,
    };
    let at_edge = match car.facing {
        Facing::Left => next <= 0.0,
        Facing::Right => next >= right_edge,
    };
    if !at_edge {
        car.x = next;
        return None;
    }

    match car.kind {
        CarKind::Wraps { limit } => {
            car.x = match car.facing {
                Facing::Left => right_edge,
                Facing::Right => 0.0,
            };
            Some(count_edge_event(car, limit, EdgeEvent::Wrapped))
        }
        CarKind::Bounces { limit } => {
            car.facing = car.facing.reversed();
            let bounced = match car.facing {
                Facing::Left => car.x - step,
                Facing::Right => car.x + step,
            };
            car.x = bounced.clamp(0.0, right_edge);
            Some(count_edge_event(car, limit, EdgeEvent::Bounced))
        }
        CarKind::Disappears => {
            car.retire();
            Some(EdgeEvent::Retired)
        }
    }
}

fn count_edge_event(car: &mut Car, limit: u32, event: EdgeEvent) -> EdgeEvent {
    car.edge_events += 1;
    if car.edge_events > limit {
        car.retire();
        EdgeEvent::Retired
    } else {
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    const EDGE: f32 = 40.0;
    const STEP: f32 = 0.05;

    fn live_car(kind: CarKind, facing: Facing, x: f32) -> Car {
        let mut car = Car::new(0, 3);
        car.kind = kind;
        car.facing = facing;
        car.x = x;
        car.speed = 1;
        car.initialized = true;
        car
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    // ── Initialization ──

    #[test]
    fn initialize_draws_speed_kind_interaction() {
        let rules = RulesConfig { number_of_bounces: 2, number_of_wraps: 4, max_time: 60 };
        let look = LookConfig::default();
        let mut rng = ScriptedSource::new(&[3, 2, 3]);
        let mut car = Car::new(1, 5);
        car.edge_events = 9;
        initialize(&mut car, &mut rng, &rules, &look, EDGE);

        assert!(car.initialized);
        assert_eq!(car.speed, 3);
        assert_eq!(car.kind, CarKind::Bounces { limit: 2 });
        assert_eq!(car.interaction, Interaction::Friendly);
        assert_eq!(car.color, look.friendly_car_color);
        assert_eq!(car.edge_events, 0);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn spawn_side_follows_slot_parity() {
        let rules = RulesConfig::default();
        let look = LookConfig::default();
        let mut rng = ScriptedSource::new(&[1]);

        let mut odd = Car::new(1, 5);
        initialize(&mut odd, &mut rng, &rules, &look, EDGE);
        assert_eq!(odd.facing, Facing::Right);
        assert!(approx(odd.x, 2.0));

        let mut even = Car::new(2, 7);
        initialize(&mut even, &mut rng, &rules, &look, EDGE);
        assert_eq!(even.facing, Facing::Left);
        assert!(approx(even.x, 39.0));
        assert_eq!(even.kind, CarKind::Wraps { limit: rules.number_of_wraps });
        assert_eq!(even.interaction, Interaction::Passive);
    }

    // ── Plain movement ──

    #[test]
    fn moves_by_speed_times_step() {
        let mut car = live_car(CarKind::Disappears, Facing::Right, 10.0);
        car.speed = 3;
        assert_eq!(advance(&mut car, STEP, EDGE), None);
        assert!(approx(car.x, 10.15));
        assert_eq!(car.edge_events, 0);
    }

    #[test]
    fn stopped_car_holds_still() {
        let mut car = live_car(CarKind::Bounces { limit: 3 }, Facing::Left, 0.01);
        car.stopped = true;
        assert_eq!(advance(&mut car, STEP, EDGE), None);
        assert!(approx(car.x, 0.01));
        assert_eq!(car.edge_events, 0);
        // Unstopped: the pending edge is handled on the next frame.
        car.stopped = false;
        assert_eq!(advance(&mut car, STEP, EDGE), Some(EdgeEvent::Bounced));
    }

    #[test]
    fn uninitialized_car_holds_still() {
        let mut car = live_car(CarKind::Wraps { limit: 3 }, Facing::Right, 5.0);
        car.initialized = false;
        assert_eq!(advance(&mut car, STEP, EDGE), None);
        assert!(approx(car.x, 5.0));
    }

    // ── Edge policies ──

    #[test]
    fn bounce_at_left_edge_reverses() {
        let mut car = live_car(CarKind::Bounces { limit: 3 }, Facing::Left, 0.0);
        assert_eq!(advance(&mut car, STEP, EDGE), Some(EdgeEvent::Bounced));
        assert_eq!(car.facing, Facing::Right);
        assert_eq!(car.edge_events, 1);
        assert!(car.x >= 0.0 && car.x < 1.0, "no teleport, got {}", car.x);
        assert!(car.initialized);
    }

    #[test]
    fn bounce_at_right_edge_reverses() {
        let mut car = live_car(CarKind::Bounces { limit: 3 }, Facing::Right, 39.98);
        assert_eq!(advance(&mut car, STEP, EDGE), Some(EdgeEvent::Bounced));
        assert_eq!(car.facing, Facing::Left);
        assert!(approx(car.x, 39.93));
    }

    #[test]
    fn wrap_at_right_edge_teleports_to_zero() {
        let mut car = live_car(CarKind::Wraps { limit: 3 }, Facing::Right, EDGE);
        assert_eq!(advance(&mut car, STEP, EDGE), Some(EdgeEvent::Wrapped));
        assert!(approx(car.x, 0.0));
        assert_eq!(car.facing, Facing::Right);
        assert_eq!(car.edge_events, 1);
    }

    #[test]
    fn wrap_at_left_edge_teleports_to_far_side() {
        let mut car = live_car(CarKind::Wraps { limit: 3 }, Facing::Left, 0.02);
        assert_eq!(advance(&mut car, STEP, EDGE), Some(EdgeEvent::Wrapped));
        assert!(approx(car.x, EDGE));
        assert_eq!(car.facing, Facing::Left);
    }

    #[test]
    fn disappear_retires_on_first_edge() {
        let mut car = live_car(CarKind::Disappears, Facing::Left, 0.03);
        car.carrying = true;
        assert_eq!(advance(&mut car, STEP, EDGE), Some(EdgeEvent::Retired));
        assert!(!car.initialized);
        assert!(!car.carrying);
        assert_eq!(car.edge_events, 0);
    }

    #[test]
    fn wraps_retire_after_limit() {
        let mut car = live_car(CarKind::Wraps { limit: 2 }, Facing::Right, EDGE);
        for expected in 1..=2 {
            car.x = EDGE;
            assert_eq!(advance(&mut car, STEP, EDGE), Some(EdgeEvent::Wrapped));
            assert_eq!(car.edge_events, expected);
        }
        car.x = EDGE;
        assert_eq!(advance(&mut car, STEP, EDGE), Some(EdgeEvent::Retired));
        assert_eq!(car.edge_events, 3);
        assert!(!car.initialized);
    }

    #[test]
    fn bounces_retire_after_limit() {
        let mut car = live_car(CarKind::Bounces { limit: 2 }, Facing::Left, 0.0);
        for expected in 1..=2 {
            car.facing = Facing::Left;
            car.x = 0.0;
            assert_eq!(advance(&mut car, STEP, EDGE), Some(EdgeEvent::Bounced));
            assert_eq!(car.edge_events, expected);
            assert!(car.initialized);
        }
        car.facing = Facing::Left;
        car.x = 0.0;
        assert_eq!(advance(&mut car, STEP, EDGE), Some(EdgeEvent::Retired));
        assert_eq!(car.edge_events, 3);
        assert!(!car.initialized);
    }

    #[test]
    fn counter_only_moves_at_edges() {
        let mut car = live_car(CarKind::Bounces { limit: 100 }, Facing::Right, 1.0);
        car.speed = 3;
        let mut last = 0;
        for _ in 0..5_000 {
            let event = advance(&mut car, STEP, EDGE);
            assert!(car.x >= 0.0 && car.x <= EDGE);
            match event {
                Some(EdgeEvent::Bounced) => assert_eq!(car.edge_events, last + 1),
                None => assert_eq!(car.edge_events, last),
                other => panic!("unexpected {other:?}"),
            }
            last = car.edge_events;
        }
        assert!(last > 0);
    }
}
