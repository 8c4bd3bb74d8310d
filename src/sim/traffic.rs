/// Traffic phase: car (re)initialization, speed re-rolls and movement.
///
/// Cars are processed in lane order. A car retired this frame stays
/// empty until the next frame's traffic phase brings it back.

use crate::domain::motion::{self, EdgeEvent};
use crate::rng::RandomSource;
use super::event::GameEvent;
use super::world::RoundContext;

pub fn update<R: RandomSource + ?Sized>(
    ctx: &mut RoundContext,
    rng: &mut R,
    prev_elapsed_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    let right_edge = ctx.grid.right_edge();

    for car in ctx.cars.iter_mut().filter(|c| !c.initialized) {
        motion::initialize(car, rng, &ctx.rules, &ctx.look, right_edge);
    }

    if reroll_due(prev_elapsed_ms, ctx.round.elapsed_ms, ctx.tuning.speed_change_interval) {
        for car in ctx.cars.iter_mut() {
            car.speed = motion::roll_speed(rng);
        }
        events.push(GameEvent::SpeedsRerolled);
    }

    let unit_step = ctx.tuning.car_step;
    for slot in 0..ctx.cars.len() {
        if motion::advance(&mut ctx.cars[slot], unit_step, right_edge) == Some(EdgeEvent::Retired) {
            if ctx.frog.riding == Some(slot) {
                ctx.frog.riding = None;
            }
            events.push(GameEvent::CarRetired { slot });
        }
    }
}

/// Did the whole-second count just move onto a non-zero multiple of `interval`?
pub fn reroll_due(prev_ms: u64, now_ms: u64, interval_secs: u64) -> bool {
    if interval_secs == 0 { return false; }
    let (prev, now) = (prev_ms / 1000, now_ms / 1000);
    now != prev && now != 0 && now % interval_secs == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::domain::entity::{CarKind, Facing, Interaction};
    use crate::rng::ScriptedSource;

    fn ctx() -> RoundContext {
        RoundContext::new(&GameConfig::default())
    }

    #[test]
    fn reroll_fires_once_per_interval() {
        assert!(!reroll_due(4_990, 4_995, 5));
        assert!(reroll_due(4_995, 5_010, 5));
        assert!(!reroll_due(5_010, 5_025, 5));
        assert!(!reroll_due(5_990, 6_005, 5));
        assert!(reroll_due(9_990, 10_005, 5));
        assert!(!reroll_due(0, 0, 5));
        assert!(!reroll_due(4_995, 5_010, 0));
    }

    #[test]
    fn first_frame_initializes_every_car() {
        let mut ctx = ctx();
        let mut rng = ScriptedSource::new(&[2]);
        let mut events = Vec::new();
        update(&mut ctx, &mut rng, 0, &mut events);
        assert!(ctx.cars.iter().all(|c| c.initialized));
        assert_eq!(rng.draws(), 3 * ctx.cars.len());
        assert!(events.is_empty());
    }

    #[test]
    fn reroll_touches_every_car() {
        let mut ctx = ctx();
        let mut rng = ScriptedSource::new(&[1]);
        let mut events = Vec::new();
        update(&mut ctx, &mut rng, 0, &mut events);
        assert!(ctx.cars.iter().all(|c| c.speed == 1));

        let mut rng = ScriptedSource::new(&[3]);
        ctx.round.elapsed_ms = 5_000;
        update(&mut ctx, &mut rng, 4_985, &mut events);
        assert!(ctx.cars.iter().all(|c| c.speed == 3));
        assert_eq!(events, vec![GameEvent::SpeedsRerolled]);
    }

    #[test]
    fn retiring_carrier_ends_the_ride() {
        let mut ctx = ctx();
        let mut rng = ScriptedSource::new(&[1]);
        let mut events = Vec::new();
        update(&mut ctx, &mut rng, 0, &mut events);

        let car = &mut ctx.cars[0];
        car.kind = CarKind::Disappears;
        car.interaction = Interaction::Friendly;
        car.facing = Facing::Left;
        car.x = 0.01;
        car.carrying = true;
        ctx.frog.riding = Some(0);

        update(&mut ctx, &mut rng, 15, &mut events);
        assert_eq!(events, vec![GameEvent::CarRetired { slot: 0 }]);
        assert!(!ctx.cars[0].initialized);
        assert_eq!(ctx.frog.riding, None);
    }
}
