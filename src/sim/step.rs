/// The step function: advances the round by one frame.
///
/// Processing order:
///   1. Timer tick
///   2. Obstacle placement (first frame of a round)
///   3. Frog permissions from the four neighbours
///   4. Input command (pickup toggle, skip, move or dismount)
///   5. Finish-row scoring
///   6. Traffic: car (re)initialization, speed re-roll, movement
///   7. Collisions
///   8. Score clamp
///   9. Round timeout check
///
/// Quit is not handled here; the frame loop stops before the next step.

use crate::domain::entity::{Command, MoveDir, Permits};
use crate::domain::grid::FINISH_ROW;
use crate::domain::rules;
use crate::rng::RandomSource;
use super::collision;
use super::event::GameEvent;
use super::traffic;
use super::world::{RoundContext, FINISH_AWARD};

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step<R: RandomSource + ?Sized>(
    ctx: &mut RoundContext,
    rng: &mut R,
    command: Command,
) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = Vec::new();

    let prev_elapsed_ms = ctx.round.elapsed_ms;
    ctx.round.elapsed_ms += ctx.tuning.tick_rate_ms;

    if !ctx.grid.obstacles_placed {
        ctx.grid.place_obstacles(rng, ctx.tuning.obstacle_count);
    }
    ctx.frog.permits = rules::permits_at(&ctx.grid, ctx.frog.row, ctx.frog.col);

    apply_command(ctx, command, &mut events);
    resolve_finish(ctx, &mut events);
    traffic::update(ctx, rng, prev_elapsed_ms, &mut events);
    collision::resolve_contacts(ctx, &mut events);

    ctx.round.score = ctx.round.score.max(0);

    if ctx.round.expired() {
        reset_round(ctx, &mut events);
    }

    events
}

// ══════════════════════════════════════════════════════════════
// Input
// ══════════════════════════════════════════════════════════════

fn apply_command(ctx: &mut RoundContext, command: Command, events: &mut Vec<GameEvent>) {
    match command {
        Command::TogglePickup => {
            ctx.frog.awaiting = !ctx.frog.awaiting;
            events.push(GameEvent::PickupToggled { awaiting: ctx.frog.awaiting });
        }
        Command::SkipRound => {
            ctx.round.elapsed_ms = ctx.round.max_time_ms + 1;
        }
        Command::Move(dir) => resolve_frog_move(ctx, dir, events),
        Command::Quit | Command::Idle => {}
    }
}

/// A directional input: dismount when riding, otherwise a one-cell step.
fn resolve_frog_move(ctx: &mut RoundContext, dir: MoveDir, events: &mut Vec<GameEvent>) {
    if ctx.frog.awaiting || !ctx.jump_ready() { return; }

    if ctx.frog.riding.is_some() {
        // The input is spent either way; the frog stays put.
        if rules::can_dismount(&ctx.grid, &ctx.frog) {
            if let Some(slot) = ctx.release_ride() {
                events.push(GameEvent::FrogDismounted { slot });
            }
            ctx.round.last_jump_ms = Some(ctx.round.elapsed_ms);
        }
        return;
    }

    if let Some((row, col)) = rules::step_target(&ctx.grid, &ctx.frog, dir) {
        debug_assert!(ctx.grid.in_play(row, col));
        ctx.frog.row = row;
        ctx.frog.col = col;
        ctx.round.last_jump_ms = Some(ctx.round.elapsed_ms);
    }
}

// ══════════════════════════════════════════════════════════════
// Round bookkeeping
// ══════════════════════════════════════════════════════════════

fn resolve_finish(ctx: &mut RoundContext, events: &mut Vec<GameEvent>) {
    if ctx.frog.row != FINISH_ROW { return; }
    ctx.round.score += FINISH_AWARD;
    ctx.respawn_frog();
    events.push(GameEvent::Scored { points: FINISH_AWARD });
}

/// Start a fresh round in place. Highscore and pickup intent carry over.
pub fn reset_round(ctx: &mut RoundContext, events: &mut Vec<GameEvent>) {
    let score = ctx.round.score;
    ctx.round.highscore = ctx.round.highscore.max(score);

    ctx.grid.clear_obstacles();
    for car in ctx.cars.iter_mut() {
        car.retire();
    }
    ctx.respawn_frog();
    ctx.frog.permits = Permits::ALL;

    ctx.round.elapsed_ms = 0;
    ctx.round.score = 0;
    ctx.round.collisions = 0;
    ctx.round.last_jump_ms = None;

    events.push(GameEvent::RoundReset { score, highscore: ctx.round.highscore });
}
