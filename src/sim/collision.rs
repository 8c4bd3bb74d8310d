/// Collision phase: apply each car's interaction to the frog.
///
/// Runs after traffic, in lane order. Effects per contact:
///
/// | Contact       | Passive | Aggressive          | Friendly                     |
/// |---------------|---------|---------------------|------------------------------|
/// | `Overlap`     | stop    | penalty, frog home  | stop, or board if awaiting   |
/// | `Approaching` | stop    | nothing             | stop unless awaiting         |
/// | `Carrying`    | nothing | nothing             | as `Overlap`                 |
/// | `Clear`       | resume  | resume              | resume                       |

use crate::domain::contact::{self, Contact};
use crate::domain::entity::Interaction;
use super::event::GameEvent;
use super::world::{RoundContext, HIT_PENALTY};

pub fn resolve_contacts(ctx: &mut RoundContext, events: &mut Vec<GameEvent>) {
    let reach = ctx.reach();
    for slot in 0..ctx.cars.len() {
        if !ctx.cars[slot].initialized { continue; }
        let contact = contact::classify(&ctx.frog, &ctx.cars[slot], &reach);
        let interaction = ctx.cars[slot].interaction;

        match (contact, interaction) {
            (Contact::Overlap, Interaction::Aggressive) => {
                ctx.round.score -= HIT_PENALTY;
                ctx.round.collisions += 1;
                ctx.respawn_frog();
                events.push(GameEvent::FrogSquashed { slot });
            }
            (Contact::Overlap, Interaction::Friendly)
            | (Contact::Carrying, Interaction::Friendly) => friendly_meet(ctx, slot, events),
            (Contact::Overlap, Interaction::Passive)
            | (Contact::Approaching, Interaction::Passive) => ctx.cars[slot].stopped = true,
            (Contact::Approaching, Interaction::Friendly) => {
                ctx.cars[slot].stopped = !ctx.frog.awaiting;
            }
            (Contact::Approaching, Interaction::Aggressive)
            | (Contact::Carrying, _) => {}
            (Contact::Clear, _) => ctx.cars[slot].stopped = false,
        }
    }
}

/// A friendly car next to the frog: wait for it, or carry it if it asked.
fn friendly_meet(ctx: &mut RoundContext, slot: usize, events: &mut Vec<GameEvent>) {
    if !ctx.frog.awaiting {
        ctx.cars[slot].stopped = true;
        return;
    }

    let width = ctx.grid.width;
    let car = &mut ctx.cars[slot];
    car.stopped = false;
    car.carrying = true;
    ctx.frog.row = car.row;
    ctx.frog.col = car.column(width).clamp(1, width - 2);

    if ctx.frog.riding != Some(slot) {
        ctx.frog.riding = Some(slot);
        events.push(GameEvent::FrogBoarded { slot });
    }
}
