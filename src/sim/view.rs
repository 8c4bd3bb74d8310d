/// Read-only snapshot of a frame for the presentation layer.

use super::world::RoundContext;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Sprite {
    pub row: usize,
    pub col: usize,
    pub symbol: char,
    pub color: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub elapsed_secs: f32,
    pub max_time: u32,
    pub score: i32,
    pub highscore: i32,
    pub collisions: u32,
    pub awaiting: bool,
}

#[derive(Clone, Debug)]
pub struct FrameView {
    pub grid: Vec<Vec<char>>,
    pub frog: Sprite,
    /// Live cars only, in lane order.
    pub cars: Vec<Sprite>,
    pub hud: Hud,
}

pub fn frame_view(ctx: &RoundContext) -> FrameView {
    let frog_symbol = if ctx.frog.awaiting {
        ctx.look.frog_symbol.to_ascii_lowercase()
    } else {
        ctx.look.frog_symbol.to_ascii_uppercase()
    };

    let cars = ctx.cars.iter()
        .filter(|c| c.initialized)
        .map(|c| Sprite {
            row: c.row,
            col: c.column(ctx.grid.width),
            symbol: ctx.look.car_symbol,
            color: c.color,
        })
        .collect();

    FrameView {
        grid: ctx.grid.to_chars(&ctx.look),
        frog: Sprite {
            row: ctx.frog.row,
            col: ctx.frog.col,
            symbol: frog_symbol,
            color: ctx.look.frog_color,
        },
        cars,
        hud: Hud {
            elapsed_secs: ctx.round.elapsed_secs(),
            max_time: ctx.rules.max_time,
            score: ctx.round.score,
            highscore: ctx.round.highscore,
            collisions: ctx.round.collisions,
            awaiting: ctx.frog.awaiting,
        },
    }
}
