/// Frog-vs-car contact classification.
///
/// Exactly one case applies per pair, tested in precedence order:
///
/// | # | Contact       | Condition                                                |
/// |---|---------------|----------------------------------------------------------|
/// | 1 | `Overlap`     | same row, column distance <= `tolerance`                 |
/// | 2 | `Approaching` | same row, car within `look_ahead` columns, heading at frog |
/// | 3 | `Carrying`    | car already carries the frog                             |
/// | 4 | `Clear`       | anything else                                            |
///
/// Car columns come from `Car::column` (floor projection).

use super::entity::{Car, Facing, Frog};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Contact {
    Overlap,
    Approaching,
    Carrying,
    Clear,
}

/// Distances that decide contact.
#[derive(Clone, Copy, Debug)]
pub struct Reach {
    pub tolerance: usize,
    pub look_ahead: usize,
    pub width: usize,
}

pub fn classify(frog: &Frog, car: &Car, reach: &Reach) -> Contact {
    let same_row = frog.row == car.row;
    let car_col = car.column(reach.width);

    if same_row && frog.col.abs_diff(car_col) <= reach.tolerance {
        return Contact::Overlap;
    }
    if same_row && heading_at(frog.col, car_col, car.facing, reach.look_ahead) {
        return Contact::Approaching;
    }
    if car.carrying {
        return Contact::Carrying;
    }
    Contact::Clear
}

/// Is a car at `car_col` in front of the frog and at most `look_ahead` away?
fn heading_at(frog_col: usize, car_col: usize, facing: Facing, look_ahead: usize) -> bool {
    match facing {
        Facing::Left => car_col >= frog_col && car_col - frog_col <= look_ahead,
        Facing::Right => car_col <= frog_col && frog_col - car_col <= look_ahead,
    }
}
