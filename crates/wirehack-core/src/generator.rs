use crate::grid::TileGrid;
use crate::rng::Rng;
use crate::tile::{Tile, TileShape};

/// Chance, in the two-row strategy, of staying in the current row for a
/// column instead of swapping rows with a corner pair.
const STRAIGHT_BIAS: f32 = 0.4;

/// Chance, in the three-row strategy, of stepping the path vertically
/// within a column before continuing East.
const VERTICAL_BIAS: f32 = 1.0 / 3.0;

/// Reference-path construction strategy, selected once from the row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStrategy {
    SingleRow,
    TwoRow,
    ThreeRow,
}

impl PathStrategy {
    /// Strategy for a row count. Counts outside 1..=3 never reach the
    /// generator (configuration clamps them), so 3+ maps to `ThreeRow`.
    pub fn for_rows(rows: usize) -> PathStrategy {
        match rows {
            1 => PathStrategy::SingleRow,
            2 => PathStrategy::TwoRow,
            _ => PathStrategy::ThreeRow,
        }
    }

    /// Lay a guaranteed-connected path from the West edge at (0, 0) to an
    /// East exit at row 0 of the last column. Cells off the path keep
    /// whatever the grid already holds.
    pub fn lay_path(self, grid: &mut TileGrid, rng: &mut dyn Rng) {
        match self {
            PathStrategy::SingleRow => lay_single_row(grid),
            PathStrategy::TwoRow => lay_two_row(grid, rng),
            PathStrategy::ThreeRow => lay_three_row(grid, rng),
        }
    }
}

/// Generate a wire's reference assignment: every cell randomized, then one
/// solved path laid over the top. The connectivity solver will report the
/// exit lit on the result; whether any off-path tile also connects is left
/// to the solver to establish, never assumed.
pub fn generate(grid: &mut TileGrid, rng: &mut dyn Rng) {
    for row in 0..grid.rows() {
        for col in 0..grid.columns() {
            grid.set_unchecked(row, col, random_tile(rng));
        }
    }
    PathStrategy::for_rows(grid.rows()).lay_path(grid, rng);
}

fn random_tile(rng: &mut dyn Rng) -> Tile {
    let shape = match rng.next_range(0, 2) {
        0 => TileShape::Straight,
        1 => TileShape::TurnA,
        _ => TileShape::TurnB,
    };
    Tile::new(shape, rng.next_range(0, 3) as u8)
}

// The path pieces. Corner pairs are complementary: the upper/lower tile of
// a pair hands the signal to its partner, which carries it East.

fn straight_horizontal() -> Tile {
    Tile::new(TileShape::Straight, 0) // {West, East}
}

fn straight_vertical() -> Tile {
    Tile::new(TileShape::Straight, 1) // {North, South}
}

fn corner_west_south() -> Tile {
    Tile::new(TileShape::TurnB, 3) // {West, South}
}

fn corner_north_east() -> Tile {
    Tile::new(TileShape::TurnA, 0) // {North, East}
}

fn corner_west_north() -> Tile {
    Tile::new(TileShape::TurnB, 0) // {West, North}
}

fn corner_south_east() -> Tile {
    Tile::new(TileShape::TurnA, 1) // {South, East}
}

fn lay_single_row(grid: &mut TileGrid) {
    for col in 0..grid.columns() {
        grid.set_unchecked(0, col, straight_horizontal());
    }
}

fn lay_two_row(grid: &mut TileGrid, rng: &mut dyn Rng) {
    let last = grid.columns() - 1;
    let mut row = 0usize;

    for col in 0..last {
        if rng.next_float() < STRAIGHT_BIAS {
            grid.set_unchecked(row, col, straight_horizontal());
        } else if row == 0 {
            grid.set_unchecked(0, col, corner_west_south());
            grid.set_unchecked(1, col, corner_north_east());
            row = 1;
        } else {
            grid.set_unchecked(1, col, corner_west_north());
            grid.set_unchecked(0, col, corner_south_east());
            row = 0;
        }
    }

    // Resolve the final column onto the exit row
    if row == 0 {
        grid.set_unchecked(0, last, straight_horizontal());
    } else {
        grid.set_unchecked(1, last, corner_west_north());
        grid.set_unchecked(0, last, corner_south_east());
    }
}

fn lay_three_row(grid: &mut TileGrid, rng: &mut dyn Rng) {
    let last = grid.columns() - 1;
    let mut row = 0usize;

    for col in 0..last {
        if rng.next_float() < VERTICAL_BIAS {
            // Step vertically within this column, then continue East from
            // the new row. At a row extreme only one direction remains.
            let down = match row {
                0 => true,
                2 => false,
                _ => rng.next_range(0, 1) == 0,
            };
            if down {
                grid.set_unchecked(row, col, corner_west_south());
                grid.set_unchecked(row + 1, col, corner_north_east());
                row += 1;
            } else {
                grid.set_unchecked(row, col, corner_west_north());
                grid.set_unchecked(row - 1, col, corner_south_east());
                row -= 1;
            }
        } else {
            grid.set_unchecked(row, col, straight_horizontal());
        }
    }

    // Resolve the remaining row delta in the final column: straight, a
    // single corner pair, or corner + vertical straight + corner.
    match row {
        0 => grid.set_unchecked(0, last, straight_horizontal()),
        1 => {
            grid.set_unchecked(1, last, corner_west_north());
            grid.set_unchecked(0, last, corner_south_east());
        }
        _ => {
            grid.set_unchecked(2, last, corner_west_north());
            grid.set_unchecked(1, last, straight_vertical());
            grid.set_unchecked(0, last, corner_south_east());
        }
    }
}
