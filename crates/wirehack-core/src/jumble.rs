use crate::grid::Wire;
use crate::rng::Rng;
use crate::solver;
use log::warn;

/// Most on-path tiles deliberately mis-rotated per wire.
pub const MAX_MISTAKES: u32 = 5;

/// Full sabotage-pass retries when a pass introduces no mistakes.
pub const MAX_ATTEMPTS: u32 = 10;

/// Chance of sabotaging each lit tile during a pass.
const SABOTAGE_CHANCE: f32 = 0.5;

/// Scramble a freshly generated (or freshly restored) wire into the state
/// presented to the player.
///
/// Two passes: first every tile not reachable from the entry gets a random
/// rotation (its shape was already random); then lit tiles are mis-rotated
/// right-to-left until the wire carries some required moves. A pass that
/// lands zero mistakes is retried; exhausting the retry budget leaves a
/// degenerate already-solved wire, which is logged rather than forced.
pub fn jumble(wire: &mut Wire, rng: &mut dyn Rng) {
    solver::update_lit(wire);

    let rows = wire.grid().rows();
    let columns = wire.grid().columns();
    for row in 0..rows {
        for col in 0..columns {
            if !wire.lit_unchecked(row, col) {
                let rotation = rng.next_range(0, 3) as u8;
                wire.grid_mut().tile_mut_unchecked(row, col).set_rotation(rotation);
            }
        }
    }
    // Noise can wire previously dark tiles back in; refresh before sabotage
    solver::update_lit(wire);

    wire.reset_mistakes();
    for _ in 0..MAX_ATTEMPTS {
        sabotage_pass(wire, rng);
        if wire.mistakes() > 0 {
            return;
        }
    }
    warn!(
        "jumble produced zero mistakes after {} attempts; wire starts solved",
        MAX_ATTEMPTS
    );
}

/// One right-to-left sabotage sweep. Iterating from the exit column biases
/// the mistakes toward the tiles nearest the exit, since the cap can stop
/// the sweep before it reaches the entry side.
fn sabotage_pass(wire: &mut Wire, rng: &mut dyn Rng) {
    let rows = wire.grid().rows();
    let columns = wire.grid().columns();

    for col in (0..columns).rev() {
        for row in 0..rows {
            if wire.mistakes() >= MAX_MISTAKES {
                return;
            }
            if !wire.lit_unchecked(row, col) {
                continue;
            }
            if rng.next_float() < SABOTAGE_CHANCE {
                // An offset of 1..=3 guarantees the tile actually moves
                let offset = rng.next_range(1, 3) as u8;
                let tile = wire.grid_mut().tile_mut_unchecked(row, col);
                tile.set_rotation(tile.rotation() + offset);
                wire.add_mistake();
                solver::update_lit(wire);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator;
    use crate::rng::{ScriptedRng, SessionRng};

    fn generated_wire(rows: usize, columns: usize, seed: u64) -> (Wire, SessionRng) {
        let mut rng = SessionRng::with_seed(seed);
        let mut wire = Wire::new(rows, columns);
        generator::generate(wire.grid_mut(), &mut rng);
        wire.capture_reference();
        (wire, rng)
    }

    #[test]
    fn test_mistakes_never_exceed_cap() {
        for seed in 0..50u64 {
            let (mut wire, mut rng) = generated_wire(3, 8, seed);
            jumble(&mut wire, &mut rng);
            assert!(wire.mistakes() <= MAX_MISTAKES);
        }
    }

    #[test]
    fn test_jumble_introduces_mistakes_statistically() {
        // The retry budget makes a moveless jumble rare, not impossible:
        // across sizes and seeds, at least 95% of runs must carry one or
        // more mistakes.
        let mut runs = 0u32;
        let mut with_mistakes = 0u32;
        for rows in 1..=3usize {
            for columns in [3usize, 5, 8] {
                for wires in 1..=2usize {
                    for seed in 0..20u64 {
                        let (mut wire, mut rng) =
                            generated_wire(rows, columns, seed * 4 + wires as u64);
                        jumble(&mut wire, &mut rng);
                        runs += 1;
                        if wire.mistakes() > 0 {
                            with_mistakes += 1;
                        }
                    }
                }
            }
        }
        assert!(
            with_mistakes * 100 >= runs * 95,
            "only {}/{} jumbles carried a mistake",
            with_mistakes,
            runs
        );
    }

    #[test]
    fn test_declined_sabotage_leaves_wire_solved() {
        // Floats of 0.9 never fall under SABOTAGE_CHANCE: all ten passes
        // decline every tile. The degenerate zero-mistake outcome is
        // accepted, not forced.
        let (mut wire, _) = generated_wire(2, 5, 7);
        crate::solver::update_lit(&mut wire);
        let lit_before = wire.lit_mask().to_vec();
        let before = wire.grid().tiles().to_vec();
        let mut rng = ScriptedRng::new(&[0.9; 512], &[]);
        jumble(&mut wire, &mut rng);
        assert_eq!(wire.mistakes(), 0);
        assert!(crate::solver::is_wire_lit(&wire));
        // The noise pass only touches tiles that were dark going in; with
        // all sabotage declined, the reference path is untouched.
        let columns = wire.grid().columns();
        for row in 0..wire.grid().rows() {
            for col in 0..columns {
                if lit_before[row * columns + col] {
                    assert_eq!(
                        wire.grid().get(row, col).unwrap(),
                        before[row * columns + col]
                    );
                }
            }
        }
    }

    #[test]
    fn test_forced_sabotage_unlights_the_exit() {
        // Floats of 0.0 sabotage every lit tile until the cap, starting
        // from the exit column.
        let (mut wire, _) = generated_wire(1, 5, 11);
        let mut rng = ScriptedRng::new(&[0.0; 64], &[1, 1, 1, 1, 1, 1]);
        jumble(&mut wire, &mut rng);
        assert!(wire.mistakes() >= 1);
        assert!(!crate::solver::is_wire_lit(&wire), "offset 1 turns a straight vertical");
    }

    #[test]
    fn test_sabotage_bias_is_right_to_left() {
        // With every lit tile sabotaged and a cap of 5, a 1x8 corridor
        // loses its five rightmost tiles first.
        let (mut wire, _) = generated_wire(1, 8, 13);
        let mut rng = ScriptedRng::new(&[0.0; 64], &[1; 16]);
        jumble(&mut wire, &mut rng);
        assert_eq!(wire.mistakes(), MAX_MISTAKES);
        // Offset 1 leaves each sabotaged straight vertical (not West-open);
        // the leftmost columns were never reached.
        for col in 0..3 {
            assert_eq!(wire.grid().get(0, col).unwrap().rotation(), 0);
        }
    }
}
