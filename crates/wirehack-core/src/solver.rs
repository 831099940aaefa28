use crate::grid::Wire;
use crate::tile::Port;
use std::collections::VecDeque;

/// Recompute the wire's lit mask from scratch.
///
/// Propagation starts at the West edge of column 0, which is always open:
/// any first-column tile opening West is a source. A tile lights a neighbor
/// when it opens the port facing that neighbor and the neighbor opens the
/// reciprocal port back. Runs to a fixed point; the result is independent
/// of traversal order.
pub fn update_lit(wire: &mut Wire) {
    let rows = wire.grid().rows();
    let columns = wire.grid().columns();
    let mut lit = vec![false; rows * columns];
    let mut queue = VecDeque::new();

    for row in 0..rows {
        if wire.grid().tile_unchecked(row, 0).opens(Port::West) {
            lit[row * columns] = true;
            queue.push_back((row, 0));
        }
    }

    while let Some((row, col)) = queue.pop_front() {
        let tile = wire.grid().tile_unchecked(row, col);
        for port in tile.open_ports().iter() {
            let (dr, dc) = port.offset();
            let nr = row as isize + dr;
            let nc = col as isize + dc;
            if nr < 0 || nc < 0 || nr >= rows as isize || nc >= columns as isize {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            let idx = nr * columns + nc;
            if lit[idx] {
                continue;
            }
            if wire.grid().tile_unchecked(nr, nc).opens(port.reciprocal()) {
                lit[idx] = true;
                queue.push_back((nr, nc));
            }
        }
    }

    wire.set_lit_mask(lit);
}

/// Whether the wire's exit edge is lit: some lit tile in the last column
/// opens East.
pub fn is_wire_lit(wire: &Wire) -> bool {
    let last = wire.grid().columns() - 1;
    (0..wire.grid().rows()).any(|row| {
        wire.lit_unchecked(row, last) && wire.grid().tile_unchecked(row, last).opens(Port::East)
    })
}
