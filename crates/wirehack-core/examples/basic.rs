//! Basic example of driving a hack session

use wirehack_core::{HackConfig, WireHack};

fn glyph(ports: wirehack_core::PortSet) -> char {
    use wirehack_core::Port::*;
    let has = |p| ports.contains(p);
    match (has(North), has(East), has(South), has(West)) {
        (false, true, false, true) => '─',
        (true, false, true, false) => '│',
        (true, true, false, false) => '└',
        (false, true, true, false) => '┌',
        (false, false, true, true) => '┐',
        (true, false, false, true) => '┘',
        _ => '?',
    }
}

fn print_hack(hack: &WireHack) {
    let config = hack.config();
    for wire in 0..config.wires() {
        println!("wire {}:", wire);
        for row in 0..config.rows() {
            let mut line = String::from("  ");
            for col in 0..config.columns() {
                let tile = hack.tile(wire, row, col).unwrap();
                let lit = hack.is_lit(wire, row, col).unwrap();
                line.push(glyph(tile.open_ports()));
                line.push(if lit { '*' } else { ' ' });
            }
            println!("{}", line);
        }
    }
}

fn main() {
    println!("Creating a 2x5 hack with 2 wires...\n");
    let mut hack = WireHack::with_seed(HackConfig::new(2, 5, 2), 1234);

    println!("Jumbled state (lit tiles starred):");
    print_hack(&hack);
    println!(
        "\nprogress: {:.2}, lit wires: {}\n",
        hack.progress(),
        hack.lit_wire_count()
    );

    // Solve by rotating every tile back to its reference rotation
    let config = hack.config();
    let mut presses = 0;
    for wire in 0..config.wires() {
        for row in 0..config.rows() {
            for col in 0..config.columns() {
                let current = hack.tile(wire, row, col).unwrap();
                let reference = hack.wire(wire).unwrap().reference(row, col).unwrap();
                let delta = (4 + reference.rotation() - current.rotation()) % 4;
                let flat = wire * config.cells_per_wire() + row * config.columns() + col;
                for _ in 0..delta {
                    hack.select_option(flat).unwrap();
                    presses += 1;
                }
            }
        }
    }

    println!("Solved in {} rotations:", presses);
    print_hack(&hack);
    println!(
        "\nprogress: {:.2}, complete: {}",
        hack.progress(),
        hack.is_complete()
    );
}
