//! Wire-hacking minigame engine.
//!
//! Each hack session owns a handful of wires; every wire is a small grid of
//! rotatable tiles. Generation lays one guaranteed-connected path per wire
//! from the West entry edge to the East exit edge, a jumble pass scrambles
//! it into the presented puzzle, and a connectivity solver tracks which
//! tiles are reachable ("lit") as the player rotates tiles back into place.
//! The host polls progress each tick; rendering, input transport, and
//! reward timing live outside this crate.

mod generator;
mod grid;
mod jumble;
mod puzzle;
mod rng;
mod solver;
mod tile;

pub use generator::{generate, PathStrategy};
pub use grid::{IndexError, TileGrid, Wire};
pub use jumble::{jumble, MAX_ATTEMPTS, MAX_MISTAKES};
pub use puzzle::{HackConfig, HackState, WireHack};
pub use rng::{Rng, SessionRng};
pub use solver::{is_wire_lit, update_lit};
pub use tile::{connects, open_ports, Port, PortSet, Tile, TileShape};
