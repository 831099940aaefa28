use log::debug;
use std::sync::{Arc, Mutex};
use wirehack_core::{HackConfig, HackState, TileShape, WireHack};

uniffi::setup_scaffolding!();

/// Phase of a hack session
#[derive(Debug, Clone, Copy, uniffi::Enum)]
pub enum HackPhase {
    /// The panel is still locked
    InProgress,
    /// Every wire's exit is lit
    Solved,
}

impl From<HackState> for HackPhase {
    fn from(state: HackState) -> Self {
        match state {
            HackState::InProgress => HackPhase::InProgress,
            HackState::Solved => HackPhase::Solved,
        }
    }
}

/// Tile shape family exposed to hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum TileKind {
    Straight,
    TurnA,
    TurnB,
}

impl From<TileShape> for TileKind {
    fn from(shape: TileShape) -> Self {
        match shape {
            TileShape::Straight => TileKind::Straight,
            TileShape::TurnA => TileKind::TurnA,
            TileShape::TurnB => TileKind::TurnB,
        }
    }
}

impl TileKind {
    fn name(self) -> &'static str {
        match self {
            TileKind::Straight => "straight",
            TileKind::TurnA => "turn_a",
            TileKind::TurnB => "turn_b",
        }
    }
}

/// Snapshot of one cell for UI rendering
#[derive(Debug, Clone, uniffi::Record)]
pub struct TileState {
    /// Wire index (0-based)
    pub wire: u8,
    /// Row within the wire's grid
    pub row: u8,
    /// Column within the wire's grid
    pub col: u8,
    /// Flat option index to pass back to `select_option`
    pub flat_index: u32,
    /// Shape family
    pub kind: TileKind,
    /// Current rotation (0-3)
    pub rotation: u8,
    /// Whether the tile is reachable from the entry edge
    pub lit: bool,
}

/// One hack session, driven by the hosting panel entity
#[derive(uniffi::Object)]
pub struct HackSession {
    inner: Mutex<WireHack>,
}

#[uniffi::export]
impl HackSession {
    /// Create a session. Out-of-range dimensions fall back to the engine
    /// defaults (2 rows, 5 columns, 3 wires).
    #[uniffi::constructor]
    pub fn new(rows: u32, columns: u32, wires: u32) -> Arc<Self> {
        let config = HackConfig::new(rows as usize, columns as usize, wires as usize);
        Arc::new(Self {
            inner: Mutex::new(WireHack::new(config)),
        })
    }

    /// Create a reproducible session from a seed.
    #[uniffi::constructor]
    pub fn with_seed(rows: u32, columns: u32, wires: u32, seed: u64) -> Arc<Self> {
        let config = HackConfig::new(rows as usize, columns as usize, wires as usize);
        Arc::new(Self {
            inner: Mutex::new(WireHack::with_seed(config, seed)),
        })
    }

    /// Rotate the tile at a flat index and recompute every wire. Returns
    /// false (leaving the puzzle untouched) for negative or oversized
    /// indices.
    pub fn select_option(&self, flat_index: i64) -> bool {
        let Ok(index) = usize::try_from(flat_index) else {
            debug!("select_option({}) rejected: negative index", flat_index);
            return false;
        };
        self.inner.lock().unwrap().select_option(index).is_ok()
    }

    /// Instantaneous completion fraction in [0, 1], polled per host tick.
    pub fn progress(&self) -> f32 {
        self.inner.lock().unwrap().progress()
    }

    /// Number of wires whose exit edge is lit.
    pub fn lit_wire_count(&self) -> u32 {
        self.inner.lock().unwrap().lit_wire_count() as u32
    }

    /// Convenience wrapper over `progress() == 1.0`.
    pub fn is_complete(&self) -> bool {
        self.inner.lock().unwrap().is_complete()
    }

    pub fn phase(&self) -> HackPhase {
        self.inner.lock().unwrap().state().into()
    }

    /// Re-lock the panel: restore each wire's reference layout and
    /// re-jumble it. The layout is not regenerated.
    pub fn reset(&self) {
        self.inner.lock().unwrap().reset();
    }

    pub fn rows(&self) -> u32 {
        self.inner.lock().unwrap().config().rows() as u32
    }

    pub fn columns(&self) -> u32 {
        self.inner.lock().unwrap().config().columns() as u32
    }

    pub fn wires(&self) -> u32 {
        self.inner.lock().unwrap().config().wires() as u32
    }

    /// Per-wire jumble mistake counts; a zero signals a degenerate wire
    /// that started solved (telemetry).
    pub fn mistake_counts(&self) -> Vec<u32> {
        let hack = self.inner.lock().unwrap();
        (0..hack.wire_count())
            .filter_map(|w| hack.wire(w).map(|wire| wire.mistakes()))
            .collect()
    }

    /// Bulk snapshot of every cell (for efficient rendering)
    pub fn tiles(&self) -> Vec<TileState> {
        let hack = self.inner.lock().unwrap();
        let config = hack.config();
        let mut states = Vec::with_capacity(config.total_cells());
        for wire in 0..config.wires() {
            for row in 0..config.rows() {
                for col in 0..config.columns() {
                    let tile = hack.tile(wire, row, col).unwrap_or_default();
                    let lit = hack.is_lit(wire, row, col).unwrap_or(false);
                    let flat =
                        wire * config.cells_per_wire() + row * config.columns() + col;
                    states.push(TileState {
                        wire: wire as u8,
                        row: row as u8,
                        col: col as u8,
                        flat_index: flat as u32,
                        kind: tile.shape().into(),
                        rotation: tile.rotation(),
                        lit,
                    });
                }
            }
        }
        states
    }

    /// Serialize the session state as JSON for saving or debugging
    pub fn serialize(&self) -> String {
        let tiles: Vec<serde_json::Value> = self
            .tiles()
            .iter()
            .map(|t| {
                serde_json::json!({
                    "wire": t.wire,
                    "row": t.row,
                    "col": t.col,
                    "kind": TileKind::name(t.kind),
                    "rotation": t.rotation,
                    "lit": t.lit,
                })
            })
            .collect();

        let hack = self.inner.lock().unwrap();
        serde_json::json!({
            "rows": hack.config().rows(),
            "columns": hack.config().columns(),
            "wires": hack.config().wires(),
            "phase": format!("{:?}", hack.state()),
            "progress": hack.progress(),
            "tiles": tiles,
        })
        .to_string()
    }
}
