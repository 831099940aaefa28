use serde::{Deserialize, Serialize};

/// One of the four grid-aligned connection directions a tile may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Port {
    North,
    East,
    South,
    West,
}

impl Port {
    /// All ports in rotation order (North→East→South→West).
    pub const ALL: [Port; 4] = [Port::North, Port::East, Port::South, Port::West];

    fn index(self) -> u8 {
        match self {
            Port::North => 0,
            Port::East => 1,
            Port::South => 2,
            Port::West => 3,
        }
    }

    fn from_index(index: u8) -> Port {
        Self::ALL[(index % 4) as usize]
    }

    /// Rotate by `quarter_turns` 90° steps, cycling North→East→South→West.
    pub fn rotated(self, quarter_turns: u8) -> Port {
        Port::from_index(self.index() + quarter_turns % 4)
    }

    /// The port on a neighboring tile that faces back at this one.
    pub fn reciprocal(self) -> Port {
        Port::from_index(self.index() + 2)
    }

    /// Row/column delta toward the neighbor behind this port.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Port::North => (-1, 0),
            Port::East => (0, 1),
            Port::South => (1, 0),
            Port::West => (0, -1),
        }
    }
}

/// A set of open ports, packed as a 4-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PortSet(u8);

impl PortSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build a set from a slice of ports.
    pub fn of(ports: &[Port]) -> Self {
        let mut set = Self::empty();
        for &port in ports {
            set.insert(port);
        }
        set
    }

    pub fn contains(self, port: Port) -> bool {
        self.0 & (1 << port.index()) != 0
    }

    pub fn insert(&mut self, port: Port) {
        self.0 |= 1 << port.index();
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the member ports in rotation order.
    pub fn iter(self) -> impl Iterator<Item = Port> {
        Port::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

/// Tile shape family.
///
/// `Straight` opens two opposite ports; the turn families open two adjacent
/// ports, mirrored relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileShape {
    Straight,
    TurnA,
    TurnB,
}

impl TileShape {
    /// Open ports at rotation 0.
    fn base_ports(self) -> [Port; 2] {
        match self {
            TileShape::Straight => [Port::West, Port::East],
            TileShape::TurnA => [Port::North, Port::East],
            TileShape::TurnB => [Port::North, Port::West],
        }
    }
}

/// Open ports of a shape at a rotation. Pure; rotation is reduced mod 4.
pub fn open_ports(shape: TileShape, rotation: u8) -> PortSet {
    let turns = rotation % 4;
    let [a, b] = shape.base_ports();
    PortSet::of(&[a.rotated(turns), b.rotated(turns)])
}

/// Whether both ports are open on the shape at the rotation.
pub fn connects(shape: TileShape, rotation: u8, a: Port, b: Port) -> bool {
    let ports = open_ports(shape, rotation);
    ports.contains(a) && ports.contains(b)
}

/// A single cell of a wire grid: a shape plus its current rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    shape: TileShape,
    rotation: u8,
}

impl Tile {
    pub fn new(shape: TileShape, rotation: u8) -> Self {
        Self {
            shape,
            rotation: rotation % 4,
        }
    }

    pub fn shape(&self) -> TileShape {
        self.shape
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn set_shape(&mut self, shape: TileShape) {
        self.shape = shape;
    }

    pub fn set_rotation(&mut self, rotation: u8) {
        self.rotation = rotation % 4;
    }

    /// Advance the rotation by one 90° step, wrapping at 4.
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % 4;
    }

    pub fn open_ports(&self) -> PortSet {
        open_ports(self.shape, self.rotation)
    }

    pub fn opens(&self, port: Port) -> bool {
        self.open_ports().contains(port)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileShape::Straight, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_port_mapping() {
        assert_eq!(
            open_ports(TileShape::Straight, 0),
            PortSet::of(&[Port::West, Port::East])
        );
        assert_eq!(
            open_ports(TileShape::TurnA, 0),
            PortSet::of(&[Port::North, Port::East])
        );
        assert_eq!(
            open_ports(TileShape::TurnB, 0),
            PortSet::of(&[Port::North, Port::West])
        );
    }

    #[test]
    fn test_rotation_cycles_ports() {
        // Straight alternates between horizontal and vertical
        assert_eq!(
            open_ports(TileShape::Straight, 1),
            PortSet::of(&[Port::North, Port::South])
        );
        assert_eq!(
            open_ports(TileShape::Straight, 2),
            open_ports(TileShape::Straight, 0)
        );

        // TurnA walks through all four corners
        assert_eq!(
            open_ports(TileShape::TurnA, 1),
            PortSet::of(&[Port::East, Port::South])
        );
        assert_eq!(
            open_ports(TileShape::TurnA, 2),
            PortSet::of(&[Port::South, Port::West])
        );
        assert_eq!(
            open_ports(TileShape::TurnA, 3),
            PortSet::of(&[Port::West, Port::North])
        );
    }

    #[test]
    fn test_rotation_reduced_mod_4() {
        for shape in [TileShape::Straight, TileShape::TurnA, TileShape::TurnB] {
            for rotation in 0..4u8 {
                assert_eq!(
                    open_ports(shape, rotation),
                    open_ports(shape, rotation + 4),
                    "{:?} at rotation {} differs from {}",
                    shape,
                    rotation,
                    rotation + 4
                );
            }
        }
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for shape in [TileShape::Straight, TileShape::TurnA, TileShape::TurnB] {
            for start in 0..4u8 {
                let mut tile = Tile::new(shape, start);
                let before = tile.open_ports();
                for _ in 0..4 {
                    tile.rotate();
                }
                assert_eq!(tile.rotation(), start);
                assert_eq!(tile.open_ports(), before);
            }
        }
    }

    #[test]
    fn test_connects_requires_both_ports() {
        assert!(connects(TileShape::Straight, 0, Port::West, Port::East));
        assert!(!connects(TileShape::Straight, 0, Port::West, Port::North));
        assert!(connects(TileShape::TurnA, 1, Port::East, Port::South));
        assert!(!connects(TileShape::TurnA, 1, Port::North, Port::East));
    }

    #[test]
    fn test_every_tile_opens_exactly_two_ports() {
        for shape in [TileShape::Straight, TileShape::TurnA, TileShape::TurnB] {
            for rotation in 0..4u8 {
                assert_eq!(open_ports(shape, rotation).len(), 2);
            }
        }
    }

    #[test]
    fn test_reciprocal_and_offset_agree() {
        for port in Port::ALL {
            assert_eq!(port.reciprocal().reciprocal(), port);
            let (dr, dc) = port.offset();
            let (rr, rc) = port.reciprocal().offset();
            assert_eq!((dr + rr, dc + rc), (0, 0));
        }
    }

    #[test]
    fn test_turn_families_are_mirrored() {
        // For every TurnA rotation there is a TurnB rotation with the same
        // ports, and vice versa; the families differ only in winding.
        for rotation in 0..4u8 {
            let a = open_ports(TileShape::TurnA, rotation);
            assert!((0..4u8).any(|r| open_ports(TileShape::TurnB, r) == a));
        }
    }

    #[test]
    fn test_tile_serde_round_trip() {
        let tile = Tile::new(TileShape::TurnB, 3);
        let json = serde_json::to_string(&tile).unwrap();
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tile);
    }
}
