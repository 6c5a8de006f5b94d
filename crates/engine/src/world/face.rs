use super::position::BlockPos;

/// One of the six sides of a cell.
///
/// The declaration order is the canonical order: it fixes the persisted
/// index of each face (`Down` = 0 .. `East` = 5) and the order in which
/// state spaces are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    /// -Y
    Down,
    /// +Y
    Up,
    /// -Z
    North,
    /// +Z
    South,
    /// -X
    West,
    /// +X
    East,
}

impl Face {
    /// All faces in canonical order.
    pub const ALL: [Face; 6] = [
        Face::Down,
        Face::Up,
        Face::North,
        Face::South,
        Face::West,
        Face::East,
    ];

    /// The four side faces, in canonical order.
    pub const HORIZONTAL: [Face; 4] = [Face::North, Face::South, Face::West, Face::East];

    pub const fn opposite(self) -> Face {
        match self {
            Face::Down => Face::Up,
            Face::Up => Face::Down,
            Face::North => Face::South,
            Face::South => Face::North,
            Face::West => Face::East,
            Face::East => Face::West,
        }
    }

    pub const fn is_horizontal(self) -> bool {
        !matches!(self, Face::Up | Face::Down)
    }

    pub const fn index(self) -> i32 {
        self as i32
    }

    pub const fn from_index(index: i32) -> Option<Face> {
        match index {
            0 => Some(Face::Down),
            1 => Some(Face::Up),
            2 => Some(Face::North),
            3 => Some(Face::South),
            4 => Some(Face::West),
            5 => Some(Face::East),
            _ => None,
        }
    }

    /// Unit step along this face.
    pub const fn offset(self) -> (i64, i64, i64) {
        match self {
            Face::Down => (0, -1, 0),
            Face::Up => (0, 1, 0),
            Face::North => (0, 0, -1),
            Face::South => (0, 0, 1),
            Face::West => (-1, 0, 0),
            Face::East => (1, 0, 0),
        }
    }

    /// The face of `from` that touches `to`, if the two cells are adjacent.
    pub fn between(from: BlockPos, to: BlockPos) -> Option<Face> {
        Face::ALL.into_iter().find(|f| from.side(*f) == to)
    }
}
