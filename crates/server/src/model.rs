//! Collision geometry descriptors.

use rung_engine::world::face::Face;
use rung_engine::world::position::{BlockPos, Vec3};

use crate::tx::Tx;

/// Axis-aligned box, in cell-local or world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const UNIT: Aabb = Aabb {
        min: Vec3::new(0.0, 0.0, 0.0),
        max: Vec3::new(1.0, 1.0, 1.0),
    };

    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Move the `face` side of the box outward by `by` (inward when negative).
    pub fn extend_towards(mut self, face: Face, by: f64) -> Self {
        match face {
            Face::Down => self.min.y -= by,
            Face::Up => self.max.y += by,
            Face::North => self.min.z -= by,
            Face::South => self.max.z += by,
            Face::West => self.min.x -= by,
            Face::East => self.max.x += by,
        }
        self
    }

    pub fn translate(self, by: Vec3) -> Self {
        Self::new(self.min.add(by), self.max.add(by))
    }

    /// Strict overlap; boxes that only touch do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Cells this box overlaps.
    pub fn cells(&self) -> Vec<BlockPos> {
        let lo = self.min.block_pos();
        // A box ending exactly on a cell boundary does not reach into the next cell.
        let hi = Vec3::new(self.max.x - 1e-9, self.max.y - 1e-9, self.max.z - 1e-9).block_pos();
        let mut out = Vec::new();
        for x in lo.x..=hi.x {
            for y in lo.y..=hi.y {
                for z in lo.z..=hi.z {
                    out.push(BlockPos::new(x, y, z));
                }
            }
        }
        out
    }
}

/// Thickness of a ladder slab, in sixteenths of a block.
const LADDER_THICKNESS: f64 = 3.0 / 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockModel {
    /// No geometry at all (air, liquids).
    Empty,
    /// A full cube.
    Solid,
    /// The bottom half of a cube.
    Slab,
    /// A thin slab pressed against the support on the side opposite `facing`.
    Ladder { facing: Face },
}

impl BlockModel {
    /// Collision boxes in cell-local coordinates.
    pub fn bboxes(&self) -> Vec<Aabb> {
        match self {
            BlockModel::Empty => Vec::new(),
            BlockModel::Solid => vec![Aabb::UNIT],
            BlockModel::Slab => vec![Aabb::UNIT.extend_towards(Face::Up, -0.5)],
            BlockModel::Ladder { facing } => {
                vec![Aabb::UNIT.extend_towards(*facing, LADDER_THICKNESS - 1.0)]
            }
        }
    }

    /// Whether the given face of the model covers the whole cell side.
    pub fn face_solid(&self, face: Face) -> bool {
        match self {
            BlockModel::Solid => true,
            BlockModel::Slab => face == Face::Down,
            BlockModel::Empty | BlockModel::Ladder { .. } => false,
        }
    }
}

/// Faces of the block at `pos` not hidden by a neighbour.
///
/// A neighbour hides the shared side when it reports the side closed, or,
/// for blocks without a [`SideCloser`](crate::block::capability::SideCloser)
/// opinion, when its model covers that side.
pub fn visible_faces(tx: &Tx<'_, '_>, pos: BlockPos) -> Vec<Face> {
    Face::ALL
        .into_iter()
        .filter(|&face| {
            let side = pos.side(face);
            let neighbour = tx.block(side);
            let closed = match neighbour.side_closer() {
                Some(closer) => closer.side_closed(side, pos, tx),
                None => neighbour.model().face_solid(face.opposite()),
            };
            !closed
        })
        .collect()
}
