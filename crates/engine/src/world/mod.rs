pub mod block;
pub mod face;
pub mod position;
pub mod tx;

use block::BlockId;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use position::BlockPos;
use tx::Transaction;

/// The block lattice. Thread-safe, lock-sharded by cell.
///
/// Storage is sparse: only non-air cells are kept, so an empty world costs
/// nothing and reads of unset cells return AIR. Time and causality live in
/// `causal::CausalGraph`, not here.
///
/// A cell may also hold a liquid in a second layer, underneath a block that
/// displaces it (a ladder standing in water).
pub struct World {
    cells: DashMap<BlockPos, BlockId>,
    liquids: DashMap<BlockPos, BlockId>,
}

impl World {
    pub fn new() -> Self {
        Self {
            cells: DashMap::new(),
            liquids: DashMap::new(),
        }
    }

    /// Read a block at an absolute position.
    pub fn get_block(&self, pos: BlockPos) -> BlockId {
        self.cells.get(&pos).map(|b| *b).unwrap_or(BlockId::AIR)
    }

    /// Write a block and return what the cell held before.
    ///
    /// Takes `&self` because `DashMap` provides interior mutability via
    /// per-shard locking.
    pub fn set_block(&self, pos: BlockPos, block: BlockId) -> BlockId {
        store(&self.cells, pos, block)
    }

    /// Write `block` only if the cell still holds `expected`. Returns whether
    /// the write happened.
    pub fn compare_and_set(&self, pos: BlockPos, expected: BlockId, block: BlockId) -> bool {
        store_if(&self.cells, pos, expected, block)
    }

    /// The liquid in the second layer of `pos`, AIR if there is none.
    pub fn get_liquid(&self, pos: BlockPos) -> BlockId {
        self.liquids.get(&pos).map(|b| *b).unwrap_or(BlockId::AIR)
    }

    pub fn set_liquid(&self, pos: BlockPos, liquid: BlockId) -> BlockId {
        store(&self.liquids, pos, liquid)
    }

    pub fn compare_and_set_liquid(&self, pos: BlockPos, expected: BlockId, liquid: BlockId) -> bool {
        store_if(&self.liquids, pos, expected, liquid)
    }

    /// Fill the inclusive box between `a` and `b` with `block`.
    pub fn fill(&self, a: BlockPos, b: BlockPos, block: BlockId) {
        for x in a.x.min(b.x)..=a.x.max(b.x) {
            for y in a.y.min(b.y)..=a.y.max(b.y) {
                for z in a.z.min(b.z)..=a.z.max(b.z) {
                    self.set_block(BlockPos::new(x, y, z), block);
                }
            }
        }
    }

    /// Number of non-air cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Open a transactional view of this world.
    pub fn transaction(&self) -> Transaction<'_> {
        Transaction::new(self)
    }
}

fn store(layer: &DashMap<BlockPos, BlockId>, pos: BlockPos, block: BlockId) -> BlockId {
    let previous = if block.is_air() {
        layer.remove(&pos).map(|(_, b)| b)
    } else {
        layer.insert(pos, block)
    };
    previous.unwrap_or(BlockId::AIR)
}

/// Compare-and-swap under the shard lock of `pos`.
fn store_if(layer: &DashMap<BlockPos, BlockId>, pos: BlockPos, expected: BlockId, block: BlockId) -> bool {
    match layer.entry(pos) {
        Entry::Occupied(mut cell) => {
            if *cell.get() != expected {
                return false;
            }
            if block.is_air() {
                cell.remove();
            } else {
                cell.insert(block);
            }
        }
        Entry::Vacant(cell) => {
            if !expected.is_air() {
                return false;
            }
            if !block.is_air() {
                cell.insert(block);
            }
        }
    }
    true
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
