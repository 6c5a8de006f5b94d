/// Opaque block state identifier. The engine stores these without
/// interpreting them; the game layer owns the registration table that gives
/// each id a meaning.
///
/// The one semantic the engine enforces is that `BlockId::AIR` (0) is the
/// empty cell: the world does not store it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BlockId(pub u16);

impl BlockId {
    /// The universal empty block.
    pub const AIR: BlockId = BlockId(0);

    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub const fn is_air(self) -> bool {
        self.0 == 0
    }
}
