use crate::block::Block;

/// Visual effects block logic can ask the world to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Particle {
    /// Fragments of `Block` flying off a destroyed cell.
    BlockBreak(Block),
}
