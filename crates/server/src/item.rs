use crate::block::Block;

/// A number of items of one kind. Blocks double as their own item form; the
/// item identity comes from the block's `ItemEncoder` capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemStack {
    pub item: Block,
    pub count: u8,
}

impl ItemStack {
    pub const fn new(item: Block, count: u8) -> Self {
        Self { item, count }
    }

    /// Identifier and meta of the item, if the block has an item form.
    pub fn encode(&self) -> Option<(&'static str, i16)> {
        self.item.item_encoder().map(|e| e.encode_item())
    }
}
