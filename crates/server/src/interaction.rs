//! Player-driven world interactions: using a held block on the world and
//! breaking blocks.
//!
//! Every entry point either records its writes in the transaction and
//! reports success, or reports failure having recorded nothing.

use rung_engine::world::face::Face;
use rung_engine::world::position::{BlockPos, Vec3};

use crate::block::info::Tool;
use crate::block::{AIR, Block};
use crate::entity::User;
use crate::particle::Particle;
use crate::tx::Tx;

/// Per-interaction placement bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UseContext {
    /// Items consumed from the held stack by this interaction.
    pub count_sub: u8,
}

impl UseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subtract_from_count(&mut self, n: u8) {
        self.count_sub = self.count_sub.saturating_add(n);
    }
}

/// Whether the interaction described by `ctx` actually placed a block.
pub fn placed(ctx: &UseContext) -> bool {
    ctx.count_sub > 0
}

/// Find the cell a block used on `pos`/`face` would go into.
///
/// Clicking a replaceable block replaces it and counts as clicking its top
/// face. Otherwise the cell on the clicked side is used if it is replaceable.
pub fn first_replaceable(
    tx: &Tx<'_, '_>,
    pos: BlockPos,
    face: Face,
    with: &Block,
) -> Option<(BlockPos, Face)> {
    if tx.block(pos).replaceable_by(with) {
        return Some((pos, Face::Up));
    }
    let side = pos.side(face);
    if tx.block(side).replaceable_by(with) {
        return Some((side, face));
    }
    None
}

/// Write `block` at `pos` on behalf of `user`, unless the block would end up
/// inside the user.
pub fn place(tx: &mut Tx<'_, '_>, pos: BlockPos, block: Block, user: &dyn User, ctx: &mut UseContext) {
    let user_box = user.bbox();
    let obstructed = block
        .model()
        .bboxes()
        .iter()
        .any(|b| b.translate(pos.origin()).intersects(&user_box));
    if obstructed {
        tracing::debug!(?pos, user = user.name(), "placement obstructed by user");
        return;
    }
    if tx.set_block(pos, block) {
        ctx.subtract_from_count(1);
    }
}

/// Use `held` on the `face` of the block at `pos`.
///
/// Blocks with their own placement logic decide for themselves; everything
/// else goes into the first replaceable cell unchanged.
pub fn use_item_on_block(
    tx: &mut Tx<'_, '_>,
    held: &Block,
    pos: BlockPos,
    face: Face,
    click: Vec3,
    user: &mut dyn User,
    ctx: &mut UseContext,
) -> bool {
    if let Some(custom) = held.use_on_block() {
        return custom.use_on_block(pos, face, click, tx, user, ctx);
    }
    let Some((target, _)) = first_replaceable(tx, pos, face, held) else {
        return false;
    };
    place(tx, target, *held, user, ctx);
    placed(ctx)
}

/// Break the block at `pos` with `tool`: clear the cell, show break
/// particles and drop whatever the tool harvests. Returns false, writing
/// nothing, when the block cannot be broken.
pub fn break_block(tx: &mut Tx<'_, '_>, pos: BlockPos, tool: Tool) -> bool {
    let block = tx.block(pos);
    let Some(breakable) = block.breakable() else {
        return false;
    };
    let info = breakable.break_info();
    let centre = pos.centre();

    tx.set_block(pos, AIR);
    tx.add_particle(centre, Particle::BlockBreak(block));
    if info.is_harvestable(tool) {
        for stack in info.drops {
            tx.drop_item(stack, centre);
        }
    }
    true
}
