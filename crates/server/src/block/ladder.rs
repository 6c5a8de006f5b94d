//! Wall-mounted climbable block.

use std::time::Duration;

use indexmap::IndexMap;
use rung_engine::world::face::Face;
use rung_engine::world::position::{BlockPos, Vec3};

use super::capability::{
    BlockEncoder, Breakable, EntityInsider, Fuel, ItemEncoder, LightDiffuser, LiquidDisplacer,
    Modelable, NeighbourUpdateTicker, SideCloser, UseOnBlock,
};
use super::info::{BreakInfo, Effective, FuelInfo, Harvestable, ToolKind};
use super::{Block, AIR};
use crate::entity::{Entity, User};
use crate::interaction::{first_replaceable, place, placed, UseContext};
use crate::item::ItemStack;
use crate::model::BlockModel;
use crate::particle::Particle;
use crate::registry::{Properties, PropertyValue};
use crate::tx::Tx;

/// Faces tried, in this order, when the clicked wall cannot hold a ladder.
/// The order decides which wall wins when several qualify and must not change.
const SUPPORT_SEARCH: [Face; 4] = [Face::South, Face::North, Face::East, Face::West];

/// Fully opaque diffusion level. Such a neighbour still counts as a wall
/// during the placement search.
const OPAQUE: u8 = 15;

/// A ladder, attached to the cell on the opposite side of `facing`.
///
/// `Face::Up` and `Face::Down` are never produced by placement but are valid
/// stored states: they encode, model and react like any other facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ladder {
    pub facing: Face,
}

impl Ladder {
    pub const fn new(facing: Face) -> Self {
        Self { facing }
    }

    /// One ladder per facing, in canonical face order.
    pub fn all_states() -> Vec<Ladder> {
        Face::ALL.into_iter().map(Ladder::new).collect()
    }

    /// The cell this ladder leans on.
    pub fn support(&self, pos: BlockPos) -> BlockPos {
        pos.side(self.facing.opposite())
    }
}

/// Whether a cell offers no rigid support (it lets light through).
fn diffuses(tx: &Tx<'_, '_>, pos: BlockPos) -> bool {
    tx.block(pos).light_diffuser().is_some()
}

impl NeighbourUpdateTicker for Ladder {
    fn neighbour_update_tick(&self, pos: BlockPos, _changed: BlockPos, tx: &mut Tx<'_, '_>) {
        if !diffuses(tx, self.support(pos)) {
            return;
        }
        tracing::debug!(?pos, facing = ?self.facing, "ladder lost its support");
        let centre = pos.centre();
        tx.set_block(pos, AIR);
        tx.add_particle(centre, Particle::BlockBreak(Block::Ladder(*self)));
        tx.drop_item(ItemStack::new(Block::Ladder(*self), 1), centre);
    }
}

impl UseOnBlock for Ladder {
    fn use_on_block(
        &self,
        pos: BlockPos,
        face: Face,
        _click: Vec3,
        tx: &mut Tx<'_, '_>,
        user: &mut dyn User,
        ctx: &mut UseContext,
    ) -> bool {
        let Some((pos, face)) = first_replaceable(tx, pos, face, &Block::Ladder(*self)) else {
            return false;
        };
        if !face.is_horizontal() {
            return false;
        }

        let mut facing = face;
        if diffuses(tx, pos.side(face.opposite())) {
            let wall = SUPPORT_SEARCH.into_iter().find(|&f| {
                match tx.block(pos.side(f)).light_diffuser() {
                    None => true,
                    Some(d) => d.light_diffusion_level() == OPAQUE,
                }
            });
            match wall {
                Some(f) => facing = f.opposite(),
                None => {
                    tracing::debug!(?pos, "no wall to hang a ladder on");
                    return false;
                }
            }
        }

        place(tx, pos, Block::Ladder(Ladder::new(facing)), user, ctx);
        placed(ctx)
    }
}

impl EntityInsider for Ladder {
    fn entity_inside(&self, _pos: BlockPos, _tx: &mut Tx<'_, '_>, entity: &mut dyn Entity) {
        if let Some(falling) = entity.fall_distance_mut() {
            falling.reset_fall_distance();
        }
    }
}

impl SideCloser for Ladder {
    fn side_closed(&self, _pos: BlockPos, _side: BlockPos, _tx: &Tx<'_, '_>) -> bool {
        false
    }
}

/// Ladders can stand in source water; the water stays in the cell.
impl LiquidDisplacer for Ladder {
    fn can_displace(&self, liquid: &Block) -> bool {
        matches!(liquid, Block::Water(_))
    }
}

impl LightDiffuser for Ladder {
    fn light_diffusion_level(&self) -> u8 {
        0
    }
}

impl Breakable for Ladder {
    fn break_info(&self) -> BreakInfo {
        BreakInfo::new(
            0.4,
            Harvestable::Always,
            Effective::Tool(ToolKind::Axe),
            vec![ItemStack::new(Block::Ladder(*self), 1)],
        )
    }
}

impl Fuel for Ladder {
    fn fuel_info(&self) -> FuelInfo {
        FuelInfo::new(Duration::from_secs(15))
    }
}

impl ItemEncoder for Ladder {
    fn encode_item(&self) -> (&'static str, i16) {
        ("minecraft:ladder", 0)
    }
}

impl BlockEncoder for Ladder {
    fn encode_block(&self) -> (&'static str, Properties) {
        (
            "minecraft:ladder",
            IndexMap::from([(
                "facing_direction".to_string(),
                PropertyValue::Int(self.facing.index()),
            )]),
        )
    }
}

impl Modelable for Ladder {
    fn model(&self) -> BlockModel {
        BlockModel::Ladder {
            facing: self.facing,
        }
    }
}
