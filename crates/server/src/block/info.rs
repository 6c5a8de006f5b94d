//! Static break and fuel metadata.

use std::time::Duration;

use crate::item::ItemStack;

/// Kind of tool held while breaking a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    None,
    Axe,
    Pickaxe,
    Shovel,
    Hoe,
    Shears,
}

/// The tool used to break a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tool {
    pub kind: ToolKind,
    /// Divisor applied to break time when the tool is effective.
    pub efficiency: f64,
}

impl Tool {
    /// An empty hand.
    pub const HAND: Tool = Tool {
        kind: ToolKind::None,
        efficiency: 1.0,
    };

    pub const fn new(kind: ToolKind, efficiency: f64) -> Self {
        Self { kind, efficiency }
    }
}

/// Which tools yield drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Harvestable {
    Always,
    Requires(ToolKind),
}

/// Which tool kind speeds up breaking, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effective {
    Nothing,
    Tool(ToolKind),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakInfo {
    pub hardness: f64,
    pub harvestable: Harvestable,
    pub effective: Effective,
    pub drops: Vec<ItemStack>,
}

impl BreakInfo {
    pub fn new(hardness: f64, harvestable: Harvestable, effective: Effective, drops: Vec<ItemStack>) -> Self {
        Self {
            hardness,
            harvestable,
            effective,
            drops,
        }
    }

    pub fn is_harvestable(&self, tool: Tool) -> bool {
        match self.harvestable {
            Harvestable::Always => true,
            Harvestable::Requires(kind) => tool.kind == kind,
        }
    }

    pub fn is_effective(&self, tool: Tool) -> bool {
        match self.effective {
            Effective::Nothing => false,
            Effective::Tool(kind) => tool.kind == kind,
        }
    }

    /// Time to break the block with `tool`.
    pub fn break_duration(&self, tool: Tool) -> Duration {
        let mut secs = if self.is_harvestable(tool) {
            self.hardness * 1.5
        } else {
            self.hardness * 5.0
        };
        if self.is_effective(tool) && tool.efficiency > 0.0 {
            secs /= tool.efficiency;
        }
        Duration::from_secs_f64(secs.max(0.0))
    }
}

/// How long a block burns in a furnace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuelInfo {
    pub duration: Duration,
}

impl FuelInfo {
    pub const fn new(duration: Duration) -> Self {
        Self { duration }
    }
}
