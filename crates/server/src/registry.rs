//! The block registration table and the persisted identity format.
//!
//! Built once at startup by [`Registry::bootstrap`] and then shared
//! read-only (`&Registry` / `Arc<Registry>`). State ids are assigned in
//! registration order, so the order of [`Block::all_states`] is the on-wire
//! numbering.

use std::collections::HashMap;
use std::fmt;

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use rung_engine::world::block::BlockId;

use crate::block::Block;

/// A single block-state property value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Str(String),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Int(i) => write!(f, "{i}"),
            PropertyValue::Str(s) => f.write_str(s),
        }
    }
}

/// Block-state properties, in the order the block declares them.
pub type Properties = IndexMap<String, PropertyValue>;

/// Persisted block form: `{"name": "minecraft:ladder", "properties": {"facing_direction": 2}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedBlock {
    pub name: String,
    #[serde(default)]
    pub properties: Properties,
}

impl EncodedBlock {
    pub fn of(block: &Block) -> Self {
        let (name, properties) = block.encode_block();
        Self {
            name: name.to_string(),
            properties,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("encoding block identity")
    }

    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("decoding block identity")
    }
}

/// Lookup key: `("minecraft:ladder", [("facing_direction", Int(2))])`, with
/// properties sorted by name so that declaration order does not matter on
/// decode. Values keep their type: `Int(2)` and `Str("2")` are different keys.
type IdentityKey = (String, Vec<(String, PropertyValue)>);

fn identity_key(name: &str, properties: &Properties) -> IdentityKey {
    let mut props: Vec<(String, PropertyValue)> = properties
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    props.sort_by(|a, b| a.0.cmp(&b.0));
    (name.to_string(), props)
}

pub struct Registry {
    states: Vec<Block>,
    ids: HashMap<Block, BlockId>,
    by_identity: HashMap<IdentityKey, BlockId>,
    items: HashMap<(String, i16), BlockId>,
}

impl Registry {
    /// Register every known block state.
    pub fn bootstrap() -> Result<Self> {
        let registry = Self::from_states(Block::all_states())?;
        tracing::debug!(states = registry.len(), "block registry ready");
        Ok(registry)
    }

    /// Register `states` in order. The first state must be air.
    pub fn from_states(states: impl IntoIterator<Item = Block>) -> Result<Self> {
        let mut registry = Registry {
            states: Vec::new(),
            ids: HashMap::new(),
            by_identity: HashMap::new(),
            items: HashMap::new(),
        };

        for block in states {
            let raw = u16::try_from(registry.states.len()).context("too many block states")?;
            let id = BlockId::new(raw);
            if id == BlockId::AIR && !block.is_air() {
                bail!("state 0 must be air, got {}", block.name());
            }

            let (name, properties) = block.encode_block();
            let key = identity_key(name, &properties);
            if registry.by_identity.contains_key(&key) || registry.ids.contains_key(&block) {
                bail!("duplicate block state {name} {properties:?}");
            }

            registry.by_identity.insert(key, id);
            registry.ids.insert(block, id);
            if let Some(encoder) = block.item_encoder() {
                // The first state registered for an item is its placed form.
                let (item, meta) = encoder.encode_item();
                registry.items.entry((item.to_string(), meta)).or_insert(id);
            }
            registry.states.push(block);
        }

        if registry.states.is_empty() {
            bail!("registry needs at least the air state");
        }
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// All states in id order.
    pub fn states(&self) -> &[Block] {
        &self.states
    }

    pub fn id(&self, block: &Block) -> Option<BlockId> {
        self.ids.get(block).copied()
    }

    pub fn block(&self, id: BlockId) -> Option<Block> {
        self.states.get(id.0 as usize).copied()
    }

    /// Inverse of [`Block::encode_block`]. Stored states are returned as-is,
    /// including ladders facing up or down.
    pub fn decode_block(&self, name: &str, properties: &Properties) -> Option<Block> {
        let id = self.by_identity.get(&identity_key(name, properties))?;
        self.block(*id)
    }

    pub fn decode(&self, encoded: &EncodedBlock) -> Option<Block> {
        self.decode_block(&encoded.name, &encoded.properties)
    }

    /// Inverse of `ItemEncoder::encode_item`: the block an item places by
    /// default.
    pub fn decode_item(&self, name: &str, meta: i16) -> Option<Block> {
        let id = self.items.get(&(name.to_string(), meta))?;
        self.block(*id)
    }
}
