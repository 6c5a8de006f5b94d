//! Entities as far as block logic is concerned.

use rung_engine::world::position::Vec3;

use crate::item::ItemStack;
use crate::model::Aabb;
use crate::tx::Tx;

/// Anything that occupies space in the world.
pub trait Entity {
    /// Feet position.
    fn position(&self) -> Vec3;

    /// World-space bounding box.
    fn bbox(&self) -> Aabb;

    /// Fall-distance tracking, for entities that take fall damage.
    fn fall_distance_mut(&mut self) -> Option<&mut dyn FallDistance> {
        None
    }
}

/// Accumulated fall distance, used to compute fall damage.
pub trait FallDistance {
    fn fall_distance(&self) -> f64;
    fn reset_fall_distance(&mut self);
}

/// The entity performing an interaction.
pub trait User: Entity {
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub position: Vec3,
    fall_distance: f64,
}

impl Player {
    const WIDTH: f64 = 0.6;
    const HEIGHT: f64 = 1.8;

    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            fall_distance: 0.0,
        }
    }

    /// Move down by `dy` while airborne.
    pub fn fall(&mut self, dy: f64) {
        self.position.y -= dy;
        self.fall_distance += dy;
    }
}

impl Entity for Player {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn bbox(&self) -> Aabb {
        let half = Self::WIDTH / 2.0;
        Aabb::new(
            Vec3::new(-half, 0.0, -half),
            Vec3::new(half, Self::HEIGHT, half),
        )
        .translate(self.position)
    }

    fn fall_distance_mut(&mut self) -> Option<&mut dyn FallDistance> {
        Some(self)
    }
}

impl FallDistance for Player {
    fn fall_distance(&self) -> f64 {
        self.fall_distance
    }

    fn reset_fall_distance(&mut self) {
        self.fall_distance = 0.0;
    }
}

impl User for Player {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A dropped item lying in the world. It does not track fall distance.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEntity {
    pub stack: ItemStack,
    pub position: Vec3,
}

impl ItemEntity {
    const SIZE: f64 = 0.25;

    pub fn new(stack: ItemStack, position: Vec3) -> Self {
        Self { stack, position }
    }
}

impl Entity for ItemEntity {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn bbox(&self) -> Aabb {
        let half = Self::SIZE / 2.0;
        Aabb::new(
            Vec3::new(-half, 0.0, -half),
            Vec3::new(half, Self::SIZE, half),
        )
        .translate(self.position)
    }
}

/// Run the entity-inside reaction of every block the entity overlaps.
pub fn tick_entity_inside(tx: &mut Tx<'_, '_>, entity: &mut dyn Entity) {
    for pos in entity.bbox().cells() {
        let block = tx.block(pos);
        if let Some(insider) = block.entity_insider() {
            insider.entity_inside(pos, tx, entity);
        }
    }
}
