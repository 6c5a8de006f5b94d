pub mod block;
pub mod changes;
pub mod entity;
pub mod interaction;
pub mod item;
pub mod model;
pub mod particle;
pub mod registry;
pub mod rules;
pub mod tx;
