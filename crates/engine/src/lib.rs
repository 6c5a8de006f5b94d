pub mod causal;
pub mod rules;
pub mod world;
