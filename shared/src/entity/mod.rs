pub mod entity;
pub mod entity_store;

pub use entity::{Entity, EntityState};
pub use entity_store::EntityStore;
