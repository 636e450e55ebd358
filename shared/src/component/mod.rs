pub mod component_kinds;
pub mod component_store;
pub mod replicate;

pub use component_kinds::{ComponentKind, ComponentKinds, MAX_COMPONENT_KINDS};
pub use component_store::{AnyComponentStore, ComponentStore};
pub use replicate::Replicate;
