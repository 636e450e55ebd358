/// One discrete simulation step. Ticks wrap at the u16 boundary and compare
/// with the sequence arithmetic in `wrapping_number`.
pub type Tick = u16;

/// An entity's slot index within its `EntityStore`. Ids are dense, always
/// less than the store's fixed capacity, and never reused while live.
pub type EntityId = u16;
