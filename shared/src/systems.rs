//! System capability traits.
//!
//! Systems are polymorphic over disjoint capability sets rather than one
//! interface — a physics system may be both a `ServerSystem` and a
//! `ClientPredictor`. Dispatch happens in registration order, and a tick is
//! bracketed by `begin_update`/`end_update` so structural changes from any
//! system in the pass commit together at the tick boundary.

use crate::{command::Command, entity::entity_store::EntityStore, types::EntityId};

/// Runs once per server tick over the live store
pub trait ServerSystem {
    fn server_update(&mut self, store: &mut EntityStore);
}

/// Runs on the client, over the interpolated render snapshot
pub trait ClientSystem {
    fn client_update(&mut self, store: &mut EntityStore);
    fn client_render(&mut self, store: &EntityStore);
}

/// Applies one client command to the live server store.
///
/// `lag_compensated` is the retained snapshot store closest to what the
/// client saw when it issued the command, or `None` when history no longer
/// covers it — processors must degrade gracefully in that case.
pub trait ServerCommandProcessor<C: Command> {
    fn process_client_command(
        &mut self,
        store: &mut EntityStore,
        commanding_entity: EntityId,
        command: &C,
        lag_compensated: Option<&EntityStore>,
    );
}

/// Replays a not-yet-acknowledged command against a predicted scratch store.
/// Must apply the same state change `ServerCommandProcessor` would, or the
/// client's own entity will visibly snap on reconciliation.
pub trait ClientPredictor<C: Command> {
    fn predict_client_command(
        &mut self,
        store: &mut EntityStore,
        commanding_entity: EntityId,
        command: &C,
    );
}
