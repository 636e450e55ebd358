use replica_shared::EntityId;

use crate::server::ClientKey;

/// Connection lifecycle notifications, drained once per tick by the caller.
/// Gameplay flows through systems and command processors, not events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerEvent {
    /// A client sent its first command and is now fully connected
    Connection {
        client_key: ClientKey,
        commanding_entity: Option<EntityId>,
    },
    /// A client was disconnected and its resources released
    Disconnection { client_key: ClientKey },
}
