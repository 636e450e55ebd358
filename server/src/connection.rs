use log::info;
use replica_shared::{EntityId, Tick, Transport};

use crate::server::ClientKey;

/// A client is `Connecting` from acceptance until its first command arrives,
/// `Connected` while exchanging commands and snapshots, and `Disconnected`
/// just before its slot is released.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ConnectionState {
    Connecting,
    Connected,
    Disconnected,
}

/// Per-client connection: transport handle, lifecycle state, and the two
/// acknowledgement cursors driving delta encoding and reconciliation.
pub(crate) struct ClientConnection {
    key: ClientKey,
    state: ConnectionState,
    pub(crate) transport: Box<dyn Transport>,
    /// The entity this client commands, if the spawn hook assigned one
    pub(crate) commanding_entity: Option<EntityId>,
    /// Newest snapshot tick the client reported holding. Used as the delta
    /// basis while the history ring still retains that tick.
    pub(crate) acked_snapshot: Option<Tick>,
    /// Render tick of the last command processed, echoed as `command_ack`
    pub(crate) last_command_tick: Option<Tick>,
}

impl ClientConnection {
    pub(crate) fn new(key: ClientKey, transport: Box<dyn Transport>) -> Self {
        info!("client {}: accepted, awaiting first command", key);
        Self {
            key,
            state: ConnectionState::Connecting,
            transport,
            commanding_entity: None,
            acked_snapshot: None,
            last_command_tick: None,
        }
    }

    pub(crate) fn state(&self) -> ConnectionState {
        self.state
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub(crate) fn set_state(&mut self, next: ConnectionState) {
        if self.state != next {
            info!("client {}: {:?} -> {:?}", self.key, self.state, next);
            self.state = next;
        }
    }
}
