use std::collections::{HashMap, VecDeque};

use log::warn;

use replica_shared::{
    write_delta, ByteReader, ByteWriter, Command, CommandMessage, EntityId, EntityStore, Protocol,
    Serde, ServerCommandProcessor, ServerSystem, SnapshotHeader, Tick, Transport,
};

use crate::{
    connection::{ClientConnection, ConnectionState},
    error::ReplicaServerError,
    events::ServerEvent,
    history::SnapshotHistory,
    server_config::ServerConfig,
};

/// Handle identifying one accepted client
pub type ClientKey = u16;

/// Invoked when a client's first command arrives: spawn or pick the entity
/// that client will command, or `None` for a spectator.
pub type CommandingEntityFn = Box<dyn FnMut(&mut EntityStore) -> Option<EntityId> + Send>;

/// Invoked when a commanding client disconnects, with its entity
pub type ReleaseEntityFn = Box<dyn FnMut(&mut EntityStore, EntityId) + Send>;

/// The authoritative simulation endpoint.
///
/// Owns the single live [`EntityStore`], advances it once per `tick()` call,
/// and replicates it to every connected client as a delta against the newest
/// snapshot that client has acknowledged. Client commands are applied before
/// the systems run, against a lag-compensated view of the world resolved from
/// the retained history.
pub struct ReplicationServer<C: Command> {
    world: EntityStore,
    tick: Tick,
    history: SnapshotHistory,
    clients: HashMap<ClientKey, ClientConnection>,
    next_client_key: ClientKey,
    max_clients: usize,
    systems: Vec<Box<dyn ServerSystem>>,
    command_processors: Vec<Box<dyn ServerCommandProcessor<C>>>,
    on_connect: Option<CommandingEntityFn>,
    on_disconnect: Option<ReleaseEntityFn>,
    events: VecDeque<ServerEvent>,
    writer: ByteWriter,
}

impl<C: Command> ReplicationServer<C> {
    pub fn new(protocol: &Protocol, config: ServerConfig) -> Self {
        Self {
            world: protocol.new_store(),
            tick: 0,
            history: SnapshotHistory::new(config.max_history),
            clients: HashMap::new(),
            next_client_key: 0,
            max_clients: config.max_clients,
            systems: Vec::new(),
            command_processors: Vec::new(),
            on_connect: None,
            on_disconnect: None,
            events: VecDeque::new(),
            writer: ByteWriter::new(),
        }
    }

    // Registration. Dispatch order is registration order.

    pub fn register_system(&mut self, system: Box<dyn ServerSystem>) {
        self.systems.push(system);
    }

    pub fn register_command_processor(&mut self, processor: Box<dyn ServerCommandProcessor<C>>) {
        self.command_processors.push(processor);
    }

    pub fn on_client_connect(&mut self, hook: CommandingEntityFn) {
        self.on_connect = Some(hook);
    }

    pub fn on_client_disconnect(&mut self, hook: ReleaseEntityFn) {
        self.on_disconnect = Some(hook);
    }

    // Connection management

    /// Accept a new client over the given transport. The client stays in the
    /// connecting state, receiving nothing, until its first command arrives.
    pub fn accept_client(
        &mut self,
        transport: Box<dyn Transport>,
    ) -> Result<ClientKey, ReplicaServerError> {
        if self.clients.len() >= self.max_clients {
            return Err(ReplicaServerError::ClientLimitReached {
                limit: self.max_clients,
            });
        }
        while self.clients.contains_key(&self.next_client_key) {
            self.next_client_key = self.next_client_key.wrapping_add(1);
        }
        let key = self.next_client_key;
        self.next_client_key = self.next_client_key.wrapping_add(1);
        self.clients.insert(key, ClientConnection::new(key, transport));
        Ok(key)
    }

    /// Drop a client, releasing its commanding entity through the disconnect
    /// hook. In-flight messages for it are discarded with the transport.
    pub fn disconnect_client(&mut self, key: ClientKey) -> Result<(), ReplicaServerError> {
        let mut connection = self
            .clients
            .remove(&key)
            .ok_or(ReplicaServerError::UnknownClient(key))?;
        connection.set_state(ConnectionState::Disconnected);
        if let (Some(entity), Some(hook)) = (connection.commanding_entity, &mut self.on_disconnect)
        {
            hook(&mut self.world, entity);
        }
        self.events.push_back(ServerEvent::Disconnection { client_key: key });
        Ok(())
    }

    /// Drain connection lifecycle events accumulated since the last call
    pub fn take_events(&mut self) -> VecDeque<ServerEvent> {
        std::mem::take(&mut self.events)
    }

    // Simulation

    /// Advance the simulation by one tick: apply at most one pending command
    /// per client, run the registered systems, commit structural changes,
    /// record the snapshot, and send every connected client its delta.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.world.begin_update();
        self.process_client_commands();
        for system in &mut self.systems {
            system.server_update(&mut self.world);
        }
        self.world.end_update();
        self.history.push_copy(&self.world, self.tick);
        self.send_snapshots();
    }

    fn process_client_commands(&mut self) {
        let mut keys: Vec<ClientKey> = self.clients.keys().copied().collect();
        keys.sort_unstable();
        for key in keys {
            let Some(bytes) = self
                .clients
                .get_mut(&key)
                .and_then(|connection| connection.transport.try_receive())
            else {
                continue;
            };
            let mut reader = ByteReader::new(&bytes);
            let message = match CommandMessage::<C>::de(&mut reader) {
                Ok(message) => message,
                Err(err) => {
                    warn!("client {}: dropped undecodable command: {}", key, err);
                    continue;
                }
            };

            // the first command completes the handshake
            let connecting = self
                .clients
                .get(&key)
                .map(|connection| connection.state() == ConnectionState::Connecting)
                .unwrap_or(false);
            if connecting {
                let commanding_entity = match &mut self.on_connect {
                    Some(hook) => hook(&mut self.world),
                    None => None,
                };
                if let Some(connection) = self.clients.get_mut(&key) {
                    connection.set_state(ConnectionState::Connected);
                    connection.commanding_entity = commanding_entity;
                }
                self.events.push_back(ServerEvent::Connection {
                    client_key: key,
                    commanding_entity,
                });
            }

            let commanding_entity = match self.clients.get_mut(&key) {
                Some(connection) => {
                    connection.acked_snapshot = message.snapshot_ack;
                    connection.last_command_tick = Some(message.render_tick);
                    connection.commanding_entity
                }
                None => continue,
            };
            let Some(entity) = commanding_entity else {
                continue;
            };
            let compensated = self
                .history
                .at_or_before(message.render_tick)
                .map(|snapshot| snapshot.store());
            for processor in &mut self.command_processors {
                processor.process_client_command(
                    &mut self.world,
                    entity,
                    &message.command,
                    compensated,
                );
            }
        }
    }

    fn send_snapshots(&mut self) {
        for (key, connection) in self.clients.iter_mut() {
            if !connection.is_connected() {
                continue;
            }
            // the acked tick is only a valid basis while history retains it
            let basis = connection
                .acked_snapshot
                .and_then(|tick| self.history.get(tick).map(|store| (tick, store)));
            let header = SnapshotHeader {
                server_tick: self.tick,
                basis_tick: basis.map(|(tick, _)| tick),
                command_ack: connection.last_command_tick,
            };
            self.writer.reset();
            let encoded = header
                .ser(&mut self.writer)
                .and_then(|_| write_delta(&self.world, basis.map(|(_, store)| store), &mut self.writer));
            match encoded {
                Ok(()) => {
                    if let Err(err) = connection.transport.send(self.writer.bytes()) {
                        warn!("client {}: snapshot send failed: {}", key, err);
                    }
                }
                Err(err) => {
                    warn!(
                        "client {}: snapshot for tick {} exceeds message budget: {}",
                        key, self.tick, err
                    );
                }
            }
        }
    }

    // Accessors

    pub fn world(&self) -> &EntityStore {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut EntityStore {
        &mut self.world
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn commanding_entity(&self, key: ClientKey) -> Option<EntityId> {
        self.clients
            .get(&key)
            .and_then(|connection| connection.commanding_entity)
    }
}
