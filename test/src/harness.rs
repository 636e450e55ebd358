use replica_client::{ClientConfig, ReplicationClient};
use replica_server::{ClientKey, ReplicationServer, ServerConfig};
use replica_shared::{
    ClientPredictor, ConditionedTransport, EntityId, EntityStore, LinkConditionerConfig,
    MemoryTransport, ServerCommandProcessor, Transport,
};

use crate::test_protocol::{protocol, MoveCommand, Position, Velocity};

/// Server-side movement: identical to [`MovePredictor`] so a correct
/// prediction never snaps on reconciliation.
pub struct MoveProcessor;

impl ServerCommandProcessor<MoveCommand> for MoveProcessor {
    fn process_client_command(
        &mut self,
        store: &mut EntityStore,
        commanding_entity: EntityId,
        command: &MoveCommand,
        _lag_compensated: Option<&EntityStore>,
    ) {
        if let Some(position) = store.component_mut::<Position>(commanding_entity) {
            position.x += command.dx;
            position.y += command.dy;
        }
    }
}

pub struct MovePredictor;

impl ClientPredictor<MoveCommand> for MovePredictor {
    fn predict_client_command(
        &mut self,
        store: &mut EntityStore,
        commanding_entity: EntityId,
        command: &MoveCommand,
    ) {
        if let Some(position) = store.component_mut::<Position>(commanding_entity) {
            position.x += command.dx;
            position.y += command.dy;
        }
    }
}

/// One server and one client joined by an in-memory link, with the movement
/// processor/predictor pair installed on both ends.
pub struct TestPair {
    pub server: ReplicationServer<MoveCommand>,
    pub client: ReplicationClient<MoveCommand>,
    pub client_key: ClientKey,
}

impl TestPair {
    pub fn new() -> Self {
        Self::with_conditioner(None)
    }

    /// Optionally degrade the server-to-client link
    pub fn with_conditioner(conditioner: Option<LinkConditionerConfig>) -> Self {
        let mut server = ReplicationServer::new(&protocol(), ServerConfig::default());
        server.on_client_connect(Box::new(|world| {
            let id = world.try_create_entity()?;
            world.add_component::<Position>(id);
            world.add_component::<Velocity>(id);
            Some(id)
        }));
        server.on_client_disconnect(Box::new(|world, entity| {
            world.remove_entity(entity);
        }));
        server.register_command_processor(Box::new(MoveProcessor));

        let (server_side, client_side) = MemoryTransport::pair();
        let client_transport: Box<dyn Transport> = match conditioner {
            Some(config) => Box::new(ConditionedTransport::new(Box::new(client_side), config)),
            None => Box::new(client_side),
        };
        let mut client =
            ReplicationClient::new(&protocol(), ClientConfig::default(), client_transport);
        client.register_predictor(Box::new(MovePredictor));
        let client_key = server
            .accept_client(Box::new(server_side))
            .expect("fresh server accepts a client");

        Self {
            server,
            client,
            client_key,
        }
    }

    /// One full exchange: the client ticks (sending its command), then the
    /// server ticks (processing it and emitting a snapshot). The snapshot
    /// reaches the client on the next exchange.
    pub fn exchange(&mut self, command: MoveCommand) {
        self.client.tick(command);
        self.server.tick();
    }

    /// Drive the handshake to completion and wire the commanding entity
    /// into the client.
    pub fn connect(&mut self) -> EntityId {
        self.exchange(MoveCommand::default());
        let entity = self
            .server
            .commanding_entity(self.client_key)
            .expect("first command completes the handshake");
        self.client.set_commanding_entity(Some(entity));
        entity
    }

    /// Run `count` exchanges with a neutral command
    pub fn idle(&mut self, count: usize) {
        for _ in 0..count {
            self.exchange(MoveCommand::default());
        }
    }
}

impl Default for TestPair {
    fn default() -> Self {
        Self::new()
    }
}
