use std::collections::VecDeque;

use log::warn;

use replica_shared::{
    read_delta, sequence_greater_than, wrapping_diff, ByteReader, ByteWriter, ClientPredictor,
    ClientSystem, Command, CommandMessage, ComponentKinds, EntityId, EntityStore, Protocol, Serde,
    Snapshot, SnapshotHeader, Tick, Transport,
};

use crate::{client_config::ClientConfig, metrics::ClientMetrics, snapshot_buffer::SnapshotBuffer};

/// The presentation endpoint of the replication engine.
///
/// Each `tick()` sends one command, ingests every arrived snapshot, advances
/// the render tick, and rebuilds the render store: an interpolated view of
/// the world a fixed delay behind the newest snapshot, with the commanding
/// entity replaced by a predicted replay of unacknowledged commands.
pub struct ReplicationClient<C: Command> {
    transport: Box<dyn Transport>,
    config: ClientConfig,
    buffer: SnapshotBuffer,
    render_store: EntityStore,
    predicted_store: EntityStore,
    store_kinds: ComponentKinds,
    store_capacity: usize,
    command_history: VecDeque<(Tick, C)>,
    predictors: Vec<Box<dyn ClientPredictor<C>>>,
    systems: Vec<Box<dyn ClientSystem>>,
    commanding_entity: Option<EntityId>,
    render_target: Option<Tick>,
    latest_command_ack: Option<Tick>,
    has_render: bool,
    metrics: ClientMetrics,
    writer: ByteWriter,
}

impl<C: Command> ReplicationClient<C> {
    pub fn new(protocol: &Protocol, config: ClientConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            buffer: SnapshotBuffer::new(config.snapshot_buffer_len),
            render_store: protocol.new_store(),
            predicted_store: protocol.new_store(),
            store_kinds: protocol.component_kinds.clone(),
            store_capacity: protocol.entity_capacity,
            config,
            command_history: VecDeque::new(),
            predictors: Vec::new(),
            systems: Vec::new(),
            commanding_entity: None,
            render_target: None,
            latest_command_ack: None,
            has_render: false,
            metrics: ClientMetrics::default(),
            writer: ByteWriter::new(),
        }
    }

    // Registration. Dispatch order is registration order.

    pub fn register_system(&mut self, system: Box<dyn ClientSystem>) {
        self.systems.push(system);
    }

    pub fn register_predictor(&mut self, predictor: Box<dyn ClientPredictor<C>>) {
        self.predictors.push(predictor);
    }

    /// Tell the client which entity it commands; prediction is disabled
    /// while unset. The server decides the actual assignment.
    pub fn set_commanding_entity(&mut self, entity: Option<EntityId>) {
        self.commanding_entity = entity;
    }

    /// Advance the client by one tick: send `command`, ingest arrived
    /// snapshots, reconcile command history, and rebuild the render store.
    pub fn tick(&mut self, command: C) {
        self.send_command(command);
        self.ingest_snapshots();
        self.reconcile_command_history();
        self.advance_render_target();
        self.rebuild_render_store();
        if self.has_render {
            for system in &mut self.systems {
                system.client_update(&mut self.render_store);
            }
        }
    }

    /// Run the registered systems' render pass over the current view
    pub fn render(&mut self) {
        if self.has_render {
            for system in &mut self.systems {
                system.client_render(&self.render_store);
            }
        }
    }

    /// The interpolated and predicted view, once at least one snapshot has
    /// been received
    pub fn render_store(&self) -> Option<&EntityStore> {
        if self.has_render {
            Some(&self.render_store)
        } else {
            None
        }
    }

    /// The server tick currently being rendered
    pub fn render_tick(&self) -> Option<Tick> {
        self.render_target
    }

    pub fn metrics(&self) -> &ClientMetrics {
        &self.metrics
    }

    pub fn buffered_snapshots(&self) -> usize {
        self.buffer.len()
    }

    pub fn pending_commands(&self) -> usize {
        self.command_history.len()
    }

    fn send_command(&mut self, command: C) {
        let render_tick = self.render_target.unwrap_or(0);
        let message = CommandMessage {
            render_tick,
            snapshot_ack: self.buffer.newest_tick(),
            command: command.clone(),
        };
        self.writer.reset();
        match message.ser(&mut self.writer) {
            Ok(()) => {
                if let Err(err) = self.transport.send(self.writer.bytes()) {
                    warn!("command send failed: {}", err);
                }
            }
            Err(err) => warn!("command did not encode: {}", err),
        }
        self.command_history.push_back((render_tick, command));
        while self.command_history.len() > self.config.max_command_history {
            self.command_history.pop_front();
        }
    }

    fn ingest_snapshots(&mut self) {
        while let Some(bytes) = self.transport.try_receive() {
            let mut reader = ByteReader::new(&bytes);
            let header = match SnapshotHeader::de(&mut reader) {
                Ok(header) => header,
                Err(err) => {
                    warn!("dropped snapshot with undecodable header: {}", err);
                    self.metrics.dropped_messages += 1;
                    continue;
                }
            };
            if let Some(basis_tick) = header.basis_tick {
                if self.buffer.get(basis_tick).is_none() {
                    warn!(
                        "dropped snapshot {}: basis {} no longer buffered",
                        header.server_tick, basis_tick
                    );
                    self.metrics.dropped_messages += 1;
                    continue;
                }
            }

            // decode into scratch so a torn message cannot corrupt the buffer
            let mut store = self
                .buffer
                .take_spare_store()
                .unwrap_or_else(|| EntityStore::new(&self.store_kinds, self.store_capacity));
            let basis = header.basis_tick.and_then(|tick| self.buffer.get(tick));
            if let Err(err) = read_delta(&mut store, basis, &mut reader) {
                warn!("dropped snapshot {}: {}", header.server_tick, err);
                self.metrics.dropped_messages += 1;
                self.buffer.return_spare_store(store);
                continue;
            }

            if let Some(ack) = header.command_ack {
                let newer = match self.latest_command_ack {
                    None => true,
                    Some(previous) => sequence_greater_than(ack, previous),
                };
                if newer {
                    self.latest_command_ack = Some(ack);
                }
            }
            if !self.buffer.insert(Snapshot::new(store, header.server_tick)) {
                self.metrics.stale_snapshots += 1;
            }
        }
    }

    fn reconcile_command_history(&mut self) {
        let Some(ack) = self.latest_command_ack else {
            return;
        };
        while let Some((tick, _)) = self.command_history.front() {
            if sequence_greater_than(*tick, ack) {
                break;
            }
            self.command_history.pop_front();
        }
    }

    fn advance_render_target(&mut self) {
        let Some(newest) = self.buffer.newest_tick() else {
            return;
        };
        let candidate = newest.wrapping_sub(self.config.interpolation_delay);
        let advance = match self.render_target {
            None => true,
            // the render tick never moves backwards
            Some(current) => sequence_greater_than(candidate, current),
        };
        if advance {
            self.render_target = Some(candidate);
        }
    }

    fn rebuild_render_store(&mut self) {
        let Some(target) = self.render_target else {
            self.has_render = false;
            return;
        };
        let start = self.buffer.at_or_before(target);
        let end = self.buffer.first_after(target);
        match (start, end) {
            (Some(start), Some(end)) => {
                let span = wrapping_diff(start.tick(), end.tick());
                let into = wrapping_diff(start.tick(), target);
                let amount = if span > 0 {
                    into as f32 / span as f32
                } else {
                    0.0
                };
                self.render_store
                    .interpolate_from(start.store(), end.store(), amount);
            }
            // no snapshot past the target: hold the newest state unblended
            (Some(only), None) => {
                self.render_store.copy_from(only.store());
                self.metrics.extrapolated_frames += 1;
            }
            // everything buffered is newer than the target: snap forward
            (None, Some(upcoming)) => {
                self.render_store.copy_from(upcoming.store());
                self.metrics.extrapolated_frames += 1;
            }
            (None, None) => {
                self.has_render = false;
                return;
            }
        }
        self.has_render = true;
        self.apply_prediction();
    }

    /// Replay unacknowledged commands from the newest authoritative state
    /// and overlay the result onto the commanding entity's render slot.
    fn apply_prediction(&mut self) {
        let Some(entity) = self.commanding_entity else {
            return;
        };
        let Some(newest) = self.buffer.newest() else {
            return;
        };
        if !newest.store().has_entity(entity) {
            return;
        }
        self.predicted_store.copy_from(newest.store());
        if !self.command_history.is_empty() && !self.predictors.is_empty() {
            self.predicted_store.begin_update();
            for (_, command) in &self.command_history {
                for predictor in &mut self.predictors {
                    predictor.predict_client_command(&mut self.predicted_store, entity, command);
                }
            }
            self.predicted_store.end_update();
        }
        if self.predicted_store.has_entity(entity) {
            self.render_store
                .copy_entity_from(entity, &self.predicted_store, entity);
        }
    }
}
