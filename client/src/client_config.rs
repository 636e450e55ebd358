use replica_shared::Tick;

/// Contains the configuration required to initialize a ReplicationClient
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// How many ticks behind the newest buffered snapshot to render. Larger
    /// values absorb more jitter at the cost of visible latency.
    pub interpolation_delay: Tick,
    /// Maximum number of buffered snapshots; the oldest is evicted first
    pub snapshot_buffer_len: usize,
    /// Maximum number of unacknowledged commands kept for prediction replay
    pub max_command_history: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            interpolation_delay: 2,
            snapshot_buffer_len: 32,
            max_command_history: 64,
        }
    }
}
