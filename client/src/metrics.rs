/// Counters surfacing replication quality to the application. All counters
/// are cumulative; sample and diff them to build rates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClientMetrics {
    /// Frames rendered from a single snapshot because no interpolation pair
    /// straddled the render tick
    pub extrapolated_frames: u64,
    /// Incoming messages discarded: undecodable, torn, or naming a delta
    /// basis the buffer no longer holds
    pub dropped_messages: u64,
    /// Well-formed snapshots discarded as duplicates of a buffered tick
    pub stale_snapshots: u64,
}
