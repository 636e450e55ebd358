/// Contains the configuration required to initialize a ReplicationServer
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Maximum number of simultaneously accepted clients
    pub max_clients: usize,
    /// Number of past snapshots retained for delta bases and lag
    /// compensation. Older ticks degrade to keyframes / uncompensated
    /// lookups, they never fail.
    pub max_history: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_clients: 32,
            max_history: 64,
        }
    }
}
