use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReplicaServerError {
    #[error("client limit of {limit} reached")]
    ClientLimitReached { limit: usize },
    #[error("unknown client key: {0}")]
    UnknownClient(u16),
}
