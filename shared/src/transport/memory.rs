use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use replica_serde::MTU_SIZE_BYTES;

use crate::transport::{error::TransportError, Transport};

type MessageQueue = Arc<Mutex<VecDeque<Vec<u8>>>>;

/// In-memory transport endpoint. `pair()` yields two connected endpoints
/// that route complete messages to each other without network I/O — the
/// backbone of the end-to-end test suites and local demos.
pub struct MemoryTransport {
    incoming: MessageQueue,
    outgoing: MessageQueue,
}

impl MemoryTransport {
    pub fn pair() -> (MemoryTransport, MemoryTransport) {
        let a_to_b: MessageQueue = Arc::new(Mutex::new(VecDeque::new()));
        let b_to_a: MessageQueue = Arc::new(Mutex::new(VecDeque::new()));
        (
            MemoryTransport {
                incoming: b_to_a.clone(),
                outgoing: a_to_b.clone(),
            },
            MemoryTransport {
                incoming: a_to_b,
                outgoing: b_to_a,
            },
        )
    }
}

impl Transport for MemoryTransport {
    fn try_receive(&mut self) -> Option<Vec<u8>> {
        let Ok(mut queue) = self.incoming.lock() else {
            return None;
        };
        queue.pop_front()
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        if payload.len() > MTU_SIZE_BYTES {
            return Err(TransportError::MessageTooLarge {
                size: payload.len(),
                limit: MTU_SIZE_BYTES,
            });
        }
        let Ok(mut queue) = self.outgoing.lock() else {
            return Err(TransportError::Disconnected);
        };
        queue.push_back(payload.to_vec());
        Ok(())
    }
}
