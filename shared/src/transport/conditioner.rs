use std::collections::VecDeque;

use crate::transport::{error::TransportError, Transport};

/// Simulated link-quality parameters for a [`ConditionedTransport`].
/// Delay and jitter are measured in receive polls (one poll per tick in
/// practice), loss as a probability per message.
#[derive(Clone, Debug)]
pub struct LinkConditionerConfig {
    /// Polls a delivered message is held back before becoming receivable
    pub delay_polls: u32,
    /// Extra random hold, uniform in `0..=jitter_polls`
    pub jitter_polls: u32,
    /// Probability in `[0.0, 1.0]` that an incoming message is dropped
    pub incoming_loss: f32,
    /// Seed for the deterministic loss/jitter rolls
    pub seed: u64,
}

impl LinkConditionerConfig {
    pub fn good_condition() -> Self {
        Self {
            delay_polls: 1,
            jitter_polls: 0,
            incoming_loss: 0.0,
            seed: 0,
        }
    }

    pub fn poor_condition() -> Self {
        Self {
            delay_polls: 4,
            jitter_polls: 3,
            incoming_loss: 0.1,
            seed: 0,
        }
    }
}

struct HeldMessage {
    release_after: u32,
    payload: Vec<u8>,
}

/// Wraps any transport with deterministic, seeded latency, jitter, and loss
/// on the receive path. Useful for exercising the client's interpolation
/// and extrapolation fallbacks without a real degraded network.
pub struct ConditionedTransport {
    inner: Box<dyn Transport>,
    config: LinkConditionerConfig,
    rng: fastrand::Rng,
    held: VecDeque<HeldMessage>,
    poll_count: u32,
}

impl ConditionedTransport {
    pub fn new(inner: Box<dyn Transport>, config: LinkConditionerConfig) -> Self {
        let rng = fastrand::Rng::with_seed(config.seed);
        Self {
            inner,
            config,
            rng,
            held: VecDeque::new(),
            poll_count: 0,
        }
    }
}

impl Transport for ConditionedTransport {
    fn try_receive(&mut self) -> Option<Vec<u8>> {
        self.poll_count = self.poll_count.wrapping_add(1);

        // drain the inner transport into the hold queue
        while let Some(payload) = self.inner.try_receive() {
            if self.rng.f32() < self.config.incoming_loss {
                log::trace!("conditioner dropped a {} byte message", payload.len());
                continue;
            }
            let jitter = if self.config.jitter_polls > 0 {
                self.rng.u32(0..=self.config.jitter_polls)
            } else {
                0
            };
            self.held.push_back(HeldMessage {
                release_after: self.poll_count.wrapping_add(self.config.delay_polls + jitter),
                payload,
            });
        }

        // release at most one matured message per poll
        let front_ready = self
            .held
            .front()
            .is_some_and(|held| held.release_after <= self.poll_count);
        if front_ready {
            return self.held.pop_front().map(|held| held.payload);
        }
        None
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.inner.send(payload)
    }
}
