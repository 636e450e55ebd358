use replica_serde::{ByteReader, ByteWriter, Serde, SerdeErr};

use crate::types::Tick;

/// A per-game command payload: produced once per client tick, consumed
/// exactly once by server command processors, and replayed any number of
/// times by the client's predictor. The engine treats it as opaque bytes.
pub trait Command: Clone + Send + Sync + 'static {
    fn ser(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr>;
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr>;
}

/// Wire envelope for one client command.
///
/// `render_tick` is the server tick the client was rendering when the
/// command was sampled — the lag-compensation reference. `snapshot_ack`
/// is the newest snapshot tick the client holds, which becomes the server's
/// delta basis for this client.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandMessage<C: Command> {
    pub render_tick: Tick,
    pub snapshot_ack: Option<Tick>,
    pub command: C,
}

impl<C: Command> CommandMessage<C> {
    pub fn ser(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        self.render_tick.ser(writer)?;
        self.snapshot_ack.ser(writer)?;
        self.command.ser(writer)
    }

    pub fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            render_tick: Tick::de(reader)?,
            snapshot_ack: Option::<Tick>::de(reader)?,
            command: C::de(reader)?,
        })
    }
}
