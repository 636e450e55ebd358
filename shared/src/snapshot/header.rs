use replica_serde::{ByteReader, ByteWriter, Serde, SerdeErr};

use crate::types::Tick;

/// Header of every snapshot message, written before the record sequence.
///
/// `basis_tick` names the snapshot the delta was encoded against (`None` on
/// first contact or after a history gap — the records then describe the full
/// state). `command_ack` is the render tick of the last command the server
/// processed for this client, which drives prediction reconciliation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub server_tick: Tick,
    pub basis_tick: Option<Tick>,
    pub command_ack: Option<Tick>,
}

impl Serde for SnapshotHeader {
    fn ser(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        self.server_tick.ser(writer)?;
        self.basis_tick.ser(writer)?;
        self.command_ack.ser(writer)
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            server_tick: Tick::de(reader)?,
            basis_tick: Option::<Tick>::de(reader)?,
            command_ack: Option::<Tick>::de(reader)?,
        })
    }
}
