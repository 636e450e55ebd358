use crate::{error::SerdeErr, MTU_SIZE_BYTES};

/// A cursor-based writer over a pre-allocated, MTU-sized byte buffer.
/// All multi-byte primitives are written little-endian.
pub struct ByteWriter {
    buffer: Box<[u8; MTU_SIZE_BYTES]>,
    cursor: usize,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self {
            buffer: Box::new([0; MTU_SIZE_BYTES]),
            cursor: 0,
        }
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Remaining space in the buffer
    pub fn space_left(&self) -> usize {
        MTU_SIZE_BYTES - self.cursor
    }

    /// Rewind the cursor so the buffer can be reused for the next message
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// The written prefix of the buffer
    pub fn bytes(&self) -> &[u8] {
        &self.buffer[0..self.cursor]
    }

    /// Consume the writer, handing the written bytes off to a transport
    pub fn to_packet(self) -> OutgoingPacket {
        OutgoingPacket {
            buffer: self.buffer,
            length: self.cursor,
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SerdeErr> {
        let space = self.space_left();
        if bytes.len() > space {
            return Err(SerdeErr::WriteOverflow {
                needed: bytes.len(),
                space,
            });
        }
        self.buffer[self.cursor..self.cursor + bytes.len()].copy_from_slice(bytes);
        self.cursor += bytes.len();
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> Result<(), SerdeErr> {
        self.write_u8(if value { 1 } else { 0 })
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), SerdeErr> {
        self.write_bytes(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), SerdeErr> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), SerdeErr> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i16(&mut self, value: i16) -> Result<(), SerdeErr> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), SerdeErr> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<(), SerdeErr> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write a u16-length-prefixed UTF-8 string
    pub fn write_string(&mut self, value: &str) -> Result<(), SerdeErr> {
        let bytes = value.as_bytes();
        let length = u16::try_from(bytes.len()).map_err(|_| SerdeErr::WriteOverflow {
            needed: bytes.len(),
            space: u16::MAX as usize,
        })?;
        self.write_u16(length)?;
        self.write_bytes(bytes)
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// A finished outgoing message: the underlying buffer plus the written length
pub struct OutgoingPacket {
    buffer: Box<[u8; MTU_SIZE_BYTES]>,
    length: usize,
}

impl OutgoingPacket {
    /// The payload to hand to the transport
    pub fn slice(&self) -> &[u8] {
        &self.buffer[0..self.length]
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}
