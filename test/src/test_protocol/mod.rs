use replica_shared::{ByteReader, ByteWriter, Command, Protocol, Replicate, SerdeErr};

/// Shared protocol for the end-to-end suites: a blendable position, a
/// blendable velocity, and a discrete label that snaps instead of blending.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Replicate for Position {
    fn interpolate(&self, other: &Self, amount: f32) -> Self {
        Position {
            x: self.x + (other.x - self.x) * amount,
            y: self.y + (other.y - self.y) * amount,
        }
    }
    fn write_delta(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        writer.write_f32(self.x)?;
        writer.write_f32(self.y)
    }
    fn read_delta(&mut self, reader: &mut ByteReader) -> Result<(), SerdeErr> {
        self.x = reader.read_f32()?;
        self.y = reader.read_f32()?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Replicate for Velocity {
    fn interpolate(&self, other: &Self, amount: f32) -> Self {
        Velocity {
            dx: self.dx + (other.dx - self.dx) * amount,
            dy: self.dy + (other.dy - self.dy) * amount,
        }
    }
    fn write_delta(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        writer.write_f32(self.dx)?;
        writer.write_f32(self.dy)
    }
    fn read_delta(&mut self, reader: &mut ByteReader) -> Result<(), SerdeErr> {
        self.dx = reader.read_f32()?;
        self.dy = reader.read_f32()?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Label(pub String);

impl Replicate for Label {
    fn interpolate(&self, other: &Self, _amount: f32) -> Self {
        other.clone()
    }
    fn write_delta(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        writer.write_string(&self.0)
    }
    fn read_delta(&mut self, reader: &mut ByteReader) -> Result<(), SerdeErr> {
        self.0 = reader.read_string()?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoveCommand {
    pub dx: f32,
    pub dy: f32,
}

impl Command for MoveCommand {
    fn ser(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        writer.write_f32(self.dx)?;
        writer.write_f32(self.dy)
    }
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            dx: reader.read_f32()?,
            dy: reader.read_f32()?,
        })
    }
}

pub fn protocol() -> Protocol {
    let mut protocol = Protocol::builder();
    protocol
        .add_component::<Position>()
        .add_component::<Velocity>()
        .add_component::<Label>()
        .entity_capacity(16);
    protocol.build()
}
