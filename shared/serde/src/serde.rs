use crate::{error::SerdeErr, reader::ByteReader, writer::ByteWriter};

/// A value that can be written to and read from the wire.
/// Every implementation must be byte-exact: `de(ser(x)) == x` bit-for-bit.
pub trait Serde: Sized {
    fn ser(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr>;
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr>;
}

impl Serde for bool {
    fn ser(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        writer.write_bool(*self)
    }
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        reader.read_bool()
    }
}

impl Serde for u8 {
    fn ser(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        writer.write_u8(*self)
    }
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        reader.read_u8()
    }
}

impl Serde for u16 {
    fn ser(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        writer.write_u16(*self)
    }
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        reader.read_u16()
    }
}

impl Serde for u32 {
    fn ser(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        writer.write_u32(*self)
    }
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        reader.read_u32()
    }
}

impl Serde for i16 {
    fn ser(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        writer.write_i16(*self)
    }
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        reader.read_i16()
    }
}

impl Serde for i32 {
    fn ser(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        writer.write_i32(*self)
    }
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        reader.read_i32()
    }
}

impl Serde for f32 {
    fn ser(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        writer.write_f32(*self)
    }
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        reader.read_f32()
    }
}

impl Serde for String {
    fn ser(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        writer.write_string(self)
    }
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        reader.read_string()
    }
}

/// Presence-prefixed optional: one bool byte, then the value if present
impl<T: Serde> Serde for Option<T> {
    fn ser(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        match self {
            Some(value) => {
                writer.write_bool(true)?;
                value.ser(writer)
            }
            None => writer.write_bool(false),
        }
    }
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        if reader.read_bool()? {
            Ok(Some(T::de(reader)?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<T: Serde + PartialEq + std::fmt::Debug>(value: T) {
        let mut writer = ByteWriter::new();
        value.ser(&mut writer).unwrap();
        let packet = writer.to_packet();
        let mut reader = ByteReader::new(packet.slice());
        let out = T::de(&mut reader).unwrap();
        assert_eq!(value, out);
        assert_eq!(reader.bytes_left(), 0);
    }

    #[test]
    fn integer_boundaries() {
        round_trip(u8::MIN);
        round_trip(u8::MAX);
        round_trip(u16::MIN);
        round_trip(u16::MAX);
        round_trip(u32::MIN);
        round_trip(u32::MAX);
        round_trip(i16::MIN);
        round_trip(i16::MAX);
        round_trip(i32::MIN);
        round_trip(i32::MAX);
    }

    #[test]
    fn float_boundaries_bit_exact() {
        for value in [
            0.0f32,
            -0.0,
            f32::MIN,
            f32::MAX,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
        ] {
            let mut writer = ByteWriter::new();
            value.ser(&mut writer).unwrap();
            let packet = writer.to_packet();
            let mut reader = ByteReader::new(packet.slice());
            let out = f32::de(&mut reader).unwrap();
            assert_eq!(value.to_bits(), out.to_bits());
        }
    }

    #[test]
    fn strings() {
        round_trip(String::new());
        round_trip("hello".to_string());
        round_trip("a".repeat(1000));
    }

    #[test]
    fn options() {
        round_trip(Option::<u16>::None);
        round_trip(Some(42u16));
    }

    #[test]
    fn mixed_sequence() {
        let mut writer = ByteWriter::new();
        true.ser(&mut writer).unwrap();
        12345u16.ser(&mut writer).unwrap();
        (-7i32).ser(&mut writer).unwrap();
        1.5f32.ser(&mut writer).unwrap();
        "end".to_string().ser(&mut writer).unwrap();
        let packet = writer.to_packet();

        let mut reader = ByteReader::new(packet.slice());
        assert!(bool::de(&mut reader).unwrap());
        assert_eq!(u16::de(&mut reader).unwrap(), 12345);
        assert_eq!(i32::de(&mut reader).unwrap(), -7);
        assert_eq!(f32::de(&mut reader).unwrap(), 1.5);
        assert_eq!(String::de(&mut reader).unwrap(), "end");
        assert_eq!(reader.bytes_left(), 0);
    }
}
