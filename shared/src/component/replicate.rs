use replica_serde::{ByteReader, ByteWriter, SerdeErr};

/// A replicated component: plain data keyed by entity slot, with the four
/// capabilities the store and the wire protocol need.
///
/// Reset-to-default is `Default`, change detection is `PartialEq`, and the
/// delta payload format is whatever `write_delta`/`read_delta` agree on —
/// the codec treats it as opaque bytes. A component never holds a reference
/// to its entity.
pub trait Replicate: Default + Clone + PartialEq + Send + Sync + 'static {
    /// Blend between `self` and `other` by `amount` in `[0.0, 1.0]`.
    /// Non-blendable components should snap to `other`.
    fn interpolate(&self, other: &Self, amount: f32) -> Self;

    /// Write this component's wire payload
    fn write_delta(&self, writer: &mut ByteWriter) -> Result<(), SerdeErr>;

    /// Overwrite this component from its wire payload
    fn read_delta(&mut self, reader: &mut ByteReader) -> Result<(), SerdeErr>;
}
