//! The bitmask-based delta codec.
//!
//! A message is a flat sequence of records with no count prefix; the message
//! boundary comes from the transport, and decoding stops when the reader runs
//! out of bytes. Each record is:
//!
//! ```text
//! entity_id: u16 LE | components_mask: u16 LE | changed_mask: u16 LE
//!     | payload of every changed component, ascending registration order
//! ```
//!
//! The `(0, 0)` mask pair is the removal sentinel. An Active entity's record
//! never carries it: a header is only emitted when something changed, and an
//! unchanged componentless entity costs zero bytes. Bytes on the wire are
//! proportional to what changed, not to the store's capacity.

use replica_serde::{ByteReader, ByteWriter, SerdeErr};

use crate::{
    entity::entity::EntityState,
    entity::entity_store::EntityStore,
    snapshot::error::DecodeError,
    types::EntityId,
};

/// Delta-encode `current` against an optional basis into `writer`.
///
/// With no basis, every Active entity is encoded in full (a "keyframe").
pub fn write_delta(
    current: &EntityStore,
    previous: Option<&EntityStore>,
    writer: &mut ByteWriter,
) -> Result<(), SerdeErr> {
    if let Some(previous) = previous {
        debug_assert_eq!(
            current.capacity(),
            previous.capacity(),
            "delta basis must have the same capacity"
        );
    }

    let kind_count = current.kind_count();
    for index in 0..current.capacity() {
        let id = index as EntityId;
        let active_now = current.state(id) == EntityState::Active;
        let was_active =
            previous.is_some_and(|previous| previous.state(id) == EntityState::Active);

        if !active_now {
            if was_active {
                // removal record
                writer.write_u16(id)?;
                writer.write_u16(0)?;
                writer.write_u16(0)?;
            }
            continue;
        }

        let mut components_mask: u16 = 0;
        let mut previous_components_mask: u16 = 0;
        let mut changed_mask: u16 = 0;
        for kind in 0..kind_count {
            let bit = 1u16 << kind;
            let store = current.store_at(kind);
            let previous_store = previous.map(|previous| previous.store_at(kind));
            if store.has(id) {
                components_mask |= bit;
                if store.has_changed_from(id, previous_store) {
                    changed_mask |= bit;
                }
            }
            if previous_store.is_some_and(|previous_store| previous_store.has(id)) {
                previous_components_mask |= bit;
            }
        }

        // unchanged entities cost zero bytes
        if changed_mask == 0 && components_mask == previous_components_mask {
            continue;
        }

        // an Active record must never look like the removal sentinel: the
        // wire format cannot express a live componentless entity, so such a
        // store is unencodable
        assert!(
            components_mask != 0,
            "entity {id} would emit the (0,0) removal sentinel while Active"
        );

        writer.write_u16(id)?;
        writer.write_u16(components_mask)?;
        writer.write_u16(changed_mask)?;
        for kind in 0..kind_count {
            if changed_mask & (1 << kind) != 0 {
                current.store_at(kind).write_delta(id, writer)?;
            }
        }
    }
    Ok(())
}

/// Apply a received delta to `dest`.
///
/// With a basis, `dest` is first bulk-copied from it ("nothing sent means
/// nothing changed"); without one, `dest` is reset. Callers that cannot
/// tolerate a torn decode should decode into a scratch store and swap only
/// on success — on error, `dest` holds the basis copy plus the records
/// applied so far.
pub fn read_delta(
    dest: &mut EntityStore,
    previous: Option<&EntityStore>,
    reader: &mut ByteReader,
) -> Result<(), DecodeError> {
    match previous {
        Some(previous) => {
            if previous.capacity() != dest.capacity() {
                return Err(DecodeError::CapacityMismatch {
                    dest: dest.capacity(),
                    basis: previous.capacity(),
                });
            }
            dest.copy_from(previous);
        }
        None => dest.reset(),
    }

    let capacity = dest.capacity();
    let kind_count = dest.kind_count();
    let known_bits: u16 = if kind_count == 16 {
        u16::MAX
    } else {
        (1u16 << kind_count) - 1
    };

    while reader.bytes_left() > 0 {
        let id = reader.read_u16()?;
        let components_mask = reader.read_u16()?;
        let changed_mask = reader.read_u16()?;

        if (id as usize) >= capacity {
            return Err(DecodeError::EntityIdOutOfRange { id, capacity });
        }
        if components_mask == 0 && changed_mask == 0 {
            dest.force_clear(id);
            continue;
        }
        if components_mask & !known_bits != 0 || changed_mask & !components_mask != 0 {
            return Err(DecodeError::MalformedRecord {
                id,
                components_mask,
                changed_mask,
            });
        }

        dest.force_active(id);
        for kind in 0..kind_count {
            let bit = 1u16 << kind;
            let store = dest.store_at_mut(kind);
            if components_mask & bit != 0 {
                store.add_default(id);
                if changed_mask & bit != 0 {
                    if let Err(source) = store.read_delta(id, reader) {
                        return Err(DecodeError::ComponentPayload {
                            id,
                            name: dest.kinds().name_of(kind),
                            source,
                        });
                    }
                }
            } else if store.has(id) {
                // present in the basis, absent from the record
                store.remove(id);
            }
        }
    }
    Ok(())
}
