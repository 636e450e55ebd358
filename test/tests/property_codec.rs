//! PROPERTY-BASED TESTS: delta codec invariants
//!
//! Uses proptest to verify the codec over randomized world states.
//!
//! Key invariants:
//! 1. A keyframe decode reproduces the source exactly
//! 2. A delta applied to the basis reproduces the current state exactly
//! 3. A delta against an identical basis is empty

use proptest::prelude::*;
use replica_shared::{
    read_delta, write_delta, ByteReader, ByteWriter, EntityStore,
};
use replica_test::{protocol, Label, MoveCommand, Position, Velocity};

const CAPACITY: usize = 16;

#[derive(Clone, Debug)]
struct SlotSpec {
    // every live entity carries a position; entities replicate only through
    // their components, so a component-less entity is not a valid world
    position: (f32, f32),
    velocity: Option<(f32, f32)>,
    label: Option<String>,
}

fn slot_strategy() -> impl Strategy<Value = Option<SlotSpec>> {
    prop::option::of(
        (
            (-1000.0f32..1000.0, -1000.0f32..1000.0),
            prop::option::of((-50.0f32..50.0, -50.0f32..50.0)),
            prop::option::of("[a-z]{0,12}"),
        )
            .prop_map(|(position, velocity, label)| SlotSpec {
                position,
                velocity,
                label,
            }),
    )
}

fn world_strategy() -> impl Strategy<Value = Vec<Option<SlotSpec>>> {
    prop::collection::vec(slot_strategy(), CAPACITY)
}

fn build_store(slots: &[Option<SlotSpec>]) -> EntityStore {
    let mut store = protocol().new_store();
    // fill every slot first so entity ids line up with slot indices, then
    // carve out the empty ones
    store.begin_update();
    for _ in 0..slots.len() {
        store.try_create_entity();
    }
    store.end_update();
    store.begin_update();
    for (index, slot) in slots.iter().enumerate() {
        if slot.is_none() {
            store.remove_entity(index as u16);
        }
    }
    store.end_update();
    for (index, slot) in slots.iter().enumerate() {
        let Some(spec) = slot else {
            continue;
        };
        let id = index as u16;
        let position = store.add_component::<Position>(id);
        position.x = spec.position.0;
        position.y = spec.position.1;
        if let Some((dx, dy)) = spec.velocity {
            let velocity = store.add_component::<Velocity>(id);
            velocity.dx = dx;
            velocity.dy = dy;
        }
        if let Some(text) = &spec.label {
            store.add_component::<Label>(id).0 = text.clone();
        }
    }
    store
}

fn assert_stores_equal(left: &EntityStore, right: &EntityStore) -> Result<(), TestCaseError> {
    let left_entities: Vec<_> = left.entities().collect();
    let right_entities: Vec<_> = right.entities().collect();
    prop_assert_eq!(left_entities.clone(), right_entities);
    for id in left_entities {
        prop_assert_eq!(left.component::<Position>(id), right.component::<Position>(id));
        prop_assert_eq!(left.component::<Velocity>(id), right.component::<Velocity>(id));
        prop_assert_eq!(left.component::<Label>(id), right.component::<Label>(id));
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_keyframe_round_trips(slots in world_strategy()) {
        let source = build_store(&slots);
        let mut writer = ByteWriter::new();
        write_delta(&source, None, &mut writer).unwrap();

        let mut dest = protocol().new_store();
        read_delta(&mut dest, None, &mut ByteReader::new(writer.bytes())).unwrap();
        assert_stores_equal(&source, &dest)?;
    }

    #[test]
    fn prop_delta_against_any_basis_round_trips(
        basis_slots in world_strategy(),
        current_slots in world_strategy(),
    ) {
        let basis = build_store(&basis_slots);
        let current = build_store(&current_slots);

        let mut writer = ByteWriter::new();
        write_delta(&current, Some(&basis), &mut writer).unwrap();

        let mut dest = protocol().new_store();
        read_delta(&mut dest, Some(&basis), &mut ByteReader::new(writer.bytes())).unwrap();
        assert_stores_equal(&current, &dest)?;
    }

    #[test]
    fn prop_delta_against_self_is_empty(slots in world_strategy()) {
        let store = build_store(&slots);
        let mut writer = ByteWriter::new();
        write_delta(&store, Some(&store), &mut writer).unwrap();
        prop_assert_eq!(writer.bytes().len(), 0);
    }

    #[test]
    fn prop_command_message_round_trips(
        render_tick in any::<u16>(),
        snapshot_ack in prop::option::of(any::<u16>()),
        dx in -100.0f32..100.0,
        dy in -100.0f32..100.0,
    ) {
        use replica_shared::CommandMessage;
        let message = CommandMessage {
            render_tick,
            snapshot_ack,
            command: MoveCommand { dx, dy },
        };
        let mut writer = ByteWriter::new();
        message.ser(&mut writer).unwrap();
        let mut reader = ByteReader::new(writer.bytes());
        let decoded = CommandMessage::<MoveCommand>::de(&mut reader).unwrap();
        prop_assert_eq!(decoded, message);
        prop_assert_eq!(reader.bytes_left(), 0);
    }
}
