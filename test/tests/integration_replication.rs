//! End-to-end replication over an in-memory link: connection handshake,
//! state convergence, structural changes, and discrete components.

use replica_test::{Label, MoveCommand, Position, TestPair};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn handshake_spawns_and_reveals_the_commanding_entity() {
    init_logging();
    let mut pair = TestPair::new();
    let entity = pair.connect();

    assert!(pair.server.world().has_entity(entity));
    // the first snapshot is already in flight; one more exchange lands it
    pair.idle(1);
    let render = pair.client.render_store().expect("first snapshot rendered");
    assert!(render.has_entity(entity));
    assert!(render.has_component::<Position>(entity));
}

#[test]
fn client_state_converges_to_the_server() {
    init_logging();
    let mut pair = TestPair::new();
    let entity = pair.connect();

    for _ in 0..5 {
        pair.exchange(MoveCommand { dx: 1.0, dy: 0.0 });
    }
    // let the last snapshot arrive and every command be acknowledged
    pair.idle(5);

    let server_position = pair.server.world().component::<Position>(entity).unwrap();
    assert_eq!(server_position.x, 5.0);
    let render = pair.client.render_store().unwrap();
    assert_eq!(render.component::<Position>(entity), Some(server_position));
}

#[test]
fn server_side_spawn_and_despawn_reach_the_client() {
    init_logging();
    let mut pair = TestPair::new();
    pair.connect();

    let extra = pair.server.world_mut().try_create_entity().unwrap();
    pair.server
        .world_mut()
        .add_component::<Label>(extra)
        .0 = "pickup".to_string();
    // commit happens on the next server tick, visibility lags by the
    // interpolation delay
    pair.idle(6);
    let render = pair.client.render_store().unwrap();
    assert!(render.has_entity(extra));
    assert_eq!(render.component::<Label>(extra).unwrap().0, "pickup");

    pair.server.world_mut().remove_entity(extra);
    pair.idle(6);
    let render = pair.client.render_store().unwrap();
    assert!(!render.has_entity(extra));
}

#[test]
fn component_values_change_without_resending_the_world() {
    init_logging();
    let mut pair = TestPair::new();
    let entity = pair.connect();
    pair.idle(4);

    let before = *pair.client.metrics();
    pair.exchange(MoveCommand { dx: 3.0, dy: -1.0 });
    pair.idle(5);

    let render = pair.client.render_store().unwrap();
    assert_eq!(render.component::<Position>(entity).unwrap().x, 3.0);
    assert_eq!(render.component::<Position>(entity).unwrap().y, -1.0);
    // a healthy link drops nothing
    let after = pair.client.metrics();
    assert_eq!(after.dropped_messages, before.dropped_messages);
}

#[test]
fn disconnect_removes_the_entity_from_the_simulation() {
    init_logging();
    let mut pair = TestPair::new();
    let entity = pair.connect();

    pair.server.disconnect_client(pair.client_key).unwrap();
    pair.server.tick();
    assert!(!pair.server.world().has_entity(entity));
    assert_eq!(pair.server.client_count(), 0);
}
