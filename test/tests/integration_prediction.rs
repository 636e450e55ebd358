//! Client-side prediction, reconciliation, and behavior over a degraded
//! link. The movement predictor mirrors the server's processor exactly, so
//! a correct engine shows zero reconciliation snap.

use replica_shared::LinkConditionerConfig;
use replica_test::{MoveCommand, Position, TestPair};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn commanding_entity_responds_immediately() {
    init_logging();
    let mut pair = TestPair::new();
    let entity = pair.connect();
    // warm up so render ticks advance distinctly before asserting
    pair.idle(4);

    for step in 1..=3 {
        pair.exchange(MoveCommand { dx: 1.0, dy: 0.0 });
        // authoritative state lags, but the predicted overlay does not:
        // every sent move is visible exactly once
        let render = pair.client.render_store().unwrap();
        assert_eq!(render.component::<Position>(entity).unwrap().x, step as f32);
    }
}

#[test]
fn reconciliation_drains_the_command_history() {
    init_logging();
    let mut pair = TestPair::new();
    let entity = pair.connect();
    pair.idle(4);

    for _ in 0..3 {
        pair.exchange(MoveCommand { dx: 2.0, dy: 0.0 });
    }
    pair.idle(4);

    // only the current in-flight command remains unacknowledged
    assert_eq!(pair.client.pending_commands(), 1);
    let render = pair.client.render_store().unwrap();
    let server_position = pair.server.world().component::<Position>(entity).unwrap();
    assert_eq!(server_position.x, 6.0);
    assert_eq!(render.component::<Position>(entity), Some(server_position));
}

#[test]
fn other_entities_render_behind_the_predicted_one() {
    init_logging();
    let mut pair = TestPair::new();
    let entity = pair.connect();

    let other = pair.server.world_mut().try_create_entity().unwrap();
    pair.server.world_mut().add_component::<Position>(other);
    pair.idle(6);

    // drift the non-commanded entity on the server
    pair.server
        .world_mut()
        .component_mut::<Position>(other)
        .unwrap()
        .x = 10.0;
    pair.exchange(MoveCommand { dx: 1.0, dy: 0.0 });

    let render = pair.client.render_store().unwrap();
    // the commanded entity is predicted to the newest state plus pending
    // moves, the other entity still shows the delayed interpolated past
    assert_eq!(render.component::<Position>(entity).unwrap().x, 1.0);
    assert_eq!(render.component::<Position>(other).unwrap().x, 0.0);
}

#[test]
fn lossy_link_still_converges() {
    init_logging();
    let mut pair = TestPair::with_conditioner(Some(LinkConditionerConfig {
        delay_polls: 1,
        jitter_polls: 1,
        incoming_loss: 0.25,
        seed: 42,
    }));
    let entity = pair.connect();
    pair.idle(8);

    for _ in 0..10 {
        pair.exchange(MoveCommand { dx: 1.0, dy: 1.0 });
    }
    pair.idle(30);

    let server_position = pair.server.world().component::<Position>(entity).unwrap();
    assert_eq!(server_position.x, 10.0);
    let render = pair.client.render_store().expect("snapshots still arrive");
    assert_eq!(render.component::<Position>(entity), Some(server_position));
    // the conditioner did drop traffic, and the client degraded cleanly
    assert!(pair.client.buffered_snapshots() > 0);
}

#[test]
fn total_loss_renders_nothing() {
    init_logging();
    let mut pair = TestPair::with_conditioner(Some(LinkConditionerConfig {
        delay_polls: 0,
        jitter_polls: 0,
        incoming_loss: 1.0,
        seed: 7,
    }));
    // the handshake command still flows client-to-server, but no snapshot
    // survives the conditioner
    pair.connect();
    pair.idle(5);

    assert!(pair.client.render_store().is_none());
    assert_eq!(pair.client.buffered_snapshots(), 0);
}
