//! End-to-end flows over mock peripherals and a recording store.
//!
//! These tests assemble the engines and command-source tasks the same
//! way the runtime does, then drive them through the mock handles.

mod common;

use common::RecordingStore;
use roomlink_agent::allowlist::AllowList;
use roomlink_agent::tasks::access::{self, DenyFeedback};
use roomlink_agent::tasks::{button, poll};
use roomlink_core::{Credential, DeviceKind, DeviceState};
use roomlink_engine::{DoorEngine, DoorProfile, LightEngine};
use roomlink_hardware::SmoothServo;
use roomlink_hardware::mock::{
    MockButton, MockScanner, MockServo, MockServoHandle, MockSwitch, MockSwitchHandle,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const BADGE: u64 = 756_402_188_501;

fn build_door(
    store: Arc<RecordingStore>,
) -> (DoorEngine<MockServo, RecordingStore>, MockServoHandle) {
    let (servo, handle) = MockServo::new();
    let drive = SmoothServo::new(servo, 0, Duration::from_millis(10));
    // Long auto-close so the safety timer stays out of these flows.
    let profile = DoorProfile::new(5, 0, Duration::from_secs(300)).unwrap();
    (DoorEngine::new(drive, store, profile), handle)
}

fn build_light(
    store: Arc<RecordingStore>,
) -> (LightEngine<MockSwitch, RecordingStore>, MockSwitchHandle) {
    let (switch, handle) = MockSwitch::new();
    (LightEngine::new(switch, store), handle)
}

/// Poll `check` until it holds, bounded in virtual time.
async fn eventually<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..500 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

#[tokio::test(start_paused = true)]
async fn button_press_opens_door_and_pushes() {
    let store = Arc::new(RecordingStore::new());
    let (door, servo) = build_door(Arc::clone(&store));
    let (button_device, button_handle) = MockButton::new();
    let cancel = CancellationToken::new();

    let watcher = tokio::spawn(button::run(
        button_device,
        door.clone(),
        Duration::from_millis(500),
        cancel.clone(),
    ));

    button_handle.press().await.unwrap();

    let door_check = door.clone();
    eventually(move || {
        let door = door_check.clone();
        async move { door.state().await == DeviceState::On }
    })
    .await;

    let store_check = Arc::clone(&store);
    eventually(move || {
        let store = Arc::clone(&store_check);
        async move { !store.pushes().is_empty() }
    })
    .await;

    assert_eq!(servo.angles(), vec![1, 2, 3, 4, 5]);
    assert_eq!(store.pushes(), vec![(DeviceKind::Door, "on".to_string())]);

    cancel.cancel();
    watcher.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn denied_scan_blinks_and_leaves_door_alone() {
    let store = Arc::new(RecordingStore::new());
    let (door, servo) = build_door(Arc::clone(&store));
    let (light, switch) = build_light(Arc::clone(&store));
    let (scanner, scanner_handle) = MockScanner::new();
    let cancel = CancellationToken::new();

    let gate = tokio::spawn(access::run(
        scanner,
        door.clone(),
        light.clone(),
        AllowList::from_raw(&[BADGE]),
        DenyFeedback {
            blink_count: 3,
            blink_interval: Duration::from_millis(100),
        },
        Duration::from_millis(1500),
        cancel.clone(),
    ));

    scanner_handle.present(Credential::new(999)).await.unwrap();

    let switch_check = switch.clone();
    eventually(move || {
        let switch = switch_check.clone();
        async move { switch.write_count() >= 7 }
    })
    .await;

    // Three on/off flashes, then the dark pre-blink level restored.
    assert_eq!(
        switch.levels(),
        vec![true, false, true, false, true, false, false]
    );
    assert_eq!(door.state().await, DeviceState::Off);
    assert_eq!(servo.write_count(), 0);
    assert!(store.pushes().is_empty());

    cancel.cancel();
    gate.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn permitted_scan_toggles_door_both_ways() {
    let store = Arc::new(RecordingStore::new());
    let (door, _servo) = build_door(Arc::clone(&store));
    let (light, _switch) = build_light(Arc::clone(&store));
    let (scanner, scanner_handle) = MockScanner::new();
    let cancel = CancellationToken::new();

    let gate = tokio::spawn(access::run(
        scanner,
        door.clone(),
        light.clone(),
        AllowList::from_raw(&[BADGE]),
        DenyFeedback {
            blink_count: 3,
            blink_interval: Duration::from_millis(100),
        },
        Duration::from_millis(1500),
        cancel.clone(),
    ));

    scanner_handle.present(Credential::new(BADGE)).await.unwrap();
    let door_check = door.clone();
    eventually(move || {
        let door = door_check.clone();
        async move { door.state().await == DeviceState::On }
    })
    .await;

    scanner_handle.present(Credential::new(BADGE)).await.unwrap();
    let door_check = door.clone();
    eventually(move || {
        let door = door_check.clone();
        async move { door.state().await == DeviceState::Off }
    })
    .await;

    let pushes = store.pushes();
    assert_eq!(
        pushes,
        vec![
            (DeviceKind::Door, "on".to_string()),
            (DeviceKind::Door, "off".to_string()),
        ]
    );

    cancel.cancel();
    gate.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn poll_applies_remote_state_exactly_once() {
    let store = Arc::new(RecordingStore::with_snapshot(common::snapshot(&[
        ("door", "on"),
        ("light", "on"),
    ])));
    let (door, _servo) = build_door(Arc::clone(&store));
    let (light, switch) = build_light(Arc::clone(&store));
    let cancel = CancellationToken::new();

    let loop_task = tokio::spawn(poll::run(
        Arc::clone(&store),
        door.clone(),
        light.clone(),
        Duration::from_millis(200),
        cancel.clone(),
    ));

    let door_check = door.clone();
    eventually(move || {
        let door = door_check.clone();
        async move { door.state().await == DeviceState::On }
    })
    .await;
    let light_check = light.clone();
    eventually(move || {
        let light = light_check.clone();
        async move { light.state().await == DeviceState::On }
    })
    .await;

    // Let several more polls of the same snapshot go by; the engines
    // must stay quiet once converged.
    tokio::time::sleep(Duration::from_secs(2)).await;

    let door_pushes = store
        .pushes()
        .iter()
        .filter(|(kind, _)| *kind == DeviceKind::Door)
        .count();
    let light_pushes = store
        .pushes()
        .iter()
        .filter(|(kind, _)| *kind == DeviceKind::Light)
        .count();
    assert_eq!(door_pushes, 1);
    assert_eq!(light_pushes, 1);
    assert_eq!(switch.levels(), vec![true]);

    cancel.cancel();
    loop_task.await.unwrap();
}
