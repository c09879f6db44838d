use bevy_confetti::runtime::{ConfettiMode, ConfettiRuntime};

#[test]
fn new_runtime_is_idle() {
    let runtime = ConfettiRuntime::new(None);
    assert!(!runtime.active);
    assert!(!runtime.streaming);
    assert!(!runtime.pending_burst);
    assert!(!runtime.clear_requested);
    assert!(runtime.stop_after.is_none());
}

#[test]
fn start_stream_activates_streaming() {
    let mut runtime = ConfettiRuntime::new(Some(42));
    runtime.start(ConfettiMode::Stream);
    assert!(runtime.active);
    assert!(runtime.streaming);
    assert!(runtime.stop_after.is_none());
    assert!(!runtime.pending_burst);
    assert_eq!(runtime.next_spawn, 0.0);
}

#[test]
fn start_timed_schedules_auto_stop() {
    let mut runtime = ConfettiRuntime::new(Some(42));
    runtime.start(ConfettiMode::Timed(3000.0));
    assert!(runtime.active);
    assert!(runtime.streaming);
    assert_eq!(runtime.stop_after, Some(3000.0));
}

#[test]
fn start_burst_owes_a_volley() {
    let mut runtime = ConfettiRuntime::new(Some(42));
    runtime.start(ConfettiMode::Burst);
    assert!(runtime.active);
    assert!(!runtime.streaming);
    assert!(runtime.pending_burst);
    assert!(runtime.stop_after.is_none());
}

#[test]
fn start_requests_a_reset_of_the_previous_run() {
    let mut runtime = ConfettiRuntime::new(Some(42));
    runtime.start(ConfettiMode::Timed(500.0));
    runtime.clear_requested = false;
    runtime.next_spawn = 12.0;

    runtime.start(ConfettiMode::Stream);

    assert!(runtime.clear_requested);
    assert!(runtime.stop_after.is_none());
    assert_eq!(runtime.next_spawn, 0.0);
}

#[test]
fn stop_clears_every_pending_delay() {
    let mut runtime = ConfettiRuntime::new(Some(42));
    runtime.start(ConfettiMode::Timed(3000.0));
    runtime.next_spawn = 25.0;

    runtime.stop();

    assert!(!runtime.active);
    assert!(!runtime.streaming);
    assert!(runtime.stop_after.is_none());
    assert!(!runtime.pending_burst);
    assert_eq!(runtime.next_spawn, 0.0);
    assert!(runtime.clear_requested);
}

#[test]
fn stop_twice_is_safe() {
    let mut runtime = ConfettiRuntime::new(Some(42));
    runtime.start(ConfettiMode::Stream);
    runtime.stop();
    runtime.clear_requested = false;

    runtime.stop();

    assert!(!runtime.active);
    assert!(runtime.clear_requested);
}

#[test]
fn deactivate_drains_instead_of_clearing() {
    let mut runtime = ConfettiRuntime::new(Some(42));
    runtime.start(ConfettiMode::Stream);
    runtime.clear_requested = false;

    runtime.deactivate();

    assert!(!runtime.active);
    assert!(!runtime.streaming);
    assert!(
        !runtime.clear_requested,
        "draining must not despawn live confetti"
    );
}
