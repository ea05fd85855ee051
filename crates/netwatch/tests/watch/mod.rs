//! Tests for poll loops and the coordinator

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use netwatch::{
    Category, Coordinator, LinkStatus, Probe, ProbeResult, Registry, TargetEntry, Transition,
};
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::support::{ScriptedProbe, Step};

const TICK: Duration = Duration::from_millis(5);

fn servers(names: &[&str]) -> Registry {
    Registry::new(Category::Server, names.iter().map(|n| TargetEntry::new(*n, *n)))
}

async fn wait_for_calls(probe: &ScriptedProbe, calls: usize) {
    timeout(Duration::from_secs(5), async {
        while probe.calls() < calls {
            tokio::time::sleep(TICK).await;
        }
    })
    .await
    .expect("probe was not called often enough");
}

fn drain(rx: &mut mpsc::Receiver<Transition>) -> Vec<Transition> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Flips between up and down on every call
#[derive(Default)]
struct FlappingProbe {
    up: AtomicBool,
}

#[async_trait::async_trait]
impl Probe for FlappingProbe {
    async fn probe(&self, identifier: &str) -> ProbeResult {
        if self.up.fetch_xor(true, Ordering::SeqCst) {
            ProbeResult::up(identifier)
        } else {
            ProbeResult::down(identifier)
        }
    }
}

/// Takes a while to answer, always down
struct SlowProbe(Duration);

#[async_trait::async_trait]
impl Probe for SlowProbe {
    async fn probe(&self, identifier: &str) -> ProbeResult {
        tokio::time::sleep(self.0).await;
        ProbeResult::down(identifier)
    }
}

#[tokio::test]
async fn test_first_result_emits_exactly_once() {
    let probe = Arc::new(ScriptedProbe::new().script("apps", &[Step::Up]));
    let (tx, mut rx) = mpsc::channel(16);

    let coordinator = Coordinator::start(&servers(&["apps"]), probe.clone(), TICK, tx);
    wait_for_calls(&probe, 5).await;
    coordinator.shutdown().await;

    let events = drain(&mut rx);
    assert_eq!(
        events,
        vec![Transition { category: Category::Server, index: 0, status: LinkStatus::Online }]
    );
}

#[tokio::test]
async fn test_first_failure_emits_offline() {
    let probe = Arc::new(ScriptedProbe::new().script("db", &[Step::Down]));
    let (tx, mut rx) = mpsc::channel(16);

    let coordinator = Coordinator::start(&servers(&["db"]), probe.clone(), TICK, tx);
    wait_for_calls(&probe, 3).await;
    coordinator.shutdown().await;

    let statuses: Vec<_> = drain(&mut rx).into_iter().map(|e| e.status).collect();
    assert_eq!(statuses, vec![LinkStatus::Offline]);
}

#[tokio::test]
async fn test_only_changes_are_emitted() {
    use Step::{Down, Up};
    let probe = Arc::new(ScriptedProbe::new().script("apps", &[Down, Down, Up, Up, Up, Down]));
    let (tx, mut rx) = mpsc::channel(16);

    let coordinator = Coordinator::start(&servers(&["apps"]), probe.clone(), TICK, tx);
    wait_for_calls(&probe, 10).await;
    coordinator.shutdown().await;

    let statuses: Vec<_> = drain(&mut rx).into_iter().map(|e| e.status).collect();
    assert_eq!(statuses, vec![LinkStatus::Offline, LinkStatus::Online, LinkStatus::Offline]);
}

#[tokio::test]
async fn test_events_carry_target_index() {
    let probe = Arc::new(
        ScriptedProbe::new().script("a", &[Step::Up]).script("b", &[Step::Down]).script(
            "c",
            &[Step::Up],
        ),
    );
    let (tx, mut rx) = mpsc::channel(16);

    let coordinator = Coordinator::start(&servers(&["a", "b", "c"]), probe.clone(), TICK, tx);
    assert_eq!(coordinator.len(), 3);
    wait_for_calls(&probe, 9).await;
    coordinator.shutdown().await;

    let mut events = drain(&mut rx);
    events.sort_by_key(|e| e.index);
    let got: Vec<_> = events.iter().map(|e| (e.index, e.status)).collect();
    assert_eq!(
        got,
        vec![(0, LinkStatus::Online), (1, LinkStatus::Offline), (2, LinkStatus::Online)]
    );
}

#[tokio::test]
async fn test_no_events_after_shutdown() {
    let names: Vec<String> = (0..10).map(|i| format!("10.0.0.{i}")).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let (tx, mut rx) = mpsc::channel(1024);

    let coordinator = Coordinator::start(
        &servers(&names),
        Arc::new(FlappingProbe::default()),
        Duration::from_millis(1),
        tx,
    );
    tokio::time::sleep(Duration::from_millis(50)).await;
    coordinator.shutdown().await;

    // Everything still buffered was sent before shutdown returned
    let buffered = drain(&mut rx);
    assert!(!buffered.is_empty());

    // Every sender is gone, nothing can arrive anymore
    let next = timeout(Duration::from_millis(200), rx.recv()).await;
    assert!(matches!(next, Ok(None)), "channel still open or received {next:?}");
}

#[tokio::test]
async fn test_shutdown_interrupts_tick_delay() {
    let probe = Arc::new(ScriptedProbe::new());
    let (tx, _rx) = mpsc::channel(16);

    let coordinator =
        Coordinator::start(&servers(&["apps"]), probe.clone(), Duration::from_secs(3600), tx);
    wait_for_calls(&probe, 1).await;

    timeout(Duration::from_secs(2), coordinator.shutdown())
        .await
        .expect("shutdown waited for the tick delay");
    assert_eq!(probe.calls(), 1);
}

#[tokio::test]
async fn test_in_flight_probe_finishes_silently() {
    let (tx, mut rx) = mpsc::channel(16);
    let probe_time = Duration::from_millis(200);

    let coordinator = Coordinator::start(
        &servers(&["slow"]),
        Arc::new(SlowProbe(probe_time)),
        TICK,
        tx,
    );
    tokio::time::sleep(Duration::from_millis(20)).await;

    let started = Instant::now();
    coordinator.shutdown().await;

    assert!(started.elapsed() >= Duration::from_millis(100), "in-flight probe was preempted");
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_panicking_probe_is_isolated() {
    let probe = Arc::new(
        ScriptedProbe::new().script("bad", &[Step::Panic]).script("good", &[Step::Up]),
    );
    let (tx, mut rx) = mpsc::channel(16);

    let coordinator = Coordinator::start(&servers(&["bad", "good"]), probe.clone(), TICK, tx);

    let mut healthy = None;
    timeout(Duration::from_secs(5), async {
        while healthy.is_none() {
            let event = rx.recv().await.expect("channel closed");
            if event.index == 1 {
                healthy = Some(event.status);
            }
        }
    })
    .await
    .expect("no event from the healthy target");
    assert_eq!(healthy, Some(LinkStatus::Online));

    timeout(Duration::from_secs(5), coordinator.shutdown())
        .await
        .expect("shutdown hung on a panicking target");
}

#[tokio::test]
async fn test_target_keeps_polling_after_a_panic() {
    let probe = Arc::new(ScriptedProbe::new().script("flaky", &[Step::Panic, Step::Up]));
    let (tx, mut rx) = mpsc::channel(16);

    let coordinator = Coordinator::start(&servers(&["flaky"]), probe.clone(), TICK, tx);
    wait_for_calls(&probe, 5).await;
    coordinator.shutdown().await;

    // The panicking tick counts as a failure, the next ones as recovered
    let statuses: Vec<_> = drain(&mut rx).into_iter().map(|e| e.status).collect();
    assert_eq!(statuses, vec![LinkStatus::Offline, LinkStatus::Online]);
}

#[tokio::test]
async fn test_shutdown_all_stops_every_pool_first() {
    let (tx, _rx) = mpsc::channel(16);
    let fast = Arc::new(ScriptedProbe::new());

    let slow_pool = Coordinator::start(
        &servers(&["slow"]),
        Arc::new(SlowProbe(Duration::from_millis(300))),
        TICK,
        tx.clone(),
    );
    let fast_pool = Coordinator::start(&servers(&["fast"]), fast.clone(), TICK, tx);
    wait_for_calls(&fast, 3).await;

    let calls_at_stop = fast.calls();
    let started = Instant::now();
    Coordinator::shutdown_all([slow_pool, fast_pool]).await;

    // Joining the slow pool took a while, the fast one was already stopped
    assert!(started.elapsed() >= Duration::from_millis(100));
    assert!(fast.calls() <= calls_at_stop + 1, "fast pool kept polling during shutdown");
}
