use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use buildboard_feed::{
    CloseReason, EventSink, FeedConnector, FeedError, FeedEvent, FeedHandle, FeedSettings,
};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Emits a fixed script, then parks until cancelled.
struct ScriptedConnector {
    script: Vec<FeedEvent>,
    cancelled: Arc<AtomicBool>,
}

#[async_trait::async_trait]
impl FeedConnector for ScriptedConnector {
    async fn run(&self, sink: &dyn EventSink, cancel: &CancellationToken) {
        for event in &self.script {
            sink.emit(event.clone());
        }
        cancel.cancelled().await;
        self.cancelled.store(true, Ordering::SeqCst);
        sink.emit(FeedEvent::Closed {
            reason: CloseReason::Shutdown,
        });
    }
}

fn drain_until(handle: &FeedHandle, want: usize) -> Vec<FeedEvent> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut events = Vec::new();
    while events.len() < want && Instant::now() < deadline {
        match handle.try_recv() {
            Some(event) => events.push(event),
            None => thread::sleep(Duration::from_millis(5)),
        }
    }
    events
}

#[test]
fn events_arrive_in_emission_order() {
    let cancelled = Arc::new(AtomicBool::new(false));
    let script = vec![
        FeedEvent::Opened,
        FeedEvent::Frame("a".to_string()),
        FeedEvent::Frame("b".to_string()),
    ];
    let handle = FeedHandle::spawn(ScriptedConnector {
        script: script.clone(),
        cancelled: cancelled.clone(),
    })
    .unwrap();

    assert_eq!(drain_until(&handle, 3), script);
    assert_eq!(handle.try_recv(), None);
    assert!(!cancelled.load(Ordering::SeqCst));
}

#[test]
fn close_cancels_and_joins_the_worker() {
    let cancelled = Arc::new(AtomicBool::new(false));
    let handle = FeedHandle::spawn(ScriptedConnector {
        script: vec![FeedEvent::Opened],
        cancelled: cancelled.clone(),
    })
    .unwrap();
    assert_eq!(drain_until(&handle, 1), vec![FeedEvent::Opened]);

    handle.close();

    // close() returns only after the worker ran to completion.
    assert!(cancelled.load(Ordering::SeqCst));
}

#[test]
fn drop_releases_the_connection() {
    let cancelled = Arc::new(AtomicBool::new(false));
    {
        let _handle = FeedHandle::spawn(ScriptedConnector {
            script: Vec::new(),
            cancelled: cancelled.clone(),
        })
        .unwrap();
    }
    assert!(cancelled.load(Ordering::SeqCst));
}

#[test]
fn connect_rejects_unsupported_scheme_up_front() {
    let settings = FeedSettings::new(Url::parse("ftp://ci.local").unwrap());
    assert!(matches!(
        FeedHandle::connect(settings),
        Err(FeedError::UnsupportedScheme(_))
    ));
}

#[test]
fn connect_to_unreachable_server_reports_closed() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let settings = FeedSettings::new(Url::parse(&format!("http://{addr}")).unwrap());
    let handle = FeedHandle::connect(settings).unwrap();

    let events = drain_until(&handle, 1);
    assert!(matches!(
        events.as_slice(),
        [FeedEvent::Closed {
            reason: CloseReason::ConnectFailed(_)
        }]
    ));
}
