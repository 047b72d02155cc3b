//! Behaviour of the direct-then-mirrors chain against a scripted client.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{MemoryStore, MockClient, Reply, fetcher, fresh_snapshot, manifest_body};
use rmmp_fetch::{FallbackEvent, FallbackOptions, FetchError, MirrorRecord, TransferProgress};

const MANIFEST: &str = "https://github.com/owner/repo/releases/latest/download/update.json";
const PAYLOAD: &str = "https://github.com/owner/repo/releases/download/v1.2.0/module.zip";

fn mirrors(count: usize) -> Vec<MirrorRecord> {
    (0..count)
        .map(|i| MirrorRecord::new(format!("https://m{i}.test"), 100, (count - i) as f64))
        .collect()
}

fn recorder() -> (Arc<Mutex<Vec<FallbackEvent>>>, FallbackOptions) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let options = FallbackOptions::default().on_event(Arc::new(move |event| {
        sink.lock().unwrap().push(event.clone());
    }));
    (events, options)
}

#[tokio::test]
async fn direct_success_touches_nothing_else() {
    let client = MockClient::new();
    client.route(MANIFEST, Reply::ok(manifest_body(PAYLOAD)));
    let fetcher = fetcher(&client, MemoryStore::empty(), FallbackOptions::default());

    let manifest = fetcher.fetch_manifest(MANIFEST).await.unwrap();

    assert_eq!(manifest.payload_url, PAYLOAD);
    assert_eq!(manifest.version_code, 120);
    assert_eq!(client.calls(), vec![MANIFEST.to_string()]);
}

#[tokio::test]
async fn mirrors_are_tried_fastest_first_until_one_answers() {
    let slow = MirrorRecord::new("https://slow.test", 20, 0.5);
    let fast = MirrorRecord::new("https://fast.test/", 300, 9.0);
    let mid = MirrorRecord::new("https://mid.test", 80, 4.0);

    let client = MockClient::new();
    client
        .route(MANIFEST, Reply::status(503))
        .route(format!("https://fast.test/{MANIFEST}"), Reply::status(502))
        .route(format!("https://mid.test/{MANIFEST}"), Reply::Fail("reset".into()))
        .route(
            format!("https://slow.test/{MANIFEST}"),
            Reply::ok(manifest_body(PAYLOAD)),
        );
    let store = MemoryStore::with(fresh_snapshot(vec![slow, fast, mid]));
    let fetcher = fetcher(&client, store, FallbackOptions::default());

    let manifest = fetcher.fetch_manifest(MANIFEST).await.unwrap();

    assert_eq!(manifest.version, "v1.2.0");
    assert_eq!(
        client.calls(),
        vec![
            MANIFEST.to_string(),
            format!("https://fast.test/{MANIFEST}"),
            format!("https://mid.test/{MANIFEST}"),
            format!("https://slow.test/{MANIFEST}"),
        ]
    );
}

#[tokio::test]
async fn attempts_stop_at_the_mirror_ceiling() {
    let client = MockClient::new();
    let store = MemoryStore::with(fresh_snapshot(mirrors(15)));
    let fetcher = fetcher(&client, store, FallbackOptions::default());

    let err = fetcher.fetch_manifest(MANIFEST).await.unwrap_err();

    assert!(matches!(
        err,
        FetchError::AllAttemptsExhausted { attempts: 11, last: Some(_) }
    ));
    assert_eq!(client.call_count(), 11);
}

#[tokio::test]
async fn custom_ceiling_is_honoured() {
    let client = MockClient::new();
    let store = MemoryStore::with(fresh_snapshot(mirrors(5)));
    let options = FallbackOptions::default().max_mirror_attempts(2);
    let fetcher = fetcher(&client, store, options);

    let err = fetcher.fetch_manifest(MANIFEST).await.unwrap_err();

    assert!(matches!(err, FetchError::AllAttemptsExhausted { attempts: 3, .. }));
    assert_eq!(client.call_count(), 3);
}

#[tokio::test]
async fn empty_catalog_ends_after_the_direct_attempt() {
    let client = MockClient::new();
    let store = MemoryStore::with(fresh_snapshot(Vec::new()));
    let fetcher = fetcher(&client, store, FallbackOptions::default());

    let err = fetcher.fetch_manifest(MANIFEST).await.unwrap_err();

    match err {
        FetchError::AllAttemptsExhausted { attempts, last } => {
            assert_eq!(attempts, 1);
            assert!(matches!(last.as_deref(), Some(FetchError::Transport { .. })));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(client.calls(), vec![MANIFEST.to_string()]);
}

#[tokio::test]
async fn unreachable_directory_is_reported_and_ends_the_chain() {
    let client = MockClient::new();
    client.route(common::DIRECTORY, Reply::status(500));
    let (events, options) = recorder();
    let fetcher = fetcher(&client, MemoryStore::empty(), options);

    let err = fetcher.fetch_manifest(MANIFEST).await.unwrap_err();

    assert!(matches!(err, FetchError::AllAttemptsExhausted { attempts: 1, .. }));
    assert_eq!(
        client.calls(),
        vec![MANIFEST.to_string(), common::DIRECTORY.to_string()]
    );
    assert!(
        events
            .lock()
            .unwrap()
            .iter()
            .any(|e| matches!(e, FallbackEvent::CatalogUnavailable { .. }))
    );
}

#[tokio::test]
async fn malformed_manifest_is_not_retried_through_mirrors() {
    let client = MockClient::new();
    client.route(MANIFEST, Reply::ok(r#"{"version":"v1","versionCode":1}"#));
    let store = MemoryStore::with(fresh_snapshot(mirrors(3)));
    let fetcher = fetcher(&client, store, FallbackOptions::default());

    let err = fetcher.fetch_manifest(MANIFEST).await.unwrap_err();

    assert!(matches!(err, FetchError::Parse { .. }));
    assert!(err.to_string().contains("zipUrl"));
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn events_describe_every_step() {
    let mirror = MirrorRecord::new("https://m.test", 50, 2.0);
    let mirrored = format!("https://m.test/{MANIFEST}");

    let client = MockClient::new();
    client.route(mirrored.clone(), Reply::ok(manifest_body(PAYLOAD)));
    let (events, options) = recorder();
    let fetcher = fetcher(
        &client,
        MemoryStore::with(fresh_snapshot(vec![mirror.clone()])),
        options,
    );

    fetcher.fetch_manifest(MANIFEST).await.unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 4);
    assert!(matches!(&events[0], FallbackEvent::DirectAttempt { url } if url == MANIFEST));
    assert!(matches!(&events[1], FallbackEvent::DirectFailed { .. }));
    assert_eq!(
        events[2],
        FallbackEvent::MirrorAttempt {
            attempt: 1,
            ceiling: 1,
            mirror: mirror.clone(),
            url: mirrored.clone(),
        }
    );
    assert_eq!(
        events[3],
        FallbackEvent::Succeeded {
            url: mirrored,
            mirror: Some(mirror),
        }
    );
}

#[tokio::test(start_paused = true)]
async fn hung_attempt_is_abandoned_at_its_deadline() {
    let client = MockClient::new();
    client
        .route(MANIFEST, Reply::Hang)
        .route(
            format!("https://m0.test/{MANIFEST}"),
            Reply::ok(manifest_body(PAYLOAD)),
        );
    let store = MemoryStore::with(fresh_snapshot(mirrors(1)));
    let options = FallbackOptions::default().manifest_timeout(Duration::from_secs(3));
    let fetcher = fetcher(&client, store, options);

    let manifest = fetcher.fetch_manifest(MANIFEST).await.unwrap();

    assert_eq!(manifest.payload_url, PAYLOAD);
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn payload_url_is_canonicalized_before_the_direct_attempt() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("downloads/module_v1.2.0_120.zip");

    let client = MockClient::new();
    client.route(
        PAYLOAD,
        Reply::chunked(vec![b"PK\x03\x04".to_vec(), b"rest-of-archive".to_vec()]),
    );
    let fetcher = fetcher(&client, MemoryStore::empty(), FallbackOptions::default());

    let seen = Mutex::new(Vec::new());
    let on_progress = |p: &TransferProgress| seen.lock().unwrap().push(*p);
    let written = fetcher
        .fetch_payload(&format!("https://ghproxy.cc/{PAYLOAD}"), &dest, Some(&on_progress))
        .await
        .unwrap();

    assert_eq!(written, 19);
    assert_eq!(client.calls(), vec![PAYLOAD.to_string()]);
    assert_eq!(std::fs::read(&dest).unwrap(), b"PK\x03\x04rest-of-archive");

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(
        seen.last(),
        Some(&TransferProgress {
            bytes_downloaded: 19,
            total_bytes: Some(19),
        })
    );
}

#[tokio::test]
async fn payload_falls_back_to_a_mirror_and_overwrites_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("module.zip");
    std::fs::write(&dest, b"stale bytes from an earlier run").unwrap();

    let client = MockClient::new();
    client
        .route(PAYLOAD, Reply::status(404))
        .route(format!("https://m0.test/{PAYLOAD}"), Reply::ok(b"zip".to_vec()));
    let store = MemoryStore::with(fresh_snapshot(mirrors(2)));
    let fetcher = fetcher(&client, store, FallbackOptions::default());

    fetcher.fetch_payload(PAYLOAD, &dest, None).await.unwrap();

    assert_eq!(std::fs::read(&dest).unwrap(), b"zip");
    assert_eq!(client.call_count(), 2);
}
