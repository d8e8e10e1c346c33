// src/probe.rs
// =============================================================================
// This module probes targets by making HTTP requests.
//
// Key functionality:
// - Makes one HTTP GET request per target
// - Measures latency from request start until response headers arrive
// - Classifies the outcome: 2xx/3xx = responding, 4xx/5xx = HTTP failure
//   (code recorded), connection-level failure = error message recorded
// - Runs probes concurrently with a small bounded pool
//
// Failure policy: a probe can never abort the run. Every outcome, good or
// bad, becomes a ProbeResult; only the loader and the writer can fail the
// whole program.
//
// Rust concepts:
// - async/await: For concurrent network I/O
// - Streams: For processing many items concurrently
// - Instant: Monotonic clock for latency measurement
// =============================================================================

use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered()
use reqwest::Client;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::targets::Target;

/// How long a single probe may take before it is recorded as a timeout
///
/// Not configurable: one shared timeout is enough for the small,
/// human-curated URL lists this tool targets.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// How many probes may be in flight at once
///
/// Why 5? The lists are short, and a small pool keeps us from
/// hammering anyone's server while still overlapping the slow requests.
pub const MAX_CONCURRENT_PROBES: usize = 5;

// Some servers reject requests with no user agent, so we identify ourselves
const USER_AGENT: &str = "url-warden/0.1 (Health Check Bot)";

// The recorded outcome of probing one target
//
// Created once per target and never mutated afterward. Exactly one of
// status_code / error is populated on failure: a received response always
// carries its code, a connection-level failure always carries a message.
//
// #[derive(Serialize)] lets this go straight into the JSON report
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    /// Display label for the target (defaults to the URL)
    pub caption: String,
    /// The URL that was probed
    pub url: String,
    /// true only for status codes in 200-399
    pub success: bool,
    /// HTTP status code, present whenever a response was received
    pub status_code: Option<u16>,
    /// Elapsed time in milliseconds, request start to headers received
    /// (or to failure)
    pub latency_ms: f64,
    /// Human-readable description of a connection-level failure
    pub error: Option<String>,
}

// Classifies a status code under the responding policy
//
// Policy: 2xx and 3xx count as responding, 4xx and up do not. A redirect
// means the server is alive and answering, which is what we're checking;
// a 404 or 500 means something is wrong even though the server spoke HTTP.
pub fn is_responding(status_code: u16) -> bool {
    (200..400).contains(&status_code)
}

// Probes all targets concurrently, preserving input order
//
// This is the main entry point for probing. Results come back in the
// same order as the input list no matter which requests finish first.
//
// How ordering works:
// - Each target is tagged with its index before being turned into a future
// - buffer_unordered runs up to MAX_CONCURRENT_PROBES at once and yields
//   results in completion order
// - Each result is written into its index-addressed slot, exactly once
pub async fn probe_targets(targets: Vec<Target>) -> Vec<ProbeResult> {
    // Create an HTTP client with our fixed settings
    // We reuse this client for all requests (connection pooling)
    let client = Client::builder()
        .timeout(PROBE_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to create HTTP client");

    let total = targets.len();

    // Tag each target with its position so we can restore order later
    let futures = targets.into_iter().enumerate().map(|(index, target)| {
        let client = client.clone(); // Clone the client for each task
        async move { (index, probe_single(client, target).await) }
    });

    // One slot per target, filled as results arrive
    let mut slots: Vec<Option<ProbeResult>> = Vec::with_capacity(total);
    slots.resize_with(total, || None);

    let mut outcomes = stream::iter(futures).buffer_unordered(MAX_CONCURRENT_PROBES);
    while let Some((index, result)) = outcomes.next().await {
        slots[index] = Some(result);
    }

    // Every index was yielded exactly once, so every slot is filled
    slots
        .into_iter()
        .map(|slot| slot.expect("each target produces exactly one result"))
        .collect()
}

// Probes a single target
//
// This function does the actual HTTP request and builds the result.
// The latency clock stops when send() resolves, which for reqwest is
// the point where the response headers have been received. We never
// download the body; liveness doesn't need it.
async fn probe_single(client: Client, target: Target) -> ProbeResult {
    let start = Instant::now();
    let outcome = client.get(&target.url).send().await;
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    match outcome {
        Ok(response) => {
            // Got a response - the code decides success, but it's
            // always recorded either way
            let status_code = response.status().as_u16();
            ProbeResult {
                caption: target.caption,
                url: target.url,
                success: is_responding(status_code),
                status_code: Some(status_code),
                latency_ms,
                error: None,
            }
        }
        Err(e) => {
            // No response at all - record what went wrong
            ProbeResult {
                caption: target.caption,
                url: target.url,
                success: false,
                status_code: None,
                latency_ms,
                error: Some(describe_error(&e)),
            }
        }
    }
}

// Turns a reqwest error into a short human-readable message
//
// reqwest errors can happen for many reasons (timeout, DNS failure,
// refused connection, TLS problems). We keep the messages friendly for
// the common cases and fall back to the raw error text otherwise.
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("Request timed out after {} seconds", PROBE_TIMEOUT.as_secs())
    } else if error.is_connect() {
        "Failed to connect to the server".to_string()
    } else {
        error.to_string()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is buffer_unordered?
//    - It runs up to N futures concurrently and yields results as they
//      complete, NOT in submission order
//    - That's why each future carries its index: completion order is
//      whatever the network decides, but the slots put things right
//
// 2. Why Instant and not SystemTime?
//    - Instant is a monotonic clock: it only moves forward
//    - SystemTime can jump (NTP adjustments, manual clock changes),
//      which would corrupt latency measurements
//
// 3. Why clone the client?
//    - Each async task needs its own handle to the client
//    - Client is cheap to clone (it's a reference counter internally)
//    - All clones share one connection pool
//
// 4. Why does probe_single never return Result?
//    - A failed probe is data, not an error
//    - The run must survive every per-target failure and report it
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn target(url: &str, caption: &str) -> Target {
        Target {
            url: url.to_string(),
            caption: caption.to_string(),
        }
    }

    #[test]
    fn test_responding_policy_boundaries() {
        // 2xx and 3xx respond
        assert!(is_responding(200));
        assert!(is_responding(204));
        assert!(is_responding(301));
        assert!(is_responding(399));
        // 4xx and up do not
        assert!(!is_responding(400));
        assert!(!is_responding(404));
        assert!(!is_responding(500));
        // Below 2xx does not either
        assert!(!is_responding(199));
        assert!(!is_responding(100));
    }

    #[tokio::test]
    async fn test_empty_target_list() {
        let results = probe_targets(Vec::new()).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_connection_failure_is_recorded_not_fatal() {
        // Port 9 (discard) is virtually never listening on loopback,
        // so this fails fast with a connection error
        let results = probe_targets(vec![target("http://127.0.0.1:9", "Dead port")]).await;
        assert_eq!(results.len(), 1);

        let r = &results[0];
        assert!(!r.success);
        assert_eq!(r.status_code, None);
        assert!(r.error.is_some());
        assert_eq!(r.caption, "Dead port");
        assert!(r.latency_ms >= 0.0);
    }

    // Binds a loopback listener that answers one request with the given
    // response bytes, so response-path tests need no real network
    async fn one_shot_server(response: &'static [u8]) -> std::net::SocketAddr {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            // Read the request headers (a GET fits in one small buffer)
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response).await.unwrap();
        });

        addr
    }

    #[tokio::test]
    async fn test_response_records_status_code_and_latency() {
        let addr = one_shot_server(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\n\r\n").await;

        let url = format!("http://{}", addr);
        let results = probe_targets(vec![target(&url, "Local")]).await;
        assert_eq!(results.len(), 1);

        let r = &results[0];
        assert!(r.success);
        assert_eq!(r.status_code, Some(200));
        assert!(r.error.is_none());
        assert!(r.latency_ms > 0.0);
    }

    #[tokio::test]
    async fn test_http_failure_still_records_status_code() {
        let addr = one_shot_server(b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\n\r\n").await;

        let url = format!("http://{}", addr);
        let results = probe_targets(vec![target(&url, "Missing page")]).await;

        // A received response always carries its code, even on failure
        let r = &results[0];
        assert!(!r.success);
        assert_eq!(r.status_code, Some(404));
        assert!(r.error.is_none());
    }

    #[tokio::test]
    async fn test_results_preserve_input_order() {
        let targets = vec![
            target("http://127.0.0.1:9/first", "first"),
            target("http://127.0.0.1:9/second", "second"),
            target("http://127.0.0.1:9/third", "third"),
        ];
        let results = probe_targets(targets).await;
        let captions: Vec<&str> = results.iter().map(|r| r.caption.as_str()).collect();
        assert_eq!(captions, vec!["first", "second", "third"]);
    }
}
