// crates/yamcs-client/tests/session_manager.rs
// ============================================================================
// Module: Session Manager Tests
// Description: Lazy connect, reuse, and invalidation tests.
// Purpose: Validate that the bridge can start degraded and recover later.
// Dependencies: tiny_http, tokio, yamcs-client
// ============================================================================

//! ## Overview
//! The session manager must connect once, hand out the same client to every
//! caller, and forget the client on reset so the next acquire reconnects. A
//! failed acquire must leave nothing cached; the bridge stays degraded until
//! a later call succeeds.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use yamcs_client::ClientConfig;
use yamcs_client::SessionManager;
use yamcs_client::YamcsError;

use crate::common::server_info_route;
use crate::common::spawn_yamcs;
use crate::common::test_config;
use crate::common::unreachable_url;

// ============================================================================
// SECTION: Reuse
// ============================================================================

#[tokio::test]
async fn acquire_reuses_the_live_client() {
    let (url, handle) = spawn_yamcs(vec![server_info_route()], 1);

    let manager = SessionManager::new(test_config(&url));
    let first = manager.acquire().await.expect("first acquire failed");
    let second = manager.acquire().await.expect("second acquire failed");
    assert!(Arc::ptr_eq(&first, &second), "acquire must hand out the cached client");

    let received = handle.join().unwrap();
    assert_eq!(received.len(), 1, "only the first acquire may touch the server");
}

#[tokio::test]
async fn reset_forces_a_reconnect() {
    let (url, handle) = spawn_yamcs(vec![server_info_route()], 2);

    let manager = SessionManager::new(test_config(&url));
    let first = manager.acquire().await.expect("first acquire failed");
    manager.reset().await;
    let second = manager.acquire().await.expect("acquire after reset failed");
    assert!(!Arc::ptr_eq(&first, &second), "reset must drop the cached client");

    let received = handle.join().unwrap();
    assert_eq!(received.len(), 2);
}

// ============================================================================
// SECTION: Degraded Startup
// ============================================================================

#[tokio::test]
async fn failed_acquire_caches_nothing() {
    let config =
        ClientConfig { timeout: Duration::from_secs(2), ..test_config(&unreachable_url()) };
    let manager = SessionManager::new(config);

    let err = manager.acquire().await.expect_err("dead endpoint connected");
    assert!(matches!(err, YamcsError::Connection(_)), "got {err:?}");
    assert!(manager.peek().await.is_none(), "a failed connect must not be cached");
}

#[tokio::test]
async fn peek_never_connects() {
    let manager = SessionManager::new(test_config("http://localhost:1"));
    assert!(manager.peek().await.is_none());

    let (url, handle) = spawn_yamcs(vec![server_info_route()], 1);
    let manager = SessionManager::new(test_config(&url));
    let client = manager.acquire().await.expect("acquire failed");
    let peeked = manager.peek().await.expect("peek lost the cached client");
    assert!(Arc::ptr_eq(&client, &peeked));

    handle.join().unwrap();
}
