// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cbr_adapters::{FakeHost, FakeLogService, HostCall, LogError};
use cbr_core::{FakeClock, LogTarget, Scheduler, Timer, TimerId};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn session() -> (
    LogSession<FakeLogService, FakeHost, FakeClock>,
    FakeLogService,
    FakeHost,
) {
    let logs = FakeLogService::new();
    let host = FakeHost::new();
    let scheduler = Arc::new(Mutex::new(Scheduler::new()));
    let follower = LogEventFollower::new(
        logs.clone(),
        host.clone(),
        LogTarget::new("/aws/codebuild/app", "run-1"),
        Timer::new(TimerId::LogPoll, scheduler, FakeClock::new()),
        Duration::from_secs(5),
    );
    (LogSession::new(follower, host.clone()), logs, host)
}

#[tokio::test]
async fn lines_are_grouped() {
    let (mut session, logs, host) = session();
    logs.push_events(&[(1, "hello")], None);

    session.start().await;
    session.start().await;
    session.stop(true);

    assert_eq!(
        host.calls(),
        vec![
            HostCall::StartGroup("Build logs: /aws/codebuild/app/run-1".into()),
            HostCall::Info("hello".into()),
            HostCall::EndGroup,
        ]
    );
    assert_eq!(logs.fetch_count(), 1);
}

#[tokio::test]
async fn group_closes_after_grace_rounds() {
    let (mut session, logs, host) = session();
    session.start().await;
    session.stop(false);
    assert!(!host.calls().contains(&HostCall::EndGroup));

    session.on_timer().await;
    session.on_timer().await;

    assert_eq!(logs.fetch_count(), 3);
    assert_eq!(host.calls().last(), Some(&HostCall::EndGroup));
}

#[tokio::test]
async fn access_denied_closes_group() {
    let (mut session, logs, host) = session();
    logs.push_error(LogError::AccessDenied("denied".into()));

    session.start().await;

    assert!(session.follower().is_finished());
    assert_eq!(host.calls().last(), Some(&HostCall::EndGroup));
}

#[tokio::test]
async fn shutdown_closes_group_once() {
    let (mut session, _, host) = session();
    session.start().await;

    session.shutdown();
    session.shutdown();

    let closes = host
        .calls()
        .iter()
        .filter(|c| **c == HostCall::EndGroup)
        .count();
    assert_eq!(closes, 1);
}

#[tokio::test]
async fn shutdown_before_start_writes_nothing() {
    let (mut session, logs, host) = session();

    session.shutdown();
    session.start().await;

    assert_eq!(logs.fetch_count(), 0);
    assert!(!session.is_started());
    assert!(host.calls().is_empty());
}
