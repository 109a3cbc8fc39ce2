// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;

fn shared() -> Arc<Mutex<Scheduler>> {
    Arc::new(Mutex::new(Scheduler::new()))
}

#[test]
fn scheduler_fires_items_at_correct_time() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();

    let now = clock.now();
    scheduler.schedule(TimerId::BuildPoll, now + Duration::from_secs(10));
    scheduler.schedule(TimerId::LogPoll, now + Duration::from_secs(5));

    assert!(scheduler.poll(now).is_empty());

    clock.advance(Duration::from_secs(5));
    let ready = scheduler.poll(clock.now());
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].id, TimerId::LogPoll);

    clock.advance(Duration::from_secs(5));
    let ready = scheduler.poll(clock.now());
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].id, TimerId::BuildPoll);
    assert_eq!(scheduler.next_fire_time(), None);
}

#[test]
fn scheduling_same_id_replaces_deadline() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();

    let now = clock.now();
    scheduler.schedule(TimerId::BuildPoll, now + Duration::from_secs(5));
    scheduler.schedule(TimerId::BuildPoll, now + Duration::from_secs(20));

    clock.advance(Duration::from_secs(10));
    assert!(scheduler.poll(clock.now()).is_empty());
    assert_eq!(
        scheduler.next_fire_time(),
        Some(now + Duration::from_secs(20))
    );
}

#[test]
fn cancel_prevents_firing_and_allows_rearm() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();

    let now = clock.now();
    scheduler.schedule(TimerId::LogPoll, now + Duration::from_secs(1));
    assert!(scheduler.cancel(TimerId::LogPoll));
    assert!(!scheduler.cancel(TimerId::LogPoll));

    scheduler.schedule(TimerId::LogPoll, now + Duration::from_secs(2));
    clock.advance(Duration::from_secs(3));
    let ready = scheduler.poll(clock.now());
    assert_eq!(ready.len(), 1);
}

#[test]
fn due_items_come_back_earliest_first() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();

    let now = clock.now();
    scheduler.schedule(TimerId::BuildPoll, now + Duration::from_secs(2));
    scheduler.schedule(TimerId::LogPoll, now + Duration::from_secs(1));

    clock.advance(Duration::from_secs(5));
    let ids: Vec<_> = scheduler
        .poll(clock.now())
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, vec![TimerId::LogPoll, TimerId::BuildPoll]);
}

#[test]
fn timer_handle_arms_relative_to_clock() {
    let clock = FakeClock::new();
    let scheduler = shared();
    let timer = Timer::new(TimerId::BuildPoll, scheduler.clone(), clock.clone());

    timer.arm(Duration::from_millis(5000));
    assert!(timer.is_armed());

    clock.advance_millis(4999);
    assert!(scheduler.lock().unwrap().poll(clock.now()).is_empty());

    clock.advance_millis(1);
    assert_eq!(scheduler.lock().unwrap().poll(clock.now()).len(), 1);
    assert!(!timer.is_armed());
}

#[test]
fn clear_on_drop_disarms_on_early_return() {
    let clock = FakeClock::new();
    let scheduler = shared();
    let timer = Timer::new(TimerId::BuildPoll, scheduler.clone(), clock);
    timer.arm(Duration::from_secs(5));

    fn failing_scope<C: Clock>(timer: &Timer<C>) -> Result<(), &'static str> {
        let _guard = timer.clear_on_drop();
        Err("stop call failed")
    }

    assert!(failing_scope(&timer).is_err());
    assert!(!timer.is_armed());
    assert_eq!(scheduler.lock().unwrap().next_fire_time(), None);
}

#[test]
fn timers_with_different_ids_are_independent() {
    let clock = FakeClock::new();
    let scheduler = shared();
    let poll = Timer::new(TimerId::BuildPoll, scheduler.clone(), clock.clone());
    let logs = Timer::new(TimerId::LogPoll, scheduler.clone(), clock);

    poll.arm(Duration::from_secs(5));
    logs.arm(Duration::from_secs(5));
    logs.clear();

    assert!(poll.is_armed());
    assert!(!logs.is_armed());
    assert!(scheduler.lock().unwrap().is_armed(TimerId::BuildPoll));
    assert!(!scheduler.lock().unwrap().is_armed(TimerId::LogPoll));
}
