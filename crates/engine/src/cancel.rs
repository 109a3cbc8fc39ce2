// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interrupt-driven cancellation

use std::sync::Arc;
use tokio::sync::watch;

/// Receives interrupt requests for the runtime
pub struct CancellationController {
    rx: watch::Receiver<bool>,
}

/// Requests cancellation, e.g. from a SIGINT handler
#[derive(Clone)]
pub struct InterruptHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancellationController {
    pub fn new() -> (Self, InterruptHandle) {
        let (tx, rx) = watch::channel(false);
        (Self { rx }, InterruptHandle { tx: Arc::new(tx) })
    }

    pub fn is_requested(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is requested. Never resolves if every
    /// handle is dropped without interrupting.
    pub async fn requested(&mut self) {
        if self.rx.wait_for(|requested| *requested).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

impl InterruptHandle {
    pub fn interrupt(&self) {
        self.tx.send_replace(true);
    }
}
