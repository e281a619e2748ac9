//! Timer-driven status sequencer.

use std::sync::{Arc, Mutex, PoisonError};

use common::OrderId;
use domain::{OrderStatus, PlacedOrder};
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::schedule::StatusSchedule;

/// The order being tracked and where it is in its progression.
///
/// With no order placed yet, `order` is None and `status` is `Pending`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderProgress {
    pub order: Option<PlacedOrder>,
    pub status: OrderStatus,
}

impl OrderProgress {
    /// Returns the id of the tracked order.
    pub fn order_id(&self) -> Option<OrderId> {
        self.order.as_ref().map(|order| order.id)
    }

    /// Returns true while an order has been placed but not delivered.
    pub fn is_in_flight(&self) -> bool {
        self.order.is_some() && !self.status.is_terminal()
    }
}

/// Advances one order at a time through the status schedule.
///
/// Each order's transitions run in a single spawned task. The task is
/// aborted when the order is cancelled, when a new order replaces it and
/// when the sequencer is dropped. A transition only writes if its order is
/// still the tracked one.
pub struct StatusSequencer {
    schedule: StatusSchedule,
    progress: Arc<watch::Sender<OrderProgress>>,
    task: Mutex<Option<JoinHandle<()>>>,
    runtime: Handle,
}

impl StatusSequencer {
    /// Creates a sequencer that spawns its timers on `runtime`.
    pub fn new(schedule: StatusSchedule, runtime: Handle) -> Self {
        let (tx, _rx) = watch::channel(OrderProgress::default());
        Self {
            schedule,
            progress: Arc::new(tx),
            task: Mutex::new(None),
            runtime,
        }
    }

    /// Returns the schedule in use.
    pub fn schedule(&self) -> &StatusSchedule {
        &self.schedule
    }

    /// Returns a snapshot of the tracked order.
    pub fn progress(&self) -> OrderProgress {
        self.progress.borrow().clone()
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.progress.borrow().status
    }

    /// Returns a receiver that observes every status change.
    pub fn subscribe(&self) -> watch::Receiver<OrderProgress> {
        self.progress.subscribe()
    }

    /// Starts tracking `order` from `Pending`.
    ///
    /// Any previously tracked order is dropped and its timers aborted.
    /// `on_delivered` runs once, as the order reaches `Delivered` and before
    /// any subscriber can see that status.
    #[tracing::instrument(skip(self, order, on_delivered), fields(order_id = %order.id))]
    pub fn start<F>(&self, order: PlacedOrder, on_delivered: F)
    where
        F: FnOnce(OrderId) + Send + 'static,
    {
        let order_id = order.id;
        let started = Instant::now();
        self.progress.send_replace(OrderProgress {
            order: Some(order),
            status: OrderStatus::Pending,
        });

        let handle = self.runtime.spawn(drive(
            order_id,
            started,
            self.schedule.clone(),
            Arc::clone(&self.progress),
            on_delivered,
        ));
        if let Some(previous) = self.lock_task().replace(handle) {
            previous.abort();
        }

        metrics::counter!("order_status_transitions_total", "status" => OrderStatus::Pending.as_str())
            .increment(1);
        tracing::info!(status = %OrderStatus::Pending, "order sequencing started");
    }

    /// Stops an order that has not been delivered yet.
    ///
    /// Returns the cancelled order's id, or None if nothing was in flight.
    #[tracing::instrument(skip(self))]
    pub fn cancel(&self) -> Option<OrderId> {
        let mut cancelled = None;
        self.progress.send_if_modified(|progress| {
            if !progress.is_in_flight() {
                return false;
            }
            cancelled = progress.order_id();
            *progress = OrderProgress::default();
            true
        });
        let order_id = cancelled?;

        self.abort_task();
        metrics::counter!("orders_cancelled").increment(1);
        tracing::info!(%order_id, "order cancelled");
        Some(order_id)
    }

    /// Forgets a delivered order so the next checkout starts fresh.
    ///
    /// Does nothing while an order is still in flight.
    pub fn reset(&self) -> bool {
        let reset = self.progress.send_if_modified(|progress| {
            if progress.order.is_none() || progress.is_in_flight() {
                return false;
            }
            *progress = OrderProgress::default();
            true
        });
        if reset {
            self.abort_task();
            tracing::debug!("delivered order cleared");
        }
        reset
    }

    fn abort_task(&self) {
        if let Some(handle) = self.lock_task().take() {
            handle.abort();
        }
    }

    fn lock_task(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.task.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for StatusSequencer {
    fn drop(&mut self) {
        self.abort_task();
    }
}

impl std::fmt::Debug for StatusSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusSequencer")
            .field("schedule", &self.schedule)
            .field("progress", &*self.progress.borrow())
            .finish_non_exhaustive()
    }
}

async fn drive<F>(
    order_id: OrderId,
    started: Instant,
    schedule: StatusSchedule,
    progress: Arc<watch::Sender<OrderProgress>>,
    on_delivered: F,
) where
    F: FnOnce(OrderId) + Send + 'static,
{
    let mut on_delivered = Some(on_delivered);

    for step in schedule.steps() {
        tokio::time::sleep_until(started + step.after).await;

        // The delivery hook runs under the same write as `Delivered`, so no
        // subscriber can observe the terminal status before the hook's
        // effects.
        let advanced = progress.send_if_modified(|current| {
            if current.order_id() != Some(order_id) {
                return false;
            }
            if step.status.is_terminal()
                && let Some(hook) = on_delivered.take()
            {
                hook(order_id);
            }
            current.status = step.status;
            true
        });
        if !advanced {
            tracing::debug!(%order_id, status = %step.status, "stale transition dropped");
            return;
        }

        metrics::counter!("order_status_transitions_total", "status" => step.status.as_str())
            .increment(1);
        tracing::info!(%order_id, status = %step.status, "order status advanced");
    }

    metrics::histogram!("order_duration_seconds").record(started.elapsed().as_secs_f64());
}
