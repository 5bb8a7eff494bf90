//! Outbox producer and webhook dispatcher.
//!
//! The dispatcher keeps no state between cycles. Each cycle reads a small
//! batch of pending events, delivers them through the notification sink and
//! writes the resulting transition back. Delivery is at-least-once: a crash
//! between delivery and the state write leaves the event pending.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use jobboard_core::{AppError, AppResult};
use jobboard_domain::{OutboxEvent, OutboxEventId, OutboxStatus};

use crate::outbox_ports::{NotificationSink, OutboxRepository};

mod dispatch;
mod policy;


pub use dispatch::{DispatchCycleReport, DispatchOutcome, DispatchResult};
pub use policy::{DEFAULT_DISPATCH_BATCH_SIZE, DEFAULT_MAX_DELIVERY_ATTEMPTS, DispatchPolicy};

/// Application service owning the outbox queue.
#[derive(Clone)]
pub struct OutboxService {
    repository: Arc<dyn OutboxRepository>,
    sink: Arc<dyn NotificationSink>,
    policy: DispatchPolicy,
}

impl OutboxService {
    /// Creates an outbox service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn OutboxRepository>,
        sink: Arc<dyn NotificationSink>,
        policy: DispatchPolicy,
    ) -> Self {
        Self {
            repository,
            sink,
            policy,
        }
    }

    /// Returns the active dispatch policy.
    #[must_use]
    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Queues a domain event for delivery.
    pub async fn enqueue_event(&self, event_type: &str, payload: Value) -> AppResult<OutboxEvent> {
        let event = OutboxEvent::new(event_type, payload, Utc::now())?;
        self.repository.enqueue_event(event.clone()).await?;

        info!(
            event_id = %event.id(),
            event_type = %event.event_type(),
            "outbox event queued"
        );

        Ok(event)
    }

    /// Returns one event by identifier.
    pub async fn find_event(&self, event_id: OutboxEventId) -> AppResult<OutboxEvent> {
        self.repository
            .find_event(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("outbox event '{event_id}' does not exist")))
    }

    /// Runs one dispatch cycle over at most `batch_size` pending events.
    ///
    /// Delivery and per-event store failures are reported in the result list.
    /// Only a failure to select the batch is returned as an error.
    pub async fn run_dispatch_cycle(&self) -> AppResult<DispatchCycleReport> {
        let events = self
            .repository
            .list_dispatchable_events(self.policy.max_attempts(), self.policy.batch_size())
            .await?;

        let mut results = Vec::with_capacity(events.len());
        for event in events.into_iter().take(self.policy.batch_size()) {
            if !event.is_dispatchable(self.policy.max_attempts()) {
                warn!(
                    event_id = %event.id(),
                    status = event.status().as_str(),
                    try_count = event.try_count(),
                    "skipping outbox event that is no longer dispatchable"
                );
                continue;
            }

            let event_id = event.id();
            let outcome = self.dispatch_event(event).await;
            results.push(DispatchResult { event_id, outcome });
        }

        let report = DispatchCycleReport::new(results);
        if report.processed > 0 {
            info!(
                processed = report.processed,
                sent = report.sent_count(),
                "outbox dispatch cycle finished"
            );
        }

        Ok(report)
    }

    async fn dispatch_event(&self, mut event: OutboxEvent) -> DispatchOutcome {
        let selected_try_count = event.try_count();
        let delivery = self.sink.deliver(&event).await;
        let delivered = delivery.is_ok();

        let transition = match delivery {
            Ok(()) => event.mark_sent(Utc::now()),
            Err(delivery_error) => event
                .record_failure(
                    delivery_error.to_string(),
                    self.policy.max_attempts(),
                    Utc::now(),
                )
                .map(|_| ()),
        };

        if let Err(transition_error) = transition {
            return DispatchOutcome::Unrecorded {
                delivered,
                error: transition_error.to_string(),
            };
        }

        if let Err(save_error) = self
            .repository
            .save_delivery_state(&event, selected_try_count)
            .await
        {
            warn!(
                event_id = %event.id(),
                delivered,
                error = %save_error,
                "failed to persist outbox delivery state"
            );
            return DispatchOutcome::Unrecorded {
                delivered,
                error: save_error.to_string(),
            };
        }

        let error = event.last_error().unwrap_or_default().to_owned();
        match (delivered, event.status()) {
            (true, _) => DispatchOutcome::Sent,
            (false, OutboxStatus::Failed) => {
                warn!(
                    event_id = %event.id(),
                    try_count = event.try_count(),
                    error = %error,
                    "outbox event exhausted delivery attempts"
                );
                DispatchOutcome::Failed {
                    try_count: event.try_count(),
                    error,
                }
            }
            (false, _) => {
                warn!(
                    event_id = %event.id(),
                    try_count = event.try_count(),
                    error = %error,
                    "outbox event delivery failed, will retry"
                );
                DispatchOutcome::Retrying {
                    try_count: event.try_count(),
                    error,
                }
            }
        }
    }
}
