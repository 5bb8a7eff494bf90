use jobboard_domain::OutboxEventId;

/// Result of handling one event in a dispatch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Delivered and marked sent.
    Sent,
    /// Delivery failed; the event stays pending for a later cycle.
    Retrying {
        /// Failed attempts so far.
        try_count: u32,
        /// Delivery failure reason.
        error: String,
    },
    /// Delivery failed and the attempt budget is exhausted.
    Failed {
        /// Failed attempts so far.
        try_count: u32,
        /// Delivery failure reason.
        error: String,
    },
    /// The transition could not be stored; the event is left as it was.
    Unrecorded {
        /// Whether the sink accepted the event before the store failed.
        delivered: bool,
        /// Store failure reason.
        error: String,
    },
}

impl DispatchOutcome {
    /// Returns whether the event ended up sent.
    #[must_use]
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Sent => None,
            Self::Retrying { error, .. }
            | Self::Failed { error, .. }
            | Self::Unrecorded { error, .. } => Some(error.as_str()),
        }
    }
}

/// Outcome for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    /// Dispatched event.
    pub event_id: OutboxEventId,
    /// What happened to it.
    pub outcome: DispatchOutcome,
}

/// Summary of one dispatch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchCycleReport {
    /// Number of events handled.
    pub processed: usize,
    /// Per-event outcomes in dispatch order.
    pub results: Vec<DispatchResult>,
}

impl DispatchCycleReport {
    pub(super) fn new(results: Vec<DispatchResult>) -> Self {
        Self {
            processed: results.len(),
            results,
        }
    }

    /// Returns how many events were delivered in this cycle.
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.results
            .iter()
            .filter(|result| result.outcome.is_sent())
            .count()
    }
}
