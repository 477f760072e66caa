use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Terminal state of one processed target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Fetched and evaluated; no notification was warranted.
    Completed,
    /// A notification was dispatched to the subscriber.
    Notified,
    /// The HTTP fetch failed or returned a non-200 status.
    FetchFailed,
    /// No extraction rule is configured for the target's host.
    RuleMissing,
    /// The rule's pattern produced no usable value on the page.
    NotFound,
    /// Mail dispatch failed, or no mail configuration is present.
    NotifyFailed,
}

impl TaskOutcome {
    /// Outcomes that count as success for the aggregate run status.
    pub fn is_success(self) -> bool {
        matches!(self, TaskOutcome::Completed | TaskOutcome::Notified)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub url: String,
    pub outcome: TaskOutcome,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    PartialFailure,
}

/// Aggregate result of one queue drain. Records appear in enqueue order,
/// one per processed target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub records: Vec<TaskRecord>,
}

impl RunReport {
    pub fn status(&self) -> RunStatus {
        if self.records.iter().all(|record| record.outcome.is_success()) {
            RunStatus::Success
        } else {
            RunStatus::PartialFailure
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == RunStatus::Success
    }

    pub fn failed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| !record.outcome.is_success())
            .count()
    }
}
