use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::fetcher::Fetch;
use crate::models::{RuleSet, RunReport, RunStatus, Target, TaskOutcome, TaskRecord};
use crate::notifiers::Notifier;
use crate::trackers::{self, Decision, Extraction, Route};

/// Default wait ahead of every task, in milliseconds. Shorter delays mean
/// querying faster and may hurt the sites.
pub const DEFAULT_DELAY_MS: u64 = 5_000;

/// Drains a list of targets through fetch, extract, decide and notify, one
/// task at a time. A flat delay is enforced ahead of every fetch regardless
/// of the previous task's outcome, and no task failure stops the queue.
pub struct TaskQueue {
    fetcher: Arc<dyn Fetch>,
    notifier: Arc<dyn Notifier>,
    rules: RuleSet,
    delay: Duration,
    operator_address: Option<String>,
}

impl TaskQueue {
    pub fn new(
        fetcher: Arc<dyn Fetch>,
        notifier: Arc<dyn Notifier>,
        rules: RuleSet,
        operator_address: Option<String>,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            rules,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            operator_address,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Runs every target to completion and reports the aggregate outcome.
    pub async fn run(&self, targets: Vec<Target>) -> RunReport {
        self.run_until(targets, CancellationToken::new()).await
    }

    /// Like [`TaskQueue::run`], but stops before the next fetch once
    /// `cancel` fires. In-flight tasks are never interrupted; the report
    /// carries the outcomes recorded so far.
    pub async fn run_until(&self, targets: Vec<Target>, cancel: CancellationToken) -> RunReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let total = targets.len();
        info!("Run {} started with {} queued targets", run_id, total);

        let mut records = Vec::with_capacity(total);
        for (position, target) in targets.iter().enumerate() {
            // Rate limit ahead of every fetch; cancellation is only honored
            // here, between tasks.
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    warn!(
                        "Run {} cancelled with {} of {} targets processed",
                        run_id, position, total
                    );
                    break;
                }
                _ = tokio::time::sleep(self.delay) => {}
            }

            let outcome = self.process(target).await;
            info!(
                "[{}/{}] {} -> {:?}",
                position + 1,
                total,
                target.url(),
                outcome
            );
            records.push(TaskRecord {
                url: target.url().to_string(),
                outcome,
            });
        }

        let report = RunReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            records,
        };
        match report.status() {
            RunStatus::Success => {
                info!("Run {} is done, all {} tasks succeeded", run_id, report.records.len());
            }
            RunStatus::PartialFailure => {
                error!("Run {}: one or more tasks failed", run_id);
            }
        }
        report
    }

    async fn process(&self, target: &Target) -> TaskOutcome {
        let body = match self.fetcher.fetch(target.url()).await {
            Ok(body) => body,
            Err(e) => {
                warn!("{}", e);
                return TaskOutcome::FetchFailed;
            }
        };

        let probe = trackers::probe_for(target, &self.rules);
        let extraction = probe.extract(&body);
        match probe.decide(&extraction) {
            Decision::NoAction => TaskOutcome::Completed,
            Decision::Notify(alert) => {
                let recipient = match alert.route {
                    Route::Subscriber => {
                        info!("{}", alert.message);
                        Some(target.notify_address().to_string())
                    }
                    Route::Operator => {
                        warn!("{}", alert.message);
                        self.operator_address.clone()
                    }
                };
                let Some(recipient) = recipient else {
                    warn!("No operator address configured, dropping alert for {}", target.url());
                    return TaskOutcome::NotifyFailed;
                };

                match self.notifier.notify(&recipient, &alert.message).await {
                    Ok(()) => match extraction {
                        Extraction::RuleMissing => TaskOutcome::RuleMissing,
                        Extraction::NotFound => TaskOutcome::NotFound,
                        _ => TaskOutcome::Notified,
                    },
                    Err(e) => {
                        warn!("{}", e);
                        TaskOutcome::NotifyFailed
                    }
                }
            }
        }
    }
}
