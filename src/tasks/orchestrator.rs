use std::{any::Any, collections::HashMap, panic::AssertUnwindSafe, sync::Arc, thread};

use futures::FutureExt;
use tokio::{sync::Semaphore, task::JoinError};

use crate::{
    domain::{Candidate, Classification},
    infrastructure::shutdown::ShutdownListener,
    tasks::pipeline::{CandidateChecker, CheckOutcome},
};

#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    pub dispatched: usize,
    /// Not dispatched because the run was interrupted.
    pub skipped: usize,
    pub exhausted: usize,
    pub crashed: usize,
    pub verdicts: HashMap<Classification, usize>,
}

impl RunSummary {
    pub fn classified(&self) -> usize {
        self.verdicts.values().sum()
    }

    pub fn count(&self, classification: Classification) -> usize {
        self.verdicts.get(&classification).copied().unwrap_or(0)
    }

    fn record(&mut self, outcome: CheckOutcome) {
        match outcome {
            CheckOutcome::Classified(classification) => {
                *self.verdicts.entry(classification).or_default() += 1;
            }
            CheckOutcome::Exhausted => self.exhausted += 1,
        }
    }
}

/// Runs candidate checks on a bounded pool of tokio tasks. A check that
/// panics is logged and counted; the rest of the run is unaffected.
pub struct Orchestrator {
    checker: Arc<CandidateChecker>,
    workers: usize,
}

impl Orchestrator {
    pub fn new(checker: Arc<CandidateChecker>, workers: usize) -> Self {
        Self {
            checker,
            workers: workers.max(1),
        }
    }

    pub async fn run(
        &self,
        candidates: Vec<Candidate>,
        shutdown: &ShutdownListener,
    ) -> RunSummary {
        let permits = Arc::new(Semaphore::new(self.workers));
        let mut handles = Vec::with_capacity(candidates.len());
        let mut summary = RunSummary::default();

        tracing::info!(
            target: "orchestrator",
            candidates = candidates.len(),
            workers = self.workers,
            "dispatching candidates"
        );

        for candidate in candidates {
            if shutdown.is_triggered() {
                summary.skipped += 1;
                continue;
            }
            let Ok(permit) = permits.clone().acquire_owned().await else {
                summary.skipped += 1;
                continue;
            };

            let checker = self.checker.clone();
            let task_candidate = candidate.clone();
            let handle = tokio::spawn(async move {
                let _permit = permit;
                AssertUnwindSafe(checker.check(&task_candidate))
                    .catch_unwind()
                    .await
            });
            handles.push((candidate, handle));
            summary.dispatched += 1;
        }

        // Tasks already run concurrently; awaiting in dispatch order only
        // decides when each result is tallied.
        for (candidate, handle) in handles {
            let joined = handle.await;
            settle(&mut summary, &candidate, joined);
        }

        summary
    }
}

fn settle(
    summary: &mut RunSummary,
    candidate: &Candidate,
    joined: Result<thread::Result<CheckOutcome>, JoinError>,
) {
    match joined {
        Ok(Ok(outcome)) => summary.record(outcome),
        Ok(Err(panic)) => {
            tracing::error!(
                target: "orchestrator",
                candidate = %candidate,
                panic = %panic_message(panic.as_ref()),
                "candidate check crashed"
            );
            summary.crashed += 1;
        }
        Err(err) => {
            tracing::error!(
                target: "orchestrator",
                candidate = %candidate,
                error = %err,
                "candidate task failed"
            );
            summary.crashed += 1;
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
