use std::sync::Arc;

use crate::{
    domain::{Alert, AuctionLookup, Candidate, Classification},
    fragment::ProbeError,
    infrastructure::notifier::AlertSink,
    probes::CandidateProbes,
    tasks::{
        classifier::{classify, needs_web_confirmation},
        retry::{retry, RetryPolicy},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Classified(Classification),
    /// Auction lookup never produced a usable response.
    Exhausted,
}

/// Runs one candidate through endpoint discovery, the auction lookup (with
/// retry), the identity lookup and, when needed, profile confirmation.
pub struct CandidateChecker {
    probes: Arc<dyn CandidateProbes>,
    alerts: Arc<dyn AlertSink>,
    retry: RetryPolicy,
}

impl CandidateChecker {
    pub fn new(
        probes: Arc<dyn CandidateProbes>,
        alerts: Arc<dyn AlertSink>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            probes,
            alerts,
            retry,
        }
    }

    pub async fn check(&self, candidate: &Candidate) -> CheckOutcome {
        let probes = self.probes.as_ref();
        let fetched = retry(&self.retry, candidate.as_str(), |_| async move {
            let endpoint = probes.resolve_endpoint().await?;
            match probes.probe_auction(candidate, &endpoint).await? {
                AuctionLookup::Empty => Ok::<_, ProbeError>(None),
                lookup => Ok(Some((endpoint, lookup))),
            }
        })
        .await;

        let (endpoint, lookup) = match fetched {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(
                    target: "pipeline",
                    candidate = %candidate,
                    error = %err,
                    "auction lookup gave up"
                );
                return CheckOutcome::Exhausted;
            }
        };

        let record = match lookup {
            AuctionLookup::Record(record) => record,
            AuctionLookup::Mismatch { tag } => {
                tracing::debug!(
                    target: "pipeline",
                    candidate = %candidate,
                    tag = %tag,
                    "auction tag mismatch"
                );
                return CheckOutcome::Classified(Classification::NoSignal);
            }
            AuctionLookup::Empty => return CheckOutcome::Classified(Classification::NoSignal),
        };

        if record.is_priced() {
            tracing::debug!(
                target: "pipeline",
                candidate = %candidate,
                price = %record.price,
                "listed with a price"
            );
            return CheckOutcome::Classified(Classification::NoSignal);
        }

        let identity = probes.probe_identity(candidate, &endpoint).await;
        let web_presence = if needs_web_confirmation(record.status, identity) {
            Some(probes.probe_web_presence(candidate).await)
        } else {
            None
        };

        let classification = classify(record.status, identity, web_presence);
        self.report(candidate, &record.tag, classification).await;
        CheckOutcome::Classified(classification)
    }

    async fn report(&self, candidate: &Candidate, tag: &str, classification: Classification) {
        match classification {
            Classification::MaybeFreeOrReserved | Classification::PrivacyRestricted => {
                tracing::warn!(
                    target: "pipeline",
                    candidate = %candidate,
                    tag = %tag,
                    "{}",
                    classification.label()
                );
            }
            Classification::Premium | Classification::Channel => {
                tracing::info!(
                    target: "pipeline",
                    candidate = %candidate,
                    tag = %tag,
                    "{}",
                    classification.label()
                );
            }
            Classification::BadRequest => {
                tracing::warn!(
                    target: "pipeline",
                    candidate = %candidate,
                    tag = %tag,
                    "{}",
                    classification.label()
                );
            }
            Classification::NoSignal => {
                tracing::debug!(
                    target: "pipeline",
                    candidate = %candidate,
                    tag = %tag,
                    "{}",
                    classification.label()
                );
            }
        }

        if classification.is_alert() {
            let alert = Alert::for_candidate(candidate);
            if let Err(err) = self.alerts.send(&alert).await {
                tracing::warn!(
                    target: "alert",
                    candidate = %candidate,
                    error = %err,
                    "alert delivery failed"
                );
            }
        }
    }
}
