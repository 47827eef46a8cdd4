//! Stub collaborators shared by pipeline, orchestrator and app tests.

use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::{bail, Result};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{
    domain::{
        Alert, ApiEndpoint, AuctionLookup, AuctionRecord, AuctionStatus, Candidate,
        IdentityVerdict,
    },
    fragment::ProbeError,
    infrastructure::notifier::AlertSink,
    probes::CandidateProbes,
};

pub struct StubProbes {
    pub lookup: AuctionLookup,
    pub identity: IdentityVerdict,
    pub web_presence: bool,
    pub failing_attempts: u32,
    pub panic_on: Option<String>,
    pub endpoint_calls: AtomicU32,
    pub auction_calls: AtomicU32,
    pub identity_calls: AtomicU32,
    pub web_calls: AtomicU32,
}

impl StubProbes {
    /// Every candidate looks like `@<name>`, unpriced and unavailable.
    pub fn unavailable(identity: IdentityVerdict, web_presence: bool) -> Self {
        Self::with_lookup(
            AuctionLookup::Record(record("", "Unknown", AuctionStatus::Unavailable)),
            identity,
            web_presence,
        )
    }

    pub fn with_lookup(
        lookup: AuctionLookup,
        identity: IdentityVerdict,
        web_presence: bool,
    ) -> Self {
        Self {
            lookup,
            identity,
            web_presence,
            failing_attempts: 0,
            panic_on: None,
            endpoint_calls: AtomicU32::new(0),
            auction_calls: AtomicU32::new(0),
            identity_calls: AtomicU32::new(0),
            web_calls: AtomicU32::new(0),
        }
    }

    pub fn total_calls(&self) -> u32 {
        self.endpoint_calls.load(Ordering::SeqCst)
            + self.auction_calls.load(Ordering::SeqCst)
            + self.identity_calls.load(Ordering::SeqCst)
            + self.web_calls.load(Ordering::SeqCst)
    }
}

pub fn record(tag: &str, price: &str, status: AuctionStatus) -> AuctionRecord {
    AuctionRecord {
        tag: tag.to_string(),
        price: price.to_string(),
        status,
    }
}

#[async_trait]
impl CandidateProbes for StubProbes {
    async fn resolve_endpoint(&self) -> Result<ApiEndpoint, ProbeError> {
        self.endpoint_calls.fetch_add(1, Ordering::SeqCst);
        Ok(ApiEndpoint::new("http://stub/api"))
    }

    async fn probe_auction(
        &self,
        candidate: &Candidate,
        _endpoint: &ApiEndpoint,
    ) -> Result<AuctionLookup, ProbeError> {
        if self.panic_on.as_deref() == Some(candidate.as_str()) {
            panic!("stub exploded on {candidate}");
        }
        let n = self.auction_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n <= self.failing_attempts {
            return Err(ProbeError::Decode(format!("stub failure {n}")));
        }
        // An empty tag in the template means "echo the candidate".
        Ok(match &self.lookup {
            AuctionLookup::Record(r) if r.tag.is_empty() => AuctionLookup::Record(AuctionRecord {
                tag: format!("@{}", candidate.as_str()),
                ..r.clone()
            }),
            other => other.clone(),
        })
    }

    async fn probe_identity(
        &self,
        _candidate: &Candidate,
        _endpoint: &ApiEndpoint,
    ) -> IdentityVerdict {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        self.identity
    }

    async fn probe_web_presence(&self, _candidate: &Candidate) -> bool {
        self.web_calls.fetch_add(1, Ordering::SeqCst);
        self.web_presence
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub sent: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait]
impl AlertSink for RecordingSink {
    async fn send(&self, alert: &Alert) -> Result<()> {
        self.sent.lock().push(alert.username.clone());
        if self.fail {
            bail!("sink unavailable");
        }
        Ok(())
    }
}
