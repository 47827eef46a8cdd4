use async_trait::async_trait;

use crate::{
    domain::{ApiEndpoint, AuctionLookup, Candidate, IdentityVerdict},
    fragment::{FragmentClient, ProbeError},
    web_presence::WebPresenceFetcher,
};

/// The four network steps of a candidate check.
#[async_trait]
pub trait CandidateProbes: Send + Sync {
    async fn resolve_endpoint(&self) -> Result<ApiEndpoint, ProbeError>;

    async fn probe_auction(
        &self,
        candidate: &Candidate,
        endpoint: &ApiEndpoint,
    ) -> Result<AuctionLookup, ProbeError>;

    async fn probe_identity(&self, candidate: &Candidate, endpoint: &ApiEndpoint)
        -> IdentityVerdict;

    async fn probe_web_presence(&self, candidate: &Candidate) -> bool;
}

pub struct LiveProbes {
    fragment: FragmentClient,
    web: WebPresenceFetcher,
}

impl LiveProbes {
    pub fn new(fragment: FragmentClient, web: WebPresenceFetcher) -> Self {
        Self { fragment, web }
    }
}

#[async_trait]
impl CandidateProbes for LiveProbes {
    async fn resolve_endpoint(&self) -> Result<ApiEndpoint, ProbeError> {
        self.fragment.resolve_endpoint().await
    }

    async fn probe_auction(
        &self,
        candidate: &Candidate,
        endpoint: &ApiEndpoint,
    ) -> Result<AuctionLookup, ProbeError> {
        self.fragment.probe_auction(candidate, endpoint).await
    }

    async fn probe_identity(
        &self,
        candidate: &Candidate,
        endpoint: &ApiEndpoint,
    ) -> IdentityVerdict {
        self.fragment.probe_identity(candidate, endpoint).await
    }

    async fn probe_web_presence(&self, candidate: &Candidate) -> bool {
        self.web.is_contactable(candidate).await
    }
}
