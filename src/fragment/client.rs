use reqwest::Client;
use serde_json::Value;

use crate::domain::{ApiEndpoint, AuctionLookup, Candidate, IdentityVerdict};

use super::{
    error::ProbeError,
    markup::{extract_api_path, identity_verdict, parse_auction_fragment},
};

#[derive(Clone)]
pub struct FragmentClient {
    http: Client,
    origin: String,
}

impl FragmentClient {
    pub fn new(http: Client, origin: impl Into<String>) -> Self {
        Self {
            http,
            origin: origin.into(),
        }
    }

    /// Scrapes the landing page for the current API URL. Not cached: the
    /// hash embedded in the path rotates.
    pub async fn resolve_endpoint(&self) -> Result<ApiEndpoint, ProbeError> {
        let unresolvable = |err: reqwest::Error| ProbeError::EndpointUnresolvable(err.to_string());

        let body = self
            .http
            .get(&self.origin)
            .send()
            .await
            .map_err(unresolvable)?
            .error_for_status()
            .map_err(unresolvable)?
            .text()
            .await
            .map_err(unresolvable)?;

        let path = extract_api_path(&body).ok_or_else(|| {
            ProbeError::EndpointUnresolvable("landing page exposes no apiUrl".to_string())
        })?;
        Ok(ApiEndpoint::new(format!("{}{}", self.origin, path)))
    }

    pub async fn probe_auction(
        &self,
        candidate: &Candidate,
        endpoint: &ApiEndpoint,
    ) -> Result<AuctionLookup, ProbeError> {
        let params = [
            ("type", "usernames"),
            ("query", candidate.as_str()),
            ("method", "searchAuctions"),
        ];
        let body: Value = self
            .http
            .post(endpoint.as_str())
            .form(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|err| ProbeError::Decode(err.to_string()))?;

        // Anything but a non-blank string under `html` counts as empty.
        Ok(match body.get("html").and_then(Value::as_str) {
            Some(html) if !html.trim().is_empty() => parse_auction_fragment(html, candidate),
            _ => AuctionLookup::Empty,
        })
    }

    /// Never fails: transport and decode problems read as `Unknown`.
    pub async fn probe_identity(
        &self,
        candidate: &Candidate,
        endpoint: &ApiEndpoint,
    ) -> IdentityVerdict {
        match self.search_gift_recipient(candidate, endpoint).await {
            Ok(error) => identity_verdict(error.as_deref()),
            Err(err) => {
                tracing::debug!(
                    target: "probe",
                    candidate = %candidate,
                    error = %err,
                    "identity lookup failed"
                );
                IdentityVerdict::Unknown
            }
        }
    }

    async fn search_gift_recipient(
        &self,
        candidate: &Candidate,
        endpoint: &ApiEndpoint,
    ) -> Result<Option<String>, ProbeError> {
        let params = [
            ("query", candidate.as_str()),
            ("months", "3"),
            ("method", "searchPremiumGiftRecipient"),
        ];
        let body: Value = self
            .http
            .post(endpoint.as_str())
            .form(&params)
            .send()
            .await?
            .json()
            .await
            .map_err(|err| ProbeError::Decode(err.to_string()))?;

        Ok(body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string))
    }
}
