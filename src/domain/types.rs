use std::fmt;

use super::candidate::Candidate;

/// Absolute API URL scraped from the marketplace landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint(String);

impl ApiEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionStatus {
    Available,
    Unavailable,
    Other,
}

impl AuctionStatus {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Available" => Self::Available,
            "Unavailable" => Self::Unavailable,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionRecord {
    pub tag: String,
    pub price: String,
    pub status: AuctionStatus,
}

impl AuctionRecord {
    /// The tag carries a one-character prefix (`@`) before the handle.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        let mut chars = self.tag.chars();
        chars.next().is_some() && chars.as_str() == candidate.as_str()
    }

    /// A purely numeric price means the handle is listed for sale.
    pub fn is_priced(&self) -> bool {
        !self.price.is_empty() && self.price.chars().all(|c| c.is_ascii_digit())
    }
}

/// What one auction query produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuctionLookup {
    Record(AuctionRecord),
    /// No fragment, or fewer than three value cells. Worth retrying.
    Empty,
    /// The first cell named some other handle. Definitive.
    Mismatch { tag: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityVerdict {
    NotFound,
    PremiumSubscriber,
    Channel,
    BadRequest,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    MaybeFreeOrReserved,
    PrivacyRestricted,
    Premium,
    Channel,
    BadRequest,
    NoSignal,
}

impl Classification {
    pub fn is_alert(self) -> bool {
        matches!(self, Self::MaybeFreeOrReserved)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MaybeFreeOrReserved => "maybe free or reserved",
            Self::PrivacyRestricted => "privacy-restricted user",
            Self::Premium => "premium user",
            Self::Channel => "channel",
            Self::BadRequest => "bad request",
            Self::NoSignal => "no signal",
        }
    }
}

/// Notification produced for a positive hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub username: String,
}

impl Alert {
    pub fn for_candidate(candidate: &Candidate) -> Self {
        Self {
            username: candidate.as_str().to_string(),
        }
    }

    pub fn text(&self) -> String {
        format!("🔥 Maybe Free or Reserved: @{}", self.username)
    }
}
