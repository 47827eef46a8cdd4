use crate::domain::{AuctionStatus, Classification, IdentityVerdict};

/// Whether the profile page must be consulted before classifying.
pub fn needs_web_confirmation(status: AuctionStatus, identity: IdentityVerdict) -> bool {
    status == AuctionStatus::Unavailable && identity == IdentityVerdict::NotFound
}

/// Combines the probe signals into a verdict. `web_presence` is `None` when
/// the profile page was not consulted.
pub fn classify(
    status: AuctionStatus,
    identity: IdentityVerdict,
    web_presence: Option<bool>,
) -> Classification {
    match (status, identity, web_presence) {
        (AuctionStatus::Unavailable, IdentityVerdict::NotFound, Some(false)) => {
            Classification::MaybeFreeOrReserved
        }
        (AuctionStatus::Unavailable, IdentityVerdict::NotFound, Some(true)) => {
            Classification::PrivacyRestricted
        }
        (_, IdentityVerdict::PremiumSubscriber, _) => Classification::Premium,
        (_, IdentityVerdict::Channel, _) => Classification::Channel,
        (_, IdentityVerdict::BadRequest, _) => Classification::BadRequest,
        _ => Classification::NoSignal,
    }
}
