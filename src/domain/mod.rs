pub mod candidate;
pub mod reserved;
pub mod types;

pub use candidate::Candidate;
pub use types::{
    Alert, ApiEndpoint, AuctionLookup, AuctionRecord, AuctionStatus, Classification,
    IdentityVerdict,
};
