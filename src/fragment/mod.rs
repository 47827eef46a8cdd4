//! Marketplace (fragment.com) access: endpoint discovery plus the auction and
//! identity queries issued against the discovered endpoint.

mod client;
mod error;
pub mod markup;

pub use client::FragmentClient;
pub use error::ProbeError;
