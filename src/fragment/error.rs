use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("api endpoint unresolvable: {0}")]
    EndpointUnresolvable(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("undecodable response: {0}")]
    Decode(String),
}
