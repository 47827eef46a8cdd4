use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

use dialoguer::Input;
use rand::Rng;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::domain::reserved::{is_reserved, RESERVED_WORDS};

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid list url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("list host {host} is not the trusted host {trusted}")]
    UntrustedHost { host: String, trusted: String },
    #[error("failed to fetch candidate list: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("candidate list is empty")]
    EmptyList,
    #[error("local file {} not found", .0.display())]
    FileNotFound(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("cannot generate {count} distinct handles of length {length}")]
    InvalidGeneration { length: usize, count: usize },
    #[error("prompt failed: {0}")]
    Prompt(String),
}

/// Where this run's candidates come from. Exactly one per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSource {
    RemoteList(String),
    LocalFile(PathBuf),
    Generate { length: usize, count: usize },
    Interactive,
}

pub struct SourceLoader {
    http: Client,
    trusted_host: String,
}

impl SourceLoader {
    pub fn new(http: Client, trusted_host: impl Into<String>) -> Self {
        Self {
            http,
            trusted_host: trusted_host.into(),
        }
    }

    pub async fn load(&self, source: &CandidateSource) -> Result<HashSet<String>, SourceError> {
        let candidates = match source {
            CandidateSource::RemoteList(url) => self.fetch_remote(url).await?,
            CandidateSource::LocalFile(path) => read_local(path).await?,
            CandidateSource::Generate { length, count } => generate(*length, *count)?,
            CandidateSource::Interactive => {
                let (length, count) = prompt_generation().await?;
                generate(length, count)?
            }
        };
        tracing::info!(target: "source", total = candidates.len(), "candidates loaded");
        Ok(candidates)
    }

    async fn fetch_remote(&self, raw_url: &str) -> Result<HashSet<String>, SourceError> {
        let url = Url::parse(raw_url).map_err(|err| SourceError::InvalidUrl {
            url: raw_url.to_string(),
            reason: err.to_string(),
        })?;
        let host = url.host_str().unwrap_or_default();
        if host != self.trusted_host {
            return Err(SourceError::UntrustedHost {
                host: host.to_string(),
                trusted: self.trusted_host.clone(),
            });
        }

        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        if body.trim().is_empty() {
            return Err(SourceError::EmptyList);
        }
        Ok(parse_lines(&body))
    }
}

async fn read_local(path: &Path) -> Result<HashSet<String>, SourceError> {
    match tokio::fs::read_to_string(path).await {
        Ok(body) => Ok(parse_lines(&body)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(SourceError::FileNotFound(path.to_path_buf()))
        }
        Err(source) => Err(SourceError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse_lines(body: &str) -> HashSet<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// `count` distinct random `[a-z0-9]{length}` strings, none reserved.
pub fn generate(length: usize, count: usize) -> Result<HashSet<String>, SourceError> {
    let reserved_of_length = RESERVED_WORDS
        .iter()
        .filter(|word| word.len() == length && word.bytes().all(|b| CHARSET.contains(&b)))
        .count() as u128;
    let possible = u32::try_from(length)
        .ok()
        .and_then(|exp| (CHARSET.len() as u128).checked_pow(exp))
        .unwrap_or(u128::MAX)
        - reserved_of_length;
    if length == 0 || count == 0 || count as u128 > possible {
        return Err(SourceError::InvalidGeneration { length, count });
    }

    let mut rng = rand::thread_rng();
    let mut generated = HashSet::with_capacity(count);
    while generated.len() < count {
        let handle: String = (0..length)
            .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
            .collect();
        if !is_reserved(&handle) {
            generated.insert(handle);
        }
    }
    Ok(generated)
}

async fn prompt_generation() -> Result<(usize, usize), SourceError> {
    tokio::task::spawn_blocking(|| -> Result<(usize, usize), SourceError> {
        let length = Input::<usize>::new()
            .with_prompt("🔢 Enter desired username length")
            .interact_text()
            .map_err(|err| SourceError::Prompt(err.to_string()))?;
        let count = Input::<usize>::new()
            .with_prompt("🔁 How many usernames to generate")
            .default(1000)
            .interact_text()
            .map_err(|err| SourceError::Prompt(err.to_string()))?;
        Ok((length, count))
    })
    .await
    .map_err(|err| SourceError::Prompt(err.to_string()))?
}
