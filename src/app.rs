use std::{collections::BTreeSet, sync::Arc};

use anyhow::Result;
use reqwest::Client;

use crate::{
    config::AppConfig,
    domain::{Candidate, Classification},
    fragment::FragmentClient,
    infrastructure::{notifier::build_alert_sink, shutdown::ShutdownListener},
    probes::LiveProbes,
    sources::{CandidateSource, SourceLoader},
    tasks::{
        orchestrator::{Orchestrator, RunSummary},
        pipeline::CandidateChecker,
        retry::RetryPolicy,
    },
    web_presence::WebPresenceFetcher,
};

pub struct HunterApp {
    loader: SourceLoader,
    orchestrator: Orchestrator,
    shutdown: ShutdownListener,
}

impl HunterApp {
    pub fn initialize(
        config: &AppConfig,
        workers: Option<usize>,
        shutdown: ShutdownListener,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(format!("handle-hunter/{}", env!("CARGO_PKG_VERSION")))
            .cookie_store(true)
            .timeout(config.hunter.request_timeout)
            .build()?;

        let probes = Arc::new(LiveProbes::new(
            FragmentClient::new(http_client.clone(), config.endpoints.marketplace_url.clone()),
            WebPresenceFetcher::new(http_client.clone(), config.endpoints.profile_url.clone()),
        ));
        let alerts = build_alert_sink(&config.alert);
        let checker = Arc::new(CandidateChecker::new(
            probes,
            alerts,
            RetryPolicy::from_config(&config.hunter),
        ));

        let workers = workers.unwrap_or(config.hunter.workers);
        Ok(Self {
            loader: SourceLoader::new(http_client, config.endpoints.trusted_list_host.clone()),
            orchestrator: Orchestrator::new(checker, workers),
            shutdown,
        })
    }

    /// Loads candidates, then checks every valid one. A source failure aborts
    /// before anything is dispatched.
    pub async fn run(&self, source: &CandidateSource) -> Result<RunSummary> {
        let raw = self.loader.load(source).await?;
        let total = raw.len();
        let valid: Vec<Candidate> = raw.iter().filter_map(|s| Candidate::parse(s)).collect();
        let rejected = total - valid.len();
        let parsed = valid.len();
        // Handles differing only in case collapse to one lowercased candidate.
        let candidates: Vec<Candidate> = valid
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let duplicates = parsed - candidates.len();
        if rejected > 0 || duplicates > 0 {
            tracing::info!(
                target: "source",
                rejected,
                duplicates,
                "dropped invalid, reserved or duplicate handles"
            );
        }

        let summary = self.orchestrator.run(candidates, &self.shutdown).await;
        tracing::info!(
            dispatched = summary.dispatched,
            classified = summary.classified(),
            hits = summary.count(Classification::MaybeFreeOrReserved),
            exhausted = summary.exhausted,
            crashed = summary.crashed,
            skipped = summary.skipped,
            "run finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
impl HunterApp {
    fn with_parts(
        loader: SourceLoader,
        orchestrator: Orchestrator,
        shutdown: ShutdownListener,
    ) -> Self {
        Self {
            loader,
            orchestrator,
            shutdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Write, sync::atomic::Ordering, time::Duration};

    use super::*;
    use crate::{
        domain::IdentityVerdict,
        infrastructure::shutdown::Shutdown,
        sources::SourceError,
        tasks::testing::{RecordingSink, StubProbes},
    };

    fn app_with(
        probes: Arc<StubProbes>,
        sink: Arc<RecordingSink>,
        shutdown: ShutdownListener,
    ) -> HunterApp {
        let retry = RetryPolicy {
            attempts: 3,
            failure_delay: Duration::ZERO,
            empty_delay: Duration::ZERO,
        };
        let checker = Arc::new(CandidateChecker::new(probes, sink, retry));
        HunterApp::with_parts(
            SourceLoader::new(Client::new(), "raw.githubusercontent.com"),
            Orchestrator::new(checker, 4),
            shutdown,
        )
    }

    #[tokio::test]
    async fn missing_local_file_aborts_before_dispatch() {
        let probes = Arc::new(StubProbes::unavailable(IdentityVerdict::NotFound, false));
        let sink = Arc::new(RecordingSink::default());
        let (_shutdown, listener) = Shutdown::new();
        let app = app_with(probes.clone(), sink.clone(), listener);

        let err = app
            .run(&CandidateSource::LocalFile("/definitely/not/here.txt".into()))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SourceError>(),
            Some(SourceError::FileNotFound(_))
        ));
        assert_eq!(probes.total_calls(), 0);
        assert!(sink.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn only_valid_handles_are_checked() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "abcde\nTelegram\nabc\n9lives_xx\nFreeName_1").expect("write");
        let probes = Arc::new(StubProbes::unavailable(IdentityVerdict::NotFound, false));
        let sink = Arc::new(RecordingSink::default());
        let (_shutdown, listener) = Shutdown::new();
        let app = app_with(probes, sink.clone(), listener);

        let summary = app
            .run(&CandidateSource::LocalFile(file.path().to_path_buf()))
            .await
            .expect("run");

        assert_eq!(summary.dispatched, 2);
        assert_eq!(summary.count(Classification::MaybeFreeOrReserved), 2);
        let mut sent = sink.sent.lock().clone();
        sent.sort();
        assert_eq!(sent, vec!["abcde".to_string(), "freename_1".to_string()]);
    }

    #[tokio::test]
    async fn case_variants_are_checked_and_alerted_once() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "Abcde\nabcde\nABCDE").expect("write");
        let probes = Arc::new(StubProbes::unavailable(IdentityVerdict::NotFound, false));
        let sink = Arc::new(RecordingSink::default());
        let (_shutdown, listener) = Shutdown::new();
        let app = app_with(probes.clone(), sink.clone(), listener);

        let summary = app
            .run(&CandidateSource::LocalFile(file.path().to_path_buf()))
            .await
            .expect("run");

        assert_eq!(summary.dispatched, 1);
        assert_eq!(probes.auction_calls.load(Ordering::SeqCst), 1);
        assert_eq!(*sink.sent.lock(), vec!["abcde".to_string()]);
    }
}
