use std::path::PathBuf;

use clap::Parser;

use crate::sources::CandidateSource;

#[derive(Debug, Parser)]
#[command(
    name = "handle-hunter",
    version,
    about = "Finds Telegram usernames that look free or reserved"
)]
pub struct Cli {
    /// Newline-delimited username list (raw.githubusercontent.com only)
    #[arg(long, value_name = "URL", conflicts_with = "local_file")]
    pub file: Option<String>,

    /// Local newline-delimited username list
    #[arg(long, value_name = "PATH")]
    pub local_file: Option<PathBuf>,

    /// Debug-level logging
    #[arg(long)]
    pub verbose: bool,

    /// Concurrent checks (defaults to HUNTER_WORKERS or the CPU count)
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Length of generated usernames; skips the interactive prompt
    #[arg(long, value_name = "N", requires = "count", conflicts_with_all = ["file", "local_file"])]
    pub length: Option<usize>,

    /// Number of usernames to generate
    #[arg(long, value_name = "N", requires = "length")]
    pub count: Option<usize>,
}

impl Cli {
    pub fn source(&self) -> CandidateSource {
        if let Some(url) = &self.file {
            return CandidateSource::RemoteList(url.clone());
        }
        if let Some(path) = &self.local_file {
            return CandidateSource::LocalFile(path.clone());
        }
        match (self.length, self.count) {
            (Some(length), Some(count)) => CandidateSource::Generate { length, count },
            _ => CandidateSource::Interactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn selects_exactly_one_source() {
        let cli = Cli::parse_from(["handle-hunter", "--local-file", "names.txt", "--verbose"]);
        assert!(cli.verbose);
        assert_eq!(cli.source(), CandidateSource::LocalFile("names.txt".into()));

        let cli = Cli::parse_from(["handle-hunter", "--length", "5", "--count", "10"]);
        assert_eq!(cli.source(), CandidateSource::Generate { length: 5, count: 10 });

        let cli = Cli::parse_from(["handle-hunter"]);
        assert_eq!(cli.source(), CandidateSource::Interactive);
    }

    #[test]
    fn rejects_conflicting_sources() {
        assert!(Cli::try_parse_from([
            "handle-hunter",
            "--file",
            "https://raw.githubusercontent.com/a/b/list.txt",
            "--local-file",
            "names.txt",
        ])
        .is_err());
        assert!(Cli::try_parse_from(["handle-hunter", "--length", "5"]).is_err());
    }
}
