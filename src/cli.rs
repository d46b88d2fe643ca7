// SPDX-License-Identifier: Apache-2.0

//! Drives the command-line program.

pub use crate::reddit::client::Error;
use crate::reddit::service::{RedditService, Service};
use crate::reddit::{Mode, Session};
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use std::process;

/// The subreddit that republished submissions are written to.
pub const ARCHIVE_SUBREDDIT: &str = "AskHistoriansArchive";

// TODO: We should probably move this back to main and have Runner.run()
//       return a Result, but we can work on that later.
pub fn die(error_code: i32, message: &str) {
    eprintln!("{}", message);
    process::exit(error_code);
}

/// Program configuration.
#[derive(Debug, Parser)]
#[command(version)]
#[command(about = "Republishes a subreddit's submissions into an archive subreddit", long_about = None)]
pub struct Config {
    #[command(flatten)]
    verbosity: Verbosity,

    /// Mode of submission iteration
    #[arg(long, value_enum, default_value = "new", ignore_case = true)]
    mode: Mode,

    /// Limit the number of submissions to process
    #[arg(long)]
    limit: Option<u32>,

    /// Subreddit to process submissions from
    #[arg(long, default_value = "askhistorians")]
    subreddit: String,

    /// Reddit account to use
    #[arg(long, default_value = "bot1")]
    account: String,
}

impl Config {
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

/// Synthesizes the body of a republished post.
///
/// The body is the original body, verbatim and in full, preceded by an
/// attribution header naming the source URL.
pub fn archive_body(url: &str, body: &str) -> String {
    format!("{ARCHIVE_SUBREDDIT} Bot post\n\nOriginal post URL: {url}\n\n---\n\n{body}")
}

/// Opens a session for the configured account and republishes
/// submissions until the configured iteration is exhausted.
///
/// In stream mode with no limit, that is never; the loop runs until a
/// retrieval or submission fails, or the process is killed.
pub fn run(config: Config) -> Result<(), Error> {
    Runner::new(config)?.run()
}

/// Runs the command-line program.
pub struct Runner<T: Service> {
    config: Config,
    session: Session<T>,
}

impl Runner<RedditService> {
    /// Creates a new program runner using the given `config`.
    ///
    /// Returns an error if credentials for the configured account cannot
    /// be resolved or the session cannot be authenticated.
    pub fn new(config: Config) -> Result<Self, Error> {
        let session = Session::connect(&config.account)?;
        Ok(Self::with_session(config, session))
    }
}

impl<T: Service> Runner<T> {
    /// Creates a program runner that republishes through the given
    /// session.
    pub fn with_session(config: Config, session: Session<T>) -> Self {
        Self { config, session }
    }

    /// Republishes each submission drawn from the source subreddit into
    /// the archive subreddit, one network write per submission.
    pub fn run(&self) -> Result<(), Error> {
        let source = self.session.subreddit(&self.config.subreddit);
        let archive = self.session.subreddit(ARCHIVE_SUBREDDIT);
        for submission in source.submissions(self.config.mode, self.config.limit)? {
            let submission = submission?;
            println!(
                "Processing submission: {} (ID: {})",
                submission.title, submission.id
            );
            println!("Title: {}", submission.title);
            println!("Body: {}", submission.selftext);
            let newbody = archive_body(&submission.url, &submission.selftext);
            archive.submit(&submission.title, &newbody)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    mod config {
        use crate::cli::Config;
        use crate::reddit::Mode;
        use clap::Parser;

        #[test]
        fn it_defaults_to_new_mode_and_the_askhistorians_subreddit() {
            let config = Config::parse_from(["rearchive"]);
            assert_eq!(config.mode, Mode::New);
            assert_eq!(config.limit, None);
            assert_eq!(config.subreddit, "askhistorians");
            assert_eq!(config.account, "bot1");
        }

        #[test]
        fn it_parses_all_options() {
            let config = Config::parse_from([
                "rearchive",
                "--mode",
                "top",
                "--limit",
                "25",
                "--subreddit",
                "history",
                "--account",
                "bot2",
            ]);
            assert_eq!(config.mode, Mode::Top);
            assert_eq!(config.limit, Some(25));
            assert_eq!(config.subreddit, "history");
            assert_eq!(config.account, "bot2");
        }

        #[test]
        fn it_parses_modes_case_insensitively() {
            let config = Config::parse_from(["rearchive", "--mode", "STREAM"]);
            assert_eq!(config.mode, Mode::Stream);
        }

        #[test]
        fn it_rejects_unknown_modes() {
            let result = Config::try_parse_from(["rearchive", "--mode", "rising"]);
            assert!(result.is_err());
        }
    }

    mod body_synthesis {
        use crate::cli::archive_body;
        use indoc::indoc;
        use pretty_assertions::assert_eq;

        #[test]
        fn it_wraps_the_body_with_an_attribution_header() {
            let body = archive_body("U", "B");
            assert_eq!(
                body,
                "AskHistoriansArchive Bot post\n\nOriginal post URL: U\n\n---\n\nB"
            );
        }

        #[test]
        fn it_preserves_a_multiline_body_verbatim() {
            let original = "First paragraph.\n\nSecond paragraph.";
            let body = archive_body("https://example.com/post", original);
            let expected = indoc! {"
                AskHistoriansArchive Bot post

                Original post URL: https://example.com/post

                ---

                First paragraph.

                Second paragraph."};
            assert_eq!(body, expected);
        }

        #[test]
        fn it_wraps_an_empty_body() {
            let body = archive_body("U", "");
            assert_eq!(
                body,
                "AskHistoriansArchive Bot post\n\nOriginal post URL: U\n\n---\n\n"
            );
        }
    }

    mod runner {
        use crate::cli::{ARCHIVE_SUBREDDIT, Config, Runner, archive_body};
        use crate::reddit::Session;
        use crate::test_utils::TestService;
        use clap::Parser;
        use pretty_assertions::assert_eq;

        fn runner(args: &[&str]) -> Runner<TestService> {
            let args = [&["rearchive"][..], args].concat();
            let config = Config::parse_from(args);
            let session = Session::with_service(TestService::new("askhistorians"));
            Runner::with_session(config, session)
        }

        #[test]
        fn it_republishes_each_submission_into_the_archive() {
            let runner = runner(&["--mode", "new", "--limit", "5"]);
            runner.run().unwrap();

            let submitted = runner.session.service.submissions();
            assert_eq!(submitted.len(), 5);
            for (subreddit, _, _) in &submitted {
                assert_eq!(subreddit, ARCHIVE_SUBREDDIT);
            }
        }

        #[test]
        fn it_copies_the_title_and_transforms_the_body() {
            let runner = runner(&["--mode", "hot"]);
            runner.run().unwrap();

            let source = runner.session.subreddit("askhistorians");
            let originals = source.hot(100).unwrap();
            let submitted = runner.session.service.submissions();
            // The listing request above is also recorded, but submissions
            // are tracked separately.
            assert_eq!(submitted.len(), originals.len());
            for (original, (_, title, selftext)) in originals.iter().zip(&submitted) {
                assert_eq!(*title, original.title);
                assert_eq!(*selftext, archive_body(&original.url, &original.selftext));
            }
        }

        #[test]
        fn it_propagates_submission_failures() {
            let config = Config::parse_from(["rearchive"]);
            let session = Session::with_service(TestService::rejecting("askhistorians"));
            let runner = Runner::with_session(config, session);
            assert!(runner.run().is_err());
        }
    }
}
