// SPDX-License-Identifier: Apache-2.0

//! rearchive is a command-line bot that reads submissions from one
//! subreddit and republishes them, with an attribution header naming the
//! original post's URL, into a fixed archive subreddit. It can walk a
//! subreddit's newest, top-ranked, or hottest submissions, or follow the
//! subreddit live, republishing submissions as they are posted.
//!
//! # Examples
//!
//! Republish a subreddit's 100 newest submissions:
//!
//! ```bash
//! rearchive
//! ```
//!
//! Republish the 25 top-ranked submissions of all time:
//!
//! ```bash
//! rearchive --mode top --limit 25
//! ```
//!
//! Follow the subreddit and republish submissions as they appear,
//! indefinitely:
//!
//! ```bash
//! rearchive --mode stream
//! ```
//!
//! Pull from a different subreddit with a different account:
//!
//! ```bash
//! rearchive --subreddit history --account bot2
//! ```
//!
//! # Credentials
//!
//! Publishing requires an authenticated Reddit session. Credentials for
//! the account given by `--account` are read from the environment; for
//! an account named `bot1`, set `REARCHIVE_BOT1_CLIENT_ID`,
//! `REARCHIVE_BOT1_CLIENT_SECRET`, `REARCHIVE_BOT1_USERNAME`, and
//! `REARCHIVE_BOT1_PASSWORD` to the values of a registered Reddit
//! script app and the account it acts as.

pub mod cli;
pub mod conf;
pub mod http;
pub mod reddit;

#[cfg(test)]
mod test_utils;
