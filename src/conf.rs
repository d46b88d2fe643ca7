// SPDX-License-Identifier: Apache-2.0

//! Environment and configuration utilities.

use std::env;
use thiserror::Error;

/// A configuration error.
#[derive(Debug, Error)]
pub enum Error {
    /// A required credential variable is not set in the environment.
    #[error("Missing environment variable: {0}")]
    Missing(String),
}

/// Credentials for an authenticated Reddit session.
///
/// Reddit's OAuth password grant requires a registered script app's
/// client id and secret, plus the username and password of the account
/// the app acts as.
#[derive(Clone, Debug, PartialEq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Loads credentials for the given account identifier from the
    /// environment.
    ///
    /// Each account is configured through four variables scoped by the
    /// account name. For an account named `bot1`, these are
    /// `REARCHIVE_BOT1_CLIENT_ID`, `REARCHIVE_BOT1_CLIENT_SECRET`,
    /// `REARCHIVE_BOT1_USERNAME`, and `REARCHIVE_BOT1_PASSWORD`.
    pub fn for_account(account: &str) -> Result<Self, Error> {
        Self::for_account_with(account, |var| env::var(var).ok())
    }

    /// Loads credentials for the given account identifier using `lookup`
    /// to resolve variable names.
    ///
    /// This is the testable core of [`for_account`](Credentials::for_account):
    /// production code resolves against the process environment, while
    /// tests can supply a deterministic lookup table.
    pub fn for_account_with<F>(account: &str, lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |suffix: &str| {
            let var = Self::var_name(account, suffix);
            lookup(&var).ok_or(Error::Missing(var))
        };
        Ok(Self {
            client_id: get("CLIENT_ID")?,
            client_secret: get("CLIENT_SECRET")?,
            username: get("USERNAME")?,
            password: get("PASSWORD")?,
        })
    }

    fn var_name(account: &str, suffix: &str) -> String {
        format!("REARCHIVE_{}_{suffix}", account.to_uppercase())
    }
}
