// SPDX-License-Identifier: Apache-2.0

use crate::http::{HTTPError, HTTPResult};
use crate::reddit::service::Service;
use reqwest::StatusCode;
use std::cell::RefCell;
use std::fs;

pub fn load_data(file: &str) -> String {
    fs::read_to_string(format!("tests/data/{file}.json")).expect("could not find test data")
}

/// A [`Service`] that reads listings from fixture files instead of the
/// network and records every call made to it.
pub struct TestService {
    suffix: &'static str,
    fail_listings: bool,
    fail_submissions: bool,
    listings: RefCell<Vec<(String, u32)>>,
    submissions: RefCell<Vec<(String, String, String)>>,
}

impl TestService {
    /// Returns a service whose listings are read from
    /// `tests/data/<sort>_<suffix>.json`.
    pub fn new(suffix: &'static str) -> Self {
        Self {
            suffix,
            fail_listings: false,
            fail_submissions: false,
            listings: RefCell::new(vec![]),
            submissions: RefCell::new(vec![]),
        }
    }

    /// Returns a service whose listing requests always fail.
    pub fn failing() -> Self {
        Self {
            fail_listings: true,
            ..Self::new("askhistorians")
        }
    }

    /// Returns a service that serves listings but rejects every
    /// submission.
    pub fn rejecting(suffix: &'static str) -> Self {
        Self {
            fail_submissions: true,
            ..Self::new(suffix)
        }
    }

    /// The listing requests made so far, as `(sort, limit)` pairs.
    pub fn listings(&self) -> Vec<(String, u32)> {
        self.listings.borrow().clone()
    }

    /// The submissions published so far, as `(subreddit, title, selftext)`
    /// triples.
    pub fn submissions(&self) -> Vec<(String, String, String)> {
        self.submissions.borrow().clone()
    }
}

impl Service for TestService {
    fn listing(&self, _subreddit: &str, sort: &str, limit: u32) -> HTTPResult<String> {
        if self.fail_listings {
            return Err(HTTPError::Http(StatusCode::NOT_FOUND));
        }
        self.listings.borrow_mut().push((sort.to_string(), limit));
        Ok(load_data(&format!("{sort}_{}", self.suffix)))
    }

    fn submit(&self, subreddit: &str, title: &str, selftext: &str) -> HTTPResult<String> {
        if self.fail_submissions {
            return Err(HTTPError::Http(StatusCode::FORBIDDEN));
        }
        self.submissions.borrow_mut().push((
            subreddit.to_string(),
            title.to_string(),
            selftext.to_string(),
        ));
        Ok(String::from("{}"))
    }
}
