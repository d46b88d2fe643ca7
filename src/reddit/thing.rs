// SPDX-License-Identifier: Apache-2.0

//! A "thing" in the Reddit sense.
//!
//! Historically in the Reddit API and its old source code, a "Thing" was
//! any element of the Reddit system: users, posts, comments, etc. This
//! module encapsulates that idea and provides an easy way to work with
//! listing JSON from the Reddit API.

use serde::Deserialize;
use thiserror::Error;

/// An error parsing Reddit API data.
#[derive(Debug, Error)]
pub enum Error {
    /// The response was not a well-formed listing.
    #[error("Malformed listing: {0}")]
    Json(#[from] serde_json::Error),
}

/// A post submitted to a subreddit.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Submission {
    /// The submission's unique identifier (the "t3" id, without prefix).
    pub id: String,

    /// The submission's title.
    pub title: String,

    /// The body of a self post. Empty for link posts.
    #[serde(default)]
    pub selftext: String,

    /// The submission's URL. For self posts this is the post's own
    /// permalink; for link posts it is the linked article.
    pub url: String,

    /// Creation time as a Unix timestamp.
    #[serde(default)]
    pub created_utc: f64,
}

impl Submission {
    /// Parses a text response from the Reddit API into a list of
    /// submissions, newest first.
    ///
    /// `listing_data` is the result of a call to a subreddit listing
    /// endpoint such as `/r/<subreddit>/new.json`.
    pub fn parse_listing(listing_data: &str) -> Result<Vec<Self>, Error> {
        let listing: Listing = serde_json::from_str(listing_data)?;
        Ok(listing.data.children.into_iter().map(|c| c.data).collect())
    }
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Deserialize)]
struct Child {
    data: Submission,
}
