// SPDX-License-Identifier: Apache-2.0

//! HTTPS connector for the Reddit API.
//!
//! Service structures in this module provide a low-level way to interact
//! with the Reddit API over HTTPS, essentially a specialized HTTPS client
//! specifically for Reddit. Listing reads go to the public `.json`
//! endpoints; submissions require an OAuth token and go through
//! `oauth.reddit.com`.

use crate::conf::Credentials;
use crate::http::{HTTPError, HTTPResult};
use log::debug;
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header;
use serde::Deserialize;

const TOKEN_URI: &str = "https://www.reddit.com/api/v1/access_token";
const SUBMIT_URI: &str = "https://oauth.reddit.com/api/submit";

/// A service for reading submissions from and publishing submissions to
/// Reddit.
///
/// Using this trait, clients can implement different ways of connecting
/// to the Reddit API, such as an actual connector for production code,
/// and a mocked connector for testing purposes.
pub trait Service {
    /// Retrieves a subreddit listing sorted by `sort` ("new", "top", or
    /// "hot"), limited to `limit` entries, and returns the raw JSON body.
    fn listing(&self, subreddit: &str, sort: &str, limit: u32) -> HTTPResult<String>;

    /// Publishes a new self post with the given title and body to the
    /// named subreddit.
    fn submit(&self, subreddit: &str, title: &str, selftext: &str) -> HTTPResult<String>;
}

/// A service that contacts the Reddit API directly.
pub struct RedditService {
    client: Client,
    token: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl RedditService {
    /// Creates a new Reddit service, authenticating with the given
    /// credentials via the OAuth password grant.
    ///
    /// `user_agent` is a descriptive label sent with every request, as
    /// required by Reddit's API rules.
    pub fn new(credentials: &Credentials, user_agent: &str) -> HTTPResult<Self> {
        let user_agent = format!(
            "{user_agent} ({} v{})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
        let client = ClientBuilder::new()
            .user_agent(user_agent)
            .build()
            .map_err(HTTPError::Request)?;
        let token = Self::authenticate(&client, credentials)?;
        Ok(Self { client, token })
    }

    fn authenticate(client: &Client, credentials: &Credentials) -> HTTPResult<String> {
        debug!("requesting OAuth token for {}", credentials.username);
        let params = [
            ("grant_type", "password"),
            ("username", &credentials.username),
            ("password", &credentials.password),
        ];
        let resp = client
            .post(TOKEN_URI)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&params)
            .send()
            .map_err(HTTPError::Request)?;
        if !resp.status().is_success() {
            return Err(HTTPError::Http(resp.status()));
        }
        let token: TokenResponse = resp.json().map_err(HTTPError::Body)?;
        Ok(token.access_token)
    }

    fn query_string(&self, sort: &str, limit: u32) -> String {
        match sort {
            // Top listings default to the all-time window.
            "top" => format!("?limit={limit}&t=all"),
            _ => format!("?limit={limit}"),
        }
    }

    fn uri(&self, subreddit: &str, sort: &str, limit: u32) -> String {
        let qs = self.query_string(sort, limit);
        format!("https://www.reddit.com/r/{subreddit}/{sort}.json{qs}")
    }
}

impl Service for RedditService {
    fn listing(&self, subreddit: &str, sort: &str, limit: u32) -> HTTPResult<String> {
        let uri = self.uri(subreddit, sort, limit);
        debug!("GET {uri}");
        let resp = self.client.get(&uri).send().map_err(HTTPError::Request)?;

        if !resp.status().is_success() {
            return Err(HTTPError::Http(resp.status()));
        }
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .ok_or(HTTPError::MissingContentType)?
            .to_str()?;
        if !content_type.starts_with("application/json") {
            Err(HTTPError::UnexpectedContentType(content_type.to_string()))
        } else {
            resp.text().map_err(HTTPError::Body)
        }
    }

    fn submit(&self, subreddit: &str, title: &str, selftext: &str) -> HTTPResult<String> {
        debug!("POST {SUBMIT_URI} (sr = {subreddit})");
        let params = [
            ("sr", subreddit),
            ("kind", "self"),
            ("title", title),
            ("text", selftext),
            ("api_type", "json"),
        ];
        let resp = self
            .client
            .post(SUBMIT_URI)
            .bearer_auth(&self.token)
            .form(&params)
            .send()
            .map_err(HTTPError::Request)?;
        if !resp.status().is_success() {
            return Err(HTTPError::Http(resp.status()));
        }
        resp.text().map_err(HTTPError::Body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> RedditService {
        RedditService {
            client: Client::new(),
            token: String::from("token-please-ignore"),
        }
    }

    #[test]
    fn it_returns_a_query_string_with_limits() {
        let qs = service().query_string("new", 100);
        assert_eq!(qs, "?limit=100");
    }

    #[test]
    fn it_returns_a_query_string_with_a_time_window_for_top() {
        let qs = service().query_string("top", 25);
        assert_eq!(qs, "?limit=25&t=all");
    }

    #[test]
    fn it_returns_a_uri_for_new_listings() {
        let actual_uri = service().uri("askhistorians", "new", 100);
        let expected_uri = "https://www.reddit.com/r/askhistorians/new.json?limit=100";
        assert_eq!(actual_uri, expected_uri);
    }

    #[test]
    fn it_returns_a_uri_for_top_listings() {
        let actual_uri = service().uri("askhistorians", "top", 10);
        let expected_uri = "https://www.reddit.com/r/askhistorians/top.json?limit=10&t=all";
        assert_eq!(actual_uri, expected_uri);
    }

    #[test]
    fn it_returns_a_uri_for_hot_listings() {
        let actual_uri = service().uri("askhistorians", "hot", 50);
        let expected_uri = "https://www.reddit.com/r/askhistorians/hot.json?limit=50";
        assert_eq!(actual_uri, expected_uri);
    }
}
