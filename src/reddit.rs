// SPDX-License-Identifier: Apache-2.0

//! Reddit API clients and services for communicating with Reddit over HTTP.

pub mod client;
pub mod service;
pub mod thing;

pub use client::{Mode, Session, Submissions, Subreddit};
