// SPDX-License-Identifier: Apache-2.0

//! Clients for reading submissions from and publishing submissions to
//! the Reddit API.

use crate::conf::{self, Credentials};
use crate::http;
use crate::reddit::service::{RedditService, Service};
use crate::reddit::thing::{self, Submission};
use clap::ValueEnum;
use log::debug;
use std::collections::{HashSet, VecDeque};
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// Number of submissions retrieved when no limit is given.
pub const DEFAULT_LIMIT: u32 = 100;

/// Number of submissions requested per poll of the streaming strategy.
const STREAM_PAGE: u32 = 100;

/// Number of submission ids the streaming strategy remembers. Bounded so
/// memory stays constant over an unbounded run.
const SEEN_CAPACITY: usize = 301;

const INITIAL_DELAY: Duration = Duration::from_secs(1);
const MAX_DELAY: Duration = Duration::from_secs(16);

/// A client error.
#[derive(Debug, Error)]
pub enum Error {
    /// An error resolving account credentials.
    #[error("Configuration error: {0}")]
    Conf(#[from] conf::Error),

    /// An error from the underlying HTTP service.
    #[error("Service error: {0}")]
    Service(#[from] http::HTTPError),

    /// An error parsing data.
    #[error("Parse error: {0}")]
    Parse(#[from] thing::Error),
}

/// How submissions are drawn from a subreddit.
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum Mode {
    /// Continuously yield submissions as they are posted.
    Stream,

    /// The newest submissions.
    New,

    /// The top-ranked submissions of all time.
    Top,

    /// The currently hottest submissions.
    Hot,
}

/// An authenticated Reddit session.
///
/// A session is constructed once, up front, and passed explicitly to
/// whatever needs it; it holds the only state shared across the life of
/// a run.
pub struct Session<T: Service> {
    pub(crate) service: T,
}

impl Session<RedditService> {
    /// Opens a session for the given account identifier.
    ///
    /// Credentials are resolved from the environment (see
    /// [`Credentials::for_account`]) and exchanged for an OAuth token.
    /// Requests carry a descriptive user agent derived from the account
    /// name.
    pub fn connect(account: &str) -> Result<Self, Error> {
        let credentials = Credentials::for_account(account)?;
        let user_agent = format!("{account} user agent");
        let service = RedditService::new(&credentials, &user_agent)?;
        Ok(Self::with_service(service))
    }
}

impl<T: Service> Session<T> {
    /// Creates a session backed by the given service implementation.
    pub fn with_service(service: T) -> Self {
        Self { service }
    }

    /// Returns a handle to the named subreddit.
    pub fn subreddit(&self, name: &str) -> Subreddit<'_, T> {
        Subreddit {
            service: &self.service,
            name: name.to_string(),
        }
    }
}

/// A handle to a single subreddit within a session.
pub struct Subreddit<'a, T: Service> {
    service: &'a T,
    name: String,
}

impl<'a, T: Service> Subreddit<'a, T> {
    /// The subreddit's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The subreddit's newest submissions, at most `limit` of them.
    pub fn newest(&self, limit: u32) -> Result<Vec<Submission>, Error> {
        self.fetch("new", limit)
    }

    /// The subreddit's top-ranked submissions of all time, at most
    /// `limit` of them.
    pub fn top(&self, limit: u32) -> Result<Vec<Submission>, Error> {
        self.fetch("top", limit)
    }

    /// The subreddit's currently hottest submissions, at most `limit`
    /// of them.
    pub fn hot(&self, limit: u32) -> Result<Vec<Submission>, Error> {
        self.fetch("hot", limit)
    }

    /// A stream of the subreddit's submissions as they are posted.
    ///
    /// The stream first yields the current newest submissions, oldest
    /// first, then polls for fresh ones indefinitely. See
    /// [`SubmissionStream`] for details.
    pub fn stream(&self) -> SubmissionStream<'_, T> {
        SubmissionStream {
            service: self.service,
            subreddit: &self.name,
            seen: BoundedSet::default(),
            pending: VecDeque::new(),
            delay: INITIAL_DELAY,
        }
    }

    /// Draws submissions from the subreddit according to `mode`.
    ///
    /// For the bounded modes ([`New`](Mode::New), [`Top`](Mode::Top),
    /// [`Hot`](Mode::Hot)), retrieval is delegated entirely to the
    /// corresponding listing, requesting `limit` submissions
    /// ([`DEFAULT_LIMIT`] if none is given) and yielding whatever comes
    /// back. [`Stream`](Mode::Stream) with no limit yields submissions
    /// indefinitely; with a limit, the stream is cut off after exactly
    /// `limit` submissions, since the underlying stream has no natural
    /// end.
    ///
    /// An explicit limit of 0 is treated as if no limit were given and
    /// falls back to [`DEFAULT_LIMIT`]. A long-standing quirk, kept so
    /// existing invocations behave the same.
    pub fn submissions(&self, mode: Mode, limit: Option<u32>) -> Result<Submissions<'_, T>, Error> {
        let unbounded = mode == Mode::Stream && limit.is_none();
        let limit = match limit {
            None | Some(0) => DEFAULT_LIMIT,
            Some(n) => n,
        };
        let inner = match mode {
            Mode::Stream => Inner::Stream {
                stream: self.stream(),
                remaining: if unbounded { None } else { Some(limit) },
            },
            Mode::New => Inner::Bounded(self.newest(limit)?.into_iter()),
            Mode::Top => Inner::Bounded(self.top(limit)?.into_iter()),
            Mode::Hot => Inner::Bounded(self.hot(limit)?.into_iter()),
        };
        Ok(Submissions { inner })
    }

    /// Publishes a new self post with the given title and body to the
    /// subreddit.
    pub fn submit(&self, title: &str, selftext: &str) -> Result<(), Error> {
        self.service.submit(&self.name, title, selftext)?;
        Ok(())
    }

    fn fetch(&self, sort: &str, limit: u32) -> Result<Vec<Submission>, Error> {
        let data = self.service.listing(&self.name, sort, limit)?;
        Ok(Submission::parse_listing(&data)?)
    }
}

/// A lazy sequence of submissions drawn from a subreddit.
///
/// Returned by [`Subreddit::submissions`]. Submissions are produced one
/// at a time and the sequence is forward-only; to start over, ask the
/// subreddit for a new one.
pub struct Submissions<'a, T: Service> {
    inner: Inner<'a, T>,
}

enum Inner<'a, T: Service> {
    Bounded(std::vec::IntoIter<Submission>),
    Stream {
        stream: SubmissionStream<'a, T>,
        remaining: Option<u32>,
    },
}

impl<T: Service> Iterator for Submissions<'_, T> {
    type Item = Result<Submission, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Bounded(submissions) => submissions.next().map(Ok),
            Inner::Stream { stream, remaining } => {
                if *remaining == Some(0) {
                    return None;
                }
                let item = stream.next()?;
                if let Some(n) = remaining.as_mut() {
                    *n -= 1;
                }
                Some(item)
            }
        }
    }
}

/// A live stream of a subreddit's submissions.
///
/// Polls the subreddit's "new" listing, yielding submissions that have
/// not been seen before, oldest first. The first poll yields the current
/// listing; subsequent polls pick up whatever has been posted since.
/// While the listing is quiet, polling backs off with a doubling delay,
/// capped at sixteen seconds, and resets once fresh submissions arrive.
///
/// The stream never terminates on its own; it ends only when a poll
/// fails, in which case the error is yielded and iteration may be
/// abandoned.
pub struct SubmissionStream<'a, T: Service> {
    service: &'a T,
    subreddit: &'a str,
    seen: BoundedSet,
    pending: VecDeque<Submission>,
    delay: Duration,
}

impl<T: Service> SubmissionStream<'_, T> {
    fn poll(&mut self) -> Result<usize, Error> {
        let data = self.service.listing(self.subreddit, "new", STREAM_PAGE)?;
        let listing = Submission::parse_listing(&data)?;
        // Listings are newest first; yield in the order submitted.
        let mut fresh = 0;
        for submission in listing.into_iter().rev() {
            if self.seen.insert(submission.id.clone()) {
                self.pending.push_back(submission);
                fresh += 1;
            }
        }
        Ok(fresh)
    }
}

impl<T: Service> Iterator for SubmissionStream<'_, T> {
    type Item = Result<Submission, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(submission) = self.pending.pop_front() {
                return Some(Ok(submission));
            }
            match self.poll() {
                Ok(0) => {
                    debug!("stream idle, sleeping for {:?}", self.delay);
                    thread::sleep(self.delay);
                    self.delay = (self.delay * 2).min(MAX_DELAY);
                }
                Ok(_) => self.delay = INITIAL_DELAY,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// A set that remembers only the most recently inserted items.
#[derive(Debug, Default)]
struct BoundedSet {
    items: HashSet<String>,
    order: VecDeque<String>,
}

impl BoundedSet {
    /// Inserts an item, evicting the oldest one if the set is full.
    /// Returns `true` if the item was not already present.
    fn insert(&mut self, item: String) -> bool {
        if !self.items.insert(item.clone()) {
            return false;
        }
        self.order.push_back(item);
        if self.order.len() > SEEN_CAPACITY {
            if let Some(oldest) = self.order.pop_front() {
                self.items.remove(&oldest);
            }
        }
        true
    }
}
