// SPDX-License-Identifier: Apache-2.0

//! Common types for services that communicate with APIs over HTTP.

use reqwest::header;
use thiserror::Error;

/// The result of an HTTP request.
pub type HTTPResult<T> = Result<T, HTTPError>;

/// Indicates an error has occurred when making an HTTP call.
#[derive(Debug, Error)]
pub enum HTTPError {
    /// An error that occurred while making an HTTP request.
    #[error("Error while making HTTP request: {0}")]
    Request(#[source] reqwest::Error),

    /// An error retrieving the body of a response.
    #[error("Error retrieving body of HTTP response: {0}")]
    Body(#[source] reqwest::Error),

    /// An unsuccessful HTTP status code in an HTTP response.
    #[error("Request returned HTTP {0}")]
    Http(reqwest::StatusCode),

    /// A missing Content-Type header in a response.
    #[error("Missing Content-Type header")]
    MissingContentType,

    /// An invalid Content-Type header.
    #[error("Invalid Content-Type header value: {0}")]
    InvalidContentType(#[from] header::ToStrError),

    /// A Content-Type that is not understood by the service.
    #[error("Unexpected content type: {0}")]
    UnexpectedContentType(String),
}
