//! Error types produced while fetching and indexing isochrones.

use thiserror::Error;

/// Errors raised when a feature cannot be keyed by its cutoff time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    /// Neither `Time` nor `time` is present in the feature's properties.
    #[error("feature {position} has neither a `Time` nor a `time` property")]
    MissingTime {
        /// Zero-based position of the feature in the response.
        position: usize,
    },
    /// The time property is not a non-negative whole number of seconds.
    #[error("feature {position} has an invalid time value {value}")]
    InvalidTime {
        /// Zero-based position of the feature in the response.
        position: usize,
        /// JSON rendering of the offending value.
        value: String,
    },
}

/// Transport-level errors encountered while issuing the GET request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Fully qualified request URL.
        url: String,
        /// Timeout that elapsed, in seconds.
        timeout_secs: u64,
    },
    /// The server answered with a non-success status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Short error description.
        message: String,
    },
    /// The server could not be reached.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// Error reported by the HTTP client.
        message: String,
    },
    /// The response body was not valid JSON.
    #[error("failed to decode JSON from {url}: {message}")]
    Decode {
        /// Fully qualified request URL.
        url: String,
        /// Decoder error message.
        message: String,
    },
}

/// Errors from loading an [`IsochroneRequest`](crate::IsochroneRequest).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsochroneError {
    /// The transport could not deliver a JSON document.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The JSON document does not have the expected `features` sequence.
    #[error("malformed isochrone response from {url}: {message}")]
    MalformedResponse {
        /// Request URL, relative to the service root.
        url: String,
        /// Deserialiser error message.
        message: String,
    },
    /// A feature could not be indexed.
    #[error(transparent)]
    Feature(#[from] FeatureError),
    /// The single permitted fetch has already been issued.
    #[error("isochrone request {url} has already been issued")]
    AlreadyIssued {
        /// Request URL, relative to the service root.
        url: String,
    },
    /// A private runtime for a blocking load could not be built.
    #[error("failed to build Tokio runtime: {message}")]
    Runtime {
        /// I/O error message from the runtime builder.
        message: String,
    },
    /// A blocking load was attempted on a current-thread Tokio runtime.
    ///
    /// Blocking there would stall the runtime that drives the request, so
    /// callers on such runtimes must await `load` instead.
    #[error("cannot block on an isochrone fetch inside a current-thread Tokio runtime")]
    BlockingInCurrentThread,
}
