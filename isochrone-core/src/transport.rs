//! Transport seam used to fetch isochrone responses.

use async_trait::async_trait;
use serde_json::Value;

use crate::{RequestUrl, TransportError};

/// Perform the GET request for an isochrone query.
///
/// Implementations send one request asking for `application/json` and return
/// the decoded body, or a [`TransportError`] for network failures, non-2xx
/// statuses and bodies that are not JSON. Interpreting the document is left to
/// the caller.
///
/// The trait is `?Send` so test doubles can keep interior state in `Cell`s and
/// callers on single-threaded runtimes need not satisfy `Send` bounds.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use isochrone_core::{IsochroneTransport, RequestUrl, TransportError};
/// use serde_json::{Value, json};
///
/// struct EmptyTransport;
///
/// #[async_trait(?Send)]
/// impl IsochroneTransport for EmptyTransport {
///     async fn get_json(&self, _url: &RequestUrl) -> Result<Value, TransportError> {
///         Ok(json!({ "type": "FeatureCollection", "features": [] }))
///     }
/// }
/// ```
#[async_trait(?Send)]
pub trait IsochroneTransport {
    /// Fetch `url` and return the decoded JSON body.
    async fn get_json(&self, url: &RequestUrl) -> Result<Value, TransportError>;
}
