//! Test utilities for isochrone requests.
//!
//! This module provides [`StubTransport`], a deterministic test double for
//! [`IsochroneTransport`] that returns pre-configured responses without making
//! HTTP requests and records every URL it is asked for.

use std::cell::RefCell;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{IsochroneTransport, RequestUrl, TIME_PROPERTY, TransportError};

/// Stub [`IsochroneTransport`] for tests.
///
/// # Example
///
/// ```
/// use isochrone_core::test_support::StubTransport;
/// use isochrone_core::{IsochroneRequest, LoadOptions, QueryParameters};
///
/// let transport = StubTransport::with_cutoffs(&[600]);
/// let mut request = IsochroneRequest::new(QueryParameters::new(), 600, LoadOptions::default());
///
/// request.load_blocking(&transport)?;
///
/// assert_eq!(transport.request_count(), 1);
/// assert!(request.feature(600).is_some());
/// # Ok::<(), isochrone_core::IsochroneError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StubTransport {
    response: StubResponse,
    requests: RefCell<Vec<String>>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Body(Value),
    Error(TransportError),
}

impl StubTransport {
    /// Create a transport that answers every request with `body`.
    #[must_use]
    pub fn with_body(body: Value) -> Self {
        Self {
            response: StubResponse::Body(body),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Create a transport returning a feature collection with one feature per
    /// cutoff, keyed under `Time`.
    #[must_use]
    pub fn with_cutoffs(cutoffs: &[u32]) -> Self {
        Self::with_features(
            cutoffs
                .iter()
                .map(|seconds| isochrone_feature(TIME_PROPERTY, *seconds))
                .collect(),
        )
    }

    /// Create a transport returning a feature collection of `features`.
    #[must_use]
    pub fn with_features(features: Vec<Value>) -> Self {
        Self::with_body(json!({
            "type": "FeatureCollection",
            "features": features,
        }))
    }

    /// Create a transport that fails every request with `error`.
    #[must_use]
    pub fn with_error(error: TransportError) -> Self {
        Self {
            response: StubResponse::Error(error),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Number of requests issued so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// URLs requested so far, oldest first.
    #[must_use]
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl IsochroneTransport for StubTransport {
    async fn get_json(&self, url: &RequestUrl) -> Result<Value, TransportError> {
        self.requests.borrow_mut().push(url.to_string());
        match &self.response {
            StubResponse::Body(body) => Ok(body.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

/// Build a GeoJSON isochrone feature whose cutoff is stored under `time_key`.
///
/// The geometry is a small square whose size grows with `seconds` so features
/// for different cutoffs are distinguishable.
#[must_use]
pub fn isochrone_feature(time_key: &str, seconds: u32) -> Value {
    let extent = f64::from(seconds) / 3600.0;
    let mut properties = serde_json::Map::new();
    properties.insert(time_key.to_owned(), json!(seconds));
    json!({
        "type": "Feature",
        "geometry": {
            "type": "MultiPolygon",
            "coordinates": [[[
                [0.0, 0.0],
                [extent, 0.0],
                [extent, extent],
                [0.0, extent],
                [0.0, 0.0]
            ]]]
        },
        "properties": properties,
    })
}
