//! Core types for OpenTripPlanner isochrone requests.
//!
//! Responsibilities:
//! - Normalise routing parameters and cutoff times into a request URL.
//! - Parse the GeoJSON response and index features by cutoff time.
//! - Notify registered listeners once a fetch completes.
//!
//! Boundaries:
//! - HTTP lives behind the [`IsochroneTransport`] trait; concrete transports
//!   are provided by other crates.
//! - Routing parameters are passed through without semantic validation.
//!
//! Invariants:
//! - Each [`IsochroneRequest`] issues at most one fetch.
//! - The feature index stays empty unless a fetch succeeds.
//! - No global mutable state.

#![forbid(unsafe_code)]

mod config;
mod cutoff;
mod error;
mod feature;
mod params;
mod request;
mod request_url;
mod runtime;
mod transport;

#[doc(hidden)]
pub mod test_support;

pub use config::{LoadOptions, RequestConfig};
pub use cutoff::Cutoffs;
pub use error::{FeatureError, IsochroneError, TransportError};
pub use feature::{
    FeatureIndex, IsochroneFeature, IsochroneResponse, TIME_PROPERTY, TIME_PROPERTY_LOWERCASE,
};
pub use params::{DEFAULT_ROUTER_ID, ParamValue, QueryParameters, ROUTER_ID_KEY};
pub use request::{IsochroneRequest, LoadListener, LoadState};
pub use request_url::RequestUrl;
pub use transport::IsochroneTransport;
