//! Client for OpenTripPlanner isochrone queries.
//!
//! This crate re-exports the public API of the workspace members so callers
//! can depend on a single crate:
//!
//! - [`isochrone_core`] builds request URLs, parses and indexes the returned
//!   GeoJSON features, and notifies load listeners.
//! - `isochrone_http` (behind the default `http` feature) performs the GET
//!   request against a running OTP server.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "http")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use otp_isochrone::{HttpIsochroneTransport, IsochroneRequest, LoadOptions, QueryParameters};
//!
//! let transport = HttpIsochroneTransport::new("http://localhost:8080")?;
//! let parameters = QueryParameters::new()
//!     .with_router("portland")
//!     .with_origin(45.52, -122.68)
//!     .with_mode("WALK,TRANSIT");
//! let options = LoadOptions::default().with_asynchronous(false);
//!
//! let request = IsochroneRequest::open(parameters, [900, 1800], options, &transport);
//! if let Some(feature) = request.feature(900) {
//!     println!("15 minute isochrone: {:?}", feature.geometry);
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "http"))]
//! # fn main() {}
//! ```

#![forbid(unsafe_code)]

pub use isochrone_core::*;

#[cfg(feature = "http")]
pub use isochrone_http::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpIsochroneTransport, HttpIsochroneTransportConfig,
    TransportBuildError,
};
