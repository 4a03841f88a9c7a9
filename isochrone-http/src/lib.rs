//! HTTP transport for OpenTripPlanner isochrone requests.
//!
//! This crate provides [`HttpIsochroneTransport`], an implementation of
//! [`isochrone_core::IsochroneTransport`] that issues the isochrone GET request
//! against a running OTP server using `reqwest`.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use isochrone_core::{IsochroneRequest, LoadOptions, QueryParameters};
//! use isochrone_http::{HttpIsochroneTransport, HttpIsochroneTransportConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpIsochroneTransportConfig::new("http://localhost:8080")
//!     .with_timeout(Duration::from_secs(60))
//!     .with_user_agent("my-app/1.0");
//! let transport = HttpIsochroneTransport::with_config(config)?;
//!
//! let parameters = QueryParameters::new()
//!     .with_router("portland")
//!     .with_origin(45.52, -122.68)
//!     .with_mode("WALK,TRANSIT");
//! let mut request = IsochroneRequest::new(parameters, [900, 1800], LoadOptions::default());
//! request.on_load(|loaded| println!("{} isochrones", loaded.features().len()));
//! request.load(&transport).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod transport;

pub use transport::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpIsochroneTransport, HttpIsochroneTransportConfig,
    TransportBuildError,
};
