//! Request URL for the OTP isochrone endpoint.

use std::{fmt, ops::Deref};

use crate::{Cutoffs, QueryParameters};

const ROUTERS_PATH: &str = "/otp/routers";
const ISOCHRONE_PATH: &str = "isochrone";
const CUTOFF_PARAM: &str = "cutoffSec";

/// Request URL relative to the service root.
///
/// The URL has the shape
/// `/otp/routers/{routerId}/isochrone?{params}&cutoffSec={c1}&cutoffSec={c2}...`
/// with one `cutoffSec` fragment per cutoff, in input order.
///
/// # Examples
/// ```
/// use isochrone_core::{Cutoffs, QueryParameters, RequestUrl};
///
/// let params = QueryParameters::new().with_router("abc").with_mode("WALK");
/// let url = RequestUrl::build(&params, &Cutoffs::from([300, 600]));
/// assert_eq!(
///     url.as_ref(),
///     "/otp/routers/abc/isochrone?mode=WALK&routerId=abc&cutoffSec=300&cutoffSec=600"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestUrl(String);

impl RequestUrl {
    /// Build the request URL for `parameters` and `cutoffs`.
    #[must_use]
    pub fn build(parameters: &QueryParameters, cutoffs: &Cutoffs) -> Self {
        let fragments: String = cutoffs
            .iter()
            .map(|seconds| format!("&{CUTOFF_PARAM}={seconds}"))
            .collect();
        Self(format!(
            "{ROUTERS_PATH}/{}/{ISOCHRONE_PATH}?{}{fragments}",
            parameters.router_id(),
            parameters.to_query_string(),
        ))
    }

    /// Resolve against a service root such as `http://localhost:8080`.
    ///
    /// Trailing slashes on `base_url` are ignored.
    #[must_use]
    pub fn resolve(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Consume the wrapper and return the inner [`String`].
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for RequestUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for RequestUrl {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for RequestUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
