//! Load options for an isochrone request.

use serde::{Deserialize, Serialize};

/// Caller-supplied configuration; unset keys keep their defaults.
///
/// Deserialises from the same shape callers pass on the wire, e.g.
/// `{"load": false}` or `{"async": false}`.
///
/// # Examples
/// ```
/// use isochrone_core::{LoadOptions, RequestConfig};
///
/// let config: RequestConfig = serde_json::from_str(r#"{"async": false}"#)?;
/// let options = LoadOptions::from(config);
/// assert!(options.load);
/// assert!(!options.asynchronous);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Whether to fetch at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<bool>,
    /// Whether the fetch may suspend instead of blocking the constructor.
    #[serde(default, rename = "async", skip_serializing_if = "Option::is_none")]
    pub asynchronous: Option<bool>,
}

/// Fully resolved load options.
///
/// Defaults to loading asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Issue the fetch. When `false` the request never touches the network.
    pub load: bool,
    /// Let the fetch suspend. When `false`,
    /// [`IsochroneRequest::open`](crate::IsochroneRequest::open) blocks until
    /// the transport answers.
    pub asynchronous: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            load: true,
            asynchronous: true,
        }
    }
}

impl LoadOptions {
    /// Enable or disable the fetch.
    #[must_use]
    pub const fn with_load(mut self, load: bool) -> Self {
        self.load = load;
        self
    }

    /// Choose between a suspending and a blocking fetch.
    #[must_use]
    pub const fn with_asynchronous(mut self, asynchronous: bool) -> Self {
        self.asynchronous = asynchronous;
        self
    }

    /// Overlay `config` on these options; keys set in `config` win.
    #[must_use]
    pub fn merged(self, config: RequestConfig) -> Self {
        Self {
            load: config.load.unwrap_or(self.load),
            asynchronous: config.asynchronous.unwrap_or(self.asynchronous),
        }
    }
}

impl From<RequestConfig> for LoadOptions {
    fn from(config: RequestConfig) -> Self {
        Self::default().merged(config)
    }
}
