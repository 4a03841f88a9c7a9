//! The isochrone request lifecycle: build, fetch once, index, notify.
//!
//! An [`IsochroneRequest`] owns its parameters, URL, feature index and
//! listeners. It issues at most one fetch through an [`IsochroneTransport`].
//! Listeners run exactly once, in registration order, after a successful
//! fetch has been indexed; listeners registered later run immediately.

use std::fmt;

use log::{debug, warn};

use crate::runtime::block_on;
use crate::{
    Cutoffs, FeatureIndex, IsochroneError, IsochroneFeature, IsochroneResponse,
    IsochroneTransport, LoadOptions, QueryParameters, RequestUrl,
};

/// Callback invoked once the features have been indexed.
pub type LoadListener = Box<dyn FnOnce(&IsochroneRequest)>;

/// Progress of the single fetch an [`IsochroneRequest`] may issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Loading is disabled; the request never fetches.
    Idle,
    /// The fetch is allowed but has not started.
    Queued,
    /// The fetch has been issued and has not completed.
    Pending,
    /// The response was indexed and listeners have run.
    Loaded,
    /// The fetch or the indexing failed; the index is empty.
    Failed(IsochroneError),
}

impl LoadState {
    /// Whether the features are available.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    /// Whether a fetch is still expected to complete.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Queued | Self::Pending)
    }

    /// The failure, if the fetch failed.
    #[must_use]
    pub const fn error(&self) -> Option<&IsochroneError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// One isochrone query against an OTP router.
///
/// # Examples
///
/// ```
/// use std::{cell::Cell, rc::Rc};
/// use isochrone_core::test_support::StubTransport;
/// use isochrone_core::{IsochroneRequest, LoadOptions, QueryParameters};
///
/// let transport = StubTransport::with_cutoffs(&[300, 600]);
/// let fired = Rc::new(Cell::new(0));
///
/// let mut request = IsochroneRequest::new(
///     QueryParameters::new().with_router("abc"),
///     [300, 600],
///     LoadOptions::default(),
/// );
/// let counter = Rc::clone(&fired);
/// request.on_load(move |loaded| {
///     assert!(loaded.feature(300).is_some());
///     counter.set(counter.get() + 1);
/// });
///
/// request.load_blocking(&transport)?;
///
/// assert_eq!(fired.get(), 1);
/// assert!(request.feature(600).is_some());
/// assert!(request.feature(900).is_none());
/// # Ok::<(), isochrone_core::IsochroneError>(())
/// ```
pub struct IsochroneRequest {
    parameters: QueryParameters,
    cutoffs: Cutoffs,
    options: LoadOptions,
    url: RequestUrl,
    features: FeatureIndex,
    state: LoadState,
    listeners: Vec<LoadListener>,
}

impl fmt::Debug for IsochroneRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IsochroneRequest")
            .field("url", &self.url)
            .field("options", &self.options)
            .field("state", &self.state)
            .field("features", &self.features.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl IsochroneRequest {
    /// Build a request without touching the network.
    ///
    /// With `options.load` the request starts [`LoadState::Queued`] and
    /// waits for [`load`](Self::load) or [`load_blocking`](Self::load_blocking);
    /// otherwise it stays [`LoadState::Idle`].
    #[must_use]
    pub fn new(
        parameters: QueryParameters,
        cutoffs: impl Into<Cutoffs>,
        options: impl Into<LoadOptions>,
    ) -> Self {
        let cutoff_set = cutoffs.into();
        let load_options: LoadOptions = options.into();
        let url = RequestUrl::build(&parameters, &cutoff_set);
        debug!("built isochrone request {url}");
        let state = if load_options.load {
            LoadState::Queued
        } else {
            LoadState::Idle
        };
        Self {
            parameters,
            cutoffs: cutoff_set,
            options: load_options,
            url,
            features: FeatureIndex::default(),
            state,
            listeners: Vec::new(),
        }
    }

    /// Build a request and, when loading synchronously, fetch immediately.
    ///
    /// With `load` and not `asynchronous` this blocks until the transport
    /// answers, and the request comes back [`LoadState::Loaded`] or
    /// [`LoadState::Failed`]. A fetch that cannot be driven from the calling
    /// thread, such as inside a current-thread Tokio runtime, is recorded as
    /// failed too. With `asynchronous` the request is returned queued and the
    /// caller awaits [`load`](Self::load) to drive it.
    #[must_use]
    pub fn open<T>(
        parameters: QueryParameters,
        cutoffs: impl Into<Cutoffs>,
        options: impl Into<LoadOptions>,
        transport: &T,
    ) -> Self
    where
        T: IsochroneTransport + ?Sized,
    {
        let mut request = Self::new(parameters, cutoffs, options);
        if request.options.load
            && !request.options.asynchronous
            && let Err(err) = request.load_blocking(transport)
        {
            request.fail_unissued(err);
        }
        request
    }

    /// Request URL relative to the service root.
    #[must_use]
    pub const fn url(&self) -> &RequestUrl {
        &self.url
    }

    /// Routing parameters the URL was built from.
    #[must_use]
    pub const fn parameters(&self) -> &QueryParameters {
        &self.parameters
    }

    /// Requested cutoffs in input order.
    #[must_use]
    pub const fn cutoffs(&self) -> &Cutoffs {
        &self.cutoffs
    }

    /// Resolved load options.
    #[must_use]
    pub const fn options(&self) -> LoadOptions {
        self.options
    }

    /// Progress of the fetch.
    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    /// All indexed features; empty until a fetch succeeds.
    #[must_use]
    pub const fn features(&self) -> &FeatureIndex {
        &self.features
    }

    /// Feature indexed at exactly `cutoff` seconds.
    ///
    /// Returns `None` before a successful fetch and for cutoffs the response
    /// did not contain.
    #[must_use]
    pub fn feature(&self, cutoff: u32) -> Option<&IsochroneFeature> {
        self.features.get(cutoff)
    }

    /// Register a listener for load completion.
    ///
    /// Listeners run once, in registration order, after the features are
    /// indexed. If the request has already loaded the listener runs before
    /// this method returns. Listeners never run for failed or idle requests.
    pub fn on_load<F>(&mut self, listener: F) -> &mut Self
    where
        F: FnOnce(&Self) + 'static,
    {
        if self.state.is_loaded() {
            listener(self);
        } else {
            self.listeners.push(Box::new(listener));
        }
        self
    }

    /// Issue the fetch and wait for it without blocking the thread.
    ///
    /// Does nothing when loading is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`IsochroneError::AlreadyIssued`] without touching the network
    /// if a fetch was issued before. Transport, response-shape and feature
    /// errors are returned and also recorded as [`LoadState::Failed`].
    pub async fn load<T>(&mut self, transport: &T) -> Result<(), IsochroneError>
    where
        T: IsochroneTransport + ?Sized,
    {
        match self.state {
            LoadState::Idle => {
                debug!("loading disabled for {}", self.url);
                return Ok(());
            }
            LoadState::Queued => {}
            LoadState::Pending | LoadState::Loaded | LoadState::Failed(_) => {
                return Err(IsochroneError::AlreadyIssued {
                    url: self.url.to_string(),
                });
            }
        }

        self.state = LoadState::Pending;
        debug!("fetching isochrones from {}", self.url);
        match fetch_features(transport, &self.url).await {
            Ok(features) => {
                self.complete(features);
                Ok(())
            }
            Err(err) => {
                warn!("isochrone request {} failed: {err}", self.url);
                self.state = LoadState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Issue the fetch and block the calling thread until it completes.
    ///
    /// # Errors
    ///
    /// As for [`load`](Self::load), plus [`IsochroneError::Runtime`] and
    /// [`IsochroneError::BlockingInCurrentThread`] when the fetch cannot be
    /// driven from this thread. In those two cases no fetch is issued and the
    /// request stays queued.
    pub fn load_blocking<T>(&mut self, transport: &T) -> Result<(), IsochroneError>
    where
        T: IsochroneTransport + ?Sized,
    {
        block_on(self.load(transport))?
    }

    /// Record a blocking load that never reached the transport.
    fn fail_unissued(&mut self, err: IsochroneError) {
        if self.state == LoadState::Queued {
            warn!("isochrone request {} could not be loaded: {err}", self.url);
            self.state = LoadState::Failed(err);
        }
    }

    fn complete(&mut self, features: FeatureIndex) {
        debug!(
            "indexed {} isochrone feature(s) from {}",
            features.len(),
            self.url
        );
        self.features = features;
        self.state = LoadState::Loaded;
        for listener in std::mem::take(&mut self.listeners) {
            listener(self);
        }
    }
}

async fn fetch_features<T>(transport: &T, url: &RequestUrl) -> Result<FeatureIndex, IsochroneError>
where
    T: IsochroneTransport + ?Sized,
{
    let body = transport.get_json(url).await?;
    let response: IsochroneResponse =
        serde_json::from_value(body).map_err(|err| IsochroneError::MalformedResponse {
            url: url.to_string(),
            message: err.to_string(),
        })?;
    Ok(FeatureIndex::from_response(response)?)
}
