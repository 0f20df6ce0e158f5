//! Fetching ad details for one widget instance.
//!
//! [`AdDetailsUnit`] owns the `{ details, loading, error }` triple for a
//! single identifier and guarantees that only the most recently issued
//! request can ever write to it. Every request cycle gets a generation
//! number and an [`AbortHandle`]; starting a new cycle, resetting or
//! disposing the unit bumps the generation and aborts the previous request,
//! so a late resolution is dropped instead of applied.
//!
//! The unit does not spawn anything itself. [`AdDetailsUnit::start`] and
//! [`AdDetailsUnit::refetch`] hand back the request future, and the owner
//! drives it (`spawn_local` in the browser, a local executor in tests).

use futures::future::{AbortHandle, Abortable, Aborted, FutureExt, LocalBoxFuture};
use payloads::{APIClient, AdDetails, ClientError, Identifier};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A request cycle that still needs to be polled to completion.
pub type PendingFetch = LocalBoxFuture<'static, ()>;

/// What the widget knows about its ad right now.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdDetailsState {
    pub details: Option<AdDetails>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Coarse classification of an [`AdDetailsState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Success,
    Failed,
}

impl AdDetailsState {
    /// State shown before the first cycle for `raw_identifier` has started.
    ///
    /// Reports loading for a usable identifier so the first render does not
    /// flash an empty widget.
    pub fn initial(raw_identifier: &str) -> Self {
        Self {
            loading: Identifier::parse(raw_identifier).is_some(),
            ..Self::default()
        }
    }

    pub fn phase(&self) -> FetchPhase {
        if self.loading {
            FetchPhase::Loading
        } else if self.error.is_some() {
            FetchPhase::Failed
        } else if self.details.is_some() {
            FetchPhase::Success
        } else {
            FetchPhase::Idle
        }
    }
}

/// Why a request for ad details failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The service responded with a non-success status.
    #[error("Failed to fetch: {status}")]
    Http { status: u16 },
    /// No usable response arrived.
    #[error("{}", network_message(.message))]
    Network { message: String },
}

fn network_message(message: &str) -> &str {
    if message.is_empty() {
        "Unknown error"
    } else {
        message
    }
}

impl From<ClientError> for FetchError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Status(status) => Self::Http {
                status: status.as_u16(),
            },
            ClientError::Network(e) => Self::Network {
                message: e.to_string(),
            },
        }
    }
}

/// Where ad details come from.
pub trait AdSource {
    fn fetch(
        &self,
        identifier: &Identifier,
    ) -> LocalBoxFuture<'static, Result<AdDetails, FetchError>>;
}

impl AdSource for APIClient {
    fn fetch(
        &self,
        identifier: &Identifier,
    ) -> LocalBoxFuture<'static, Result<AdDetails, FetchError>> {
        let client = self.clone();
        let identifier = identifier.clone();
        async move {
            client
                .ad_details(&identifier)
                .await
                .map_err(FetchError::from)
        }
        .boxed_local()
    }
}

type Listener = Rc<dyn Fn(&AdDetailsState)>;

struct Inner<S> {
    source: S,
    identifier: Option<Identifier>,
    state: AdDetailsState,
    generation: u64,
    in_flight: Option<AbortHandle>,
    disposed: bool,
    listener: Option<Listener>,
}

impl<S> Inner<S> {
    /// Invalidate whatever request is outstanding.
    fn supersede(&mut self) {
        self.generation += 1;
        if let Some(handle) = self.in_flight.take() {
            tracing::debug!(
                generation = self.generation,
                "superseding in-flight ad request"
            );
            handle.abort();
        }
    }
}

/// Fetch/state unit for a single widget instance.
///
/// Cloning yields another handle to the same unit.
pub struct AdDetailsUnit<S> {
    inner: Rc<RefCell<Inner<S>>>,
}

impl<S> Clone for AdDetailsUnit<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S> PartialEq for AdDetailsUnit<S> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S: AdSource + 'static> AdDetailsUnit<S> {
    pub fn new(source: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                source,
                identifier: None,
                state: AdDetailsState::default(),
                generation: 0,
                in_flight: None,
                disposed: false,
                listener: None,
            })),
        }
    }

    /// Register the function called after every state change. Replaces any
    /// previous listener.
    pub fn subscribe(&self, listener: impl Fn(&AdDetailsState) + 'static) {
        let mut inner = self.inner.borrow_mut();
        if !inner.disposed {
            inner.listener = Some(Rc::new(listener));
        }
    }

    pub fn state(&self) -> AdDetailsState {
        self.inner.borrow().state.clone()
    }

    /// The identifier of the current cycle, already trimmed.
    pub fn identifier(&self) -> Option<Identifier> {
        self.inner.borrow().identifier.clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    /// Begin a cycle for `raw_identifier`, cancelling any earlier one.
    ///
    /// A blank identifier settles the unit to idle without a request and
    /// returns `None`.
    pub fn start(&self, raw_identifier: &str) -> Option<PendingFetch> {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return None;
            }
            inner.identifier = Identifier::parse(raw_identifier);
        }
        self.issue()
    }

    /// Re-run the cycle for the current identifier. Details from the last
    /// success stay in place until the new result lands.
    pub fn refetch(&self) -> Option<PendingFetch> {
        self.issue()
    }

    /// Clear everything and drop the outstanding request, if any.
    pub fn reset(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            inner.supersede();
            inner.state = AdDetailsState::default();
        }
        self.notify();
    }

    /// Tear the unit down. Nothing is written or reported afterwards.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.supersede();
        inner.disposed = true;
        inner.listener = None;
    }

    fn issue(&self) -> Option<PendingFetch> {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return None;
            }
            inner.supersede();

            match inner.identifier.clone() {
                None => {
                    inner.state = AdDetailsState::default();
                    None
                }
                Some(identifier) => {
                    inner.state.loading = true;
                    inner.state.error = None;

                    let generation = inner.generation;
                    let (handle, registration) = AbortHandle::new_pair();
                    inner.in_flight = Some(handle);
                    let request = Abortable::new(
                        inner.source.fetch(&identifier),
                        registration,
                    );

                    tracing::debug!(%identifier, generation, "requesting ad details");
                    Some(Self::drive(
                        Rc::downgrade(&self.inner),
                        generation,
                        request,
                    ))
                }
            }
        };
        self.notify();
        pending
    }

    fn drive(
        unit: Weak<RefCell<Inner<S>>>,
        generation: u64,
        request: Abortable<LocalBoxFuture<'static, Result<AdDetails, FetchError>>>,
    ) -> PendingFetch {
        async move {
            let result = match request.await {
                Ok(result) => result,
                Err(Aborted) => {
                    tracing::debug!(generation, "ad request cancelled");
                    return;
                }
            };
            // The owner may have dropped every handle while we were waiting.
            if let Some(inner) = unit.upgrade() {
                Self { inner }.complete(generation, result);
            }
        }
        .boxed_local()
    }

    fn complete(&self, generation: u64, result: Result<AdDetails, FetchError>) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed || inner.generation != generation {
                tracing::debug!(generation, "discarding stale ad response");
                return;
            }
            inner.in_flight = None;
            inner.state = match result {
                Ok(details) => AdDetailsState {
                    details: Some(details),
                    loading: false,
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load ad details");
                    AdDetailsState {
                        details: None,
                        loading: false,
                        error: Some(e.to_string()),
                    }
                }
            };
        }
        self.notify();
    }

    fn notify(&self) {
        // Listeners may call back into the unit, so release the borrow first.
        let (listener, state) = {
            let inner = self.inner.borrow();
            (inner.listener.clone(), inner.state.clone())
        };
        if let Some(listener) = listener {
            listener(&state);
        }
    }
}
