//! Filter state store.
//!
//! The store is the single writer of [`StoreState`]. Presentation code reads
//! it, dispatches [`Action`]s, and listens for changes through a
//! `tokio::sync::watch` revision counter.
//!
//! Fetches are tagged with a sequence number when issued. Only the outcome
//! of the most recently issued request is applied, so overlapping fetches
//! that complete out of order cannot overwrite newer results.

mod action;
pub mod exclusion;

pub use action::{Action, StoreState, reduce};

use tokio::sync::watch;

use crate::error::ApiResult;
use crate::models::{FilterState, RatesResponse};
use crate::query::{QueryParams, compose_query};

/// A fetch the caller should perform against `/rates`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub params: QueryParams,
}

/// Result of performing a [`FetchRequest`].
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub seq: u64,
    pub result: ApiResult<RatesResponse>,
}

/// What [`Store::receive`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receipt {
    /// Results stored
    Applied,
    /// Error message stored
    Failed,
    /// A newer request was issued since; outcome dropped
    Stale,
}

/// Owner of the explorer state.
#[derive(Debug)]
pub struct Store {
    state: StoreState,
    last_issued: u64,
    revision: watch::Sender<u64>,
}

impl Store {
    /// Create a store starting from the given filters.
    pub fn new(filters: FilterState) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: StoreState::new(filters),
            last_issued: 0,
            revision,
        }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn filters(&self) -> &FilterState {
        &self.state.filters
    }

    /// Receive a revision number every time the state changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Sequence number of the latest issued request, 0 if none.
    pub fn last_issued(&self) -> u64 {
        self.last_issued
    }

    /// The query the current state maps to.
    pub fn query(&self) -> QueryParams {
        compose_query(&self.state.filters)
    }

    /// Apply an action. Returns a fetch to perform when the composed
    /// query changed as a result.
    pub fn dispatch(&mut self, action: Action) -> Option<FetchRequest> {
        log::debug!("dispatch {}", action.name());

        let before = action.affects_query().then(|| self.query());
        self.apply(action);

        match before {
            Some(before) if before != self.query() => Some(self.request_fetch()),
            _ => None,
        }
    }

    /// Issue a fetch for the current state regardless of what changed.
    pub fn request_fetch(&mut self) -> FetchRequest {
        self.last_issued += 1;
        self.state.loading = true;
        self.bump();

        let request = FetchRequest {
            seq: self.last_issued,
            params: self.query(),
        };
        log::debug!(
            "issued fetch #{} ({})",
            request.seq,
            request.params.to_query_string()
        );
        request
    }

    /// Apply a fetch outcome if it belongs to the latest request.
    ///
    /// Each request is answered at most once; a repeat outcome for the
    /// latest sequence number, or one arriving before any request was
    /// issued, is dropped like a stale one.
    pub fn receive(&mut self, outcome: FetchOutcome) -> Receipt {
        let pending = self.last_issued != 0 && self.state.loading;
        if !pending || outcome.seq != self.last_issued {
            log::debug!(
                "dropping stale fetch #{} (latest is #{})",
                outcome.seq,
                self.last_issued
            );
            return Receipt::Stale;
        }

        match outcome.result {
            Ok(response) => {
                let stale = exclusion::stale_ids(
                    &self.state.filters.excluded_ids,
                    response.results.iter().map(|row| row.id),
                );
                if !stale.is_empty() {
                    log::debug!("{} excluded ids match no fetched row", stale.len());
                }
                log::debug!(
                    "fetch #{} returned {} rows ({} total)",
                    outcome.seq,
                    response.results.len(),
                    response.count
                );
                self.apply(Action::ReceiveResults(response));
                Receipt::Applied
            }
            Err(error) => {
                log::warn!("fetch #{} failed: {}", outcome.seq, error);
                self.apply(Action::ReceiveError(error.to_string()));
                Receipt::Failed
            }
        }
    }

    fn apply(&mut self, action: Action) {
        let next = reduce(self.state.clone(), action);
        if next != self.state {
            self.state = next;
            self.bump();
        }
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}
