// src/explorer.rs

//! A store wired to an API client.
//!
//! `Explorer` runs the whole loop for callers that handle one interaction
//! at a time: dispatch, fetch if the query changed, apply the outcome.
//! Callers that overlap requests can drive [`Store`] and [`perform`]
//! directly; the store's sequence numbers keep the latest request's
//! results.

use crate::api::ApiGet;
use crate::error::Result;
use crate::models::{Column, Config, ScheduleMetadata};
use crate::query::compose_search_query;
use crate::store::{Action, FetchOutcome, FetchRequest, Receipt, Store};
use crate::view::{ResultView, project};

/// Run one fetch against `/rates`.
pub async fn perform<A: ApiGet>(api: &A, request: FetchRequest) -> FetchOutcome {
    FetchOutcome {
        seq: request.seq,
        result: api.get_rates(&request.params).await,
    }
}

/// Store, API client and column layout for one session.
pub struct Explorer<A> {
    store: Store,
    api: A,
    columns: Vec<Column>,
}

impl<A: ApiGet> Explorer<A> {
    /// Start a session with the configured defaults.
    pub fn new(api: A, config: &Config) -> Result<Self> {
        let filters = config.explorer.initial_state()?;
        Ok(Self {
            store: Store::new(filters),
            api,
            columns: config.explorer.visible_columns(),
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Apply an action, fetching new results if the query changed.
    ///
    /// Returns `None` when no fetch was needed.
    pub async fn dispatch(&mut self, action: Action) -> Option<Receipt> {
        let request = self.store.dispatch(action)?;
        Some(self.run(request).await)
    }

    /// Apply several actions, then fetch once if the query changed.
    pub async fn dispatch_all(
        &mut self,
        actions: impl IntoIterator<Item = Action>,
    ) -> Option<Receipt> {
        let mut latest = None;
        for action in actions {
            if let Some(request) = self.store.dispatch(action) {
                latest = Some(request);
            }
        }
        // Earlier requests are superseded and never sent
        let request = latest?;
        Some(self.run(request).await)
    }

    /// Fetch results for the current state.
    pub async fn refresh(&mut self) -> Receipt {
        let request = self.store.request_fetch();
        self.run(request).await
    }

    /// Schedule metadata for building a schedule picker.
    pub async fn schedules(&self) -> Result<Vec<ScheduleMetadata>> {
        Ok(self.api.get_schedules().await?)
    }

    /// Autocomplete suggestions for the current search term.
    pub async fn suggestions(&self) -> Result<serde_json::Value> {
        let params = compose_search_query(self.store.filters());
        Ok(self.api.search(&params).await?)
    }

    /// CSV export link for the current state.
    pub fn csv_url(&self) -> Result<String> {
        self.api.csv_url(&self.store.query())
    }

    /// What the presentation layer should show.
    pub fn view(&self) -> ResultView {
        project(self.store.state(), &self.columns)
    }

    async fn run(&mut self, request: FetchRequest) -> Receipt {
        let outcome = perform(&self.api, request).await;
        self.store.receive(outcome)
    }
}
