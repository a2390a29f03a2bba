// SPDX-License-Identifier: GPL-3.0-only

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::api::CatalogApi;
use crate::entities::{CatalogEntry, CatalogPage, EntryRef};
use crate::error::WildError;
use crate::favorites::FavoritesStore;
use crate::utils::entry_name_from_url;

/// How long cached query data stays fresh before a refetch is allowed.
pub const STALE_AFTER: Duration = Duration::from_secs(5 * 60);

/// Accumulating, offset-ordered listing over the whole catalog.
///
/// Pages are requested strictly in increasing offset order: the next offset
/// is always derived from how many pages are already held, so one instance
/// never skips or reorders pages.
#[derive(Debug)]
pub struct PagedQuery {
    api: CatalogApi,
    limit: usize,
    stale_after: Duration,
    pages: Vec<CatalogPage>,
    fetched_at: Option<Instant>,
}

impl PagedQuery {
    pub fn new(api: CatalogApi, limit: usize) -> PagedQuery {
        PagedQuery {
            api,
            limit,
            stale_after: STALE_AFTER,
            pages: Vec::new(),
            fetched_at: None,
        }
    }

    /// Overrides the freshness window.
    pub fn stale_after(mut self, window: Duration) -> PagedQuery {
        self.stale_after = window;
        self
    }

    /// Offset the next page would be requested at.
    pub fn next_offset(&self) -> usize {
        self.pages.len() * self.limit
    }

    /// Total number of references fetched so far.
    pub fn fetched(&self) -> usize {
        self.pages.iter().map(|page| page.results.len()).sum()
    }

    /// Whether the remote reports more entries beyond what is held.
    /// Vacuously true before the first fetch.
    pub fn has_next_page(&self) -> bool {
        match self.pages.last() {
            Some(last) => self.next_offset() < last.count,
            None => true,
        }
    }

    /// Requests the next page and appends it to the held pages.
    ///
    /// Returns the freshly fetched page, or `None` once the listing is
    /// exhausted. On failure the held pages are unchanged.
    pub async fn fetch_next_page(&mut self) -> Result<Option<&CatalogPage>, WildError> {
        if !self.has_next_page() {
            return Ok(None);
        }

        let offset = self.next_offset();
        let page = self.api.fetch_page(offset, self.limit).await?;
        debug!(offset, received = page.results.len(), total = page.count, "appended page");

        self.pages.push(page);
        self.fetched_at = Some(Instant::now());
        Ok(self.pages.last())
    }

    /// Pages held so far, in offset order.
    pub fn pages(&self) -> &[CatalogPage] {
        &self.pages
    }

    /// Flattened view of every reference fetched so far.
    pub fn entries(&self) -> impl Iterator<Item = &EntryRef> {
        self.pages.iter().flat_map(|page| page.results.iter())
    }

    /// Whether the held pages are past the freshness window.
    pub fn is_stale(&self) -> bool {
        self.fetched_at
            .is_none_or(|at| at.elapsed() >= self.stale_after)
    }

    /// Drops the held pages and refetches page zero, but only when stale.
    pub async fn refresh_if_stale(&mut self) -> Result<(), WildError> {
        if !self.is_stale() {
            return Ok(());
        }

        self.pages.clear();
        self.fetched_at = None;
        self.fetch_next_page().await?;
        Ok(())
    }
}

/// Outcome of a single-entry lookup.
///
/// `Missing` and `Failed` are deliberately distinct: a missing entry is an
/// answer from the remote, a failed fetch is the absence of one.
#[derive(Debug)]
pub enum EntryState {
    /// No fetch has completed yet.
    Pending,
    Found(CatalogEntry),
    /// The remote answered: no entry under this name.
    Missing,
    /// The fetch itself failed.
    Failed(WildError),
}

impl EntryState {
    pub fn entry(&self) -> Option<&CatalogEntry> {
        match self {
            EntryState::Found(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, EntryState::Pending)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, EntryState::Missing)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, EntryState::Failed(_))
    }
}

/// Cached lookup of one catalog entry, keyed by name.
///
/// Failures land in [`EntryState`] instead of propagating; callers inspect
/// the state to tell "not found" from "fetch failed" from "not yet run".
#[derive(Debug)]
pub struct EntryQuery {
    api: CatalogApi,
    name: String,
    enabled: bool,
    stale_after: Duration,
    state: EntryState,
    fetched_at: Option<Instant>,
}

impl EntryQuery {
    pub fn new(api: CatalogApi, name: impl Into<String>) -> EntryQuery {
        EntryQuery {
            api,
            name: name.into(),
            enabled: true,
            stale_after: STALE_AFTER,
            state: EntryState::Pending,
            fetched_at: None,
        }
    }

    /// Overrides the freshness window.
    pub fn stale_after(mut self, window: Duration) -> EntryQuery {
        self.stale_after = window;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &EntryState {
        &self.state
    }

    /// Enables or disables the query; a disabled query never fetches.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_stale(&self) -> bool {
        self.fetched_at
            .is_none_or(|at| at.elapsed() >= self.stale_after)
    }

    /// Runs the lookup if enabled and not still fresh, storing the outcome.
    ///
    /// Never returns an error: transport failures become
    /// [`EntryState::Failed`], a remote 404 becomes [`EntryState::Missing`].
    pub async fn run(&mut self) -> &EntryState {
        if !self.enabled || !self.is_stale() {
            return &self.state;
        }

        self.state = match self.api.fetch_entry(&self.name).await {
            Ok(entry) => EntryState::Found(entry),
            Err(err) if err.is_not_found() => EntryState::Missing,
            Err(err) => {
                warn!(name = %self.name, error = %err, "entry lookup failed");
                EntryState::Failed(err)
            }
        };
        self.fetched_at = Some(Instant::now());

        &self.state
    }
}

/// Fetches the entry behind a listing reference, raising the store's
/// loading flag for the duration of the request.
///
/// The flag is lowered on every exit path, cancellation included.
pub async fn fetch_entry_tracked(
    api: &CatalogApi,
    store: &mut FavoritesStore,
    reference: &EntryRef,
) -> Result<CatalogEntry, WildError> {
    let _guard = store.loading_guard();
    let name = entry_name_from_url(&reference.url).unwrap_or(&reference.name);
    api.fetch_entry(name).await
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::http::HttpClient;

    fn api_for(server: &MockServer) -> CatalogApi {
        CatalogApi::with_client(HttpClient::new(&server.base_url()).unwrap())
    }

    fn page_body(count: usize, offset: usize, len: usize) -> Value {
        let results: Vec<Value> = (offset..offset + len)
            .map(|index| {
                json!({
                    "name": format!("entry-{index}"),
                    "url": format!("https://api.example/v2/catalog/entry-{index}/"),
                })
            })
            .collect();

        let next = if offset + len < count {
            Value::String(format!("https://api.example/v2/catalog?offset={}", offset + len))
        } else {
            Value::Null
        };

        json!({ "count": count, "next": next, "previous": null, "results": results })
    }

    async fn mock_page(server: &MockServer, count: usize, offset: usize, len: usize) {
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/catalog")
                    .query_param("offset", offset.to_string());
                then.status(200).json_body(page_body(count, offset, len));
            })
            .await;
    }

    /// 45 entries at 20 per page: offsets 0/20/40, then the listing closes.
    #[tokio::test]
    async fn pages_through_the_whole_listing_in_offset_order() {
        let server = MockServer::start_async().await;
        mock_page(&server, 45, 0, 20).await;
        mock_page(&server, 45, 20, 20).await;
        mock_page(&server, 45, 40, 5).await;

        let mut listing = PagedQuery::new(api_for(&server), 20);
        assert!(listing.has_next_page());

        listing.fetch_next_page().await.unwrap();
        assert_eq!(listing.fetched(), 20);
        assert!(listing.has_next_page());

        listing.fetch_next_page().await.unwrap();
        assert_eq!(listing.fetched(), 40);
        assert!(listing.has_next_page());

        let last = listing.fetch_next_page().await.unwrap().unwrap();
        assert_eq!(last.results.len(), 5);
        assert_eq!(listing.fetched(), 45);
        assert!(!listing.has_next_page());

        // The exhausted listing refuses further fetches without touching
        // the network.
        assert!(listing.fetch_next_page().await.unwrap().is_none());
        assert_eq!(listing.pages().len(), 3);
        assert_eq!(listing.entries().count(), 45);
        assert_eq!(listing.next_offset(), 60);
    }

    #[tokio::test]
    async fn page_fetch_failures_propagate_and_leave_pages_alone() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/catalog");
                then.status(500).body("boom");
            })
            .await;

        let mut listing = PagedQuery::new(api_for(&server), 20);
        let err = listing.fetch_next_page().await.unwrap_err();

        assert!(matches!(err, WildError::Transport { .. }));
        assert!(listing.pages().is_empty());
        assert!(listing.is_stale());
    }

    #[tokio::test]
    async fn fresh_listings_skip_the_refresh() {
        let server = MockServer::start_async().await;
        mock_page(&server, 5, 0, 5).await;

        let mut listing = PagedQuery::new(api_for(&server), 20);
        listing.fetch_next_page().await.unwrap();
        assert!(!listing.is_stale());

        // Within the freshness window this must not drop or refetch pages.
        listing.refresh_if_stale().await.unwrap();
        assert_eq!(listing.pages().len(), 1);
    }

    #[tokio::test]
    async fn stale_listings_restart_from_page_zero() {
        let server = MockServer::start_async().await;
        let first_page = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/catalog")
                    .query_param("offset", "0");
                then.status(200).json_body(page_body(45, 0, 20));
            })
            .await;

        let mut listing = PagedQuery::new(api_for(&server), 20).stale_after(Duration::ZERO);
        listing.fetch_next_page().await.unwrap();
        assert!(listing.is_stale());

        listing.refresh_if_stale().await.unwrap();
        assert_eq!(listing.pages().len(), 1);
        assert_eq!(first_page.hits_async().await, 2);
    }

    #[tokio::test]
    async fn entry_lookup_stores_the_entry() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/catalog/pikachu");
                then.status(200)
                    .json_body(json!({ "id": 25, "name": "pikachu" }));
            })
            .await;

        let mut lookup = EntryQuery::new(api_for(&server), "pikachu");
        assert!(lookup.state().is_pending());

        let state = lookup.run().await;
        assert_eq!(state.entry().unwrap().id, 25);
    }

    #[tokio::test]
    async fn entry_lookup_distinguishes_missing_from_failed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/catalog/missingno");
                then.status(404).body("Not Found");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/catalog/pikachu");
                then.status(500).body("boom");
            })
            .await;

        let mut missing = EntryQuery::new(api_for(&server), "missingno");
        assert!(missing.run().await.is_missing());

        // A transport failure lands in the state, it is never raised.
        let mut failed = EntryQuery::new(api_for(&server), "pikachu");
        assert!(failed.run().await.is_failed());
        assert!(failed.state().entry().is_none());
    }

    #[tokio::test]
    async fn disabled_lookups_never_touch_the_network() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/catalog/pikachu");
                then.status(200)
                    .json_body(json!({ "id": 25, "name": "pikachu" }));
            })
            .await;

        let mut lookup = EntryQuery::new(api_for(&server), "pikachu");
        lookup.set_enabled(false);
        assert!(lookup.run().await.is_pending());
        assert_eq!(mock.hits_async().await, 0);

        lookup.set_enabled(true);
        assert!(!lookup.run().await.is_pending());
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn fresh_lookups_reuse_the_cached_outcome() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/catalog/pikachu");
                then.status(200)
                    .json_body(json!({ "id": 25, "name": "pikachu" }));
            })
            .await;

        let mut lookup = EntryQuery::new(api_for(&server), "pikachu");
        lookup.run().await;
        lookup.run().await;
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn tracked_fetch_lowers_the_flag_on_success_and_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/catalog/pikachu");
                then.status(200)
                    .json_body(json!({ "id": 25, "name": "pikachu" }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/catalog/missingno");
                then.status(500).body("boom");
            })
            .await;

        let api = api_for(&server);
        let dir = tempfile::tempdir().unwrap();
        let mut store = FavoritesStore::open(dir.path().join("favorites.json"));

        let reference = EntryRef {
            name: "fallback".to_string(),
            url: format!("{}/catalog/pikachu/", server.base_url()),
        };
        let entry = fetch_entry_tracked(&api, &mut store, &reference)
            .await
            .unwrap();
        assert_eq!(entry.id, 25);
        assert!(!store.is_loading());

        let broken = EntryRef {
            name: "missingno".to_string(),
            url: format!("{}/catalog/missingno/", server.base_url()),
        };
        let err = fetch_entry_tracked(&api, &mut store, &broken)
            .await
            .unwrap_err();
        assert!(matches!(err, WildError::Transport { .. }));
        assert!(!store.is_loading());
    }
}
