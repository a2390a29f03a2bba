// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::api::CatalogApi;
use crate::entities::CatalogEntry;
use crate::error::WildError;

/// User-local favorites with an on-disk JSON snapshot, plus the loading
/// flag for in-flight detail fetches.
///
/// Explicitly constructed and handed to whoever needs it; mutation is
/// `&mut`-driven and single-threaded by construction. Every mutation
/// rewrites the whole snapshot synchronously.
#[derive(Debug)]
pub struct FavoritesStore {
    path: PathBuf,
    loading: bool,
    favorites: Vec<CatalogEntry>,
}

impl FavoritesStore {
    /// Default snapshot location under the platform data directory.
    pub fn default_path(app_id: &str) -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(app_id).join("favorites.json"))
    }

    /// Opens the store at `path`, reading any existing snapshot once.
    ///
    /// A missing or corrupt snapshot yields an empty list.
    pub fn open(path: impl Into<PathBuf>) -> FavoritesStore {
        let path = path.into();
        let favorites = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "corrupt favorites snapshot, starting empty");
                Vec::new()
            }),
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %err, "unreadable favorites snapshot, starting empty");
                }
                Vec::new()
            }
        };

        FavoritesStore {
            path,
            loading: false,
            favorites,
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Raises the loading flag and returns a guard that lowers it again
    /// when dropped, whichever way the surrounding fetch ends.
    pub fn loading_guard(&mut self) -> LoadingGuard<'_> {
        self.set_loading(true);
        LoadingGuard { store: self }
    }

    /// Adds `entry` to the favorites if no entry with its id is present,
    /// removes it otherwise, then persists the full list.
    pub fn toggle(&mut self, entry: CatalogEntry) -> Result<(), WildError> {
        match self.favorites.iter().position(|fav| fav.id == entry.id) {
            Some(index) => {
                self.favorites.remove(index);
            }
            None => self.favorites.push(entry),
        }
        self.persist()
    }

    /// Membership lookup by entry id.
    pub fn is_favorite(&self, id: i64) -> bool {
        self.favorites.iter().any(|fav| fav.id == id)
    }

    /// The current favorites, in insertion order. This is the live list,
    /// not a copy.
    pub fn favorites(&self) -> &[CatalogEntry] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Re-fetches every favorite and replaces its stored snapshot in
    /// place, keeping the old one where a fetch fails. Returns how many
    /// entries were updated.
    pub async fn refresh(&mut self, api: &CatalogApi) -> Result<usize, WildError> {
        let names: Vec<String> = self.favorites.iter().map(|fav| fav.name.clone()).collect();

        let mut updated = 0;
        for result in api.fetch_entries(&names).await {
            match result {
                Ok(entry) => {
                    if let Some(stale) = self.favorites.iter_mut().find(|fav| fav.id == entry.id) {
                        *stale = entry;
                        updated += 1;
                    }
                }
                Err(err) => warn!(error = %err, "keeping stale favorite"),
            }
        }

        if updated > 0 {
            self.persist()?;
        }
        debug!(updated, total = self.favorites.len(), "refreshed favorites");
        Ok(updated)
    }

    fn persist(&self) -> Result<(), WildError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let snapshot = serde_json::to_string(&self.favorites)?;
        fs::write(&self.path, snapshot)?;
        Ok(())
    }
}

/// Lowers the store's loading flag when dropped, on every exit path of the
/// tracked fetch, cancellation included.
#[derive(Debug)]
pub struct LoadingGuard<'a> {
    store: &'a mut FavoritesStore,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.set_loading(false);
    }
}
