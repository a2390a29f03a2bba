// SPDX-License-Identifier: GPL-3.0-only

//! Core client for browsing a creature-catalog service: normalized API
//! access, accumulating listing queries, cached single-entry lookups and a
//! persisted favorites list. UI layers consume this crate; nothing here
//! renders anything.

pub mod api;
pub mod case;
pub mod config;
pub mod entities;
pub mod error;
pub mod favorites;
pub mod http;
pub mod query;
pub mod utils;

pub use api::CatalogApi;
pub use config::WildConfig;
pub use entities::{CatalogEntry, CatalogPage, EntryRef};
pub use error::WildError;
pub use favorites::{FavoritesStore, LoadingGuard};
pub use http::HttpClient;
pub use query::{EntryQuery, EntryState, PagedQuery, STALE_AFTER, fetch_entry_tracked};

/// Application identifier, used for on-disk config and data paths.
pub const APP_ID: &str = "dev.wilddex.WildDex";
