// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use super::EntryRef;

/// One page of the catalog listing.
///
/// `count` is the total number of entries the remote holds, not the length
/// of `results`; `next` is present exactly while more entries remain beyond
/// the requested offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<EntryRef>,
}
