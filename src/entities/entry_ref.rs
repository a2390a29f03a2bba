// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

/// Lightweight `{name, url}` reference to a catalog entry, as carried by
/// listing pages and by nested fields of a full entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRef {
    pub name: String,
    pub url: String,
}
