// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::EntryRef;
use crate::utils::{capitalize_string, scale_number};

/// One full creature record as the remote reports it, with keys already
/// normalized to camelCase.
///
/// Immutable once fetched; identified by its unique integer `id` and unique
/// `name`. Deep vendor-specific subtrees (version sprites, cries, game
/// indices) are kept as loose JSON rather than modeled field by field.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
    pub base_experience: Option<i64>,
    pub height: i64,
    pub weight: i64,
    pub order: Option<i64>,
    pub is_default: bool,
    pub location_area_encounters: Option<String>,
    pub abilities: Vec<EntryAbility>,
    pub moves: Vec<EntryMove>,
    pub types: Vec<EntryTypeSlot>,
    pub stats: Vec<EntryStat>,
    pub forms: Vec<EntryRef>,
    pub species: Option<EntryRef>,
    pub sprites: EntrySprites,
    pub held_items: Vec<Value>,
    pub game_indices: Vec<Value>,
    pub cries: Option<Value>,
}

impl CatalogEntry {
    /// Display-ready name, e.g. `mr-mime` becomes `Mr Mime`.
    pub fn display_name(&self) -> String {
        capitalize_string(&self.name)
    }

    /// Weight in display units; the remote reports tenths.
    pub fn display_weight(&self) -> f64 {
        scale_number(self.weight)
    }

    /// Height in display units; the remote reports tenths.
    pub fn display_height(&self) -> f64 {
        scale_number(self.height)
    }

    /// Returns the total value of all base stats of the entry.
    pub fn total_base_stats(&self) -> i64 {
        self.stats.iter().map(|stat| stat.base_stat).sum()
    }

    /// Names of the entry's types, in slot order.
    pub fn type_names(&self) -> Vec<&str> {
        self.types
            .iter()
            .map(|slot| slot.type_.name.as_str())
            .collect()
    }
}

/// One ability slot of an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryAbility {
    pub ability: EntryRef,
    pub is_hidden: bool,
    pub slot: i64,
}

/// One learnable move of an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryMove {
    pub r#move: EntryRef,
}

/// One typed slot of an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryTypeSlot {
    pub slot: i64,
    #[serde(rename = "type")]
    pub type_: EntryRef,
}

/// One base stat of an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryStat {
    pub base_stat: i64,
    pub effort: i64,
    pub stat: EntryRef,
}

/// Sprite URL group of an entry.
///
/// `other` and `versions` hold per-game artwork trees the client never
/// inspects field by field.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EntrySprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
    pub front_female: Option<String>,
    pub front_shiny_female: Option<String>,
    pub back_default: Option<String>,
    pub back_shiny: Option<String>,
    pub back_female: Option<String>,
    pub back_shiny_female: Option<String>,
    pub other: Option<Value>,
    pub versions: Option<Value>,
}
