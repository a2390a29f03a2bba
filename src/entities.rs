// SPDX-License-Identifier: GPL-3.0-only

mod catalog_entry;
mod catalog_page;
mod entry_ref;

pub use catalog_entry::CatalogEntry;
pub use catalog_entry::EntryAbility;
pub use catalog_entry::EntryMove;
pub use catalog_entry::EntrySprites;
pub use catalog_entry::EntryStat;
pub use catalog_entry::EntryTypeSlot;
pub use catalog_page::CatalogPage;
pub use entry_ref::EntryRef;
