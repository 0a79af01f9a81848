// Asset reference rewriting for the merged output tree

pub mod assets;
pub mod entry;
pub mod reference;

pub use assets::{rewrite_asset_html, rewrite_asset_paths, rewrite_asset_reference};
pub use entry::{EntryReference, EntryRule, rewrite_entry, rewrite_entry_html};
pub use reference::rewrite_references;
