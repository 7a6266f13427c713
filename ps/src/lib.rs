//! ProductShelf - catalog queries and a persisted product selection
//!
//! Holds the product catalog (loaded once from a JSON document) and the
//! user's in-progress selection of products. The selection survives process
//! restarts: every mutation is written synchronously to a slot store before
//! the caller proceeds, and a missing or corrupt slot loads as an empty set.
//!
//! # Storage layout
//!
//! ```text
//! <store_path>/
//! ├── selected_products    # JSON array of Product snapshots
//! └── layout_direction     # "ltr" or "rtl"
//! ```
//!
//! # Example
//!
//! ```ignore
//! use productshelf::{Catalog, SelectionSet, SlotStore};
//!
//! let catalog = Catalog::load("products.json")?;
//! let store = SlotStore::open(".productshelf")?;
//! let mut selection = SelectionSet::load(store);
//!
//! for product in catalog.filter(Some("skincare"), Some("cleanser")) {
//!     selection.toggle(product)?;
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod selection;
pub mod storage;

pub use catalog::{Catalog, Product};
pub use selection::SelectionSet;
pub use storage::{LayoutDirection, SlotStore};

/// Slot key for the persisted selection blob
pub const SELECTION_KEY: &str = "selected_products";

/// Slot key for the layout direction preference
pub const LAYOUT_KEY: &str = "layout_direction";
