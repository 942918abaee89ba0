//! huaming-core — the flower catalog pipeline.
//!
//! Every stage is a pure function of its inputs; the adapters (`huaming-tui`
//! and the headless CLI) own the [`Selection`] and rebuild a [`CatalogView`]
//! after each change.
//!
//! # Architecture
//!
//! ```text
//! Loader ──► merge ──► Filter ──► Grouper/Sorter ──► Highlighter ──► adapters
//!                        ▲                                              │
//!                        └────────── PreferenceStore ◄──────────────────┘
//! ```

pub mod catalog_md;
pub mod config;
pub mod detail;
pub mod error;
pub mod filter;
pub mod group;
pub mod highlight;
pub mod loader;
pub mod prefs;
pub mod search;
pub mod selection;
pub mod types;
pub mod validate;
pub mod view;

pub use detail::RecordDetail;
pub use error::{CatalogError, Result};
pub use highlight::{Highlighter, Segment};
pub use loader::Dataset;
pub use prefs::{FileStore, KeyValueStore, MemoryStore, NoStore, PreferenceStore};
pub use selection::{Choice, FilterOptions, Selection, SortMode, Toggle};
pub use types::{BaseRecord, MetaRecord, Record};
pub use validate::{validate, ValidationReport};
pub use view::{CatalogView, DisplayGroup, MetaProgress};
