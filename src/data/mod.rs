/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  store    │  load once, share read-only
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Selection → FilteredView
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod store;

pub use filter::{filter, FilteredView, Selection};
pub use loader::load;
pub use model::{Dataset, NumericField, WorkforceRecord};
pub use store::{shared, DataStore};
