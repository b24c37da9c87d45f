//! Workforce Insights
//!
//! Filter-and-aggregate data layer for a dashboard over Indian industrial
//! workforce statistics. Load the table once, filter it by state and
//! industry group, and reduce the filtered rows to chart series and KPI
//! summaries for a presentation layer to render.
//!
//! ```no_run
//! use std::path::Path;
//! use workforce_insights::analysis::build_summary;
//! use workforce_insights::data::{filter, shared, Selection};
//!
//! let dataset = shared(Path::new("merged_feature_engineered.csv"))?;
//! let view = filter(dataset, &Selection::all(dataset));
//! if !view.is_empty() {
//!     let summary = build_summary(&view)?;
//!     println!("{} leads with {} workers", summary.top_state.name, summary.top_state.workers);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod state;

pub use error::{DataLoadError, EmptyViewError};
