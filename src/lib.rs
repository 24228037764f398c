pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::FitmentConfig;

pub use adapters::{FileCatalogProvider, HttpCatalogProvider, JsonProductStore, StaticCatalogProvider};
pub use app::{browse, BrowseOutcome, CatalogSession, CatalogState, CompatibilityDraft};
pub use crate::core::catalog::CompatibilityCatalog;
pub use crate::core::extractor::extract;
pub use crate::core::filter::{filter_products, matches};
pub use crate::core::merger::{merge_custom_field, merge_entries};
pub use crate::core::overlap::{overlaps, resolve_overlapping};
pub use domain::model::{CompatibilityEntry, CustomField, YearRange};
pub use domain::query::CompatibilityQuery;
pub use domain::record::{Product, SelectedCompatibility};
pub use utils::error::{FitmentError, Result};
