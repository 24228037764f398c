pub mod catalog;
pub mod extractor;
pub mod filter;
pub mod labels;
pub mod merger;
pub mod overlap;
pub mod sections;

pub use crate::domain::model::{CompatibilityEntry, CustomField, YearRange};
pub use crate::domain::ports::{CatalogProvider, ProductStore, RawCatalog};
pub use crate::utils::error::Result;
