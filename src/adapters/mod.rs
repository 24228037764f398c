// Adapters layer: concrete catalog providers and product storage.

pub mod file;
pub mod http;
pub mod storage;

pub use file::{FileCatalogProvider, StaticCatalogProvider};
pub use http::HttpCatalogProvider;
pub use storage::JsonProductStore;
