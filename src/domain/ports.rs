use crate::domain::record::Product;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Catalog payload as served: make -> model -> canonical "YYYY-YYYY" strings.
pub type RawCatalog = BTreeMap<String, BTreeMap<String, Vec<String>>>;

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_catalog(&self) -> Result<RawCatalog>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

pub trait ProductStore: Send + Sync {
    fn load_products(&self) -> impl std::future::Future<Output = Result<Vec<Product>>> + Send;
    fn save_products(
        &self,
        products: &[Product],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
