use crate::domain::ports::ProductStore;
use crate::domain::record::Product;
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;

/// Product records kept as one pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonProductStore {
    path: PathBuf,
}

impl JsonProductStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProductStore for JsonProductStore {
    async fn load_products(&self) -> Result<Vec<Product>> {
        if !self.path.exists() {
            tracing::debug!("{} does not exist, starting empty", self.path.display());
            return Ok(Vec::new());
        }
        let data = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    async fn save_products(&self, products: &[Product]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(products)?;
        fs::write(&self.path, json)?;
        tracing::debug!("Saved {} products to {}", products.len(), self.path.display());
        Ok(())
    }
}
