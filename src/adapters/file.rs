use crate::domain::ports::{CatalogProvider, RawCatalog};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads the catalog from a JSON file in the provider's wire format.
#[derive(Debug, Clone)]
pub struct FileCatalogProvider {
    path: PathBuf,
}

impl FileCatalogProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogProvider for FileCatalogProvider {
    async fn fetch_catalog(&self) -> Result<RawCatalog> {
        let data = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&data)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a fixed catalog. Handy for tests and for embedding a snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogProvider {
    catalog: RawCatalog,
}

impl StaticCatalogProvider {
    pub fn new(catalog: RawCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalogProvider {
    async fn fetch_catalog(&self) -> Result<RawCatalog> {
        Ok(self.catalog.clone())
    }

    fn describe(&self) -> String {
        "static catalog".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FitmentError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_catalog_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"BMW": {"X3": ["2004-2010"]}}"#).unwrap();

        let provider = FileCatalogProvider::new(file.path());
        let catalog = tokio_test::block_on(provider.fetch_catalog()).unwrap();
        assert_eq!(catalog["BMW"]["X3"], vec!["2004-2010".to_string()]);
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let provider = FileCatalogProvider::new("/definitely/not/here.json");
        let err = tokio_test::block_on(provider.fetch_catalog()).unwrap_err();
        assert!(matches!(err, FitmentError::IoError(_)));

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2, 3]").unwrap();
        let provider = FileCatalogProvider::new(file.path());
        let err = tokio_test::block_on(provider.fetch_catalog()).unwrap_err();
        assert!(matches!(err, FitmentError::SerializationError(_)));
    }
}
