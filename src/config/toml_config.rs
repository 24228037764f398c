use crate::adapters::{FileCatalogProvider, HttpCatalogProvider};
use crate::domain::ports::CatalogProvider;
use crate::utils::error::{FitmentError, Result};
use crate::utils::validation::{
    validate_catalog_endpoint, validate_json_path, validate_key_types, validate_range, Validate,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

static ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FitmentConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub products: ProductsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub endpoint: Option<String>,
    pub path: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductsConfig {
    pub path: Option<String>,
    pub default_key_types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl FitmentConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FitmentError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FitmentError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.timeout_seconds.unwrap_or(10))
    }

    pub fn retry_attempts(&self) -> u32 {
        self.catalog.retry_attempts.unwrap_or(2)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.catalog.retry_delay_ms.unwrap_or(500))
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }

    pub fn default_key_types(&self) -> &[String] {
        self.products.default_key_types.as_deref().unwrap_or(&[])
    }

    /// Builds the configured catalog source: the HTTP endpoint, else the local file.
    pub fn catalog_provider(&self) -> Result<Box<dyn CatalogProvider>> {
        if let Some(endpoint) = &self.catalog.endpoint {
            let provider = HttpCatalogProvider::with_options(
                endpoint.clone(),
                self.timeout(),
                self.retry_attempts(),
                self.retry_delay(),
            )?;
            return Ok(Box::new(provider));
        }

        if let Some(path) = &self.catalog.path {
            return Ok(Box::new(FileCatalogProvider::new(path)));
        }

        Err(FitmentError::MissingConfigError {
            field: "catalog.endpoint or catalog.path".to_string(),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(endpoint) = &self.catalog.endpoint {
            validate_catalog_endpoint("catalog.endpoint", endpoint)?;
        }
        if let Some(path) = &self.catalog.path {
            validate_json_path("catalog.path", path)?;
        }
        if self.catalog.endpoint.is_some() && self.catalog.path.is_some() {
            return Err(FitmentError::ConfigValidationError {
                field: "catalog".to_string(),
                message: "set either endpoint or path, not both".to_string(),
            });
        }
        if let Some(timeout) = self.catalog.timeout_seconds {
            validate_range("catalog.timeout_seconds", timeout, 1, 300)?;
        }
        if let Some(retries) = self.catalog.retry_attempts {
            validate_range("catalog.retry_attempts", retries, 0, 10)?;
        }
        if let Some(path) = &self.products.path {
            validate_json_path("products.path", path)?;
        }
        if let Some(key_types) = &self.products.default_key_types {
            validate_key_types("products.default_key_types", key_types)?;
        }
        Ok(())
    }
}

impl Validate for FitmentConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let config = FitmentConfig::from_toml_str(
            r#"
[catalog]
endpoint = "https://catalog.example.com/vehicles"
timeout_seconds = 5
retry_attempts = 1

[products]
path = "./products.json"
default_key_types = ["Smart Key"]

[logging]
json = true
"#,
        )
        .unwrap();

        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.retry_attempts(), 1);
        assert_eq!(config.retry_delay(), Duration::from_millis(500));
        assert_eq!(config.default_key_types(), &["Smart Key".to_string()]);
        assert!(config.json_logs());
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
        assert_eq!(
            config.catalog_provider().unwrap().describe(),
            "https://catalog.example.com/vehicles"
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FitmentConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.catalog_provider(),
            Err(FitmentError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FITMENT_TEST_CATALOG_PATH", "/srv/catalog.json");
        let config = FitmentConfig::from_toml_str(
            r#"
[catalog]
path = "${FITMENT_TEST_CATALOG_PATH}"
"#,
        )
        .unwrap();
        assert_eq!(config.catalog.path.as_deref(), Some("/srv/catalog.json"));
        std::env::remove_var("FITMENT_TEST_CATALOG_PATH");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = FitmentConfig::from_toml_str("[catalog]\nendpoint = \"not-a-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let both = FitmentConfig::from_toml_str(
            "[catalog]\nendpoint = \"https://a.example\"\npath = \"./c.json\"\n",
        )
        .unwrap();
        assert!(both.validate().is_err());

        let slow = FitmentConfig::from_toml_str("[catalog]\ntimeout_seconds = 0\n").unwrap();
        assert!(slow.validate().is_err());

        let not_json = FitmentConfig::from_toml_str("[products]\npath = \"./products.csv\"\n").unwrap();
        assert!(not_json.validate().is_err());

        let repeated = FitmentConfig::from_toml_str(
            "[products]\ndefault_key_types = [\"Remote\", \"Remote\"]\n",
        )
        .unwrap();
        assert!(repeated.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[catalog]\npath = \"./catalog.json\"\n")
            .unwrap();

        let config = FitmentConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.catalog_provider().unwrap().describe(), "./catalog.json");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            FitmentConfig::from_toml_str("[catalog\n"),
            Err(FitmentError::ConfigError { .. })
        ));
    }
}
