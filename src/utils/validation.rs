use crate::utils::error::{FitmentError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: &str, reason: impl Into<String>) -> FitmentError {
    FitmentError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Catalog endpoints are plain http(s) resources with a host. Fragments never reach
/// the server and credentials would end up in the logs, so both are refused.
pub fn validate_catalog_endpoint(field: &str, endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint).map_err(|e| invalid(field, endpoint, format!("Invalid URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(field, endpoint, format!("Unsupported URL scheme: {}", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field, endpoint, "URL has no host"));
    }
    if url.fragment().is_some() {
        return Err(invalid(field, endpoint, "URL fragment is not allowed"));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid(field, endpoint, "credentials belong in the environment, not the URL"));
    }
    Ok(())
}

/// Catalog and product files are JSON documents.
pub fn validate_json_path(field: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field, path, "Path contains null bytes"));
    }

    let is_json = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(invalid(field, path, "expected a .json file"));
    }
    Ok(())
}

pub fn validate_key_types(field: &str, key_types: &[String]) -> Result<()> {
    for (index, key_type) in key_types.iter().enumerate() {
        if key_type.trim().is_empty() {
            return Err(invalid(field, key_type, "key type cannot be blank"));
        }
        if key_types[..index].contains(key_type) {
            return Err(invalid(field, key_type, "key type is listed twice"));
        }
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field,
            &value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
