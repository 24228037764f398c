//! Persisted product shape. Field names follow the stored documents exactly.

use crate::domain::model::{CompatibilityEntry, CustomField, YearRange};
use crate::utils::error::{FitmentError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCompatibility {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year_start: String,
    #[serde(default)]
    pub year_end: String,
    #[serde(default)]
    pub key_types: Vec<String>,
}

impl SelectedCompatibility {
    pub fn from_entry(entry: &CompatibilityEntry, key_types: &[String]) -> Self {
        let (year_start, year_end) = match entry.year_range {
            Some(range) => (range.start().to_string(), range.end().to_string()),
            None => (String::new(), String::new()),
        };
        Self {
            brand: entry.make.clone(),
            model: entry.model.clone().unwrap_or_default(),
            year_start,
            year_end,
            key_types: key_types.to_vec(),
        }
    }

    /// One empty year bound means a single model year.
    pub fn to_entry(&self) -> Result<CompatibilityEntry> {
        if self.brand.trim().is_empty() {
            return Err(FitmentError::InvalidRecord {
                message: "stored compatibility has an empty brand".to_string(),
            });
        }

        let start = self.year_start.trim();
        let end = self.year_end.trim();
        let year_range = match (start.is_empty(), end.is_empty()) {
            (true, true) => None,
            (false, true) => Some(start.parse::<YearRange>()?),
            (true, false) => Some(end.parse::<YearRange>()?),
            (false, false) => Some(format!("{}-{}", start, end).parse::<YearRange>()?),
        };

        Ok(CompatibilityEntry::new(
            self.brand.clone(),
            Some(self.model.clone()),
            year_range,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub selected_compatibility: Vec<SelectedCompatibility>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomField>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Unreadable stored rows are skipped so one bad row does not hide the product.
    pub fn compatibility_entries(&self) -> Vec<CompatibilityEntry> {
        self.selected_compatibility
            .iter()
            .filter_map(|row| match row.to_entry() {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping compatibility row on product {}: {}", self.id, e);
                    None
                }
            })
            .collect()
    }

    /// Rows whose entry survives the edit are written back untouched, so only new
    /// entries receive `key_types`. Stored rows that cannot be read are carried over
    /// as they are.
    pub fn set_compatibility(&mut self, entries: &[CompatibilityEntry], key_types: &[String]) {
        let previous = std::mem::take(&mut self.selected_compatibility);
        let mut kept: Vec<Option<CompatibilityEntry>> =
            previous.iter().map(|row| row.to_entry().ok()).collect();

        let mut rows: Vec<SelectedCompatibility> = entries
            .iter()
            .map(|entry| {
                match kept.iter().position(|old| old.as_ref() == Some(entry)) {
                    Some(index) => {
                        kept[index] = None;
                        previous[index].clone()
                    }
                    None => SelectedCompatibility::from_entry(entry, key_types),
                }
            })
            .collect();

        let unreadable = previous.iter().filter(|row| row.to_entry().is_err());
        for row in unreadable {
            tracing::debug!("Keeping unreadable compatibility row on product {}", self.id);
            rows.push(row.clone());
        }

        self.selected_compatibility = rows;
    }
}
