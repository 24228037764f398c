use crate::domain::model::YearRange;
use crate::utils::error::{FitmentError, Result};
use serde::{Deserialize, Serialize};

/// A storefront vehicle selection. Blank strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityQuery {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year_range: Option<YearRange>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl CompatibilityQuery {
    pub fn make(make: &str) -> Self {
        Self {
            make: non_blank(Some(make)),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = non_blank(Some(model));
        self
    }

    pub fn with_year_range(mut self, year_range: YearRange) -> Self {
        self.year_range = Some(year_range);
        self
    }

    /// Builds a query from raw parameter values; a present but malformed year is an error.
    pub fn from_parts(make: Option<&str>, model: Option<&str>, year_range: Option<&str>) -> Result<Self> {
        let year_range = match non_blank(year_range) {
            Some(raw) => Some(raw.parse::<YearRange>().map_err(|e| FitmentError::InvalidQuery {
                message: format!("yearRange: {}", e),
            })?),
            None => None,
        };

        Ok(Self {
            make: non_blank(make),
            model: non_blank(model),
            year_range,
        })
    }

    /// Parses `make=...&model=...&yearRange=...` (a leading `?` is allowed).
    pub fn from_query_string(query: &str) -> Result<Self> {
        let query = query.trim().trim_start_matches('?');
        let mut make = None;
        let mut model = None;
        let mut year_range = None;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "make" => make = Some(value.into_owned()),
                "model" => model = Some(value.into_owned()),
                "yearRange" | "year_range" | "year" => year_range = Some(value.into_owned()),
                other => tracing::debug!("Ignoring query parameter '{}'", other),
            }
        }

        Self::from_parts(make.as_deref(), model.as_deref(), year_range.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.make.is_none() && self.model.is_none() && self.year_range.is_none()
    }
}
