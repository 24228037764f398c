use crate::domain::model::YearRange;
use crate::domain::ports::RawCatalog;
use std::collections::BTreeMap;

type ModelRanges = BTreeMap<String, Vec<YearRange>>;

/// Read-only lookup of canonical year ranges per make and model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityCatalog {
    makes: BTreeMap<String, ModelRanges>,
}

impl CompatibilityCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Unparseable and repeated range strings are dropped. Names that collide once
    /// trimmed are merged.
    pub fn from_raw(raw: &RawCatalog) -> Self {
        let mut makes: BTreeMap<String, ModelRanges> = BTreeMap::new();

        for (make, models) in raw {
            let make = make.trim();
            if make.is_empty() {
                tracing::warn!("Catalog contains a make with an empty name, skipping");
                continue;
            }

            if makes.contains_key(make) {
                tracing::warn!("Catalog make {:?} appears more than once after trimming, merging", make);
            }
            let parsed_models = makes.entry(make.to_string()).or_default();
            for (model, ranges) in models {
                let model = model.trim();
                if model.is_empty() {
                    tracing::warn!("Catalog make {} has a model with an empty name, skipping", make);
                    continue;
                }

                let parsed = parsed_models.entry(model.to_string()).or_default();
                for raw_range in ranges {
                    match raw_range.parse::<YearRange>() {
                        Ok(range) if !parsed.contains(&range) => parsed.push(range),
                        Ok(_) => {}
                        Err(e) => tracing::warn!("Catalog {} {}: {}", make, model, e),
                    }
                }
            }
        }

        Self { makes }
    }

    pub fn is_empty(&self) -> bool {
        self.makes.is_empty()
    }

    pub fn make_count(&self) -> usize {
        self.makes.len()
    }

    pub fn model_count(&self) -> usize {
        self.makes.values().map(BTreeMap::len).sum()
    }

    pub fn makes(&self) -> impl Iterator<Item = &str> {
        self.makes.keys().map(String::as_str)
    }

    pub fn models(&self, make: &str) -> impl Iterator<Item = &str> {
        self.makes
            .get(make)
            .into_iter()
            .flat_map(|models| models.keys().map(String::as_str))
    }

    pub fn year_ranges(&self, make: &str, model: &str) -> &[YearRange] {
        self.makes
            .get(make)
            .and_then(|models| models.get(model))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &ModelRanges)> {
        self.makes.iter().map(|(make, models)| (make.as_str(), models))
    }
}
