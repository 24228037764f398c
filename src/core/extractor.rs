use crate::core::catalog::CompatibilityCatalog;
use crate::core::overlap::resolve_overlapping;
use crate::domain::model::{CompatibilityEntry, YearRange};
use once_cell::sync::Lazy;
use regex::Regex;

/// A four-digit year, optionally followed by a dash and a second year.
pub(crate) static YEAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})(?:\s*[-–]\s*(\d{4}))?\b").unwrap());

/// Splits supplier text on newlines and bullet characters, dropping blank lines.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\n', '*', '•'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Year expressions in `line`. Malformed ones (e.g. inverted ranges) are skipped.
pub fn year_expressions(line: &str) -> Vec<YearRange> {
    YEAR_PATTERN
        .find_iter(line)
        .filter_map(|m| match m.as_str().parse::<YearRange>() {
            Ok(range) => Some(range),
            Err(e) => {
                tracing::debug!("Skipping year expression: {}", e);
                None
            }
        })
        .collect()
}

/// Infers catalog-backed compatibility entries from free text.
///
/// Every make and model mentioned on a line is paired with every year expression on
/// the same line; each canonical range overlapping such a year becomes one entry.
/// Ambiguous lines yield all their matches. An empty catalog yields nothing.
pub fn extract(text: &str, catalog: &CompatibilityCatalog) -> Vec<CompatibilityEntry> {
    let mut entries: Vec<CompatibilityEntry> = Vec::new();
    if catalog.is_empty() {
        tracing::debug!("Catalog is empty, nothing to extract");
        return entries;
    }

    for line in split_lines(text) {
        let lowered = line.to_lowercase();
        let mut years: Option<Vec<YearRange>> = None;

        for (make, models) in catalog.entries() {
            if !lowered.contains(&make.to_lowercase()) {
                continue;
            }

            for (model, canonical) in models {
                if !lowered.contains(&model.to_lowercase()) {
                    continue;
                }

                let targets = years.get_or_insert_with(|| year_expressions(line));
                if targets.is_empty() {
                    tracing::debug!("{} {} mentioned without a year: {:?}", make, model, line);
                }

                for target in targets.iter() {
                    let resolved = resolve_overlapping(target, canonical);
                    if resolved.is_empty() {
                        tracing::debug!(
                            "No canonical range for {} {} overlaps {}",
                            make,
                            model,
                            target
                        );
                    }

                    for range in resolved {
                        let entry = CompatibilityEntry::exact(make, model, range);
                        if !entries.contains(&entry) {
                            entries.push(entry);
                        }
                    }
                }
            }
        }
    }

    tracing::debug!("Extracted {} compatibility entries", entries.len());
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::RawCatalog;

    fn catalog(json: serde_json::Value) -> CompatibilityCatalog {
        let raw: RawCatalog = serde_json::from_value(json).unwrap();
        CompatibilityCatalog::from_raw(&raw)
    }

    fn bmw_catalog() -> CompatibilityCatalog {
        catalog(serde_json::json!({
            "BMW": {"3-Series": ["2000-2003", "2004-2007"], "X3": ["2004-2010"]}
        }))
    }

    fn entry(make: &str, model: &str, years: &str) -> CompatibilityEntry {
        CompatibilityEntry::exact(make, model, years.parse().unwrap())
    }

    #[test]
    fn test_extract_spanning_ranges() {
        let entries = extract("BMW 3-Series 2000-2007\nBMW X3 2004-2010", &bmw_catalog());
        assert_eq!(
            entries,
            vec![
                entry("BMW", "3-Series", "2000-2003"),
                entry("BMW", "3-Series", "2004-2007"),
                entry("BMW", "X3", "2004-2010"),
            ]
        );
    }

    #[test]
    fn test_extract_is_case_insensitive_and_splits_bullets() {
        let entries = extract("* bmw x3 2006 * unrelated prose 2005", &bmw_catalog());
        assert_eq!(entries, vec![entry("BMW", "X3", "2004-2010")]);
    }

    #[test]
    fn test_extract_skips_duplicates_across_lines() {
        let entries = extract("BMW X3 2004\nBMW X3 2009-2010\nBMW X3 2005", &bmw_catalog());
        assert_eq!(entries, vec![entry("BMW", "X3", "2004-2010")]);
    }

    #[test]
    fn test_extract_ignores_unknown_and_malformed() {
        let entries = extract(
            "Toyota Camry 2010\nBMW X3 2010-2004\nBMW X3 1990",
            &bmw_catalog(),
        );
        assert!(entries.is_empty());
    }

    #[test]
    fn test_extract_records_ambiguous_matches() {
        let cat = catalog(serde_json::json!({
            "Mini": {"Cooper": ["2007-2013"]},
            "Mini Cooper": {"Cooper S": ["2007-2013"]}
        }));
        let entries = extract("Mini Cooper S 2010", &cat);
        assert_eq!(entries.len(), 2);
        assert!(entries.contains(&entry("Mini", "Cooper", "2007-2013")));
        assert!(entries.contains(&entry("Mini Cooper", "Cooper S", "2007-2013")));
    }

    #[test]
    fn test_extract_with_empty_catalog() {
        assert!(extract("BMW X3 2004-2010", &CompatibilityCatalog::empty()).is_empty());
    }

    #[test]
    fn test_year_expressions() {
        assert_eq!(
            year_expressions("fits 2000 - 2003, 2005 and 12345"),
            vec!["2000-2003".parse().unwrap(), YearRange::single(2005)]
        );
    }

    #[test]
    fn test_extract_is_deterministic() {
        let text = "BMW 3-Series 2001\n* BMW X3 2004-2010 * BMW 3-Series 2006";
        let cat = bmw_catalog();
        assert_eq!(extract(text, &cat), extract(text, &cat));
    }
}
