use crate::core::catalog::CompatibilityCatalog;
use crate::core::extractor::extract;
use crate::core::merger::{merge_custom_field, merge_entries};
use crate::core::sections::extract_custom_fields;
use crate::domain::model::{CompatibilityEntry, CustomField};
use crate::domain::record::Product;
use serde::Serialize;

/// What one paste of supplier text added to a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub extracted: usize,
    pub added: usize,
    pub custom_fields_touched: usize,
}

/// In-progress compatibility edits for one product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityDraft {
    entries: Vec<CompatibilityEntry>,
    custom_fields: Vec<CustomField>,
}

impl CompatibilityDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_product(product: &Product) -> Self {
        Self {
            entries: merge_entries(&[], &product.compatibility_entries()),
            custom_fields: product.custom_fields.clone(),
        }
    }

    pub fn entries(&self) -> &[CompatibilityEntry] {
        &self.entries
    }

    pub fn custom_fields(&self) -> &[CustomField] {
        &self.custom_fields
    }

    /// Manual dropdown selection.
    pub fn add_entry(&mut self, entry: CompatibilityEntry) -> bool {
        let before = self.entries.len();
        self.entries = merge_entries(&self.entries, std::slice::from_ref(&entry));
        self.entries.len() > before
    }

    pub fn remove_entry(&mut self, entry: &CompatibilityEntry) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e != entry);
        self.entries.len() < before
    }

    /// Runs extraction and custom-field sectioning over `text` and merges both results.
    /// Applying the same text again changes nothing.
    pub fn apply_supplier_text(&mut self, text: &str, catalog: &CompatibilityCatalog) -> ApplyReport {
        let extracted = extract(text, catalog);
        let before = self.entries.len();
        self.entries = merge_entries(&self.entries, &extracted);

        let sections = extract_custom_fields(text);
        for section in &sections {
            self.custom_fields = merge_custom_field(&self.custom_fields, &section.label, &section.values);
        }

        let report = ApplyReport {
            extracted: extracted.len(),
            added: self.entries.len() - before,
            custom_fields_touched: sections.len(),
        };
        tracing::info!(
            "Supplier text: {} entries extracted, {} new, {} custom fields updated",
            report.extracted,
            report.added,
            report.custom_fields_touched
        );
        report
    }

    /// Flattens the draft into the persisted record.
    pub fn save_into(&self, product: &mut Product, key_types: &[String]) {
        product.set_compatibility(&self.entries, key_types);
        product.custom_fields = self.custom_fields.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::RawCatalog;

    fn catalog() -> CompatibilityCatalog {
        let raw: RawCatalog = serde_json::from_value(serde_json::json!({
            "BMW": {"3-Series": ["2000-2003", "2004-2007"], "X3": ["2004-2010"]}
        }))
        .unwrap();
        CompatibilityCatalog::from_raw(&raw)
    }

    const SUPPLIER_TEXT: &str = "WORKS ON THE FOLLOWING MODELS:\n\
                                 * BMW 3-Series 2000-2007\n\
                                 * BMW X3 2004-2010\n\
                                 Buttons: Lock, Unlock";

    #[test]
    fn test_apply_is_idempotent() {
        let catalog = catalog();
        let mut draft = CompatibilityDraft::new();

        let first = draft.apply_supplier_text(SUPPLIER_TEXT, &catalog);
        assert_eq!(first.extracted, 3);
        assert_eq!(first.added, 3);
        let snapshot = draft.clone();

        let second = draft.apply_supplier_text(SUPPLIER_TEXT, &catalog);
        assert_eq!(second.added, 0);
        assert_eq!(draft, snapshot);
        assert_eq!(draft.custom_fields().len(), 2);
    }

    #[test]
    fn test_manual_edits() {
        let mut draft = CompatibilityDraft::new();
        let ford = CompatibilityEntry::new("Ford", None, None);
        assert!(draft.add_entry(ford.clone()));
        assert!(!draft.add_entry(ford.clone()));
        assert!(draft.remove_entry(&ford));
        assert!(draft.entries().is_empty());
    }

    #[test]
    fn test_save_into_product() {
        let mut product: Product =
            serde_json::from_value(serde_json::json!({"id": "p-9", "name": "BMW Key"})).unwrap();
        let mut draft = CompatibilityDraft::from_product(&product);
        draft.apply_supplier_text(SUPPLIER_TEXT, &catalog());
        draft.save_into(&mut product, &["Smart Key".to_string()]);

        assert_eq!(product.selected_compatibility.len(), 3);
        assert_eq!(product.selected_compatibility[2].year_start, "2004");
        assert_eq!(product.selected_compatibility[2].key_types, vec!["Smart Key".to_string()]);
        assert_eq!(product.custom_fields[1], CustomField::new("BUTTONS", "Lock, Unlock"));

        let reopened = CompatibilityDraft::from_product(&product);
        assert_eq!(reopened.entries(), draft.entries());
    }

    #[test]
    fn test_resave_leaves_stored_rows_alone() {
        let mut product: Product = serde_json::from_value(serde_json::json!({
            "id": "p-10",
            "selectedCompatibility": [
                {"brand": "BMW", "model": "X3", "yearStart": "2004", "yearEnd": "2010", "keyTypes": ["Flip"]},
                {"brand": "BMW", "model": "X5", "yearStart": "2010", "yearEnd": "2001", "keyTypes": []}
            ]
        }))
        .unwrap();

        let mut draft = CompatibilityDraft::from_product(&product);
        draft.apply_supplier_text("BMW 3-Series 2001", &catalog());
        draft.save_into(&mut product, &["Remote".to_string()]);

        let rows = &product.selected_compatibility;
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].model.as_str(), rows[0].key_types.clone()), ("X3", vec!["Flip".to_string()]));
        assert_eq!((rows[1].model.as_str(), rows[1].key_types.clone()), ("3-Series", vec!["Remote".to_string()]));
        assert_eq!((rows[2].model.as_str(), rows[2].year_start.as_str()), ("X5", "2010"));
    }
}
