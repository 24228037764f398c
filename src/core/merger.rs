use crate::core::labels::normalize_label;
use crate::domain::model::{CompatibilityEntry, CustomField};

/// `existing` followed by each incoming entry not already present.
pub fn merge_entries(
    existing: &[CompatibilityEntry],
    incoming: &[CompatibilityEntry],
) -> Vec<CompatibilityEntry> {
    let mut merged = existing.to_vec();
    for entry in incoming {
        if !merged.contains(entry) {
            merged.push(entry.clone());
        }
    }
    merged
}

fn push_unique_lines<'a>(lines: &mut Vec<String>, values: impl IntoIterator<Item = &'a str>) {
    for line in values
        .into_iter()
        .flat_map(str::lines)
        .map(str::trim)
        .filter(|l| !l.is_empty())
    {
        if !lines.iter().any(|seen| seen == line) {
            lines.push(line.to_string());
        }
    }
}

/// Merges `values` into the field whose normalized label matches `label`
/// case-insensitively, or appends a new field.
pub fn merge_custom_field(
    existing: &[CustomField],
    label: &str,
    values: &[String],
) -> Vec<CustomField> {
    let label = normalize_label(label);
    let mut fields = existing.to_vec();

    let wanted = label.to_lowercase();
    match fields
        .iter_mut()
        .find(|field| normalize_label(&field.label).to_lowercase() == wanted)
    {
        Some(field) => {
            let mut lines = Vec::new();
            push_unique_lines(&mut lines, [field.value.as_str()]);
            push_unique_lines(&mut lines, values.iter().map(String::as_str));
            field.value = lines.join("\n");
        }
        None => {
            let mut lines = Vec::new();
            push_unique_lines(&mut lines, values.iter().map(String::as_str));
            if lines.is_empty() {
                tracing::debug!("No values for custom field '{}', not adding it", label);
            } else {
                fields.push(CustomField::new(label, lines.join("\n")));
            }
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(make: &str, model: &str, years: &str) -> CompatibilityEntry {
        CompatibilityEntry::exact(make, model, years.parse().unwrap())
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_merge_entries_appends_new_only() {
        let existing = vec![entry("BMW", "X3", "2004-2010")];
        let incoming = vec![
            entry("BMW", "X3", "2004-2010"),
            entry("BMW", "3-Series", "2000-2003"),
            entry("BMW", "3-Series", "2000-2003"),
        ];
        let merged = merge_entries(&existing, &incoming);
        assert_eq!(
            merged,
            vec![entry("BMW", "X3", "2004-2010"), entry("BMW", "3-Series", "2000-2003")]
        );
    }

    #[test]
    fn test_merge_entries_is_idempotent() {
        let existing = vec![CompatibilityEntry::new("Ford", None, None)];
        let incoming = vec![entry("Ford", "F-150", "2015-2020"), CompatibilityEntry::new("Ford", None, None)];
        let once = merge_entries(&existing, &incoming);
        let twice = merge_entries(&once, &incoming);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_custom_field_unions_lines() {
        let existing = vec![CustomField::new("Buttons", "Lock\nUnlock")];
        let merged = merge_custom_field(&existing, "NUMBER OF BUTTONS", &strings(&["Unlock", "Trunk\nPanic"]));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].label, "Buttons");
        assert_eq!(merged[0].value, "Lock\nUnlock\nTrunk\nPanic");
    }

    #[test]
    fn test_merge_custom_field_creates_bucketed_field() {
        let merged = merge_custom_field(&[], "Compatible vehicles:", &strings(&["BMW X3 2004-2010"]));
        assert_eq!(
            merged,
            vec![CustomField::new("WORKS ON THE FOLLOWING MODELS", "BMW X3 2004-2010")]
        );

        let merged = merge_custom_field(&merged, "Fits these models", &strings(&["BMW X5 2007"]));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].value, "BMW X3 2004-2010\nBMW X5 2007");
    }

    #[test]
    fn test_merge_custom_field_keeps_unbucketed_labels_apart() {
        let merged = merge_custom_field(&[], "Frequency", &strings(&["315 MHz"]));
        let merged = merge_custom_field(&merged, "Battery", &strings(&["CR2032"]));
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1], CustomField::new("Battery", "CR2032"));
    }

    #[test]
    fn test_merge_custom_field_matches_stored_unnormalized_label() {
        let existing = vec![CustomField::new("Remote buttons", "Lock")];
        let merged = merge_custom_field(&existing, "buttons", &strings(&["Lock", "Unlock"]));
        assert_eq!(merged, vec![CustomField::new("Remote buttons", "Lock\nUnlock")]);
    }

    #[test]
    fn test_merge_custom_field_label_case_insensitive() {
        let existing = vec![CustomField::new("battery", "CR2032")];
        let merged = merge_custom_field(&existing, "BATTERY", &strings(&["CR2025"]));
        assert_eq!(merged, vec![CustomField::new("battery", "CR2032\nCR2025")]);
    }
}
