//! Custom-field label normalization.
//!
//! Supplier text labels its lists in many ways ("Works on these vehicles",
//! "Compatible models", "FITS:"). Labels are routed into a small set of buckets by an
//! ordered rule table; the first rule whose predicate accepts the lowercased label wins.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelBucket {
    Buttons,
    OemPartNumbers,
    VehicleModels,
}

impl LabelBucket {
    pub fn canonical_label(&self) -> &'static str {
        match self {
            LabelBucket::Buttons => "BUTTONS",
            LabelBucket::OemPartNumbers => "OEM PART NUMBERS",
            LabelBucket::VehicleModels => "WORKS ON THE FOLLOWING MODELS",
        }
    }
}

impl fmt::Display for LabelBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_label())
    }
}

type LabelPredicate = fn(&str) -> bool;

fn mentions_any(label: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| label.contains(k))
}

fn is_buttons(label: &str) -> bool {
    mentions_any(label, &["button"])
}

fn is_part_numbers(label: &str) -> bool {
    mentions_any(label, &["oem", "part number", "part no", "p/n", "part #"])
}

fn is_vehicle_models(label: &str) -> bool {
    mentions_any(label, &["model", "vehicle", "works on", "fits", "compatib"])
}

/// Evaluated top to bottom.
const LABEL_RULES: &[(LabelPredicate, LabelBucket)] = &[
    (is_buttons, LabelBucket::Buttons),
    (is_part_numbers, LabelBucket::OemPartNumbers),
    (is_vehicle_models, LabelBucket::VehicleModels),
];

pub fn classify_label(label: &str) -> Option<LabelBucket> {
    let lowered = label.to_lowercase();
    LABEL_RULES
        .iter()
        .find(|(accepts, _)| accepts(&lowered))
        .map(|(_, bucket)| *bucket)
}

/// Canonical label for bucketed labels, otherwise the trimmed original.
pub fn normalize_label(label: &str) -> String {
    let trimmed = label.trim().trim_end_matches(':').trim();
    match classify_label(trimmed) {
        Some(bucket) => bucket.canonical_label().to_string(),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_label() {
        assert_eq!(classify_label("Remote Buttons"), Some(LabelBucket::Buttons));
        assert_eq!(classify_label("OEM #"), Some(LabelBucket::OemPartNumbers));
        assert_eq!(classify_label("Part Number(s)"), Some(LabelBucket::OemPartNumbers));
        assert_eq!(
            classify_label("WORKS ON THE FOLLOWING MODELS"),
            Some(LabelBucket::VehicleModels)
        );
        assert_eq!(classify_label("Compatible vehicles"), Some(LabelBucket::VehicleModels));
        assert_eq!(classify_label("Frequency"), None);
    }

    #[test]
    fn test_rule_order_wins() {
        // Mentions both buttons and models; buttons is listed first.
        assert_eq!(classify_label("Buttons by model"), Some(LabelBucket::Buttons));
        assert_eq!(classify_label("OEM models"), Some(LabelBucket::OemPartNumbers));
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Number of buttons: "), "BUTTONS");
        assert_eq!(normalize_label("Frequency:"), "Frequency");
    }
}
