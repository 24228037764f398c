use crate::core::extractor::{split_lines, YEAR_PATTERN};
use crate::core::labels::classify_label;
use once_cell::sync::Lazy;
use regex::Regex;

/// `Label:` or `Label: inline value`. Candidate only, see [`as_label`].
static LABEL_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^\d:]{2,60}):\s*(.*)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledSection {
    pub label: String,
    pub values: Vec<String>,
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(['-', '–', '·']).trim()
}

/// A known label always starts a section. Any other candidate whose value holds a
/// year, as in "Ford Explorer: 2015-2020", is a vehicle line.
fn as_label(line: &str) -> Option<(String, &str)> {
    let caps = LABEL_LINE.captures(line)?;
    let label = caps.get(1)?.as_str().trim();
    let rest = caps.get(2)?.as_str();
    if classify_label(label).is_none() && YEAR_PATTERN.is_match(rest) {
        return None;
    }
    Some((label.to_string(), rest))
}

/// Groups supplier text into labeled value lists. Lines before the first label are
/// not part of any section.
pub fn extract_custom_fields(text: &str) -> Vec<LabeledSection> {
    let mut sections: Vec<LabeledSection> = Vec::new();

    for line in split_lines(text) {
        if let Some((label, rest)) = as_label(line) {
            let inline = strip_bullet(rest);
            let mut values = Vec::new();
            if !inline.is_empty() {
                values.push(inline.to_string());
            }
            sections.push(LabeledSection { label, values });
            continue;
        }

        match sections.last_mut() {
            Some(section) => {
                let value = strip_bullet(line);
                if !value.is_empty() {
                    section.values.push(value.to_string());
                }
            }
            None => tracing::trace!("Unlabeled line ignored for custom fields: {:?}", line),
        }
    }

    sections.retain(|section| !section.values.is_empty());
    sections
}
