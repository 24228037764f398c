use crate::core::overlap::overlaps;
use crate::domain::model::CompatibilityEntry;
use crate::domain::query::CompatibilityQuery;
use crate::domain::record::Product;

fn entry_matches(query: &CompatibilityQuery, make: &str, entry: &CompatibilityEntry) -> bool {
    if entry.make != make {
        return false;
    }

    let model_ok = match (&query.model, &entry.model) {
        (None, _) | (_, None) => true,
        (Some(wanted), Some(model)) => wanted == model,
    };

    let year_ok = match (&query.year_range, &entry.year_range) {
        (None, _) | (_, None) => true,
        (Some(wanted), Some(years)) => overlaps(wanted, years),
    };

    model_ok && year_ok
}

/// Whether any entry satisfies the query. The more fields the query sets, the more
/// each entry must agree on; universal entry fields agree with anything. A query
/// without a make matches nothing.
pub fn matches(query: &CompatibilityQuery, entries: &[CompatibilityEntry]) -> bool {
    let Some(make) = query.make.as_deref() else {
        return false;
    };
    entries.iter().any(|entry| entry_matches(query, make, entry))
}

/// Products whose stored compatibility satisfies the query, in input order.
pub fn filter_products<'a>(query: &CompatibilityQuery, products: &'a [Product]) -> Vec<&'a Product> {
    if query.make.is_none() {
        tracing::debug!("Query without a make matches no products");
        return Vec::new();
    }
    products
        .iter()
        .filter(|product| matches(query, &product.compatibility_entries()))
        .collect()
}
