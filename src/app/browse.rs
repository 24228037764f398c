use crate::app::session::{CatalogSession, CatalogState};
use crate::core::filter::filter_products;
use crate::domain::query::CompatibilityQuery;
use crate::domain::record::Product;

/// Result of filtering the storefront by vehicle.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseOutcome<'a> {
    Matches(Vec<&'a Product>),
    /// Nothing fits; the data was there to check against.
    NoMatches,
    /// The query needs a make before anything can be filtered.
    MissingMake,
    /// Compatibility data could not be loaded for this session.
    CatalogUnavailable { reason: String },
}

/// Filters `products` for the storefront. The catalog only decides whether
/// compatibility data is available; matching uses the products' stored entries.
pub fn browse<'a>(
    session: &CatalogSession,
    query: &CompatibilityQuery,
    products: &'a [Product],
) -> BrowseOutcome<'a> {
    if let CatalogState::Unavailable { reason } = session.state() {
        return BrowseOutcome::CatalogUnavailable {
            reason: reason.clone(),
        };
    }

    if query.make.is_none() {
        return BrowseOutcome::MissingMake;
    }

    let found = filter_products(query, products);
    tracing::debug!("{} of {} products match {:?}", found.len(), products.len(), query);
    if found.is_empty() {
        BrowseOutcome::NoMatches
    } else {
        BrowseOutcome::Matches(found)
    }
}
