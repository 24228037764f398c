use crate::domain::model::YearRange;

/// Closed-interval intersection test.
pub fn overlaps(a: &YearRange, b: &YearRange) -> bool {
    a.start() <= b.end() && a.end() >= b.start()
}

/// Every candidate that intersects `target`, in candidate order.
pub fn resolve_overlapping(target: &YearRange, candidates: &[YearRange]) -> Vec<YearRange> {
    candidates
        .iter()
        .filter(|candidate| overlaps(target, candidate))
        .copied()
        .collect()
}
