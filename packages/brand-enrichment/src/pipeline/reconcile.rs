//! Compare an inferred brand/manufacturer pair against the reference table.

use crate::types::answer::NO_MATCH;
use crate::types::outcome::ReconciliationStatus;
use crate::types::reference::BrandReference;

/// Classify an inferred pair. Pure and total.
///
/// The manufacturer comparison is exact: no trimming, no case folding.
/// Values are expected to have been trimmed when parsed or loaded.
pub fn reconcile(
    brand: &str,
    manufacturer: &str,
    reference: &BrandReference,
) -> ReconciliationStatus {
    if brand.is_empty() || brand == NO_MATCH {
        return ReconciliationStatus::NoBrandInferred;
    }

    match reference.get(brand) {
        None => ReconciliationStatus::NoReferenceEntry,
        Some(entry) if entry.manufacturer_name == manufacturer => ReconciliationStatus::Consistent,
        Some(_) => ReconciliationStatus::Inconsistent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> BrandReference {
        BrandReference::from_pairs([("BrandX", "MakerY")])
    }

    #[test]
    fn test_consistent() {
        assert_eq!(
            reconcile("BrandX", "MakerY", &reference()),
            ReconciliationStatus::Consistent
        );
    }

    #[test]
    fn test_inconsistent() {
        assert_eq!(
            reconcile("BrandX", "MakerZ", &reference()),
            ReconciliationStatus::Inconsistent
        );
        // exact match only
        assert_eq!(
            reconcile("BrandX", "makery", &reference()),
            ReconciliationStatus::Inconsistent
        );
    }

    #[test]
    fn test_unknown_brand_ignores_manufacturer() {
        assert_eq!(
            reconcile("BrandQ", "MakerY", &reference()),
            ReconciliationStatus::NoReferenceEntry
        );
        assert_eq!(
            reconcile("BrandQ", "", &BrandReference::new()),
            ReconciliationStatus::NoReferenceEntry
        );
    }

    #[test]
    fn test_empty_or_no_match_brand() {
        assert_eq!(reconcile("", "", &reference()), ReconciliationStatus::NoBrandInferred);
        assert_eq!(
            reconcile("", "MakerY", &reference()),
            ReconciliationStatus::NoBrandInferred
        );
        assert_eq!(
            reconcile(NO_MATCH, "MakerY", &reference()),
            ReconciliationStatus::NoBrandInferred
        );
    }
}
