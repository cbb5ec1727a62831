//! Authoritative brand → manufacturer reference table.

use std::collections::HashMap;

/// Reference data for one brand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandEntry {
    pub brand_code: String,
    pub manufacturer_code: String,
    pub manufacturer_name: String,
}

impl BrandEntry {
    /// Entry without codes (brand name → manufacturer name only).
    pub fn named(manufacturer_name: impl Into<String>) -> Self {
        Self {
            manufacturer_name: manufacturer_name.into(),
            ..Default::default()
        }
    }
}

/// Brand name → reference entry. Held in memory for the session.
#[derive(Debug, Clone, Default)]
pub struct BrandReference {
    entries: HashMap<String, BrandEntry>,
}

impl BrandReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simple variant: brand name → manufacturer name.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut reference = Self::new();
        for (brand, manufacturer) in pairs {
            reference.insert(brand, BrandEntry::named(manufacturer));
        }
        reference
    }

    /// Insert or replace the entry for `brand`. Later rows win.
    pub fn insert(&mut self, brand: impl Into<String>, entry: BrandEntry) {
        self.entries.insert(brand.into(), entry);
    }

    pub fn get(&self, brand: &str) -> Option<&BrandEntry> {
        self.entries.get(brand)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_lookup() {
        let reference = BrandReference::from_pairs([("BrandX", "MakerY")]);
        assert_eq!(reference.len(), 1);
        assert_eq!(reference.get("BrandX").unwrap().manufacturer_name, "MakerY");
        assert!(reference.get("brandx").is_none());
    }

    #[test]
    fn test_later_insert_replaces() {
        let mut reference = BrandReference::new();
        reference.insert("BrandX", BrandEntry::named("Old"));
        reference.insert("BrandX", BrandEntry::named("New"));
        assert_eq!(reference.len(), 1);
        assert_eq!(reference.get("BrandX").unwrap().manufacturer_name, "New");
    }
}
