//! Domains whose search results are never used as evidence.

use crate::error::StoreError;

/// Set of domain substrings. A URL containing any of them is excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    domains: Vec<String>,
}

impl ExclusionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from domain strings; blanks are dropped, duplicates collapsed.
    pub fn from_domains<S: AsRef<str>>(domains: impl IntoIterator<Item = S>) -> Self {
        let mut list = Self::new();
        for domain in domains {
            let domain = domain.as_ref().trim();
            if !domain.is_empty() && !list.domains.iter().any(|d| d == domain) {
                list.domains.push(domain.to_string());
            }
        }
        list
    }

    /// Parse the stored CSV form: a header row, then one domain per row in
    /// the first column. Extra columns are ignored.
    pub fn from_csv(content: &str) -> Result<Self, StoreError> {
        let content = content.trim_start_matches('\u{feff}');
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut domains = Vec::new();
        for record in reader.records() {
            let record = record?;
            if let Some(first) = record.get(0) {
                domains.push(first.to_string());
            }
        }
        Ok(Self::from_domains(domains))
    }

    /// True when `url` contains any excluded domain.
    pub fn excludes(&self, url: &str) -> bool {
        self.domains.iter().any(|d| url.contains(d.as_str()))
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv_reads_first_column_after_header() {
        let list = ExclusionList::from_csv("domain,note\namazon.co.jp,marketplace\n\nrakuten.co.jp,\n")
            .unwrap();
        assert_eq!(list.domains(), &["amazon.co.jp", "rakuten.co.jp"]);
    }

    #[test]
    fn test_from_csv_strips_bom() {
        let list = ExclusionList::from_csv("\u{feff}domain\nexample.com\n").unwrap();
        assert_eq!(list.domains(), &["example.com"]);
    }

    #[test]
    fn test_excludes_by_substring() {
        let list = ExclusionList::from_domains(["amazon.co.jp", " ", "amazon.co.jp"]);
        assert_eq!(list.len(), 1);
        assert!(list.excludes("https://www.amazon.co.jp/dp/B000"));
        assert!(!list.excludes("https://www.kao.co.jp/attack/"));
    }

    #[test]
    fn test_empty_list_excludes_nothing() {
        assert!(!ExclusionList::new().excludes("https://anything.example"));
    }
}
