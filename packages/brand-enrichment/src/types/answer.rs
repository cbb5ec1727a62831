//! Structured fields pulled from a model answer.

/// Value the model is told to answer with when no brand can be determined.
pub const NO_MATCH: &str = "該当なし";

/// Brand, manufacturer and rationale inferred for one row.
///
/// Every field defaults to the empty string when the answer omits it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    pub brand: String,
    pub manufacturer: String,
    pub rationale: String,
}

impl ParsedFields {
    pub fn new(
        brand: impl Into<String>,
        manufacturer: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            brand: brand.into(),
            manufacturer: manufacturer.into(),
            rationale: rationale.into(),
        }
    }

    /// True when no usable brand was inferred (blank or the no-match value).
    pub fn brand_missing(&self) -> bool {
        let brand = self.brand.trim();
        brand.is_empty() || brand == NO_MATCH
    }

    /// Canonical three-line answer text, the same shape the model is asked for.
    pub fn to_answer_text(&self) -> String {
        format!(
            "ブランド：{}\nメーカー：{}\n理由：{}",
            self.brand, self.manufacturer, self.rationale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_missing() {
        assert!(ParsedFields::default().brand_missing());
        assert!(ParsedFields::new(NO_MATCH, "", "").brand_missing());
        assert!(ParsedFields::new("  ", "MakerY", "").brand_missing());
        assert!(!ParsedFields::new("BrandX", "", "").brand_missing());
    }

    #[test]
    fn test_answer_text_shape() {
        let fields = ParsedFields::new("BrandX", "MakerY", "公式サイト記載");
        assert_eq!(
            fields.to_answer_text(),
            "ブランド：BrandX\nメーカー：MakerY\n理由：公式サイト記載"
        );
    }
}
