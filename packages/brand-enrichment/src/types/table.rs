//! Input table and row types.

use std::collections::HashMap;

use crate::error::TableError;

/// Column names used by the catalog files.
pub mod columns {
    pub const UNIQUE_NAME: &str = "ユニーク名";
    pub const MODEL_NUMBER: &str = "型番";
    pub const PRODUCT_CODE: &str = "JANコード";
    pub const CATEGORY_LARGE: &str = "大カテゴリ";
    pub const CATEGORY_MEDIUM: &str = "中カテゴリ";
    pub const CATEGORY_SMALL: &str = "小カテゴリ";

    /// Every input table must carry these.
    pub const REQUIRED: [&str; 3] = [UNIQUE_NAME, MODEL_NUMBER, PRODUCT_CODE];

    /// Fields joined, in this order, into the search query.
    pub const QUERY_ORDER: [&str; 6] = [
        UNIQUE_NAME,
        MODEL_NUMBER,
        PRODUCT_CODE,
        CATEGORY_LARGE,
        CATEGORY_MEDIUM,
        CATEGORY_SMALL,
    ];

    // Reference table
    pub const BRAND_NAME: &str = "ブランド名";
    pub const MANUFACTURER_NAME: &str = "メーカー名";
    pub const BRAND_CODE: &str = "ブランドコード";
    pub const MANUFACTURER_CODE: &str = "メーカーコード";

    pub const REFERENCE_REQUIRED: [&str; 2] = [BRAND_NAME, MANUFACTURER_NAME];

    // Appended result columns, in output order
    pub const OUT_QUERY: &str = "検索クエリ";
    pub const OUT_BRAND: &str = "AIブランド";
    pub const OUT_MANUFACTURER: &str = "AIメーカー";
    pub const OUT_RATIONALE: &str = "AI理由";
    pub const OUT_SUMMARY: &str = "検索結果要約";
    pub const OUT_LINKS: &str = "参照URL";
    pub const OUT_REF_BRAND_CODE: &str = "マスタブランドコード";
    pub const OUT_REF_MANUFACTURER_CODE: &str = "マスタメーカーコード";
    pub const OUT_REF_MANUFACTURER: &str = "マスタメーカー名";
    pub const OUT_STATUS: &str = "整合性";

    pub const OUTPUT_APPENDED: [&str; 10] = [
        OUT_QUERY,
        OUT_BRAND,
        OUT_MANUFACTURER,
        OUT_RATIONALE,
        OUT_SUMMARY,
        OUT_LINKS,
        OUT_REF_BRAND_CODE,
        OUT_REF_MANUFACTURER_CODE,
        OUT_REF_MANUFACTURER,
        OUT_STATUS,
    ];
}

/// One source row: column name to string value.
///
/// Missing values read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRow {
    fields: HashMap<String, String>,
}

impl InputRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(column, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value for `column`, or `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// The unique-name field, used as the product name in prompts and logs.
    pub fn product_name(&self) -> &str {
        self.get(columns::UNIQUE_NAME)
    }
}

/// A whole input table: ordered headers plus rows.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<InputRow>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<InputRow>) -> Self {
        Self { headers, rows }
    }

    /// Build from raw records, padding short records with empty strings.
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| {
                let mut values = record.into_iter();
                InputRow::from_pairs(
                    headers
                        .iter()
                        .map(|h| (h.clone(), values.next().unwrap_or_default())),
                )
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[InputRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fail with every required column that is absent from the header row.
    pub fn require_columns(&self, required: &[&str]) -> Result<(), TableError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|col| !self.headers.iter().any(|h| h == *col))
            .map(|col| col.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(TableError::MissingColumns { missing })
        }
    }
}
