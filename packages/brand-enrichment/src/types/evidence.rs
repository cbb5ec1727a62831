//! Evidence gathered from web search.

/// Prefix of an evidence summary that stands in for a failed retrieval.
pub const ERROR_MARKER: &str = "[ERROR]";

/// A single search result as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

impl SearchHit {
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            link: link.into(),
        }
    }
}

/// Evidence for one query: a text summary plus up to a few source links.
///
/// A failed retrieval is carried in-band: the summary starts with
/// [`ERROR_MARKER`] and there are no links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceResult {
    pub summary: String,
    pub source_links: Vec<String>,
}

impl EvidenceResult {
    pub fn new(summary: impl Into<String>, source_links: Vec<String>) -> Self {
        Self {
            summary: summary.into(),
            source_links,
        }
    }

    /// The sentinel for a retrieval that could not produce evidence.
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self {
            summary: format!("{} {}", ERROR_MARKER, reason),
            source_links: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.summary.starts_with(ERROR_MARKER)
    }

    /// Source links joined with commas, as written to the output table.
    pub fn links_joined(&self) -> String {
        self.source_links.join(",")
    }

    /// Summary cut to at most `max_chars` characters.
    pub fn summary_truncated(&self, max_chars: usize) -> &str {
        truncate_chars(&self.summary, max_chars)
    }
}

/// Cut `s` to at most `max_chars` characters (not bytes).
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
