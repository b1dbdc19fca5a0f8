use std::fmt;

use url::Url;

use crate::app::Result;

/// A sitemap location that passed harvesting and is queued for scraping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    url: Url,
}

impl Candidate {
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw.trim())?;
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Non-empty path segments, in order.
    pub fn segments(&self) -> Vec<&str> {
        self.url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Whether `marker` appears as a whole path segment.
    pub fn has_segment(&self, marker: &str) -> bool {
        self.segments().iter().any(|s| *s == marker)
    }

    /// The segment directly after the first occurrence of `marker`.
    pub fn segment_after(&self, marker: &str) -> Option<&str> {
        let segments = self.segments();
        let pos = segments.iter().position(|s| *s == marker)?;
        segments.get(pos + 1).copied()
    }

    pub fn last_segment(&self) -> Option<&str> {
        self.segments().last().copied()
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_skip_empty() {
        let c = Candidate::parse("https://shop.example/nl//widgets/bolt-m8/").unwrap();
        assert_eq!(c.segments(), vec!["nl", "widgets", "bolt-m8"]);
    }

    #[test]
    fn test_segment_after_marker() {
        let c = Candidate::parse("https://shop.example/nl/blog/post-1").unwrap();
        assert!(c.has_segment("nl"));
        assert_eq!(c.segment_after("nl"), Some("blog"));
        assert_eq!(c.last_segment(), Some("post-1"));
    }

    #[test]
    fn test_segment_after_marker_at_end() {
        let c = Candidate::parse("https://shop.example/products/nl").unwrap();
        assert_eq!(c.segment_after("nl"), None);
    }

    #[test]
    fn test_marker_must_be_whole_segment() {
        let c = Candidate::parse("https://shop.example/nlx/bolt").unwrap();
        assert!(!c.has_segment("nl"));
    }

    #[test]
    fn test_parse_rejects_relative() {
        assert!(Candidate::parse("/nl/bolt").is_err());
    }
}
