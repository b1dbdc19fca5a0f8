/// Placeholder written wherever a field could not be extracted.
pub const ABSENT_MARKER: &str = "N/A";

/// One product scraped from a page.
///
/// Missing fields are `None`; the `display_*` accessors substitute
/// [`ABSENT_MARKER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub code: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_link: Option<String>,
    pub pdf_link: Option<String>,
    /// The page the fields were read from; the localized alternate when one was loaded.
    pub source_url: String,
}

impl ProductRecord {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            code: None,
            title: None,
            description: None,
            image_link: None,
            pdf_link: None,
            source_url: source_url.into(),
        }
    }

    pub fn display_code(&self) -> &str {
        self.code.as_deref().unwrap_or(ABSENT_MARKER)
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(ABSENT_MARKER)
    }

    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or(ABSENT_MARKER)
    }

    pub fn display_image_link(&self) -> &str {
        self.image_link.as_deref().unwrap_or(ABSENT_MARKER)
    }

    pub fn display_pdf_link(&self) -> &str {
        self.pdf_link.as_deref().unwrap_or(ABSENT_MARKER)
    }
}
