use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::app::{Result, SitemillError};
use crate::domain::ProductRecord;
use crate::scraper::structured_data::StructuredData;
use crate::scraper::ScraperConfig;

/// Reads product fields out of a parsed page.
///
/// Every field is looked up independently; a miss leaves that field `None`
/// and never affects the others.
///
/// Title and code join their trimmed text nodes with a single space, so
/// `<h1>Bolt <span>M8</span></h1>` reads "Bolt M8" rather than "BoltM8".
/// Descriptions join with newlines to keep their line structure.
pub struct ProductExtractor {
    base_url: Url,
    alternate: Selector,
    code: Selector,
    structured_data: Selector,
    title: Selector,
    description: Selector,
    image: Selector,
    pdf_anchor: Selector,
    pdf_icon: Selector,
}

impl ProductExtractor {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(&config.base_url)?,
            alternate: parse_selector(&format!(
                "link[hreflang=\"{}\"]",
                config.target_language
            ))?,
            code: parse_selector(&config.code_selector)?,
            structured_data: parse_selector(&config.structured_data_selector)?,
            title: parse_selector(&config.title_selector)?,
            description: parse_selector(&config.description_selector)?,
            image: parse_selector(&config.image_selector)?,
            pdf_anchor: parse_selector(&format!("a.{}", config.pdf_icon_class))?,
            pdf_icon: parse_selector(&format!(".{}", config.pdf_icon_class))?,
        })
    }

    /// The localized alternate advertised by `document`, resolved against `page_url`.
    pub fn alternate_href(&self, document: &Html, page_url: &str) -> Option<String> {
        let link = document.select(&self.alternate).next()?;
        let href = link.value().attr("href")?.trim();
        if href.is_empty() {
            return None;
        }

        match Url::parse(page_url).and_then(|base| base.join(href)) {
            Ok(url) => Some(url.to_string()),
            Err(_) => Some(href.to_string()),
        }
    }

    pub fn extract(&self, document: &Html, source_url: &str) -> ProductRecord {
        let mut record = ProductRecord::new(source_url);
        record.code = self.code(document);
        record.title = self.first_text(document, &self.title, " ");
        record.description = self.first_text(document, &self.description, "\n");
        record.image_link = self.image_link(document);
        record.pdf_link = self.pdf_link(document);
        record
    }

    fn code(&self, document: &Html) -> Option<String> {
        self.first_text(document, &self.code, " ")
            .or_else(|| self.structured_code(document))
    }

    /// First JSON-LD block yielding an `mpn` or `sku`.
    fn structured_code(&self, document: &Html) -> Option<String> {
        document.select(&self.structured_data).find_map(|script| {
            let raw: String = script.text().collect();
            match StructuredData::parse(&raw) {
                Ok(data) => data.product_code(),
                Err(e) => {
                    tracing::debug!("Skipping unparsable structured data: {}", e);
                    None
                }
            }
        })
    }

    fn first_text(&self, document: &Html, selector: &Selector, separator: &str) -> Option<String> {
        let element = document.select(selector).next()?;
        non_empty(element_text(element, separator))
    }

    fn image_link(&self, document: &Html) -> Option<String> {
        let anchor = document.select(&self.image).next()?;
        self.resolve(anchor.value().attr("href")?)
    }

    /// An anchor carrying the icon class, else the anchor wrapping the icon.
    fn pdf_link(&self, document: &Html) -> Option<String> {
        if let Some(link) = document
            .select(&self.pdf_anchor)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
            .and_then(|href| self.resolve(href))
        {
            return Some(link);
        }

        let icon = document.select(&self.pdf_icon).next()?;
        let anchor = icon
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "a")?;
        self.resolve(anchor.value().attr("href")?)
    }

    fn resolve(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        self.base_url
            .join(href)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .map(|url| url.to_string())
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SitemillError::Selector(format!("{selector}: {e}")))
}

/// Text nodes trimmed, blanks dropped, joined with `separator`.
fn element_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
