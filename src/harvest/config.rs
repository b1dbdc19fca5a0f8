use serde::{Deserialize, Serialize};

/// Settings for turning a sitemap into scrape candidates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Sitemap document to read `<loc>` entries from
    pub sitemap_url: String,

    /// Path segment marking the site's source-language pages (default: "nl")
    pub language_segment: String,

    /// Maximum number of candidates handed to the pool (default: 10000)
    pub max_urls: usize,

    /// Path segments identifying non-product pages
    pub blacklist: Vec<String>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            sitemap_url: "https://www.duramotion.nl/sitemap.xml".to_string(),
            language_segment: "nl".to_string(),
            max_urls: 10_000,
            blacklist: [
                "contact",
                "sitemap",
                "nieuws",
                "reviews",
                "cookies",
                "assortiment",
                "categorieen",
                "faq",
                "vacatures",
                "blog",
                "team",
                "partners",
                "omvormen",
                "kennis-partner",
                "technische-support",
                "klantportaal",
                "projectmanagement",
                "express-delivery",
                "van-der-valk",
                "recom",
                "algemene-voorwaarden",
                "privacy",
                "enphase",
                "his",
                "links",
                "nieuwsbrief-inschrijving",
                "huawei",
                "eaton",
                "cimco",
                "omvormers",
                "elektra",
                "kabels",
                "klein-materiaal",
                "onderconstructie",
                "calculators",
                "chint",
                "sas-box",
                "cah-caw",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}
