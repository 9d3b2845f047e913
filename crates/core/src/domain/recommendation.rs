use serde::{Deserialize, Serialize};

pub const MIN_MATCH_PERCENTAGE: i32 = 60;
pub const MAX_MATCH_PERCENTAGE: i32 = 95;

/// An unvalidated gift idea, straight from the generative backend or the
/// template table, before price/image/shop enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub description: String,

    /// Free-form, currency-symbol-prefixed ("£50 - £75"); may be absent or junk.
    pub price_hint: Option<String>,

    pub match_percentage: i32,
    pub matching_traits: Vec<String>,

    pub image_search_term: Option<String>,
    pub shop_search_term: Option<String>,
}

impl Candidate {
    pub fn image_search_term(&self) -> &str {
        self.image_search_term.as_deref().unwrap_or(&self.name)
    }

    pub fn shop_search_term(&self) -> &str {
        self.shop_search_term.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopListing {
    pub name: String,
    /// Currency-symbol-formatted single price, e.g. "£64".
    pub price: String,
    pub in_stock: bool,
    pub url: String,
}

/// A fully enriched recommendation. Built once per pipeline run, immutable
/// after construction; the caller persists/displays it and discards it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftRecommendation {
    pub name: String,
    pub description: String,
    /// Formatted range, e.g. "£50 - £75".
    pub price: String,
    pub match_percentage: i32,
    pub matching_traits: Vec<String>,
    pub image: String,
    pub shops: Vec<ShopListing>,
}

pub fn clamp_match_percentage(raw: i32) -> i32 {
    raw.clamp(MIN_MATCH_PERCENTAGE, MAX_MATCH_PERCENTAGE)
}
