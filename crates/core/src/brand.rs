use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrandTier {
    None,
    Premium,
    Luxury,
}

#[derive(Debug, Clone)]
pub struct BrandInfo {
    pub brand: Option<&'static str>,
    pub tier: BrandTier,
    pub has_official_store: bool,
    /// Official-store search URL templates (uk, international); the product
    /// query is appended as a `q` pair.
    pub store_urls: Option<(&'static str, &'static str)>,
}

impl BrandInfo {
    fn none() -> Self {
        Self {
            brand: None,
            tier: BrandTier::None,
            has_official_store: false,
            store_urls: None,
        }
    }
}

struct BrandEntry {
    needle: &'static str,
    brand: &'static str,
    tier: BrandTier,
    /// (uk, international) search endpoints; None when the brand has no
    /// transactional online store.
    store: Option<(&'static str, &'static str)>,
}

/// Table order implies priority: first match wins.
const BRANDS: &[BrandEntry] = &[
    BrandEntry {
        needle: "louis vuitton",
        brand: "Louis Vuitton",
        tier: BrandTier::Luxury,
        store: Some((
            "https://uk.louisvuitton.com/eng-gb/search",
            "https://us.louisvuitton.com/eng-us/search",
        )),
    },
    BrandEntry {
        needle: "gucci",
        brand: "Gucci",
        tier: BrandTier::Luxury,
        store: Some((
            "https://www.gucci.com/uk/en_gb/search",
            "https://www.gucci.com/us/en/search",
        )),
    },
    BrandEntry {
        needle: "hermès",
        brand: "Hermès",
        tier: BrandTier::Luxury,
        store: Some((
            "https://www.hermes.com/uk/en/search",
            "https://www.hermes.com/us/en/search",
        )),
    },
    BrandEntry {
        needle: "hermes",
        brand: "Hermès",
        tier: BrandTier::Luxury,
        store: Some((
            "https://www.hermes.com/uk/en/search",
            "https://www.hermes.com/us/en/search",
        )),
    },
    BrandEntry {
        needle: "chanel",
        brand: "Chanel",
        tier: BrandTier::Luxury,
        // Fragrance-only online; treat as no official store link.
        store: None,
    },
    BrandEntry {
        needle: "prada",
        brand: "Prada",
        tier: BrandTier::Luxury,
        store: Some((
            "https://www.prada.com/gb/en/search.html",
            "https://www.prada.com/us/en/search.html",
        )),
    },
    BrandEntry {
        needle: "dior",
        brand: "Dior",
        tier: BrandTier::Luxury,
        store: Some((
            "https://www.dior.com/en_gb/fashion/search",
            "https://www.dior.com/en_us/fashion/search",
        )),
    },
    BrandEntry {
        needle: "burberry",
        brand: "Burberry",
        tier: BrandTier::Luxury,
        store: Some((
            "https://uk.burberry.com/search",
            "https://us.burberry.com/search",
        )),
    },
    BrandEntry {
        needle: "rolex",
        brand: "Rolex",
        tier: BrandTier::Luxury,
        store: None,
    },
    BrandEntry {
        needle: "cartier",
        brand: "Cartier",
        tier: BrandTier::Luxury,
        store: Some((
            "https://www.cartier.com/en-gb/search",
            "https://www.cartier.com/en-us/search",
        )),
    },
    BrandEntry {
        needle: "tiffany",
        brand: "Tiffany & Co.",
        tier: BrandTier::Luxury,
        store: Some((
            "https://www.tiffany.co.uk/search",
            "https://www.tiffany.com/search",
        )),
    },
    BrandEntry {
        needle: "saint laurent",
        brand: "Saint Laurent",
        tier: BrandTier::Luxury,
        store: Some((
            "https://www.ysl.com/en-gb/search",
            "https://www.ysl.com/en-us/search",
        )),
    },
    BrandEntry {
        needle: "apple",
        brand: "Apple",
        tier: BrandTier::Premium,
        store: Some((
            "https://www.apple.com/uk/search",
            "https://www.apple.com/search",
        )),
    },
    BrandEntry {
        needle: "dyson",
        brand: "Dyson",
        tier: BrandTier::Premium,
        store: Some((
            "https://www.dyson.co.uk/search",
            "https://www.dyson.com/search",
        )),
    },
    BrandEntry {
        needle: "bose",
        brand: "Bose",
        tier: BrandTier::Premium,
        store: Some((
            "https://www.bose.co.uk/en_gb/search.html",
            "https://www.bose.com/search",
        )),
    },
    BrandEntry {
        needle: "sonos",
        brand: "Sonos",
        tier: BrandTier::Premium,
        store: Some((
            "https://www.sonos.com/en-gb/search",
            "https://www.sonos.com/en-us/search",
        )),
    },
    BrandEntry {
        needle: "nintendo",
        brand: "Nintendo",
        tier: BrandTier::Premium,
        store: Some((
            "https://store.nintendo.co.uk/search",
            "https://www.nintendo.com/us/search",
        )),
    },
    BrandEntry {
        needle: "lego",
        brand: "LEGO",
        tier: BrandTier::Premium,
        store: Some((
            "https://www.lego.com/en-gb/search",
            "https://www.lego.com/en-us/search",
        )),
    },
    BrandEntry {
        needle: "nike",
        brand: "Nike",
        tier: BrandTier::Premium,
        store: Some((
            "https://www.nike.com/gb/w",
            "https://www.nike.com/w",
        )),
    },
    BrandEntry {
        needle: "adidas",
        brand: "adidas",
        tier: BrandTier::Premium,
        store: Some((
            "https://www.adidas.co.uk/search",
            "https://www.adidas.com/us/search",
        )),
    },
    BrandEntry {
        needle: "le creuset",
        brand: "Le Creuset",
        tier: BrandTier::Premium,
        store: Some((
            "https://www.lecreuset.co.uk/en_GB/search",
            "https://www.lecreuset.com/search",
        )),
    },
    BrandEntry {
        needle: "kitchenaid",
        brand: "KitchenAid",
        tier: BrandTier::Premium,
        store: Some((
            "https://www.kitchenaid.co.uk/search",
            "https://www.kitchenaid.com/search",
        )),
    },
    BrandEntry {
        needle: "nespresso",
        brand: "Nespresso",
        tier: BrandTier::Premium,
        store: Some((
            "https://www.nespresso.com/uk/en/search",
            "https://www.nespresso.com/us/en/search",
        )),
    },
    BrandEntry {
        needle: "garmin",
        brand: "Garmin",
        tier: BrandTier::Premium,
        store: Some((
            "https://www.garmin.com/en-GB/search",
            "https://www.garmin.com/en-US/search",
        )),
    },
];

/// Scan a product name for an embedded brand. Case-insensitive, first match
/// wins, unmatched names come back tier None with no store.
pub fn classify(raw_name: &str) -> BrandInfo {
    let haystack = raw_name.to_lowercase();
    for entry in BRANDS {
        if haystack.contains(entry.needle) {
            return BrandInfo {
                brand: Some(entry.brand),
                tier: entry.tier,
                has_official_store: entry.store.is_some(),
                store_urls: entry.store,
            };
        }
    }
    BrandInfo::none()
}
