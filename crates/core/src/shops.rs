use crate::brand::{self, BrandTier};
use crate::catalog::ProductRecord;
use crate::currency::{format_amount, symbol};
use crate::domain::recommendation::ShopListing;
use crate::price::PriceRange;
use rand::Rng;
use url::Url;

pub const MAX_SHOPS: usize = 4;

// In-stock odds by retailer tier.
const STOCK_P_OFFICIAL: f64 = 0.95;
const STOCK_P_DEPARTMENT: f64 = 0.9;
const STOCK_P_RETAIL: f64 = 0.85;

/// (display name, search endpoint, query parameter)
type Retailer = (&'static str, &'static str, &'static str);

const UK_LUXURY_DEPARTMENTS: &[Retailer] = &[
    ("Harrods", "https://www.harrods.com/en-gb/search", "searchTerm"),
    ("Selfridges", "https://www.selfridges.com/GB/en/search", "freeText"),
    ("Liberty London", "https://www.libertylondon.com/uk/search", "q"),
];

const INTL_LUXURY_DEPARTMENTS: &[Retailer] = &[
    ("Saks Fifth Avenue", "https://www.saksfifthavenue.com/search", "q"),
    ("Neiman Marcus", "https://www.neimanmarcus.com/search", "q"),
    ("Bloomingdale's", "https://www.bloomingdales.com/shop/search", "keyword"),
];

const UK_PREMIUM_DEPARTMENTS: &[Retailer] = &[
    ("John Lewis", "https://www.johnlewis.com/search", "search-term"),
    ("Selfridges", "https://www.selfridges.com/GB/en/search", "freeText"),
];

const INTL_PREMIUM_DEPARTMENTS: &[Retailer] = &[
    ("Nordstrom", "https://www.nordstrom.com/sr", "keyword"),
    ("Macy's", "https://www.macys.com/shop/search", "keyword"),
];

const UK_MARKETPLACE: Retailer = ("Amazon", "https://www.amazon.co.uk/s", "k");
const INTL_MARKETPLACE: Retailer = ("Amazon", "https://www.amazon.com/s", "k");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductCategory {
    Electronics,
    Fashion,
    Beauty,
    Books,
    Art,
    Sports,
    General,
}

const CATEGORY_KEYWORDS: &[(ProductCategory, &[&str])] = &[
    (
        ProductCategory::Electronics,
        &[
            "headphone", "speaker", "laptop", "tablet", "phone", "camera", "console", "gaming",
            "smart", "drone", "kindle", "e-reader", "charger", "tech",
        ],
    ),
    (
        ProductCategory::Fashion,
        &[
            "bag", "wallet", "scarf", "watch", "jewellery", "jewelry", "sunglasses", "belt",
            "shoe", "sneaker", "trainers", "dress", "jacket", "necklace", "bracelet",
        ],
    ),
    (
        ProductCategory::Beauty,
        &["perfume", "fragrance", "skincare", "makeup", "cosmetic", "lipstick", "serum"],
    ),
    (
        ProductCategory::Books,
        &["book", "novel", "journal", "notebook", "diary"],
    ),
    (
        ProductCategory::Art,
        &["art", "paint", "sketch", "craft", "easel", "canvas", "pottery"],
    ),
    (
        ProductCategory::Sports,
        &[
            "yoga", "fitness", "gym", "running", "bike", "tennis", "golf", "hiking", "camping",
            "sport",
        ],
    ),
];

fn category_retailers(category: ProductCategory, uk: bool) -> &'static [Retailer] {
    match (category, uk) {
        (ProductCategory::Electronics, true) => &[
            ("Currys", "https://www.currys.co.uk/search", "q"),
            ("Argos", "https://www.argos.co.uk/search", "searchTerm"),
        ],
        (ProductCategory::Electronics, false) => &[
            ("Best Buy", "https://www.bestbuy.com/site/searchpage.jsp", "st"),
        ],
        (ProductCategory::Fashion, true) => &[
            ("ASOS", "https://www.asos.com/search/", "q"),
            ("John Lewis", "https://www.johnlewis.com/search", "search-term"),
        ],
        (ProductCategory::Fashion, false) => &[
            ("Nordstrom", "https://www.nordstrom.com/sr", "keyword"),
        ],
        (ProductCategory::Beauty, true) => &[
            ("Boots", "https://www.boots.com/search", "searchTerm"),
        ],
        (ProductCategory::Beauty, false) => &[
            ("Sephora", "https://www.sephora.com/search", "keyword"),
        ],
        (ProductCategory::Books, true) => &[
            ("Waterstones", "https://www.waterstones.com/search", "term"),
        ],
        (ProductCategory::Books, false) => &[
            ("Barnes & Noble", "https://www.barnesandnoble.com/s", "q"),
        ],
        (ProductCategory::Art, true) => &[
            ("Etsy", "https://www.etsy.com/uk/search", "q"),
            ("Hobbycraft", "https://www.hobbycraft.co.uk/search", "q"),
        ],
        (ProductCategory::Art, false) => &[
            ("Etsy", "https://www.etsy.com/search", "q"),
        ],
        (ProductCategory::Sports, true) => &[
            ("Sports Direct", "https://www.sportsdirect.com/searchresults", "descriptionfilter"),
            ("Decathlon", "https://www.decathlon.co.uk/search", "query"),
        ],
        (ProductCategory::Sports, false) => &[
            ("Dick's Sporting Goods", "https://www.dickssportinggoods.com/search", "searchTerm"),
        ],
        (ProductCategory::General, true) => &[
            ("John Lewis", "https://www.johnlewis.com/search", "search-term"),
        ],
        (ProductCategory::General, false) => &[
            ("Target", "https://www.target.com/s", "searchTerm"),
        ],
    }
}

pub fn classify_category(product_name: &str) -> ProductCategory {
    let haystack = product_name.to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|k| haystack.contains(k)) {
            return *category;
        }
    }
    ProductCategory::General
}

fn search_url(base: &str, param: &str, query: &str) -> String {
    match Url::parse_with_params(base, &[(param, query)]) {
        Ok(url) => url.to_string(),
        // Static bases always parse; keep a lossless fallback anyway.
        Err(_) => format!("{base}?{param}={query}"),
    }
}

/// Uniform sample within the range plus small per-shop jitter, clamped to
/// [0.95·min, 1.05·max].
fn synth_price<R: Rng>(range: &PriceRange, rng: &mut R) -> f64 {
    let base = rng.gen_range(range.min..=range.max);
    let jitter = rng.gen_range(-0.1..=0.1) * range.width();
    (base + jitter).clamp(0.95 * range.min, 1.05 * range.max).max(0.0)
}

fn listing<R: Rng>(
    name: &str,
    url: String,
    price: f64,
    glyph: &str,
    stock_p: f64,
    rng: &mut R,
) -> ShopListing {
    ShopListing {
        name: name.to_string(),
        price: format_amount(glyph, price),
        in_stock: rng.gen_bool(stock_p),
        url,
    }
}

/// Build 1-4 shop listings for a candidate, ordered by preference:
/// official brand store, tier-appropriate department stores, catalog-backed
/// real URLs, then category retailers plus a marketplace link.
pub fn build_shop_links<R: Rng>(
    range: &PriceRange,
    currency_code: &str,
    product_name: &str,
    country: &str,
    catalog_record: Option<&ProductRecord>,
    rng: &mut R,
) -> Vec<ShopListing> {
    let glyph = symbol(currency_code);
    let uk = country.to_lowercase().contains("united kingdom");
    let info = brand::classify(product_name);

    let mut shops: Vec<ShopListing> = Vec::with_capacity(MAX_SHOPS);

    if let (true, Some((uk_url, intl_url))) = (info.has_official_store, info.store_urls) {
        let base = if uk { uk_url } else { intl_url };
        let url = search_url(base, "q", product_name);
        // Official stores rarely discount.
        let price = range.max * rng.gen_range(1.0..=1.05);
        let name = format!("{} Official Store", info.brand.unwrap_or("Brand"));
        shops.push(listing(&name, url, price, glyph, STOCK_P_OFFICIAL, rng));
    }

    let departments: &[Retailer] = match (info.tier, uk) {
        (BrandTier::Luxury, true) => UK_LUXURY_DEPARTMENTS,
        (BrandTier::Luxury, false) => INTL_LUXURY_DEPARTMENTS,
        (BrandTier::Premium, true) => UK_PREMIUM_DEPARTMENTS,
        (BrandTier::Premium, false) => INTL_PREMIUM_DEPARTMENTS,
        (BrandTier::None, _) => &[],
    };
    let department_count = match info.tier {
        BrandTier::Luxury => rng.gen_range(2..=3),
        BrandTier::Premium => rng.gen_range(1..=2),
        BrandTier::None => 0,
    };
    for (name, base, param) in departments.iter().take(department_count) {
        let url = search_url(base, param, product_name);
        let price = synth_price(range, rng);
        shops.push(listing(name, url, price, glyph, STOCK_P_DEPARTMENT, rng));
    }

    if let Some(record) = catalog_record {
        // Real URLs straight from the catalog; short-circuits the generic
        // retailer fallback.
        for (store, url) in record.store_urls.iter() {
            if shops.len() >= MAX_SHOPS {
                break;
            }
            let price = synth_price(range, rng);
            shops.push(listing(store, url.to_string(), price, glyph, STOCK_P_DEPARTMENT, rng));
        }
    } else if shops.is_empty() {
        let category = classify_category(product_name);
        for (name, base, param) in category_retailers(category, uk) {
            let url = search_url(base, param, product_name);
            let price = synth_price(range, rng);
            shops.push(listing(name, url, price, glyph, STOCK_P_RETAIL, rng));
        }

        let (name, base, param) = if uk { UK_MARKETPLACE } else { INTL_MARKETPLACE };
        let url = search_url(base, param, product_name);
        let price = synth_price(range, rng);
        shops.push(listing(name, url, price, glyph, STOCK_P_RETAIL, rng));
    }

    shops.truncate(MAX_SHOPS);
    shops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::price::parse_price_range;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn price_of(listing: &ShopListing) -> f64 {
        let r = parse_price_range(&listing.price).unwrap();
        r.midpoint()
    }

    #[test]
    fn uk_luxury_brand_gets_official_store_and_uk_departments() {
        let range = PriceRange::new(300.0, 450.0);
        let shops = build_shop_links(
            &range,
            "GBP",
            "Gucci leather wallet",
            "United Kingdom",
            None,
            &mut rng(11),
        );

        assert!((1..=MAX_SHOPS).contains(&shops.len()));
        assert_eq!(shops[0].name, "Gucci Official Store");
        assert!(shops[0].url.contains("gucci.com/uk"));
        assert!(shops[0].url.contains("q=Gucci+leather+wallet"));

        let names: Vec<&str> = shops.iter().map(|s| s.name.as_str()).collect();
        assert!(names
            .iter()
            .skip(1)
            .all(|n| UK_LUXURY_DEPARTMENTS.iter().any(|(dept, _, _)| dept == n)));
        assert!(!names.contains(&"Target"));
        assert!(names.len() >= 3);
    }

    #[test]
    fn luxury_outside_uk_uses_international_departments() {
        let range = PriceRange::new(300.0, 450.0);
        let shops = build_shop_links(
            &range,
            "USD",
            "Gucci leather wallet",
            "United States",
            None,
            &mut rng(11),
        );
        assert!(shops.iter().skip(1).all(|s| {
            INTL_LUXURY_DEPARTMENTS.iter().any(|(dept, _, _)| *dept == s.name)
        }));
        assert!(shops[0].url.contains("gucci.com/us"));
    }

    #[test]
    fn catalog_record_short_circuits_generic_retailers() {
        let record = catalog::find("Nintendo Switch OLED Model").unwrap();
        let shops = build_shop_links(
            &record.price_range,
            "GBP",
            "A games thing nobody brands",
            "United Kingdom",
            Some(record),
            &mut rng(3),
        );

        assert_eq!(shops.len(), MAX_SHOPS.min(record.store_urls.len()));
        for (shop, (store, url)) in shops.iter().zip(record.store_urls.iter()) {
            assert_eq!(shop.name, *store);
            assert_eq!(shop.url, *url);
        }
    }

    #[test]
    fn unbranded_product_gets_category_retailers_plus_marketplace() {
        let range = PriceRange::new(20.0, 40.0);
        let shops = build_shop_links(
            &range,
            "GBP",
            "Watercolour paint set",
            "United Kingdom",
            None,
            &mut rng(5),
        );

        assert!((1..=MAX_SHOPS).contains(&shops.len()));
        assert_eq!(shops.last().map(|s| s.name.as_str()), Some("Amazon"));
        assert!(shops.last().unwrap().url.starts_with("https://www.amazon.co.uk/s?"));
        assert!(shops.iter().any(|s| s.name == "Etsy"));
    }

    #[test]
    fn non_uk_general_product_falls_back_to_target_and_amazon_com() {
        let range = PriceRange::new(20.0, 40.0);
        let shops = build_shop_links(
            &range,
            "USD",
            "Surprise mystery box",
            "United States",
            None,
            &mut rng(5),
        );
        let names: Vec<&str> = shops.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"Target"));
        assert!(shops.iter().any(|s| s.url.starts_with("https://www.amazon.com/s?")));
    }

    #[test]
    fn synthesized_prices_respect_the_range_envelope() {
        let range = PriceRange::new(50.0, 100.0);
        let mut r = rng(42);
        for _ in 0..200 {
            let p = synth_price(&range, &mut r);
            assert!(p >= 0.95 * range.min - 1e-9, "price {p}");
            assert!(p <= 1.05 * range.max + 1e-9, "price {p}");
        }
    }

    #[test]
    fn listing_prices_stay_near_the_candidate_range() {
        let range = PriceRange::new(50.0, 100.0);
        for seed in 0..20 {
            let shops = build_shop_links(
                &range,
                "GBP",
                "Apple AirPods case",
                "United Kingdom",
                None,
                &mut rng(seed),
            );
            for shop in &shops {
                let p = price_of(shop);
                assert!(p >= 0.9 * range.min - 1.0, "{}: {p}", shop.name);
                assert!(p <= 1.1 * range.max + 1.0, "{}: {p}", shop.name);
            }
        }
    }

    #[test]
    fn shop_count_is_always_one_to_four() {
        let range = PriceRange::new(10.0, 30.0);
        for (name, country) in [
            ("Gucci silk scarf", "United Kingdom"),
            ("Louis Vuitton belt", "France"),
            ("Apple Watch strap", "United States"),
            ("Hand-poured soy candle", "United Kingdom"),
            ("Mystery item", "Germany"),
        ] {
            let shops = build_shop_links(&range, "EUR", name, country, None, &mut rng(9));
            assert!(
                (1..=MAX_SHOPS).contains(&shops.len()),
                "{name}: {}",
                shops.len()
            );
        }
    }

    #[test]
    fn identical_seeds_give_identical_listings() {
        let range = PriceRange::new(30.0, 60.0);
        let a = build_shop_links(&range, "GBP", "Novel-ish thing", "United Kingdom", None, &mut rng(77));
        let b = build_shop_links(&range, "GBP", "Novel-ish thing", "United Kingdom", None, &mut rng(77));
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.price, y.price);
            assert_eq!(x.in_stock, y.in_stock);
            assert_eq!(x.url, y.url);
        }
    }

    #[test]
    fn classifies_categories_by_keyword() {
        assert_eq!(classify_category("Bluetooth speaker"), ProductCategory::Electronics);
        assert_eq!(classify_category("Silk scarf"), ProductCategory::Fashion);
        assert_eq!(classify_category("Niche perfume"), ProductCategory::Beauty);
        assert_eq!(classify_category("Leather notebook"), ProductCategory::Books);
        assert_eq!(classify_category("Watercolour paint set"), ProductCategory::Art);
        assert_eq!(classify_category("Yoga block"), ProductCategory::Sports);
        assert_eq!(classify_category("Surprise mystery box"), ProductCategory::General);
    }
}
