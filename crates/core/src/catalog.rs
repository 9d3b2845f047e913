use crate::price::PriceRange;
use std::sync::OnceLock;

/// A curated, known-good product: real retailer URLs, a canonical image and
/// a realistic price band. Loaded once at process start, read-only after.
/// Catalog data is authoritative over anything the generative model guessed.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub canonical_key: &'static str,
    pub store_urls: &'static [(&'static str, &'static str)],
    pub image: &'static str,
    pub price_range: PriceRange,
}

/// Noisy phrase → canonical catalog key. Checked after direct key matching.
const SYNONYMS: &[(&str, &str)] = &[
    ("water bottle", "hydro flask wide mouth"),
    ("insulated bottle", "hydro flask wide mouth"),
    ("e-reader", "kindle paperwhite"),
    ("ereader", "kindle paperwhite"),
    ("ebook reader", "kindle paperwhite"),
    ("gaming console", "nintendo switch oled"),
    ("game console", "nintendo switch oled"),
    ("games console", "nintendo switch oled"),
    ("noise cancelling headphones", "sony wh-1000xm5"),
    ("wireless headphones", "sony wh-1000xm5"),
    ("instant camera", "fujifilm instax mini 12"),
    ("coffee machine", "nespresso vertuo pop"),
    ("coffee maker", "nespresso vertuo pop"),
    ("massage gun", "theragun mini"),
    ("travel mug", "yeti rambler tumbler"),
    ("tumbler", "yeti rambler tumbler"),
    ("building set", "lego icons flower bouquet"),
];

fn catalog() -> &'static [ProductRecord] {
    static CATALOG: OnceLock<Vec<ProductRecord>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

fn build_catalog() -> Vec<ProductRecord> {
    vec![
        ProductRecord {
            canonical_key: "nintendo switch oled",
            store_urls: &[
                ("Amazon", "https://www.amazon.co.uk/dp/B098RKWHHZ"),
                ("Currys", "https://www.currys.co.uk/products/nintendo-switch-oled-model-white-10230420.html"),
                ("Argos", "https://www.argos.co.uk/product/9461297"),
                ("Best Buy", "https://www.bestbuy.com/site/nintendo-switch-oled-model-white/6470923.p"),
            ],
            image: "https://images.unsplash.com/photo-1662997297569-39a5e357afbe?w=640",
            price_range: PriceRange { min: 280.0, max: 320.0 },
        },
        ProductRecord {
            canonical_key: "kindle paperwhite",
            store_urls: &[
                ("Amazon", "https://www.amazon.co.uk/dp/B09TMF6742"),
                ("Currys", "https://www.currys.co.uk/products/amazon-kindle-paperwhite-6.8-ereader-10233529.html"),
                ("Best Buy", "https://www.bestbuy.com/site/amazon-kindle-paperwhite/6520501.p"),
            ],
            image: "https://images.unsplash.com/photo-1592496431122-2349e0fbc666?w=640",
            price_range: PriceRange { min: 130.0, max: 160.0 },
        },
        ProductRecord {
            canonical_key: "airpods pro",
            store_urls: &[
                ("Apple", "https://www.apple.com/shop/buy-airpods/airpods-pro"),
                ("Amazon", "https://www.amazon.co.uk/dp/B0CHWRXH8B"),
                ("Currys", "https://www.currys.co.uk/products/apple-airpods-pro-2nd-generation-10251246.html"),
            ],
            image: "https://images.unsplash.com/photo-1603351154351-5e2d0600bb77?w=640",
            price_range: PriceRange { min: 200.0, max: 230.0 },
        },
        ProductRecord {
            canonical_key: "sony wh-1000xm5",
            store_urls: &[
                ("Amazon", "https://www.amazon.co.uk/dp/B09Y2MYL5C"),
                ("Currys", "https://www.currys.co.uk/products/sony-wh1000xm5-wireless-noise-cancelling-headphones-10235652.html"),
                ("Best Buy", "https://www.bestbuy.com/site/sony-wh-1000xm5/6505727.p"),
            ],
            image: "https://images.unsplash.com/photo-1618366712010-f4ae9c647dcb?w=640",
            price_range: PriceRange { min: 250.0, max: 300.0 },
        },
        ProductRecord {
            canonical_key: "hydro flask wide mouth",
            store_urls: &[
                ("Hydro Flask", "https://www.hydroflask.com/32-oz-wide-mouth"),
                ("Amazon", "https://www.amazon.co.uk/dp/B083GBY5X1"),
            ],
            image: "https://images.unsplash.com/photo-1602143407151-7111542de6e8?w=640",
            price_range: PriceRange { min: 30.0, max: 45.0 },
        },
        ProductRecord {
            canonical_key: "fujifilm instax mini 12",
            store_urls: &[
                ("Amazon", "https://www.amazon.co.uk/dp/B0BV9QLSVT"),
                ("Argos", "https://www.argos.co.uk/product/2866663"),
            ],
            image: "https://images.unsplash.com/photo-1526178613552-2b45c6c302f0?w=640",
            price_range: PriceRange { min: 70.0, max: 90.0 },
        },
        ProductRecord {
            canonical_key: "instant pot duo",
            store_urls: &[
                ("Amazon", "https://www.amazon.co.uk/dp/B08PQ2KWHS"),
                ("Target", "https://www.target.com/p/instant-pot-duo-7-in-1/-/A-79419305"),
            ],
            image: "https://images.unsplash.com/photo-1585664811087-47f65abbad64?w=640",
            price_range: PriceRange { min: 80.0, max: 110.0 },
        },
        ProductRecord {
            canonical_key: "lego icons flower bouquet",
            store_urls: &[
                ("LEGO", "https://www.lego.com/en-gb/product/flower-bouquet-10280"),
                ("Amazon", "https://www.amazon.co.uk/dp/B08NFB7R5L"),
            ],
            image: "https://images.unsplash.com/photo-1617038220319-276d3cfab638?w=640",
            price_range: PriceRange { min: 50.0, max: 60.0 },
        },
        ProductRecord {
            canonical_key: "nespresso vertuo pop",
            store_urls: &[
                ("Nespresso", "https://www.nespresso.com/uk/en/order/machines/vertuo/vertuo-pop-coconut-white"),
                ("Amazon", "https://www.amazon.co.uk/dp/B0BDLG6KLY"),
                ("Currys", "https://www.currys.co.uk/products/nespresso-by-magimix-vertuo-pop-11729-coffee-machine-10244730.html"),
            ],
            image: "https://images.unsplash.com/photo-1565452344518-47faca79dc69?w=640",
            price_range: PriceRange { min: 80.0, max: 100.0 },
        },
        ProductRecord {
            canonical_key: "theragun mini",
            store_urls: &[
                ("Therabody", "https://www.therabody.com/uk/en-gb/theragun-mini.html"),
                ("Amazon", "https://www.amazon.co.uk/dp/B0B5VQPJK6"),
            ],
            image: "https://images.unsplash.com/photo-1620188467120-5042ed1eb5da?w=640",
            price_range: PriceRange { min: 170.0, max: 200.0 },
        },
        ProductRecord {
            canonical_key: "yeti rambler tumbler",
            store_urls: &[
                ("YETI", "https://www.yeti.com/drinkware/tumblers/21071502.html"),
                ("Amazon", "https://www.amazon.co.uk/dp/B07GRYYP6J"),
            ],
            image: "https://images.unsplash.com/photo-1570784332176-fdd73da66f03?w=640",
            price_range: PriceRange { min: 25.0, max: 40.0 },
        },
        ProductRecord {
            canonical_key: "apple airtag",
            store_urls: &[
                ("Apple", "https://www.apple.com/shop/buy-airtag/airtag"),
                ("Amazon", "https://www.amazon.co.uk/dp/B0932QJ2JZ"),
            ],
            image: "https://images.unsplash.com/photo-1619994121345-b61cd610c5a6?w=640",
            price_range: PriceRange { min: 28.0, max: 35.0 },
        },
    ]
}

/// Lowercase and strip punctuation so "Nintendo Switch (OLED Model)" and
/// "nintendo switch oled" land on the same key.
fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() || c.is_whitespace() || c == '-' {
            out.extend(c.to_lowercase());
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Shortest normalized needle allowed to match a key by reverse containment.
/// Keeps one-letter and stop-word fragments from claiming a record.
const MIN_PARTIAL_NEEDLE_LEN: usize = 3;

/// Fuzzy lookup by noisy product name. Matching order: substring match of
/// the normalized name against catalog keys in either direction, then the
/// synonym table. First match wins; no scoring.
pub fn find(raw_name: &str) -> Option<&'static ProductRecord> {
    let needle = normalize(raw_name);
    if needle.is_empty() {
        return None;
    }

    for record in catalog() {
        if needle.contains(record.canonical_key)
            || (needle.len() >= MIN_PARTIAL_NEEDLE_LEN
                && record.canonical_key.contains(&needle))
        {
            return Some(record);
        }
    }

    for (phrase, key) in SYNONYMS {
        if needle.contains(phrase) {
            return catalog().iter().find(|r| r.canonical_key == *key);
        }
    }

    None
}
