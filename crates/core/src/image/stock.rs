/// Curated stock images, keyed by theme. Deterministic tier between the web
/// search and the static default.
const STOCK_IMAGES: &[(&str, &str)] = &[
    ("tech", "https://images.unsplash.com/photo-1519389950473-47ba0277781c?w=640"),
    ("gaming", "https://images.unsplash.com/photo-1493711662062-fa541adb3fc8?w=640"),
    ("art", "https://images.unsplash.com/photo-1513364776144-60967b0f800f?w=640"),
    ("sports", "https://images.unsplash.com/photo-1461896836934-ffe607ba8211?w=640"),
    ("home", "https://images.unsplash.com/photo-1484101403633-562f891dc89a?w=640"),
    ("books", "https://images.unsplash.com/photo-1495446815901-a7297e633e8d?w=640"),
    ("music", "https://images.unsplash.com/photo-1511379938547-c1f69419868d?w=640"),
    ("food", "https://images.unsplash.com/photo-1504674900247-0877df9cc836?w=640"),
    ("beauty", "https://images.unsplash.com/photo-1596462502278-27bfdc403348?w=640"),
    ("tools", "https://images.unsplash.com/photo-1530124566582-a618bc2615dc?w=640"),
    ("travel", "https://images.unsplash.com/photo-1488646953014-85cb44e25828?w=640"),
    ("fashion", "https://images.unsplash.com/photo-1445205170230-053b83016050?w=640"),
    ("coffee", "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085?w=640"),
    ("garden", "https://images.unsplash.com/photo-1416879595882-3373a0480b5b?w=640"),
    ("jewellery", "https://images.unsplash.com/photo-1515562141207-7a88fb7ce338?w=640"),
];

/// Token → theme, for inputs that never name a theme directly.
const CATEGORY_HINTS: &[(&str, &str)] = &[
    ("headphones", "tech"),
    ("speaker", "tech"),
    ("laptop", "tech"),
    ("tablet", "tech"),
    ("camera", "tech"),
    ("drone", "tech"),
    ("smartwatch", "tech"),
    ("kindle", "books"),
    ("console", "gaming"),
    ("controller", "gaming"),
    ("videogame", "gaming"),
    ("paint", "art"),
    ("sketch", "art"),
    ("canvas", "art"),
    ("easel", "art"),
    ("craft", "art"),
    ("yoga", "sports"),
    ("fitness", "sports"),
    ("running", "sports"),
    ("gym", "sports"),
    ("bike", "sports"),
    ("tennis", "sports"),
    ("hiking", "travel"),
    ("camping", "travel"),
    ("luggage", "travel"),
    ("suitcase", "travel"),
    ("novel", "books"),
    ("journal", "books"),
    ("notebook", "books"),
    ("vinyl", "music"),
    ("guitar", "music"),
    ("piano", "music"),
    ("cooking", "food"),
    ("baking", "food"),
    ("chocolate", "food"),
    ("kitchen", "food"),
    ("perfume", "beauty"),
    ("fragrance", "beauty"),
    ("skincare", "beauty"),
    ("makeup", "beauty"),
    ("espresso", "coffee"),
    ("barista", "coffee"),
    ("plant", "garden"),
    ("planter", "garden"),
    ("necklace", "jewellery"),
    ("bracelet", "jewellery"),
    ("earrings", "jewellery"),
    ("ring", "jewellery"),
    ("scarf", "fashion"),
    ("wallet", "fashion"),
    ("handbag", "fashion"),
    ("sneakers", "fashion"),
    ("candle", "home"),
    ("blanket", "home"),
    ("lamp", "home"),
    ("mug", "home"),
];

/// Partial token/theme overlap anchored to a word boundary. Mid-word
/// containment is excluded: "smartwatch" must not land on "art".
fn theme_overlap(token: &str, theme: &str) -> bool {
    token.starts_with(theme)
        || token.ends_with(theme)
        || theme.starts_with(token)
        || theme.ends_with(token)
}

/// Map free text to a curated stock image: direct theme-token match first,
/// then partial token/theme overlap, then category hints. None when nothing
/// in the text resembles a known theme.
pub fn stock_image_for(text: &str) -> Option<&'static str> {
    let tokens: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 3)
        .map(str::to_string)
        .collect();

    if tokens.is_empty() {
        return None;
    }

    for (theme, url) in STOCK_IMAGES {
        if tokens.iter().any(|t| t == theme) {
            return Some(url);
        }
    }

    for (theme, url) in STOCK_IMAGES {
        if tokens.iter().any(|t| theme_overlap(t, theme)) {
            return Some(url);
        }
    }

    for (hint, theme) in CATEGORY_HINTS {
        if tokens.iter().any(|t| t == hint || t.contains(hint)) {
            return STOCK_IMAGES
                .iter()
                .find(|(k, _)| k == theme)
                .map(|(_, url)| *url);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_theme_match() {
        assert_eq!(
            stock_image_for("retro gaming lamp"),
            STOCK_IMAGES.iter().find(|(k, _)| *k == "gaming").map(|(_, u)| *u)
        );
    }

    #[test]
    fn partial_theme_match() {
        // "bookshop" is not the theme token "books" but contains it.
        let url = stock_image_for("bookshop voucher").unwrap();
        assert_eq!(
            Some(url),
            STOCK_IMAGES.iter().find(|(k, _)| *k == "books").map(|(_, u)| *u)
        );
        // "sport" is contained in the theme token "sports".
        assert!(stock_image_for("sport bag").is_some());
    }

    #[test]
    fn mid_word_containment_does_not_hijack_a_theme() {
        // "smartwatch" contains "art" mid-word; the hint table must win.
        let url = stock_image_for("smartwatch for running").unwrap();
        assert_eq!(
            Some(url),
            STOCK_IMAGES.iter().find(|(k, _)| *k == "tech").map(|(_, u)| *u)
        );
    }

    #[test]
    fn category_hint_match() {
        let url = stock_image_for("wireless headphones for commuting").unwrap();
        assert_eq!(
            Some(url),
            STOCK_IMAGES.iter().find(|(k, _)| *k == "tech").map(|(_, u)| *u)
        );
    }

    #[test]
    fn unknown_text_yields_none() {
        assert_eq!(stock_image_for("xyzzy qwerty"), None);
        assert_eq!(stock_image_for(""), None);
        assert_eq!(stock_image_for("a an of"), None);
    }

    #[test]
    fn every_stock_url_is_https() {
        for (_, url) in STOCK_IMAGES {
            assert!(url.starts_with("https://"));
        }
        for (_, theme) in CATEGORY_HINTS {
            assert!(STOCK_IMAGES.iter().any(|(k, _)| k == theme));
        }
    }
}
