use crate::currency;
use crate::domain::profile::RecipientProfile;
use crate::domain::recommendation::Candidate;

/// Assemble at least this many template candidates when the table allows.
pub const TARGET_CANDIDATES: usize = 5;
pub const MAX_CANDIDATES: usize = 6;

/// A deterministic stand-in for one generative gift idea, pre-tagged with a
/// budget-relative price band. Entries with keywords are trait-matched;
/// keyword-less entries are the generic filler.
#[derive(Debug, Clone)]
pub struct TemplateGift {
    pub name: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    /// Base price band as fractions of the budget, both within (0, 1].
    pub price_band: (f64, f64),
    pub match_percentage: i32,
}

pub const TEMPLATE_GIFTS: &[TemplateGift] = &[
    TemplateGift {
        name: "Nintendo Switch OLED",
        description: "A hybrid games console they can play on the TV or on the go.",
        keywords: &["gaming", "video games", "games", "tech"],
        price_band: (0.5, 0.9),
        match_percentage: 90,
    },
    TemplateGift {
        name: "Sony WH-1000XM5 Wireless Headphones",
        description: "Class-leading noise cancelling for music, podcasts and travel.",
        keywords: &["music", "tech", "tech-savvy", "travel", "commut"],
        price_band: (0.5, 0.8),
        match_percentage: 88,
    },
    TemplateGift {
        name: "Kindle Paperwhite",
        description: "A glare-free e-reader that holds their whole library.",
        keywords: &["reading", "books", "literature"],
        price_band: (0.3, 0.6),
        match_percentage: 88,
    },
    TemplateGift {
        name: "Watercolour Starter Set",
        description: "Artist-grade paints, brushes and paper in one box.",
        keywords: &["art", "painting", "creative", "craft", "drawing"],
        price_band: (0.2, 0.4),
        match_percentage: 86,
    },
    TemplateGift {
        name: "Le Creuset Stoneware Dish",
        description: "An oven-to-table classic for someone who loves to cook.",
        keywords: &["cooking", "baking", "food", "kitchen"],
        price_band: (0.3, 0.6),
        match_percentage: 86,
    },
    TemplateGift {
        name: "Theragun Mini Massage Gun",
        description: "Portable deep-muscle recovery after training sessions.",
        keywords: &["fitness", "gym", "running", "sport", "yoga"],
        price_band: (0.4, 0.7),
        match_percentage: 85,
    },
    TemplateGift {
        name: "Fujifilm Instax Mini 12",
        description: "An instant camera for prints they can pin up straight away.",
        keywords: &["photography", "creative", "memories"],
        price_band: (0.3, 0.5),
        match_percentage: 85,
    },
    TemplateGift {
        name: "Nespresso Vertuo Pop Coffee Machine",
        description: "Barista-style coffee at home with one button.",
        keywords: &["coffee", "espresso"],
        price_band: (0.4, 0.7),
        match_percentage: 85,
    },
    TemplateGift {
        name: "Board Game Night Bundle",
        description: "Two modern strategy games picked for replay value.",
        keywords: &["board games", "games", "puzzles", "social"],
        price_band: (0.2, 0.4),
        match_percentage: 84,
    },
    TemplateGift {
        name: "Indoor Herb Garden Kit",
        description: "Self-watering planter with basil, mint and coriander.",
        keywords: &["gardening", "plants", "cooking", "nature"],
        price_band: (0.2, 0.4),
        match_percentage: 83,
    },
    TemplateGift {
        name: "Luxury Scented Candle Set",
        description: "Three hand-poured candles in seasonal scents.",
        keywords: &[],
        price_band: (0.15, 0.3),
        match_percentage: 72,
    },
    TemplateGift {
        name: "Artisan Chocolate Box",
        description: "A curated box from an independent chocolatier.",
        keywords: &[],
        price_band: (0.1, 0.25),
        match_percentage: 70,
    },
    TemplateGift {
        name: "Premium Gift Hamper",
        description: "A hamper of small-batch snacks and treats.",
        keywords: &[],
        price_band: (0.3, 0.6),
        match_percentage: 70,
    },
    TemplateGift {
        name: "Cosy Throw Blanket",
        description: "An oversized knitted throw for the sofa.",
        keywords: &[],
        price_band: (0.15, 0.35),
        match_percentage: 68,
    },
    TemplateGift {
        name: "Deluxe Stationery Set",
        description: "Heavyweight notecards, a fountain pen and wax seal kit.",
        keywords: &[],
        price_band: (0.1, 0.3),
        match_percentage: 68,
    },
];

/// Deterministic fallback when the generative backend is unavailable:
/// trait-matched entries first (table order), topped up with generic entries
/// until 5-6 are assembled or the table is exhausted.
pub fn template_candidates(
    profile: &RecipientProfile,
    table: &[TemplateGift],
) -> Vec<Candidate> {
    let descriptors: Vec<String> = profile
        .traits
        .iter()
        .chain(profile.interests.iter())
        .map(|s| s.to_string())
        .collect();

    let mut out: Vec<Candidate> = Vec::with_capacity(MAX_CANDIDATES);

    for gift in table.iter().filter(|g| !g.keywords.is_empty()) {
        if out.len() >= MAX_CANDIDATES {
            break;
        }
        let matched: Vec<String> = descriptors
            .iter()
            .filter(|d| {
                let lower = d.to_lowercase();
                gift.keywords
                    .iter()
                    .any(|k| lower.contains(k) || k.contains(lower.as_str()))
            })
            .cloned()
            .collect();
        if !matched.is_empty() {
            out.push(to_candidate(gift, profile, matched));
        }
    }

    for gift in table.iter().filter(|g| g.keywords.is_empty()) {
        if out.len() >= TARGET_CANDIDATES {
            break;
        }
        out.push(to_candidate(gift, profile, Vec::new()));
    }

    out
}

fn to_candidate(
    gift: &TemplateGift,
    profile: &RecipientProfile,
    matching_traits: Vec<String>,
) -> Candidate {
    let glyph = currency::symbol(&profile.currency);
    let (lo, hi) = gift.price_band;
    let price_hint = format!(
        "{} - {}",
        currency::format_amount(glyph, lo * profile.budget),
        currency::format_amount(glyph, hi * profile.budget),
    );

    Candidate {
        name: gift.name.to_string(),
        description: gift.description.to_string(),
        price_hint: Some(price_hint),
        match_percentage: gift.match_percentage,
        matching_traits,
        image_search_term: None,
        shop_search_term: None,
    }
}
