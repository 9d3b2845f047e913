use crate::currency::format_amount;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Known currency prefixes/glyphs, stripped before numeric parsing.
/// Ordered longest-first so the letter-prefixed dollar variants win over "$".
const CURRENCY_GLYPHS: &[&str] = &[
    "MX$", "C$", "A$", "CHF", "kr", "zł", "$", "£", "€", "¥", "₩", "₹", "₺", "฿",
];

#[derive(Debug, Clone, Error)]
#[error("no numeric price found in {0:?}")]
pub struct PriceParseError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(a: f64, b: f64) -> Self {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        Self {
            min: min.max(0.0),
            max: max.max(0.0),
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Substitution policy for unparsable price hints: a randomized range
    /// inside (0.2·budget, budget).
    pub fn placeholder<R: Rng>(budget: f64, rng: &mut R) -> Self {
        let min = rng.gen_range(0.2 * budget..=0.6 * budget);
        let max = rng.gen_range(min..=budget);
        Self::new(min, max)
    }

    /// Clamp-on-ingest: pull the max down to the budget and recompute a
    /// consistent min. Distinct from the final budget filter.
    pub fn clamp_to_budget(self, budget: f64) -> Self {
        if self.max <= budget {
            return self;
        }
        let max = budget;
        Self::new(self.min.min(0.9 * max), max)
    }

    /// Display form, e.g. "£50 - £75". The max is floored (min rounded, then
    /// capped at the floored max) so re-parsing the display string never
    /// reports a max above the numeric one.
    pub fn format(&self, symbol: &str) -> String {
        let max = self.max.floor();
        let min = self.min.round().min(max);
        format!("{} - {}", format_amount(symbol, min), format_amount(symbol, max))
    }
}

/// Parse a free-form, symbol-prefixed price string into a range.
/// "£50 - £75" → (50, 75); a single "£60" → (54, 66); junk → error, and the
/// orchestrator substitutes [`PriceRange::placeholder`].
pub fn parse_price_range(text: &str) -> Result<PriceRange, PriceParseError> {
    let mut cleaned = text.to_string();
    for glyph in CURRENCY_GLYPHS {
        cleaned = cleaned.replace(glyph, " ");
    }
    cleaned = cleaned.replace(',', "");

    let numbers: Vec<f64> = cleaned
        .split(['-', '–'])
        .filter_map(parse_number)
        .collect();

    match numbers.as_slice() {
        [] => Err(PriceParseError(text.to_string())),
        [v] => Ok(PriceRange::new(0.9 * v, 1.1 * v)),
        [a, b, ..] => Ok(PriceRange::new(*a, *b)),
    }
}

fn parse_number(segment: &str) -> Option<f64> {
    let digits: String = segment
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}
