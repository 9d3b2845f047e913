/// Currency code → display glyph. The supported set is fixed and small;
/// table-driven on purpose (see the matching prefix table in `price`).
pub fn symbol(code: &str) -> &'static str {
    match code.to_uppercase().as_str() {
        "USD" => "$",
        "GBP" => "£",
        "EUR" => "€",
        "JPY" => "¥",
        "KRW" => "₩",
        "INR" => "₹",
        "SEK" | "NOK" | "DKK" => "kr",
        "PLN" => "zł",
        "TRY" => "₺",
        "THB" => "฿",
        "CHF" => "CHF",
        "CAD" => "C$",
        "AUD" => "A$",
        "MXN" => "MX$",
        _ => "$",
    }
}

/// Whole-unit display form, e.g. "£64".
pub fn format_amount(symbol: &str, value: f64) -> String {
    format!("{symbol}{:.0}", value.max(0.0).round())
}
