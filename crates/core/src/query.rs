//! Free-text query interpretation.
//!
//! Budget and category are independent extractions over the same
//! normalized text. Budget matching walks an ordered pattern list and
//! short-circuits on the first hit, so precedence between overlapping
//! patterns is fixed.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::product::Category;

/// Messages containing none of these words are answered by the topic
/// gate instead of the model.
const TOPIC_KEYWORDS: [&str; 10] = [
    "phone",
    "smartphone",
    "mobile",
    "laptop",
    "notebook",
    "gaming",
    "coding",
    "student",
    "camera",
    "battery",
];

const SMARTPHONE_KEYWORDS: [&str; 3] = ["phone", "smartphone", "mobile"];
const LAPTOP_KEYWORDS: [&str; 2] = ["laptop", "notebook"];

// Ordered by precedence: explicit ceilings first, then a labelled budget,
// then bare numbers with an optional currency suffix.
static BUDGET_MATCHERS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:under|below|less than)[^\d]*(\d{3,6})").unwrap(),
        Regex::new(r"budget[^\d]*(\d{3,6})").unwrap(),
        Regex::new(r"(\d{1,3}(?:,\d{3})?)\s*(?:inr|rupees)?").unwrap(),
        Regex::new(r"(\d{3,6})\s*(?:inr|rupees)?").unwrap(),
    ]
});

/// Lower-case the text and expand the shorthand amount suffixes so
/// "50k" and "50 thousand" both read as "50000" to the matchers.
fn normalize(text: &str) -> String {
    text.to_lowercase().replace('k', "000").replace("thousand", "000")
}

/// Extract a price ceiling from free text.
///
/// Returns the first capture of the first matching pattern with thousands
/// separators stripped; multiple numbers are never aggregated.
pub fn extract_budget(text: &str) -> Option<u32> {
    let normalized = normalize(text);
    for matcher in BUDGET_MATCHERS.iter() {
        if let Some(captures) = matcher.captures(&normalized) {
            return captures[1].replace(',', "").parse().ok();
        }
    }
    None
}

/// Classify the product family a query is about, if any.
///
/// Smartphone keywords take precedence over laptop keywords.
pub fn classify_category(text: &str) -> Option<Category> {
    let normalized = text.to_lowercase();
    if SMARTPHONE_KEYWORDS.iter().any(|keyword| normalized.contains(keyword)) {
        return Some(Category::Smartphone);
    }
    if LAPTOP_KEYWORDS.iter().any(|keyword| normalized.contains(keyword)) {
        return Some(Category::Laptop);
    }
    None
}

/// The topic gate: whether a message is about phones/laptops at all.
pub fn is_on_topic(text: &str) -> bool {
    let normalized = text.to_lowercase();
    TOPIC_KEYWORDS.iter().any(|keyword| normalized.contains(keyword))
}
