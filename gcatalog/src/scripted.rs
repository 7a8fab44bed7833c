//! Keyword rules that let the mock backend answer storefront questions.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use chrono::NaiveDate;
//! use gcatalog::Storefront;
//! use gcatalog::scripted::{HELP_TEXT, storefront_rules};
//! use gprovider::adapters::mock::MockProvider;
//! use gprovider::{Message, ModelRequest};
//!
//! let as_of = NaiveDate::from_ymd_opt(2026, 3, 14)
//!     .and_then(|date| date.and_hms_opt(9, 30, 0))
//!     .expect("valid timestamp");
//! let storefront = Arc::new(Storefront::demo(as_of));
//! let mock = MockProvider::new(HELP_TEXT).with_rules(storefront_rules(storefront));
//!
//! let reply = mock.reply(&ModelRequest::new("mock", vec![Message::user("Shipping cost to Europe?")]));
//! assert_eq!(reply, "Shipping cost for 1.5kg to europe: $23.74");
//! ```

use std::sync::Arc;

use gprovider::adapters::mock::{ResponseRule, Trigger};

use crate::Storefront;
use crate::tools::{storefront as shop, support};

pub const HELP_TEXT: &str = "Hello! I'm your GadgetsInc AI assistant. I can help you with:\n\n\
• Product information (smartphones, laptops, smartwatches, headphones, tablets)\n\
• Shipping cost calculations\n\
• Stock availability\n\
• Order tracking\n\
• Customer support and warranty information\n\n\
What would you like to know about?";

const DEMO_ORDER: &str = "ORD123456";

/// Ordered rules; the first one that matches and produces a reply wins.
pub fn storefront_rules(storefront: Arc<Storefront>) -> Vec<ResponseRule> {
    let mut rules = Vec::new();

    for (name, keywords) in [
        ("smartphone", &["smartphone", "phone"][..]),
        ("laptop", &["laptop"][..]),
        ("smartwatch", &["smartwatch", "watch"][..]),
        ("headphones", &["headphones"][..]),
        ("tablet", &["tablet"][..]),
    ] {
        let shared = Arc::clone(&storefront);
        rules.push(ResponseRule::new(
            format!("product:{name}"),
            Trigger::any(keywords.iter().copied()),
            move |_| shared.product_info(name),
        ));
    }

    let shared = Arc::clone(&storefront);
    rules.push(ResponseRule::new(
        "shipping-quote",
        Trigger::all(["shipping", "cost"]),
        move |text| {
            let (weight_kg, destination) = shipping_question(text);
            let cost = shared.rates.quote(weight_kg, destination)?;
            Some(format!(
                "Shipping cost for {weight_kg}kg to {destination}: {cost}"
            ))
        },
    ));

    let shared = Arc::clone(&storefront);
    rules.push(ResponseRule::new(
        "stock",
        Trigger::any(["stock", "available"]),
        move |text| {
            let key = shared.stock.keys().find(|key| text.contains(key))?;
            Some(shop::stock_status(&shared, key))
        },
    ));

    let shared = Arc::clone(&storefront);
    rules.push(ResponseRule::new(
        "track-order",
        Trigger::all(["track", "order"]),
        move |_| support::track_order(&shared, DEMO_ORDER).ok(),
    ));

    let shared = Arc::clone(&storefront);
    rules.push(ResponseRule::new(
        "warranty",
        Trigger::any(["return", "warranty"]),
        move |_| Some(support::support_info(&shared, "warranty")),
    ));

    rules.push(ResponseRule::new(
        "contact",
        Trigger::any(["support", "help", "contact"]),
        move |_| Some(support::support_info(&storefront, "contact")),
    ));

    rules
}

/// Weight and destination mentioned in a lower-cased shipping question.
/// Later matches override earlier ones.
fn shipping_question(text: &str) -> (f64, &'static str) {
    let mut destination = "domestic";
    for region in ["europe", "canada", "asia"] {
        if text.contains(region) {
            destination = region;
        }
    }

    let mut weight_kg = 1.5;
    if text.contains("2kg") || text.contains("2 kg") {
        weight_kg = 2.0;
    }
    if text.contains("3kg") || text.contains("3 kg") {
        weight_kg = 3.0;
    }

    (weight_kg, destination)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipping_question_defaults_and_overrides() {
        assert_eq!(shipping_question("what does shipping cost?"), (1.5, "domestic"));
        assert_eq!(shipping_question("shipping cost 2 kg to canada"), (2.0, "canada"));
        assert_eq!(shipping_question("europe or asia, 2kg or 3kg"), (3.0, "asia"));
    }

    #[test]
    fn weight_renders_without_trailing_zeros() {
        assert_eq!(format!("{}", 2.0_f64), "2");
        assert_eq!(format!("{}", 1.5_f64), "1.5");
    }
}
