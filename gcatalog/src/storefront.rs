//! Storefront datasets: featured products, stock, shipping rates, support topics.

use chrono::NaiveDateTime;

use crate::{Money, ProductCatalog, ShippingLedger};

/// Units on hand for one product key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockEntry {
    pub units: u32,
    pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct StockLedger {
    entries: Vec<(String, StockEntry)>,
}

impl StockLedger {
    pub fn new(entries: impl IntoIterator<Item = (String, StockEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn demo() -> Self {
        let entry = |key: &str, units: u32| {
            (
                key.to_string(),
                StockEntry {
                    units,
                    status: "In Stock".to_string(),
                },
            )
        };

        Self::new([
            entry("smartphone", 156),
            entry("laptop", 43),
            entry("smartwatch", 892),
            entry("headphones", 234),
            entry("tablet", 67),
        ])
    }

    /// Case-insensitive lookup by product key.
    pub fn get(&self, key: &str) -> Option<&StockEntry> {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, entry)| entry)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

/// Flat per-destination base rate plus a per-kilogram surcharge.
#[derive(Debug, Clone)]
pub struct ShippingRates {
    regions: Vec<(Vec<String>, Money)>,
    international: Money,
    per_kg: Money,
}

impl ShippingRates {
    pub fn demo() -> Self {
        let region = |names: &[&str], cents: i64| {
            (
                names.iter().map(|name| name.to_string()).collect::<Vec<_>>(),
                Money::from_cents(cents),
            )
        };

        Self {
            regions: vec![
                region(&["domestic", "usa", "us"], 599),
                region(&["canada"], 1_299),
                region(&["europe"], 1_999),
                region(&["asia"], 2_499),
            ],
            international: Money::from_cents(2_999),
            per_kg: Money::from_cents(250),
        }
    }

    /// Base rate for `destination`; unknown destinations use the international rate.
    pub fn base_rate(&self, destination: &str) -> Money {
        let destination = destination.trim().to_lowercase();
        self.regions
            .iter()
            .find(|(names, _)| names.iter().any(|name| *name == destination))
            .map(|(_, rate)| *rate)
            .unwrap_or(self.international)
    }

    /// Base rate plus the per-kilogram surcharge. `None` when the total does
    /// not fit in a [`Money`].
    pub fn quote(&self, weight_kg: f64, destination: &str) -> Option<Money> {
        let surcharge =
            Money::try_from_dollars_f64(weight_kg * self.per_kg.cents() as f64 / 100.0)?;
        self.base_rate(destination).checked_add(surcharge)
    }
}

#[derive(Debug, Clone)]
pub struct SupportDirectory {
    topics: Vec<(String, String)>,
    general: String,
}

impl SupportDirectory {
    pub fn demo() -> Self {
        let topic = |key: &str, text: &str| (key.to_string(), text.to_string());

        Self {
            topics: vec![
                topic(
                    "warranty",
                    "All GadgetsInc products come with a 2-year manufacturer warranty. Contact support at support@gadgetsinc.com for warranty claims.",
                ),
                topic(
                    "return",
                    "30-day return policy for all products. Items must be in original condition. Return shipping is free for defective items.",
                ),
                topic(
                    "repair",
                    "We offer repair services for all our products. Schedule a repair appointment at gadgetsinc.com/repair or call 1-800-GADGETS.",
                ),
                topic(
                    "shipping",
                    "Free shipping on orders over $99. Standard shipping takes 3-5 business days. Express shipping available for next-day delivery.",
                ),
                topic(
                    "payment",
                    "We accept all major credit cards, PayPal, and Apple Pay. Financing options available for purchases over $500.",
                ),
                topic(
                    "contact",
                    "Customer Service: 1-800-GADGETS (1-800-423-4387), Email: support@gadgetsinc.com, Hours: Mon-Fri 8AM-8PM EST",
                ),
            ],
            general: "For general support questions, please contact our customer service team at 1-800-GADGETS or support@gadgetsinc.com. Available topics: warranty, return, repair, shipping, payment, contact.".to_string(),
        }
    }

    pub fn get(&self, topic: &str) -> Option<&str> {
        let topic = topic.to_lowercase();
        self.topics
            .iter()
            .find(|(key, _)| *key == topic)
            .map(|(_, text)| text.as_str())
    }

    /// The topic text, or the general contact message for unknown topics.
    pub fn lookup(&self, topic: &str) -> &str {
        self.get(topic).unwrap_or(&self.general)
    }
}

/// Everything the storefront tools read. Built once and shared behind `Arc`.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub catalog: ProductCatalog,
    pub stock: StockLedger,
    pub rates: ShippingRates,
    pub support: SupportDirectory,
    pub ledger: ShippingLedger,
    featured: Vec<(String, u32)>,
}

impl Storefront {
    pub fn demo(as_of: NaiveDateTime) -> Self {
        let featured = [
            ("smartphone", 1001),
            ("laptop", 1002),
            ("smartwatch", 1003),
            ("headphones", 1004),
            ("tablet", 1005),
        ]
        .into_iter()
        .map(|(key, number)| (key.to_string(), number))
        .collect();

        Self {
            catalog: ProductCatalog::demo(),
            stock: StockLedger::demo(),
            rates: ShippingRates::demo(),
            support: SupportDirectory::demo(),
            ledger: ShippingLedger::new(as_of),
            featured,
        }
    }

    pub fn as_of(&self) -> NaiveDateTime {
        self.ledger.as_of()
    }

    /// Product keys accepted by `product_info`, in display order.
    pub fn featured_keys(&self) -> impl Iterator<Item = &str> {
        self.featured.iter().map(|(key, _)| key.as_str())
    }

    /// One-line summary such as `GadgetsInc Laptop Pro - ... Price: $1,299`.
    pub fn product_info(&self, key: &str) -> Option<String> {
        let key = key.to_lowercase();
        let number = self
            .featured
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, number)| *number)?;
        let product = self.catalog.get(number)?;

        Some(format!(
            "{} - {}. Price: {}",
            product.name,
            product.description,
            product.price.whole_dollars()
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn as_of() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .expect("valid timestamp")
    }

    #[test]
    fn product_info_matches_storefront_copy() {
        let storefront = Storefront::demo(as_of());
        assert_eq!(
            storefront.product_info("Laptop").as_deref(),
            Some(
                "GadgetsInc Laptop Pro - High-performance laptop with 16GB RAM, 1TB SSD, and 15-hour battery. Price: $1,299"
            )
        );
        assert!(storefront.product_info("drone").is_none());
    }

    #[test]
    fn shipping_quotes_add_weight_surcharge_in_cents() {
        let rates = ShippingRates::demo();
        let quote = |weight_kg, destination| {
            rates
                .quote(weight_kg, destination)
                .map(|cost| cost.to_string())
        };
        assert_eq!(quote(1.5, "domestic").as_deref(), Some("$9.74"));
        assert_eq!(quote(2.0, "Europe").as_deref(), Some("$24.99"));
        assert_eq!(quote(3.0, "asia").as_deref(), Some("$32.49"));
        assert_eq!(quote(1.0, "US").as_deref(), Some("$8.49"));
        assert_eq!(quote(0.0, "antarctica").as_deref(), Some("$29.99"));
    }

    #[test]
    fn quotes_that_overflow_are_refused() {
        let rates = ShippingRates::demo();
        assert_eq!(rates.quote(1e300, "europe"), None);
        assert_eq!(rates.quote(1e17, "europe"), None);
        assert!(rates.quote(1e6, "europe").is_some());
    }

    #[test]
    fn stock_and_support_lookups_ignore_case() {
        let stock = StockLedger::demo();
        assert_eq!(stock.get("SmartWatch").map(|entry| entry.units), Some(892));
        assert!(stock.get("drone").is_none());

        let support = SupportDirectory::demo();
        assert!(support.lookup("WARRANTY").starts_with("All GadgetsInc products"));
        assert!(support.lookup("billing").starts_with("For general support questions"));
    }
}
