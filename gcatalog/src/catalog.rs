//! The product catalog.
//!
//! ```rust
//! use gcatalog::ProductCatalog;
//!
//! let catalog = ProductCatalog::demo();
//! let hits = catalog.search("WIRELESS");
//! let numbers: Vec<u32> = hits.iter().map(|product| product.number).collect();
//! assert_eq!(numbers, vec![1004, 1010]);
//! ```

use gcommon::Registry;

use crate::Money;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub number: u32,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub tags: Vec<String>,
    pub category: String,
}

impl Product {
    pub fn new(
        number: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        tags: &[&str],
        category: impl Into<String>,
    ) -> Self {
        Self {
            number,
            name: name.into(),
            description: description.into(),
            price,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            category: category.into(),
        }
    }

    /// Tags containing `needle` (already lower-cased), in declared order.
    pub fn tags_matching<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tags
            .iter()
            .map(String::as_str)
            .filter(move |tag| tag.to_lowercase().contains(needle))
    }

    fn text_matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}

/// Read-only product table keyed by product number.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Registry<u32, Product>,
}

impl ProductCatalog {
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let mut registry = Registry::new();
        for product in products {
            registry.insert(product.number, product);
        }

        Self { products: registry }
    }

    pub fn demo() -> Self {
        Self::new([
            Product::new(
                1001,
                "GadgetsInc Smartphone X1",
                "Latest 5G smartphone with AI-powered camera and 48-hour battery life",
                Money::from_dollars(899),
                &["smartphone", "5G", "AI", "camera", "mobile"],
                "Electronics",
            ),
            Product::new(
                1002,
                "GadgetsInc Laptop Pro",
                "High-performance laptop with 16GB RAM, 1TB SSD, and 15-hour battery",
                Money::from_dollars(1_299),
                &["laptop", "high-performance", "RAM", "SSD", "portable"],
                "Electronics",
            ),
            Product::new(
                1003,
                "GadgetsInc Watch Elite",
                "Fitness tracking smartwatch with health monitoring and GPS",
                Money::from_dollars(399),
                &["smartwatch", "fitness", "health", "GPS", "wearable"],
                "Wearables",
            ),
            Product::new(
                1004,
                "GadgetsInc Audio Pro",
                "Wireless noise-canceling headphones with premium sound quality",
                Money::from_dollars(249),
                &["headphones", "wireless", "noise-canceling", "audio", "music"],
                "Audio",
            ),
            Product::new(
                1005,
                "GadgetsInc Tablet Max",
                "12-inch tablet with stylus support and all-day battery",
                Money::from_dollars(699),
                &["tablet", "stylus", "productivity", "portable", "touch"],
                "Electronics",
            ),
            Product::new(
                1006,
                "GadgetsInc Camera 4K",
                "Professional 4K camera with advanced stabilization",
                Money::from_dollars(1_599),
                &["camera", "4K", "professional", "stabilization", "photography"],
                "Photography",
            ),
            Product::new(
                1007,
                "GadgetsInc Speaker Mesh",
                "Smart home speaker with voice assistant integration",
                Money::from_dollars(199),
                &["speaker", "smart-home", "voice-assistant", "audio", "home"],
                "Smart Home",
            ),
            Product::new(
                1008,
                "GadgetsInc Gaming Mouse",
                "High-precision gaming mouse with customizable RGB",
                Money::from_dollars(89),
                &["mouse", "gaming", "precision", "RGB", "accessories"],
                "Gaming",
            ),
            Product::new(
                1009,
                "GadgetsInc Drone Sky",
                "Consumer drone with 4K camera and 30-minute flight time",
                Money::from_dollars(899),
                &["drone", "4K", "camera", "flight", "aerial"],
                "Drones",
            ),
            Product::new(
                1010,
                "GadgetsInc Charger Ultra",
                "Fast wireless charger compatible with all devices",
                Money::from_dollars(59),
                &["charger", "wireless", "fast-charging", "universal", "accessories"],
                "Accessories",
            ),
        ])
    }

    pub fn get(&self, number: u32) -> Option<&Product> {
        self.products.get(&number)
    }

    /// Product numbers in ascending order.
    pub fn numbers(&self) -> Vec<u32> {
        self.products.keys().copied().collect()
    }

    /// Case-insensitive substring match over name, description, and category.
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let needle = term.to_lowercase();
        self.products
            .values()
            .filter(|product| product.text_matches(&needle))
            .collect()
    }

    /// Products with at least one tag containing `tag`, case-insensitively.
    pub fn search_tag(&self, tag: &str) -> Vec<&Product> {
        let needle = tag.to_lowercase();
        self.products
            .values()
            .filter(|product| product.tags_matching(&needle).next().is_some())
            .collect()
    }

    /// Every distinct tag, ordered case-insensitively.
    pub fn all_tags(&self) -> Vec<&str> {
        let mut tags = self
            .products
            .values()
            .flat_map(|product| product.tags.iter().map(String::as_str))
            .collect::<Vec<_>>();

        tags.sort_by(|left, right| {
            left.to_lowercase()
                .cmp(&right.to_lowercase())
                .then_with(|| left.cmp(right))
        });
        tags.dedup();
        tags
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_has_ten_products_in_number_order() {
        let catalog = ProductCatalog::demo();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.numbers().first(), Some(&1001));
        assert_eq!(catalog.numbers().last(), Some(&1010));
        assert_eq!(catalog.get(1002).map(|p| p.price), Some(Money::from_dollars(1_299)));
        assert!(catalog.get(999).is_none());
    }

    #[test]
    fn search_covers_name_description_and_category() {
        let catalog = ProductCatalog::demo();

        let by_category = catalog.search("smart home");
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].number, 1007);

        let by_description: Vec<u32> = catalog.search("4k").iter().map(|p| p.number).collect();
        assert_eq!(by_description, vec![1006, 1009]);

        assert!(catalog.search("toaster").is_empty());
    }

    #[test]
    fn tag_search_matches_substrings_case_insensitively() {
        let catalog = ProductCatalog::demo();
        let hits: Vec<u32> = catalog.search_tag("ACCESS").iter().map(|p| p.number).collect();
        assert_eq!(hits, vec![1008, 1010]);

        let drone = catalog.get(1009).expect("drone exists");
        assert_eq!(drone.tags_matching("4k").collect::<Vec<_>>(), vec!["4K"]);
    }

    #[test]
    fn all_tags_are_unique_and_sorted_ignoring_case() {
        let catalog = ProductCatalog::demo();
        let tags = catalog.all_tags();

        assert_eq!(tags.iter().filter(|tag| **tag == "camera").count(), 1);
        assert_eq!(&tags[..3], &["4K", "5G", "accessories"]);
        let position = |needle: &str| tags.iter().position(|tag| *tag == needle);
        assert!(position("AI") < position("audio"));
        assert!(position("GPS") < position("health"));
    }
}
