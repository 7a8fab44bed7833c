//! Deterministic fake shipment, package, and order records.
//!
//! Every record is derived from its identifier and the ledger's fixed `as_of`
//! timestamp, so the same id always yields the same record.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gcatalog::ShippingLedger;
//!
//! let as_of = NaiveDate::from_ymd_opt(2026, 3, 14)
//!     .and_then(|date| date.and_hms_opt(9, 30, 0))
//!     .expect("valid timestamp");
//! let ledger = ShippingLedger::new(as_of);
//! assert_eq!(ledger.shipping(4242), ledger.shipping(4242));
//! ```

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Money;

const SHIPPING_STATUSES: [&str; 6] = [
    "Processing",
    "Shipped",
    "In Transit",
    "Out for Delivery",
    "Delivered",
    "Exception",
];
const SHIPPING_CARRIERS: [&str; 4] = ["UPS", "FedEx", "DHL", "USPS"];
const ORIGINS: [&str; 5] = [
    "New York, NY",
    "Los Angeles, CA",
    "Chicago, IL",
    "Houston, TX",
    "Phoenix, AZ",
];
const DESTINATIONS: [&str; 5] = [
    "Seattle, WA",
    "Miami, FL",
    "Denver, CO",
    "Boston, MA",
    "Atlanta, GA",
];
const PACKAGE_TYPES: [&str; 6] = [
    "Electronics",
    "Clothing",
    "Books",
    "Home & Garden",
    "Automotive",
    "Health & Beauty",
];
const PACKAGE_LOCATIONS: [&str; 5] = [
    "Warehouse A",
    "Distribution Center B",
    "Local Facility C",
    "Delivery Vehicle",
    "Customer",
];
const ORDER_CARRIERS: [&str; 3] = ["UPS", "FedEx", "USPS"];

#[derive(Debug, Clone, PartialEq)]
pub struct ShippingRecord {
    pub id: i64,
    pub status: &'static str,
    pub carrier: &'static str,
    pub tracking_number: String,
    pub origin: &'static str,
    pub destination: &'static str,
    pub shipped: NaiveDate,
    pub expected_delivery: NaiveDate,
    pub last_updated: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageRecord {
    pub id: String,
    pub package_type: &'static str,
    pub location: &'static str,
    pub weight_lbs: f64,
    pub length_in: u32,
    pub width_in: u32,
    pub height_in: u32,
    pub insurance: Money,
    pub fragile: bool,
    pub last_scanned: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShipmentHit {
    Shipment {
        id: u32,
        status: &'static str,
        destination: &'static str,
    },
    Package {
        id: String,
        package_type: &'static str,
        location: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Processing { ships_on: NaiveDate },
    Shipped {
        carrier: &'static str,
        tracking_number: String,
        estimated_delivery: NaiveDate,
    },
    OutForDelivery { carrier: &'static str },
    Delivered { on: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingLedger {
    as_of: NaiveDateTime,
}

impl ShippingLedger {
    pub fn new(as_of: NaiveDateTime) -> Self {
        Self { as_of }
    }

    pub fn as_of(&self) -> NaiveDateTime {
        self.as_of
    }

    pub fn shipping(&self, id: i64) -> ShippingRecord {
        let mut rng = seeded("shipping", &[id.to_le_bytes().as_slice()]);

        let status = pick(&mut rng, &SHIPPING_STATUSES);
        let carrier = pick(&mut rng, &SHIPPING_CARRIERS);
        let origin = pick(&mut rng, &ORIGINS);
        let destination = pick(&mut rng, &DESTINATIONS);
        let tracking_number = format!(
            "{}{}",
            carrier.to_uppercase(),
            rng.gen_range(100_000_000..999_999_999)
        );
        let shipped = self.as_of.date() - TimeDelta::days(rng.gen_range(1..10));
        let expected_delivery = shipped + TimeDelta::days(rng.gen_range(3..7));

        ShippingRecord {
            id,
            status,
            carrier,
            tracking_number,
            origin,
            destination,
            shipped,
            expected_delivery,
            last_updated: self.as_of,
        }
    }

    pub fn package(&self, id: &str) -> PackageRecord {
        let mut rng = seeded("package", &[id.as_bytes()]);

        let package_type = pick(&mut rng, &PACKAGE_TYPES);
        let location = pick(&mut rng, &PACKAGE_LOCATIONS);
        let weight_lbs = ((rng.gen_range(0.0..50.0) + 0.5) * 100.0_f64).round() / 100.0;
        let length_in = rng.gen_range(6..36);
        let width_in = rng.gen_range(4..24);
        let height_in = rng.gen_range(2..18);
        let insurance = Money::from_dollars(rng.gen_range(50..2000));
        let fragile = rng.gen_range(0.0..1.0) > 0.7;
        let last_scanned = self.as_of - TimeDelta::hours(rng.gen_range(1..48));

        PackageRecord {
            id: id.to_string(),
            package_type,
            location,
            weight_lbs,
            length_in,
            width_in,
            height_in,
            insurance,
            fragile,
            last_scanned,
        }
    }

    /// One to five records loosely associated with `term`.
    pub fn search(&self, term: &str) -> Vec<ShipmentHit> {
        let mut rng = seeded("search", &[term.as_bytes()]);
        let count = rng.gen_range(1..6);

        (0..count)
            .map(|_| {
                if rng.gen_range(0.0..1.0) > 0.5 {
                    ShipmentHit::Shipment {
                        id: rng.gen_range(1000..9999),
                        status: pick(&mut rng, &["Processing", "Shipped", "In Transit", "Delivered"]),
                        destination: pick(&mut rng, &["New York", "Los Angeles", "Chicago", "Houston"]),
                    }
                } else {
                    ShipmentHit::Package {
                        id: format!("PKG{}", rng.gen_range(100_000..999_999)),
                        package_type: pick(&mut rng, &["Electronics", "Clothing", "Books"]),
                        location: pick(&mut rng, &["Warehouse", "In Transit", "Local Facility"]),
                    }
                }
            })
            .collect()
    }

    pub fn order(&self, order_number: &str) -> OrderStatus {
        let mut rng = seeded("order", &[order_number.as_bytes()]);
        let today = self.as_of.date();

        let status = rng.gen_range(0..4);
        let carrier = pick(&mut rng, &ORDER_CARRIERS);
        let tracking_number = format!("{carrier}{}", rng.gen_range(100_000..999_999));
        let estimated_delivery = today + TimeDelta::days(rng.gen_range(1..5));

        match status {
            0 => OrderStatus::Processing {
                ships_on: today + TimeDelta::days(1),
            },
            1 => OrderStatus::Shipped {
                carrier,
                tracking_number,
                estimated_delivery,
            },
            2 => OrderStatus::OutForDelivery { carrier },
            _ => OrderStatus::Delivered {
                on: today - TimeDelta::days(1),
            },
        }
    }

    /// Ticket number `TK<yyyyMMdd><4 digits>` for a support request.
    pub fn ticket_number(&self, customer_email: &str, issue_description: &str) -> String {
        let mut rng = seeded(
            "ticket",
            &[customer_email.as_bytes(), issue_description.as_bytes()],
        );
        format!(
            "TK{}{}",
            self.as_of.format("%Y%m%d"),
            rng.gen_range(1000..9999)
        )
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over the domain and each key part, with a zero byte after every
/// segment so `("ab", "c")` and `("a", "bc")` seed differently.
fn seed_for(domain: &str, parts: &[&[u8]]) -> u64 {
    std::iter::once(domain.as_bytes())
        .chain(parts.iter().copied())
        .flat_map(|segment| segment.iter().copied().chain(std::iter::once(0)))
        .fold(FNV_OFFSET, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        })
}

fn seeded(domain: &str, parts: &[&[u8]]) -> StdRng {
    StdRng::seed_from_u64(seed_for(domain, parts))
}

fn pick<R: Rng>(rng: &mut R, options: &[&'static str]) -> &'static str {
    options[rng.gen_range(0..options.len())]
}
