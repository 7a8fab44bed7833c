//! GadgetsInc demo datasets and the tool functions that read them.
//!
//! Everything here is read-only after construction. A [`Storefront`] is built
//! once at startup, wrapped in `Arc`, and handed to the tool registrations in
//! [`tools`] and to the mock backend's [`scripted`] rules.

pub mod catalog;
pub mod ledger;
pub mod money;
pub mod scripted;
pub mod storefront;
pub mod tools;

pub use catalog::{Product, ProductCatalog};
pub use ledger::{OrderStatus, PackageRecord, ShipmentHit, ShippingLedger, ShippingRecord};
pub use money::Money;
pub use storefront::{ShippingRates, StockEntry, StockLedger, Storefront, SupportDirectory};
