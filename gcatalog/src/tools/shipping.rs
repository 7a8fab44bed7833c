//! `get_shipping`, `get_package`, `search_shipments`.

use std::sync::Arc;

use gprovider::{ParameterKind, ToolDefinition};
use gtooling::{ToolError, ToolRegistry, parse_json_object, required_i64, required_string};

use crate::{ShipmentHit, Storefront};

use super::{TIMESTAMP_FORMAT, require_non_blank};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn get_shipping(storefront: &Storefront, shipping_id: i64) -> String {
    let record = storefront.ledger.shipping(shipping_id);

    format!(
        "Shipping ID: {}\nStatus: {}\nCarrier: {}\nTracking Number: {}\nOrigin: {}\nDestination: {}\nShipped Date: {}\nExpected Delivery: {}\nLast Updated: {}",
        record.id,
        record.status,
        record.carrier,
        record.tracking_number,
        record.origin,
        record.destination,
        record.shipped.format(DATE_FORMAT),
        record.expected_delivery.format(DATE_FORMAT),
        record.last_updated.format(TIMESTAMP_FORMAT),
    )
}

pub fn get_package(storefront: &Storefront, package_id: &str) -> Result<String, ToolError> {
    require_non_blank(package_id, "Package ID cannot be empty.")?;

    let record = storefront.ledger.package(package_id);
    Ok(format!(
        "Package ID: {}\nPackage Type: {}\nWeight: {} lbs\nDimensions: {}\" × {}\" × {}\"\nCurrent Location: {}\nInsurance Value: ${}\nFragile: {}\nLast Scanned: {}",
        record.id,
        record.package_type,
        record.weight_lbs,
        record.length_in,
        record.width_in,
        record.height_in,
        record.location,
        record.insurance.cents() / 100,
        if record.fragile { "Yes" } else { "No" },
        record.last_scanned.format(TIMESTAMP_FORMAT),
    ))
}

pub fn search_shipments(storefront: &Storefront, search_term: &str) -> Result<String, ToolError> {
    require_non_blank(search_term, "Search term cannot be empty.")?;

    let hits = storefront.ledger.search(search_term);
    let lines = hits
        .iter()
        .enumerate()
        .map(|(index, hit)| match hit {
            ShipmentHit::Shipment {
                id,
                status,
                destination,
            } => format!(
                "{}. Shipping #{id} - Status: {status} - Destination: {destination}",
                index + 1
            ),
            ShipmentHit::Package {
                id,
                package_type,
                location,
            } => format!(
                "{}. Package {id} - Type: {package_type} - Location: {location}",
                index + 1
            ),
        })
        .collect::<Vec<_>>();

    Ok(format!(
        "Search results for '{search_term}':\n\n{}\n\nFound {} result(s)",
        lines.join("\n"),
        hits.len()
    ))
}

pub fn register_shipping_tools(
    registry: &mut ToolRegistry,
    storefront: Arc<Storefront>,
) -> Result<(), ToolError> {
    let shared = Arc::clone(&storefront);
    registry.register_sync_fn(
        ToolDefinition::new(
            "get_shipping",
            "Get shipping information by shipping ID. Returns detailed shipping status, tracking information, and delivery details.",
        )
        .param("shipping_id", ParameterKind::Integer, "Shipping ID"),
        move |args, _ctx| {
            let args = parse_json_object(&args)?;
            Ok(get_shipping(&shared, required_i64(&args, "shipping_id")?))
        },
    )?;

    let shared = Arc::clone(&storefront);
    registry.register_sync_fn(
        ToolDefinition::new(
            "get_package",
            "Get package information by package ID. Returns package details including contents, weight, dimensions, and current location.",
        )
        .param("package_id", ParameterKind::String, "Package ID, e.g. PKG123456"),
        move |args, _ctx| {
            let args = parse_json_object(&args)?;
            get_package(&shared, &required_string(&args, "package_id")?)
        },
    )?;

    registry.register_sync_fn(
        ToolDefinition::new(
            "search_shipments",
            "Search shipping and package records by search term. Returns matching shipments and packages based on tracking numbers, package IDs, destinations, or other criteria.",
        )
        .param("search_term", ParameterKind::String, "Text to look for"),
        move |args, _ctx| {
            let args = parse_json_object(&args)?;
            search_shipments(&storefront, &required_string(&args, "search_term")?)
        },
    )
}
