//! `get_product_info`, `calculate_shipping`, `check_stock`.

use std::sync::Arc;

use gprovider::{ParameterKind, ToolDefinition};
use gtooling::{ToolError, ToolRegistry, parse_json_object, required_f64, required_string};

use crate::{Money, Storefront};

pub fn product_info(storefront: &Storefront, product_name: &str) -> String {
    storefront.product_info(product_name).unwrap_or_else(|| {
        let available = storefront.featured_keys().collect::<Vec<_>>().join(", ");
        format!("Sorry, I couldn't find information about '{product_name}'. Available products: {available}")
    })
}

pub fn shipping_cost(
    storefront: &Storefront,
    weight_kg: f64,
    destination: &str,
) -> Result<Money, ToolError> {
    if !weight_kg.is_finite() || weight_kg < 0.0 {
        return Err(ToolError::invalid_arguments(
            "Weight must be a non-negative number of kilograms.",
        ));
    }

    storefront
        .rates
        .quote(weight_kg, destination)
        .ok_or_else(|| ToolError::invalid_arguments("Weight is too large to quote."))
}

pub fn stock_status(storefront: &Storefront, product_name: &str) -> String {
    match storefront.stock.get(product_name) {
        Some(entry) => format!("{product_name}: {} units {}", entry.units, entry.status),
        None => format!("Product '{product_name}' not found in inventory system."),
    }
}

pub fn register_storefront_tools(
    registry: &mut ToolRegistry,
    storefront: Arc<Storefront>,
) -> Result<(), ToolError> {
    let shared = Arc::clone(&storefront);
    registry.register_sync_fn(
        ToolDefinition::new(
            "get_product_info",
            "Get information about GadgetsInc products. Provides details about available gadgets and their features.",
        )
        .param(
            "product_name",
            ParameterKind::String,
            "Product to describe: smartphone, laptop, smartwatch, headphones, or tablet",
        ),
        move |args, _ctx| {
            let args = parse_json_object(&args)?;
            Ok(product_info(&shared, &required_string(&args, "product_name")?))
        },
    )?;

    let shared = Arc::clone(&storefront);
    registry.register_sync_fn(
        ToolDefinition::new(
            "calculate_shipping",
            "Calculate shipping cost based on product weight and destination. Returns estimated shipping cost in USD.",
        )
        .param("weight_kg", ParameterKind::Number, "Package weight in kilograms")
        .param(
            "destination",
            ParameterKind::String,
            "Destination region: domestic, usa, us, canada, europe, asia, or any other for international",
        ),
        move |args, _ctx| {
            let args = parse_json_object(&args)?;
            let weight_kg = required_f64(&args, "weight_kg")?;
            let destination = required_string(&args, "destination")?;
            Ok(shipping_cost(&shared, weight_kg, &destination)?.to_string())
        },
    )?;

    registry.register_sync_fn(
        ToolDefinition::new(
            "check_stock",
            "Check product availability and stock status. Returns current stock information.",
        )
        .param("product_name", ParameterKind::String, "Product to check"),
        move |args, _ctx| {
            let args = parse_json_object(&args)?;
            Ok(stock_status(&storefront, &required_string(&args, "product_name")?))
        },
    )
}
