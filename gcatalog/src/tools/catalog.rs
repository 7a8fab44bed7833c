//! `get_product`, `search_product`, `search_tag`.

use std::sync::Arc;

use gprovider::{ParameterKind, ToolDefinition};
use gtooling::{ToolError, ToolRegistry, parse_json_object, required_i64, required_string};

use crate::{Product, Storefront};

use super::{TIMESTAMP_FORMAT, require_non_blank};

const DETAIL_HINT: &str = "Use get_product with the product number for detailed information.";

pub fn get_product(storefront: &Storefront, product_no: i64) -> Result<String, ToolError> {
    if product_no <= 0 {
        return Err(ToolError::invalid_arguments(
            "Product number must be a positive integer.",
        ));
    }

    let product = u32::try_from(product_no)
        .ok()
        .and_then(|number| storefront.catalog.get(number))
        .ok_or_else(|| {
            let available = storefront
                .catalog
                .numbers()
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            ToolError::invalid_arguments(format!(
                "Product with number {product_no} not found. Available product numbers: {available}"
            ))
        })?;

    Ok(format!(
        "Product Number: {}\nName: {}\nDescription: {}\nPrice: {}\nCategory: {}\nTags: {}\nIn Stock: Yes\nLast Updated: {}",
        product.number,
        product.name,
        product.description,
        product.price,
        product.category,
        product.tags.join(", "),
        storefront.as_of().format(TIMESTAMP_FORMAT),
    ))
}

pub fn search_product(storefront: &Storefront, search_term: &str) -> Result<String, ToolError> {
    require_non_blank(search_term, "Search term cannot be empty.")?;

    let hits = storefront.catalog.search(search_term);
    if hits.is_empty() {
        return Ok(format!(
            "No products found matching '{search_term}'. Try searching for terms like 'smartphone', 'laptop', 'camera', or 'wireless'."
        ));
    }

    let lines = hits
        .iter()
        .enumerate()
        .map(|(index, product)| {
            format!(
                "{}. Product #{}: {} - {} ({})",
                index + 1,
                product.number,
                product.name,
                product.price,
                product.category
            )
        })
        .collect::<Vec<_>>();

    Ok(format!(
        "Search results for '{search_term}':\n\n{}\n\n{}",
        lines.join("\n"),
        found_footer(&hits)
    ))
}

pub fn search_tag(storefront: &Storefront, tag: &str) -> Result<String, ToolError> {
    require_non_blank(tag, "Search tag cannot be empty.")?;

    let hits = storefront.catalog.search_tag(tag);
    if hits.is_empty() {
        return Ok(format!(
            "No products found with tag '{tag}'. Available tags: {}",
            storefront.catalog.all_tags().join(", ")
        ));
    }

    let needle = tag.to_lowercase();
    let entries = hits
        .iter()
        .enumerate()
        .map(|(index, product)| {
            format!(
                "{}. Product #{}: {} - {}\n   Tags: {}",
                index + 1,
                product.number,
                product.name,
                product.price,
                product.tags_matching(&needle).collect::<Vec<_>>().join(", ")
            )
        })
        .collect::<Vec<_>>();

    Ok(format!(
        "Products with tag '{tag}':\n\n{}\n\n{}",
        entries.join("\n\n"),
        found_footer(&hits)
    ))
}

fn found_footer(hits: &[&Product]) -> String {
    format!("Found {} product(s). {DETAIL_HINT}", hits.len())
}

pub fn register_catalog_tools(
    registry: &mut ToolRegistry,
    storefront: Arc<Storefront>,
) -> Result<(), ToolError> {
    let shared = Arc::clone(&storefront);
    registry.register_sync_fn(
        ToolDefinition::new(
            "get_product",
            "Get product information by product number. Returns detailed product information including name, description, price, category, and tags.",
        )
        .param("product_no", ParameterKind::Integer, "Product number, e.g. 1001"),
        move |args, _ctx| {
            let args = parse_json_object(&args)?;
            get_product(&shared, required_i64(&args, "product_no")?)
        },
    )?;

    let shared = Arc::clone(&storefront);
    registry.register_sync_fn(
        ToolDefinition::new(
            "search_product",
            "Search products by search term. Returns matching products based on name, description, or category. Supports partial matching and case-insensitive search.",
        )
        .param("search_term", ParameterKind::String, "Text to look for"),
        move |args, _ctx| {
            let args = parse_json_object(&args)?;
            search_product(&shared, &required_string(&args, "search_term")?)
        },
    )?;

    registry.register_sync_fn(
        ToolDefinition::new(
            "search_tag",
            "Search products by tag. Returns products that match the specified tag. Tags include categories like 'smartphone', 'wireless', 'gaming', etc.",
        )
        .param("search_tag", ParameterKind::String, "Tag to look for"),
        move |args, _ctx| {
            let args = parse_json_object(&args)?;
            search_tag(&storefront, &required_string(&args, "search_tag")?)
        },
    )
}
