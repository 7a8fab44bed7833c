//! `get_support_info`, `track_order`, `create_support_ticket`.

use std::sync::Arc;

use gprovider::{ParameterKind, ToolDefinition};
use gtooling::{ToolError, ToolRegistry, parse_json_object, required_string};

use crate::{OrderStatus, Storefront};

use super::require_non_blank;

const DATE_FORMAT: &str = "%b %d, %Y";

pub fn support_info(storefront: &Storefront, issue_type: &str) -> String {
    storefront.support.lookup(issue_type).to_string()
}

pub fn track_order(storefront: &Storefront, order_number: &str) -> Result<String, ToolError> {
    require_non_blank(order_number, "Order number cannot be empty.")?;

    let text = match storefront.ledger.order(order_number) {
        OrderStatus::Processing { ships_on } => format!(
            "Order {order_number}: Currently being processed. Estimated shipping date: {}",
            ships_on.format(DATE_FORMAT)
        ),
        OrderStatus::Shipped {
            carrier,
            tracking_number,
            estimated_delivery,
        } => format!(
            "Order {order_number}: Shipped via {carrier}. Tracking: {tracking_number}. Estimated delivery: {}",
            estimated_delivery.format(DATE_FORMAT)
        ),
        OrderStatus::OutForDelivery { carrier } => format!(
            "Order {order_number}: Out for delivery with {carrier}. Expected delivery today."
        ),
        OrderStatus::Delivered { on } => format!(
            "Order {order_number}: Delivered successfully on {}",
            on.format(DATE_FORMAT)
        ),
    };

    Ok(text)
}

pub fn create_support_ticket(
    storefront: &Storefront,
    customer_email: &str,
    issue_description: &str,
) -> Result<String, ToolError> {
    require_non_blank(customer_email, "Customer email cannot be empty.")?;
    require_non_blank(issue_description, "Issue description cannot be empty.")?;

    let ticket = storefront
        .ledger
        .ticket_number(customer_email, issue_description);

    Ok(format!(
        "Support ticket {ticket} created for {customer_email}. Issue: {issue_description}. Our support team will respond within 24 hours. You can track your ticket at gadgetsinc.com/support/track/{ticket}"
    ))
}

pub fn register_support_tools(
    registry: &mut ToolRegistry,
    storefront: Arc<Storefront>,
) -> Result<(), ToolError> {
    let shared = Arc::clone(&storefront);
    registry.register_sync_fn(
        ToolDefinition::new(
            "get_support_info",
            "Get customer support information for common issues and questions.",
        )
        .param(
            "issue_type",
            ParameterKind::String,
            "Topic: warranty, return, repair, shipping, payment, or contact",
        ),
        move |args, _ctx| {
            let args = parse_json_object(&args)?;
            Ok(support_info(&shared, &required_string(&args, "issue_type")?))
        },
    )?;

    let shared = Arc::clone(&storefront);
    registry.register_sync_fn(
        ToolDefinition::new(
            "track_order",
            "Track order status by order number. Provides current shipping and delivery information.",
        )
        .param("order_number", ParameterKind::String, "Order number, e.g. ORD123456"),
        move |args, _ctx| {
            let args = parse_json_object(&args)?;
            track_order(&shared, &required_string(&args, "order_number")?)
        },
    )?;

    registry.register_sync_fn(
        ToolDefinition::new(
            "create_support_ticket",
            "Generate a support ticket for customer issues. Returns ticket number and next steps.",
        )
        .param("customer_email", ParameterKind::String, "Customer email address")
        .param(
            "issue_description",
            ParameterKind::String,
            "Short description of the problem",
        ),
        move |args, _ctx| {
            let args = parse_json_object(&args)?;
            create_support_ticket(
                &storefront,
                &required_string(&args, "customer_email")?,
                &required_string(&args, "issue_description")?,
            )
        },
    )
}
