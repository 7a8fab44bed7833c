//! Two-operand arithmetic tools.

use gprovider::{ParameterKind, ToolDefinition};
use gtooling::{ToolError, ToolRegistry, parse_json_object, required_f64};

pub fn divide(a: f64, b: f64) -> Result<f64, ToolError> {
    if b == 0.0 {
        return Err(ToolError::invalid_arguments("Cannot divide by zero."));
    }

    Ok(a / b)
}

fn operands(args_json: &str) -> Result<(f64, f64), ToolError> {
    let args = parse_json_object(args_json)?;
    Ok((required_f64(&args, "a")?, required_f64(&args, "b")?))
}

fn definition(name: &str, description: &str) -> ToolDefinition {
    ToolDefinition::new(name, description)
        .param("a", ParameterKind::Number, "First operand")
        .param("b", ParameterKind::Number, "Second operand")
}

pub fn register_math_tools(registry: &mut ToolRegistry) -> Result<(), ToolError> {
    registry.register_sync_fn(
        definition(
            "add",
            "Addition of 2 numbers. Accept decimal and natural numbers. Return the sum of the numbers.",
        ),
        |args, _ctx| {
            let (a, b) = operands(&args)?;
            Ok((a + b).to_string())
        },
    )?;

    registry.register_sync_fn(
        definition(
            "subtract",
            "Subtraction of 2 numbers. Accept decimal and natural numbers. Return the difference of the numbers.",
        ),
        |args, _ctx| {
            let (a, b) = operands(&args)?;
            Ok((a - b).to_string())
        },
    )?;

    registry.register_sync_fn(
        definition(
            "multiply",
            "Multiplication of 2 numbers. Accept decimal and natural numbers. Return the product of the numbers.",
        ),
        |args, _ctx| {
            let (a, b) = operands(&args)?;
            Ok((a * b).to_string())
        },
    )?;

    registry.register_sync_fn(
        definition(
            "divide",
            "Division of 2 numbers. Accept decimal and natural numbers. Return the quotient of the numbers.",
        ),
        |args, _ctx| {
            let (a, b) = operands(&args)?;
            Ok(divide(a, b)?.to_string())
        },
    )
}
