//! Calculator App
//!
//! Four single-shot arithmetic tools sharing one widget. Division by zero is
//! reported in the payload (`error`), not as a failed tool call.

use std::path::Path;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::mcp::protocol::{Tool, ToolAnnotations};
use crate::mcp::{parse_args, AppContext, McpApp, ToolError, ToolOutput, WidgetResource};

pub const APP_NAME: &str = "Calculator";
pub const APP_VERSION: &str = "1.0.0";

pub const RESOURCE_URI: &str = "ui://calculator/widget.html";

/// Arithmetic operation, one tool each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Tool name
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "−",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Operation::Add => "Add two numbers",
            Operation::Subtract => "Subtract the second number from the first",
            Operation::Multiply => "Multiply two numbers",
            Operation::Divide => "Divide the first number by the second",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Operation::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Apply to two operands; `Err` carries the message shown in the widget
    pub fn apply(&self, a: f64, b: f64) -> Result<f64, &'static str> {
        let value = match self {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide if b == 0.0 => return Err("Division by zero"),
            Operation::Divide => a / b,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err("Result is not a finite number")
        }
    }
}

#[derive(Debug, Deserialize)]
struct Operands {
    a: f64,
    b: f64,
}

/// Structured payload consumed by the calculator widget
#[derive(Debug, Serialize)]
pub struct Calculation {
    pub operation: &'static str,
    pub operand1: Value,
    pub operand2: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub equation: String,
    pub timestamp: String,
}

pub fn calculate(operation: Operation, a: f64, b: f64) -> Calculation {
    let outcome = operation.apply(a, b);
    let rhs = match outcome {
        Ok(value) => format_number(value),
        Err(_) => "undefined".to_string(),
    };

    Calculation {
        operation: operation.name(),
        operand1: number_value(a),
        operand2: number_value(b),
        result: outcome.ok().map(number_value),
        error: outcome.err().map(str::to_string),
        equation: format!(
            "{} {} {} = {}",
            format_number(a),
            operation.symbol(),
            format_number(b),
            rhs
        ),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Whole numbers print without a fractional part. Magnitudes from `1e21`
/// up and below `1e-6` switch to exponent form, e.g. `1e+300` or `2.5e-7`.
fn format_number(n: f64) -> String {
    let magnitude = n.abs();
    if n.is_finite() && n != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{:e}", n);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else if n.fract() == 0.0 && magnitude < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        json!(n as i64)
    } else {
        json!(n)
    }
}

pub struct CalculatorApp {
    ctx: AppContext,
    widget: WidgetResource,
}

impl CalculatorApp {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            widget: WidgetResource {
                uri: RESOURCE_URI,
                name: "calculator-widget",
                description: "Calculator display with operation buttons",
                app_id: "calculator",
                meta: None,
            },
        }
    }
}

#[async_trait]
impl McpApp for CalculatorApp {
    fn id(&self) -> &'static str {
        "calculator"
    }

    fn name(&self) -> &'static str {
        APP_NAME
    }

    fn version(&self) -> &'static str {
        APP_VERSION
    }

    fn tools(&self) -> Vec<Tool> {
        Operation::ALL
            .iter()
            .map(|op| Tool {
                name: op.name().into(),
                title: None,
                description: op.description().into(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "a": { "type": "number", "description": "First operand" },
                        "b": { "type": "number", "description": "Second operand" }
                    },
                    "required": ["a", "b"]
                }),
                annotations: Some(ToolAnnotations::read_only()),
                meta: Some(json!({ "ui": { "resourceUri": RESOURCE_URI } })),
            })
            .collect()
    }

    fn widget(&self) -> &WidgetResource {
        &self.widget
    }

    fn widget_dir(&self) -> &Path {
        &self.ctx.widget_dir
    }

    async fn call_tool(&self, name: &str, args: Value) -> Result<ToolOutput, ToolError> {
        let operation =
            Operation::from_name(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let Operands { a, b } = parse_args::<Operands>(args)?;

        let calculation = calculate(operation, a, b);
        tracing::info!(equation = %calculation.equation, "calculated");

        let narrative = match &calculation.error {
            Some(error) => error.clone(),
            None => calculation.equation.clone(),
        };
        let structured = serde_json::to_value(&calculation)
            .map_err(|e| ToolError::Execution(format!("Serialization error: {}", e)))?;

        Ok(ToolOutput {
            structured,
            narrative,
        })
    }
}
