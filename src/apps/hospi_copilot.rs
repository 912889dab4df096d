//! Hospitalisation & Care Journey Copilot
//!
//! Exposes the hospital admission journey as the `hospital_journey` tool.
//! The server keeps no session: the caller resends the accumulated state on
//! every call and receives the next step plus the updated state.

use std::path::Path;

use async_trait::async_trait;
use hospi_journey::{advance, JourneyArgs, JourneyPayload, RoomType, Step};
use serde_json::{json, Value};

use crate::mcp::protocol::{Tool, ToolAnnotations};
use crate::mcp::{parse_args, AppContext, McpApp, ToolError, ToolOutput, WidgetResource};

pub const APP_NAME: &str = "Hospitalisation & Care Journey Copilot";
pub const APP_VERSION: &str = "1.0.0";

pub const TOOL_NAME: &str = "hospital_journey";

/// Versioned for host-side cache control
pub const RESOURCE_URI: &str = "ui://hospi-copilot/widget-v1.html";

pub struct HospiCopilotApp {
    ctx: AppContext,
    widget: WidgetResource,
}

impl HospiCopilotApp {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            widget: WidgetResource {
                uri: RESOURCE_URI,
                name: "hospi-copilot-widget",
                description: "Step-by-step hospital admission form",
                app_id: "hospi-copilot",
                meta: None,
            },
        }
    }

    /// Validate arguments and advance the journey by one step
    pub fn invoke(&self, args: Value) -> Result<ToolOutput, ToolError> {
        let args: JourneyArgs = parse_args(args)?;
        let (step, state) = args.into_parts();

        let outcome = advance(step, state);
        tracing::info!("Hospital journey: step={} -> nextStep={}", step, outcome.step);

        let payload = JourneyPayload {
            step: outcome.step,
            state: outcome.state,
        };
        let structured = serde_json::to_value(&payload)
            .map_err(|e| ToolError::Execution(format!("Serialization error: {}", e)))?;

        Ok(ToolOutput {
            structured,
            narrative: outcome.message.to_string(),
        })
    }
}

#[async_trait]
impl McpApp for HospiCopilotApp {
    fn id(&self) -> &'static str {
        "hospi-copilot"
    }

    fn name(&self) -> &'static str {
        APP_NAME
    }

    fn version(&self) -> &'static str {
        APP_VERSION
    }

    fn tools(&self) -> Vec<Tool> {
        vec![Tool {
            name: TOOL_NAME.into(),
            title: Some("Hospital Journey".into()),
            description:
                "Guide the user through a hospital admission flow and return UI state for the widget"
                    .into(),
            input_schema: input_schema(),
            annotations: Some(ToolAnnotations::read_only()),
            meta: Some(json!({ "ui": { "resourceUri": RESOURCE_URI } })),
        }]
    }

    fn widget(&self) -> &WidgetResource {
        &self.widget
    }

    fn widget_dir(&self) -> &Path {
        &self.ctx.widget_dir
    }

    async fn call_tool(&self, name: &str, args: Value) -> Result<ToolOutput, ToolError> {
        match name {
            TOOL_NAME => self.invoke(args),
            _ => Err(ToolError::UnknownTool(name.to_string())),
        }
    }
}

fn input_schema() -> Value {
    let steps: Vec<&str> = Step::ALL.iter().map(Step::as_str).collect();
    let room_types: Vec<&str> = RoomType::ALL.iter().map(RoomType::as_str).collect();
    let text = |description: &str| json!({ "type": "string", "description": description });
    let flag = |description: &str| json!({ "type": "boolean", "description": description });

    json!({
        "type": "object",
        "properties": {
            "step": {
                "type": "string",
                "enum": steps,
                "default": "start",
                "description": "Current step in the hospitalization journey"
            },
            "state": {
                "type": "object",
                "description": "Current state data accumulated through the journey",
                "properties": {
                    "memberId": text("Member number"),
                    "memberName": text("Name of the patient"),
                    "hospitalName": text("Hospital name"),
                    "hospitalCity": text("City or municipality of the hospital"),
                    "abroad": flag("Whether the hospital is outside Belgium"),
                    "admissionDate": text("Planned admission date"),
                    "reason": text("Reason for admission"),
                    "accident": flag("Whether the admission results from an accident"),
                    "roomType": {
                        "type": "string",
                        "enum": room_types,
                        "description": "Requested room type"
                    },
                    "notes": text("Free-form notes"),
                    "declarationId": text("Identifier issued on submission")
                }
            }
        }
    })
}
