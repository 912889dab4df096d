//! Hospital Journey terminal client
//!
//! Drives the journey widget model against an in-process server, the same
//! way the HTML widget drives it through the host.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin hospi_cli --features cli
//! ```
//!
//! Each form field is pre-filled; edit it or press Enter to keep it. Blank
//! fields are left out of the state. Select fields accept an option label or
//! value. Ctrl-D quits.

use std::time::Instant;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde_json::Value;

use hospi_journey::widget::{Control, Form, TransportFailure, View, WidgetController};
use hospi_journey::{JourneyArgs, JourneyPayload};
use mcp_apps::apps::hospi_copilot::TOOL_NAME;
use mcp_apps::apps::{create_server, AppSelection};
use mcp_apps::mcp::{AppContext, McpServer, Transport};
use mcp_apps::telemetry::init_tracing;

/// Call the journey tool and decode its structured payload
async fn call_journey(
    server: &McpServer,
    args: &JourneyArgs,
) -> Result<JourneyPayload, TransportFailure> {
    let args = serde_json::to_value(args)
        .map_err(|e| TransportFailure::Connection(e.to_string()))?;
    let result = server.call_tool(TOOL_NAME, args).await;
    if result.is_error() {
        return Err(TransportFailure::Rejected(result.text()));
    }
    let payload = result.structured_content.unwrap_or(Value::Null);
    serde_json::from_value(payload).map_err(|e| TransportFailure::MalformedResult(e.to_string()))
}

enum Input {
    Line(String),
    Quit,
}

fn read(editor: &mut DefaultEditor, prompt: &str, initial: &str) -> Result<Input> {
    match editor.readline_with_initial(prompt, (initial, "")) {
        Ok(line) => Ok(Input::Line(line.trim().to_string())),
        Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(Input::Quit),
        Err(e) => Err(e.into()),
    }
}

/// Let the user edit every field; `None` when they quit
fn fill_form(editor: &mut DefaultEditor, mut form: Form) -> Result<Option<Form>> {
    let keys: Vec<_> = form.fields.iter().map(|f| f.key).collect();
    for key in keys {
        loop {
            let Some(field) = form.field(key) else { break };
            if let Control::Select { options } = &field.control {
                let labels: Vec<&str> = options.iter().map(|o| o.label).collect();
                println!("  {}", labels.join(" / ").dimmed());
            }
            let prompt = format!("{}: ", field.label);
            let initial = field.display_value().to_string();

            let value = match read(editor, &prompt, &initial)? {
                Input::Line(value) => value,
                Input::Quit => return Ok(None),
            };
            if value.is_empty() && initial.is_empty() {
                break;
            }
            match form.set(key, &value) {
                Ok(()) => break,
                Err(e) => eprintln!("{}: {}", "error".red().bold(), e),
            }
        }
    }
    Ok(Some(form))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let ctx = AppContext::new(Transport::Stdio, "widgets");
    let server = create_server(AppSelection::HospiCopilot, &ctx);
    let mut editor = DefaultEditor::new()?;
    let mut controller = WidgetController::new();

    println!("{}", server.info().name.cyan().bold());

    let mut pending = Some(JourneyArgs::default());
    while let Some(args) = pending.take() {
        match call_journey(&server, &args).await {
            Ok(payload) => {
                controller.on_tool_result(payload);
            }
            Err(failure) => controller.on_call_failed(&failure, Instant::now()),
        }

        if let Some(notice) = controller.notice(Instant::now()) {
            eprintln!("{} {}", "!".yellow().bold(), notice.message.yellow());
        }

        let (Some(view), Some(state)) = (controller.view().cloned(), controller.state().cloned())
        else {
            break;
        };
        println!("\n{}", view);

        pending = match view {
            View::Form(form) => match fill_form(&mut editor, form)? {
                Some(form) => match form.submit(&state) {
                    Ok(next) => Some(next),
                    Err(e) => {
                        eprintln!("{}: {}", "error".red().bold(), e);
                        Some(args)
                    }
                },
                None => None,
            },
            View::Summary(summary) => match summary.submit(&state) {
                Some(next) => match read(&mut editor, "Press Enter to submit: ", "")? {
                    Input::Line(_) => Some(next),
                    Input::Quit => None,
                },
                None => {
                    println!("{} Journey complete", "OK".green().bold());
                    None
                }
            },
        };
    }

    Ok(())
}
