//! The `fpilot plan` command: idea in, rendered plan (or JSON) out.

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use founderpilot_core::generate::{generate, GenerateConfig};
use founderpilot_core::model::GeminiCliClient;
use founderpilot_core::plan::StartupPlan;

use crate::config::Resolved;

/// Generate a plan for the idea and print it.
pub async fn run_plan(idea: &str, resolved: &Resolved, json: bool) -> Result<()> {
    let client = GeminiCliClient::new()
        .with_binary(&resolved.binary)
        .with_model(&resolved.model)
        .with_timeout(resolved.timeout);

    let config = GenerateConfig {
        max_attempts: resolved.max_attempts,
    };

    // Ctrl-C abandons the run at the next attempt boundary.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received, cancelling generation");
                cancel.cancel();
            }
        });
    }

    let plan = generate(&client, idea, &config, &cancel)
        .await
        .context("plan generation failed")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&plan).context("failed to serialize plan")?
        );
    } else {
        println!("{}", render_plan(&plan));
    }

    Ok(())
}

/// Render a plan as a markdown dashboard.
pub fn render_plan(plan: &StartupPlan) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", plan.name));
    out.push_str(&format!(
        "_Generated {}_\n\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    ));
    out.push_str(&format!("> {}\n\n", plan.elevator_pitch));
    out.push_str(&format!("**Readiness score:** {}/100\n\n", plan.readiness_score));

    out.push_str("## Problem\n\n");
    out.push_str(&plan.problem);
    out.push_str("\n\n");

    out.push_str("## Target Audience\n\n");
    out.push_str(&plan.target_audience);
    out.push_str("\n\n");

    out.push_str("## Early Adopter Persona\n\n");
    out.push_str(&format!("- **Role:** {}\n", plan.persona.role));
    out.push_str(&format!("- **Behavior:** {}\n", plan.persona.behavior));
    out.push_str(&format!("- **Location:** {}\n", plan.persona.location));
    out.push_str(&format!(
        "- **Primary pain point:** {}\n\n",
        plan.persona.primary_pain_point
    ));

    out.push_str("## MVP Features\n\n");
    out.push_str("**Must have:**\n");
    for feature in &plan.mvp_features.must_have {
        out.push_str(&format!("- {feature}\n"));
    }
    if !plan.mvp_features.nice_to_have.is_empty() {
        out.push_str("\n**Nice to have:**\n");
        for feature in &plan.mvp_features.nice_to_have {
            out.push_str(&format!("- {feature}\n"));
        }
    }
    out.push('\n');

    out.push_str("## Roadmap\n\n");
    out.push_str("| Day | Task | Goal |\n|----:|------|------|\n");
    for entry in &plan.roadmap {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            entry.day, entry.task, entry.goal
        ));
    }
    out.push('\n');

    out.push_str("## Pitch Outline\n\n");
    for (i, section) in plan.pitch_outline.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, section));
    }
    out.push('\n');

    out.push_str("## Validation Checklist\n\n");
    for item in &plan.validation_checklist {
        out.push_str(&format!("- [ ] {item}\n"));
    }
    out.push('\n');

    out.push_str("## Acquisition Strategy\n\n");
    out.push_str(&plan.acquisition_strategy);
    out.push_str("\n\n");

    if !plan.tool_stack.is_empty() {
        out.push_str("## Tool Stack\n\n");
        for tool in &plan.tool_stack {
            out.push_str(&format!(
                "- **{}** ({}) -- {}\n",
                tool.name, tool.category, tool.reason
            ));
        }
    }

    out
}
