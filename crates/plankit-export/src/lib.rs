//! # plankit-export
//!
//! Pure formatters over a [`FormSnapshot`]: a self-contained printable
//! HTML document, a clipboard-style plain-text summary, and pretty JSON
//! named after the plan title. No I/O happens here; callers decide where
//! the strings go.

use chrono::{DateTime, Utc};
use plankit_core::{FormSnapshot, Result};

/// Render the plan as a standalone printable HTML document.
pub fn print_document(snapshot: &FormSnapshot, generated_on: DateTime<Utc>) -> String {
    let title = escape(&snapshot.title);

    let supporting: String = non_blank(&snapshot.supporting_features)
        .map(|f| format!("<li>{}</li>", escape(f)))
        .collect::<Vec<_>>()
        .join("");
    let supporting = if supporting.is_empty() {
        "<li>None specified</li>".to_string()
    } else {
        supporting
    };

    let user_flow: String = non_blank(&snapshot.user_steps)
        .enumerate()
        .map(|(i, step)| {
            format!(
                "<div class=\"step-item\"><span class=\"step-number\">{}.</span> {}</div>",
                i + 1,
                escape(step)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let user_flow = if user_flow.is_empty() {
        "<p>No steps defined</p>".to_string()
    } else {
        user_flow
    };

    let pain_points = optional_block("Potential Pain Points:", &snapshot.pain_points);
    let success_metrics = optional_block("Success Metrics:", &snapshot.success_metrics);

    let alternative_flows = if snapshot.alternative_flows.is_empty() {
        String::new()
    } else {
        let items: String = snapshot
            .alternative_flows
            .iter()
            .map(|flow| format!("<li>{}</li>", escape(flow)))
            .collect();
        format!(
            "<div class=\"section\">\n<h2>Alternative Flows</h2>\n<ul class=\"feature-list\">{}</ul>\n</div>",
            items
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>{title} - MVP Plan</title>
<meta charset="utf-8">
<style>
  body {{ font-family: Arial, sans-serif; line-height: 1.6; margin: 20px; }}
  .section {{ margin-bottom: 25px; border-left: 4px solid #3b82f6; padding-left: 15px; }}
  h1 {{ font-size: 24px; margin-bottom: 10px; color: #1e293b; }}
  h2 {{ font-size: 18px; margin: 20px 0 10px 0; color: #334155; }}
  h3 {{ font-size: 14px; margin: 10px 0 5px 0; color: #64748b; }}
  .feature-list {{ margin-left: 20px; }}
  .step-item {{ margin-bottom: 10px; }}
  .step-number {{ font-weight: bold; color: #3b82f6; }}
  .generated {{ color: #64748b; margin-bottom: 30px; }}
</style>
</head>
<body>
<h1>{title}</h1>
<p class="generated">Generated on {date}</p>

<div class="section">
<h2>Project Overview</h2>
<h3>Problem:</h3>
<p>{problem}</p>
<h3>Solution:</h3>
<p>{solution}</p>
<h3>Target User:</h3>
<p>{target_user}</p>
<h3>Timeline:</h3>
<p>{timeframe}</p>
</div>

<div class="section">
<h2>Feature Specification</h2>
<h3>Core Feature:</h3>
<p>{main_feature}</p>
<h3>Supporting Features:</h3>
<ul class="feature-list">{supporting}</ul>
</div>

<div class="section">
<h2>User Flow</h2>
{user_flow}
{pain_points}
{success_metrics}
</div>

<div class="section">
<h2>Technical Specification</h2>
<h3>Platform(s):</h3>
<p>{platform}</p>
<h3>Technical Requirements:</h3>
<p>{tech_needs}</p>
</div>

{alternative_flows}
</body>
</html>
"#,
        title = title,
        date = generated_on.format("%Y-%m-%d"),
        problem = or_unspecified(&snapshot.problem),
        solution = or_unspecified(&snapshot.solution),
        target_user = or_unspecified(&snapshot.target_user),
        timeframe = or_unspecified(&snapshot.timeframe),
        main_feature = or_unspecified(&snapshot.main_feature),
        supporting = supporting,
        user_flow = user_flow,
        pain_points = pain_points,
        success_metrics = success_metrics,
        platform = or_unspecified(&snapshot.platform.join(", ")),
        tech_needs = or_unspecified(&snapshot.tech_needs),
        alternative_flows = alternative_flows,
    )
}

/// Render the plan as a plain-text summary for the clipboard.
pub fn text_summary(snapshot: &FormSnapshot) -> String {
    let mut out = String::new();

    out.push_str(&format!("MVP BUILD SPEC: {}\n", snapshot.title));
    out.push_str(&"=".repeat(50));
    out.push_str("\n\nPROJECT OVERVIEW\n");
    out.push_str(&format!("Problem: {}\n", or_unspecified_text(&snapshot.problem)));
    out.push_str(&format!("Solution: {}\n", or_unspecified_text(&snapshot.solution)));
    out.push_str(&format!(
        "Target User: {}\n",
        or_unspecified_text(&snapshot.target_user)
    ));
    out.push_str(&format!(
        "Timeline: {}\n",
        or_unspecified_text(&snapshot.timeframe)
    ));

    out.push_str("\nFEATURE SPEC\n");
    out.push_str(&format!(
        "Core Feature: {}\n",
        or_unspecified_text(&snapshot.main_feature)
    ));
    out.push_str("Supporting Features:\n");
    let features: Vec<String> = non_blank(&snapshot.supporting_features)
        .map(|f| format!("- {}", f))
        .collect();
    if features.is_empty() {
        out.push_str("None specified\n");
    } else {
        out.push_str(&features.join("\n"));
        out.push('\n');
    }

    out.push_str("\nUSER FLOW\n");
    let steps: Vec<String> = non_blank(&snapshot.user_steps)
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect();
    if steps.is_empty() {
        out.push_str("No steps defined\n");
    } else {
        out.push_str(&steps.join("\n"));
        out.push('\n');
    }

    if !snapshot.pain_points.trim().is_empty() {
        out.push_str(&format!("\nPOTENTIAL PAIN POINTS\n{}\n", snapshot.pain_points));
    }
    if !snapshot.success_metrics.trim().is_empty() {
        out.push_str(&format!("\nSUCCESS METRICS\n{}\n", snapshot.success_metrics));
    }

    out.push_str("\nTECHNICAL SPEC\n");
    out.push_str(&format!(
        "Platform(s): {}\n",
        or_unspecified_text(&snapshot.platform.join(", "))
    ));
    out.push_str(&format!(
        "Technical Requirements: {}\n",
        or_unspecified_text(&snapshot.tech_needs)
    ));

    if !snapshot.alternative_flows.is_empty() {
        out.push_str("\nALTERNATIVE FLOWS\n");
        for flow in &snapshot.alternative_flows {
            out.push_str(&format!("- {}\n", flow));
        }
    }

    out.trim_end().to_string()
}

/// Serialize the plan as pretty-printed JSON.
pub fn json_export(snapshot: &FormSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// File name for a JSON download, derived from the plan title.
/// Lowercased, non-alphanumerics collapsed to single hyphens.
pub fn export_file_name(title: &str) -> String {
    let mut name = String::new();
    let mut pending_hyphen = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !name.is_empty() {
                name.push('-');
            }
            pending_hyphen = false;
            name.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    if name.is_empty() {
        name.push_str("mvp-plan");
    }
    name.push_str(".json");
    name
}

fn non_blank(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn or_unspecified(value: &str) -> String {
    if value.trim().is_empty() {
        "Not specified".to_string()
    } else {
        escape(value)
    }
}

fn or_unspecified_text(value: &str) -> &str {
    if value.trim().is_empty() {
        "Not specified"
    } else {
        value
    }
}

fn optional_block(heading: &str, value: &str) -> String {
    if value.trim().is_empty() {
        String::new()
    } else {
        format!("<h3>{}</h3>\n<p>{}</p>", heading, escape(value))
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
