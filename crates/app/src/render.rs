use gateway_core::UsageSummary;

use crate::dashboard::DashboardState;

pub fn render_dashboard(state: &DashboardState) -> String {
    match state {
        DashboardState::Loading => "Loading usage data...".to_string(),
        DashboardState::Failed(message) => format!("Error: {message}"),
        DashboardState::Empty => "No usage data available.".to_string(),
        DashboardState::Ready(summary) => render_summary(summary),
    }
}

pub fn render_summary(summary: &UsageSummary) -> String {
    let mut lines = vec![
        "Usage Summary".to_string(),
        format!("Total Requests: {}", summary.total_requests),
        format!("Total Input Tokens: {}", summary.total_input_tokens),
        format!("Total Output Tokens: {}", summary.total_output_tokens),
        format!(
            "Estimated Total Cost (USD): {}",
            summary.estimated_total_cost_usd
        ),
        String::new(),
        "Model Usage".to_string(),
    ];
    for (model, usage) in &summary.model_usage {
        lines.push(String::new());
        lines.push(model.to_uppercase());
        lines.push(format!("  Input Tokens: {}", usage.input_tokens));
        lines.push(format!("  Output Tokens: {}", usage.output_tokens));
        lines.push(format!("  Requests: {}", usage.requests));
    }
    lines.join("\n")
}
