//! Line-oriented text for the console front-end.

use rp_core::{CoreError, InputField, PredictorKind};

use crate::{group_thousands, PredictionView};

pub const RULE: &str = "============================================================";

pub const MENU_ITEMS: [&str; 5] = [
    "Forecast Daily Store Footfall",
    "Predict Delivery Time for an Order",
    "Predict Customer Lifetime Value (CLV)",
    "Assistant Chatbot",
    "Exit",
];

pub fn menu() -> String {
    let mut out =
        format!("{RULE}\n        RetailPredict 360 - AI Store Intelligence Suite\n{RULE}\n");
    for (i, item) in MENU_ITEMS.iter().enumerate() {
        out.push_str(&format!("{}. {item}\n", i + 1));
    }
    out
}

pub fn choice_prompt() -> String {
    format!("Enter your choice (1-{}): ", MENU_ITEMS.len())
}

pub fn invalid_choice() -> String {
    format!("\nInvalid choice. Please enter a number between 1 and {}.\n", MENU_ITEMS.len())
}

pub fn section_header(kind: PredictorKind) -> String {
    format!("\n--- {} ---", kind.title())
}

pub fn prompt(field: &InputField) -> String {
    format!("{}: ", field.label)
}

pub fn headline(kind: PredictorKind, scalar: f64) -> String {
    match kind {
        PredictorKind::Footfall => format!("Expected Footfall Today: {scalar:.0} people"),
        PredictorKind::Delivery => format!("Expected Delivery Time: {scalar:.1} minutes"),
        PredictorKind::Clv => format!("Predicted 12-month CLV: ₹ {}", group_thousands(scalar, 2)),
    }
}

pub fn render_prediction(view: &PredictionView) -> String {
    let label = match view.kind {
        PredictorKind::Clv => "Segment",
        _ => "Tier",
    };
    format!(
        "\n{}\n{label}: {} ({})\nRecommendation: {}\n",
        headline(view.kind, view.raw),
        view.segment,
        view.tier,
        view.recommendation
    )
}

pub fn render_error(err: &CoreError) -> String {
    match err {
        CoreError::InvalidInput { field, reason } => {
            format!("\nInvalid input for {field}: {reason}. Nothing was predicted.\n")
        }
        other => format!("\nPrediction failed: {other}\n"),
    }
}

pub fn goodbye() -> &'static str {
    "\nThank you for using RetailPredict 360. Goodbye!\n"
}
