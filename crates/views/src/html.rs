//! HTML pages for the web front-end.

use std::fmt::Write;

use rp_core::{FieldSource, FieldType, InputField, PredictorKind};

use crate::PredictionView;

/// What to show under a form.
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    Empty,
    Predicted(&'a PredictionView),
    Rejected(&'a str),
    Failed(&'a str),
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} | RetailPredict 360</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

pub fn index_page() -> String {
    let mut body = String::from("<h1>RetailPredict 360</h1>\n<p>Choose a model:</p>\n<ul>\n");
    for kind in PredictorKind::ALL {
        let title = escape(kind.title());
        let _ = writeln!(body, "<li><a href=\"/{}\">{title}</a></li>", kind.as_str());
    }
    body.push_str("</ul>");
    layout("Home", &body)
}

pub fn form_page<S: FieldSource + ?Sized>(
    kind: PredictorKind,
    values: &S,
    outcome: Outcome<'_>,
) -> String {
    let mut body = format!(
        "<p><a href=\"/\">Home</a></p>\n<h1>{}</h1>\n<form method=\"post\" action=\"/{}\">\n",
        escape(kind.title()),
        kind.as_str()
    );
    for field in kind.input_fields() {
        body.push_str(&field_html(field, values.field(field.name)));
    }
    body.push_str("<button type=\"submit\">Predict</button>\n</form>\n");
    body.push_str(&outcome_html(outcome));
    layout(kind.title(), &body)
}

fn field_html(field: &InputField, current: Option<&str>) -> String {
    let label = escape(field.label);
    let name = field.name;
    match field.field_type {
        FieldType::Flag => {
            let selected = |v: &str| if current == Some(v) { " selected" } else { "" };
            format!(
                "<label for=\"{name}\">{label}</label>\n<select id=\"{name}\" name=\"{name}\">\
                 <option value=\"0\"{}>No</option>\
                 <option value=\"1\"{}>Yes</option></select><br>\n",
                selected("0"),
                selected("1")
            )
        }
        FieldType::Integer | FieldType::Decimal => {
            let step = if field.field_type == FieldType::Integer { "1" } else { "any" };
            let value = current.map(escape).unwrap_or_default();
            format!(
                "<label for=\"{name}\">{label}</label>\n\
                 <input id=\"{name}\" name=\"{name}\" type=\"number\" \
                 step=\"{step}\" value=\"{value}\" required><br>\n"
            )
        }
    }
}

fn outcome_html(outcome: Outcome<'_>) -> String {
    match outcome {
        Outcome::Empty => String::new(),
        Outcome::Predicted(view) => format!(
            "<div class=\"result\">\n<h2>Result</h2>\n<p>Prediction: <strong>{}</strong></p>\n\
             <p>Segment: <strong>{}</strong></p>\n<p>Recommendation: {}</p>\n</div>\n",
            escape(&view.prediction),
            escape(view.segment),
            escape(view.recommendation)
        ),
        Outcome::Rejected(message) => error_block("Submission rejected", message),
        Outcome::Failed(message) => error_block("Prediction failed", message),
    }
}

fn error_block(heading: &str, message: &str) -> String {
    format!("<div class=\"error\">\n<p>{heading}: {}</p>\n</div>\n", escape(message))
}
