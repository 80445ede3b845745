//! HTML rendering for the form page.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::api::UNEXPECTED_ERROR_MESSAGE;
use crate::calculate::PlaylistReport;

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
input[type=text]{width:70%;padding:.4rem}ul{line-height:1.6}\
table{border-collapse:collapse;width:100%}td,th{border-bottom:1px solid #ddd;padding:.3rem;text-align:left}\
.bar{background:#c00;height:.8rem}.error{color:#a00}";

/// Empty input form.
pub fn render_form() -> String {
    page("")
}

/// Form followed by an error message.
pub fn render_error(lines: &[&str]) -> String {
    let items: String = lines
        .iter()
        .map(|line| format!("<li>{}</li>", escape_html(line)))
        .collect();
    page(&format!("<ul class=\"error\">{}</ul>", items))
}

/// Form followed by the report text and per-video chart.
pub fn render_report(report: &PlaylistReport) -> String {
    let items: String = report
        .display_text
        .iter()
        .map(|line| format!("<li>{}</li>", escape_html(line)))
        .collect();

    let longest = report.chart.minutes.iter().copied().fold(0.0_f64, f64::max);
    let rows: String = report
        .chart
        .titles
        .iter()
        .zip(&report.chart.minutes)
        .map(|(title, minutes)| {
            let width = if longest > 0.0 { minutes / longest * 100.0 } else { 0.0 };
            format!(
                "<tr><td>{}</td><td>{:.2}</td><td><div class=\"bar\" style=\"width:{:.1}%\"></div></td></tr>",
                escape_html(title),
                minutes,
                width
            )
        })
        .collect();

    // Raw series for client-side charting
    let chart_json = serde_json::to_string(&report.chart)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/");

    page(&format!(
        "<ul>{}</ul>\n<table><tr><th>Video</th><th>Minutes</th><th></th></tr>{}</table>\n\
<script type=\"application/json\" id=\"chart-data\">{}</script>",
        items, rows, chart_json
    ))
}

/// Response for a handler that panicked.
///
/// Served like any other form page, with status 200.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Unexpected error while handling request: {}", detail);

    (StatusCode::OK, Html(render_error(&UNEXPECTED_ERROR_MESSAGE))).into_response()
}

fn page(content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<title>Playlist Length</title>\n<style>{}</style>\n</head>\n<body>\n\
<h1>Playlist Length</h1>\n\
<form method=\"post\" action=\"/\">\n\
<input type=\"text\" name=\"search_string\" placeholder=\"Playlist link or ID\" required>\n\
<button type=\"submit\">Analyze</button>\n</form>\n{}\n</body>\n</html>\n",
        STYLE, content
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
