//! Server-rendered HTML for the upload page and the analysis results.
use html_escape::{encode_double_quoted_attribute, encode_text};
use legis_analysis::DocumentAnalysis;
use serde::Serialize;

pub const PAGE_TITLE: &str = "NIYAMR AI";
pub const SUBHEADING: &str = "AI Agent for Universal Credit Act 2025";
pub const PLACEHOLDER: &str = "Please upload the PDF to begin.";
pub const UPLOADED: &str = "PDF uploaded successfully!";
pub const DOWNLOAD_FILE_NAME: &str = "task1_cleaned.txt";

const STYLE: &str = "body{font-family:sans-serif;margin:2rem auto;max-width:72rem;padding:0 1rem}\
textarea{width:100%;height:300px;font-family:monospace}\
pre{background:#f5f5f5;padding:1rem;overflow:auto;white-space:pre-wrap}\
.info{background:#e8f0fe;padding:.75rem}.ok{background:#e6f4ea;padding:.75rem}";

pub fn placeholder_page() -> String {
    layout(&format!(
        "{}\n<p class=\"info\">{}</p>",
        upload_form(),
        encode_text(PLACEHOLDER)
    ))
}

pub fn results_page(file_name: Option<&str>, analysis: &DocumentAnalysis) -> String {
    let mut body = String::new();
    body.push_str(&upload_form());
    body.push_str(&format!("\n<p class=\"ok\">{}", encode_text(UPLOADED)));
    if let Some(name) = file_name {
        body.push_str(&format!(" <small>({})</small>", encode_text(name)));
    }
    body.push_str("</p>\n");

    body.push_str("<h2>Task 1 — Extracted &amp; Cleaned Text</h2>\n");
    body.push_str(&format!(
        "<textarea readonly aria-label=\"Preview\">{}</textarea>\n",
        encode_text(analysis.preview())
    ));
    body.push_str(&format!(
        "<form method=\"post\" action=\"/download\">\
<textarea name=\"text\" hidden>{}</textarea>\
<button type=\"submit\" title=\"{}\">Download Cleaned Text</button></form>\n",
        encode_text(&analysis.cleaned_text),
        encode_double_quoted_attribute(DOWNLOAD_FILE_NAME)
    ));

    body.push_str("<h2>Task 2 — Summary</h2>\n<ul>\n");
    for bullet in &analysis.summary {
        body.push_str(&format!("<li>{}</li>\n", encode_text(bullet)));
    }
    body.push_str("</ul>\n");

    body.push_str("<h2>Task 3 — JSON (Extracted Sections)</h2>\n");
    body.push_str(&json_block(&analysis.sections));

    body.push_str("<h2>Task 4 — Rule Checks</h2>\n");
    body.push_str(&json_block(&analysis.rule_checks));

    layout(&body)
}

fn upload_form() -> String {
    "<form method=\"post\" action=\"/analyze\" enctype=\"multipart/form-data\">\
<label>Upload the Universal Credit Act 2025 PDF \
<input type=\"file\" name=\"file\" accept=\".pdf,application/pdf\" onchange=\"this.form.submit()\"></label> \
<button type=\"submit\">Analyze</button></form>"
        .to_string()
}

fn json_block<T: Serialize>(value: &T) -> String {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("serialization failed: {e}"));
    format!("<pre>{}</pre>\n", encode_text(&json))
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
<h1>{title}</h1>\n<h3>{sub}</h3>\n{body}\n</body>\n</html>\n",
        title = encode_text(PAGE_TITLE),
        sub = encode_text(SUBHEADING),
    )
}
