//! Server-rendered HTML for the calculator form and the results page.

use std::fmt::Write;

use ivf_core::{AgeRange, MAX_CYCLES, MIN_CYCLES, MedicalCondition, ResultSummary, SurveyAnswers, YesNo, field};

const STYLE: &str = "\
body{font-family:Poppins,system-ui,sans-serif;margin:0;background:#fcfaf5;color:#111}\
header{background:#fff;border-bottom:1px solid #ddd;padding:1rem 2rem}\
.brand b{background:#000;color:#fff;padding:.2rem .6rem;margin-right:.4rem}\
.crumbs{padding:1rem 2rem;font-size:.9rem}\
main{max-width:42rem;margin:0 auto;padding:2rem 1rem}\
h2{text-align:center;font-weight:500}\
fieldset{border:0;display:flex;flex-wrap:wrap;gap:1rem;justify-content:center;margin-bottom:2rem}\
.rate{font-size:4rem;font-weight:700;text-align:center}\
button{background:#dc2626;color:#fff;border:0;padding:.8rem 2.4rem;font-size:1rem;border-radius:.4rem}";

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
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

fn layout(title: &str, crumbs: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header><span class=\"brand\"><b>IVF</b>Pulse</span></header>\n\
         <nav class=\"crumbs\">{crumbs}</nav>\n<main>\n{body}</main>\n</body>\n</html>\n"
    )
}

fn checked(on: bool) -> &'static str {
    if on { " checked" } else { "" }
}

fn yes_no_group(out: &mut String, name: &str, label: &str, value: YesNo) {
    let _ = write!(out, "<fieldset><legend>{label}:</legend>");
    for option in [YesNo::Yes, YesNo::No] {
        let _ = write!(
            out,
            "<label><input type=\"radio\" id=\"{name}-{v}\" name=\"{name}\" value=\"{v}\"{c}> {l}</label>",
            v = option.as_str(),
            c = checked(option == value),
            l = option.label(),
        );
    }
    out.push_str("</fieldset>\n");
}

/// The input form, pre-filled from `answers`.
pub fn render_form(answers: &SurveyAnswers) -> String {
    let mut body = String::new();
    body.push_str("<form method=\"post\" action=\"/calculator\">\n");

    body.push_str("<h2>Which age range applies to you?</h2>\n<fieldset>");
    for age in AgeRange::ALL {
        let _ = write!(
            body,
            "<label><input type=\"radio\" id=\"{v}\" name=\"{name}\" value=\"{v}\"{c}> {l}</label>",
            v = age.as_str(),
            name = field::AGE_RANGE,
            c = checked(age == answers.age_range),
            l = age.label(),
        );
    }
    body.push_str("</fieldset>\n");

    let _ = write!(
        body,
        "<h2>Number of IVF Cycles?</h2>\n<fieldset><input type=\"range\" name=\"{name}\" \
         min=\"{MIN_CYCLES}\" max=\"{MAX_CYCLES}\" step=\"1\" value=\"{v}\" \
         oninput=\"this.nextElementSibling.value=this.value\"><output>{v}</output></fieldset>\n",
        name = field::IVF_CYCLES,
        v = answers.ivf_cycles,
    );

    body.push_str("<h2>Have you undergone these procedures before?</h2>\n");
    yes_no_group(&mut body, field::ICSI_PROCEDURE, "ICSI Procedure", answers.icsi_procedure);
    yes_no_group(&mut body, field::PGT_TESTING, "PGT Testing", answers.pgt_testing);

    body.push_str("<h2>Do you have any of these medical conditions?</h2>\n<fieldset>");
    for condition in MedicalCondition::ALL {
        let _ = write!(
            body,
            "<label><input type=\"checkbox\" id=\"{id}\" name=\"{name}\" value=\"{v}\"{c}> {v}</label>",
            id = condition.element_id(),
            name = field::MEDICAL_CONDITIONS,
            v = condition.as_str(),
            c = checked(answers.has_condition(condition)),
        );
    }
    body.push_str("</fieldset>\n");

    body.push_str("<p style=\"text-align:center\"><button type=\"submit\">Calculate</button></p>\n</form>\n");

    layout(
        "IVF Success Rate Calculator",
        "<a href=\"/\">Home</a> / <span>IVF Success Rate Calculator</span>",
        &body,
    )
}

/// The results page: estimated rate plus an echo of the submitted inputs.
pub fn render_result(summary: &ResultSummary) -> String {
    let body = format!(
        "<h1>Your estimated IVF Success Rate is</h1>\n\
         <p class=\"rate\">{rate}%</p>\n\
         <p style=\"text-align:center\">{cycles}</p>\n\
         <h2>Your Inputs:</h2>\n<ul>\n\
         <li>Age Range: {age}</li>\n\
         <li>ICSI Procedure: {icsi}</li>\n\
         <li>PGT Testing: {pgt}</li>\n\
         <li>Medical Conditions: {conditions}</li>\n</ul>\n\
         <p><a href=\"/calculator\">Recalculate</a></p>\n",
        rate = summary.rate_display,
        cycles = escape_html(&summary.cycles_label),
        age = escape_html(&summary.age_range),
        icsi = summary.icsi_procedure,
        pgt = summary.pgt_testing,
        conditions = escape_html(&summary.medical_conditions),
    );
    layout(
        "Your IVF Success Rate",
        "<a href=\"/\">Home</a> / <a href=\"/calculator\">IVF Success Rate Calculator</a> / <span>Result</span>",
        &body,
    )
}
