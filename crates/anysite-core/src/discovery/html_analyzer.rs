//! Form extraction from page markup.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

use anysite_protocols::discovery::{FormCandidate, FormField, FormMethod};

static FORM: LazyLock<Selector> = LazyLock::new(|| selector("form"));
static FIELD: LazyLock<Selector> = LazyLock::new(|| selector("input, textarea, select"));
static SUBMIT: LazyLock<Selector> = LazyLock::new(|| selector(r#"[type="submit"], button"#));

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e}"))
}

/// Input types that never carry user data.
const IGNORED_INPUT_TYPES: [&str; 4] = ["submit", "reset", "button", "hidden"];

/// Collect the forms of `markup` that have at least one named data field.
///
/// Relative actions are resolved against the origin of `base_url`; a form
/// without an action submits to the origin root.
pub fn analyze_html(markup: &str, base_url: &Url) -> Vec<FormCandidate> {
    let document = Html::parse_document(markup);
    let origin = base_url.origin().ascii_serialization();

    document
        .select(&FORM)
        .filter_map(|form| form_candidate(form, &origin))
        .collect()
}

fn form_candidate(form: ElementRef<'_>, origin: &str) -> Option<FormCandidate> {
    let fields: Vec<FormField> = form.select(&FIELD).filter_map(form_field).collect();
    if fields.is_empty() {
        return None;
    }

    Some(FormCandidate {
        form_action: resolve_action(form.value().attr("action"), origin),
        method: FormMethod::from_attr(form.value().attr("method")),
        fields,
        submit_label: submit_label(form),
    })
}

fn form_field(element: ElementRef<'_>) -> Option<FormField> {
    let attrs = element.value();
    let name = attrs.attr("name").map(str::trim).filter(|n| !n.is_empty())?;
    let field_type = attrs
        .attr("type")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("text");

    if attrs.name() == "input"
        && IGNORED_INPUT_TYPES
            .iter()
            .any(|ignored| field_type.eq_ignore_ascii_case(ignored))
    {
        return None;
    }

    Some(FormField {
        name: name.to_string(),
        field_type: field_type.to_string(),
        placeholder: attrs.attr("placeholder").map(str::to_string),
    })
}

fn resolve_action(action: Option<&str>, origin: &str) -> String {
    let action = action.map(str::trim).unwrap_or("");
    if action.is_empty() {
        return format!("{origin}/");
    }
    if let Ok(url) = Url::parse(action) {
        if matches!(url.scheme(), "http" | "https") {
            return action.to_string();
        }
    }
    if action.starts_with('/') {
        format!("{origin}{action}")
    } else {
        format!("{origin}/{action}")
    }
}

fn submit_label(form: ElementRef<'_>) -> Option<String> {
    let control = form.select(&SUBMIT).next()?;
    let text = control.text().collect::<String>();
    let text = text.trim();
    if !text.is_empty() {
        return Some(text.to_string());
    }
    if control.value().name() == "input" {
        return control
            .value()
            .attr("value")
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
    }
    None
}

#[cfg(test)]
#[path = "html_analyzer_tests.rs"]
mod tests;
