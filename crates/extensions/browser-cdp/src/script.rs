//! JavaScript expressions evaluated in the page.
//!
//! Selectors and values are embedded as JSON string literals, which are
//! valid JavaScript string literals.

fn literal(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

pub(crate) const READY_STATE: &str = "document.readyState";
pub(crate) const LOCATION_HREF: &str = "window.location.href";

/// `true` once an element matches.
pub(crate) fn exists(selector: &str) -> String {
    format!("document.querySelector({}) !== null", literal(selector))
}

/// Focus, set `value`, then fire `input` and `change` so framework
/// listeners see the edit. Evaluates to `false` when nothing matches.
pub(crate) fn fill(selector: &str, value: &str) -> String {
    format!(
        r#"(() => {{
  const el = document.querySelector({sel});
  if (!el) return false;
  el.focus();
  el.value = {val};
  el.dispatchEvent(new Event('input', {{ bubbles: true }}));
  el.dispatchEvent(new Event('change', {{ bubbles: true }}));
  return true;
}})()"#,
        sel = literal(selector),
        val = literal(value),
    )
}

/// Evaluates to `false` when nothing matches.
pub(crate) fn click(selector: &str) -> String {
    format!(
        r#"(() => {{
  const el = document.querySelector({sel});
  if (!el) return false;
  el.scrollIntoView({{ block: 'center' }});
  el.click();
  return true;
}})()"#,
        sel = literal(selector),
    )
}

/// `{found, text}` for the first match.
pub(crate) fn text_content(selector: &str) -> String {
    format!(
        r#"(() => {{
  const el = document.querySelector({sel});
  if (!el) return {{ found: false, text: null }};
  return {{ found: true, text: el.textContent }};
}})()"#,
        sel = literal(selector),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_quotes_escaped() {
        let js = exists(r#"input[name="q"]"#);
        assert_eq!(js, r#"document.querySelector("input[name=\"q\"]") !== null"#);
    }

    #[test]
    fn test_fill_embeds_value_literal() {
        let js = fill("#q", "it's \"quoted\"\nnext");
        assert!(js.contains(r##"document.querySelector("#q")"##));
        assert!(js.contains(r#"el.value = "it's \"quoted\"\nnext";"#));
        assert!(js.contains("'change'"));
    }

    #[test]
    fn test_click_and_text_content() {
        assert!(click("button.submit").contains("el.click();"));
        let js = text_content("#result");
        assert!(js.contains("found: true, text: el.textContent"));
    }
}
