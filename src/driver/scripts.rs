//! JavaScript snippets compiled per selector strategy
//!
//! Element verbs on the CDP driver run through `Runtime.evaluate`; this module
//! builds the expressions. Every script resolves the selector to a single
//! element first, then applies the operation, returning `null` when nothing
//! matched so the driver can map that onto its own failure contract.

use super::traits::Selector;

/// Expression for the current location
pub const CURRENT_URL: &str = "window.location.href";

/// Expression for the document ready state
pub const READY_STATE: &str = "document.readyState";

/// JS string literal for arbitrary text
fn js_string(value: &str) -> String {
    // JSON string literals are valid JS string literals
    serde_json::Value::String(value.to_string()).to_string()
}

/// Expression evaluating to the first element the selector matches, or null
fn locator_expr(selector: &Selector) -> String {
    match selector.as_css() {
        Some(css) => format!("document.querySelector({})", js_string(&css)),
        None => {
            let Selector::Text(text) = selector else {
                unreachable!("only text selectors lack a CSS form");
            };
            format!(
                r#"(() => {{
                    const walker = document.createTreeWalker(
                        document.body,
                        NodeFilter.SHOW_TEXT,
                        {{
                            acceptNode: (node) => {{
                                return node.textContent.includes({text}) ? NodeFilter.FILTER_ACCEPT : NodeFilter.FILTER_REJECT;
                            }}
                        }}
                    );
                    let node;
                    while (node = walker.nextNode()) {{
                        if (node.parentElement) return node.parentElement;
                    }}
                    return null;
                }})()"#,
                text = js_string(text)
            )
        }
    }
}

/// Wrap an operation body in a locator prelude
///
/// `body` sees the matched element as `el` and must return a JSON-serializable
/// value; the whole script returns `null` when the selector matched nothing.
fn with_element(selector: &Selector, body: &str) -> String {
    format!(
        r#"(() => {{
            const el = {locator};
            if (!el) return null;
            {body}
        }})()"#,
        locator = locator_expr(selector),
        body = body
    )
}

/// Does the selector match any element
pub fn exists(selector: &Selector) -> String {
    format!("!!({})", locator_expr(selector))
}

/// Does the selector match a visible element
pub fn visible(selector: &Selector) -> String {
    with_element(
        selector,
        r#"const style = window.getComputedStyle(el);
            if (style.display === 'none' || style.visibility === 'hidden') return false;
            return el.getClientRects().length > 0;"#,
    )
}

/// Text content of the matched element
pub fn text_content(selector: &Selector) -> String {
    with_element(selector, "return el.textContent;")
}

/// Attribute value of the matched element
///
/// Wrapped in an object so a missing element (script returns null) stays
/// distinguishable from a present element lacking the attribute.
pub fn attribute(selector: &Selector, name: &str) -> String {
    let body = format!("return {{ value: el.getAttribute({}) }};", js_string(name));
    with_element(selector, &body)
}

/// Set an input's value and fire input/change events so framework state updates
pub fn fill(selector: &Selector, value: &str) -> String {
    let body = format!(
        r#"el.focus();
            el.value = {value};
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return true;"#,
        value = js_string(value)
    );
    with_element(selector, &body)
}

/// Click the matched element
pub fn click(selector: &Selector) -> String {
    with_element(selector, "el.click(); return true;")
}

/// Hover the matched element
pub fn hover(selector: &Selector) -> String {
    with_element(
        selector,
        r#"el.dispatchEvent(new MouseEvent('mouseover', { bubbles: true }));
            el.dispatchEvent(new MouseEvent('mouseenter', { bubbles: true }));
            return true;"#,
    )
}

/// Focus the matched element
pub fn focus(selector: &Selector) -> String {
    with_element(selector, "el.focus(); return true;")
}
