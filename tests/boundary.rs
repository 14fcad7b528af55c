//! Edge-case and error-path coverage: malformed tags, depth limits, and
//! other boundary conditions the processor must reject cleanly.

use mustache_core::providers::JsonProvider;
use mustache_core::{render_to_string, Error, RenderOptions};
use serde_json::json;

fn render(template: &str, root: serde_json::Value, options: &RenderOptions) -> Result<String, Error> {
    let mut provider = JsonProvider::new(root);
    render_to_string(template, &mut provider, options)
}

#[test]
fn empty_template_renders_empty_output() {
    let out = render("", json!({}), &RenderOptions::default()).unwrap();
    assert_eq!(out, "");
}

#[test]
fn unterminated_tag_is_unexpected_end() {
    let err = render("{{foo", json!({}), &RenderOptions::default()).unwrap_err();
    assert_eq!(err.code(), Error::UnexpectedEnd.code());
}

#[test]
fn stray_closing_tag_at_top_level_is_closing_error() {
    let err = render("{{/x}}", json!({}), &RenderOptions::default()).unwrap_err();
    assert_eq!(err.code(), Error::Closing.code());
}

#[test]
fn empty_tag_forbidden_reports_empty_tag() {
    let mut options = RenderOptions::default();
    options.allow_empty_tag = false;
    let err = render("{{ }}", json!({}), &options).unwrap_err();
    assert_eq!(err.code(), Error::EmptyTag.code());
}

#[test]
fn empty_tag_allowed_by_default_resolves_empty_name() {
    // Allowed by default; the provider is still consulted for an empty
    // name and reports it missing rather than the processor rejecting it.
    let err = render("{{ }}", json!({}), &RenderOptions::default()).unwrap_err();
    assert_eq!(err.code(), Error::ItemNotFound.code());
}

#[test]
fn name_exceeding_1024_bytes_is_tag_too_long() {
    let long_name = "a".repeat(1025);
    let template = format!("{{{{{long_name}}}}}");
    let err = render(&template, json!({}), &RenderOptions::default()).unwrap_err();
    assert_eq!(err.code(), Error::TagTooLong.code());
}

#[test]
fn name_at_1024_bytes_is_accepted() {
    let name = "a".repeat(1024);
    let template = format!("{{{{{name}}}}}");
    let mut root = serde_json::Map::new();
    root.insert(name, json!("ok"));
    let out = render(&template, serde_json::Value::Object(root), &RenderOptions::default()).unwrap();
    assert_eq!(out, "ok");
}

#[test]
fn malformed_delimiter_change_is_bad_separators() {
    let err = render("{{=  =}}", json!({}), &RenderOptions::default()).unwrap_err();
    assert_eq!(err.code(), Error::BadSeparators.code());
}

#[test]
fn unbalanced_opener_without_closer_is_unexpected_end() {
    let err = render("{{#a}}x", json!({"a": true}), &RenderOptions::default()).unwrap_err();
    assert_eq!(err.code(), Error::UnexpectedEnd.code());
}

#[test]
fn mismatched_closing_name_is_closing_error() {
    let err = render("{{#a}}x{{/b}}", json!({"a": true}), &RenderOptions::default()).unwrap_err();
    assert_eq!(err.code(), Error::Closing.code());
}
