//! HTML rendering for resolved script and stylesheet assets.
//!
//! Attribute values are written verbatim. Callers passing untrusted values must escape them
//! first.

use crate::models::{AttributeMap, RenderedTag, TagKind};

/// Render a module script tag.
///
/// `type="module"` comes first unless overridden in place, caller attributes follow in their
/// own order and `src` is always last.
pub fn script_tag(url: &str, attributes: &AttributeMap) -> String {
  let merged = merge_attributes(&[("type", "module")], attributes, "src", url);
  format!("<script {}></script>\n", render_attributes(&merged))
}

/// Render a stylesheet link tag, with `href` always last.
pub fn stylesheet_tag(url: &str, attributes: &AttributeMap) -> String {
  let merged = merge_attributes(
    &[("rel", "stylesheet"), ("type", "text/css")],
    attributes,
    "href",
    url,
  );
  format!("<link {} />\n", render_attributes(&merged))
}

impl RenderedTag {
  /// Render the tag as HTML, including its trailing newline.
  pub fn to_html(&self) -> String {
    match self.kind {
      TagKind::Script => script_tag(&self.url, &self.attributes),
      TagKind::Stylesheet => stylesheet_tag(&self.url, &self.attributes),
    }
  }
}

/// Serialise attributes as `key="value"` pairs separated by single spaces.
pub fn render_attributes(attributes: &AttributeMap) -> String {
  attributes
    .iter()
    .map(|(key, value)| format!("{key}=\"{value}\""))
    .collect::<Vec<_>>()
    .join(" ")
}

fn merge_attributes(
  defaults: &[(&str, &str)],
  attributes: &AttributeMap,
  url_key: &str,
  url: &str,
) -> AttributeMap {
  let mut merged: AttributeMap = defaults
    .iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect();

  for (key, value) in attributes {
    merged.insert(key.clone(), value.clone());
  }

  merged.shift_remove(url_key);
  merged.insert(url_key.to_string(), url.to_string());
  merged
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::attrs;

  #[test]
  fn renders_bare_script_tag() {
    assert_eq!(
      script_tag("/build/app.abcd.js", &AttributeMap::new()),
      "<script type=\"module\" src=\"/build/app.abcd.js\"></script>\n"
    );
  }

  #[test]
  fn caller_type_overrides_in_place() {
    let tag = script_tag(
      "/build/legacy.js",
      &attrs([("defer", "defer"), ("type", "text/javascript")]),
    );
    assert_eq!(
      tag,
      "<script type=\"text/javascript\" defer=\"defer\" src=\"/build/legacy.js\"></script>\n"
    );
  }

  #[test]
  fn url_attribute_is_always_last() {
    let tag = script_tag("/build/app.js", &attrs([("src", "ignored.js"), ("nonce", "abc")]));
    assert_eq!(
      tag,
      "<script type=\"module\" nonce=\"abc\" src=\"/build/app.js\"></script>\n"
    );

    let link = stylesheet_tag("/build/app.css", &attrs([("href", "x.css"), ("media", "print")]));
    assert_eq!(
      link,
      "<link rel=\"stylesheet\" type=\"text/css\" media=\"print\" href=\"/build/app.css\" />\n"
    );
  }

  #[test]
  fn renders_stylesheet_defaults() {
    assert_eq!(
      stylesheet_tag("/build/app.abcd.css", &AttributeMap::new()),
      "<link rel=\"stylesheet\" type=\"text/css\" href=\"/build/app.abcd.css\" />\n"
    );
  }

  #[test]
  fn values_are_not_escaped() {
    let rendered = render_attributes(&attrs([("data-x", "a\"b")]));
    assert_eq!(rendered, "data-x=\"a\"b\"");
  }

  #[test]
  fn rendered_tag_dispatches_on_kind() {
    let tag = RenderedTag {
      kind: TagKind::Stylesheet,
      url: "/build/a.css".into(),
      attributes: AttributeMap::new(),
    };
    assert!(tag.to_html().starts_with("<link "));

    let tag = RenderedTag {
      kind: TagKind::Script,
      ..tag
    };
    assert!(tag.to_html().starts_with("<script "));
  }
}
