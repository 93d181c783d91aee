//! Data structures passed between the facade, the resolver and the tag renderer.

use indexmap::IndexMap;

/// Ordered HTML attributes. Insertion order is the rendered order.
pub type AttributeMap = IndexMap<String, String>;

/// Build an [`AttributeMap`] from key/value pairs, keeping their order.
pub fn attrs<K, V, I>(pairs: I) -> AttributeMap
where
  K: Into<String>,
  V: Into<String>,
  I: IntoIterator<Item = (K, V)>,
{
  pairs
    .into_iter()
    .map(|(key, value)| (key.into(), value.into()))
    .collect()
}

/// Entry points requested by a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entries {
  /// One entry rendered with the call's default attributes.
  Single(String),
  /// Several entries sharing the call's default attributes.
  List(Vec<String>),
  /// Entries carrying their own attributes, in insertion order.
  Mapped(IndexMap<String, AttributeMap>),
}

impl Entries {
  /// Expand into `(name, attributes)` pairs, applying `defaults` where no attributes were given.
  pub fn into_pairs(self, defaults: &AttributeMap) -> Vec<(String, AttributeMap)> {
    match self {
      Self::Single(name) => vec![(name, defaults.clone())],
      Self::List(names) => names
        .into_iter()
        .map(|name| (name, defaults.clone()))
        .collect(),
      Self::Mapped(entries) => entries.into_iter().collect(),
    }
  }
}

impl From<&str> for Entries {
  fn from(value: &str) -> Self {
    Self::Single(value.to_string())
  }
}

impl From<String> for Entries {
  fn from(value: String) -> Self {
    Self::Single(value)
  }
}

impl From<Vec<String>> for Entries {
  fn from(value: Vec<String>) -> Self {
    Self::List(value)
  }
}

impl From<Vec<&str>> for Entries {
  fn from(value: Vec<&str>) -> Self {
    Self::List(value.into_iter().map(str::to_string).collect())
  }
}

impl From<&[&str]> for Entries {
  fn from(value: &[&str]) -> Self {
    Self::List(value.iter().map(|name| name.to_string()).collect())
  }
}

impl From<IndexMap<String, AttributeMap>> for Entries {
  fn from(value: IndexMap<String, AttributeMap>) -> Self {
    Self::Mapped(value)
  }
}

/// Which HTML element a resolved asset is emitted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
  /// `<script type="module">`.
  Script,
  /// `<link rel="stylesheet">`.
  Stylesheet,
}

/// A resolved asset ready to be rendered into HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTag {
  /// Element kind.
  pub kind: TagKind,
  /// Absolute or dev-server URL of the asset.
  pub url: String,
  /// Caller attributes, before the element defaults are merged in.
  pub attributes: AttributeMap,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn single_and_list_entries_share_defaults() {
    let defaults = attrs([("defer", "defer")]);

    let single = Entries::from("app.js").into_pairs(&defaults);
    assert_eq!(single, vec![("app.js".to_string(), defaults.clone())]);

    let list = Entries::from(vec!["a.js", "b.js"]).into_pairs(&defaults);
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].0, "a.js");
    assert_eq!(list[1].0, "b.js");
    assert!(list.iter().all(|(_, attributes)| attributes == &defaults));
  }

  #[test]
  fn mapped_entries_keep_their_own_attributes() {
    let mut mapped = IndexMap::new();
    mapped.insert("b.js".to_string(), attrs([("async", "async")]));
    mapped.insert("a.js".to_string(), AttributeMap::new());

    let pairs = Entries::from(mapped).into_pairs(&attrs([("defer", "defer")]));

    assert_eq!(pairs[0], ("b.js".to_string(), attrs([("async", "async")])));
    assert_eq!(pairs[1], ("a.js".to_string(), AttributeMap::new()));
  }

  #[test]
  fn attrs_preserves_insertion_order() {
    let map = attrs([("z", "1"), ("a", "2"), ("m", "3")]);
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
  }
}
