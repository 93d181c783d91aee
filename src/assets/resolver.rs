use indexmap::IndexMap;
use tracing::trace;

use crate::assets::filters::is_stylesheet;
use crate::manifest::Manifest;
use crate::models::AttributeMap;

/// Where requested entries are resolved from.
#[derive(Debug, Clone, Copy)]
pub enum ResolveMode<'a> {
  /// Entries are served as-is by the dev server.
  Development,
  /// Entries are mapped to compiled files through the manifest.
  Production(&'a Manifest),
}

/// Scripts and stylesheets keyed by asset path, in the order they were first resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAssets {
  /// Script paths and their attributes.
  pub scripts: IndexMap<String, AttributeMap>,
  /// Stylesheet paths and their attributes.
  pub stylesheets: IndexMap<String, AttributeMap>,
}

impl ResolvedAssets {
  /// Record a script, taking the path over if it was resolved as a stylesheet.
  fn insert_script(&mut self, path: &str, attributes: AttributeMap) {
    self.stylesheets.shift_remove(path);
    self.scripts.insert(path.to_string(), attributes);
  }

  /// Record a stylesheet, taking the path over if it was resolved as a script.
  fn insert_stylesheet(&mut self, path: &str, attributes: AttributeMap) {
    self.scripts.shift_remove(path);
    self.stylesheets.insert(path.to_string(), attributes);
  }

  #[cfg(test)]
  fn is_empty(&self) -> bool {
    self.scripts.is_empty() && self.stylesheets.is_empty()
  }
}

/// Resolve every `(name, attributes)` pair into script and stylesheet paths.
///
/// Paths are relative: they are turned into URLs when rendered. Requesting a path twice keeps
/// its first position and the latest attributes. A path sits in only one of the two maps; when
/// a later request classifies it differently it moves to the end of the other map.
pub fn resolve_entries<I>(mode: ResolveMode<'_>, entries: I) -> ResolvedAssets
where
  I: IntoIterator<Item = (String, AttributeMap)>,
{
  let mut resolver = AssetResolver::new(mode);
  for (name, attributes) in entries {
    resolver.add(&name, attributes);
  }
  resolver.finish()
}

struct AssetResolver<'a> {
  mode: ResolveMode<'a>,
  assets: ResolvedAssets,
}

impl<'a> AssetResolver<'a> {
  fn new(mode: ResolveMode<'a>) -> Self {
    Self {
      mode,
      assets: ResolvedAssets::default(),
    }
  }

  fn add(&mut self, name: &str, attributes: AttributeMap) {
    match self.mode {
      ResolveMode::Development => self.add_dev_entry(name, attributes),
      ResolveMode::Production(manifest) => self.add_manifest_entry(manifest, name, attributes),
    }
  }

  // Stylesheets are injected by the dev server through their importing module.
  fn add_dev_entry(&mut self, name: &str, attributes: AttributeMap) {
    if is_stylesheet(name) {
      trace!(entry = name, "skipping stylesheet entry in dev mode");
      return;
    }
    self.assets.insert_script(name, attributes);
  }

  fn add_manifest_entry(&mut self, manifest: &Manifest, name: &str, attributes: AttributeMap) {
    let Some(entry) = manifest.get(name) else {
      trace!(entry = name, "entry not present in manifest");
      return;
    };

    for stylesheet in &entry.css {
      self.assets.insert_stylesheet(stylesheet, attributes.clone());
    }

    if let Some(file) = entry.output_file() {
      self.add_by_type(file, attributes);
    }
  }

  fn add_by_type(&mut self, path: &str, attributes: AttributeMap) {
    if is_stylesheet(path) {
      self.assets.insert_stylesheet(path, attributes);
    } else {
      self.assets.insert_script(path, attributes);
    }
  }

  fn finish(self) -> ResolvedAssets {
    self.assets
  }
}
