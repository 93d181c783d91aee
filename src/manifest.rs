//! Loading and caching the production build manifest.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ViteError;

/// Compiled output recorded for one entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
  /// Hashed output file, relative to the build directory.
  pub file: Option<String>,
  /// Stylesheets extracted from the entry, in build order.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub css: Vec<String>,
}

impl ManifestEntry {
  /// Read `file` and `css` from a raw manifest value.
  ///
  /// Missing keys, `null` and values of the wrong type are treated as absent, and non-string
  /// items inside `css` are skipped.
  pub fn from_value(value: &Value) -> Self {
    let file = value
      .get("file")
      .and_then(Value::as_str)
      .map(str::to_string);
    let css = value
      .get("css")
      .and_then(Value::as_array)
      .map(|items| {
        items
          .iter()
          .filter_map(Value::as_str)
          .map(str::to_string)
          .collect()
      })
      .unwrap_or_default();

    Self { file, css }
  }

  /// Output file, ignoring empty strings.
  pub fn output_file(&self) -> Option<&str> {
    self.file.as_deref().filter(|file| !file.is_empty())
  }
}

/// Entry name to compiled output mapping as written by the bundler.
///
/// Only the document as a whole must be a JSON object; each entry is read leniently so one
/// unexpected value cannot hide the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "IndexMap<String, Value>")]
pub struct Manifest {
  entries: IndexMap<String, ManifestEntry>,
}

impl Manifest {
  /// Parse a manifest document.
  pub fn from_json(content: &str) -> serde_json::Result<Self> {
    serde_json::from_str(content)
  }

  /// Look up a single entry point.
  pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
    self.entries.get(name)
  }

  /// Number of entries.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// True when no entries were loaded.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl From<IndexMap<String, Value>> for Manifest {
  fn from(raw: IndexMap<String, Value>) -> Self {
    raw
      .into_iter()
      .map(|(name, value)| {
        let entry = ManifestEntry::from_value(&value);
        (name, entry)
      })
      .collect()
  }
}

impl FromIterator<(String, ManifestEntry)> for Manifest {
  fn from_iter<T: IntoIterator<Item = (String, ManifestEntry)>>(iter: T) -> Self {
    Self {
      entries: iter.into_iter().collect(),
    }
  }
}

impl Serialize for Manifest {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.entries.serialize(serializer)
  }
}

/// Lazily reads the manifest and keeps it for the lifetime of the store.
#[derive(Debug, Clone)]
pub struct ManifestStore {
  path: PathBuf,
  strict: bool,
  cache: Option<Manifest>,
}

impl ManifestStore {
  /// Store reading `path`. With `strict`, malformed JSON is an error instead of an empty manifest.
  pub fn new(path: impl Into<PathBuf>, strict: bool) -> Self {
    Self {
      path: path.into(),
      strict,
      cache: None,
    }
  }

  #[cfg(test)]
  pub(crate) fn is_loaded(&self) -> bool {
    self.cache.is_some()
  }

  /// Return the manifest, reading it from disk on first use.
  ///
  /// A missing file yields an empty manifest. Malformed JSON also yields an empty manifest
  /// unless the store is strict, in which case the error is returned and nothing is cached.
  pub fn get(&mut self) -> Result<&Manifest, ViteError> {
    if self.cache.is_none() {
      let manifest = self.load()?;
      self.cache = Some(manifest);
    }

    Ok(self.cache.get_or_insert_with(Manifest::default))
  }

  fn load(&self) -> Result<Manifest, ViteError> {
    let content = match fs::read_to_string(&self.path) {
      Ok(content) => content,
      Err(err) if err.kind() == ErrorKind::NotFound => {
        debug!(path = %self.path.display(), "no manifest found");
        return Ok(Manifest::default());
      }
      Err(err) => return Err(ViteError::io(&self.path, err)),
    };

    match Manifest::from_json(&content) {
      Ok(manifest) => {
        debug!(
          path = %self.path.display(),
          entries = manifest.len(),
          "loaded manifest"
        );
        Ok(manifest)
      }
      Err(err) if self.strict => Err(ViteError::parse(&self.path, err)),
      Err(err) => {
        warn!(
          path = %self.path.display(),
          error = %err,
          "ignoring malformed manifest"
        );
        Ok(Manifest::default())
      }
    }
  }
}
