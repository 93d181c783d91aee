//! Public entry point turning requested entries into the tags a page must emit.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::assets::{ResolveMode, resolve_entries};
use crate::config::ViteConfig;
use crate::error::ViteError;
use crate::manifest::{Manifest, ManifestStore};
use crate::mode::ModeDetector;
use crate::models::{AttributeMap, Entries, RenderedTag, TagKind};

/// Asset tag resolver scoped to one rendering context.
///
/// The hot file and the manifest are each read at most once per instance, and the dev server
/// client tag is emitted by the first render only. Create a fresh instance per page render.
#[derive(Debug, Clone)]
pub struct Vite {
  config: ViteConfig,
  root: PathBuf,
  mode: ModeDetector,
  manifest: ManifestStore,
  client_injected: bool,
}

impl Vite {
  /// Resolver rooted at the canonical process working directory.
  pub fn new(config: ViteConfig) -> Result<Self, ViteError> {
    let root = env::current_dir()
      .and_then(|dir| dir.canonicalize())
      .map_err(ViteError::WorkingDirectory)?;
    Ok(Self::with_root(config, root))
  }

  /// Resolver rooted at an explicit project directory.
  pub fn with_root(config: ViteConfig, root: impl Into<PathBuf>) -> Self {
    let root = root.into();
    let mode = ModeDetector::new(&root, &config.hot_file, config.dev);
    let manifest = ManifestStore::new(config.manifest_path(&root), config.strict_manifest);

    Self {
      config,
      root,
      mode,
      manifest,
      client_injected: false,
    }
  }

  /// Project root the hot file and build directory are resolved against.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Whether a dev server is attached or dev mode is forced by configuration.
  pub fn is_dev(&self) -> bool {
    self.mode.is_dev()
  }

  /// Dev server origin with a trailing slash, or an empty string when no hot file exists.
  pub fn host(&mut self) -> Result<String, ViteError> {
    self.mode.host()
  }

  /// Location of the hot file.
  pub fn hot_file_path(&self) -> &Path {
    self.mode.hot_file_path()
  }

  /// Public prefix of the build directory, e.g. `/build/`.
  pub fn build_dir(&self) -> String {
    self.config.build_dir_prefix()
  }

  /// The production manifest, read from disk on first access.
  pub fn manifest(&mut self) -> Result<&Manifest, ViteError> {
    self.manifest.get()
  }

  /// Whether the dev server client tag has already been emitted.
  pub fn client_injected(&self) -> bool {
    self.client_injected
  }

  /// URL of `path`, served by the dev server in dev mode and from the build directory otherwise.
  pub fn get_url(&mut self, path: &str) -> Result<String, ViteError> {
    let dev = self.is_dev();
    self.url_for(dev, path)
  }

  /// Render the tags for `entries` as one HTML string.
  ///
  /// Stylesheets come first in reverse resolution order, then the dev server client tag on
  /// the first dev mode render, then scripts in resolution order.
  pub fn use_entries(
    &mut self,
    entries: impl Into<Entries>,
    attributes: &AttributeMap,
  ) -> Result<String, ViteError> {
    let tags = self.resolve(entries, attributes)?;
    Ok(tags.iter().map(RenderedTag::to_html).collect())
  }

  /// Resolve `entries` into tags in their final output order without rendering them.
  pub fn resolve(
    &mut self,
    entries: impl Into<Entries>,
    attributes: &AttributeMap,
  ) -> Result<Vec<RenderedTag>, ViteError> {
    let dev = self.is_dev();
    let entries: Entries = entries.into();
    let pairs = entries.into_pairs(attributes);

    let assets = if dev {
      resolve_entries(ResolveMode::Development, pairs)
    } else {
      let manifest = self.manifest.get()?;
      resolve_entries(ResolveMode::Production(manifest), pairs)
    };

    let mut tags = Vec::with_capacity(assets.scripts.len() + assets.stylesheets.len() + 1);

    for (path, attributes) in assets.stylesheets.into_iter().rev() {
      tags.push(RenderedTag {
        kind: TagKind::Stylesheet,
        url: self.url_for(dev, &path)?,
        attributes,
      });
    }

    if dev && !self.client_injected {
      let client_entry = self.config.client_entry.clone();
      tags.push(RenderedTag {
        kind: TagKind::Script,
        url: self.url_for(dev, &client_entry)?,
        attributes: AttributeMap::new(),
      });
      self.client_injected = true;
      debug!(entry = %client_entry, "injected dev server client");
    }

    for (path, attributes) in assets.scripts {
      tags.push(RenderedTag {
        kind: TagKind::Script,
        url: self.url_for(dev, &path)?,
        attributes,
      });
    }

    Ok(tags)
  }

  fn url_for(&mut self, dev: bool, path: &str) -> Result<String, ViteError> {
    let base = if dev {
      self.mode.host()?
    } else {
      self.build_dir()
    };
    Ok(format!("{base}{path}"))
  }
}
