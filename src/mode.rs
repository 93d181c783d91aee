//! Development mode detection through the dev server's hot file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ViteError;

/// Decides between dev and production mode and exposes the dev server origin.
#[derive(Debug, Clone)]
pub struct ModeDetector {
  hot_file: PathBuf,
  force_dev: bool,
  host: Option<String>,
}

impl ModeDetector {
  /// Detector watching `<root>/<hot_file>`; `force_dev` mirrors the `dev` config flag.
  pub fn new(root: &Path, hot_file: &str, force_dev: bool) -> Self {
    Self {
      hot_file: root.join(hot_file),
      force_dev,
      host: None,
    }
  }

  /// Location of the hot file.
  pub fn hot_file_path(&self) -> &Path {
    &self.hot_file
  }

  /// Whether assets should be served by the dev server.
  ///
  /// The hot file is checked on every call so a dev server started or stopped mid-process is
  /// noticed by the next render.
  pub fn is_dev(&self) -> bool {
    self.hot_file.is_file() || self.force_dev
  }

  /// Dev server base URL, with a single trailing slash, or an empty string without a hot file.
  ///
  /// The hot file is read once; later calls reuse the cached origin.
  pub fn host(&mut self) -> Result<String, ViteError> {
    if let Some(host) = &self.host {
      return Ok(host.clone());
    }

    let contents = match fs::read_to_string(&self.hot_file) {
      Ok(contents) => contents,
      Err(err) if err.kind() == ErrorKind::NotFound => return Ok(String::new()),
      Err(err) => return Err(ViteError::io(&self.hot_file, err)),
    };

    let host = format!("{}/", contents.trim().trim_end_matches('/'));
    debug!(path = %self.hot_file.display(), %host, "resolved dev server host");
    self.host = Some(host.clone());
    Ok(host)
  }
}
