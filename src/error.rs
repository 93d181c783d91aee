//! Error type shared by the resolver, its disk readers and configuration loading.

use std::path::PathBuf;

/// Errors surfaced while reading the hot file, the manifest or the configuration.
///
/// Missing files are never reported here: an absent hot file means production mode and an
/// absent manifest resolves to an empty mapping.
#[derive(Debug)]
pub enum ViteError {
  /// Reading a file failed for a reason other than it not existing.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// A JSON document could not be parsed.
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// The process working directory could not be determined.
  WorkingDirectory(std::io::Error),
}

impl ViteError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }

  pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
    Self::Parse {
      path: path.into(),
      source,
    }
  }
}

impl std::fmt::Display for ViteError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Parse { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
      Self::WorkingDirectory(source) => {
        write!(f, "failed to resolve the working directory: {}", source)
      }
    }
  }
}

impl std::error::Error for ViteError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Parse { source, .. } => Some(source),
      Self::WorkingDirectory(source) => Some(source),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::error::Error as _;

  #[test]
  fn io_errors_mention_the_path() {
    let err = ViteError::io(
      "/srv/app/hot",
      std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    );

    assert_eq!(err.to_string(), "failed to read /srv/app/hot: denied");
    assert!(err.source().is_some());
  }

  #[test]
  fn parse_errors_keep_their_source() {
    let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = ViteError::parse("build/manifest.json", source);

    assert!(err.to_string().starts_with("failed to parse build/manifest.json:"));
    assert!(err.source().is_some());
  }
}
