//! Resolver configuration and its optional JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ViteError;

/// File name looked up by [`ViteConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "vite.config.json";

/// Settings controlling mode detection and where production assets are published.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViteConfig {
    /// Force development mode even when no hot file is present.
    pub dev: bool,
    /// Directory, relative to the root, holding compiled assets and the manifest.
    pub build_dir: String,
    /// Marker file name whose presence signals a running dev server.
    pub hot_file: String,
    /// Manifest file name inside the build directory.
    pub manifest_file: String,
    /// Dev server path of the client bootstrap module.
    pub client_entry: String,
    /// Report malformed manifests as errors instead of treating them as empty.
    pub strict_manifest: bool,
}

impl Default for ViteConfig {
    fn default() -> Self {
        Self {
            dev: false,
            build_dir: "build".into(),
            hot_file: "hot".into(),
            manifest_file: "manifest.json".into(),
            client_entry: "@vite/client".into(),
            strict_manifest: false,
        }
    }
}

impl ViteConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// When the configuration file does not exist or fails to parse we fall back to the
    /// defaults so rendering can still proceed.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Read configuration from a specific JSON file, reporting every failure.
    pub fn load(path: &Path) -> Result<Self, ViteError> {
        let content = fs::read_to_string(path).map_err(|err| ViteError::io(path, err))?;
        serde_json::from_str(&content).map_err(|err| ViteError::parse(path, err))
    }

    /// Override the development flag.
    pub fn with_dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    /// Override the build directory.
    pub fn with_build_dir(mut self, build_dir: impl Into<String>) -> Self {
        self.build_dir = build_dir.into();
        self
    }

    /// Override strict manifest parsing.
    pub fn with_strict_manifest(mut self, strict: bool) -> Self {
        self.strict_manifest = strict;
        self
    }

    /// Public URL prefix of the build directory, always wrapped in single slashes.
    pub fn build_dir_prefix(&self) -> String {
        format!("/{}/", self.build_dir.trim_matches('/'))
    }

    /// Path of the manifest relative to a project root.
    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        root.join(self.build_dir.trim_matches('/'))
            .join(&self.manifest_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_conventional_layout() {
        let config = ViteConfig::default();
        assert!(!config.dev);
        assert_eq!(config.build_dir, "build");
        assert_eq!(config.build_dir_prefix(), "/build/");
    }

    #[test]
    fn trims_slashes_from_build_dir() {
        let config = ViteConfig::default().with_build_dir("/public/assets/");
        assert_eq!(config.build_dir_prefix(), "/public/assets/");
        assert_eq!(
            config.manifest_path(Path::new("/srv")),
            Path::new("/srv/public/assets/manifest.json")
        );
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(ViteConfig::discover(dir.path()), ViteConfig::default());

        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "not json").unwrap();
        assert_eq!(ViteConfig::discover(dir.path()), ViteConfig::default());
    }

    #[test]
    fn discover_reads_camel_case_keys() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{"dev": true, "buildDir": "dist", "strictManifest": true}"#,
        )
        .unwrap();

        let config = ViteConfig::discover(dir.path());
        assert!(config.dev);
        assert!(config.strict_manifest);
        assert_eq!(config.build_dir, "dist");
        assert_eq!(config.hot_file, "hot");
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "{").unwrap();

        assert!(matches!(
            ViteConfig::load(&path),
            Err(ViteError::Parse { .. })
        ));
    }
}
