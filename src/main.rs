//! Command-line front end printing the tags for one or more entry points.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vite_tags::{AttributeMap, Vite, ViteConfig};

#[derive(Debug, Parser)]
#[command(name = "vite-tags", version, about = "Render Vite entry points as HTML tags")]
struct Cli {
  /// Project root containing the hot file and the build directory.
  #[arg(long, default_value = ".")]
  root: PathBuf,

  /// Configuration file; defaults to `vite.config.json` in the root when present.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Force development mode.
  #[arg(long)]
  dev: bool,

  /// Override the build directory.
  #[arg(long)]
  build_dir: Option<String>,

  /// Attribute added to every tag, as KEY=VALUE. May be repeated.
  #[arg(long = "attr", value_name = "KEY=VALUE", value_parser = parse_attribute)]
  attributes: Vec<(String, String)>,

  /// Print the URL of an asset path instead of tags.
  #[arg(long, value_name = "PATH", conflicts_with = "manifest")]
  url: Option<String>,

  /// Print the loaded manifest as JSON.
  #[arg(long)]
  manifest: bool,

  /// Entry points to render.
  #[arg(required_unless_present_any = ["url", "manifest"])]
  entries: Vec<String>,
}

fn parse_attribute(value: &str) -> Result<(String, String)> {
  let (key, value) = value
    .split_once('=')
    .ok_or_else(|| anyhow!("expected KEY=VALUE, got `{value}`"))?;
  if key.is_empty() {
    return Err(anyhow!("attribute name must not be empty"));
  }
  Ok((key.to_string(), value.to_string()))
}

fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn load_config(cli: &Cli) -> Result<ViteConfig> {
  let mut config = match &cli.config {
    Some(path) => ViteConfig::load(path)
      .with_context(|| format!("failed to load configuration from {}", path.display()))?,
    None => ViteConfig::discover(&cli.root),
  };

  if cli.dev {
    config = config.with_dev(true);
  }
  if let Some(build_dir) = &cli.build_dir {
    config = config.with_build_dir(build_dir.clone());
  }
  Ok(config)
}

fn main() -> Result<()> {
  init_logging();
  let cli = Cli::parse();

  let config = load_config(&cli)?;
  let root = cli
    .root
    .canonicalize()
    .with_context(|| format!("failed to resolve {}", cli.root.display()))?;
  let mut vite = Vite::with_root(config, root);
  debug!(root = %vite.root().display(), dev = vite.is_dev(), "resolver ready");

  if let Some(path) = &cli.url {
    println!("{}", vite.get_url(path)?);
    return Ok(());
  }

  if cli.manifest {
    let manifest = vite.manifest()?;
    println!("{}", serde_json::to_string_pretty(manifest)?);
    return Ok(());
  }

  let attributes: AttributeMap = cli.attributes.iter().cloned().collect();
  let html = vite
    .use_entries(cli.entries.clone(), &attributes)
    .context("failed to render entry tags")?;
  print!("{html}");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_attribute_pairs() {
    assert_eq!(
      parse_attribute("nonce=abc=123").unwrap(),
      ("nonce".to_string(), "abc=123".to_string())
    );
    assert!(parse_attribute("defer").is_err());
    assert!(parse_attribute("=x").is_err());
  }

  #[test]
  fn cli_overrides_discovered_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
      dir.path().join("vite.config.json"),
      r#"{"buildDir": "dist", "strictManifest": true}"#,
    )
    .unwrap();
    let root = dir.path().to_string_lossy().to_string();

    let cli = Cli::parse_from(["vite-tags", "--root", root.as_str(), "--dev", "app.js"]);
    let config = load_config(&cli).unwrap();
    assert!(config.dev);
    assert!(config.strict_manifest);
    assert_eq!(config.build_dir, "dist");

    let cli = Cli::parse_from([
      "vite-tags",
      "--root",
      root.as_str(),
      "--build-dir",
      "public",
      "app.js",
    ]);
    assert_eq!(load_config(&cli).unwrap().build_dir, "public");
  }

  #[test]
  fn requires_entries_unless_querying() {
    assert!(Cli::try_parse_from(["vite-tags"]).is_err());
    assert!(Cli::try_parse_from(["vite-tags", "--manifest"]).is_ok());
    assert!(Cli::try_parse_from(["vite-tags", "--url", "logo.svg"]).is_ok());
  }
}
