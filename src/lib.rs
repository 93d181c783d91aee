#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod assets;
pub mod config;
pub mod error;
pub mod manifest;
pub mod mode;
pub mod models;
pub mod tags;
pub mod vite;

pub use config::ViteConfig;
pub use error::ViteError;
pub use manifest::{Manifest, ManifestEntry};
pub use models::{AttributeMap, Entries, RenderedTag, TagKind, attrs};
pub use vite::Vite;
