//! Classification of requested entry points into script and stylesheet assets.
//!
//! Dev mode passes script entries straight through to the dev server; production mode maps
//! each entry to its compiled file and extracted stylesheets through the manifest.

mod filters;
mod resolver;

pub use filters::is_stylesheet;
pub use resolver::{ResolveMode, ResolvedAssets, resolve_entries};
