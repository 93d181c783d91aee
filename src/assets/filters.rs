use regex::Regex;

fn stylesheet_pattern() -> &'static Regex {
  use std::sync::OnceLock;

  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r"\.(css|less|sass|scss|styl|stylus|pcss|postcss)$")
      .expect("invalid stylesheet extension regex")
  })
}

/// Determine whether a path names a stylesheet, judged by its extension alone.
///
/// Matching is case-sensitive, so `APP.CSS` is treated as a script like any other unknown
/// extension.
pub fn is_stylesheet(path: &str) -> bool {
  stylesheet_pattern().is_match(path)
}
