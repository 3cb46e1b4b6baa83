// src/normalize.rs

/// Canonical comparison key for a display name: outer whitespace trimmed,
/// all characters lowercased.
///
/// Internal whitespace is left alone, so "Jo  Smith" and "Jo Smith" compare
/// as different people. Known limitation of the matching scheme, kept as-is.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
