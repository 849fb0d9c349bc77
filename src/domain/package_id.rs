//! Package identifier matching for removal broadcasts.
//!
//! Removal broadcasts arrive for every package on the device, and the
//! identifier often comes wrapped in a URI-like string such as
//! `package:com.example.app` rather than the bare identifier. Matching is
//! component-boundary-aware: `com.example.app2` or `com.example.app.beta`
//! never match `com.example.app`.

use std::fmt;

/// The monitored application's package identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageId(String);

impl PackageId {
    /// Create a package identifier from its canonical dotted form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    /// The bare identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decide whether a removal broadcast's identifier refers to this
    /// package.
    ///
    /// Accepts the bare identifier or any string embedding it as a whole
    /// component (`package:com.example.app`, `package://com.example.app/…`).
    /// An empty identifier never matches, and neither does a string that
    /// merely contains this identifier as a prefix of a longer package name.
    pub fn matches_removal_identifier(&self, raw: &str) -> bool {
        let raw = raw.trim();
        if raw.is_empty() || self.0.is_empty() {
            return false;
        }

        raw.match_indices(self.0.as_str()).any(|(start, matched)| {
            let before = raw[..start].chars().next_back();
            let after = raw[start + matched.len()..].chars().next();
            is_component_boundary(before) && is_component_boundary(after)
        })
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A neighbouring character that would extend the package name (letters,
/// digits, `_`, `.`) means the candidate is embedded in a longer identifier.
fn is_component_boundary(neighbour: Option<char>) -> bool {
    match neighbour {
        None => true,
        Some(c) => !(c.is_ascii_alphanumeric() || c == '_' || c == '.'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn own() -> PackageId {
        PackageId::new("com.example.app")
    }

    #[test]
    fn test_exact_identifier_matches() {
        assert!(own().matches_removal_identifier("com.example.app"));
    }

    #[test]
    fn test_uri_wrapped_identifier_matches() {
        assert!(own().matches_removal_identifier("package:com.example.app"));
        assert!(own().matches_removal_identifier("package://com.example.app/base"));
    }

    #[test]
    fn test_unrelated_package_does_not_match() {
        assert!(!own().matches_removal_identifier("com.other.app"));
        assert!(!own().matches_removal_identifier("package:com.other.app"));
    }

    #[test]
    fn test_longer_package_name_does_not_match() {
        assert!(!own().matches_removal_identifier("com.example.app2"));
        assert!(!own().matches_removal_identifier("com.example.app.beta"));
        assert!(!own().matches_removal_identifier("package:com.example.app_pro"));
        assert!(!own().matches_removal_identifier("evil.com.example.app"));
    }

    #[test]
    fn test_empty_and_whitespace_identifiers_do_not_match() {
        assert!(!own().matches_removal_identifier(""));
        assert!(!own().matches_removal_identifier("   "));
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        assert!(own().matches_removal_identifier("  package:com.example.app  "));
    }

    #[test]
    fn test_display_is_bare_identifier() {
        assert_eq!(own().to_string(), "com.example.app");
    }
}
