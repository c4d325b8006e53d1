//! Identifier to slug conversion

/// Separator used by the plain `%slug%` placeholders.
pub const DEFAULT_SEPARATOR: &str = "";

/// Separator used by the `.with-hyphens` placeholder variants.
pub const HYPHEN_SEPARATOR: &str = "-";

/// Prefix stripped by the `.without-feature` placeholder variants.
pub const FEATURE_PREFIX: &str = "feature/";

/// Convert text to a lowercase slug.
///
/// ASCII letters and digits are kept, lowercased. Every run of other
/// characters (`/`, `.`, spaces, non-ASCII letters, ...) becomes a single
/// `separator`. Leading and trailing runs never produce a separator.
///
/// ```
/// use deploy_blueprint::slug::slugify;
///
/// assert_eq!(slugify("feature/New-Checkout", "-"), "feature-new-checkout");
/// assert_eq!(slugify("feature/New-Checkout", ""), "featurenewcheckout");
/// ```
pub fn slugify(text: &str, separator: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_break = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_break && !result.is_empty() {
                result.push_str(separator);
            }
            pending_break = false;
            result.push(c.to_ascii_lowercase());
        } else {
            pending_break = true;
        }
    }

    result
}

/// Strip a leading `feature/` from a branch-like identifier.
pub fn without_feature(identifier: &str) -> &str {
    identifier.strip_prefix(FEATURE_PREFIX).unwrap_or(identifier)
}
