//! Checks over a single configuration mapping
//!
//! A [`ValidationService`] wraps one candidate configuration and records every
//! problem it finds into a shared [`ValidationErrors`] bag instead of stopping
//! at the first one, so a user fixing a fabfile sees all problems at once.

use deploy_tree::Node;

use crate::errors::ValidationErrors;

/// Validation checks scoped to one configuration, e.g. a single host.
pub struct ValidationService<'a> {
    config: &'a Node,
    errors: &'a mut ValidationErrors,
    prefix: String,
}

impl<'a> ValidationService<'a> {
    /// `prefix` names the configuration in every message (e.g. `host \`web\``).
    pub fn new(config: &'a Node, errors: &'a mut ValidationErrors, prefix: impl Into<String>) -> Self {
        Self {
            config,
            errors,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Record an error if `key` is missing. Returns whether it is present.
    pub fn has_key(&mut self, key: &str, message: &str) -> bool {
        if self.config.find(key).is_some() {
            return true;
        }
        self.errors.add_error(
            key,
            format!("Missing key `{}` in {}: {}", key, self.prefix, message),
        );
        false
    }

    /// [`has_key`](Self::has_key) for every `(key, message)` pair.
    ///
    /// All pairs are checked; returns true only if every key is present.
    pub fn has_keys<'k>(&mut self, keys: impl IntoIterator<Item = (&'k str, &'k str)>) -> bool {
        let mut all_present = true;
        for (key, message) in keys {
            all_present &= self.has_key(key, message);
        }
        all_present
    }

    /// Require `key` to hold a sequence or mapping.
    pub fn is_array(&mut self, key: &str, message: &str) -> bool {
        if !self.has_key(key, message) {
            return false;
        }
        if self.config.find(key).is_some_and(Node::is_array) {
            return true;
        }
        self.errors.add_error(
            key,
            format!("Key `{}` in {} must be an array: {}", key, self.prefix, message),
        );
        false
    }

    /// Require `key` to hold a string.
    pub fn is_string(&mut self, key: &str, message: &str) -> bool {
        if !self.has_key(key, message) {
            return false;
        }
        if self.config.find(key).and_then(Node::as_str).is_some() {
            return true;
        }
        self.errors.add_error(
            key,
            format!("Key `{}` in {} must be a string: {}", key, self.prefix, message),
        );
        false
    }

    /// Require `key` to hold one of `candidates`.
    pub fn is_one_of(&mut self, key: &str, candidates: &[&str]) -> bool {
        let message = format!("one of {}", candidates.join(", "));
        if !self.has_key(key, &message) {
            return false;
        }
        let value = self
            .config
            .find(key)
            .and_then(Node::as_scalar)
            .map(|scalar| scalar.to_text());
        match value {
            Some(value) if candidates.contains(&value.as_str()) => true,
            value => {
                let shown = value.unwrap_or_else(|| "<collection>".to_string());
                self.errors.add_error(
                    key,
                    format!(
                        "Key `{}` in {} has invalid value `{}`, expected {}",
                        key, self.prefix, shown, message
                    ),
                );
                false
            }
        }
    }

    /// Warn about every listed key that is still present.
    pub fn deprecate<'k>(&mut self, keys: impl IntoIterator<Item = (&'k str, &'k str)>) {
        for (key, message) in keys {
            if self.config.find(key).is_some() {
                self.errors.add_warning(
                    key,
                    format!("Key `{}` in {} is deprecated: {}", key, self.prefix, message),
                );
            }
        }
    }

    /// Reject folder values with a trailing `/`, except the root folder itself.
    ///
    /// A missing key is not an error here.
    pub fn check_for_valid_folder_name(&mut self, key: &str) -> bool {
        let Some(value) = self.config.find(key).and_then(Node::as_str) else {
            return true;
        };
        if value != "/" && value.ends_with('/') {
            self.errors.add_error(
                key,
                format!(
                    "Key `{}` in {} must not end with a `/`: `{}`",
                    key, self.prefix, value
                ),
            );
            return false;
        }
        true
    }
}
