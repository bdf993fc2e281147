//! Responsible-person name lookup with an explicit, injected cache.
//!
//! The cache is constructed once per process and passed by reference to the
//! transformer; tests substitute a fresh instance instead of fighting a
//! process-wide singleton.

use std::collections::HashMap;

/// Maps responsible-person initials to full display names, resolving each set
/// of initials at most once per cache lifetime.
pub struct NameCache {
    names: HashMap<String, String>,
    resolver: Box<dyn Fn(&str) -> Option<String> + Send>,
}

impl NameCache {
    /// A cache backed by `resolver`, consulted once per unknown initials.
    pub fn new(resolver: impl Fn(&str) -> Option<String> + Send + 'static) -> Self {
        Self {
            names: HashMap::new(),
            resolver: Box::new(resolver),
        }
    }

    /// A cache that passes initials through unchanged.
    pub fn passthrough() -> Self {
        Self::new(|_| None)
    }

    /// Display name for `initials`; falls back to the initials themselves
    /// when the resolver has no answer.
    pub fn display_name(&mut self, initials: &str) -> String {
        if initials.is_empty() {
            return String::new();
        }
        if let Some(name) = self.names.get(initials) {
            return name.clone();
        }
        let resolved = (self.resolver)(initials).unwrap_or_else(|| initials.to_string());
        self.names.insert(initials.to_string(), resolved.clone());
        resolved
    }
}
