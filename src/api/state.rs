//! Application state for the HTTP API.

use std::sync::Arc;

use crate::config::RuleSet;

/// Shared application state.
///
/// Holds the loaded rule set behind an `Arc`; every request handler reads
/// the same immutable snapshot.
#[derive(Clone)]
pub struct AppState {
    rules: Arc<RuleSet>,
}

impl AppState {
    /// Creates a new application state around a loaded rule set.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Returns a reference to the rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
