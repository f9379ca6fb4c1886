//! Junk rule table
//!
//! Rules are data: a pattern plus a mode, evaluated in table order. The
//! matching engine below knows nothing about specific boilerplate.

use crate::config::{JunkMode, JunkRuleConfig};
use crate::ConfigError;
use regex::{Regex, RegexBuilder};

/// A compiled junk rule
#[derive(Debug, Clone)]
pub struct JunkRule {
    regex: Regex,
    mode: JunkMode,
}

impl JunkRule {
    /// Compiles a rule; patterns are case-insensitive and `.` spans lines
    pub fn new(pattern: &str, mode: JunkMode) -> Result<Self, ConfigError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .multi_line(true)
            .build()
            .map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self { regex, mode })
    }

    /// Applies the rule, returning the text that survives
    pub fn apply(&self, text: &str) -> String {
        match self.mode {
            JunkMode::TruncateFrom => match self.regex.find(text) {
                Some(found) => text[..found.start()].to_string(),
                None => text.to_string(),
            },
            JunkMode::Remove => self.regex.replace_all(text, "").into_owned(),
        }
    }
}

/// Ordered list of junk rules
#[derive(Debug, Clone, Default)]
pub struct JunkTable {
    rules: Vec<JunkRule>,
}

impl JunkTable {
    /// Compiles every configured rule, failing on the first invalid pattern
    pub fn compile(rules: &[JunkRuleConfig]) -> Result<Self, ConfigError> {
        let rules = rules
            .iter()
            .map(|rule| JunkRule::new(&rule.pattern, rule.mode))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// Runs every rule in order over the text
    pub fn strip(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |remaining, rule| rule.apply(&remaining))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
