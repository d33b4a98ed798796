//! Classifier rules file: ordered keyword/pattern rules plus the static
//! tag → collection mapping.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One classification rule. A title matches when it contains any keyword
/// (case-insensitive substring) or matches `pattern`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierRule {
    pub tag: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Optional regular expression, compiled case-insensitively.
    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesFile {
    /// Evaluated top to bottom; the first match wins.
    pub rules: Vec<ClassifierRule>,
    /// Destination collection id per tag. Tags without an entry are imported
    /// without a collection assignment.
    #[serde(default)]
    pub collections: BTreeMap<String, u64>,
}

/// Load and validate the classifier rules from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_rules(path: &Path) -> Result<RulesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_rules(&content)
}

/// Parse and validate rules from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_rules(content: &str) -> Result<RulesFile, ConfigError> {
    let rules_file: RulesFile =
        serde_yaml::from_str(content).map_err(ConfigError::RulesFileParse)?;

    validate_rules(&rules_file)?;

    Ok(rules_file)
}

fn validate_rules(rules_file: &RulesFile) -> Result<(), ConfigError> {
    let mut seen_tags = HashSet::new();

    for rule in &rules_file.rules {
        if rule.tag.trim().is_empty() {
            return Err(ConfigError::Validation(
                "rule tag must be non-empty".to_string(),
            ));
        }

        if !seen_tags.insert(rule.tag.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate rule tag: '{}'",
                rule.tag
            )));
        }

        let has_keyword = rule.keywords.iter().any(|k| !k.trim().is_empty());
        if !has_keyword && rule.pattern.is_none() {
            return Err(ConfigError::Validation(format!(
                "rule '{}' needs at least one keyword or a pattern",
                rule.tag
            )));
        }

        if let Some(pattern) = &rule.pattern {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| {
                    ConfigError::Validation(format!(
                        "rule '{}' has an invalid pattern: {e}",
                        rule.tag
                    ))
                })?;
        }
    }

    for tag in rules_file.collections.keys() {
        if !seen_tags.contains(&tag.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "collection mapping for '{tag}' does not name a rule tag"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
