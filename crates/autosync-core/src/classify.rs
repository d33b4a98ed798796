//! Title → catalog tag classification.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::rules::RulesFile;
use crate::ConfigError;

/// The tag chosen for a title and the collection that tag maps to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub tag: String,
    pub collection_id: Option<u64>,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    tag: String,
    /// Lower-cased, blanks removed.
    keywords: Vec<String>,
    pattern: Option<Regex>,
}

impl CompiledRule {
    fn matches(&self, lower_title: &str) -> bool {
        self.keywords.iter().any(|k| lower_title.contains(k.as_str()))
            || self
                .pattern
                .as_ref()
                .is_some_and(|re| re.is_match(lower_title))
    }
}

/// Ordered keyword/pattern rules plus the tag → collection lookup.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: Vec<CompiledRule>,
    /// Keyed by lower-cased tag.
    collections: HashMap<String, u64>,
}

impl Classifier {
    /// Compiles a validated [`RulesFile`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if a pattern fails to compile.
    pub fn from_rules(rules_file: &RulesFile) -> Result<Self, ConfigError> {
        let rules = rules_file
            .rules
            .iter()
            .map(|rule| {
                let pattern = rule
                    .pattern
                    .as_deref()
                    .map(|p| {
                        RegexBuilder::new(p)
                            .case_insensitive(true)
                            .build()
                            .map_err(|e| {
                                ConfigError::Validation(format!(
                                    "rule '{}' has an invalid pattern: {e}",
                                    rule.tag
                                ))
                            })
                    })
                    .transpose()?;
                Ok(CompiledRule {
                    tag: rule.tag.trim().to_string(),
                    keywords: rule
                        .keywords
                        .iter()
                        .map(|k| k.trim().to_lowercase())
                        .filter(|k| !k.is_empty())
                        .collect(),
                    pattern,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let collections = rules_file
            .collections
            .iter()
            .map(|(tag, id)| (tag.trim().to_lowercase(), *id))
            .collect();

        Ok(Self { rules, collections })
    }

    /// Returns the tag of the first rule matching `title`, or `None`.
    #[must_use]
    pub fn tag_for(&self, title: &str) -> Option<&str> {
        let lower = title.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lower))
            .map(|rule| rule.tag.as_str())
    }

    /// Collection configured for `tag`, compared case-insensitively.
    #[must_use]
    pub fn collection_for(&self, tag: &str) -> Option<u64> {
        self.collections.get(&tag.to_lowercase()).copied()
    }

    /// Classifies a product title. Never fails; unmatched titles yield `None`.
    #[must_use]
    pub fn classify(&self, title: &str) -> Option<Classification> {
        let tag = self.tag_for(title)?;
        Some(Classification {
            tag: tag.to_string(),
            collection_id: self.collection_for(tag),
        })
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}
