use std::path::Path;

use super::*;

fn rule(tag: &str, keywords: &[&str], pattern: Option<&str>) -> ClassifierRule {
    ClassifierRule {
        tag: tag.to_string(),
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        pattern: pattern.map(str::to_string),
    }
}

#[test]
fn parse_rules_reads_rules_and_collections() {
    let yaml = r#"
rules:
  - tag: Skincare
    keywords: [serum, moisturizer]
  - tag: Kitchen
    pattern: "knife|cutting\\s+board"
collections:
  Skincare: 555
"#;
    let file = parse_rules(yaml).unwrap();
    assert_eq!(file.rules.len(), 2);
    assert_eq!(file.rules[0].tag, "Skincare");
    assert_eq!(file.rules[0].keywords, vec!["serum", "moisturizer"]);
    assert_eq!(file.rules[1].pattern.as_deref(), Some("knife|cutting\\s+board"));
    assert_eq!(file.collections.get("Skincare"), Some(&555));
}

#[test]
fn parse_rules_collections_are_optional() {
    let yaml = "rules:\n  - tag: Pets\n    keywords: [leash]\n";
    let file = parse_rules(yaml).unwrap();
    assert!(file.collections.is_empty());
}

#[test]
fn parse_rules_rejects_malformed_yaml() {
    let err = parse_rules("rules: [tag: ").unwrap_err();
    assert!(matches!(err, ConfigError::RulesFileParse(_)));
}

#[test]
fn validate_rejects_empty_tag() {
    let file = RulesFile {
        rules: vec![rule("  ", &["serum"], None)],
        collections: BTreeMap::new(),
    };
    let err = validate_rules(&file).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_duplicate_tags_case_insensitively() {
    let file = RulesFile {
        rules: vec![
            rule("Skincare", &["serum"], None),
            rule("skincare", &["cream"], None),
        ],
        collections: BTreeMap::new(),
    };
    let err = validate_rules(&file).unwrap_err();
    assert!(err.to_string().contains("duplicate rule tag"));
}

#[test]
fn validate_rejects_duplicate_tags_differing_in_whitespace() {
    let file = RulesFile {
        rules: vec![
            rule("Skincare", &["serum"], None),
            rule(" skincare", &["cream"], None),
        ],
        collections: BTreeMap::new(),
    };
    let err = validate_rules(&file).unwrap_err();
    assert!(err.to_string().contains("duplicate rule tag"));
}

#[test]
fn validate_matches_collection_keys_to_padded_tags() {
    let mut collections = BTreeMap::new();
    collections.insert("Skincare".to_string(), 555);
    let file = RulesFile {
        rules: vec![rule("Skincare ", &["serum"], None)],
        collections,
    };
    assert!(validate_rules(&file).is_ok());
}

#[test]
fn validate_rejects_rule_without_matchers() {
    let file = RulesFile {
        rules: vec![rule("Empty", &["", "  "], None)],
        collections: BTreeMap::new(),
    };
    let err = validate_rules(&file).unwrap_err();
    assert!(err.to_string().contains("at least one keyword"));
}

#[test]
fn validate_rejects_invalid_pattern() {
    let file = RulesFile {
        rules: vec![rule("Broken", &[], Some("(unclosed"))],
        collections: BTreeMap::new(),
    };
    let err = validate_rules(&file).unwrap_err();
    assert!(err.to_string().contains("invalid pattern"));
}

#[test]
fn validate_rejects_collection_for_unknown_tag() {
    let mut collections = BTreeMap::new();
    collections.insert("Garden".to_string(), 42);
    let file = RulesFile {
        rules: vec![rule("Skincare", &["serum"], None)],
        collections,
    };
    let err = validate_rules(&file).unwrap_err();
    assert!(err.to_string().contains("'Garden'"));
}

#[test]
fn load_rules_reports_missing_file() {
    let err = load_rules(Path::new("/nonexistent/catalog_rules.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::RulesFileIo { .. }));
}

#[test]
fn shipped_rules_file_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/catalog_rules.yaml");
    let file = load_rules(&path).unwrap();
    assert!(!file.rules.is_empty());
}
