//! Rule document parser.

use crate::error::Result;
use crate::table::{RuleTable, RuleTableSpec};

/// Supported rule document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    Yaml,
    Json,
}

impl RuleFormat {
    /// Detects format from file extension.
    pub fn from_extension(path: &str) -> Option<Self> {
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            Some(RuleFormat::Yaml)
        } else if path.ends_with(".json") {
            Some(RuleFormat::Json)
        } else {
            None
        }
    }

    /// Detects format from content.
    pub fn detect(content: &str) -> Self {
        let trimmed = content.trim();
        if trimmed.starts_with('{') {
            RuleFormat::Json
        } else {
            RuleFormat::Yaml
        }
    }
}

/// Parses a rule document, auto-detecting format.
pub fn parse_rule_table(content: &str) -> Result<RuleTableSpec> {
    let format = RuleFormat::detect(content);
    parse_rule_table_with_format(content, format)
}

/// Parses a rule document with specified format.
pub fn parse_rule_table_with_format(content: &str, format: RuleFormat) -> Result<RuleTableSpec> {
    match format {
        RuleFormat::Yaml => RuleTableSpec::from_yaml(content),
        RuleFormat::Json => RuleTableSpec::from_json(content),
    }
}

/// Parses and compiles a rule document in one step.
pub fn load_rule_table(content: &str) -> Result<RuleTable> {
    parse_rule_table(content)?.compile()
}

/// Parses and compiles a rule document read from `path`.
///
/// The extension decides the format; content detection is the fallback
/// for unrecognised extensions.
pub fn load_rule_table_from(path: &str, content: &str) -> Result<RuleTable> {
    let format = RuleFormat::from_extension(path).unwrap_or_else(|| RuleFormat::detect(content));
    tracing::debug!(path, ?format, "loading rule table");
    parse_rule_table_with_format(content, format)?.compile()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UaError;

    const MINIMAL_YAML: &str = r#"
browsers: { fallback: unknown }
engines: { fallback: unknown }
oses: { fallback: Unknown }
platforms: { fallback: unknown }
"#;

    #[test]
    fn test_format_detection() {
        assert_eq!(RuleFormat::detect(r#"{"browsers": {}}"#), RuleFormat::Json);
        assert_eq!(RuleFormat::detect("browsers: {}"), RuleFormat::Yaml);
        assert_eq!(RuleFormat::from_extension("rules.yml"), Some(RuleFormat::Yaml));
        assert_eq!(RuleFormat::from_extension("rules.toml"), None);
    }

    #[test]
    fn test_parse_yaml() {
        let spec = parse_rule_table(MINIMAL_YAML).unwrap();
        assert_eq!(spec.oses.fallback, "Unknown");
        assert_eq!(spec.rule_count(), 0);
    }

    #[test]
    fn test_parse_json() {
        let json = RuleTableSpec::builtin().to_json().unwrap();
        let spec = parse_rule_table(&json).unwrap();
        assert_eq!(spec, RuleTableSpec::builtin());
    }

    #[test]
    fn test_load_rejects_bad_pattern() {
        let yaml = r#"
browsers:
  fallback: unknown
  rules:
    - { category: broken, pattern: "(" }
engines: { fallback: unknown }
oses: { fallback: Unknown }
platforms: { fallback: unknown }
"#;
        assert!(matches!(
            load_rule_table(yaml),
            Err(UaError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_load_from_path_uses_extension() {
        let table = load_rule_table_from("rules.yaml", MINIMAL_YAML).unwrap();
        assert_eq!(table.oses().fallback(), "Unknown");

        // A YAML document named .json is parsed as JSON and rejected.
        let err = load_rule_table_from("rules.json", MINIMAL_YAML).unwrap_err();
        assert!(matches!(err, UaError::SerializationError(_)));
    }

    #[test]
    fn test_load_from_unknown_extension_detects_content() {
        let json = RuleTableSpec::builtin().to_json().unwrap();
        let table = load_rule_table_from("rules.txt", &json).unwrap();
        assert_eq!(table.browsers().rules().len(), 8);
    }

    #[test]
    fn test_missing_chain_is_parse_error() {
        let err = parse_rule_table("browsers: { fallback: unknown }").unwrap_err();
        assert!(matches!(err, UaError::ParseError(_)));
    }
}
