//! Rule definitions and compiled rules.

use crate::error::{Result, UaError};
use crate::template;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// A rule as written in a rule document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Category this rule identifies.
    pub category: String,

    /// Regular expression source. Always matched case-insensitively.
    pub pattern: String,

    /// Result string. Defaults to the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Whether capture groups are substituted into the template.
    #[serde(default, skip_serializing_if = "is_false")]
    pub expand: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl RuleSpec {
    /// A rule that resolves to its category verbatim.
    pub fn simple(category: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            pattern: pattern.into(),
            template: None,
            expand: false,
        }
    }

    /// A rule whose captures are expanded into `template`.
    pub fn expanding(
        category: impl Into<String>,
        pattern: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            pattern: pattern.into(),
            template: Some(template.into()),
            expand: true,
        }
    }

    /// The template the rule resolves to.
    pub fn result_template(&self) -> &str {
        self.template.as_deref().unwrap_or(&self.category)
    }

    /// Compiles the rule, rejecting bad patterns and template mismatches.
    pub fn compile(&self) -> Result<Rule> {
        if self.category.is_empty() {
            return Err(UaError::ValidationError("Rule category is required".to_string()));
        }

        let pattern = compile_pattern(&self.category, &self.pattern)?;
        let template = self.result_template().to_string();

        if self.expand {
            let placeholders = template::count_placeholders(&template);
            let captures = pattern.captures_len() - 1;
            if placeholders != captures {
                return Err(UaError::TemplateMismatch {
                    category: self.category.clone(),
                    placeholders,
                    captures,
                });
            }
        }

        Ok(Rule {
            category: self.category.clone(),
            pattern,
            template,
            expand: self.expand,
        })
    }
}

/// Compiles a case-insensitive pattern on behalf of `category`.
pub(crate) fn compile_pattern(category: &str, source: &str) -> Result<Regex> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .map_err(|e| UaError::invalid_pattern(category, e))
}

/// A compiled rule, ready for evaluation.
#[derive(Debug, Clone)]
pub struct Rule {
    category: String,
    pattern: Regex,
    template: String,
    expand: bool,
}

impl Rule {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn expands(&self) -> bool {
        self.expand
    }

    /// Applies the rule to `input`, returning the result on a match.
    pub fn apply(&self, input: &str) -> Option<String> {
        if !self.expand || self.pattern.captures_len() == 1 {
            return self
                .pattern
                .is_match(input)
                .then(|| self.template.clone());
        }

        let caps = self.pattern.captures(input)?;
        let groups: Vec<&str> = caps
            .iter()
            .skip(1)
            .map(|m| m.map_or("", |m| m.as_str()))
            .collect();

        Some(template::expand(&self.template, groups.as_slice()))
    }
}

/// Builder for creating rule specs.
#[derive(Debug, Default)]
pub struct RuleBuilder {
    category: String,
    pattern: String,
    template: Option<String>,
    expand: bool,
}

impl RuleBuilder {
    /// Creates a new rule builder for a category.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Default::default()
        }
    }

    /// Sets the pattern.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Sets the result template.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Enables capture expansion.
    pub fn expand(mut self) -> Self {
        self.expand = true;
        self
    }

    /// Builds the rule spec.
    pub fn build(self) -> RuleSpec {
        RuleSpec {
            category: self.category,
            pattern: self.pattern,
            template: self.template,
            expand: self.expand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_rule_returns_category() {
        let rule = RuleSpec::simple("chrome", "chrome").compile().unwrap();
        assert_eq!(rule.apply("Mozilla/5.0 Chrome/36.0").as_deref(), Some("chrome"));
        assert_eq!(rule.apply("Firefox/30.0"), None);
    }

    #[test]
    fn test_pattern_is_case_insensitive() {
        let rule = RuleSpec::simple("linux", "linux").compile().unwrap();
        assert!(rule.apply("X11; LINUX x86_64").is_some());
    }

    #[test]
    fn test_unexpanded_rule_ignores_groups() {
        let rule = RuleSpec::simple("Windows Phone", r"windows (ce|phone|mobile)( os)?")
            .compile()
            .unwrap();
        assert_eq!(
            rule.apply("Windows Phone OS 7.5").as_deref(),
            Some("Windows Phone")
        );
    }

    #[test]
    fn test_expanding_rule() {
        let rule = RuleBuilder::new("osx")
            .pattern(r"os x (\d+)[._](\d+)")
            .template("OS X %s.%s")
            .expand()
            .build()
            .compile()
            .unwrap();

        assert_eq!(
            rule.apply("Intel Mac OS X 10_8_5").as_deref(),
            Some("OS X 10.8")
        );
    }

    #[test]
    fn test_template_mismatch_rejected() {
        let err = RuleSpec::expanding("osx", r"os x (\d+)", "OS X %s.%s")
            .compile()
            .unwrap_err();

        match err {
            UaError::TemplateMismatch {
                placeholders,
                captures,
                ..
            } => {
                assert_eq!(placeholders, 2);
                assert_eq!(captures, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = RuleSpec::simple("broken", "(unclosed").compile().unwrap_err();
        assert!(matches!(err, UaError::InvalidPattern { .. }));
    }

    #[test]
    fn test_empty_category_rejected() {
        let err = RuleSpec::simple("", "x").compile().unwrap_err();
        assert!(matches!(err, UaError::ValidationError(_)));
    }
}
