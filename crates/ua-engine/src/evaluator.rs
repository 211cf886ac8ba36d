//! Rule chain evaluation.

use crate::error::{Result, UaError};
use crate::rule::{Rule, RuleSpec};
use crate::types::Axis;
use serde::{Deserialize, Serialize};

/// An ordered rule list for one axis, as written in a rule document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSpec {
    /// Value returned when no rule matches.
    pub fallback: String,

    /// Rules in priority order. Earlier rules win.
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

impl ChainSpec {
    /// Creates an empty chain with the given fallback.
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
            rules: Vec::new(),
        }
    }

    /// Appends a rule.
    pub fn with_rule(mut self, rule: RuleSpec) -> Self {
        self.rules.push(rule);
        self
    }

    /// Compiles every rule of the chain.
    pub fn compile(&self, axis: Axis) -> Result<RuleChain> {
        if self.fallback.is_empty() {
            return Err(UaError::ValidationError(format!(
                "Fallback is required for the {axis} chain"
            )));
        }

        let rules = self
            .rules
            .iter()
            .map(RuleSpec::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(RuleChain {
            axis,
            rules,
            fallback: self.fallback.clone(),
        })
    }
}

/// A compiled chain: first matching rule wins, otherwise the fallback.
#[derive(Debug, Clone)]
pub struct RuleChain {
    axis: Axis,
    rules: Vec<Rule>,
    fallback: String,
}

impl RuleChain {
    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Evaluates the chain against `input`.
    ///
    /// Rules are tried in declared order and evaluation stops at the first
    /// match; later rules are never consulted.
    pub fn evaluate(&self, input: &str) -> String {
        for rule in &self.rules {
            if let Some(result) = rule.apply(input) {
                tracing::trace!(axis = %self.axis, category = rule.category(), "rule matched");
                return result;
            }
        }

        self.fallback.clone()
    }

    /// Every category this chain can resolve to, fallback included.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .map(Rule::category)
            .chain(std::iter::once(self.fallback.as_str()))
    }
}

/// Evaluates `chain` against `input`.
pub fn evaluate(chain: &RuleChain, input: &str) -> String {
    chain.evaluate(input)
}
