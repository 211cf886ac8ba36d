//! Rule tables: the document form, the compiled form, and the
//! process-wide instance.

use crate::error::{Result, UaError};
use crate::evaluator::{ChainSpec, RuleChain};
use crate::rule::compile_pattern;
use crate::types::Axis;
use crate::{defaults, hash, version};
use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

static GLOBAL_TABLE: OnceCell<RuleTable> = OnceCell::new();

/// A complete rule table as written in a rule document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTableSpec {
    pub browsers: ChainSpec,
    pub engines: ChainSpec,
    pub oses: ChainSpec,
    pub platforms: ChainSpec,

    /// Dedicated version patterns, keyed by browser category. Each pattern
    /// captures the version in group 1.
    ///
    /// This map and the sets below are ordered, so a table renders the same
    /// way regardless of how its document listed them.
    #[serde(default)]
    pub browser_versions: BTreeMap<String, String>,

    /// Platform categories considered mobile.
    #[serde(default)]
    pub mobile_platforms: BTreeSet<String>,

    /// Browser categories considered mobile on any platform.
    #[serde(default)]
    pub mobile_browsers: BTreeSet<String>,

    /// Prefixes identifying first-party native clients. Such strings carry
    /// no browser or engine.
    #[serde(default)]
    pub native_client_prefixes: BTreeSet<String>,
}

impl RuleTableSpec {
    /// The built-in rule table.
    pub fn builtin() -> Self {
        defaults::builtin()
    }

    /// Parses a rule table from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let spec: RuleTableSpec = serde_yaml::from_str(yaml)?;
        Ok(spec)
    }

    /// Parses a rule table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: RuleTableSpec = serde_json::from_str(json)?;
        Ok(spec)
    }

    /// Serializes the rule table to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| UaError::SerializationError(e.to_string()))
    }

    /// Serializes the rule table to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| UaError::SerializationError(e.to_string()))
    }

    fn chain(&self, axis: Axis) -> &ChainSpec {
        match axis {
            Axis::Browser => &self.browsers,
            Axis::Engine => &self.engines,
            Axis::Os => &self.oses,
            Axis::Platform => &self.platforms,
        }
    }

    /// Validates and compiles the table.
    pub fn compile(&self) -> Result<RuleTable> {
        let browsers = self.browsers.compile(Axis::Browser)?;
        let engines = self.engines.compile(Axis::Engine)?;
        let oses = self.oses.compile(Axis::Os)?;
        let platforms = self.platforms.compile(Axis::Platform)?;

        let mut browser_versions = HashMap::with_capacity(self.browser_versions.len());
        for (category, source) in &self.browser_versions {
            let pattern = compile_pattern(category, source)?;
            if pattern.captures_len() < 2 {
                return Err(UaError::ValidationError(format!(
                    "Version pattern for '{category}' must capture the version"
                )));
            }
            browser_versions.insert(category.clone(), pattern);
        }

        // Generic patterns for every category the browser and engine axes
        // can produce, so lookups never compile on the hot path.
        let mut synthesized = HashMap::new();
        for category in browsers.categories().chain(engines.categories()) {
            if !synthesized.contains_key(category) {
                synthesized.insert(category.to_string(), version::synthesize(category)?);
            }
        }

        if self.native_client_prefixes.iter().any(String::is_empty) {
            return Err(UaError::ValidationError(
                "Native client prefixes must not be empty".to_string(),
            ));
        }

        let fingerprint = hash::fingerprint(self)?;

        tracing::info!(
            browsers = browsers.rules().len(),
            engines = engines.rules().len(),
            oses = oses.rules().len(),
            platforms = platforms.rules().len(),
            fingerprint = %fingerprint,
            "compiled rule table"
        );

        Ok(RuleTable {
            browsers,
            engines,
            oses,
            platforms,
            browser_versions,
            synthesized,
            mobile_platforms: self.mobile_platforms.iter().cloned().collect(),
            mobile_browsers: self.mobile_browsers.iter().cloned().collect(),
            native_client_prefixes: self.native_client_prefixes.iter().cloned().collect(),
            fingerprint,
        })
    }

    /// Number of rules across all four chains.
    pub fn rule_count(&self) -> usize {
        Axis::ALL.iter().map(|axis| self.chain(*axis).rules.len()).sum()
    }
}

/// A compiled, immutable rule table.
///
/// Shared by reference across any number of threads; nothing mutates it
/// after [`RuleTableSpec::compile`] returns.
#[derive(Debug)]
pub struct RuleTable {
    browsers: RuleChain,
    engines: RuleChain,
    oses: RuleChain,
    platforms: RuleChain,
    browser_versions: HashMap<String, Regex>,
    synthesized: HashMap<String, Regex>,
    mobile_platforms: HashSet<String>,
    mobile_browsers: HashSet<String>,
    native_client_prefixes: Vec<String>,
    fingerprint: String,
}

impl RuleTable {
    /// Compiles the built-in table.
    pub fn builtin() -> Result<Self> {
        RuleTableSpec::builtin().compile()
    }

    /// The process-wide table, building the built-in one on first use.
    ///
    /// # Panics
    ///
    /// Panics if no table was installed and the built-in table fails to
    /// compile. Call [`init`] at startup to surface that as an error instead.
    pub fn global() -> &'static RuleTable {
        match init() {
            Ok(table) => table,
            Err(err) => panic!("built-in rule table is defective: {err}"),
        }
    }

    pub fn chain(&self, axis: Axis) -> &RuleChain {
        match axis {
            Axis::Browser => &self.browsers,
            Axis::Engine => &self.engines,
            Axis::Os => &self.oses,
            Axis::Platform => &self.platforms,
        }
    }

    pub fn browsers(&self) -> &RuleChain {
        &self.browsers
    }

    pub fn engines(&self) -> &RuleChain {
        &self.engines
    }

    pub fn oses(&self) -> &RuleChain {
        &self.oses
    }

    pub fn platforms(&self) -> &RuleChain {
        &self.platforms
    }

    /// Evaluates one axis against `input`.
    pub fn evaluate(&self, axis: Axis, input: &str) -> String {
        self.chain(axis).evaluate(input)
    }

    /// Extracts a browser version: the dedicated pattern for `category` if
    /// one exists, otherwise the generic one.
    pub fn browser_version(&self, category: &str, input: &str) -> String {
        match self.browser_versions.get(category) {
            Some(pattern) => version::capture_version(pattern, input),
            None => self.generic_version(category, input),
        }
    }

    /// Extracts a version with the generic `category[/ ]version` pattern.
    pub fn generic_version(&self, category: &str, input: &str) -> String {
        if let Some(pattern) = self.synthesized.get(category) {
            return version::capture_version(pattern, input);
        }

        tracing::warn!(category, "synthesizing version pattern for unlisted category");
        version::synthesize(category)
            .map(|pattern| version::capture_version(&pattern, input))
            .unwrap_or_default()
    }

    pub fn is_mobile_platform(&self, platform: &str) -> bool {
        self.mobile_platforms.contains(platform)
    }

    pub fn is_mobile_browser(&self, browser: &str) -> bool {
        self.mobile_browsers.contains(browser)
    }

    /// Whether `input` comes from a first-party native client.
    pub fn is_native_client(&self, input: &str) -> bool {
        self.native_client_prefixes
            .iter()
            .any(|prefix| input.starts_with(prefix.as_str()))
    }

    /// SHA-256 of the rule document this table was compiled from.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

/// Builds and installs the built-in table unless one is already installed.
///
/// Safe to call any number of times; only the first call compiles.
pub fn init() -> Result<&'static RuleTable> {
    GLOBAL_TABLE.get_or_try_init(|| {
        let table = RuleTable::builtin()?;
        tracing::debug!(fingerprint = table.fingerprint(), "installed built-in rule table");
        Ok(table)
    })
}

/// Installs a custom table as the process-wide one.
///
/// Fails if a table is already installed, whether by an earlier call to
/// `install`, [`init`], or [`RuleTable::global`].
pub fn install(table: RuleTable) -> Result<&'static RuleTable> {
    let fingerprint = table.fingerprint.clone();
    GLOBAL_TABLE.set(table).map_err(|_| {
        UaError::ValidationError("A rule table is already installed".to_string())
    })?;

    tracing::debug!(fingerprint = %fingerprint, "installed custom rule table");
    GLOBAL_TABLE
        .get()
        .ok_or_else(|| UaError::ValidationError("Rule table was not installed".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleSpec;
    use crate::types::{browser, engine, UNKNOWN};

    #[test]
    fn test_init_is_idempotent() {
        let first = init().unwrap();
        let second = init().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(first, RuleTable::global()));
    }

    #[test]
    fn test_install_after_init_fails() {
        init().unwrap();
        let table = RuleTable::builtin().unwrap();
        assert!(matches!(install(table), Err(UaError::ValidationError(_))));
    }

    #[test]
    fn test_table_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleTable>();
    }

    #[test]
    fn test_browser_version_uses_lookup() {
        let table = RuleTable::builtin().unwrap();
        let ua = "AppleWebKit/537.75.14 Version/6.1.3 Safari/537.75.14";
        assert_eq!(table.browser_version(browser::SAFARI, ua), "6.1.3");
    }

    #[test]
    fn test_generic_version_ignores_lookup() {
        let table = RuleTable::builtin().unwrap();
        let ua = "Chrome/36.0.1985.143";
        assert_eq!(table.browser_version(browser::CHROME, ua), "36.0.1985.143");
        assert_eq!(table.generic_version(engine::CHROME, ua), "36.0.1985.143");
        assert_eq!(table.generic_version(UNKNOWN, ua), "");
    }

    #[test]
    fn test_generic_version_for_unlisted_category() {
        let table = RuleTable::builtin().unwrap();
        assert_eq!(table.generic_version("trident", "Trident/7.0; rv:11.0"), "7.0");
    }

    #[test]
    fn test_version_pattern_without_capture_rejected() {
        let mut spec = RuleTableSpec::builtin();
        spec.browser_versions
            .insert(browser::OPERA.to_string(), "opera".to_string());
        assert!(matches!(spec.compile(), Err(UaError::ValidationError(_))));
    }

    #[test]
    fn test_defective_rule_fails_compile() {
        let mut spec = RuleTableSpec::builtin();
        spec.oses.rules.insert(
            0,
            RuleSpec::expanding("broken", r"os (\d+)", "OS %s.%s"),
        );
        assert!(matches!(spec.compile(), Err(UaError::TemplateMismatch { .. })));
    }

    #[test]
    fn test_yaml_document() {
        let yaml = r#"
browsers:
  fallback: unknown
  rules:
    - category: curl
      pattern: curl
engines:
  fallback: unknown
oses:
  fallback: Unknown
  rules:
    - category: darwin
      pattern: 'darwin/(\d+)\.(\d+)'
      template: Darwin %s.%s
      expand: true
platforms:
  fallback: unknown
mobile_platforms: [android]
native_client_prefixes: [Remind]
"#;
        let table = RuleTableSpec::from_yaml(yaml).unwrap().compile().unwrap();
        assert_eq!(table.evaluate(Axis::Browser, "curl/8.4.0"), "curl");
        assert_eq!(table.browser_version("curl", "curl/8.4.0"), "8.4.0");
        assert_eq!(table.evaluate(Axis::Os, "CFNetwork Darwin/21.6.0"), "Darwin 21.6");
        assert!(table.is_native_client("Remind101/1236706 (iPhone8,1)"));
        assert!(!table.is_native_client("remind101"));
    }

    #[test]
    fn test_json_round_trip_preserves_fingerprint() {
        let spec = RuleTableSpec::builtin();
        let parsed = RuleTableSpec::from_json(&spec.to_json().unwrap()).unwrap();
        assert_eq!(parsed, spec);
        assert_eq!(
            parsed.compile().unwrap().fingerprint(),
            spec.compile().unwrap().fingerprint()
        );
    }

    #[test]
    fn test_expanded_category_and_version_agree() {
        let mut spec = RuleTableSpec::builtin();
        spec.browsers
            .rules
            .insert(0, RuleSpec::simple("kaios", "kaios"));
        spec.oses.rules.insert(
            0,
            RuleSpec::expanding("kaios", r"kaios/(\d+)\.(\d+)", "KaiOS %s.%s"),
        );
        let table = spec.compile().unwrap();

        let ua = "Mozilla/5.0 (Mobile; LYF/F300B; rv:48.0) Gecko/48.0 Firefox/48.0 KAIOS/2.5";
        assert_eq!(table.evaluate(Axis::Browser, ua), "kaios");
        assert_eq!(table.browser_version("kaios", ua), "2.5");
        assert_eq!(table.evaluate(Axis::Os, ua), "KaiOS 2.5");
    }

    #[test]
    fn test_rule_count() {
        assert_eq!(RuleTableSpec::builtin().rule_count(), 8 + 6 + 11 + 9);
    }
}
