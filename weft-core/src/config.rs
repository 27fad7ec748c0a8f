//! Generator configuration.
//!
//! Configuration is built in code through the `with_*` setters or loaded
//! from a TOML file. Every setting has a default, so an empty file is valid.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Settings shared by every phase of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeneratorConfig {
    runtime_namespace: String,
    visual_roots: Vec<String>,
    theme_value_types: Vec<String>,
    max_base_depth: usize,
    tick_interval_ms: u64,
    extra_imports: Vec<String>,
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            runtime_namespace: "Weft.Runtime".to_string(),
            visual_roots: vec![
                "UIElement".to_string(),
                "FrameworkElement".to_string(),
                "Control".to_string(),
            ],
            theme_value_types: Vec::new(),
            max_base_depth: 64,
            tick_interval_ms: 16,
            extra_imports: Vec::new(),
        }
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    /// Returns `ConfigError` if the text is not valid TOML or a setting is invalid.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks that every setting is usable.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runtime_namespace.trim().is_empty() {
            return Err(ConfigError::invalid(
                "runtime-namespace",
                "must not be empty",
            ));
        }
        if self.max_base_depth == 0 {
            return Err(ConfigError::invalid(
                "max-base-depth",
                "must be at least 1",
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "tick-interval-ms",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Sets the namespace of the runtime support types referenced by generated code.
    #[must_use]
    pub fn with_runtime_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.runtime_namespace = namespace.into();
        self
    }

    /// Sets the toolkit base types that make a declaration view-bound.
    #[must_use]
    pub fn with_visual_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visual_roots = roots.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the member types that implement the theme-value capability.
    #[must_use]
    pub fn with_theme_value_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.theme_value_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the maximum number of base types walked during classification.
    #[must_use]
    pub fn with_max_base_depth(mut self, depth: usize) -> Self {
        self.max_base_depth = depth;
        self
    }

    /// Sets the default periodic update interval.
    #[must_use]
    pub fn with_tick_interval_ms(mut self, interval: u64) -> Self {
        self.tick_interval_ms = interval;
        self
    }

    /// Adds an import emitted at the top of every compilation unit.
    #[must_use]
    pub fn with_extra_import(mut self, import: impl Into<String>) -> Self {
        self.extra_imports.push(import.into());
        self
    }

    /// Namespace of the runtime support types.
    #[must_use]
    pub fn runtime_namespace(&self) -> &str {
        &self.runtime_namespace
    }

    /// Toolkit base types that make a declaration view-bound.
    #[must_use]
    pub fn visual_roots(&self) -> &[String] {
        &self.visual_roots
    }

    /// Returns true if `type_name` is a toolkit visual root.
    #[must_use]
    pub fn is_visual_root(&self, type_name: &str) -> bool {
        let simple = type_name.rsplit('.').next().unwrap_or(type_name);
        self.visual_roots.iter().any(|root| root == type_name || root == simple)
    }

    /// Returns true if `type_name` implements the theme-value capability.
    #[must_use]
    pub fn is_theme_value_type(&self, type_name: &str) -> bool {
        self.theme_value_types.iter().any(|t| t == type_name)
    }

    /// Maximum number of base types walked during classification.
    #[must_use]
    pub const fn max_base_depth(&self) -> usize {
        self.max_base_depth
    }

    /// Default periodic update interval in milliseconds.
    #[must_use]
    pub const fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    /// Additional imports emitted in every compilation unit.
    #[must_use]
    pub fn extra_imports(&self) -> &[String] {
        &self.extra_imports
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.runtime_namespace(), "Weft.Runtime");
        assert_eq!(config.max_base_depth(), 64);
        assert_eq!(config.tick_interval_ms(), 16);
        assert!(config.is_visual_root("FrameworkElement"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_setters() {
        let config = GeneratorConfig::new()
            .with_runtime_namespace("My.Runtime")
            .with_visual_roots(["Widget"])
            .with_theme_value_types(["ThemeBrush"])
            .with_max_base_depth(8)
            .with_tick_interval_ms(33)
            .with_extra_import("System.Linq");

        assert_eq!(config.runtime_namespace(), "My.Runtime");
        assert!(config.is_visual_root("Widget"));
        assert!(config.is_visual_root("Toolkit.Widget"));
        assert!(!config.is_visual_root("FrameworkElement"));
        assert!(config.is_theme_value_type("ThemeBrush"));
        assert_eq!(config.max_base_depth(), 8);
        assert_eq!(config.tick_interval_ms(), 33);
        assert_eq!(config.extra_imports(), ["System.Linq".to_string()]);
    }

    #[test]
    fn test_config_from_toml() {
        let config = GeneratorConfig::from_toml_str(
            r#"
runtime-namespace = "Acme.Ui"
visual-roots = ["Visual"]
max-base-depth = 4
"#,
        )
        .expect("Failed to parse config");

        assert_eq!(config.runtime_namespace(), "Acme.Ui");
        assert!(config.is_visual_root("Visual"));
        assert_eq!(config.max_base_depth(), 4);
        assert_eq!(config.tick_interval_ms(), 16);
    }

    #[test]
    fn test_config_empty_toml_is_default() {
        let config = GeneratorConfig::from_toml_str("").expect("Failed to parse config");
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_config_rejects_zero_depth() {
        let result = GeneratorConfig::from_toml_str("max-base-depth = 0");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_config_rejects_malformed_toml() {
        let result = GeneratorConfig::from_toml_str("max-base-depth = ");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_config_load_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "tick-interval-ms = 100").expect("Failed to write config");

        let config = GeneratorConfig::load(file.path()).expect("Failed to load config");
        assert_eq!(config.tick_interval_ms(), 100);
    }
}
