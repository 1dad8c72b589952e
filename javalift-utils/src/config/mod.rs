//! Configuration loading
//!
//! Configuration files may be TOML, JSON or YAML; the format is picked from
//! the file extension. Values loaded from a file are merged over the
//! defaults of the target type.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Load configuration from file (format chosen by extension)
pub fn load_config<T>(path: &Path) -> crate::Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let content = std::fs::read_to_string(path)?;

    match extension.as_str() {
        "toml" => toml::from_str(&content)
            .map_err(|e| crate::UtilError::Config(format!("TOML parse error: {e}"))),
        "json" => serde_json::from_str(&content)
            .map_err(|e| crate::UtilError::Config(format!("JSON parse error: {e}"))),
        "yml" | "yaml" => serde_yaml::from_str(&content)
            .map_err(|e| crate::UtilError::Config(format!("YAML parse error: {e}"))),
        _ => Err(crate::UtilError::Config(format!(
            "Unsupported config format: {extension}"
        ))),
    }
}

/// Merge two configurations (second overrides first)
pub fn merge_configs<T>(base: &mut T, override_config: T) -> crate::Result<()>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    let mut base_value = serde_json::to_value(&*base)
        .map_err(|e| crate::UtilError::Serialization(format!("Base serialization error: {e}")))?;

    let override_value = serde_json::to_value(override_config).map_err(|e| {
        crate::UtilError::Serialization(format!("Override serialization error: {e}"))
    })?;

    merge_json_values(&mut base_value, override_value);

    *base = serde_json::from_value(base_value).map_err(|e| {
        crate::UtilError::Serialization(format!("Result deserialization error: {e}"))
    })?;

    Ok(())
}

fn merge_json_values(base: &mut serde_json::Value, override_value: serde_json::Value) {
    match (base, override_value) {
        (serde_json::Value::Object(base_obj), serde_json::Value::Object(override_obj)) => {
            for (key, value) in override_obj {
                match base_obj.get_mut(&key) {
                    Some(existing) => merge_json_values(existing, value),
                    None => {
                        base_obj.insert(key, value);
                    }
                }
            }
        }
        (base_value, override_value) => {
            *base_value = override_value;
        }
    }
}

/// Configuration builder for fluent API
#[derive(Debug)]
pub struct ConfigBuilder<T> {
    config: T,
}

impl<T> ConfigBuilder<T>
where
    T: Default + Serialize + for<'de> Deserialize<'de>,
{
    /// Create new config builder with defaults
    pub fn new() -> Self {
        Self {
            config: T::default(),
        }
    }

    /// Load from file and merge
    pub fn load_file(mut self, path: &Path) -> crate::Result<Self> {
        let file_config: T = load_config(path)?;
        merge_configs(&mut self.config, file_config)?;
        Ok(self)
    }

    /// Apply an in-place adjustment (command-line overrides)
    #[must_use]
    pub fn with(mut self, adjust: impl FnOnce(&mut T)) -> Self {
        adjust(&mut self.config);
        self
    }

    pub fn build(self) -> T {
        self.config
    }
}

impl<T> Default for ConfigBuilder<T>
where
    T: Default + Serialize + for<'de> Deserialize<'de>,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    struct TestConfig {
        name: String,
        limit: u64,
        enabled: bool,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                name: "default".to_string(),
                limit: 10,
                enabled: true,
            }
        }
    }

    #[test]
    fn test_load_toml_config() -> crate::Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("javalift.toml");
        std::fs::write(&config_path, "name = \"test\"\nlimit = 9000\n")?;

        let config: TestConfig = load_config(&config_path)?;
        assert_eq!(config.name, "test");
        assert_eq!(config.limit, 9000);
        assert!(config.enabled);
        Ok(())
    }

    #[test]
    fn test_load_yaml_and_json_config() -> crate::Result<()> {
        let temp_dir = tempdir()?;
        let yaml_path = temp_dir.path().join("javalift.yaml");
        std::fs::write(&yaml_path, "enabled: false\n")?;
        let json_path = temp_dir.path().join("javalift.json");
        std::fs::write(&json_path, r#"{"limit": 3}"#)?;

        let yaml: TestConfig = load_config(&yaml_path)?;
        let json: TestConfig = load_config(&json_path)?;
        assert!(!yaml.enabled);
        assert_eq!(json.limit, 3);
        Ok(())
    }

    #[test]
    fn test_unsupported_format() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("javalift.ini");
        std::fs::write(&path, "limit=1").unwrap();
        let result: crate::Result<TestConfig> = load_config(&path);
        assert!(matches!(result, Err(crate::UtilError::Config(_))));
    }

    #[test]
    fn test_builder_merges_file_and_overrides() -> crate::Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("javalift.toml");
        std::fs::write(&config_path, "limit = 42\n")?;

        let config = ConfigBuilder::<TestConfig>::new()
            .load_file(&config_path)?
            .with(|c| c.name = "cli".to_string())
            .build();

        assert_eq!(
            config,
            TestConfig {
                name: "cli".to_string(),
                limit: 42,
                enabled: true,
            }
        );
        Ok(())
    }
}
