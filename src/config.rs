//! Configuration loading from file, environment, and CLI arguments.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::RelationPolicy;
use crate::types::{GraphError, GraphResult, Relation};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "KIN_CONFIG";

/// Config file picked up from the working directory.
pub const LOCAL_CONFIG: &str = "kin.toml";

/// Configuration for the `kin` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KinConfig {
    /// Log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Output format: "text" or "json".
    #[serde(default = "default_format")]
    pub format: String,
    /// Interactive shell history file.
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,
    /// Extra mirror rules on top of the built-in ones.
    #[serde(default)]
    pub relations: RelationsConfig,
}

/// `[relations]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationsConfig {
    /// Labels mirrored with themselves, e.g. `hasSibling`.
    #[serde(default)]
    pub symmetric: Vec<String>,
    /// Label pairs mirrored with each other, e.g. `["hasBoss", "hasReport"]`.
    #[serde(default)]
    pub inverse: Vec<(String, String)>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_history_file() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".kin_history")
}

impl Default for KinConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: default_format(),
            history_file: default_history_file(),
            relations: RelationsConfig::default(),
        }
    }
}

impl KinConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> GraphResult<Self> {
        toml::from_str(content)
            .map_err(|e| GraphError::Config(format!("Failed to parse config: {e}")))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> GraphResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GraphError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Resolve and load configuration using priority order:
    /// 1. Explicit path (CLI arg)
    /// 2. KIN_CONFIG environment variable
    /// 3. kin.toml in current directory
    /// 4. Built-in defaults
    pub fn resolve(explicit: Option<&Path>) -> GraphResult<Self> {
        match resolve_config_path(explicit) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// The built-in mirror policy extended with the `[relations]` table.
    pub fn relation_policy(&self) -> RelationPolicy {
        let mut policy = RelationPolicy::default();
        for label in &self.relations.symmetric {
            policy = policy.with_symmetric(Relation::from_name(label));
        }
        for (a, b) in &self.relations.inverse {
            policy = policy.with_inverse(Relation::from_name(a), Relation::from_name(b));
        }
        policy
    }

    /// Whether JSON is the configured output format.
    pub fn json_output(&self) -> bool {
        self.format == "json"
    }
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }
    let local = PathBuf::from(LOCAL_CONFIG);
    local.exists().then_some(local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = KinConfig::from_toml("").unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.format, "text");
        assert!(config.relations.symmetric.is_empty());
    }

    #[test]
    fn relations_table_extends_policy() {
        let config = KinConfig::from_toml(
            r#"
format = "json"

[relations]
symmetric = ["hasSibling"]
inverse = [["hasBoss", "hasReport"]]
"#,
        )
        .unwrap();
        assert!(config.json_output());
        let policy = config.relation_policy();
        let sibling = Relation::from_name("hasSibling");
        assert_eq!(policy.mirror_of(&sibling), Some(&sibling));
        assert_eq!(
            policy.mirror_of(&Relation::from_name("hasReport")),
            Some(&Relation::from_name("hasBoss"))
        );
        assert_eq!(policy.mirror_of(&Relation::Parent), Some(&Relation::Child));
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let err = KinConfig::from_toml("format = [").unwrap_err();
        assert!(matches!(err, GraphError::Config(_)));
    }

    #[test]
    fn explicit_path_wins() {
        let path = Path::new("/nonexistent/kin.toml");
        assert_eq!(resolve_config_path(Some(path)), Some(path.to_path_buf()));
        assert!(matches!(
            KinConfig::resolve(Some(path)),
            Err(GraphError::Config(_))
        ));
    }
}
