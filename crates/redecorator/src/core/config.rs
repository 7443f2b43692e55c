//! # Decorator Configuration
//!
//! Everything the engine needs to know before it touches the filesystem:
//! where the packs live, how alias files are named, which image files to
//! pick up and how the resolver treats nodes it cannot locate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use crate::config::{Config, ConfigError};

/// Default name of the per-pack alias declaration file
pub const DEFAULT_ALIAS_FILE: &str = "aliases.txt";

/// What the resolver does when a named texture set node has no matching
/// child under the current target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedNodePolicy {
    /// Skip the node and every node below it.
    #[default]
    SkipBranch,
    /// Skip the node's own textures but keep resolving its children under
    /// the parent target.
    SearchParent,
}

/// # Decorator Configuration
///
/// Loaded from TOML or RON through [`Config`]. Missing fields take their
/// defaults, so a file only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoratorConfig {
    /// Root directory holding one sub-directory per texture pack
    pub textures_root: PathBuf,
    /// File name of the optional alias declarations inside each pack
    pub alias_file_name: String,
    /// Image file extensions to load, compared case-insensitively
    pub image_extensions: Vec<String>,
    /// Resolver behaviour for texture set nodes with no matching child
    pub unresolved_node_policy: UnresolvedNodePolicy,
    /// Fixed seed for the pack shuffle; entropy-seeded when absent
    pub shuffle_seed: Option<u64>,
    /// Log level used by [`crate::foundation::logging::init_with_level`]
    pub log_level: String,
}

impl DecoratorConfig {
    /// Create a configuration reading packs from `textures_root`
    pub fn new(textures_root: impl Into<PathBuf>) -> Self {
        Self {
            textures_root: textures_root.into(),
            ..Self::default()
        }
    }

    /// Set the alias file name
    pub fn with_alias_file_name(mut self, name: impl Into<String>) -> Self {
        self.alias_file_name = name.into();
        self
    }

    /// Replace the accepted image extensions
    pub fn with_image_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.image_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the unresolved node policy
    pub const fn with_unresolved_node_policy(mut self, policy: UnresolvedNodePolicy) -> Self {
        self.unresolved_node_policy = policy;
        self
    }

    /// Fix the shuffle seed
    pub const fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Whether `extension` is one of the accepted image extensions
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.image_extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(extension))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alias_file_name.trim().is_empty() {
            return Err(ConfigError::Invalid("alias file name cannot be empty".to_string()));
        }

        if self.image_extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one image extension is required".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for DecoratorConfig {
    fn default() -> Self {
        Self {
            textures_root: PathBuf::from("Textures"),
            alias_file_name: DEFAULT_ALIAS_FILE.to_string(),
            image_extensions: vec!["png".to_string()],
            unresolved_node_policy: UnresolvedNodePolicy::default(),
            shuffle_seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config for DecoratorConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DecoratorConfig::default();
        assert_eq!(config.textures_root, PathBuf::from("Textures"));
        assert_eq!(config.alias_file_name, "aliases.txt");
        assert!(config.accepts_extension("PNG"));
        assert!(!config.accepts_extension("jpg"));
        assert_eq!(config.unresolved_node_policy, UnresolvedNodePolicy::SkipBranch);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decorator.toml");
        std::fs::write(
            &path,
            "textures_root = \"mods/Textures\"\nunresolved_node_policy = \"search_parent\"\nshuffle_seed = 42\n",
        )
        .unwrap();

        let config = DecoratorConfig::load_from_file(&path).unwrap();
        assert_eq!(config.textures_root, PathBuf::from("mods/Textures"));
        assert_eq!(config.unresolved_node_policy, UnresolvedNodePolicy::SearchParent);
        assert_eq!(config.shuffle_seed, Some(42));
        assert_eq!(config.alias_file_name, DEFAULT_ALIAS_FILE);
    }

    #[test]
    fn test_saved_ron_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decorator.ron");
        let config = DecoratorConfig::new("packs")
            .with_image_extensions(["png", "jpg"])
            .with_shuffle_seed(9);

        config.save_to_file(&path).unwrap();
        assert_eq!(DecoratorConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_validation_rejects_empty_values() {
        let no_alias = DecoratorConfig::default().with_alias_file_name("  ");
        assert!(matches!(no_alias.validate(), Err(ConfigError::Invalid(_))));

        let no_ext = DecoratorConfig::default().with_image_extensions(Vec::<String>::new());
        assert!(matches!(no_ext.validate(), Err(ConfigError::Invalid(_))));
    }
}
