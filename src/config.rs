//! Editor configuration.

use directories::BaseDirs;
use std::path::PathBuf;

/// Configuration shared by every pack opened in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Asset namespace the blockstates, models and textures live under.
    pub namespace: String,
    /// Number of spaces used when pretty-printing JSON files.
    pub json_indent: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            namespace: "minecraft".to_string(),
            json_indent: 4,
        }
    }
}

impl EditorConfig {
    /// Use a different asset namespace (e.g. a mod id).
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    /// Use a different JSON indent width.
    pub fn with_json_indent(mut self, indent: usize) -> Self {
        self.json_indent = indent;
        self
    }

    pub(crate) fn indent_bytes(&self) -> Vec<u8> {
        vec![b' '; self.json_indent]
    }
}

/// The directory a pack picker should start in: the game's
/// `resourcepacks` folder for the current user.
pub fn default_resource_pack_dir() -> Option<PathBuf> {
    let dirs = BaseDirs::new()?;

    let game_dir = if cfg!(target_os = "windows") {
        dirs.data_dir().join(".minecraft")
    } else if cfg!(target_os = "macos") {
        dirs.data_dir().join("minecraft")
    } else {
        dirs.home_dir().join(".minecraft")
    };

    Some(game_dir.join("resourcepacks"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.namespace, "minecraft");
        assert_eq!(config.indent_bytes(), b"    ".to_vec());
    }

    #[test]
    fn test_builder() {
        let config = EditorConfig::default()
            .with_namespace("mymod")
            .with_json_indent(2);
        assert_eq!(config.namespace, "mymod");
        assert_eq!(config.indent_bytes(), b"  ".to_vec());
    }

    #[test]
    fn test_default_dir_ends_in_resourcepacks() {
        if let Some(dir) = default_resource_pack_dir() {
            assert!(dir.ends_with("resourcepacks"));
        }
    }
}
