use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::parsing::{Classifier, ClassifierOptions, DefaultListPolicy};
use crate::document::LoadOptions;

/// Configuration for lawdoc
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierSettings,
    pub extractor: ExtractorSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Style classes that mark a paragraph as a list item
    pub list_item_hints: Vec<String>,
    /// Style classes that mark a paragraph as a heading
    pub heading_hints: Vec<String>,
    /// Link-bearing blocks need a citation to become references
    pub strict_links: bool,
    /// A block after one ending in ':' starts an unordered list
    pub colon_starts_list: bool,
    /// Lettered items nest under the preceding numbered item
    pub nest_lettered_lists: bool,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        let policy = DefaultListPolicy::default();
        let options = ClassifierOptions::default();
        Self {
            list_item_hints: policy.list_item_hints,
            heading_hints: options.heading_hints,
            strict_links: options.strict_links,
            colon_starts_list: policy.colon_starts_list,
            nest_lettered_lists: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractorSettings {
    /// Id of the element holding the statute text
    pub content_root_id: String,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            content_root_id: LoadOptions::default().content_root_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSettings {
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Config {
    /// Load config from the config directory, falling back to defaults
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::get_config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        Ok(Config::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the config directory, returning where it went
    pub fn save(&self) -> Result<Option<PathBuf>> {
        let Some(config_path) = Self::get_config_path() else {
            return Ok(None);
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;

        Ok(Some(config_path))
    }

    /// Get the path to the config file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lawdoc").join("config.toml"))
    }

    /// Initialize default config file
    pub fn init_default() -> Result<Option<PathBuf>> {
        Config::default().save()
    }

    pub fn classifier(&self) -> Classifier {
        let settings = &self.classifier;
        Classifier::new(
            ClassifierOptions {
                heading_hints: settings.heading_hints.clone(),
                strict_links: settings.strict_links,
            },
            DefaultListPolicy {
                list_item_hints: settings.list_item_hints.clone(),
                colon_starts_list: settings.colon_starts_list,
            },
        )
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            content_root_id: self.extractor.content_root_id.clone(),
            nest_lettered_lists: self.classifier.nest_lettered_lists,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [classifier]
            strict_links = true
            "#,
        )
        .unwrap();

        assert!(config.classifier.strict_links);
        assert_eq!(config.classifier.list_item_hints, vec!["rvps2"]);
        assert_eq!(config.extractor.content_root_id, "article");
        assert!(config.output.pretty);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.classifier.nest_lettered_lists = true;
        config.extractor.content_root_id = "text".to_string();

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
        assert!(parsed.load_options().nest_lettered_lists);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[extractor]\ncontent_root_id = \"body\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.load_options().content_root_id, "body");

        fs::write(&path, "[extractor\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
