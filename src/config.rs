use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub schema_version: u32,
    pub whisper_model: WhisperModelType,
    pub n_threads: i32,

    // Note generation
    pub ollama_url: String,
    pub llm_model: String,

    // Model path override
    pub model_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: 1,
            whisper_model: WhisperModelType::Large,
            n_threads: 4,
            ollama_url: "http://localhost:11434".to_string(),
            llm_model: "llama3.1:8b".to_string(),
            model_path: None,
        }
    }
}

impl Config {
    /// Load config from file, or create default
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .context("Failed to read config file")?;
            serde_json::from_str(&content)
                .context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .context("Failed to write config file")
    }

    /// Get the default config directory
    pub fn default_config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Failed to get home directory")?;
        Ok(home.join(".scribe-cli"))
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.json"))
    }

    /// Get the default models directory
    pub fn default_models_dir() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("models"))
    }

    /// Get the Whisper model file path
    pub fn get_model_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.model_path {
            Ok(path.clone())
        } else {
            let models_dir = Self::default_models_dir()?;
            Ok(models_dir.join(self.whisper_model.filename()))
        }
    }
}

/// Whisper model type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhisperModelType {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl Default for WhisperModelType {
    fn default() -> Self {
        Self::Large
    }
}

impl WhisperModelType {
    pub fn filename(&self) -> &'static str {
        match self {
            Self::Tiny => "ggml-tiny.bin",
            Self::Base => "ggml-base.bin",
            Self::Small => "ggml-small.bin",
            Self::Medium => "ggml-medium.bin",
            Self::Large => "ggml-large.bin",
        }
    }
}

impl std::str::FromStr for WhisperModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tiny" => Ok(Self::Tiny),
            "base" => Ok(Self::Base),
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(format!("Unknown model type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.schema_version, 1);
        assert_eq!(config.whisper_model, WhisperModelType::Large);
        assert_eq!(config.ollama_url, "http://localhost:11434");
        assert_eq!(config.llm_model, "llama3.1:8b");
    }

    #[test]
    fn test_model_filename() {
        assert_eq!(WhisperModelType::Large.filename(), "ggml-large.bin");
        assert_eq!(WhisperModelType::Tiny.filename(), "ggml-tiny.bin");
    }

    #[test]
    fn test_model_type_parse() {
        assert_eq!("large".parse::<WhisperModelType>().unwrap(), WhisperModelType::Large);
        assert_eq!("TINY".parse::<WhisperModelType>().unwrap(), WhisperModelType::Tiny);
        assert!("huge".parse::<WhisperModelType>().is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().expect("Failed to create tempdir");
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.llm_model = "mistral".to_string();
        config.save(&path).expect("Save failed");

        let loaded = Config::load(&path).expect("Load failed");
        assert_eq!(loaded.llm_model, "mistral");
        assert_eq!(loaded.whisper_model, WhisperModelType::Large);
    }

    #[test]
    fn test_missing_config_file_yields_default() {
        let config = Config::load(Path::new("/nonexistent/config.json")).expect("Load failed");
        assert_eq!(config.schema_version, 1);
    }

    #[test]
    fn test_explicit_model_path_wins() {
        let mut config = Config::default();
        config.model_path = Some(PathBuf::from("/models/custom.bin"));
        assert_eq!(
            config.get_model_path().unwrap(),
            PathBuf::from("/models/custom.bin")
        );
    }
}
