use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenAI-compatible API settings
    pub openai: OpenAiConfig,

    /// Application settings
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key (falls back to OPENAI_API_KEY)
    pub api_key: Option<String>,

    /// API base URL
    pub api_base: String,

    /// Chat model used for summarization
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Preferred transcript languages, in priority order
    pub default_languages: Vec<String>,

    /// Default output format
    pub default_output_format: String,

    /// Maximum concurrent videos in batch mode
    pub max_concurrent_jobs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai: OpenAiConfig {
                api_key: None,
                api_base: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o".to_string(),
            },
            app: AppConfig {
                default_languages: vec!["en".to_string()],
                default_output_format: "text".to_string(),
                max_concurrent_jobs: 3,
            },
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content =
                fs_err::read_to_string(&config_path).context("Failed to read config file")?;

            let config: Config =
                serde_yaml::from_str(&content).context("Failed to parse config file")?;

            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save().await?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        fs_err::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    fn config_path() -> Result<PathBuf> {
        // A local config.yaml takes precedence for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("yt-summarizer").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.openai.api_base.is_empty() {
            anyhow::bail!("API base URL must not be empty");
        }

        if self.app.max_concurrent_jobs == 0 {
            anyhow::bail!("max_concurrent_jobs must be at least 1");
        }

        Ok(())
    }

    /// Interactive configuration setup
    pub async fn interactive_setup(&self) -> Result<()> {
        println!("Interactive configuration setup coming soon!");
        println!("For now, please edit the config file manually:");
        println!("  {}", Self::config_path()?.display());
        Ok(())
    }

    /// API key from the config file or the environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.openai
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }

    /// API base URL, with the OPENAI_API_BASE environment override.
    pub fn resolved_api_base(&self) -> String {
        std::env::var("OPENAI_API_BASE").unwrap_or_else(|_| self.openai.api_base.clone())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Model: {}", self.openai.model);
        println!("  API Base: {}", self.resolved_api_base());
        println!(
            "  API Key: {}",
            if self.resolved_api_key().is_some() {
                "Set"
            } else {
                "Not set"
            }
        );
        println!(
            "  Default Languages: {}",
            self.app.default_languages.join(", ")
        );
        println!("  Default Format: {}", self.app.default_output_format);
        println!("  Max Concurrent Jobs: {}", self.app.max_concurrent_jobs);
    }
}
