use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_DIR: &str = "logbook";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub forward: ForwardConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TelegramConfig {
    #[serde(default = "TelegramConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub token: String,
    /// Chat ids allowed to use the bot; empty allows everyone.
    #[serde(default)]
    pub allow_from: Vec<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            token: String::new(),
            allow_from: Vec::new(),
        }
    }
}

impl TelegramConfig {
    const fn default_enabled() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExportConfig {
    /// Directory export files are written to.
    #[serde(default = "ExportConfig::default_dir")]
    pub dir: PathBuf,
    /// Skip messages whose content was already collected.
    #[serde(default)]
    pub dedupe: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            dedupe: false,
        }
    }
}

impl ExportConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from(".")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ForwardConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Records are posted to `<base_url>/<entry_type>`.
    #[serde(default = "ForwardConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ForwardConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "ForwardConfig::default_retry_delays")]
    pub retry_delays: Vec<u64>,
    #[serde(default = "ForwardConfig::default_final_retries")]
    pub final_retries: usize,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
            retry_delays: Self::default_retry_delays(),
            final_retries: Self::default_final_retries(),
        }
    }
}

impl ForwardConfig {
    fn default_base_url() -> String {
        "https://example.com/collector".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        15
    }

    fn default_retry_delays() -> Vec<u64> {
        vec![2, 4, 6]
    }

    const fn default_final_retries() -> usize {
        2
    }
}

impl Config {
    fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR))
    }

    /// Location of the default config file, `~/logbook/config.json`.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::default_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'logbook init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        debug!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Like [`Config::load`], but falls back to defaults when no file exists.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::default_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            debug!("No config at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join(CONFIG_FILE);

        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Add your Telegram bot token under \"telegram.token\"");
        println!("   2. Point \"forward.base_url\" at your collector and enable it");
        println!("   3. Run 'logbook telegram' to start collecting");
        println!();
        println!("🔧 Configuration options:");
        println!("   - export.dir: where thread_<id>_export.json files are written");
        println!("   - export.dedupe: skip repeated messages within a thread");
        println!("   - forward.retry_delays: seconds to wait between delivery attempts");
        println!();
        Ok(())
    }

    /// Write the config template to `path`, refusing to overwrite a file.
    pub fn write_template(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }

        let config_template = r#"{
  "telegram": {
    "enabled": true,
    "token": "your-telegram-bot-token-here",
    "allow_from": []
  },
  "export": {
    "dir": ".",
    "dedupe": false
  },
  "forward": {
    "enabled": false,
    "base_url": "https://example.com/collector",
    "timeout_secs": 15,
    "retry_delays": [2, 4, 6],
    "final_retries": 2
  }
}"#;

        std::fs::write(path, config_template)?;
        Ok(())
    }
}
