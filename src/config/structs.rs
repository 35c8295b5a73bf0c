use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "shortkeep.toml";

/// Environment prefix, e.g. `SK__SHORTENER__ACCESS_TOKEN=...`
pub const ENV_PREFIX: &str = "SK";

/// Plain env fallback for the Bitly access token
pub const BITLY_TOKEN_ENV: &str = "BITLY_ACCESS_TOKEN";

/// 应用配置（从 TOML 加载，环境变量覆盖）
///
/// - storage: 本地存储目录与键名
/// - shortener: 短链服务地址与凭据
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub shortener: ShortenerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Device-local storage settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding one `<key>.json` file per storage key
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Key under which the link collection is stored
    #[serde(default = "default_storage_key")]
    pub key: String,
}

/// Shortening service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShortenerConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default)]
    pub group_guid: String,
    /// Bearer token; never commit a real one to the config file
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_storage_key() -> String {
    "shortenedLinks".to_string()
}

fn default_api_url() -> String {
    "https://api-ssl.bitly.com/v4/shorten".to_string()
}

fn default_domain() -> String {
    "bit.ly".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            key: default_storage_key(),
        }
    }
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            domain: default_domain(),
            group_guid: String::new(),
            access_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl AppConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML > 默认值
    /// Errors are reported on stderr because logging is not up yet.
    pub fn load(path: Option<&str>) -> Self {
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let env = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true);

        match Self::load_with_env(path, env) {
            Ok(mut config) => {
                if std::path::Path::new(path).exists() {
                    eprintln!("[INFO] Configuration loaded from: {}", path);
                }
                config.apply_token_fallback(std::env::var(BITLY_TOKEN_ENV).ok());
                config
            }
            Err(e) => {
                eprintln!("[ERROR] Failed to load config: {}", e);
                Self::default()
            }
        }
    }

    /// Build from an optional TOML file plus the given environment source
    pub fn load_with_env(path: &str, env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(env)
            .build()?
            .try_deserialize::<AppConfig>()
    }

    fn apply_token_fallback(&mut self, token: Option<String>) {
        if self.shortener.access_token.is_empty()
            && let Some(token) = token.filter(|t| !t.trim().is_empty())
        {
            self.shortener.access_token = token.trim().to_string();
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
