// Configuration for the terminal client
//
// Configuration is loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/postdesk/config.toml)
// 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default base URL of the posts/comments API
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

/// Log file rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl LogRotation {
    fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Write JSON logs to rotating files (in addition to the in-TUI buffer)
    pub file_enabled: bool,

    /// Directory for log files
    pub file_dir: PathBuf,

    /// Log file name prefix
    pub file_prefix: String,

    /// Rotation policy for log files
    pub file_rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_prefix: "postdesk".to_string(),
            file_rotation: LogRotation::Daily,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the posts/comments API
    pub api_url: String,

    /// Only show posts by this user (None = all posts)
    pub user_id: Option<u64>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Theme name: "auto", "dracula", "nord"
    pub theme: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
    file_prefix: Option<String>,
    file_rotation: Option<String>,
}

/// Config file structure (everything optional; defaults fill the gaps)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    api_url: Option<String>,
    user_id: Option<u64>,
    timeout_secs: Option<u64>,
    theme: Option<String>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/postdesk/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("postdesk").join("config.toml"))
    }

    /// Create config template if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Create parent directory
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        let template = r#"# postdesk configuration
# Uncomment and modify options as needed

# Base URL of the posts/comments API
# api_url = "https://jsonplaceholder.typicode.com"

# Only show posts by this user id
# user_id = 1

# Request timeout in seconds (default: 15)
# timeout_secs = 15

# Theme: auto, dracula, nord (default: auto = terminal's ANSI palette)
# theme = "auto"

# Logging configuration (RUST_LOG env var overrides the level)
# [logging]
# level = "info"          # trace, debug, info, warn, error
# file_enabled = false    # also write JSON logs to rotating files
# file_dir = "./logs"
# file_prefix = "postdesk"
# file_rotation = "daily" # hourly, daily, never
"#;

        // Write template (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                FileConfig::default()
            }),
            Err(_) => FileConfig::default(), // File doesn't exist, use defaults
        }
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        let rotation = match self.logging.file_rotation {
            LogRotation::Hourly => "hourly",
            LogRotation::Daily => "daily",
            LogRotation::Never => "never",
        };
        let user_line = match self.user_id {
            Some(id) => format!("user_id = {}", id),
            None => "# user_id = 1".to_string(),
        };

        format!(
            r#"# postdesk configuration

# Base URL of the posts/comments API
api_url = "{api_url}"

# Only show posts by this user id
{user_line}

# Request timeout in seconds
timeout_secs = {timeout}

# Theme: auto, dracula, nord
theme = "{theme}"

# Logging configuration (RUST_LOG env var overrides the level)
[logging]
level = "{level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_prefix = "{file_prefix}"
file_rotation = "{rotation}"
"#,
            api_url = self.api_url,
            user_line = user_line,
            timeout = self.timeout_secs,
            theme = self.theme,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_prefix = self.logging.file_prefix,
            rotation = rotation,
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // API URL: env > file > default
        let api_url = std::env::var("POSTDESK_API_URL")
            .ok()
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        // User filter: env > file > none
        let user_id = std::env::var("POSTDESK_USER")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.user_id);

        // Timeout: env > file > default
        let timeout_secs = std::env::var("POSTDESK_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.timeout_secs)
            .unwrap_or(15);

        // Theme: env > file > default
        let theme = std::env::var("POSTDESK_THEME")
            .ok()
            .or(file.theme)
            .unwrap_or_else(|| "auto".to_string());

        // Logging settings: file config only (RUST_LOG env var handled in main.rs)
        let file_logging = file.logging.unwrap_or_default();
        let defaults = LoggingConfig::default();
        let logging = LoggingConfig {
            level: file_logging.level.unwrap_or(defaults.level),
            file_enabled: file_logging.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file_logging
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_prefix: file_logging.file_prefix.unwrap_or(defaults.file_prefix),
            file_rotation: file_logging
                .file_rotation
                .as_deref()
                .map(LogRotation::parse)
                .unwrap_or(defaults.file_rotation),
        };

        Self {
            api_url,
            user_id,
            timeout_secs,
            theme,
            logging,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_id: None,
            timeout_secs: 15,
            theme: "auto".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_config_parses_partial_toml() {
        let toml = r#"
            api_url = "http://localhost:3000"

            [logging]
            level = "debug"
            file_rotation = "hourly"
        "#;

        let file: FileConfig = toml::from_str(toml).unwrap();
        assert_eq!(file.api_url.as_deref(), Some("http://localhost:3000"));
        assert!(file.user_id.is_none());

        let logging = file.logging.unwrap();
        assert_eq!(logging.level.as_deref(), Some("debug"));
        assert_eq!(
            logging.file_rotation.as_deref().map(LogRotation::parse),
            Some(LogRotation::Hourly)
        );
    }

    #[test]
    fn test_rotation_parse_falls_back_to_daily() {
        assert_eq!(LogRotation::parse("hourly"), LogRotation::Hourly);
        assert_eq!(LogRotation::parse("NEVER"), LogRotation::Never);
        assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    }

    #[test]
    fn test_to_toml_round_trips_through_file_config() {
        let config = Config {
            user_id: Some(7),
            theme: "nord".to_string(),
            ..Config::default()
        };

        let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
        assert_eq!(parsed.api_url.as_deref(), Some(DEFAULT_API_URL));
        assert_eq!(parsed.user_id, Some(7));
        assert_eq!(parsed.theme.as_deref(), Some("nord"));
        assert_eq!(parsed.logging.unwrap().level.as_deref(), Some("info"));
    }
}
