use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use clap::Parser;
use thiserror::Error;
use tracing::{info, warn};

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Port the server listens on unless configured otherwise
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration for the Coinmill server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Address to bind the HTTP server to
    pub host: IpAddr,
    /// Port to bind the HTTP server to
    pub port: u16,
    /// Directory for JSON log files; file logging is off when unset
    pub log_dir: Option<PathBuf>,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub host: Option<IpAddr>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// Server URL used by `coinmill-cli`; ignored by the server
    #[serde(default)]
    pub server_url: Option<String>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Command line arguments for the server
#[derive(Parser, Debug, Default)]
#[clap(name = "coinmill", about = "Restraint upgrades and passive income for an idle game")]
pub struct CliArgs {
    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address to listen on
    #[clap(long, env = "COINMILL_HOST")]
    pub host: Option<IpAddr>,

    /// Port to listen on
    #[clap(long, env = "COINMILL_PORT")]
    pub port: Option<u16>,

    /// Directory for JSON log files
    #[clap(long, env = "COINMILL_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Debug mode
    #[clap(long, env = "COINMILL_DEBUG", default_value_t = false)]
    pub debug: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            host: update.host.unwrap_or(self.host),
            port: update.port.unwrap_or(self.port),
            log_dir: update.log_dir.or(self.log_dir),
        }
    }

    /// The socket address the server binds to
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Returns the base (default) configuration
///
/// With a config directory, the database file lives next to the config file;
/// otherwise it is created in the working directory.
pub fn base_config(config_dir: Option<PathBuf>) -> Config {
    let database_url = config_dir.map_or("coinmill.db".to_string(), |path| {
        path.join("coinmill.db").to_string_lossy().to_string()
    });

    Config {
        database_url,
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: DEFAULT_PORT,
        log_dir: None,
    }
}

/// Returns the platform config directory for Coinmill, if it can be determined
pub fn get_config_dir_path() -> Option<PathBuf> {
    match ProjectDirs::from("com", "coinmill", "coinmill") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().to_path_buf()),
        None => {
            warn!("Could not determine XDG config directory, skipping config file");
            None
        }
    }
}

/// Loads configuration from a TOML file
///
/// A missing path or a file that does not exist yields an empty update.
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, ConfigError> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    let content = fs::read_to_string(&config_path).inspect_err(|e| {
        warn!("Failed to read config file: {}", e);
    })?;

    let update = toml::from_str::<ConfigUpdate>(&content).inspect_err(|e| {
        warn!("Failed to parse config file: {}", e);
    })?;

    info!("Loaded configuration from {:?}", config_path);

    Ok(update)
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: &CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url.clone(),
        host: args.host,
        port: args.port,
        log_dir: args.log_dir.clone(),
        server_url: None,
    }
}

/// Gets the complete configuration by combining defaults with
/// values from config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: &CliArgs) -> Config {
    let config_dir = get_config_dir_path().and_then(|path| {
        if path.exists() {
            Some(path)
        } else {
            info!("Config path not found at {:?}, using defaults", path);
            None
        }
    });

    let base = base_config(config_dir.clone());
    let file_update = config_from_file(config_dir.map(|dir| dir.join(CONFIG_FILE_NAME)))
        .unwrap_or_default();

    // Apply updates in order of increasing precedence
    let config = base
        .apply_update(file_update)
        .apply_update(config_from_args(args));

    info!(
        "Final configuration: database_url={}, listen={}, log_dir={:?}",
        config.database_url,
        config.listen_addr(),
        config.log_dir
    );

    config
}
