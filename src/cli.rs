//! Command-line and environment overrides.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{finalize, load_config};
use crate::config::{ConfigError, EchoConfig, LogFormat};

#[derive(Debug, Default, Parser)]
#[command(name = "request-echo")]
#[command(about = "Logs every HTTP request it receives and answers 200", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "ECHO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:5000
    #[arg(short, long, env = "ECHO_BIND")]
    pub bind: Option<String>,

    /// Port to listen on; replaces the port of the bind address
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format (human, json)
    #[arg(long, env = "LOG_FORMAT")]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Defaults, then the config file, then flags and environment.
    pub fn resolve_config(&self) -> Result<EchoConfig, ConfigError> {
        let config = match &self.config {
            Some(path) => load_config(path)?,
            None => EchoConfig::default(),
        };
        finalize(self.apply_overrides(config))
    }

    fn apply_overrides(&self, mut config: EchoConfig) -> EchoConfig {
        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(port) = self.port {
            config.listener.set_port(port);
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }
        config
    }
}
