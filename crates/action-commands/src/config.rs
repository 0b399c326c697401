use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use crate::env::{EnvSource, is_debug};
use crate::error::{Error, Result};

/// Env var holding a `tracing` filter for the CLI's own diagnostics.
pub const LOG_ENV: &str = "ACTION_CMD_LOG";

const DEFAULT_FILTER: &str = "warn";
const DEBUG_FILTER: &str = "debug";

#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub log_filter: String,
    pub runner_debug: bool,
    pub env_file: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from flags and the environment.
    ///
    /// An explicit `ACTION_CMD_LOG` wins; otherwise `RUNNER_DEBUG=1` or
    /// `verbose` raise the level to debug.
    pub fn resolve<E: EnvSource + ?Sized>(env: &E, verbose: bool, env_file: Option<&Path>) -> Self {
        let runner_debug = is_debug(env);
        let log_filter = env
            .var(LOG_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| {
                if verbose || runner_debug {
                    DEBUG_FILTER.into()
                } else {
                    DEFAULT_FILTER.into()
                }
            });
        Self {
            log_filter,
            runner_debug,
            env_file: env_file.map(Path::to_path_buf),
        }
    }
}

/// Load `KEY=VALUE` pairs into the process environment. Variables that are
/// already set are left alone.
pub fn load_env_file(path: &Path) -> Result<()> {
    dotenv::from_path(path)
        .map_err(|e| Error::msg(format!("failed to load env file {}: {e}", path.display())))
}

/// Install the stderr diagnostics subscriber. Stdout is reserved for commands.
pub fn init_tracing(settings: &Settings) -> Result<()> {
    let filter = EnvFilter::try_new(&settings.log_filter)
        .map_err(|e| Error::msg(format!("invalid log filter '{}': {e}", settings.log_filter)))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::msg(format!("failed to install log subscriber: {e}")))
}
