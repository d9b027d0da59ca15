//! anti-idle entry point.
//!
//! Loads the configuration, opens the native input emulator once, and runs
//! the heartbeat on a single-threaded Tokio runtime until the process is
//! killed or the input device fails.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()             -- log level, X display
//!  └─ open_native_emulator()    -- XTest / SendInput / CoreGraphics, held until exit
//!  └─ Heartbeat::run()          -- move +1, move -1, press Space, release Space, forever
//! ```
//!
//! There is no shutdown path: `Heartbeat::run` only returns on a device
//! error, which is logged and returned from `main`, so the process exits
//! with a failure status.

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use anti_idle::application::heartbeat::Heartbeat;
use anti_idle::infrastructure::{
    input_emulation::open_native_emulator,
    storage::config::{load_config, AppConfig, ConfigError},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // The config file may not be resolvable (no HOME / APPDATA); run on defaults then.
    let (config, config_note) = match load_config() {
        Ok(config) => (config, None),
        Err(ConfigError::NoPlatformConfigDir) => (
            AppConfig::default(),
            Some("no platform config directory; using defaults"),
        ),
        Err(e) => return Err(e).context("failed to load configuration"),
    };

    // Initialise structured logging.  RUST_LOG wins over the config file.
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => config
            .agent
            .env_filter()
            .context("invalid agent.log_level in configuration")?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("anti-idle starting");
    if let Some(note) = config_note {
        warn!("{note}");
    }

    let emulator = open_native_emulator(&config.device).context("failed to open input device")?;
    let heartbeat = Heartbeat::new(emulator);

    match heartbeat.run().await {
        Ok(never) => match never {},
        Err(e) => {
            error!("input device failed: {e}");
            Err(e).context("heartbeat stopped")
        }
    }
}
