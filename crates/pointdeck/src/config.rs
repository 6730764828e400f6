//! Server configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for the server process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the listener to.
    pub bind_addr: String,

    /// Directory the frontend build is served from.
    pub static_dir: PathBuf,

    /// How often the idle-room sweep runs.
    pub sweep_interval: Duration,

    /// Rooms idle for longer than this get deleted by the sweep.
    pub room_max_age: Duration,

    /// Outbound event buffer per connection. A client that falls this
    /// many events behind is evicted.
    pub outbound_buffer: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            static_dir: PathBuf::from("static"),
            sweep_interval: Duration::from_secs(10 * 60),
            room_max_age: Duration::from_secs(60 * 60),
            outbound_buffer: 256,
        }
    }
}

impl ServerConfig {
    /// Builds a config from the environment, falling back to defaults.
    ///
    /// Reads `PORT` for the listen port and `STATIC_DIR` for the
    /// frontend directory.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(port) = std::env::var("PORT") {
            config.bind_addr = format!("0.0.0.0:{port}");
        }
        if let Ok(dir) = std::env::var("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        config
    }
}
