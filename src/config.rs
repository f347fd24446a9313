//! Runtime configuration.
//!
//! Every setting is a command-line flag that falls back to an environment
//! variable, so the service runs the same under a shell, systemd, or a
//! container runtime.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

/// The only platform allowed to wipe state through `/admin/reset`.
pub const DEV_PLATFORM: &str = "dev";

#[derive(Clone, Debug, Parser)]
#[command(name = "chirpy", version, about = "Chirp validation API")]
pub struct Config {
    /// Address to listen on. Not `HOST`: shells export that as a hostname.
    #[arg(long, env = "CHIRPY_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Directory served under `/app/`.
    #[arg(long, env = "FILEPATH_ROOT", default_value = ".")]
    pub filepath_root: PathBuf,

    /// Deployment platform; only `dev` permits `/admin/reset`.
    #[arg(long, env = "PLATFORM", default_value = "")]
    pub platform: String,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn is_dev(&self) -> bool {
        self.platform == DEV_PLATFORM
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            filepath_root: PathBuf::from("."),
            platform: String::new(),
        }
    }
}
