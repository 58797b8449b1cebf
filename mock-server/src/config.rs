//! Environment-driven settings for the mock server binary.

use std::net::{Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind: SocketAddr,
    /// Start with the three reference records.
    pub seeded: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            seeded: true,
        }
    }
}

impl Settings {
    /// Read `PORT` and `FISH_EMPTY` from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut settings = Self::default();

        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT {port:?}: {e}"))?;
            settings.bind.set_port(port);
        }

        if let Some(empty) = lookup("FISH_EMPTY") {
            settings.seeded = !matches!(empty.trim(), "1" | "true" | "yes");
        }

        Ok(settings)
    }
}
