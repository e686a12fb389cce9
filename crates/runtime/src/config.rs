//! Session configuration structures and loaders.
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use progression_core::Authority;

/// Which side of a multi-participant session this process is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SessionRole {
    /// Applies experience and world progress directly.
    #[default]
    Authoritative,
    /// Forwards experience requests to the authoritative participant.
    Remote,
}

impl SessionRole {
    pub const fn authority(self) -> Authority {
        match self {
            Self::Authoritative => Authority::Authoritative,
            Self::Remote => Authority::Remote,
        }
    }

    pub const fn is_authoritative(self) -> bool {
        matches!(self, Self::Authoritative)
    }
}

impl FromStr for SessionRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "authoritative" | "server" | "host" => Ok(Self::Authoritative),
            "remote" | "client" => Ok(Self::Remote),
            other => Err(format!("unknown session role '{other}'")),
        }
    }
}

impl fmt::Display for SessionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionRole::Authoritative => "authoritative",
            SessionRole::Remote => "remote",
        };
        write!(f, "{}", label)
    }
}

/// Configuration required to bootstrap a progression session.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Directory holding `config.toml`, `jobs.ron`, `skills.ron` and `biomes.ron`.
    pub data_dir: PathBuf,
    /// Directory for character saves; `None` keeps saves in memory.
    pub save_dir: Option<PathBuf>,
    pub role: SessionRole,
    /// Seed mixed into every monster level roll.
    pub world_seed: u64,
    /// Party members within this many tiles of a kill share its experience.
    pub share_radius: u32,
}

impl RuntimeConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "crates/game/content/data";
    pub const DEFAULT_SHARE_RADIUS: u32 = 50;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PROGRESSION_DATA_DIR` - Content data directory (default: `crates/game/content/data`)
    /// - `PROGRESSION_SAVE_DIR` - Directory for save files (default: in-memory saves)
    /// - `PROGRESSION_SESSION_ROLE` - `authoritative` or `remote` (default: authoritative)
    /// - `PROGRESSION_SEED` - World seed for level rolls (default: 0)
    /// - `PROGRESSION_SHARE_RADIUS` - Party XP share radius in tiles (default: 50)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("PROGRESSION_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        config.save_dir = env::var("PROGRESSION_SAVE_DIR").ok().map(PathBuf::from);

        if let Some(role) = read_env::<SessionRole>("PROGRESSION_SESSION_ROLE") {
            config.role = role;
        }

        if let Some(seed) = read_env::<u64>("PROGRESSION_SEED") {
            config.world_seed = seed;
        }

        if let Some(radius) = read_env::<u32>("PROGRESSION_SHARE_RADIUS") {
            config.share_radius = radius;
        }

        config
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            save_dir: None,
            role: SessionRole::default(),
            world_seed: 0,
            share_radius: Self::DEFAULT_SHARE_RADIUS,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roles() {
        assert_eq!("Remote".parse::<SessionRole>(), Ok(SessionRole::Remote));
        assert_eq!(" server ".parse::<SessionRole>(), Ok(SessionRole::Authoritative));
        assert!("observer".parse::<SessionRole>().is_err());
        assert_eq!(SessionRole::Remote.authority(), Authority::Remote);
    }
}
