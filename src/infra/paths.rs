// src/infra/paths.rs — Config and data path management
//
// All paths respect the HOTELCHAT_HOME environment variable for isolation.
// When HOTELCHAT_HOME is set, config and data live under that directory.
// When unset, config uses ~/.hotelchat/ and data uses XDG_DATA_HOME/hotelchat.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Returns the HOTELCHAT_HOME override, if set.
fn hotelchat_home() -> Option<PathBuf> {
    std::env::var_os("HOTELCHAT_HOME").map(PathBuf::from)
}

/// Home directory, falling back to the working directory on exotic systems.
fn home_dir() -> PathBuf {
    BaseDirs::new()
        .map(|b| b.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration directory: $HOTELCHAT_HOME/ or ~/.hotelchat/
pub fn config_dir() -> PathBuf {
    if let Some(home) = hotelchat_home() {
        return home;
    }
    home_dir().join(".hotelchat")
}

/// Data directory: $HOTELCHAT_HOME/data/ or ~/.local/share/hotelchat/
pub fn data_dir() -> PathBuf {
    if let Some(home) = hotelchat_home() {
        return home.join("data");
    }
    match ProjectDirs::from("", "", "hotelchat") {
        Some(dirs) => dirs.data_local_dir().to_path_buf(),
        None => config_dir().join("data"),
    }
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Durable user identity entry
pub fn identity_path() -> PathBuf {
    data_dir().join("user_id")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_lives_under_data_dir() {
        assert!(identity_path().starts_with(data_dir()));
        assert_eq!(identity_path().file_name().unwrap(), "user_id");
    }

    #[test]
    fn test_config_file_under_config_dir() {
        assert!(config_file_path().starts_with(config_dir()));
    }
}
