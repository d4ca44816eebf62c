use std::env;
use std::io;
use std::path::PathBuf;

const APP_DIR: &str = "unarr";

pub fn user_home() -> Option<PathBuf> {
    home::home_dir()
}

pub fn user_config() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("APPDATA").map(PathBuf::from)
    }
    #[cfg(target_os = "macos")]
    {
        user_home().map(|p| p.join("Library/Application Support"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| user_home().map(|p| p.join(".config")))
    }
}

/// `<user_config>/unarr`
pub fn app_config() -> Option<PathBuf> {
    user_config().map(|p| p.join(APP_DIR))
}

pub fn user_temp() -> PathBuf {
    env::temp_dir()
}

/// Extraction target used when the caller asks for a scratch location.
pub fn temp_target() -> PathBuf {
    user_temp().join("tmp")
}

pub fn current() -> io::Result<PathBuf> {
    env::current_dir()
}
