use std::path::PathBuf;

const APP_DIR_NAME: &str = "gateway-dashboard";

pub fn config_dir() -> Result<PathBuf, String> {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

pub fn data_dir() -> Result<PathBuf, String> {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

fn xdg_dir(var: &str, home_fallback: &str) -> Result<PathBuf, String> {
    if let Some(base) = std::env::var_os(var).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(base).join(APP_DIR_NAME));
    }
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home).join(home_fallback).join(APP_DIR_NAME))
}
