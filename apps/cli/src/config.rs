use std::fs;
use std::path::{Path, PathBuf};

use gateway_app::AppConfig;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: AppConfig,
    pub file: PathBuf,
    pub created: bool,
}

pub fn load_or_create() -> Result<ConfigLoad, String> {
    let dir = crate::dirs::config_dir()?;
    load_or_create_in(&dir)
}

pub fn load_or_create_in(dir: &Path) -> Result<ConfigLoad, String> {
    fs::create_dir_all(dir)
        .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    let file = dir.join(CONFIG_FILE_NAME);

    if file.exists() {
        let contents = fs::read_to_string(&file)
            .map_err(|err| format!("read config {}: {}", file.display(), err))?;
        let config: AppConfig = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {}", file.display(), err))?;
        return Ok(ConfigLoad {
            config,
            file,
            created: false,
        });
    }

    let config = AppConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&file, contents)
        .map_err(|err| format!("write config {}: {}", file.display(), err))?;

    Ok(ConfigLoad {
        config,
        file,
        created: true,
    })
}
