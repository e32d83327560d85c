use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    path: PathBuf,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_library_path")]
    pub library_path: String,
    /// Seconds a scan result stays served from memory.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: hondana_home().join("config.yml"),
            port: default_port(),
            library_path: default_library_path(),
            cache_ttl: default_cache_ttl(),
        }
    }
}

fn hondana_home() -> PathBuf {
    match std::env::var("HONDANA_HOME") {
        Ok(path) => PathBuf::from(path),
        Err(_) => dirs::home_dir().expect("should have home").join(".hondana"),
    }
}

fn default_port() -> u16 {
    80
}

fn default_library_path() -> String {
    ".".to_string()
}

fn default_cache_ttl() -> u64 {
    300
}

impl Config {
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Config, anyhow::Error> {
        let config_path = match path {
            Some(p) => PathBuf::new().join(p),
            None => hondana_home().join("config.yml"),
        };

        match std::fs::File::open(config_path.clone()) {
            Ok(file) => {
                info!("Open config from {:?}", config_path);
                let mut cfg: Self = serde_yml::from_reader(file)?;
                cfg.path = config_path;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Config {
                    path: config_path,
                    ..Default::default()
                };
                cfg.save()?;
                info!("Write default config at {:?}", cfg.path);
                Ok(cfg)
            }
        }
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_yml::to_string(&self)?)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let cfg: Config = serde_yml::from_str("port: 8080\n").unwrap();

        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.library_path, ".");
        assert_eq!(cfg.cache_ttl, 300);
    }
}
