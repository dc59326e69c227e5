use log::{debug, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_dictionary_file")]
    pub dictionary_file: PathBuf,
    #[serde(default = "default_input_file")]
    pub input_file: PathBuf,
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            dictionary_file: default_dictionary_file(),
            input_file: default_input_file(),
            output_file: default_output_file(),
        }
    }
}

impl Config {
    pub fn dictionary_path(&self) -> PathBuf {
        self.resolve(&self.dictionary_file)
    }

    pub fn input_path(&self) -> PathBuf {
        self.resolve(&self.input_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output_file)
    }

    // `join` keeps absolute paths as they are.
    fn resolve(&self, file: &Path) -> PathBuf {
        self.data_dir.join(file)
    }
}

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("wordswap.toml")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_dictionary_file() -> PathBuf {
    PathBuf::from("replacements.csv")
}

fn default_input_file() -> PathBuf {
    PathBuf::from("default.json")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("output.json")
}

fn parse_config(content: &str, path: &Path) -> Config {
    match toml::from_str(content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse {path:?}: {e}");
            Config::default()
        }
    }
}

fn apply_env(config: &mut Config, data_dir: Option<String>) {
    if let Some(dir) = data_dir.filter(|d| !d.is_empty()) {
        config.data_dir = PathBuf::from(dir);
    }
}

pub fn load_config() -> Config {
    let path = config_path();
    let mut config = match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&content, &path),
        Err(_) => Config::default(),
    };

    // Allow env var to override the data directory
    apply_env(&mut config, std::env::var("WORDSWAP_DATA_DIR").ok());

    debug!("data_dir={:?}", config.data_dir);
    config
}
