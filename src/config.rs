use std::fs::read_to_string;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    /// Directory where stage artifacts (roster records, merged mapping) live
    pub data_dir: PathBuf,
    /// Directory for per-author publication files
    pub output_dir: PathBuf,
    /// Publications requested per author (a single page)
    pub per_page: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            per_page: 10,
        }
    }
}

pub fn load(path: Option<PathBuf>) -> Result<Config> {
    let fallback_path = || {
        let mut fb_path = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                [
                    std::env::var("HOME").expect("No config paths found"),
                    ".config".to_string(),
                ]
                .iter()
                .collect()
            });
        fb_path.push("authorlink");
        fb_path.push("config.toml");
        fb_path
    };

    let path = path.unwrap_or_else(fallback_path);
    if !path.exists() {
        return Ok(Config::default());
    }
    Ok(toml::from_str(&read_to_string(path)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let conf: Config = toml::from_str(r#"data_dir = "artifacts""#).unwrap();
        assert_eq!(conf.data_dir, PathBuf::from("artifacts"));
        assert_eq!(conf.output_dir, PathBuf::from("output"));
        assert_eq!(conf.per_page, 10);
    }
}
