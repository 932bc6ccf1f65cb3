use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use chrono::Duration;
use serde::Deserialize;

use crate::related::DEFAULT_RELATED_LIMIT;

#[derive(Deserialize, Clone)]
pub struct Site {
    pub website: String,
    pub title: String,
    pub author: String,
    pub description: String,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_true")]
    pub show_archives: bool,
    #[serde(default = "default_scheduled_margin")]
    pub scheduled_post_margin_mins: i64,
}

impl Site {
    /// How long before its publish date a scheduled post is already shown.
    /// `parse_config` rejects margins that do not fit a `Duration`.
    pub fn scheduled_margin(&self) -> Duration {
        Duration::try_minutes(self.scheduled_post_margin_mins).unwrap_or_else(Duration::zero)
    }
}

#[derive(Deserialize, Clone)]
pub struct Paths {
    pub posts_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Deserialize, Clone)]
pub struct Defaults {
    #[serde(default = "default_related_limit")]
    pub related_posts_limit: usize,
    #[serde(default = "default_static_pages")]
    pub static_pages: Vec<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            related_posts_limit: default_related_limit(),
            static_pages: default_static_pages(),
        }
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Validation {
    #[serde(default = "default_min_description")]
    pub min_description_len: usize,
    #[serde(default = "default_max_description")]
    pub max_description_len: usize,
}

impl Default for Validation {
    fn default() -> Self {
        Validation {
            min_description_len: default_min_description(),
            max_description_len: default_max_description(),
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Clone)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub validation: Validation,
    pub server: Server,
    pub log: Option<Log>,
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

fn default_scheduled_margin() -> i64 {
    15
}

fn default_related_limit() -> usize {
    DEFAULT_RELATED_LIMIT
}

fn default_static_pages() -> Vec<String> {
    ["/", "/posts/", "/tags/", "/archives/", "/about/"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_min_description() -> usize {
    50
}

fn default_max_description() -> usize {
    160
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent().unwrap_or(Path::new("."));
    let rest = path.strip_prefix("${exe_dir}").unwrap_or(&path);
    Ok(exe_dir.join(rest))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if Duration::try_minutes(cfg.site.scheduled_post_margin_mins).is_none() {
        return Err(io::Error::new(
            ErrorKind::InvalidData,
            format!("Invalid scheduled_post_margin_mins: {}", cfg.site.scheduled_post_margin_mins)));
    }

    cfg.paths = Paths {
        posts_dir: parse_path(cfg.paths.posts_dir)?,
        output_dir: parse_path(cfg.paths.output_dir)?,
    };

    if let Some(ref mut log) = cfg.log {
        if let Some(location) = log.location.take() {
            log.location = Some(parse_path(location)?);
        }
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
