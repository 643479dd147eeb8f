use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "ROCHAMBEAU_CONFIG";
pub const SEED_ENV: &str = "ROCHAMBEAU_SEED";
pub const EMOJI_ENV: &str = "ROCHAMBEAU_EMOJI";
pub const SAMPLES_ENV: &str = "ROCHAMBEAU_SAMPLES";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub emoji: bool,
    pub samples: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub emoji: ValueSource,
    pub samples: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            emoji: ValueSource::Default,
            samples: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            emoji: true,
            samples: 100_000,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Resolves configuration from defaults, then the TOML file named by
/// `ROCHAMBEAU_CONFIG`, then individual environment variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.emoji {
            cfg.emoji = v;
            sources.emoji = ValueSource::File;
        }
        if let Some(v) = f.samples {
            cfg.samples = v;
            sources.samples = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(emoji) = std::env::var(EMOJI_ENV)
        && !emoji.is_empty()
    {
        cfg.emoji = parse_bool(&emoji).ok_or_else(|| ConfigError::Invalid("Invalid emoji".into()))?;
        sources.emoji = ValueSource::Env;
    }
    if let Ok(samples) = std::env::var(SAMPLES_ENV)
        && !samples.is_empty()
    {
        cfg.samples = samples
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid samples".into()))?;
        sources.samples = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    emoji: Option<bool>,
    #[serde(default)]
    samples: Option<u32>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.samples == 0 {
        return Err(ConfigError::Invalid("samples must be > 0".into()));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
