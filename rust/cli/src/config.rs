use holecard_engine::game::Variant;
use serde::{Deserialize, Serialize};
use std::fs;

/// Environment variable naming the TOML configuration file.
pub const CONFIG_ENV: &str = "HOLECARD_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub game: Variant,
    pub trials: u64,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub game: ValueSource,
    pub trials: ValueSource,
    pub seed: ValueSource,
    pub threads: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            game: ValueSource::Default,
            trials: ValueSource::Default,
            seed: ValueSource::Default,
            threads: ValueSource::Default,
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
            game: Variant::ThreeCardPoker,
            trials: 100_000,
            seed: None,
            threads: None,
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
            ConfigError::Io(e) => write!(f, "cannot read {}: {}", CONFIG_ENV, e),
            ConfigError::Parse(e) => write!(f, "cannot parse {}: {}", CONFIG_ENV, e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

/// Defaults, then the file named by `HOLECARD_CONFIG`, then `HOLECARD_*`
/// variables. Command-line flags are applied by the commands on top.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.game {
            cfg.game = parse_game(&v)?;
            sources.game = ValueSource::File;
        }
        if let Some(v) = f.trials {
            cfg.trials = v;
            sources.trials = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.threads {
            cfg.threads = Some(v);
            sources.threads = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("HOLECARD_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed '{}'", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(trials) = std::env::var("HOLECARD_TRIALS")
        && !trials.is_empty()
    {
        cfg.trials = trials
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid trials '{}'", trials)))?;
        sources.trials = ValueSource::Env;
    }
    if let Ok(game) = std::env::var("HOLECARD_GAME")
        && !game.is_empty()
    {
        cfg.game = parse_game(&game)?;
        sources.game = ValueSource::Env;
    }
    if let Ok(threads) = std::env::var("HOLECARD_THREADS")
        && !threads.is_empty()
    {
        cfg.threads = Some(
            threads
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid threads '{}'", threads)))?,
        );
        sources.threads = ValueSource::Env;
    }

    validate(&cfg)?;
    tracing::debug!(game = %cfg.game, trials = cfg.trials, seed = ?cfg.seed, threads = ?cfg.threads, "configuration resolved");
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    game: Option<String>,
    #[serde(default)]
    trials: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    threads: Option<usize>,
}

fn parse_game(s: &str) -> Result<Variant, ConfigError> {
    s.parse()
        .map_err(|e: holecard_engine::errors::ConfigError| ConfigError::Invalid(e.to_string()))
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.trials == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: trials must be >= 1".into(),
        ));
    }
    if cfg.threads == Some(0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: threads must be >= 1".into(),
        ));
    }
    Ok(())
}
