use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::sync::RwLock;

static CONFIG_FILE: &str = "config/config";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
  pub database: DatabaseConfig,
  pub scheduled_tasks: ScheduledTasksConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
  /// Path of the sqlite database file, or `:memory:`.
  pub file: String,
  pub pool_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduledTasksConfig {
  /// Seconds between runs of the comment layer backfill.
  pub layer_reconcile_interval_secs: u32,
}

lazy_static! {
  static ref SETTINGS: RwLock<Settings> = RwLock::new(match Settings::init() {
    Ok(c) => c,
    Err(e) => panic!("Failed to load settings: {}", e),
  });
}

impl Settings {
  /// Reads the config file at `config/config.toml` if present, with defaults
  /// for anything unset. Every value can be overridden with a `QUAD_*`
  /// environment variable, e.g. `QUAD_DATABASE__FILE=/var/lib/quad/quad.db`.
  fn init() -> Result<Self, ConfigError> {
    let config = Config::builder()
      .set_default("database.file", "quad.sqlite3")?
      .set_default("database.pool_size", 5_i64)?
      .set_default("scheduled_tasks.layer_reconcile_interval_secs", 300_i64)?
      .add_source(File::with_name(CONFIG_FILE).required(false))
      .add_source(Environment::with_prefix("QUAD").separator("__"))
      .build()?;

    config.try_deserialize()
  }

  pub fn get() -> Self {
    SETTINGS.read().expect("read settings").to_owned()
  }
}
