use std::collections::HashMap;

use anyhow::Context;
use chrono_tz::Tz;
use tracing::{
  debug,
  trace,
  warn
};

use crate::activity::DEFAULT_ACTIVITY_LIMIT;

pub const TASKS_KEY: &str =
  "taskmaster-tasks";
pub const ACTIVITIES_KEY: &str =
  "taskmaster-activities";
pub const GOALS_KEY: &str =
  "taskmaster-goals";

#[derive(Debug, Clone)]
pub struct Config {
  map: HashMap<String, String>
}

impl Default for Config {
  fn default() -> Self {
    let mut map = HashMap::new();
    for (key, value) in [
      ("storage.tasks_key", TASKS_KEY),
      (
        "storage.activities_key",
        ACTIVITIES_KEY
      ),
      ("storage.goals_key", GOALS_KEY),
      ("activity.limit", "10"),
      ("notifications.hold_ms", "3000"),
      ("display.recent_days", "7"),
      ("display.due_soon_days", "3"),
      ("display.due_horizon_days", "7"),
      ("display.timezone", "UTC"),
      ("seed.samples", "on"),
      ("offline.service_worker", "/sw.js")
    ] {
      map.insert(
        key.to_string(),
        value.to_string()
      );
    }

    Self { map }
  }
}

impl Config {
  /// Defaults overlaid with a TOML document. Nested tables become dotted
  /// keys, so `[display] timezone = "Europe/Berlin"` sets
  /// `display.timezone`.
  #[tracing::instrument(skip(text))]
  pub fn from_toml_str(
    text: &str
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();
    cfg.merge_toml(text)?;
    Ok(cfg)
  }

  fn merge_toml(
    &mut self,
    text: &str
  ) -> anyhow::Result<()> {
    let table: toml::Table =
      toml::from_str(text).context(
        "invalid configuration document"
      )?;
    flatten_into(
      &mut self.map,
      "",
      &table
    );
    Ok(())
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      debug!(key = %k, value = %v, "applying override");
      self.map.insert(k, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn get_bool(
    &self,
    key: &str
  ) -> Option<bool> {
    self
      .map
      .get(key)
      .map(|v| parse_bool(v))
  }

  fn get_parsed<T>(
    &self,
    key: &str,
    fallback: T
  ) -> T
  where
    T: std::str::FromStr
  {
    let Some(raw) = self.map.get(key)
    else {
      return fallback;
    };
    match raw.trim().parse::<T>() {
      | Ok(value) => value,
      | Err(_) => {
        warn!(key, value = %raw, "invalid config value; using default");
        fallback
      }
    }
  }

  pub fn tasks_key(&self) -> String {
    self
      .get("storage.tasks_key")
      .unwrap_or_else(|| {
        TASKS_KEY.to_string()
      })
  }

  pub fn activities_key(
    &self
  ) -> String {
    self
      .get("storage.activities_key")
      .unwrap_or_else(|| {
        ACTIVITIES_KEY.to_string()
      })
  }

  pub fn goals_key(&self) -> String {
    self
      .get("storage.goals_key")
      .unwrap_or_else(|| {
        GOALS_KEY.to_string()
      })
  }

  pub fn activity_limit(
    &self
  ) -> usize {
    self
      .get_parsed(
        "activity.limit",
        DEFAULT_ACTIVITY_LIMIT
      )
      .max(1)
  }

  pub fn notice_hold_ms(&self) -> u32 {
    self.get_parsed(
      "notifications.hold_ms",
      3_000
    )
  }

  pub fn recent_days(&self) -> i64 {
    self.get_parsed(
      "display.recent_days",
      7
    )
  }

  pub fn due_soon_days(&self) -> i64 {
    self.get_parsed(
      "display.due_soon_days",
      3
    )
  }

  /// Days ahead/behind within which goal due dates read relatively.
  pub fn due_horizon_days(&self) -> i64 {
    self.get_parsed(
      "display.due_horizon_days",
      7
    )
  }

  pub fn timezone(&self) -> Tz {
    self.get_parsed(
      "display.timezone",
      Tz::UTC
    )
  }

  pub fn seed_samples(&self) -> bool {
    self
      .get_bool("seed.samples")
      .unwrap_or(true)
  }

  /// Script URL of the offline cache worker; empty disables registration.
  pub fn service_worker(
    &self
  ) -> Option<String> {
    self
      .get("offline.service_worker")
      .map(|v| v.trim().to_string())
      .filter(|v| !v.is_empty())
  }
}

fn flatten_into(
  map: &mut HashMap<String, String>,
  prefix: &str,
  table: &toml::Table
) {
  for (k, v) in table {
    let key = if prefix.is_empty() {
      k.clone()
    } else {
      format!("{prefix}.{k}")
    };
    match v {
      | toml::Value::Table(inner) => {
        flatten_into(map, &key, inner);
      }
      | toml::Value::String(s) => {
        trace!(key = %key, value = %s, "loaded config key");
        map.insert(key, s.clone());
      }
      | toml::Value::Boolean(b) => {
        let flag =
          if *b { "on" } else { "off" };
        map.insert(key, flag.to_string());
      }
      | other => {
        trace!(key = %key, value = %other, "loaded config key");
        map.insert(key, other.to_string());
      }
    }
  }
}

pub(crate) fn parse_bool(
  s: &str
) -> bool {
  matches!(
    s.trim()
      .to_ascii_lowercase()
      .as_str(),
    "1" | "y" | "yes" | "on" | "true"
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_the_stored_document_keys() {
    let cfg = Config::default();
    assert_eq!(
      cfg.tasks_key(),
      "taskmaster-tasks"
    );
    assert_eq!(
      cfg.activities_key(),
      "taskmaster-activities"
    );
    assert_eq!(
      cfg.goals_key(),
      "taskmaster-goals"
    );
    assert_eq!(cfg.activity_limit(), 10);
    assert_eq!(cfg.notice_hold_ms(), 3000);
    assert!(cfg.seed_samples());
    assert_eq!(cfg.timezone(), Tz::UTC);
  }

  #[test]
  fn toml_tables_become_dotted_keys() {
    let cfg = Config::from_toml_str(
      r#"
[activity]
limit = 5

[display]
timezone = "Europe/Berlin"

[seed]
samples = false
"#
    )
    .expect("parse config");

    assert_eq!(cfg.activity_limit(), 5);
    assert_eq!(
      cfg.timezone(),
      chrono_tz::Europe::Berlin
    );
    assert!(!cfg.seed_samples());
  }

  #[test]
  fn invalid_values_fall_back_to_defaults() {
    let mut cfg = Config::default();
    cfg.apply_overrides([
      (
        "display.timezone".to_string(),
        "Mars/Olympus".to_string()
      ),
      (
        "activity.limit".to_string(),
        "lots".to_string()
      )
    ]);
    assert_eq!(cfg.timezone(), Tz::UTC);
    assert_eq!(cfg.activity_limit(), 10);
  }

  #[test]
  fn empty_worker_url_disables_registration() {
    let mut cfg = Config::default();
    assert_eq!(
      cfg.service_worker().as_deref(),
      Some("/sw.js")
    );
    cfg.apply_overrides([(
      "offline.service_worker"
        .to_string(),
      String::new()
    )]);
    assert!(
      cfg.service_worker().is_none()
    );
  }

  #[test]
  fn due_horizon_is_its_own_setting() {
    let mut cfg = Config::default();
    cfg.apply_overrides([(
      "display.recent_days".to_string(),
      "2".to_string()
    )]);
    assert_eq!(cfg.recent_days(), 2);
    assert_eq!(cfg.due_horizon_days(), 7);
  }

  #[test]
  fn rejects_malformed_documents() {
    assert!(
      Config::from_toml_str("[display")
        .is_err()
    );
  }
}
